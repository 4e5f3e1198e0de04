//! ERC-4337 user operation record and its canonical hash

use crate::utils::as_checksum;
use ethers::{
    abi::AbiEncode,
    prelude::{EthAbiCodec, EthAbiType},
    types::{Address, Bytes, H256, U256},
    utils::keccak256,
};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

mod hash;
mod partial;
mod response;

pub use hash::UserOperationHash;
pub use partial::UserOperationPartial;
pub use response::{
    EstimateResult, UserOperationByHash, UserOperationReceipt, VerifyingPaymasterResult,
};

/// User operation
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EthAbiCodec, EthAbiType)]
#[serde(rename_all = "camelCase")]
pub struct UserOperation {
    /// Sender of the user operation
    #[serde(serialize_with = "as_checksum")]
    pub sender: Address,

    /// Nonce (anti replay protection)
    pub nonce: U256,

    /// Init code for the account (needed if account not yet deployed and needs to be created)
    pub init_code: Bytes,

    /// The data that is passed to the sender during the main execution call
    pub call_data: Bytes,

    /// The amount of gas to allocate for the main execution call
    pub call_gas_limit: U256,

    /// The amount of gas to allocate for the verification step
    pub verification_gas_limit: U256,

    /// The amount of gas to compensate the bundler for the pre-verification execution and calldata
    pub pre_verification_gas: U256,

    /// Maximum fee per gas (similar to EIP-1559 max_fee_per_gas)
    pub max_fee_per_gas: U256,

    /// Maximum priority fee per gas (similar to EIP-1559 max_priority_fee_per_gas)
    pub max_priority_fee_per_gas: U256,

    /// Address of paymaster sponsoring the user operation, followed by extra data to send to the paymaster (can be empty)
    pub paymaster_and_data: Bytes,

    /// Data passed to the account along with the nonce during the verification step
    pub signature: Bytes,
}

impl UserOperation {
    /// Packs the user operation without signature to bytes (used for calculating the hash)
    pub fn pack_without_signature(&self) -> Bytes {
        let user_operation_packed = UserOperationUnsigned::from(self.clone());
        user_operation_packed.encode().into()
    }

    /// Calculates the hash of the user operation for the given entry point and chain
    pub fn hash(&self, entry_point: &Address, chain_id: u64) -> UserOperationHash {
        H256::from_slice(
            keccak256(
                [
                    keccak256(self.pack_without_signature().deref()).to_vec(),
                    entry_point.encode(),
                    U256::from(chain_id).encode(),
                ]
                .concat(),
            )
            .as_slice(),
        )
        .into()
    }

    /// Creates user operation with sender
    pub fn sender(mut self, sender: Address) -> Self {
        self.sender = sender;
        self
    }

    /// Creates user operation with nonce
    pub fn nonce(mut self, nonce: U256) -> Self {
        self.nonce = nonce;
        self
    }

    /// Creates user operation with init code
    pub fn init_code(mut self, init_code: Bytes) -> Self {
        self.init_code = init_code;
        self
    }

    /// Creates user operation with call data
    pub fn call_data(mut self, call_data: Bytes) -> Self {
        self.call_data = call_data;
        self
    }

    /// Creates user operation with call gas limit
    pub fn call_gas_limit(mut self, call_gas_limit: U256) -> Self {
        self.call_gas_limit = call_gas_limit;
        self
    }

    /// Creates user operation with verification gas limit
    pub fn verification_gas_limit(mut self, verification_gas_limit: U256) -> Self {
        self.verification_gas_limit = verification_gas_limit;
        self
    }

    /// Creates user operation with pre-verification gas
    pub fn pre_verification_gas(mut self, pre_verification_gas: U256) -> Self {
        self.pre_verification_gas = pre_verification_gas;
        self
    }

    /// Creates user operation with max fee per gas
    pub fn max_fee_per_gas(mut self, max_fee_per_gas: U256) -> Self {
        self.max_fee_per_gas = max_fee_per_gas;
        self
    }

    /// Creates user operation with max priority fee per gas
    pub fn max_priority_fee_per_gas(mut self, max_priority_fee_per_gas: U256) -> Self {
        self.max_priority_fee_per_gas = max_priority_fee_per_gas;
        self
    }

    /// Creates user operation with paymaster and data
    pub fn paymaster_and_data(mut self, paymaster_and_data: Bytes) -> Self {
        self.paymaster_and_data = paymaster_and_data;
        self
    }

    /// Creates user operation with signature
    pub fn signature(mut self, signature: Bytes) -> Self {
        self.signature = signature;
        self
    }
}

/// User operation with all byte fields replaced by their hashes, the preimage of
/// [hash](UserOperation::hash)
#[derive(Clone, Debug, EthAbiCodec, EthAbiType)]
pub struct UserOperationUnsigned {
    pub sender: Address,
    pub nonce: U256,
    pub init_code: H256,
    pub call_data: H256,
    pub call_gas_limit: U256,
    pub verification_gas_limit: U256,
    pub pre_verification_gas: U256,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
    pub paymaster_and_data: H256,
}

impl From<UserOperation> for UserOperationUnsigned {
    fn from(value: UserOperation) -> Self {
        Self {
            sender: value.sender,
            nonce: value.nonce,
            init_code: keccak256(value.init_code.deref()).into(),
            call_data: keccak256(value.call_data.deref()).into(),
            call_gas_limit: value.call_gas_limit,
            verification_gas_limit: value.verification_gas_limit,
            pre_verification_gas: value.pre_verification_gas,
            max_fee_per_gas: value.max_fee_per_gas,
            max_priority_fee_per_gas: value.max_priority_fee_per_gas,
            paymaster_and_data: keccak256(value.paymaster_and_data.deref()).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_operation_pack_without_signature() {
        let uos =  vec![
            UserOperation::default().verification_gas_limit(100_000.into()).pre_verification_gas(21_000.into()).max_priority_fee_per_gas(1_000_000_000.into()),
            UserOperation {
                sender: "0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse().unwrap(),
                nonce: 1.into(),
                init_code: Bytes::default(),
                call_data: "0xb61d27f60000000000000000000000009c5754de1443984659e1b3a8d1931d83475ba29c00000000000000000000000000000000000000000000000000005af3107a400000000000000000000000000000000000000000000000000000000000000000600000000000000000000000000000000000000000000000000000000000000000".parse().unwrap(),
                call_gas_limit: 33_100.into(),
                verification_gas_limit: 60_624.into(),
                pre_verification_gas: 44_056.into(),
                max_fee_per_gas: 1_695_000_030_u64.into(),
                max_priority_fee_per_gas: 1_695_000_000.into(),
                paymaster_and_data: Bytes::default(),
                signature: "0x37540ca4f91a9f08993ba4ebd4b7473902f69864c98951f9db8cb47b78764c1a13ad46894a96dc0cad68f9207e49b4dbb897f25f47f040cec2a636a8201c1cd71b".parse().unwrap(),
            },
        ];
        assert_eq!(uos[0].pack_without_signature(), "0x00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000186a000000000000000000000000000000000000000000000000000000000000052080000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000003b9aca00c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470".parse::<Bytes>().unwrap());
        assert_eq!(uos[1].pack_without_signature(), "0x0000000000000000000000009c5754de1443984659e1b3a8d1931d83475ba29c0000000000000000000000000000000000000000000000000000000000000001c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470f7def7aeb687d6992b466243b713223689982cefca0f91a1f5c5f60adb532b93000000000000000000000000000000000000000000000000000000000000814c000000000000000000000000000000000000000000000000000000000000ecd0000000000000000000000000000000000000000000000000000000000000ac18000000000000000000000000000000000000000000000000000000006507a5de000000000000000000000000000000000000000000000000000000006507a5c0c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470".parse::<Bytes>().unwrap());
    }

    #[test]
    fn user_operation_hash() {
        let uos =  vec![
            UserOperation::default().verification_gas_limit(100_000.into()).pre_verification_gas(21_000.into()).max_priority_fee_per_gas(1_000_000_000.into()),
            UserOperation {
                sender: "0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse().unwrap(),
                nonce: U256::zero(),
                init_code: "0x9406cc6185a346906296840746125a0e449764545fbfb9cf000000000000000000000000ce0fefa6f7979c4c9b5373e0f5105b7259092c6d0000000000000000000000000000000000000000000000000000000000000000".parse().unwrap(),
                call_data: "0xb61d27f60000000000000000000000009c5754de1443984659e1b3a8d1931d83475ba29c00000000000000000000000000000000000000000000000000005af3107a400000000000000000000000000000000000000000000000000000000000000000600000000000000000000000000000000000000000000000000000000000000000".parse().unwrap(),
                call_gas_limit: 33_100.into(),
                verification_gas_limit: 361_460.into(),
                pre_verification_gas: 44_980.into(),
                max_fee_per_gas: 1_695_000_030_u64.into(),
                max_priority_fee_per_gas: 1_695_000_000.into(),
                paymaster_and_data: Bytes::default(),
                signature: "0xebfd4657afe1f1c05c1ec65f3f9cc992a3ac083c424454ba61eab93152195e1400d74df01fc9fa53caadcb83a891d478b713016bcc0c64307c1ad3d7ea2e2d921b".parse().unwrap(),
            },
        ];
        assert_eq!(
            uos[0].hash(
                &"0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789"
                    .parse()
                    .unwrap(),
                80_001
            ),
            "0x95418c07086df02ff6bc9e8bdc150b380cb761beecc098630440bcec6e862702"
                .parse::<H256>()
                .unwrap()
                .into()
        );
        assert_eq!(
            uos[1].hash(
                &"0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789"
                    .parse()
                    .unwrap(),
                80_001
            ),
            "0x7c1b8c9df49a9e09ecef0f0fe6841d895850d29820f9a4b494097764085dcd7e"
                .parse::<H256>()
                .unwrap()
                .into()
        );
    }

    #[test]
    fn user_operation_hash_domain_separation() {
        let uo = UserOperation::default()
            .verification_gas_limit(100_000.into())
            .pre_verification_gas(21_000.into())
            .max_priority_fee_per_gas(1_000_000_000.into());
        let ep: Address = "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789".parse().unwrap();

        assert_eq!(uo.hash(&ep, 80_001), uo.clone().hash(&ep, 80_001));
        assert_ne!(uo.hash(&ep, 80_001), uo.hash(&ep, 1));
        assert_ne!(uo.hash(&ep, 80_001), uo.hash(&Address::zero(), 80_001));
        assert_ne!(uo.hash(&ep, 80_001), uo.clone().nonce(1.into()).hash(&ep, 80_001));
    }

    #[test]
    fn user_operation_wire_format() {
        let uo = UserOperation::default()
            .sender(
                "0x9c5754De1443984659E1b3a8d1931D83475ba29C"
                    .parse()
                    .unwrap(),
            )
            .call_gas_limit(200_000.into())
            .verification_gas_limit(100_000.into())
            .pre_verification_gas(21_000.into());
        let value = serde_json::to_value(&uo).unwrap();

        assert_eq!(value["sender"], "0x9c5754De1443984659E1b3a8d1931D83475ba29C");
        assert_eq!(value["nonce"], "0x0");
        assert_eq!(value["initCode"], "0x");
        assert_eq!(value["callData"], "0x");
        assert_eq!(value["callGasLimit"], "0x30d40");
        assert_eq!(value["verificationGasLimit"], "0x186a0");
        assert_eq!(value["preVerificationGas"], "0x5208");
        assert_eq!(value["maxFeePerGas"], "0x0");
        assert_eq!(value["paymasterAndData"], "0x");
        assert_eq!(value["signature"], "0x");

        let decoded: UserOperation = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, uo);
    }
}
