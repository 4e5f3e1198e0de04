use super::UserOperation;
use ethers::types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// User operation with all fields optional, used to overlay a subset of fields onto a full
/// record
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationPartial {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_code: Option<Bytes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_data: Option<Bytes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_gas_limit: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_gas_limit: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_verification_gas: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paymaster_and_data: Option<Bytes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<Bytes>,
}

impl UserOperationPartial {
    /// Writes every present field onto the given user operation, leaving absent fields
    /// untouched
    pub fn apply(&self, uo: &mut UserOperation) {
        if let Some(sender) = self.sender {
            uo.sender = sender;
        }
        if let Some(nonce) = self.nonce {
            uo.nonce = nonce;
        }
        if let Some(ref init_code) = self.init_code {
            uo.init_code = init_code.clone();
        }
        if let Some(ref call_data) = self.call_data {
            uo.call_data = call_data.clone();
        }
        if let Some(call_gas_limit) = self.call_gas_limit {
            uo.call_gas_limit = call_gas_limit;
        }
        if let Some(verification_gas_limit) = self.verification_gas_limit {
            uo.verification_gas_limit = verification_gas_limit;
        }
        if let Some(pre_verification_gas) = self.pre_verification_gas {
            uo.pre_verification_gas = pre_verification_gas;
        }
        if let Some(max_fee_per_gas) = self.max_fee_per_gas {
            uo.max_fee_per_gas = max_fee_per_gas;
        }
        if let Some(max_priority_fee_per_gas) = self.max_priority_fee_per_gas {
            uo.max_priority_fee_per_gas = max_priority_fee_per_gas;
        }
        if let Some(ref paymaster_and_data) = self.paymaster_and_data {
            uo.paymaster_and_data = paymaster_and_data.clone();
        }
        if let Some(ref signature) = self.signature {
            uo.signature = signature.clone();
        }
    }
}

impl From<UserOperationPartial> for UserOperation {
    fn from(value: UserOperationPartial) -> Self {
        Self {
            sender: value.sender.unwrap_or_default(),
            nonce: value.nonce.unwrap_or_default(),
            init_code: value.init_code.unwrap_or_default(),
            call_data: value.call_data.unwrap_or_default(),
            call_gas_limit: value.call_gas_limit.unwrap_or_default(),
            verification_gas_limit: value.verification_gas_limit.unwrap_or_default(),
            pre_verification_gas: value.pre_verification_gas.unwrap_or_default(),
            max_fee_per_gas: value.max_fee_per_gas.unwrap_or_default(),
            max_priority_fee_per_gas: value.max_priority_fee_per_gas.unwrap_or_default(),
            paymaster_and_data: value.paymaster_and_data.unwrap_or_default(),
            signature: value.signature.unwrap_or_default(),
        }
    }
}
