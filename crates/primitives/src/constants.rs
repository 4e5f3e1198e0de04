//! Account abstraction (ERC-4337) related constants

use crate::user_operation::UserOperation;
use lazy_static::lazy_static;

/// Entry point smart contract
pub mod entry_point {
    /// Address of the entry point smart contract
    pub const ADDRESS: &str = "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789";
    /// Version of the entry point smart contract
    pub const VERSION: &str = "0.6.0";
}

/// SimpleAccount smart contract wallet
pub mod simple_account {
    /// Address of the SimpleAccount factory
    pub const FACTORY: &str = "0x9406Cc6185a346906296840746125a0E44976454";
}

/// Barz smart contract wallet
pub mod barz {
    /// Address of the Barz factory
    pub const FACTORY: &str = "0x96C489979E39F877BDb8637b75A25C1a5B2DE14C";
    /// Address of the facet verifying secp256r1 (WebAuthn) signatures
    pub const SECP256R1_VERIFICATION_FACET: &str = "0x9EE7A0f73F23757b1C954D947eefCF65d119028c";
}

/// Gas values applied to a freshly constructed user operation
pub mod gas {
    /// Default amount of gas for the main execution call
    pub const DEFAULT_CALL_GAS_LIMIT: u64 = 35_000;
    /// Default amount of gas for the verification step
    pub const DEFAULT_VERIFICATION_GAS_LIMIT: u64 = 70_000;
    /// Default amount of gas compensating the bundler for pre-verification work
    pub const DEFAULT_PRE_VERIFICATION_GAS: u64 = 21_000;
}

/// JSON-RPC methods answered by a bundler rather than a regular execution node
pub const BUNDLER_METHODS: [&str; 5] = [
    "eth_sendUserOperation",
    "eth_estimateUserOperationGas",
    "eth_getUserOperationByHash",
    "eth_getUserOperationReceipt",
    "eth_supportedEntryPoints",
];

lazy_static! {
    /// Zero-valued user operation with the default gas table applied
    pub static ref DEFAULT_USER_OPERATION: UserOperation = UserOperation::default()
        .call_gas_limit(gas::DEFAULT_CALL_GAS_LIMIT.into())
        .verification_gas_limit(gas::DEFAULT_VERIFICATION_GAS_LIMIT.into())
        .pre_verification_gas(gas::DEFAULT_PRE_VERIFICATION_GAS.into());
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::types::{Address, Bytes};

    #[test]
    fn default_user_operation_gas_table() {
        let uo = DEFAULT_USER_OPERATION.clone();
        assert_eq!(uo.call_gas_limit, 35_000.into());
        assert_eq!(uo.verification_gas_limit, 70_000.into());
        assert_eq!(uo.pre_verification_gas, 21_000.into());
        assert_eq!(uo.sender, Address::zero());
        assert_eq!(uo.max_fee_per_gas, 0.into());
        assert_eq!(uo.signature, Bytes::default());
    }

    #[test]
    fn well_known_addresses_parse() {
        assert!(entry_point::ADDRESS.parse::<Address>().is_ok());
        assert!(simple_account::FACTORY.parse::<Address>().is_ok());
        assert!(barz::FACTORY.parse::<Address>().is_ok());
        assert!(barz::SECP256R1_VERIFICATION_FACET.parse::<Address>().is_ok());
    }
}
