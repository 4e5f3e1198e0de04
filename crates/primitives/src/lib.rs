//! ERC-4337 (account abstraction) user operation primitives
//!
//! This crate contains the user operation record with its canonical hash, the wire types
//! spoken over the bundler RPC, signer capabilities, and the node/bundler routing transport.

pub mod constants;
mod field;
mod provider;
mod signer;
mod user_operation;
mod utils;

pub use field::{FieldError, IntoAddress, IntoBytes, IntoUint};
pub use provider::{create_bundler_provider, BundlerRpc};
pub use signer::{Secp256r1Signer, SignerError, UserOperationSigner, WalletSigner};
pub use user_operation::{
    EstimateResult, UserOperation, UserOperationByHash, UserOperationHash, UserOperationPartial,
    UserOperationReceipt, UserOperationUnsigned, VerifyingPaymasterResult,
};
pub use utils::as_checksum;
