//! Ready-made builders for known smart account implementations
//!
//! A preset resolves the counterfactual sender, seeds the builder with the account defaults
//! and wires the standard middleware pipeline. The result is a [UserOperationBuilder] that
//! only needs call data before it can be built and sent.

use crate::middleware::UserOperationMiddleware;
use ethers::{
    types::{Address, Bytes, U256},
    utils::keccak256,
};
use std::sync::Arc;
use userop_primitives::{SignerError, UserOperationSigner};

mod barz;
mod simple_account;

pub use barz::Barz;
pub use simple_account::SimpleAccount;

/// Optional knobs shared by the account presets
#[derive(Clone, Default)]
pub struct PresetOptions {
    /// Entry point contract, defaults to the canonical v0.6 deployment
    pub entry_point: Option<Address>,
    /// Account factory, defaults to the canonical factory of the preset
    pub factory: Option<Address>,
    /// Salt of the counterfactual address derivation
    pub salt: Option<U256>,
    /// Key of the two-dimensional nonce to track
    pub nonce_key: Option<U256>,
    /// Signature verification facet of the account (Barz only)
    pub verification_facet: Option<Address>,
    /// Sponsoring middleware that takes the place of local gas estimation
    pub paymaster: Option<Arc<dyn UserOperationMiddleware>>,
}

/// Placeholder signature over fixed bytes, shaped like the real one so gas estimation holds up
pub(crate) async fn dummy_signature(
    signer: &Arc<dyn UserOperationSigner>,
) -> Result<Bytes, SignerError> {
    signer.sign_message(&keccak256([0xde_u8, 0xad])).await
}
