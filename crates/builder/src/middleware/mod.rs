//! Middleware applied in sequence to a user operation before submission

use crate::{context::UserOperationContext, error::MiddlewareError};
use async_trait::async_trait;

mod account;
mod gas_limit;
mod gas_price;
mod paymaster;
mod signature;

pub use account::AccountResolver;
pub use gas_limit::GasLimitEstimator;
pub use gas_price::GasPriceEstimator;
pub use paymaster::VerifyingPaymaster;
pub use signature::HashSigner;

/// A single step of the build pipeline, mutating the context in place
#[async_trait]
pub trait UserOperationMiddleware: Send + Sync {
    async fn handle(&self, ctx: &mut UserOperationContext) -> Result<(), MiddlewareError>;
}
