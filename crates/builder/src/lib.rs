//! Assembly pipeline for ERC-4337 user operations: a middleware driven builder, presets for
//! known smart accounts and a client that submits to the bundler

mod builder;
mod client;
mod context;
mod error;
pub mod middleware;
mod preset;

pub use builder::UserOperationBuilder;
pub use client::{Client, PendingUserOperation, SendOptions};
pub use context::UserOperationContext;
pub use error::{MiddlewareError, PresetError};
pub use middleware::{
    AccountResolver, GasLimitEstimator, GasPriceEstimator, HashSigner, UserOperationMiddleware,
    VerifyingPaymaster,
};
pub use preset::{Barz, PresetOptions, SimpleAccount};
