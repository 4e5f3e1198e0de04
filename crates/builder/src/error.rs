use userop_contracts::EntryPointError;
use userop_primitives::SignerError;

/// Errors raised while a middleware pipeline prepares a user operation
#[derive(Debug, thiserror::Error)]
pub enum MiddlewareError {
    /// Both fee estimation strategies failed
    #[error("gas price estimation failed: eip1559: {eip1559}, legacy: {legacy}")]
    GasPrice {
        /// Error of the EIP-1559 fee query
        eip1559: String,
        /// Error of the legacy eth_gasPrice fallback
        legacy: String,
    },

    /// Entry point error
    #[error(transparent)]
    EntryPoint(#[from] EntryPointError),

    /// Signer error
    #[error(transparent)]
    Signer(#[from] SignerError),

    /// Provider error
    #[error("provider error: {inner}")]
    Provider {
        /// The inner error message
        inner: String,
    },

    /// Response from a bundler or paymaster could not be used
    #[error("invalid response: {inner}")]
    Response {
        /// The inner error message
        inner: String,
    },
}

/// Errors raised while initializing an account preset
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    /// Entry point error
    #[error(transparent)]
    EntryPoint(#[from] EntryPointError),

    /// Signer error
    #[error(transparent)]
    Signer(#[from] SignerError),

    /// Signer identity does not fit the account type
    #[error("unexpected signer identity: {inner}")]
    Identity {
        /// The inner error message
        inner: String,
    },

    /// Provider error
    #[error("provider error: {inner}")]
    Provider {
        /// The inner error message
        inner: String,
    },
}
