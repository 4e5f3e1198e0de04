//! Signer capability used to finalize user operations

use async_trait::async_trait;
use ethers::{
    prelude::rand,
    signers::{coins_bip39::English, LocalWallet, MnemonicBuilder, Signer},
    types::{Address, Bytes},
};
use thiserror::Error;

mod secp256r1;

pub use secp256r1::Secp256r1Signer;

/// Error of the signer
#[derive(Debug, Error)]
pub enum SignerError {
    /// Key material could not be parsed or derived
    #[error("invalid key material: {inner}")]
    Key { inner: String },
    /// Signing operation failed
    #[error("signing failed: {inner}")]
    Sign { inner: String },
}

/// Capability every account signer exposes: a public identity the account address is derived
/// from and a signature over an arbitrary message
#[async_trait]
pub trait UserOperationSigner: Send + Sync {
    /// Public identity bytes (the 20-byte address for EOA-style signers, a raw public key for
    /// WebAuthn-style signers)
    async fn public_identity(&self) -> Result<Bytes, SignerError>;

    /// Signs the given message
    async fn sign_message(&self, message: &[u8]) -> Result<Bytes, SignerError>;
}

/// EOA signer wrapping an ethers wallet, signing with the EIP-191 prefix
#[derive(Clone, Debug)]
pub struct WalletSigner {
    /// Signing key of the wallet
    pub signer: LocalWallet,
}

impl WalletSigner {
    /// Creates a signer from a private key hex string
    pub fn from_key(key: &str) -> Result<Self, SignerError> {
        let signer = key
            .parse::<LocalWallet>()
            .map_err(|err| SignerError::Key { inner: err.to_string() })?;
        Ok(Self { signer })
    }

    /// Creates a signer from the given mnemonic phrase (derivation path m/44'/60'/0'/0/0)
    pub fn from_phrase(phrase: &str) -> Result<Self, SignerError> {
        let signer = MnemonicBuilder::<English>::default()
            .phrase(phrase)
            .derivation_path("m/44'/60'/0'/0/0")
            .map_err(|err| SignerError::Key { inner: err.to_string() })?
            .build()
            .map_err(|err| SignerError::Key { inner: err.to_string() })?;
        Ok(Self { signer })
    }

    /// Creates a signer with a randomly generated key
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self { signer: LocalWallet::new(&mut rng) }
    }

    /// Address of the underlying key
    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

#[async_trait]
impl UserOperationSigner for WalletSigner {
    async fn public_identity(&self) -> Result<Bytes, SignerError> {
        Ok(self.signer.address().as_bytes().to_vec().into())
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Bytes, SignerError> {
        let signature = self
            .signer
            .sign_message(message)
            .await
            .map_err(|err| SignerError::Sign { inner: err.to_string() })?;
        Ok(signature.to_vec().into())
    }
}
