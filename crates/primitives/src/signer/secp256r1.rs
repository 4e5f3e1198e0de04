use super::{SignerError, UserOperationSigner};
use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use ethers::{
    abi::{encode, Token},
    types::{Bytes, U256},
};
use p256::{
    ecdsa::{signature::hazmat::PrehashSigner, Signature, SigningKey},
    elliptic_curve::rand_core::OsRng,
};
use sha2::{Digest, Sha256};

/// Authenticator data filler; Barz does not verify it on-chain
const AUTHENTICATOR_DATA: [u8; 32] = [0u8; 32];

/// Signer over the secp256r1 (P-256) curve producing WebAuthn-shaped signatures for Barz
/// accounts
///
/// The message is wrapped the way a WebAuthn authenticator would report it: the signature is
/// computed over sha256(authenticator_data || sha256(base64url(message))) and returned
/// together with the envelope fields as an ABI-encoded tuple `(uint256 r, uint256 s, bytes
/// authenticator_data, string client_data_prefix, string client_data_suffix)`.
#[derive(Clone)]
pub struct Secp256r1Signer {
    key: SigningKey,
}

impl Secp256r1Signer {
    /// Creates a signer from raw private key bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignerError> {
        let key = SigningKey::from_slice(bytes)
            .map_err(|err| SignerError::Key { inner: err.to_string() })?;
        Ok(Self { key })
    }

    /// Creates a signer from a private key hex string
    pub fn from_hex(key: &str) -> Result<Self, SignerError> {
        let data = hex::decode(key.trim_start_matches("0x"))
            .map_err(|err| SignerError::Key { inner: err.to_string() })?;
        Self::from_bytes(&data)
    }

    /// Creates a signer with a randomly generated key
    pub fn random() -> Self {
        Self { key: SigningKey::random(&mut OsRng) }
    }

    /// Uncompressed SEC1 encoding of the public key (0x04 || x || y)
    pub fn public_key(&self) -> Bytes {
        self.key
            .verifying_key()
            .to_encoded_point(false)
            .as_bytes()
            .to_vec()
            .into()
    }

    fn webauthn_hash(message: &[u8]) -> [u8; 32] {
        let client_data_json = URL_SAFE_NO_PAD.encode(message);
        let client_hash = Sha256::digest(client_data_json.as_bytes());

        let mut hasher = Sha256::new();
        hasher.update(AUTHENTICATOR_DATA);
        hasher.update(client_hash);
        hasher.finalize().into()
    }
}

#[async_trait]
impl UserOperationSigner for Secp256r1Signer {
    async fn public_identity(&self) -> Result<Bytes, SignerError> {
        Ok(self.public_key())
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Bytes, SignerError> {
        let sig_hash = Self::webauthn_hash(message);

        // the hash is signed directly, without another round of sha256
        let signature: Signature = self
            .key
            .sign_prehash(&sig_hash)
            .map_err(|err| SignerError::Sign { inner: err.to_string() })?;
        let bytes = signature.to_bytes();
        let r = U256::from_big_endian(&bytes[..32]);
        let s = U256::from_big_endian(&bytes[32..]);

        Ok(encode(&[
            Token::Uint(r),
            Token::Uint(s),
            Token::Bytes(AUTHENTICATOR_DATA.to_vec()),
            Token::String(String::new()),
            Token::String(String::new()),
        ])
        .into())
    }
}
