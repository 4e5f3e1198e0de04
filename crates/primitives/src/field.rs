//! Fallible coercions for user operation field inputs
//!
//! Setters on the builder accept either strong types or hex strings. Strings are validated
//! before anything is written, so a failed coercion never leaves a half-updated record.

use ethers::{
    types::{Address, Bytes, U256},
    utils::to_checksum,
};
use thiserror::Error;

/// Error on coercing an input into a user operation field
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// Value could not be parsed as an address
    #[error("invalid address: {value}")]
    InvalidAddress { value: String },
    /// Value could not be parsed as a byte string
    #[error("invalid bytes: {value}")]
    InvalidBytes { value: String },
    /// Value could not be parsed as an unsigned integer
    #[error("invalid integer: {value}")]
    InvalidInteger { value: String },
}

/// Conversion into an [Address], validating string inputs
pub trait IntoAddress {
    fn into_address(self) -> Result<Address, FieldError>;
}

/// Conversion into [Bytes], validating string inputs
pub trait IntoBytes {
    fn into_bytes(self) -> Result<Bytes, FieldError>;
}

/// Conversion into a [U256], validating string inputs
pub trait IntoUint {
    fn into_uint(self) -> Result<U256, FieldError>;
}

impl IntoAddress for Address {
    fn into_address(self) -> Result<Address, FieldError> {
        Ok(self)
    }
}

impl IntoAddress for &Address {
    fn into_address(self) -> Result<Address, FieldError> {
        Ok(*self)
    }
}

impl IntoAddress for &str {
    fn into_address(self) -> Result<Address, FieldError> {
        let err = || FieldError::InvalidAddress { value: self.to_string() };
        let hex_part = self.strip_prefix("0x").ok_or_else(err)?;
        if hex_part.len() != 40 {
            return Err(err());
        }
        let address: Address = self.parse().map_err(|_| err())?;
        // mixed-case input must carry a valid EIP-55 checksum
        let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
        if has_upper && has_lower && to_checksum(&address, None) != self {
            return Err(err());
        }
        Ok(address)
    }
}

impl IntoAddress for String {
    fn into_address(self) -> Result<Address, FieldError> {
        self.as_str().into_address()
    }
}

impl IntoBytes for Bytes {
    fn into_bytes(self) -> Result<Bytes, FieldError> {
        Ok(self)
    }
}

impl IntoBytes for &Bytes {
    fn into_bytes(self) -> Result<Bytes, FieldError> {
        Ok(self.clone())
    }
}

impl IntoBytes for Vec<u8> {
    fn into_bytes(self) -> Result<Bytes, FieldError> {
        Ok(self.into())
    }
}

impl IntoBytes for &[u8] {
    fn into_bytes(self) -> Result<Bytes, FieldError> {
        Ok(self.to_vec().into())
    }
}

impl IntoBytes for &str {
    fn into_bytes(self) -> Result<Bytes, FieldError> {
        let err = || FieldError::InvalidBytes { value: self.to_string() };
        let hex_part = self.strip_prefix("0x").ok_or_else(err)?;
        if hex_part.len() % 2 != 0 {
            return Err(err());
        }
        let data = hex::decode(hex_part).map_err(|_| err())?;
        Ok(data.into())
    }
}

impl IntoBytes for String {
    fn into_bytes(self) -> Result<Bytes, FieldError> {
        self.as_str().into_bytes()
    }
}

impl IntoUint for U256 {
    fn into_uint(self) -> Result<U256, FieldError> {
        Ok(self)
    }
}

impl IntoUint for &U256 {
    fn into_uint(self) -> Result<U256, FieldError> {
        Ok(*self)
    }
}

macro_rules! impl_into_uint {
    ($($ty:ty),*) => {
        $(
            impl IntoUint for $ty {
                fn into_uint(self) -> Result<U256, FieldError> {
                    Ok(U256::from(self))
                }
            }
        )*
    };
}

impl_into_uint!(u8, u16, u32, u64, u128, usize);

impl IntoUint for &str {
    fn into_uint(self) -> Result<U256, FieldError> {
        let err = || FieldError::InvalidInteger { value: self.to_string() };
        match self.strip_prefix("0x") {
            Some(hex_part) => U256::from_str_radix(hex_part, 16).map_err(|_| err()),
            None => U256::from_dec_str(self).map_err(|_| err()),
        }
    }
}

impl IntoUint for String {
    fn into_uint(self) -> Result<U256, FieldError> {
        self.as_str().into_uint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_from_str() {
        // all lowercase needs no checksum
        assert_eq!(
            "0x9c5754de1443984659e1b3a8d1931d83475ba29c"
                .into_address()
                .unwrap(),
            "0x9c5754De1443984659E1b3a8d1931D83475ba29C"
                .parse::<Address>()
                .unwrap()
        );
        // mixed case with a valid EIP-55 checksum
        assert!("0x9c5754De1443984659E1b3a8d1931D83475ba29C"
            .into_address()
            .is_ok());
        // mixed case with a broken checksum
        assert_eq!(
            "0x9C5754De1443984659E1b3a8d1931D83475ba29C".into_address(),
            Err(FieldError::InvalidAddress {
                value: "0x9C5754De1443984659E1b3a8d1931D83475ba29C".into()
            })
        );
        // missing prefix, wrong length, non-hex
        assert!("9c5754de1443984659e1b3a8d1931d83475ba29c"
            .into_address()
            .is_err());
        assert!("0x9c5754de1443984659e1b3a8d1931d83475ba29"
            .into_address()
            .is_err());
        assert!("0xzz5754de1443984659e1b3a8d1931d83475ba29c"
            .into_address()
            .is_err());
        assert!("".into_address().is_err());
    }

    #[test]
    fn bytes_from_str() {
        assert_eq!("0x".into_bytes().unwrap(), Bytes::default());
        assert_eq!(
            "0xdead".into_bytes().unwrap(),
            Bytes::from(vec![0xde, 0xad])
        );
        // odd length, missing prefix, non-hex
        assert!("0xdea".into_bytes().is_err());
        assert!("dead".into_bytes().is_err());
        assert!("0xdeag".into_bytes().is_err());
        assert!("".into_bytes().is_err());
    }

    #[test]
    fn bytes_pass_through() {
        let raw = vec![0x01, 0x02];
        assert_eq!(raw.clone().into_bytes().unwrap(), Bytes::from(raw));
    }

    #[test]
    fn uint_from_str() {
        assert_eq!("21000".into_uint().unwrap(), U256::from(21_000));
        assert_eq!("0x5208".into_uint().unwrap(), U256::from(21_000));
        assert_eq!("0".into_uint().unwrap(), U256::zero());
        assert!("".into_uint().is_err());
        assert!("12a".into_uint().is_err());
        assert!("0xzz".into_uint().is_err());
        assert!("-5".into_uint().is_err());
    }

    #[test]
    fn uint_pass_through() {
        assert_eq!(35_000_u64.into_uint().unwrap(), U256::from(35_000));
        assert_eq!(U256::from(7).into_uint().unwrap(), U256::from(7));
    }
}
