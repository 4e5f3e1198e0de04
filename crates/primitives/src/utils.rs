use ethers::{types::Address, utils::to_checksum};
use serde::Serializer;

/// Serializes an address in its EIP-55 checksum form
pub fn as_checksum<S>(val: &Address, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_checksum(val, None))
}
