//! Bindings and helpers for the smart contracts of the ERC-4337 stack

mod entry_point;
mod error;
pub mod gen;

pub use entry_point::EntryPoint;
pub use error::{decode_revert_error, decode_revert_string, EntryPointError};
pub use gen::{
    entry_point_api::{
        EntryPointAPIErrors, FailedOp, SenderAddressResult, UserOperationEventFilter,
    },
    EntryPointAPI, EntryPointAPIEvents,
};
