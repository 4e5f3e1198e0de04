use ethers::types::{spoof, Address};
use userop_primitives::{UserOperation, UserOperationHash};

/// Mutable state threaded through the middleware pipeline
///
/// Each middleware reads and writes the operation in place; the entry point and chain id are
/// fixed for the whole run.
#[derive(Clone, Debug)]
pub struct UserOperationContext {
    /// User operation under construction
    pub op: UserOperation,
    /// Entry point the operation is bound to
    pub entry_point: Address,
    /// Chain the operation is bound to
    pub chain_id: u64,
    /// State overrides applied during gas estimation
    pub state_overrides: Option<spoof::State>,
}

impl UserOperationContext {
    pub fn new(op: UserOperation, entry_point: Address, chain_id: u64) -> Self {
        Self { op, entry_point, chain_id, state_overrides: None }
    }

    pub fn with_state_overrides(mut self, state_overrides: Option<spoof::State>) -> Self {
        self.state_overrides = state_overrides;
        self
    }

    /// Hash of the operation in its current state
    pub fn user_op_hash(&self) -> UserOperationHash {
        self.op.hash(&self.entry_point, self.chain_id)
    }
}
