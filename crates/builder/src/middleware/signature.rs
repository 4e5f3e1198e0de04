use super::UserOperationMiddleware;
use crate::{context::UserOperationContext, error::MiddlewareError};
use async_trait::async_trait;
use std::sync::Arc;
use userop_primitives::UserOperationSigner;

/// Signs the canonical hash of the operation and writes the signature into it
///
/// Has to run last: every later field change would invalidate the hash.
pub struct HashSigner {
    signer: Arc<dyn UserOperationSigner>,
}

impl HashSigner {
    pub fn new(signer: Arc<dyn UserOperationSigner>) -> Self {
        Self { signer }
    }
}

#[async_trait]
impl UserOperationMiddleware for HashSigner {
    async fn handle(&self, ctx: &mut UserOperationContext) -> Result<(), MiddlewareError> {
        let hash = ctx.user_op_hash();
        ctx.op.signature = self.signer.sign_message(hash.as_fixed_bytes()).await?;
        Ok(())
    }
}
