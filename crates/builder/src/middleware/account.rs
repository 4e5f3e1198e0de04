use super::UserOperationMiddleware;
use crate::{context::UserOperationContext, error::MiddlewareError};
use async_trait::async_trait;
use ethers::{
    providers::{JsonRpcClient, Middleware, Provider},
    types::{Bytes, U256},
};
use userop_contracts::EntryPoint;

/// Resolves the account state of the sender: its next nonce and whether the init code still
/// has to be carried
#[derive(Clone)]
pub struct AccountResolver<C: JsonRpcClient + 'static> {
    entry_point: EntryPoint<Provider<C>>,
    init_code: Bytes,
    nonce_key: U256,
}

impl<C: JsonRpcClient + 'static> AccountResolver<C> {
    pub fn new(entry_point: EntryPoint<Provider<C>>, init_code: Bytes, nonce_key: U256) -> Self {
        Self { entry_point, init_code, nonce_key }
    }
}

#[async_trait]
impl<C: JsonRpcClient + 'static> UserOperationMiddleware for AccountResolver<C> {
    async fn handle(&self, ctx: &mut UserOperationContext) -> Result<(), MiddlewareError> {
        let eth_client = self.entry_point.eth_client();
        let (nonce, code) = tokio::try_join!(
            async {
                self.entry_point
                    .get_nonce(&ctx.op.sender, self.nonce_key)
                    .await
                    .map_err(MiddlewareError::from)
            },
            async {
                eth_client
                    .get_code(ctx.op.sender, None)
                    .await
                    .map_err(|err| MiddlewareError::Provider { inner: err.to_string() })
            },
        )?;

        ctx.op.nonce = nonce;
        // the factory call is only needed until the account is deployed
        ctx.op.init_code = if code.is_empty() { self.init_code.clone() } else { Bytes::default() };

        Ok(())
    }
}
