use super::UserOperationMiddleware;
use crate::{context::UserOperationContext, error::MiddlewareError};
use async_trait::async_trait;
use ethers::providers::{Http, JsonRpcClient, Provider};
use std::sync::Arc;
use userop_primitives::VerifyingPaymasterResult;

/// Requests sponsorship for the operation from a verifying paymaster service
///
/// Replaces gas limit estimation in the pipeline: the paymaster answers with its own gas
/// values alongside `paymaster_and_data`. The verification gas limit is tripled before the
/// request so the paymaster's own verification work fits during simulation.
#[derive(Clone)]
pub struct VerifyingPaymaster<C: JsonRpcClient> {
    paymaster_rpc: Arc<Provider<C>>,
    context: serde_json::Value,
}

impl VerifyingPaymaster<Http> {
    /// Creates the middleware over the paymaster's RPC endpoint
    pub fn new(rpc_url: &str, context: serde_json::Value) -> eyre::Result<Self> {
        Ok(Self::with_provider(Arc::new(Provider::<Http>::try_from(rpc_url)?), context))
    }
}

impl<C: JsonRpcClient + 'static> VerifyingPaymaster<C> {
    pub fn with_provider(paymaster_rpc: Arc<Provider<C>>, context: serde_json::Value) -> Self {
        Self { paymaster_rpc, context }
    }
}

#[async_trait]
impl<C: JsonRpcClient + 'static> UserOperationMiddleware for VerifyingPaymaster<C> {
    async fn handle(&self, ctx: &mut UserOperationContext) -> Result<(), MiddlewareError> {
        ctx.op.verification_gas_limit = ctx.op.verification_gas_limit * 3;

        let res: VerifyingPaymasterResult = self
            .paymaster_rpc
            .request("pm_sponsorUserOperation", (&ctx.op, ctx.entry_point, &self.context))
            .await
            .map_err(|err| MiddlewareError::Provider { inner: err.to_string() })?;

        ctx.op.paymaster_and_data = res.paymaster_and_data;
        ctx.op.pre_verification_gas = res.pre_verification_gas;
        ctx.op.verification_gas_limit = res.verification_gas_limit;
        ctx.op.call_gas_limit = res.call_gas_limit;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::{
        providers::{JsonRpcError, MockProvider, MockResponse},
        types::Bytes,
    };
    use serde_json::json;
    use userop_primitives::UserOperation;

    fn paymaster() -> (VerifyingPaymaster<MockProvider>, MockProvider) {
        let (provider, mock) = Provider::mocked();
        (
            VerifyingPaymaster::with_provider(
                Arc::new(provider),
                json!({ "type": "payg" }),
            ),
            mock,
        )
    }

    fn context() -> UserOperationContext {
        let uo = UserOperation::default().verification_gas_limit(70_000.into());
        UserOperationContext::new(
            uo,
            "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789".parse().unwrap(),
            80_001,
        )
    }

    #[tokio::test]
    async fn adopts_sponsorship_data() {
        let (paymaster, mock) = paymaster();
        let mut ctx = context();

        mock.push(json!({
            "paymasterAndData": "0xe93eca6595fe94091dc1af46aac2a8b5d7990770000000000000000000000000",
            "preVerificationGas": "0xafc8",
            "verificationGasLimit": "0x33450",
            "callGasLimit": "0x814c",
        }))
        .unwrap();

        paymaster.handle(&mut ctx).await.unwrap();
        assert_ne!(ctx.op.paymaster_and_data, Bytes::default());
        assert_eq!(ctx.op.pre_verification_gas, 45_000.into());
        assert_eq!(ctx.op.verification_gas_limit, 210_000.into());
        assert_eq!(ctx.op.call_gas_limit, 33_100.into());
    }

    #[tokio::test]
    async fn declined_sponsorship_is_an_error() {
        let (paymaster, mock) = paymaster();
        let mut ctx = context();

        mock.push_response(MockResponse::Error(JsonRpcError {
            code: -32501,
            message: "sender not allowed".into(),
            data: None,
        }));

        let res = paymaster.handle(&mut ctx).await;
        assert!(matches!(res, Err(MiddlewareError::Provider { .. })));
        // the inflation applied before the request remains on the context
        assert_eq!(ctx.op.verification_gas_limit, 210_000.into());
    }
}
