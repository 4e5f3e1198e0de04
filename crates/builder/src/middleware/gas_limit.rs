use super::UserOperationMiddleware;
use crate::{context::UserOperationContext, error::MiddlewareError};
use async_trait::async_trait;
use ethers::providers::{JsonRpcClient, Provider};
use std::sync::Arc;
use userop_primitives::EstimateResult;

/// Asks the bundler for gas limits via `eth_estimateUserOperationGas` and writes them into
/// the operation
#[derive(Clone)]
pub struct GasLimitEstimator<C: JsonRpcClient> {
    eth_client: Arc<Provider<C>>,
}

impl<C: JsonRpcClient + 'static> GasLimitEstimator<C> {
    pub fn new(eth_client: Arc<Provider<C>>) -> Self {
        Self { eth_client }
    }
}

#[async_trait]
impl<C: JsonRpcClient + 'static> UserOperationMiddleware for GasLimitEstimator<C> {
    async fn handle(&self, ctx: &mut UserOperationContext) -> Result<(), MiddlewareError> {
        let est: EstimateResult = match ctx.state_overrides {
            Some(ref state_overrides) => {
                self.eth_client
                    .request(
                        "eth_estimateUserOperationGas",
                        (&ctx.op, ctx.entry_point, state_overrides),
                    )
                    .await
            }
            None => {
                self.eth_client
                    .request("eth_estimateUserOperationGas", (&ctx.op, ctx.entry_point))
                    .await
            }
        }
        .map_err(|err| MiddlewareError::Provider { inner: err.to_string() })?;

        ctx.op.pre_verification_gas = est.pre_verification_gas;
        ctx.op.verification_gas_limit =
            est.verification_gas_limit.or(est.verification_gas).ok_or_else(|| {
                MiddlewareError::Response {
                    inner: "estimate response carries no verification gas limit".into(),
                }
            })?;
        ctx.op.call_gas_limit = est.call_gas_limit;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::providers::{JsonRpcError, MockProvider, MockResponse};
    use serde_json::json;
    use userop_primitives::UserOperation;

    fn estimator() -> (GasLimitEstimator<MockProvider>, MockProvider) {
        let (provider, mock) = Provider::mocked();
        (GasLimitEstimator::new(Arc::new(provider)), mock)
    }

    fn context() -> UserOperationContext {
        UserOperationContext::new(
            UserOperation::default(),
            "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789".parse().unwrap(),
            80_001,
        )
    }

    #[tokio::test]
    async fn writes_estimates_into_the_operation() {
        let (estimator, mock) = estimator();
        let mut ctx = context();

        mock.push(json!({
            "preVerificationGas": "0xafc8",
            "verificationGasLimit": "0x184e6",
            "callGasLimit": "0x814c",
        }))
        .unwrap();

        estimator.handle(&mut ctx).await.unwrap();
        assert_eq!(ctx.op.pre_verification_gas, 45_000.into());
        assert_eq!(ctx.op.verification_gas_limit, 99_558.into());
        assert_eq!(ctx.op.call_gas_limit, 33_100.into());
    }

    #[tokio::test]
    async fn accepts_legacy_verification_gas_name() {
        let (estimator, mock) = estimator();
        let mut ctx = context();

        mock.push(json!({
            "preVerificationGas": "0x5208",
            "verificationGas": "0x11170",
            "callGasLimit": "0x88b8",
        }))
        .unwrap();

        estimator.handle(&mut ctx).await.unwrap();
        assert_eq!(ctx.op.verification_gas_limit, 70_000.into());
    }

    #[tokio::test]
    async fn rejects_responses_without_verification_gas() {
        let (estimator, mock) = estimator();
        let mut ctx = context();

        mock.push(json!({
            "preVerificationGas": "0x5208",
            "callGasLimit": "0x88b8",
        }))
        .unwrap();

        let res = estimator.handle(&mut ctx).await;
        assert!(matches!(res, Err(MiddlewareError::Response { .. })));
    }

    #[tokio::test]
    async fn surfaces_bundler_rejections() {
        let (estimator, mock) = estimator();
        let mut ctx = context();

        mock.push_response(MockResponse::Error(JsonRpcError {
            code: -32500,
            message: "AA21 didn't pay prefund".into(),
            data: None,
        }));

        let res = estimator.handle(&mut ctx).await;
        match res {
            Err(MiddlewareError::Provider { inner }) => {
                assert!(inner.contains("AA21"))
            }
            _ => panic!("expected provider error"),
        }
    }
}
