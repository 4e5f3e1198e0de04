use super::UserOperationMiddleware;
use crate::{context::UserOperationContext, error::MiddlewareError};
use async_trait::async_trait;
use ethers::{
    providers::{JsonRpcClient, Middleware, Provider, ProviderError},
    types::{BlockNumber, U256},
};
use std::sync::Arc;
use tracing::warn;

/// Fills in the EIP-1559 fee fields from the chain's current conditions
///
/// The priority fee is the node's suggestion plus a 13% buffer, the max fee reserves twice
/// the latest base fee on top of it. Chains without a base fee and nodes without
/// `eth_maxPriorityFeePerGas` fall back to the legacy gas price for both fields.
#[derive(Clone)]
pub struct GasPriceEstimator<C: JsonRpcClient> {
    eth_client: Arc<Provider<C>>,
}

impl<C: JsonRpcClient + 'static> GasPriceEstimator<C> {
    pub fn new(eth_client: Arc<Provider<C>>) -> Self {
        Self { eth_client }
    }

    async fn eip1559_fees(&self) -> Result<(U256, U256), ProviderError> {
        let (tip, block) = tokio::try_join!(
            self.eth_client.request::<_, U256>("eth_maxPriorityFeePerGas", ()),
            self.eth_client.get_block(BlockNumber::Latest),
        )?;

        let buffer = tip / 100 * 13;
        let max_priority_fee_per_gas = tip + buffer;
        let max_fee_per_gas = match block.and_then(|b| b.base_fee_per_gas) {
            Some(base_fee) => base_fee * 2 + max_priority_fee_per_gas,
            None => max_priority_fee_per_gas,
        };

        Ok((max_fee_per_gas, max_priority_fee_per_gas))
    }
}

#[async_trait]
impl<C: JsonRpcClient + 'static> UserOperationMiddleware for GasPriceEstimator<C> {
    async fn handle(&self, ctx: &mut UserOperationContext) -> Result<(), MiddlewareError> {
        let eip1559_err = match self.eip1559_fees().await {
            Ok((max_fee_per_gas, max_priority_fee_per_gas)) => {
                ctx.op.max_fee_per_gas = max_fee_per_gas;
                ctx.op.max_priority_fee_per_gas = max_priority_fee_per_gas;
                return Ok(());
            }
            Err(err) => err,
        };

        match self.eth_client.get_gas_price().await {
            Ok(gas_price) => {
                warn!("EIP-1559 fees unavailable ({eip1559_err:?}), using legacy gas price");
                ctx.op.max_fee_per_gas = gas_price;
                ctx.op.max_priority_fee_per_gas = gas_price;
                Ok(())
            }
            Err(legacy_err) => Err(MiddlewareError::GasPrice {
                eip1559: eip1559_err.to_string(),
                legacy: legacy_err.to_string(),
            }),
        }
    }
}
