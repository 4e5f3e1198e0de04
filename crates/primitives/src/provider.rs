//! JSON-RPC transport helpers

use crate::constants::BUNDLER_METHODS;
use async_trait::async_trait;
use ethers::providers::{Http, HttpClientError, JsonRpcClient, Provider};
use serde::{de::DeserializeOwned, Serialize};
use std::{fmt::Debug, str::FromStr};

/// JSON-RPC transport that routes ERC-4337 methods to a dedicated bundler endpoint and
/// everything else to a regular execution node
///
/// Without a bundler endpoint every method goes to the node, which covers setups where the
/// node itself answers the ERC-4337 namespace.
#[derive(Clone, Debug)]
pub struct BundlerRpc {
    node: Http,
    bundler: Option<Http>,
}

impl BundlerRpc {
    /// Creates a routing transport from a node URL and an optional bundler URL
    pub fn new(node_url: &str, bundler_url: Option<&str>) -> eyre::Result<Self> {
        Ok(Self {
            node: Http::from_str(node_url)?,
            bundler: bundler_url.map(Http::from_str).transpose()?,
        })
    }

    fn is_bundler_method(method: &str) -> bool {
        BUNDLER_METHODS.contains(&method)
    }
}

#[async_trait]
impl JsonRpcClient for BundlerRpc {
    type Error = HttpClientError;

    async fn request<T, R>(&self, method: &str, params: T) -> Result<R, Self::Error>
    where
        T: Debug + Serialize + Send + Sync,
        R: DeserializeOwned + Send,
    {
        match &self.bundler {
            Some(bundler) if Self::is_bundler_method(method) => {
                bundler.request(method, params).await
            }
            _ => self.node.request(method, params).await,
        }
    }
}

/// Creates an ethers provider over the node/bundler routing transport
pub fn create_bundler_provider(
    node_url: &str,
    bundler_url: Option<&str>,
) -> eyre::Result<Provider<BundlerRpc>> {
    Ok(Provider::new(BundlerRpc::new(node_url, bundler_url)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundler_method_routing_table() {
        for method in [
            "eth_sendUserOperation",
            "eth_estimateUserOperationGas",
            "eth_getUserOperationByHash",
            "eth_getUserOperationReceipt",
            "eth_supportedEntryPoints",
        ] {
            assert!(BundlerRpc::is_bundler_method(method));
        }
        for method in ["eth_chainId", "eth_call", "eth_getLogs", "pm_sponsorUserOperation"] {
            assert!(!BundlerRpc::is_bundler_method(method));
        }
    }

    #[test]
    fn rejects_invalid_urls() {
        assert!(BundlerRpc::new("not a url", None).is_err());
        assert!(BundlerRpc::new("http://127.0.0.1:8545", Some("::")).is_err());
        assert!(BundlerRpc::new("http://127.0.0.1:8545", Some("http://127.0.0.1:4337")).is_ok());
    }
}
