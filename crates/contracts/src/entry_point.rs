pub use super::{
    error::EntryPointError,
    gen::{EntryPointAPI, EntryPointAPIEvents, UserOperationEventFilter},
};
use super::gen::entry_point_api::{EntryPointAPIErrors, SenderAddressResult};
use crate::error::decode_revert_error;
use ethers::{
    prelude::{ContractError, Event},
    providers::Middleware,
    types::{Address, Bytes, U256},
};
use std::sync::Arc;

/// Thin wrapper around the entry point smart contract
pub struct EntryPoint<M: Middleware + 'static> {
    eth_client: Arc<M>,
    address: Address,
    entry_point_api: EntryPointAPI<M>,
}

// a derived Clone would demand `M: Clone`; the fields only need their `Arc`s cloned
impl<M: Middleware + 'static> Clone for EntryPoint<M> {
    fn clone(&self) -> Self {
        Self {
            eth_client: self.eth_client.clone(),
            address: self.address,
            entry_point_api: self.entry_point_api.clone(),
        }
    }
}

impl<M: Middleware + 'static> EntryPoint<M> {
    pub fn new(eth_client: Arc<M>, address: Address) -> Self {
        let entry_point_api = EntryPointAPI::new(address, eth_client.clone());
        Self { eth_client, address, entry_point_api }
    }

    pub fn entry_point_api(&self) -> &EntryPointAPI<M> {
        &self.entry_point_api
    }

    pub fn events(&self) -> Event<Arc<M>, M, EntryPointAPIEvents> {
        self.entry_point_api.events()
    }

    /// Event stream for `UserOperationEvent`, the inclusion marker of a user operation
    pub fn user_operation_event(&self) -> Event<Arc<M>, M, UserOperationEventFilter> {
        self.entry_point_api.user_operation_event_filter()
    }

    pub fn eth_client(&self) -> Arc<M> {
        self.eth_client.clone()
    }

    pub fn address(&self) -> Address {
        self.address
    }

    fn deserialize_error_msg(
        err: ContractError<M>,
    ) -> Result<EntryPointAPIErrors, EntryPointError> {
        match err {
            ContractError::DecodingError(e) => {
                Err(EntryPointError::Decode { inner: e.to_string() })
            }
            ContractError::AbiError(e) => Err(EntryPointError::ABI { inner: e.to_string() }),
            ContractError::MiddlewareError { e } => EntryPointError::from_middleware_error::<M>(e),
            ContractError::ProviderError { e } => EntryPointError::from_provider_error(&e),
            ContractError::Revert(data) => decode_revert_error(data),
            _ => Err(EntryPointError::Other { inner: err.to_string() }),
        }
    }

    /// Gets the next valid nonce of the sender from the entry point nonce manager
    pub async fn get_nonce(&self, address: &Address, key: U256) -> Result<U256, EntryPointError> {
        let res = self.entry_point_api.get_nonce(*address, key).call().await;

        match res {
            Ok(nonce) => Ok(nonce),
            Err(err) => Err(EntryPointError::Other { inner: format!("get nonce error: {err:?}") }),
        }
    }

    /// Computes the counterfactual sender address for the given init code
    ///
    /// The entry point answers by reverting with `SenderAddressResult`, so a successful call
    /// is an error here.
    pub async fn get_sender_address(
        &self,
        init_code: Bytes,
    ) -> Result<SenderAddressResult, EntryPointError> {
        let res = self.entry_point_api.get_sender_address(init_code).call().await;

        match res {
            Ok(_) => Err(EntryPointError::NoRevert { function: "get_sender_address".into() }),
            Err(e) => Self::deserialize_error_msg(e).and_then(|op| match op {
                EntryPointAPIErrors::SenderAddressResult(res) => Ok(res),
                EntryPointAPIErrors::FailedOp(err) => Err(EntryPointError::FailedOp(err)),
                EntryPointAPIErrors::RevertString(reason) => {
                    Err(EntryPointError::ExecutionReverted(reason))
                }
                _ => Err(EntryPointError::Other {
                    inner: format!("get sender address error: {op:?}"),
                }),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::{
        abi::AbiEncode,
        providers::{JsonRpcError, MockProvider, MockResponse, Provider},
    };
    use serde_json::json;

    fn mocked_entry_point() -> (EntryPoint<Provider<MockProvider>>, MockProvider) {
        let (provider, mock) = Provider::mocked();
        let ep = EntryPoint::new(
            Arc::new(provider),
            "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789".parse().unwrap(),
        );
        (ep, mock)
    }

    #[tokio::test]
    async fn get_sender_address_decodes_revert() {
        let (ep, mock) = mocked_entry_point();
        let sender: Address = "0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse().unwrap();
        let revert = Bytes::from(SenderAddressResult { sender }.encode());
        mock.push_response(MockResponse::Error(JsonRpcError {
            code: 3,
            message: "execution reverted".into(),
            data: Some(json!(format!("{revert}"))),
        }));

        let res = ep
            .get_sender_address("0x9406cc6185a346906296840746125a0e44976454".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(res.sender, sender);
    }

    #[tokio::test]
    async fn get_sender_address_without_revert_is_an_error() {
        let (ep, mock) = mocked_entry_point();
        mock.push::<Bytes, _>(Bytes::default()).unwrap();

        let res = ep.get_sender_address(Bytes::default()).await;
        assert!(matches!(res, Err(EntryPointError::NoRevert { .. })));
    }

    #[tokio::test]
    async fn get_sender_address_surfaces_failed_op() {
        let (ep, mock) = mocked_entry_point();
        let revert = Bytes::from(
            crate::gen::FailedOp { op_index: U256::zero(), reason: "AA13 initCode failed or OOG".into() }
                .encode(),
        );
        mock.push_response(MockResponse::Error(JsonRpcError {
            code: 3,
            message: "execution reverted".into(),
            data: Some(json!(format!("{revert}"))),
        }));

        let res = ep.get_sender_address(Bytes::default()).await;
        match res {
            Err(EntryPointError::FailedOp(f)) => {
                assert_eq!(f.reason, "AA13 initCode failed or OOG")
            }
            _ => panic!("expected FailedOp"),
        }
    }

    #[tokio::test]
    async fn get_nonce_decodes_value() {
        let (ep, mock) = mocked_entry_point();
        mock.push::<Bytes, _>(Bytes::from(U256::from(7).encode())).unwrap();

        let nonce = ep
            .get_nonce(&"0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse().unwrap(), U256::zero())
            .await
            .unwrap();
        assert_eq!(nonce, 7.into());
    }
}
