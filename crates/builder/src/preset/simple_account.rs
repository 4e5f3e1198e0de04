use super::{dummy_signature, PresetOptions};
use crate::{
    builder::UserOperationBuilder,
    error::PresetError,
    middleware::{AccountResolver, GasLimitEstimator, GasPriceEstimator, HashSigner},
};
use ethers::{
    abi::AbiEncode,
    providers::{JsonRpcClient, Provider},
    types::{Address, Bytes},
};
use std::sync::Arc;
use userop_contracts::{
    gen::{simple_account, simple_account_factory},
    EntryPoint,
};
use userop_primitives::{
    constants, create_bundler_provider, FieldError, IntoAddress, IntoBytes, IntoUint,
    UserOperationPartial, UserOperationSigner,
};

/// Builder preset for eth-infinitism's `SimpleAccount`, owned by a single ECDSA key
pub struct SimpleAccount {
    builder: UserOperationBuilder,
    sender: Address,
}

impl SimpleAccount {
    /// Connects to the node (and the bundler, when its URL differs) and prepares the preset
    pub async fn new(
        signer: Arc<dyn UserOperationSigner>,
        node_url: &str,
        bundler_url: Option<&str>,
        opts: PresetOptions,
    ) -> Result<Self, PresetError> {
        let eth_client = create_bundler_provider(node_url, bundler_url)
            .map_err(|err| PresetError::Provider { inner: err.to_string() })?;
        Self::with_provider(Arc::new(eth_client), signer, opts).await
    }

    /// Prepares the preset over an already connected provider
    pub async fn with_provider<C: JsonRpcClient + 'static>(
        eth_client: Arc<Provider<C>>,
        signer: Arc<dyn UserOperationSigner>,
        opts: PresetOptions,
    ) -> Result<Self, PresetError> {
        let entry_point_address: Address = match opts.entry_point {
            Some(address) => address,
            None => constants::entry_point::ADDRESS.parse().expect("entry point address valid"),
        };
        let factory: Address = match opts.factory {
            Some(address) => address,
            None => constants::simple_account::FACTORY.parse().expect("factory address valid"),
        };

        let owner = signer.public_identity().await?;
        if owner.len() != 20 {
            return Err(PresetError::Identity {
                inner: format!(
                    "simple account owner must be a 20 byte address, got {} bytes",
                    owner.len()
                ),
            });
        }
        let call = simple_account_factory::CreateAccountCall {
            owner: Address::from_slice(&owner),
            salt: opts.salt.unwrap_or_default(),
        };
        let mut init_code = factory.as_bytes().to_vec();
        init_code.extend(call.encode());
        let init_code = Bytes::from(init_code);

        let entry_point = EntryPoint::new(eth_client.clone(), entry_point_address);
        let sender = entry_point.get_sender_address(init_code.clone()).await?.sender;

        let mut builder = UserOperationBuilder::new();
        builder.use_defaults(UserOperationPartial {
            sender: Some(sender),
            signature: Some(dummy_signature(&signer).await?),
            ..Default::default()
        });
        builder
            .use_middleware(Arc::new(AccountResolver::new(
                entry_point,
                init_code,
                opts.nonce_key.unwrap_or_default(),
            )))
            .use_middleware(Arc::new(GasPriceEstimator::new(eth_client.clone())));
        match opts.paymaster {
            Some(paymaster) => builder.use_middleware(paymaster),
            None => builder.use_middleware(Arc::new(GasLimitEstimator::new(eth_client))),
        };
        builder.use_middleware(Arc::new(HashSigner::new(signer)));

        Ok(Self { builder, sender })
    }

    /// Counterfactual (or deployed) address of the account
    pub fn sender(&self) -> Address {
        self.sender
    }

    pub fn builder(&self) -> &UserOperationBuilder {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut UserOperationBuilder {
        &mut self.builder
    }

    /// Sets the call data to a single `execute` call on the account
    pub fn execute<A, V, B>(
        &mut self,
        to: A,
        value: V,
        data: B,
    ) -> Result<&mut UserOperationBuilder, FieldError>
    where
        A: IntoAddress,
        V: IntoUint,
        B: IntoBytes,
    {
        let call = simple_account::ExecuteCall {
            dest: to.into_address()?,
            value: value.into_uint()?,
            func: data.into_bytes()?,
        };
        self.builder.set_call_data(call.encode())
    }

    /// Sets the call data to an `executeBatch` call over several targets
    pub fn execute_batch<A, B>(
        &mut self,
        to: Vec<A>,
        data: Vec<B>,
    ) -> Result<&mut UserOperationBuilder, FieldError>
    where
        A: IntoAddress,
        B: IntoBytes,
    {
        let call = simple_account::ExecuteBatchCall {
            dest: to.into_iter().map(IntoAddress::into_address).collect::<Result<_, _>>()?,
            func: data.into_iter().map(IntoBytes::into_bytes).collect::<Result<_, _>>()?,
        };
        self.builder.set_call_data(call.encode())
    }
}
