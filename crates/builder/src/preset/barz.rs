use super::{dummy_signature, PresetOptions};
use crate::{
    builder::UserOperationBuilder,
    error::PresetError,
    middleware::{AccountResolver, GasLimitEstimator, GasPriceEstimator, HashSigner},
};
use ethers::{
    abi::{self, AbiEncode, Token},
    providers::{JsonRpcClient, Provider},
    types::{Address, Bytes},
};
use std::sync::Arc;
use userop_contracts::{gen::barz_factory, EntryPoint};
use userop_primitives::{
    constants, create_bundler_provider, FieldError, IntoAddress, IntoBytes, IntoUint,
    UserOperationPartial, UserOperationSigner,
};

/// Builder preset for Trust Wallet's Barz, a diamond account whose signature scheme is picked
/// by its verification facet
///
/// The default facet verifies secp256r1 WebAuthn assertions, so the preset pairs naturally
/// with [Secp256r1Signer](userop_primitives::Secp256r1Signer). Any other facet works as long
/// as the signer's identity bytes are what the facet expects as owner.
pub struct Barz {
    builder: UserOperationBuilder,
    sender: Address,
}

impl Barz {
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
            None => constants::barz::FACTORY.parse().expect("factory address valid"),
        };
        let verification_facet: Address = match opts.verification_facet {
            Some(address) => address,
            None => constants::barz::SECP256R1_VERIFICATION_FACET
                .parse()
                .expect("verification facet address valid"),
        };

        let owner = signer.public_identity().await?;
        let call = barz_factory::CreateAccountCall {
            verification_facet,
            owner,
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

    /// Sets the call data to a single call through the account
    ///
    /// Barz dispatches on plain ABI tuples, so the call data carries no function selector.
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
        let call_data = abi::encode(&[
            Token::Address(to.into_address()?),
            Token::Uint(value.into_uint()?),
            Token::Bytes(data.into_bytes()?.to_vec()),
        ]);
        self.builder.set_call_data(call_data)
    }

    /// Sets the call data to a batch of calls, value per target included
    pub fn execute_batch<A, V, B>(
        &mut self,
        to: Vec<A>,
        value: Vec<V>,
        data: Vec<B>,
    ) -> Result<&mut UserOperationBuilder, FieldError>
    where
        A: IntoAddress,
        V: IntoUint,
        B: IntoBytes,
    {
        let to =
            to.into_iter().map(IntoAddress::into_address).collect::<Result<Vec<_>, _>>()?;
        let value =
            value.into_iter().map(IntoUint::into_uint).collect::<Result<Vec<_>, _>>()?;
        let data =
            data.into_iter().map(IntoBytes::into_bytes).collect::<Result<Vec<_>, _>>()?;

        let call_data = abi::encode(&[
            Token::Array(to.into_iter().map(Token::Address).collect()),
            Token::Array(value.into_iter().map(Token::Uint).collect()),
            Token::Array(data.into_iter().map(|bytes| Token::Bytes(bytes.to_vec())).collect()),
        ]);
        self.builder.set_call_data(call_data)
    }
}
