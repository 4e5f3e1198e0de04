use crate::builder::UserOperationBuilder;
use ethers::{
    providers::{JsonRpcClient, Middleware, Provider},
    types::{spoof, Address, H256, U64},
};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tracing::info;
use userop_contracts::{EntryPoint, UserOperationEventFilter};
use userop_primitives::{
    create_bundler_provider, BundlerRpc, UserOperation, UserOperationByHash, UserOperationHash,
    UserOperationReceipt,
};

/// How long [PendingUserOperation::wait] keeps polling for the inclusion event
const WAIT_TIMEOUT: Duration = Duration::from_secs(30);
const WAIT_INTERVAL: Duration = Duration::from_secs(5);
/// How far behind the tip the event scan starts
const WAIT_BLOCK_RANGE: u64 = 100;

/// Options for a single [send](Client::send_user_operation)
#[derive(Default)]
pub struct SendOptions {
    /// Build and hash the operation without submitting it
    pub dry_run: bool,
    /// Account state to assume during gas estimation
    pub state_overrides: Option<spoof::State>,
    /// Called with the finished operation right before submission
    pub on_build: Option<Box<dyn Fn(&UserOperation) + Send + Sync>>,
}

/// Sends built user operations to an ERC-4337 bundler and tracks their inclusion
pub struct Client<C: JsonRpcClient + 'static = BundlerRpc> {
    eth_client: Arc<Provider<C>>,
    entry_point: EntryPoint<Provider<C>>,
    chain_id: u64,
}

impl Client<BundlerRpc> {
    /// Connects to the node (and the bundler, when its URL differs) and binds the client to
    /// the chain it reports
    pub async fn new(
        node_url: &str,
        bundler_url: Option<&str>,
        entry_point: Address,
    ) -> eyre::Result<Self> {
        let eth_client = Arc::new(create_bundler_provider(node_url, bundler_url)?);
        Self::with_provider(eth_client, entry_point).await
    }
}

impl<C: JsonRpcClient + 'static> Client<C> {
    /// Binds the client to an already connected provider
    pub async fn with_provider(
        eth_client: Arc<Provider<C>>,
        entry_point: Address,
    ) -> eyre::Result<Self> {
        let chain_id = eth_client.get_chainid().await?.as_u64();
        Ok(Self {
            entry_point: EntryPoint::new(eth_client.clone(), entry_point),
            eth_client,
            chain_id,
        })
    }

    pub fn entry_point(&self) -> Address {
        self.entry_point.address()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Runs the builder's pipeline against this client's entry point and chain
    pub async fn build_user_operation(
        &self,
        builder: &mut UserOperationBuilder,
        state_overrides: Option<spoof::State>,
    ) -> eyre::Result<UserOperation> {
        Ok(builder.build_op(&self.entry_point.address(), self.chain_id, state_overrides).await?)
    }

    /// Builds the operation and submits it to the bundler
    ///
    /// On a dry run the operation is built and hashed but never leaves the process.
    pub async fn send_user_operation(
        &self,
        builder: &mut UserOperationBuilder,
        opts: SendOptions,
    ) -> eyre::Result<PendingUserOperation<C>> {
        let op = builder
            .build_op(&self.entry_point.address(), self.chain_id, opts.state_overrides)
            .await?;
        if let Some(on_build) = &opts.on_build {
            on_build(&op);
        }

        let hash = if opts.dry_run {
            let hash = op.hash(&self.entry_point.address(), self.chain_id);
            info!("Built user operation {:?}, dry run only", hash.0);
            hash
        } else {
            let hash: UserOperationHash = self
                .eth_client
                .request("eth_sendUserOperation", (op.clone(), self.entry_point.address()))
                .await?;
            info!("User operation {:?} sent to the bundler", hash.0);
            hash
        };

        Ok(PendingUserOperation {
            hash,
            op,
            entry_point: self.entry_point.clone(),
            dry_run: opts.dry_run,
        })
    }

    /// Fetches the receipt of an included user operation from the bundler
    pub async fn get_user_operation_receipt(
        &self,
        hash: &UserOperationHash,
    ) -> eyre::Result<Option<UserOperationReceipt>> {
        Ok(self.eth_client.request("eth_getUserOperationReceipt", (hash,)).await?)
    }

    /// Looks up a user operation and its inclusion context by hash
    pub async fn get_user_operation_by_hash(
        &self,
        hash: &UserOperationHash,
    ) -> eyre::Result<Option<UserOperationByHash>> {
        Ok(self.eth_client.request("eth_getUserOperationByHash", (hash,)).await?)
    }

    /// Entry point deployments the connected bundler serves
    pub async fn supported_entry_points(&self) -> eyre::Result<Vec<Address>> {
        Ok(self.eth_client.request("eth_supportedEntryPoints", ()).await?)
    }
}

/// A user operation accepted by the bundler, waiting for inclusion
pub struct PendingUserOperation<C: JsonRpcClient + 'static> {
    /// Hash under which the bundler tracks the operation
    pub hash: UserOperationHash,
    /// The operation exactly as it was submitted
    pub op: UserOperation,
    entry_point: EntryPoint<Provider<C>>,
    dry_run: bool,
}

impl<C: JsonRpcClient + 'static> PendingUserOperation<C> {
    /// Polls the entry point for the `UserOperationEvent` of this operation
    ///
    /// Scans the last hundred blocks every five seconds for up to thirty. Resolves with
    /// `None` when the event has not landed in time, or right away on a dry run.
    pub async fn wait(&self) -> eyre::Result<Option<UserOperationEventFilter>> {
        if self.dry_run {
            return Ok(None);
        }

        let latest = self.entry_point.eth_client().get_block_number().await?;
        let from_block = latest.saturating_sub(U64::from(WAIT_BLOCK_RANGE));

        let deadline = Instant::now() + WAIT_TIMEOUT;
        loop {
            let events = self
                .entry_point
                .user_operation_event()
                .from_block(from_block)
                .topic1(H256::from(self.hash))
                .query()
                .await?;
            if let Some(event) = events.into_iter().next() {
                return Ok(Some(event));
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }
            tokio::time::sleep(WAIT_INTERVAL).await;
        }
    }
}
