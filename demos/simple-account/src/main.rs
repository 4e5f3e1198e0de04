//! Sends 0.01 ether from a counterfactual simple account, deploying it on first use.
//!
//! Expects `NODE_URL`, `SEED_PHRASE` and `RECIPIENT` in the environment; set `BUNDLER_URL`
//! when the bundler listens somewhere other than the node, and `DRY_RUN=1` to build and sign
//! without submitting.

use ethers::{types::Address, utils::parse_ether};
use std::{env, sync::Arc};
use tracing_subscriber::EnvFilter;
use userop_builder::{Client, PresetOptions, SendOptions, SimpleAccount};
use userop_primitives::{constants, UserOperationSigner, WalletSigner};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let node_url = env::var("NODE_URL")?;
    let bundler_url = env::var("BUNDLER_URL").ok();
    let seed_phrase = env::var("SEED_PHRASE")?;
    let recipient: Address = env::var("RECIPIENT")?.parse()?;
    let dry_run = env::var("DRY_RUN").is_ok();

    let signer: Arc<dyn UserOperationSigner> = Arc::new(WalletSigner::from_phrase(&seed_phrase)?);
    let mut account =
        SimpleAccount::new(signer, &node_url, bundler_url.as_deref(), PresetOptions::default())
            .await?;
    println!("Smart account address: {:?}", account.sender());

    let entry_point: Address = constants::entry_point::ADDRESS.parse()?;
    let client = Client::new(&node_url, bundler_url.as_deref(), entry_point).await?;

    account.execute(recipient, parse_ether("0.01")?, "0x")?;
    let opts = SendOptions {
        dry_run,
        on_build: Some(Box::new(|op| println!("Signed user operation: {op:?}"))),
        ..Default::default()
    };
    let pending = client.send_user_operation(account.builder_mut(), opts).await?;
    println!("User operation hash: {:?}", pending.hash.0);

    match pending.wait().await? {
        Some(event) => println!(
            "Included in a bundle: success={}, actual gas cost={}",
            event.success, event.actual_gas_cost
        ),
        None => println!("No inclusion event yet, track the hash with the bundler"),
    }

    Ok(())
}
