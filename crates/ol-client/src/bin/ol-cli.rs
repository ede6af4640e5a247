//! # ol-cli
//!
//! Command-line access to an OpenLedger/BitShares node.
//!
//! ```text
//! ol-cli --url wss://node.example/ws chain-id
//! ol-cli balances 1.2.974337 1.3.0
//! OL_WIF=5K... ol-cli transfer --from 1.2.974337 --to 1.2.22805 --amount 100000
//! ol-cli encode-money "1.5 BTS"
//! ```
//!
//! Logging is controlled by `RUST_LOG` (default `info`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ol_client::encoding::Encoder;
use ol_client::types::{AssetAmount, ObjectId};
use ol_client::{Client, ClientConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding the signing key.
const WIF_ENV: &str = "OL_WIF";

#[derive(Debug, Parser)]
#[command(name = "ol-cli", version, about = "OpenLedger/BitShares node client")]
struct Cli {
    /// TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Node URL, overriding the configuration
    #[arg(long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the chain id
    ChainId,
    /// Print account balances
    Balances {
        /// Account id, e.g. 1.2.974337
        account: ObjectId,
        /// Restrict to these assets (default: all)
        assets: Vec<ObjectId>,
    },
    /// Transfer funds; the key is read from OL_WIF
    Transfer {
        #[arg(long)]
        from: ObjectId,
        #[arg(long)]
        to: ObjectId,
        /// Amount in the asset's smallest unit
        #[arg(long)]
        amount: u64,
        #[arg(long, default_value = "1.3.0")]
        asset: ObjectId,
        #[arg(long, default_value = "1.3.0")]
        fee_asset: ObjectId,
    },
    /// Print the 16-byte encoding of a money literal such as "1.5 BTS"
    EncodeMoney { literal: String },
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ClientConfig::default(),
    };
    if let Some(url) = &cli.url {
        config.node.url = url.clone();
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if let Command::EncodeMoney { literal } = &cli.command {
        let mut encoder = Encoder::with_money_format(Arc::new(config.money_format()));
        encoder.encode_money(literal)?;
        println!("{}", hex::encode(encoder.as_bytes()));
        return Ok(());
    }

    let client = Client::connect(&config)
        .await
        .with_context(|| format!("connecting to {}", config.node.url))?;

    let result = run(&client, cli.command).await;
    client.close().await?;
    result
}

async fn run(client: &Client, command: Command) -> Result<()> {
    match command {
        Command::ChainId => println!("{}", client.chain_id()),
        Command::Balances { account, assets } => {
            let balances = client
                .database()
                .get_account_balances(account, &assets)
                .await?;
            for balance in balances {
                println!("{} {}", balance.amount, balance.asset_id);
            }
        }
        Command::Transfer {
            from,
            to,
            amount,
            asset,
            fee_asset,
        } => {
            let wif = std::env::var(WIF_ENV).with_context(|| format!("{WIF_ENV} is not set"))?;
            client
                .transfer(
                    &wif,
                    from,
                    to,
                    AssetAmount::new(amount, asset),
                    AssetAmount::new(0, fee_asset),
                )
                .await?;
            info!(from = %from, to = %to, amount = amount, "Transfer broadcast");
        }
        Command::EncodeMoney { .. } => {}
    }
    Ok(())
}
