//! Command line configuration and process setup.
//!
//! Every global flag can also come from a `MARKETIO_*` environment variable;
//! a `.env` file in the working directory is loaded first.

use crate::domain::ports::{GeneratorBox, KeyValueStoreBox, Services};
use crate::domain::records::VehicleKind;
use crate::error::{MarketError, Result};
use crate::infrastructure::artifacts::{RandomArtifacts, SeededArtifacts};
use crate::infrastructure::in_memory::InMemoryStore;
use crate::infrastructure::mock::MockServices;
use crate::interfaces::http::client::remote_services;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(author, version, about = "Digital goods marketplace", long_about = None)]
pub struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "MARKETIO_DB_PATH", global = true)]
    pub db_path: Option<PathBuf>,

    /// Base URL of a running `marketio serve`. Mock services are used when absent.
    #[arg(long, env = "MARKETIO_REMOTE", global = true)]
    pub remote: Option<String>,

    /// Seed for reproducible tickets, codes and ids.
    #[arg(long, env = "MARKETIO_SEED", global = true)]
    pub seed: Option<u64>,

    #[arg(long, env = "MARKETIO_TIMEOUT_SECS", default_value_t = 15, global = true)]
    pub timeout_secs: u64,

    /// Artificial delay of every mock service call.
    #[arg(long, env = "MARKETIO_MOCK_LATENCY_MS", default_value_t = 0, global = true)]
    pub mock_latency_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the vertical services over HTTP.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, env = "MARKETIO_PORT", default_value_t = 3000)]
        port: u16,
    },
    /// Buy something from one vertical.
    Buy {
        #[command(subcommand)]
        purchase: BuyCommand,
    },
    /// Show the purchase history, newest first.
    History {
        /// Write CSV instead of a table.
        #[arg(long)]
        csv: bool,
    },
    Vehicles {
        #[command(subcommand)]
        action: VehicleCommand,
    },
    Cards {
        #[command(subcommand)]
        action: CardCommand,
    },
    /// Show the selected theme, or select one.
    Theme { id: Option<String> },
}

#[derive(Subcommand, Debug)]
pub enum BuyCommand {
    /// Mobile top-up.
    Topup {
        #[arg(long)]
        operator: String,
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        phone: String,
    },
    /// Retail gift card.
    Voucher {
        #[arg(long)]
        brand: String,
        #[arg(long)]
        amount: Decimal,
    },
    Gaming {
        #[arg(long)]
        platform: String,
        #[arg(long)]
        voucher: String,
    },
    /// Lottery ticket or paysafecard.
    Lottery {
        #[arg(long)]
        product: String,
        /// Comma separated pick; drawn at random when absent.
        #[arg(long, value_delimiter = ',')]
        numbers: Option<Vec<u8>>,
    },
    /// Street parking session.
    Parking(ParkingArgs),
    /// Highway vignette.
    Vignette(VignetteArgs),
}

#[derive(Args, Debug)]
pub struct ParkingArgs {
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub zone: String,
    #[arg(long)]
    pub plate: String,
    #[arg(long, default_value_t = 60)]
    pub minutes: u32,
}

#[derive(Args, Debug)]
pub struct VignetteArgs {
    #[arg(long)]
    pub country: String,
    /// Required only where the country sells more than one vehicle type.
    #[arg(long)]
    pub vehicle: Option<String>,
    #[arg(long)]
    pub duration: String,
    #[arg(long)]
    pub plate: String,
    /// First day of validity (YYYY-MM-DD); today when absent.
    #[arg(long)]
    pub start: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum VehicleCommand {
    List,
    Add {
        plate: String,
        #[arg(long)]
        nickname: Option<String>,
        #[arg(long, default_value = "car")]
        kind: VehicleKind,
    },
    Remove { id: Uuid },
}

#[derive(Subcommand, Debug)]
pub enum CardCommand {
    List,
    Add {
        store: String,
        number: String,
        #[arg(long, default_value = "#6B7280")]
        color: String,
    },
    Remove { id: String },
}

impl Cli {
    /// Parses the command line after loading `.env`, if present.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn generator(&self) -> GeneratorBox {
        match self.seed {
            Some(seed) => Arc::new(SeededArtifacts::new(seed)),
            None => Arc::new(RandomArtifacts),
        }
    }

    /// Remote services when `--remote` is set, mock services otherwise.
    pub fn services(&self, generator: GeneratorBox) -> Result<Services> {
        match &self.remote {
            Some(base_url) => remote_services(base_url, self.timeout())
                .map_err(|e| MarketError::NetworkError(e.to_string())),
            None => Ok(MockServices::new(
                generator,
                Duration::from_millis(self.mock_latency_ms),
            )
            .into()),
        }
    }

    pub fn store(&self) -> Result<KeyValueStoreBox> {
        open_store(self.db_path.as_ref())
    }
}

#[cfg(feature = "storage-rocksdb")]
fn open_store(db_path: Option<&PathBuf>) -> Result<KeyValueStoreBox> {
    use crate::infrastructure::rocksdb::RocksDbStore;

    match db_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Opening RocksDB store");
            Ok(Arc::new(RocksDbStore::open(path)?))
        }
        None => Ok(Arc::new(InMemoryStore::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_store(db_path: Option<&PathBuf>) -> Result<KeyValueStoreBox> {
    if db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
        );
    }
    Ok(Arc::new(InMemoryStore::new()))
}

/// Installs the stderr subscriber. `RUST_LOG` overrides `default_level`.
pub fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
