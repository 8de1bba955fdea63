use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use carioca_cli::config::{CariocaConfig, StoreBackend};
use carioca_cli::logging::init_logging;
use carioca_cli::run_session;
use carioca_cli::session::{Session, SessionPolicy};
use carioca_core::{AppInfo, PlayStore};
use carioca_store::{JsonlStore, MemoryStore};

/// Build a Carioca hand card by card and check it for three runs.
#[derive(Debug, Parser)]
#[command(
    name = "carioca",
    author,
    version,
    about = "Carioca hand builder: find three runs and record the hand"
)]
struct Cli {
    /// Path to a YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the storage backend.
    #[arg(long, value_enum)]
    store: Option<StoreBackend>,

    /// Override the directory the jsonl backend writes to.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Override the collection recorded hands are appended to.
    #[arg(long, value_name = "NAME")]
    collection: Option<String>,

    /// Keep the hand after it has been recorded.
    #[arg(long)]
    keep_hand: bool,

    /// Override the tracing level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => CariocaConfig::from_path(path)?,
        None => CariocaConfig::default(),
    };

    if let Some(store) = cli.store {
        config.store.backend = store;
    }

    if let Some(data_dir) = cli.data_dir {
        config.store.data_dir = data_dir;
    }

    if let Some(collection) = cli.collection {
        config.store.collection = collection;
    }

    if cli.keep_hand {
        config.session.clear_on_valid = false;
    }

    if let Some(level) = cli.log_level {
        config.logging.tracing_level = level;
    }

    config.validate()?;

    let _logging_guard = init_logging(&config.logging)?;
    info!(
        version = AppInfo::version(),
        backend = ?config.store.backend,
        collection = %config.store.collection,
        "starting session"
    );

    let store: Arc<dyn PlayStore> = match config.store.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Jsonl => Arc::new(JsonlStore::new(config.store.data_dir.clone())),
    };
    let policy = SessionPolicy::from(config.session.clone());
    let mut session = Session::new(store, config.store.collection.clone(), policy);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout().lock();
    run_session(&mut session, stdin, &mut stdout).await
}
