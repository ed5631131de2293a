//! gridpaneld: the GridPanel daemon.
//!
//! # Usage
//!
//! ```text
//! gridpaneld serve --config /etc/gridpanel/gridpanel.toml --port 8080
//! gridpaneld import --file snapshot.json --data-dir /var/lib/gridpanel
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use gridpanel_state::StateStore;
use tracing::info;

use gridpaneld::config::PanelConfig;
use gridpaneld::{build_router, import_snapshot, telemetry};

#[derive(Parser)]
#[command(name = "gridpaneld", about = "GridPanel daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the admin pages.
    Serve {
        /// Path to gridpanel.toml.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides the config file).
        #[arg(long)]
        port: Option<u16>,

        /// Data directory for persistent state (overrides the config file).
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Load a JSON snapshot into the state store.
    Import {
        /// Snapshot file to import.
        #[arg(long)]
        file: PathBuf,

        /// Path to gridpanel.toml.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Data directory for persistent state (overrides the config file).
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            port,
            data_dir,
        } => {
            let config = PanelConfig::load(config.as_deref())?.with_overrides(port, data_dir);
            telemetry::init_tracing(&config.log)?;
            run_serve(config).await
        }
        Command::Import {
            file,
            config,
            data_dir,
        } => {
            let config = PanelConfig::load(config.as_deref())?.with_overrides(None, data_dir);
            telemetry::init_tracing(&config.log)?;
            run_import(&config, &file)
        }
    }
}

fn open_store(config: &PanelConfig) -> anyhow::Result<StateStore> {
    std::fs::create_dir_all(&config.storage.data_dir)?;
    let db_path = config.db_path();
    let store = StateStore::open(&db_path)?;
    info!(path = ?db_path, "state store opened");
    Ok(store)
}

async fn run_serve(config: PanelConfig) -> anyhow::Result<()> {
    info!("GridPanel daemon starting");

    let store = open_store(&config)?;
    let router = build_router(store);
    let addr = config.listen_addr();

    info!(%addr, "admin server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
            info!("shutdown signal received");
        })
        .await?;

    info!("GridPanel daemon stopped");
    Ok(())
}

fn run_import(config: &PanelConfig, file: &Path) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let records = import_snapshot(&store, file)?;
    info!(records, "import complete");
    Ok(())
}
