//! Command-line interface for the todos server.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::http::{self, AppState};
use crate::seed;
use crate::store::Store;

/// todos - per-user task-list REST API
#[derive(Parser, Debug)]
#[command(name = "todos")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a config file (defaults to ./todos.toml when present)
    #[arg(long, global = true, env = "TODOS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Data directory holding the document files
    #[arg(long, global = true, env = "TODOS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Bind address, e.g. 127.0.0.1:8080
        #[arg(long, env = "TODOS_BIND")]
        bind: Option<String>,
    },

    /// Reset the data directory to the demo dataset
    Seed,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(data_dir) = self.data_dir {
            config.data_dir = data_dir;
        }

        match self.command {
            Commands::Serve { bind } => {
                if let Some(bind) = bind {
                    config.bind = bind;
                }
                let store = Store::open(&config.data_dir)?;
                let state = AppState {
                    store: Arc::new(store),
                    policy: config.policy,
                };
                http::serve(&config.bind, state).await
            }
            Commands::Seed => {
                let store = Store::open(&config.data_dir)?;
                seed::run(&store)?;
                store.close()?;
                Ok(())
            }
        }
    }
}
