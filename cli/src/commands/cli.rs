use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "locbridge", about = "Synchronize locale strings between the translation service and the local store")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Explicit config file; defaults to ~/.locbridge/config.toml then
    /// ./config.toml.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Override the translation service base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// One-shot bearer token; bypasses the persisted token file.
    #[arg(long, global = true)]
    pub token: Option<String>,
}

/// One case per operation; dispatch is an exhaustive match in `app`.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pull remote resources for every supported locale into the local store.
    Import,

    /// Push locally authored entries to the translation service.
    Export,

    /// Persist the service bearer token for later runs.
    SaveToken {
        /// Token value.
        token: String,
    },
}
