//! CLI assembly: wires the configured collaborators into the pipelines and
//! dispatches the parsed command.

use std::path::PathBuf;
use std::sync::Arc;

use locbridge_core::api as core_api;
use locbridge_core::api::{
    AppConfig, CredentialProvider, ExportPipeline, FileCredentialStore, HttpRemoteClient,
    ImportPipeline, KeyFilter, LocalStore, Notifier, RemoteClient, StaticCredentials,
    TranslationStore,
};

use crate::commands::cli::{Args, Commands};

/// User-visible messages on the terminal; diagnostics stay in tracing.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, is_error: bool) {
        if is_error {
            eprintln!("error: {message}");
        } else {
            println!("{message}");
        }
    }
}

pub async fn run_app(args: Args, mut cfg: AppConfig) -> anyhow::Result<()> {
    if let Some(url) = &args.base_url {
        cfg.remote.base_url = url.clone();
    }

    let command = args.command;
    let credentials: Arc<dyn CredentialProvider> = match &args.token {
        Some(token) => Arc::new(StaticCredentials::new(Some(token.clone()))),
        None => Arc::new(FileCredentialStore::new(core_api::get_token_file_path()?)),
    };

    match command {
        Commands::SaveToken { token } => {
            // Always lands in the persisted file store, even under --token.
            let file_store = FileCredentialStore::new(core_api::get_token_file_path()?);
            file_store.set(&token).await?;
            println!("Token saved.");
            Ok(())
        }
        Commands::Import => {
            let parts = build_parts(&cfg, credentials)?;
            tracing::info!(collection = %cfg.sync.collection_name, "running import");
            ImportPipeline::new(
                parts.remote,
                parts.store,
                parts.notifier,
                parts.filter,
                cfg.sync.collection_name.clone(),
            )
            .import_all()
            .await;
            Ok(())
        }
        Commands::Export => {
            let parts = build_parts(&cfg, credentials)?;
            tracing::info!(collection = %cfg.sync.collection_name, "running export");
            ExportPipeline::new(
                parts.remote,
                parts.store,
                parts.notifier,
                parts.filter,
                cfg.sync.collection_name.clone(),
                cfg.sync.export_concurrency,
            )
            .export_all()
            .await;
            Ok(())
        }
    }
}

struct Parts {
    remote: Arc<dyn RemoteClient>,
    store: Arc<dyn TranslationStore>,
    notifier: Arc<dyn Notifier>,
    filter: KeyFilter,
}

fn build_parts(cfg: &AppConfig, credentials: Arc<dyn CredentialProvider>) -> anyhow::Result<Parts> {
    let remote = Arc::new(HttpRemoteClient::new(
        &cfg.remote.base_url,
        credentials,
        cfg.remote.timeout_ms,
    )?);

    let store_path = match cfg.store.path.as_deref().map(str::trim) {
        Some(p) if !p.is_empty() => PathBuf::from(p),
        _ => core_api::get_data_dir()?.join("store.json"),
    };
    let store = Arc::new(LocalStore::open(store_path)?);

    Ok(Parts {
        remote,
        store,
        notifier: Arc::new(ConsoleNotifier),
        filter: KeyFilter::new(cfg.sync.managed_prefixes.clone()),
    })
}
