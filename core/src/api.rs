//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `locbridge_core::api` instead of reaching into
//! internal modules.

pub use crate::config::{
    get_data_dir, get_token_file_path, load_default, load_from_file, AppConfig, LoggingConfig,
    RemoteConfig, StoreConfig, SyncConfig,
};
pub use crate::credentials::{CredentialProvider, FileCredentialStore, StaticCredentials};
pub use crate::error::SyncError;
pub use crate::filter::{normalize_key, KeyFilter};
pub use crate::model::{
    mode_flag, Collection, LocalEntry, Locale, Mode, RemoteResource, ServiceResponse, BASE_LOCALE,
    FLAG_DEFINED, IMPORT_ORDER,
};
pub use crate::notify::{Notifier, NullNotifier};
pub use crate::remote::{HttpRemoteClient, RemoteClient, RemoteHttpError, RemoteHttpErrorKind};
pub use crate::store::{LocalStore, TranslationStore, DEFAULT_MODE_NAME, MAX_MODES};
pub use crate::sync::{ExportPipeline, ImportPipeline};
