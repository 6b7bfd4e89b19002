pub mod load;
pub mod types;

pub use load::{get_data_dir, get_token_file_path, load_default, load_from_file};
pub use types::{AppConfig, LoggingConfig, RemoteConfig, StoreConfig, SyncConfig};
