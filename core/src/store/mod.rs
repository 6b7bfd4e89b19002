//! Store adapter contract consumed by the pipelines.
//!
//! The host store owns collections, modes, entries and per-entry flags; the
//! engine only drives it through this trait. [`local::LocalStore`] is the
//! crate's own implementation of the host rules.

pub mod local;

use async_trait::async_trait;

use crate::error::SyncError;
use crate::model::{Collection, LocalEntry, Mode};

pub use local::LocalStore;

/// Host ceiling on modes per collection.
pub const MAX_MODES: usize = 4;

/// Name every fresh collection gives its sole starting mode before the
/// import pipeline renames it to the base locale.
pub const DEFAULT_MODE_NAME: &str = "Mode 1";

/// Operations the engine needs from the translation store.
///
/// Flags take an optional mode id; a mode-scoped flag is stored under
/// `<name>_<mode_id>`.
#[async_trait]
pub trait TranslationStore: Send + Sync {
    /// Look up a collection by name without creating it.
    async fn find_collection(&self, name: &str) -> Result<Option<Collection>, SyncError>;

    /// Create a collection. It starts with exactly one mode
    /// ([`DEFAULT_MODE_NAME`]); a collection never exists with zero modes.
    async fn create_collection(&self, name: &str) -> Result<Collection, SyncError>;

    /// Strip all entries and non-base modes, then rename the sole remaining
    /// mode to `base_locale`. Used once, on first-time collection creation.
    async fn reset_collection(
        &self,
        collection_id: &str,
        base_locale: &str,
    ) -> Result<Collection, SyncError>;

    /// Find the mode named `name`, creating it if absent. Returns `Ok(None)`
    /// when the host cannot yield a usable mode (e.g. the cap of
    /// [`MAX_MODES`] is reached).
    async fn get_or_create_mode(
        &self,
        collection_id: &str,
        name: &str,
    ) -> Result<Option<Mode>, SyncError>;

    /// All entries of a collection.
    async fn list_entries(&self, collection_id: &str) -> Result<Vec<LocalEntry>, SyncError>;

    /// Set one entry's value for one mode.
    async fn set_entry_value(
        &self,
        entry_id: &str,
        mode_id: &str,
        value: &str,
    ) -> Result<(), SyncError>;

    /// Create an entry with an initial value for one mode.
    async fn create_entry(
        &self,
        collection_id: &str,
        name: &str,
        value: &str,
        mode_id: &str,
    ) -> Result<LocalEntry, SyncError>;

    /// Read a flag, optionally scoped to a mode.
    async fn get_flag(
        &self,
        entry_id: &str,
        mode_id: Option<&str>,
        name: &str,
    ) -> Result<Option<String>, SyncError>;

    /// Write a flag, optionally scoped to a mode.
    async fn set_flag(
        &self,
        entry_id: &str,
        mode_id: Option<&str>,
        name: &str,
        value: &str,
    ) -> Result<(), SyncError>;
}
