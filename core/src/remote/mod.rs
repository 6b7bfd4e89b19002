//! Remote translation service client.
//!
//! The pipelines only see the [`RemoteClient`] trait; the reqwest-backed
//! implementation lives in [`http`]. A rejection (non-"Ok" envelope) comes
//! back as a successful call with `is_ok() == false`; only transport-level
//! problems are `Err`.

pub mod http;

use async_trait::async_trait;
use serde_json::Value;

use crate::model::{Locale, RemoteResource, ServiceResponse};

pub use http::{HttpRemoteClient, RemoteHttpError, RemoteHttpErrorKind};

/// Operations the engine needs from the translation service.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Fetch every resource the service holds for `locale`.
    async fn fetch_resources(
        &self,
        locale: Locale,
    ) -> anyhow::Result<ServiceResponse<Vec<RemoteResource>>>;

    /// Push one translation. `locale_name` is a mode/culture name as stored
    /// locally, which for exports may predate the engine's locale list.
    async fn push_update(
        &self,
        resource_key: &str,
        locale_name: &str,
        translation: &str,
    ) -> anyhow::Result<ServiceResponse<Value>>;

    /// Ask the service to drop its resource cache.
    async fn clear_cache(&self) -> anyhow::Result<()>;
}
