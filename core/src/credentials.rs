//! Bearer-token storage for the translation service.
//!
//! The remote client looks the token up per request; the core treats the
//! provider as an opaque async capability with no caching of its own.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

/// Supplies and persists the service bearer token.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Current token, if one has been saved.
    async fn get(&self) -> anyhow::Result<Option<String>>;

    /// Persist a new token.
    async fn set(&self, token: &str) -> anyhow::Result<()>;
}

/// Token persisted as a plain file under the app data directory.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl CredentialProvider for FileCredentialStore {
    async fn get(&self) -> anyhow::Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::anyhow!(
                "failed to read token file {}: {e}",
                self.path.display()
            )),
        }
    }

    async fn set(&self, token: &str) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(&self.path, token).await?;
        Ok(())
    }
}

/// Fixed or test-supplied credentials held in memory.
#[derive(Debug, Default)]
pub struct StaticCredentials {
    token: Mutex<Option<String>>,
}

impl StaticCredentials {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Mutex::new(token),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn get(&self) -> anyhow::Result<Option<String>> {
        Ok(self
            .token
            .lock()
            .map_err(|_| anyhow::anyhow!("credential lock poisoned"))?
            .clone())
    }

    async fn set(&self, token: &str) -> anyhow::Result<()> {
        *self
            .token
            .lock()
            .map_err(|_| anyhow::anyhow!("credential lock poisoned"))? = Some(token.to_string());
        Ok(())
    }
}
