//! reqwest-backed [`RemoteClient`].

use std::sync::Arc;
use std::{error::Error as StdError, fmt};

use async_trait::async_trait;
use serde_json::Value;

use crate::credentials::CredentialProvider;
use crate::model::{Locale, RemoteResource, ServiceResponse};

use super::RemoteClient;

const BODY_PREVIEW_LIMIT: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteHttpErrorKind {
    Timeout,
    Connect,
    Request,
    Status,
    Decode,
    Credentials,
    Unknown,
}

impl RemoteHttpErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Status => "status",
            Self::Decode => "decode",
            Self::Credentials => "credentials",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RemoteHttpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed transport failure from the translation service.
#[derive(Debug)]
pub struct RemoteHttpError {
    kind: RemoteHttpErrorKind,
    status: Option<u16>,
    url: Option<String>,
    message: String,
    source: Option<anyhow::Error>,
}

impl RemoteHttpError {
    pub fn kind(&self) -> RemoteHttpErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn from_reqwest(err: reqwest::Error, url: String) -> Self {
        let kind = if err.is_timeout() {
            RemoteHttpErrorKind::Timeout
        } else if err.is_connect() {
            RemoteHttpErrorKind::Connect
        } else if err.is_request() {
            RemoteHttpErrorKind::Request
        } else if err.is_decode() {
            RemoteHttpErrorKind::Decode
        } else {
            RemoteHttpErrorKind::Unknown
        };
        let status = err.status().map(|s| s.as_u16());
        let message = err.to_string();
        RemoteHttpError {
            kind,
            status,
            url: Some(url),
            message,
            source: Some(anyhow::Error::new(err)),
        }
    }

    fn status_error(status: u16, url: String, preview: String) -> Self {
        RemoteHttpError {
            kind: RemoteHttpErrorKind::Status,
            status: Some(status),
            url: Some(url),
            message: preview,
            source: None,
        }
    }

    fn decode_error(status: u16, url: String, err: serde_json::Error, preview: String) -> Self {
        let message = format!("failed to decode response body: {err} | body={preview}");
        RemoteHttpError {
            kind: RemoteHttpErrorKind::Decode,
            status: Some(status),
            url: Some(url),
            message,
            source: Some(anyhow::Error::new(err)),
        }
    }

    fn credentials_error(err: anyhow::Error) -> Self {
        RemoteHttpError {
            kind: RemoteHttpErrorKind::Credentials,
            status: None,
            url: None,
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl fmt::Display for RemoteHttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "remote http error kind={}", self.kind)?;
        if let Some(status) = self.status {
            write!(f, " status={status}")?;
        }
        if let Some(url) = &self.url {
            write!(f, " url={url}")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl StdError for RemoteHttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out = String::new();
    let mut truncated = false;
    for (idx, ch) in trimmed.chars().enumerate() {
        if idx >= BODY_PREVIEW_LIMIT {
            truncated = true;
            break;
        }
        out.push(ch);
    }

    if truncated {
        out.push_str("...");
    }

    out
}

async fn parse_envelope<T: serde::de::DeserializeOwned + Default>(
    resp: reqwest::Response,
) -> anyhow::Result<ServiceResponse<T>> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp
        .text()
        .await
        .map_err(|err| RemoteHttpError::from_reqwest(err, url.clone()))?;

    if !status.is_success() {
        let preview = preview_body(&body);
        return Err(RemoteHttpError::status_error(status.as_u16(), url, preview).into());
    }

    serde_json::from_str::<ServiceResponse<T>>(&body).map_err(|err| {
        let preview = preview_body(&body);
        RemoteHttpError::decode_error(status.as_u16(), url, err, preview).into()
    })
}

/// HTTP client for the translation service.
pub struct HttpRemoteClient {
    http: reqwest::Client,
    credentials: Arc<dyn CredentialProvider>,
    // Pre-built endpoints; the base URL never changes at runtime.
    url_fetch: String,
    url_update: String,
    url_clear_cache: String,
}

impl HttpRemoteClient {
    pub fn new(
        base_url: &str,
        credentials: Arc<dyn CredentialProvider>,
        timeout_ms: u64,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        let normalized = base_url.trim_end_matches('/');
        Ok(Self {
            http,
            credentials,
            url_fetch: format!("{normalized}/languageresource/GetAllLanguageResource"),
            url_update: format!("{normalized}/languageresource/UpdateLanguageResource"),
            // Endpoint spelling is the service's, typo included.
            url_clear_cache: format!("{normalized}/languageresource/ClearLanguageResourceCahce"),
        })
    }

    /// Attach the bearer token, looked up fresh for every request.
    async fn auth(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, RemoteHttpError> {
        let token = self
            .credentials
            .get()
            .await
            .map_err(RemoteHttpError::credentials_error)?;
        match token {
            Some(token) if !token.trim().is_empty() => Ok(req.bearer_auth(token)),
            _ => Ok(req),
        }
    }

    async fn post_json<T: serde::de::DeserializeOwned + Default>(
        &self,
        url: &str,
        body: &Value,
    ) -> anyhow::Result<ServiceResponse<T>> {
        let req = self.http.post(url).json(body);
        let req = self.auth(req).await?;
        let resp = req
            .send()
            .await
            .map_err(|err| RemoteHttpError::from_reqwest(err, url.to_string()))?;
        parse_envelope(resp).await
    }
}

#[async_trait]
impl RemoteClient for HttpRemoteClient {
    async fn fetch_resources(
        &self,
        locale: Locale,
    ) -> anyhow::Result<ServiceResponse<Vec<RemoteResource>>> {
        let url = &self.url_fetch;
        tracing::debug!(
            target: "locbridge.remote",
            stage = "remote.fetch.in",
            url = %url,
            locale = %locale
        );
        let body = serde_json::json!({ "languageCultureCode": locale.as_str() });
        let out: ServiceResponse<Vec<RemoteResource>> = self.post_json(url, &body).await?;
        tracing::debug!(
            target: "locbridge.remote",
            stage = "remote.fetch.out",
            status = %out.status,
            resources = out.value.as_ref().map(Vec::len).unwrap_or(0)
        );
        Ok(out)
    }

    async fn push_update(
        &self,
        resource_key: &str,
        locale_name: &str,
        translation: &str,
    ) -> anyhow::Result<ServiceResponse<Value>> {
        let url = &self.url_update;
        tracing::debug!(
            target: "locbridge.remote",
            stage = "remote.push.in",
            url = %url,
            resource_key = %resource_key,
            locale = %locale_name
        );
        let body = serde_json::json!({
            "resourceKey": resource_key,
            "languageCultureCode": locale_name,
            "translation": translation,
        });
        let out: ServiceResponse<Value> = self.post_json(url, &body).await?;
        tracing::debug!(
            target: "locbridge.remote",
            stage = "remote.push.out",
            status = %out.status
        );
        Ok(out)
    }

    async fn clear_cache(&self) -> anyhow::Result<()> {
        let url = &self.url_clear_cache;
        tracing::debug!(target: "locbridge.remote", stage = "remote.clear_cache.in", url = %url);
        let _: ServiceResponse<Value> = self.post_json(url, &serde_json::json!({})).await?;
        tracing::debug!(target: "locbridge.remote", stage = "remote.clear_cache.out");
        Ok(())
    }
}
