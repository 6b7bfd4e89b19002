//! Shared fixtures for the pipeline integration tests: a scripted remote
//! service and a recording notifier.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use locbridge_core::api::{
    LocalStore, Locale, Notifier, RemoteClient, RemoteResource, ServiceResponse, TranslationStore,
};

pub fn resource(key: &str, locale: &str, translation: &str) -> RemoteResource {
    RemoteResource {
        resource_key: key.to_string(),
        language_culture_code: locale.to_string(),
        translation: translation.to_string(),
    }
}

fn ok<T>(value: T) -> ServiceResponse<T> {
    ServiceResponse {
        status: "Ok".to_string(),
        value: Some(value),
        message: None,
    }
}

fn rejected<T>(message: &str) -> ServiceResponse<T> {
    ServiceResponse {
        status: "Error".to_string(),
        value: None,
        message: Some(message.to_string()),
    }
}

/// Scripted stand-in for the translation service.
#[derive(Default)]
pub struct MockRemote {
    resources: Mutex<HashMap<Locale, Vec<RemoteResource>>>,
    reject_fetch: Mutex<HashSet<Locale>>,
    reject_push_keys: Mutex<HashSet<String>>,
    transport_fail_push_keys: Mutex<HashSet<String>>,
    push_delay: Mutex<Option<Duration>>,

    pub push_calls: Mutex<Vec<(String, String, String)>>,
    pub clear_cache_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl MockRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn script_resources(&self, locale: Locale, resources: Vec<RemoteResource>) {
        self.resources.lock().unwrap().insert(locale, resources);
    }

    pub fn reject_fetch_for(&self, locale: Locale) {
        self.reject_fetch.lock().unwrap().insert(locale);
    }

    pub fn reject_push_for(&self, resource_key: &str) {
        self.reject_push_keys
            .lock()
            .unwrap()
            .insert(resource_key.to_string());
    }

    pub fn fail_transport_for(&self, resource_key: &str) {
        self.transport_fail_push_keys
            .lock()
            .unwrap()
            .insert(resource_key.to_string());
    }

    pub fn delay_pushes(&self, delay: Duration) {
        *self.push_delay.lock().unwrap() = Some(delay);
    }

    pub fn push_count(&self) -> usize {
        self.push_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RemoteClient for MockRemote {
    async fn fetch_resources(
        &self,
        locale: Locale,
    ) -> anyhow::Result<ServiceResponse<Vec<RemoteResource>>> {
        if self.reject_fetch.lock().unwrap().contains(&locale) {
            return Ok(rejected("scripted rejection"));
        }
        let resources = self
            .resources
            .lock()
            .unwrap()
            .get(&locale)
            .cloned()
            .unwrap_or_default();
        Ok(ok(resources))
    }

    async fn push_update(
        &self,
        resource_key: &str,
        locale_name: &str,
        translation: &str,
    ) -> anyhow::Result<ServiceResponse<Value>> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = *self.push_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.push_calls.lock().unwrap().push((
            resource_key.to_string(),
            locale_name.to_string(),
            translation.to_string(),
        ));

        if self
            .transport_fail_push_keys
            .lock()
            .unwrap()
            .contains(resource_key)
        {
            return Err(anyhow::anyhow!("scripted transport failure"));
        }
        if self.reject_push_keys.lock().unwrap().contains(resource_key) {
            return Ok(rejected("scripted push rejection"));
        }
        Ok(ok(Value::Null))
    }

    async fn clear_cache(&self) -> anyhow::Result<()> {
        self.clear_cache_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Notifier that records every message for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<(String, bool)>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m.contains(needle))
            .count()
    }

    pub fn has_error(&self) -> bool {
        self.messages.lock().unwrap().iter().any(|(_, err)| *err)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, is_error: bool) {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), is_error));
    }
}

/// A store pre-seeded with the managed collection and the given modes, the
/// way a completed import leaves it.
pub async fn seeded_store(collection_name: &str, locales: &[&str]) -> Arc<LocalStore> {
    let store = Arc::new(LocalStore::in_memory());
    let collection = store.create_collection(collection_name).await.unwrap();
    let collection = store
        .reset_collection(&collection.id, locales.first().copied().unwrap_or("en-US"))
        .await
        .unwrap();
    for locale in locales.iter().skip(1) {
        store
            .get_or_create_mode(&collection.id, locale)
            .await
            .unwrap()
            .expect("mode cap not reached in fixture");
    }
    store
}
