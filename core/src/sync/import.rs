//! Import pipeline: remote resources -> local store.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::SyncError;
use crate::filter::{normalize_key, KeyFilter};
use crate::model::{Collection, Locale, BASE_LOCALE, FLAG_DEFINED, IMPORT_ORDER};
use crate::notify::Notifier;
use crate::remote::RemoteClient;
use crate::store::TranslationStore;

/// Pulls remote translation resources into the local store.
pub struct ImportPipeline {
    remote: Arc<dyn RemoteClient>,
    store: Arc<dyn TranslationStore>,
    notifier: Arc<dyn Notifier>,
    filter: KeyFilter,
    collection_name: String,
}

#[derive(Debug, Default)]
struct LocaleStats {
    matched: usize,
    created: usize,
    updated: usize,
}

impl ImportPipeline {
    pub fn new(
        remote: Arc<dyn RemoteClient>,
        store: Arc<dyn TranslationStore>,
        notifier: Arc<dyn Notifier>,
        filter: KeyFilter,
        collection_name: String,
    ) -> Self {
        Self {
            remote,
            store,
            notifier,
            filter,
            collection_name,
        }
    }

    /// Import every supported locale, strictly in order.
    ///
    /// Sequencing is a correctness requirement: the store cannot hold a
    /// collection without a mode, so the base locale must be processed first
    /// and become the renamed sole mode of a fresh collection. A failed
    /// locale is reported and skipped; later locales still run.
    pub async fn import_all(&self) {
        for locale in IMPORT_ORDER {
            self.import_locale(locale).await;
        }
    }

    /// Import a single locale. Every failure is notified, logged, and
    /// confined to this locale.
    pub async fn import_locale(&self, locale: Locale) {
        match self.run_locale(locale).await {
            Ok(stats) => {
                tracing::info!(
                    target: "locbridge.import",
                    locale = %locale,
                    matched = stats.matched,
                    created = stats.created,
                    updated = stats.updated,
                    "locale import finished"
                );
            }
            Err(err) => {
                tracing::error!(
                    target: "locbridge.import",
                    locale = %locale,
                    error = %err,
                    "locale import aborted"
                );
                let message = match &err {
                    SyncError::Store(_) => {
                        format!("An error occurred while preparing the store for {locale}.")
                    }
                    _ => format!("An error occurred while importing locales for {locale}."),
                };
                self.notifier.notify(&message, true);
            }
        }
    }

    async fn run_locale(&self, locale: Locale) -> Result<LocaleStats, SyncError> {
        let response = self.remote.fetch_resources(locale).await?;
        if !response.is_ok() {
            return Err(SyncError::RemoteRejection {
                call: "getAllLanguageResource",
                message: response.message().to_string(),
            });
        }

        let resources = response.value.unwrap_or_default();
        let raw_count = resources.len();
        let matched: Vec<_> = resources
            .into_iter()
            .filter(|r| self.filter.is_managed(&r.resource_key))
            .collect();
        tracing::debug!(
            target: "locbridge.import",
            locale = %locale,
            raw = raw_count,
            filtered = matched.len(),
            "resources fetched"
        );
        self.notifier.notify(
            &format!(
                "{} items with {} prefix found.",
                matched.len(),
                self.filter.prefixes().join(" or ")
            ),
            false,
        );

        let collection = self.managed_collection().await?;

        let Some(mode) = self
            .store
            .get_or_create_mode(&collection.id, locale.as_str())
            .await?
        else {
            return Err(SyncError::Store(format!(
                "could not obtain a usable mode for {locale}"
            )));
        };

        let mut stats = LocaleStats {
            matched: matched.len(),
            ..LocaleStats::default()
        };

        let entries = self.store.list_entries(&collection.id).await?;
        let mut ids_by_name: HashMap<String, String> = entries
            .into_iter()
            .map(|e| (e.name.clone(), e.id))
            .collect();

        for resource in matched {
            let name = normalize_key(&resource.resource_key);
            if let Some(entry_id) = ids_by_name.get(&name) {
                self.store
                    .set_entry_value(entry_id, &mode.id, &resource.translation)
                    .await?;
                stats.updated += 1;
            } else {
                let entry = self
                    .store
                    .create_entry(&collection.id, &name, &resource.translation, &mode.id)
                    .await?;
                // Marks the entry as engine-managed; set at creation only,
                // never retroactively.
                self.store
                    .set_flag(&entry.id, None, FLAG_DEFINED, "true")
                    .await?;
                ids_by_name.insert(name, entry.id);
                stats.created += 1;
            }
        }

        Ok(stats)
    }

    /// Find the managed collection, or create it. A freshly created
    /// collection is reset: entries stripped, non-base modes stripped, sole
    /// mode renamed to the base locale.
    async fn managed_collection(&self) -> Result<Collection, SyncError> {
        if let Some(collection) = self.store.find_collection(&self.collection_name).await? {
            return Ok(collection);
        }

        tracing::info!(
            target: "locbridge.import",
            collection = %self.collection_name,
            "creating managed collection"
        );
        let collection = self.store.create_collection(&self.collection_name).await?;
        self.store
            .reset_collection(&collection.id, BASE_LOCALE.as_str())
            .await
    }
}
