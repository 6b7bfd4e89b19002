//! Export pipeline: locally authored entries -> remote service.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::sync::Semaphore;

use crate::error::SyncError;
use crate::filter::KeyFilter;
use crate::model::{mode_flag, LocalEntry, FLAG_DEFINED};
use crate::notify::Notifier;
use crate::remote::RemoteClient;
use crate::store::TranslationStore;

/// One `(entry, mode)` pair scheduled for a push.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WorkItem {
    entry_id: String,
    entry_name: String,
    mode_id: String,
    locale_name: String,
    translation: String,
}

/// Pushes organically authored entries to the translation service.
pub struct ExportPipeline {
    remote: Arc<dyn RemoteClient>,
    store: Arc<dyn TranslationStore>,
    notifier: Arc<dyn Notifier>,
    filter: KeyFilter,
    collection_name: String,
    max_in_flight: usize,
}

impl ExportPipeline {
    pub fn new(
        remote: Arc<dyn RemoteClient>,
        store: Arc<dyn TranslationStore>,
        notifier: Arc<dyn Notifier>,
        filter: KeyFilter,
        collection_name: String,
        max_in_flight: usize,
    ) -> Self {
        Self {
            remote,
            store,
            notifier,
            filter,
            collection_name,
            max_in_flight: max_in_flight.max(1),
        }
    }

    /// Export every pending `(entry, mode)` pair.
    ///
    /// Pushes run under a bounded-concurrency scheduler; a failed item never
    /// blocks or cancels its siblings, and exactly one completion
    /// notification is emitted once the whole stream has settled.
    pub async fn export_all(&self) {
        let collection = match self.store.find_collection(&self.collection_name).await {
            Ok(Some(collection)) => collection,
            Ok(None) => {
                self.notifier.notify("Nothing to export.", false);
                return;
            }
            Err(err) => {
                tracing::error!(target: "locbridge.export", error = %err, "collection lookup failed");
                self.notifier
                    .notify("An error occurred while reading the local store.", true);
                return;
            }
        };

        let entries = match self.store.list_entries(&collection.id).await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!(target: "locbridge.export", error = %err, "entry listing failed");
                self.notifier
                    .notify("An error occurred while reading the local store.", true);
                return;
            }
        };

        // Snapshot of mode id -> locale name for the duration of this run.
        let modes: HashMap<String, String> = collection
            .modes
            .iter()
            .map(|m| (m.id.clone(), m.name.clone()))
            .collect();

        let candidates: Vec<LocalEntry> = entries
            .into_iter()
            .filter(|e| !e.has_flag(FLAG_DEFINED) && self.filter.is_managed(&e.name))
            .collect();

        if candidates.is_empty() {
            self.notifier.notify("Nothing to export.", false);
            return;
        }

        let items = plan_work_items(&candidates, &modes);
        tracing::info!(
            target: "locbridge.export",
            candidates = candidates.len(),
            items = items.len(),
            "starting export"
        );

        let sem = Arc::new(Semaphore::new(self.max_in_flight));
        let mut futs: FuturesUnordered<_> = FuturesUnordered::new();

        for item in items {
            let sem = sem.clone();
            let remote = self.remote.clone();
            let store = self.store.clone();

            futs.push(async move {
                let outcome = match sem.acquire_owned().await {
                    Ok(_permit) => {
                        let outcome = push_item(remote.as_ref(), store.as_ref(), &item).await;

                        // Per-item cache invalidation, success or failure.
                        // Candidate fix: a single end-of-run call (see
                        // DESIGN notes).
                        if let Err(err) = remote.clear_cache().await {
                            tracing::warn!(
                                target: "locbridge.export",
                                error = %err,
                                "cache invalidation failed"
                            );
                        }

                        outcome
                    }
                    Err(_) => Err(SyncError::Store(
                        "semaphore closed unexpectedly".to_string(),
                    )),
                };

                (item, outcome)
            });
        }

        let mut pushed = 0usize;
        let mut failed = 0usize;

        while let Some((item, outcome)) = futs.next().await {
            match outcome {
                Ok(()) => {
                    pushed += 1;
                    tracing::debug!(
                        target: "locbridge.export",
                        entry = %item.entry_name,
                        locale = %item.locale_name,
                        "pair exported"
                    );
                }
                Err(err) => {
                    failed += 1;
                    tracing::error!(
                        target: "locbridge.export",
                        entry = %item.entry_name,
                        locale = %item.locale_name,
                        error = %err,
                        "pair export failed"
                    );
                    self.notifier.notify(
                        &format!(
                            "Failed to export {} ({}).",
                            item.entry_name, item.locale_name
                        ),
                        true,
                    );
                }
            }
        }

        // Finalizer: exactly once, on both success and error paths.
        self.notifier.notify(
            &format!("Export completed. {pushed} pushed, {failed} failed."),
            false,
        );
    }
}

/// Flatten candidate entries into one work item per populated, not-yet-synced
/// `(entry, mode)` pair. Values for modes missing from the snapshot are
/// skipped; they have no locale name to push under.
fn plan_work_items(candidates: &[LocalEntry], modes: &HashMap<String, String>) -> Vec<WorkItem> {
    let mut items = Vec::new();
    for entry in candidates {
        for (mode_id, translation) in &entry.values_by_mode {
            if entry.has_flag(&mode_flag(FLAG_DEFINED, mode_id)) {
                continue;
            }
            let Some(locale_name) = modes.get(mode_id) else {
                tracing::warn!(
                    target: "locbridge.export",
                    entry = %entry.name,
                    mode_id = %mode_id,
                    "value for unknown mode skipped"
                );
                continue;
            };
            items.push(WorkItem {
                entry_id: entry.id.clone(),
                entry_name: entry.name.clone(),
                mode_id: mode_id.clone(),
                locale_name: locale_name.clone(),
                translation: translation.clone(),
            });
        }
    }
    items
}

/// Push one pair and, on an "Ok" response, mark it synced.
async fn push_item(
    remote: &dyn RemoteClient,
    store: &dyn TranslationStore,
    item: &WorkItem,
) -> Result<(), SyncError> {
    let response = remote
        .push_update(&item.entry_name, &item.locale_name, &item.translation)
        .await?;
    if !response.is_ok() {
        return Err(SyncError::RemoteRejection {
            call: "updateLanguageResource",
            message: response.message().to_string(),
        });
    }

    store
        .set_flag(&item.entry_id, Some(&item.mode_id), FLAG_DEFINED, "true")
        .await?;
    Ok(())
}
