use crate::domain::model::{EntityKind, EntityRecord};
use crate::domain::ports::{EntityStore, FlagField, GroupField};
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::normalize_email;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory Entity Store. Commits are validate-then-apply under one lock,
/// so a batch that violates the email uniqueness constraint is rejected
/// whole and the store is left untouched. Identities and timestamps are
/// assigned here, at commit time.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreInner {
    next_id: i64,
    records: HashMap<EntityKind, Vec<EntityRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the whole registry, for persisting between CLI runs.
    pub async fn to_json(&self) -> Result<String> {
        let inner = self.inner.lock().await;
        Ok(serde_json::to_string_pretty(&*inner)?)
    }

    pub fn from_json(snapshot: &str) -> Result<Self> {
        let inner: StoreInner = serde_json::from_str(snapshot)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(inner)),
        })
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn find_by_email(&self, kind: EntityKind, email: &str) -> Result<Option<EntityRecord>> {
        let needle = normalize_email(email);
        let inner = self.inner.lock().await;
        Ok(inner
            .records
            .get(&kind)
            .and_then(|records| {
                records
                    .iter()
                    .find(|r| r.email().map(normalize_email) == Some(needle.clone()))
            })
            .cloned())
    }

    async fn fetch_all(&self, kind: EntityKind) -> Result<Vec<EntityRecord>> {
        let inner = self.inner.lock().await;
        Ok(inner.records.get(&kind).cloned().unwrap_or_default())
    }

    async fn count(&self, kind: EntityKind) -> Result<u64> {
        let inner = self.inner.lock().await;
        Ok(inner.records.get(&kind).map_or(0, |r| r.len()) as u64)
    }

    async fn count_flagged(&self, kind: EntityKind, flag: FlagField) -> Result<u64> {
        let inner = self.inner.lock().await;
        let count = inner
            .records
            .get(&kind)
            .map_or(0, |records| {
                records
                    .iter()
                    .filter(|r| match flag {
                        FlagField::Approved => r.approved().unwrap_or(false),
                        FlagField::Open24x7 => r.open_24x7().unwrap_or(false),
                    })
                    .count()
            });
        Ok(count as u64)
    }

    async fn group_count(&self, kind: EntityKind, group: GroupField) -> Result<Vec<(String, u64)>> {
        let inner = self.inner.lock().await;
        let mut counts: HashMap<String, u64> = HashMap::new();
        if let Some(records) = inner.records.get(&kind) {
            for record in records {
                let key = match group {
                    GroupField::Location => record.location(),
                    GroupField::ServiceType => record.service_type().unwrap_or(""),
                };
                *counts.entry(key.to_string()).or_insert(0) += 1;
            }
        }
        Ok(counts.into_iter().collect())
    }

    async fn commit(&self, batch: Vec<EntityRecord>) -> Result<u64> {
        let mut inner = self.inner.lock().await;

        // Constraint pass first: nothing is applied if any record of the
        // batch collides on a unique email, within the batch or against
        // what is already stored.
        let mut batch_emails: Vec<(EntityKind, String)> = Vec::new();
        for record in &batch {
            let kind = record.kind();
            if !kind.requires_email() {
                continue;
            }
            let email = normalize_email(record.email().unwrap_or(""));
            let in_batch = batch_emails.contains(&(kind, email.clone()));
            let in_store = inner.records.get(&kind).is_some_and(|records| {
                records
                    .iter()
                    .any(|r| r.email().map(normalize_email) == Some(email.clone()))
            });
            if in_batch || in_store {
                return Err(RegistryError::StoreError {
                    message: format!(
                        "unique constraint violated for {} email {}",
                        kind.selector(),
                        email
                    ),
                });
            }
            batch_emails.push((kind, email));
        }

        let now = Utc::now();
        let committed = batch.len() as u64;
        for mut record in batch {
            inner.next_id += 1;
            let meta = record.meta_mut();
            meta.id = Some(inner.next_id);
            meta.created_at = Some(now);
            meta.updated_at = Some(now);
            let kind = record.kind();
            inner.records.entry(kind).or_default().push(record);
        }

        Ok(committed)
    }

    async fn clear(&self, kind: EntityKind) -> Result<u64> {
        let mut inner = self.inner.lock().await;
        let removed = inner
            .records
            .remove(&kind)
            .map_or(0, |records| records.len());
        Ok(removed as u64)
    }
}
