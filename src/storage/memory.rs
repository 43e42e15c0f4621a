use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::SourceStore;
use crate::core::{DynamicEntity, EntityKey, Result, SourceError};

/// Process-local [`SourceStore`], ordered by compound key.
///
/// Records are cloned in and out, so a loaded entity never aliases the
/// stored one.
#[derive(Debug, Default)]
pub struct InMemorySourceStore {
    records: RwLock<BTreeMap<EntityKey, DynamicEntity>>,
}

impl InMemorySourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with records, ignoring any etags they carry.
    pub fn with_records(records: impl IntoIterator<Item = DynamicEntity>) -> Result<Self> {
        let store = Self::new();
        for mut record in records {
            record.etag = None;
            store.save(&mut record)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.records.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.records.read()?.is_empty())
    }
}

impl SourceStore for InMemorySourceStore {
    fn load(&self, key: &EntityKey) -> Result<Option<DynamicEntity>> {
        Ok(self.records.read()?.get(key).cloned())
    }

    fn save(&self, entity: &mut DynamicEntity) -> Result<()> {
        let key = entity.key();
        let mut records = self.records.write()?;

        if let Some(expected) = &entity.etag {
            match records.get(&key) {
                None => return Err(SourceError::NotFound(key)),
                Some(stored) if stored.etag.as_ref() != Some(expected) => {
                    return Err(SourceError::Conflict(key));
                }
                Some(_) => {}
            }
        }

        entity.timestamp = Some(Utc::now());
        entity.etag = Some(Uuid::new_v4().to_string());
        debug!(source = %key, properties = entity.properties.len(), "Saved diagnostics source");
        records.insert(key, entity.clone());
        Ok(())
    }

    fn delete(&self, key: &EntityKey) -> Result<bool> {
        Ok(self.records.write()?.remove(key).is_some())
    }

    fn list_partition(&self, partition_key: &str) -> Result<Vec<DynamicEntity>> {
        let records = self.records.read()?;
        Ok(records
            .values()
            .filter(|record| record.partition_key == partition_key)
            .cloned()
            .collect())
    }
}
