use crate::core::{DynamicEntity, EntityKey, Result, SourceError};
use crate::source::DiagnosticsSource;

/// Record store holding diagnostics source definitions.
///
/// Implementations own persistence and concurrency: `save` stamps the
/// entity's etag and rejects a stale one with [`SourceError::Conflict`].
pub trait SourceStore {
    fn load(&self, key: &EntityKey) -> Result<Option<DynamicEntity>>;

    /// Insert-or-replace. An entity carrying an etag only replaces the stored
    /// version with that same etag; one without an etag always wins.
    fn save(&self, entity: &mut DynamicEntity) -> Result<()>;

    /// Returns whether a record was removed.
    fn delete(&self, key: &EntityKey) -> Result<bool>;

    fn list_partition(&self, partition_key: &str) -> Result<Vec<DynamicEntity>>;

    /// Load, mutate through a typed view, and save back in one step.
    fn update<T, F>(&self, key: &EntityKey, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut DiagnosticsSource<'_>) -> Result<T>,
    {
        let mut entity = self
            .load(key)?
            .ok_or_else(|| SourceError::NotFound(key.clone()))?;
        let result = {
            let mut source = DiagnosticsSource::new(&mut entity);
            f(&mut source)?
        };
        self.save(&mut entity)?;
        Ok(result)
    }

    /// Moves a record to a new compound key: writes it under the new key,
    /// then removes the old one.
    ///
    /// Fails with [`SourceError::Conflict`] when `entity` carries an etag that
    /// no longer matches the record at its old key, and with
    /// [`SourceError::AlreadyExists`] when `new_key` is taken. `entity` is
    /// left unchanged on either failure.
    fn relocate(&self, entity: &mut DynamicEntity, new_key: EntityKey) -> Result<()> {
        let old_key = entity.key();
        if old_key == new_key {
            return self.save(entity);
        }

        if let (Some(expected), Some(stored)) = (&entity.etag, self.load(&old_key)?) {
            if stored.etag.as_ref() != Some(expected) {
                return Err(SourceError::Conflict(old_key));
            }
        }
        if self.load(&new_key)?.is_some() {
            return Err(SourceError::AlreadyExists(new_key));
        }

        entity.partition_key = new_key.partition_key;
        entity.row_key = new_key.row_key;
        entity.etag = None;
        self.save(entity)?;
        self.delete(&old_key)?;
        Ok(())
    }
}
