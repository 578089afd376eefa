use crate::errors::CatalogError;
use bf_01_validator::validate_lookup_name;
use shared_store::{decode, encode, BatchOperation, KVStoreError, Precondition, StoreHandle};
use shared_types::{LookupEntry, LookupId, TimeSource};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// `lookup:{uuid}` -> LookupEntry
    Entry,
    /// `lookup_name:{name}` -> uuid
    ByName,
}

impl KeyPrefix {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Entry => b"lookup:",
            KeyPrefix::ByName => b"lookup_name:",
        }
    }

    pub fn key(&self, suffix: &str) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix.as_bytes());
        key
    }

    pub fn entry_key(id: &LookupId) -> Vec<u8> {
        KeyPrefix::Entry.key(&id.to_string())
    }
}

#[derive(Clone)]
pub struct LookupCatalog {
    store: StoreHandle,
    time_source: Arc<dyn TimeSource>,
}

impl LookupCatalog {
    pub fn new(store: StoreHandle, time_source: Arc<dyn TimeSource>) -> Self {
        Self { store, time_source }
    }

    /// Add an entry. The trimmed name must be unused.
    pub async fn create(&self, name: &str) -> Result<LookupEntry, CatalogError> {
        validate_lookup_name(name).map_err(CatalogError::Invalid)?;

        let entry = LookupEntry {
            id: LookupId::new(),
            name: name.trim().to_owned(),
            created_at: self.time_source.now(),
        };
        let name_key = KeyPrefix::ByName.key(&entry.name);

        let result = self
            .store
            .conditional_batch_write(
                vec![Precondition::absent(name_key.clone())],
                vec![
                    BatchOperation::put(KeyPrefix::entry_key(&entry.id), encode(&entry)?),
                    BatchOperation::put(name_key, encode(&entry.id)?),
                ],
            )
            .await;

        match result {
            Ok(()) => {
                tracing::info!(subsystem = "bf-05", id = %entry.id, name = %entry.name, "Lookup entry created");
                Ok(entry)
            }
            Err(KVStoreError::ConditionFailed { .. }) => Err(CatalogError::Duplicate(entry.name)),
            Err(e) => Err(e.into()),
        }
    }

    /// All entries sorted by name. Empty is a valid answer.
    pub async fn list(&self) -> Result<Vec<LookupEntry>, CatalogError> {
        let mut entries = self
            .store
            .run(|kv| {
                kv.prefix_scan(KeyPrefix::Entry.as_bytes())?
                    .into_iter()
                    .map(|(_, bytes)| decode::<LookupEntry>(&bytes))
                    .collect::<Result<Vec<_>, _>>()
            })
            .await?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    pub async fn get(&self, id: LookupId) -> Result<LookupEntry, CatalogError> {
        match self.store.get(KeyPrefix::entry_key(&id)).await? {
            Some(bytes) => Ok(decode(&bytes)?),
            None => Err(CatalogError::NotFound(id)),
        }
    }

    /// Remove an entry and release its name.
    ///
    /// Identities registered under the name keep it; departments are copied
    /// onto identities, not referenced.
    pub async fn delete(&self, id: LookupId) -> Result<(), CatalogError> {
        let entry_key = KeyPrefix::entry_key(&id);
        let Some(bytes) = self.store.get(entry_key.clone()).await? else {
            return Err(CatalogError::NotFound(id));
        };
        let entry: LookupEntry = decode(&bytes)?;

        let result = self
            .store
            .conditional_batch_write(
                vec![Precondition::equals(entry_key.clone(), bytes)],
                vec![
                    BatchOperation::delete(entry_key),
                    BatchOperation::delete(KeyPrefix::ByName.key(&entry.name)),
                ],
            )
            .await;

        match result {
            Ok(()) => {
                tracing::info!(subsystem = "bf-05", id = %id, name = %entry.name, "Lookup entry deleted");
                Ok(())
            }
            // deleted concurrently
            Err(KVStoreError::ConditionFailed { .. }) => Err(CatalogError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Exact-match membership test on the trimmed name.
    pub async fn contains(&self, name: &str) -> Result<bool, CatalogError> {
        let key = KeyPrefix::ByName.key(name.trim());
        Ok(self.store.get(key).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_store::InMemoryKVStore;
    use shared_types::SystemTimeSource;

    fn catalog() -> LookupCatalog {
        LookupCatalog::new(
            StoreHandle::new(Arc::new(InMemoryKVStore::new())),
            Arc::new(SystemTimeSource),
        )
    }

    #[tokio::test]
    async fn test_create_get_list() {
        let catalog = catalog();
        assert!(catalog.list().await.unwrap().is_empty());

        let physics = catalog.create(" Physics ").await.unwrap();
        let chemistry = catalog.create("Chemistry").await.unwrap();
        assert_eq!(physics.name, "Physics");

        assert_eq!(catalog.get(physics.id).await.unwrap(), physics);
        let names: Vec<_> = catalog
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec![chemistry.name, physics.name]);
    }

    #[tokio::test]
    async fn test_duplicate_names_exact_match() {
        let catalog = catalog();
        catalog.create("Physics").await.unwrap();

        assert_eq!(
            catalog.create("Physics").await,
            Err(CatalogError::Duplicate("Physics".into()))
        );
        assert_eq!(
            catalog.create("  Physics").await,
            Err(CatalogError::Duplicate("Physics".into()))
        );
        // case-sensitive
        assert!(catalog.create("physics").await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_names() {
        let catalog = catalog();
        assert!(matches!(catalog.create(" ").await, Err(CatalogError::Invalid(_))));
        assert!(matches!(
            catalog.create(&"x".repeat(65)).await,
            Err(CatalogError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_releases_name() {
        let catalog = catalog();
        let entry = catalog.create("Physics").await.unwrap();
        assert!(catalog.contains("Physics").await.unwrap());

        catalog.delete(entry.id).await.unwrap();
        assert!(!catalog.contains("Physics").await.unwrap());
        assert_eq!(catalog.get(entry.id).await, Err(CatalogError::NotFound(entry.id)));
        assert_eq!(catalog.delete(entry.id).await, Err(CatalogError::NotFound(entry.id)));

        assert!(catalog.create("Physics").await.is_ok());
    }

    #[tokio::test]
    async fn test_contains_is_exact() {
        let catalog = catalog();
        catalog.create("Computer Science").await.unwrap();
        assert!(catalog.contains("Computer Science").await.unwrap());
        assert!(!catalog.contains("computer science").await.unwrap());
        assert!(!catalog.contains("Computer").await.unwrap());
    }
}
