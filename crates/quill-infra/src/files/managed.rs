use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use quill_core::domain::StoredFile;
use quill_core::error::{FileStoreError, RepoError};
use quill_core::ports::{FileRepository, FileStore, ObjectStore};

/// File store combining the record repository and the object store.
///
/// Deletion is two-phase and not transactional: the object goes first, the
/// record second. A crash in between leaves a record pointing at a missing
/// object rather than an unowned object in the bucket.
pub struct ManagedFileStore {
    records: Arc<dyn FileRepository>,
    objects: Arc<dyn ObjectStore>,
}

impl ManagedFileStore {
    pub fn new(records: Arc<dyn FileRepository>, objects: Arc<dyn ObjectStore>) -> Self {
        Self { records, objects }
    }
}

#[async_trait]
impl FileStore for ManagedFileStore {
    async fn find_by_key_and_owner(
        &self,
        file_key: &str,
        owner_id: Uuid,
    ) -> Result<Option<StoredFile>, RepoError> {
        self.records.find_by_key_and_owner(file_key, owner_id).await
    }

    async fn find_by_ids_and_owner(
        &self,
        ids: &[Uuid],
        owner_id: Uuid,
    ) -> Result<Vec<StoredFile>, RepoError> {
        self.records.find_by_ids_and_owner(ids, owner_id).await
    }

    async fn delete_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<(), FileStoreError> {
        let file = self
            .records
            .find_by_id(id)
            .await
            .map_err(FileStoreError::Record)?
            .ok_or(FileStoreError::NotFound)?;

        // A caller can only delete files it owns.
        if file.owner_user_id != owner_id {
            return Err(FileStoreError::NotFound);
        }

        self.objects.delete(&file.file_key).await?;
        self.records.delete(id).await.map_err(FileStoreError::Record)?;

        info!(file_id = %id, file_key = %file.file_key, "File deleted from object store and records");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Utc;
    use quill_core::domain::FileType;
    use quill_core::ports::BaseRepository;

    use super::*;

    #[derive(Default)]
    struct FakeRecords {
        rows: Mutex<HashMap<Uuid, StoredFile>>,
    }

    #[async_trait]
    impl BaseRepository<StoredFile, Uuid> for FakeRecords {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<StoredFile>, RepoError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn save(&self, file: StoredFile) -> Result<StoredFile, RepoError> {
            self.rows.lock().unwrap().insert(file.id, file.clone());
            Ok(file)
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            match self.rows.lock().unwrap().remove(&id) {
                Some(_) => Ok(()),
                None => Err(RepoError::NotFound),
            }
        }
    }

    #[async_trait]
    impl FileRepository for FakeRecords {
        async fn find_by_key_and_owner(
            &self,
            file_key: &str,
            owner_id: Uuid,
        ) -> Result<Option<StoredFile>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .find(|f| f.file_key == file_key && f.owner_user_id == owner_id)
                .cloned())
        }

        async fn find_by_ids_and_owner(
            &self,
            ids: &[Uuid],
            owner_id: Uuid,
        ) -> Result<Vec<StoredFile>, RepoError> {
            let rows = self.rows.lock().unwrap();
            Ok(ids
                .iter()
                .filter_map(|id| rows.get(id))
                .filter(|f| f.owner_user_id == owner_id)
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct FakeObjects {
        deleted: Mutex<Vec<String>>,
        fail: Mutex<bool>,
    }

    #[async_trait]
    impl ObjectStore for FakeObjects {
        async fn delete(&self, key: &str) -> Result<(), FileStoreError> {
            if *self.fail.lock().unwrap() {
                return Err(FileStoreError::ObjectStore {
                    key: key.to_string(),
                    reason: "simulated outage".into(),
                });
            }
            self.deleted.lock().unwrap().push(key.to_string());
            Ok(())
        }

        async fn exists(&self, key: &str) -> Result<bool, FileStoreError> {
            Ok(!self.deleted.lock().unwrap().iter().any(|k| k == key))
        }
    }

    fn stored_file(owner: Uuid) -> StoredFile {
        StoredFile {
            id: Uuid::new_v4(),
            file_key: "uploads/image/2024/01/cat.png".to_string(),
            file_url: "uploads/image/2024/01/cat.png".to_string(),
            original_name: "cat.png".to_string(),
            mime_type: "image/png".to_string(),
            file_size: 1024,
            file_type: FileType::Image,
            owner_user_id: owner,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn delete_removes_object_then_record() {
        let records = Arc::new(FakeRecords::default());
        let objects = Arc::new(FakeObjects::default());
        let store = ManagedFileStore::new(records.clone(), objects.clone());

        let owner = Uuid::new_v4();
        let file = stored_file(owner);
        let id = file.id;
        records.save(file).await.unwrap();

        store.delete_by_id(id, owner).await.unwrap();

        assert_eq!(
            objects.deleted.lock().unwrap().as_slice(),
            &["uploads/image/2024/01/cat.png".to_string()]
        );
        assert!(records.find_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_by_non_owner_is_not_found() {
        let records = Arc::new(FakeRecords::default());
        let objects = Arc::new(FakeObjects::default());
        let store = ManagedFileStore::new(records.clone(), objects.clone());

        let file = stored_file(Uuid::new_v4());
        let id = file.id;
        records.save(file).await.unwrap();

        let err = store.delete_by_id(id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, FileStoreError::NotFound));
        assert!(records.find_by_id(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn object_store_failure_keeps_the_record() {
        let records = Arc::new(FakeRecords::default());
        let objects = Arc::new(FakeObjects::default());
        let store = ManagedFileStore::new(records.clone(), objects.clone());

        let owner = Uuid::new_v4();
        let file = stored_file(owner);
        let id = file.id;
        records.save(file).await.unwrap();
        *objects.fail.lock().unwrap() = true;

        let err = store.delete_by_id(id, owner).await.unwrap_err();
        assert!(matches!(err, FileStoreError::ObjectStore { .. }));
        assert!(records.find_by_id(id).await.unwrap().is_some());
    }
}
