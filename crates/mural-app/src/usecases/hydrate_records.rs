use std::sync::Arc;

use anyhow::Result;
use futures::future::join_all;
use tracing::warn;

use crate::folder::FolderPersistence;
use crate::library::ImageLibrary;

/// Refetch inline payloads for every dehydrated, folder-backed record.
///
/// One batched pass over the whole table rather than per-record reads,
/// so a changing table does not trigger redundant passes. Missing files
/// and read failures leave the record dehydrated; nothing is retried.
pub struct HydrateRecordsUseCase {
    folder: Arc<FolderPersistence>,
}

impl HydrateRecordsUseCase {
    pub fn new(folder: Arc<FolderPersistence>) -> Self {
        Self { folder }
    }

    /// Returns how many records regained their payload.
    pub async fn execute(&self, library: &mut ImageLibrary) -> Result<usize> {
        if !self.folder.is_active().await {
            return Ok(0);
        }

        let pending = library.dehydrated_backed_records();
        if pending.is_empty() {
            return Ok(0);
        }

        let reads = pending.into_iter().map(|(id, file_name)| {
            let folder = Arc::clone(&self.folder);
            async move { (id, folder.read_image(&file_name).await) }
        });

        let mut hydrated = 0;
        for (id, result) in join_all(reads).await {
            match result {
                Ok(Some(payload)) => {
                    if library.apply_hydrated_payload(&id, payload) {
                        hydrated += 1;
                    }
                }
                Ok(None) => {
                    warn!(image_id = %id, "Backing file missing during hydration");
                }
                Err(err) => {
                    warn!(image_id = %id, error = %err, "Failed to hydrate record");
                }
            }
        }

        Ok(hydrated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use mural_core::ids::ImageId;
    use mural_core::image::{ImageRecord, Provenance};

    async fn active_folder(store: Arc<MemoryFolderStore>) -> Arc<FolderPersistence> {
        let folder = Arc::new(FolderPersistence::new(
            store,
            Arc::new(StaticFolderPicker { choice: None }),
            Arc::new(MemoryBindingRepository::with_binding(test_binding())),
        ));
        folder.restore_binding().await.unwrap();
        folder
    }

    fn dehydrated(id: &str) -> ImageRecord {
        let mut record = ImageRecord::new_user(png_payload(&[9]), Provenance::upload(0));
        record.id = ImageId::from(id);
        record.payload = None;
        record.backing_file_name = Some(format!("{id}.png"));
        record
    }

    #[tokio::test]
    async fn test_hydrates_all_backed_records_in_one_pass() {
        let store = Arc::new(MemoryFolderStore::new());
        for name in ["a", "b"] {
            store
                .files
                .lock()
                .unwrap()
                .insert(format!("{name}.png"), png_payload(name.as_bytes()));
        }
        let folder = active_folder(store).await;

        let mut library = ImageLibrary::new();
        library.add_history_record(dehydrated("a"));
        library.add_history_record(dehydrated("b"));

        let hydrated = HydrateRecordsUseCase::new(folder)
            .execute(&mut library)
            .await
            .unwrap();

        assert_eq!(hydrated, 2);
        assert!(library.table().iter().all(|record| record.has_payload()));
    }

    #[tokio::test]
    async fn test_missing_backing_file_leaves_record_dehydrated() {
        let folder = active_folder(Arc::new(MemoryFolderStore::new())).await;

        let mut library = ImageLibrary::new();
        library.add_history_record(dehydrated("gone"));

        let hydrated = HydrateRecordsUseCase::new(folder)
            .execute(&mut library)
            .await
            .unwrap();

        assert_eq!(hydrated, 0);
        assert!(library
            .table()
            .get(&ImageId::from("gone"))
            .unwrap()
            .payload
            .is_none());
    }

    #[tokio::test]
    async fn test_without_binding_hydration_is_a_no_op() {
        let folder = Arc::new(FolderPersistence::new(
            Arc::new(MemoryFolderStore::new()),
            Arc::new(StaticFolderPicker { choice: None }),
            Arc::new(MemoryBindingRepository::default()),
        ));

        let mut library = ImageLibrary::new();
        library.add_history_record(dehydrated("a"));

        let hydrated = HydrateRecordsUseCase::new(folder)
            .execute(&mut library)
            .await
            .unwrap();
        assert_eq!(hydrated, 0);
    }
}
