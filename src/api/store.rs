//! The record store: the device-local prompt collection.

use crate::core::crypto::{is_sealed, load_or_generate_key, SealedMedium};
use crate::core::filter::GalleryFilter;
use crate::core::storage::{
    AppCtx, Category, FileMedium, NewPrompt, PromptData, StorageMedium,
};
use crate::core::utils::{new_id, now_millis};
use log::{debug, info, warn};
use std::collections::HashSet;

use super::error::StoreError;

/// The main entry point for reading and writing prompts.
///
/// The whole collection is one serialized JSON array held by a
/// [`StorageMedium`]. Every write rewrites the full array, so a
/// [`list_all`](Self::list_all) right after a [`save`](Self::save) sees the
/// new state.
pub struct PromptStore<M: StorageMedium> {
    medium: M,
}

impl PromptStore<Box<dyn StorageMedium>> {
    /// Opens the collection file described by `ctx`, sealed if configured.
    pub fn open(ctx: &AppCtx) -> Result<Self, StoreError> {
        let file = FileMedium::new(&ctx.data_path);
        let medium: Box<dyn StorageMedium> = if ctx.sealed {
            let key = load_or_generate_key(&ctx.key_path)?;
            Box::new(SealedMedium::new(file, &key)?)
        } else {
            Box::new(file)
        };
        info!(
            "opened prompt store (path={}, sealed={})",
            ctx.data_path.display(),
            ctx.sealed
        );
        Ok(Self { medium })
    }
}

impl<M: StorageMedium> PromptStore<M> {
    pub fn new(medium: M) -> Self {
        Self { medium }
    }

    /// Every stored prompt, in stored order. Never fails: an unreadable
    /// medium, a collection that cannot be unsealed, or a corrupted
    /// collection reads as empty.
    pub fn list_all(&self) -> Vec<PromptData> {
        match self.load() {
            Ok(records) => records,
            Err(StoreError::Corrupt(e)) => {
                warn!("stored collection is corrupted, showing an empty gallery: {}", e);
                Vec::new()
            }
            Err(e) => {
                warn!("storage medium unreadable, showing an empty gallery: {}", e);
                Vec::new()
            }
        }
    }

    /// Like [`list_all`](Self::list_all) but reports corruption and medium
    /// failures instead of hiding them.
    pub fn load(&self) -> Result<Vec<PromptData>, StoreError> {
        let raw = match self.medium.read()? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(Vec::new()),
        };
        if is_sealed(&raw) {
            return Err(StoreError::Sealed(
                "collection is sealed but `sealed` is disabled".to_string(),
            ));
        }
        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    /// Insert or replace by `id`.
    ///
    /// A replaced record keeps its position and its original `created_at`;
    /// every other field comes from `record`.
    pub fn save(&self, record: PromptData) -> Result<(), StoreError> {
        let mut records = self.load_for_write()?;
        match records.iter_mut().find(|pd| pd.id == record.id) {
            Some(existing) => {
                debug!("updating prompt (id={})", record.id);
                *existing = PromptData {
                    created_at: existing.created_at,
                    ..record
                };
            }
            None => {
                debug!("appending prompt (id={})", record.id);
                records.push(record);
            }
        }
        self.persist(&records)
    }

    /// Assigns a fresh id and creation time, then saves.
    pub fn create(&self, draft: NewPrompt) -> Result<PromptData, StoreError> {
        let mut records = self.load_for_write()?;
        let taken: HashSet<&str> = records.iter().map(|pd| pd.id.as_str()).collect();
        let mut id = new_id();
        while taken.contains(id.as_str()) {
            id = new_id();
        }

        let pd = PromptData {
            id,
            title: draft.title,
            prompt: draft.prompt,
            image_url: draft.image_url,
            category: draft.category,
            created_at: now_millis(),
        };
        records.push(pd.clone());
        self.persist(&records)?;
        info!("created prompt (id={}, category={})", pd.id, pd.category);
        Ok(pd)
    }

    /// Linear lookup by id.
    pub fn find(&self, id: &str) -> Option<PromptData> {
        self.list_all().into_iter().find(|pd| pd.id == id)
    }

    /// Like [`find`](Self::find) but an unknown id is an error.
    pub fn get(&self, id: &str) -> Result<PromptData, StoreError> {
        self.find(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn search(&self, filter: &GalleryFilter) -> Vec<PromptData> {
        self.list_all()
            .into_iter()
            .filter(|pd| filter.matches(pd))
            .collect()
    }

    /// Removes the prompt with `id`. Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut records = self.load_for_write()?;
        let before = records.len();
        records.retain(|pd| pd.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.persist(&records)?;
        info!("deleted prompt (id={})", id);
        Ok(true)
    }

    /// Prompt count per category, in [`Category::ALL`] order.
    pub fn stats(&self) -> Vec<(Category, usize)> {
        let records = self.list_all();
        Category::ALL
            .into_iter()
            .map(|c| (c, records.iter().filter(|pd| pd.category == c).count()))
            .collect()
    }

    /// Current collection as the base for a write. A corrupted collection is
    /// replaced. An unavailable medium or a collection that cannot be
    /// unsealed aborts the write so nothing is lost.
    fn load_for_write(&self) -> Result<Vec<PromptData>, StoreError> {
        match self.load() {
            Ok(records) => Ok(records),
            Err(StoreError::Corrupt(e)) => {
                warn!("overwriting corrupted collection: {}", e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn persist(&self, records: &[PromptData]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records)?;
        self.medium.write(&raw)?;
        debug!("persisted collection (records={})", records.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryMedium;
    use pretty_assertions::assert_eq;

    fn record(id: &str, title: &str) -> PromptData {
        PromptData {
            id: id.to_string(),
            title: title.to_string(),
            prompt: "a cyberpunk skyline".to_string(),
            image_url: "https://x/img.png".to_string(),
            category: Category::Midjourney,
            created_at: 1_700_000_000,
        }
    }

    fn draft(title: &str) -> NewPrompt {
        NewPrompt {
            title: title.to_string(),
            prompt: "p".to_string(),
            image_url: String::new(),
            category: Category::Seedream,
        }
    }

    #[test]
    fn empty_medium_lists_nothing() {
        let store = PromptStore::new(MemoryMedium::new());
        assert!(store.list_all().is_empty());
        let blank = PromptStore::new(MemoryMedium::with_contents("  "));
        assert!(blank.list_all().is_empty());
    }

    #[test]
    fn save_then_list_reads_back() {
        let store = PromptStore::new(MemoryMedium::new());
        store.save(record("p1", "Neon City")).expect("save");
        assert_eq!(store.list_all(), vec![record("p1", "Neon City")]);
    }

    #[test]
    fn saving_twice_keeps_one_entry() {
        let store = PromptStore::new(MemoryMedium::new());
        store.save(record("x", "A")).expect("save");
        store.save(record("x", "A")).expect("save");
        assert_eq!(store.list_all().len(), 1);
    }

    #[test]
    fn update_replaces_in_place() {
        let store = PromptStore::new(MemoryMedium::new());
        store.save(record("x", "A")).expect("save");
        store.save(record("y", "Other")).expect("save");
        store.save(record("x", "B")).expect("save");

        let all = store.list_all();
        let ids: Vec<&str> = all.iter().map(|pd| pd.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y"]);
        assert_eq!(all[0].title, "B");
    }

    #[test]
    fn update_preserves_created_at() {
        let store = PromptStore::new(MemoryMedium::new());
        store.save(record("x", "A")).expect("save");
        let mut changed = record("x", "B");
        changed.created_at = 42;
        store.save(changed).expect("save");
        assert_eq!(store.find("x").expect("found").created_at, 1_700_000_000);
    }

    #[test]
    fn corrupt_collection_lists_empty_but_load_reports_it() {
        let store = PromptStore::new(MemoryMedium::with_contents("{not json"));
        assert!(store.list_all().is_empty());
        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn save_over_corrupt_collection_starts_fresh() {
        let store = PromptStore::new(MemoryMedium::with_contents("[{\"id\":1}]"));
        store.save(record("p1", "Neon City")).expect("save");
        assert_eq!(store.list_all(), vec![record("p1", "Neon City")]);
    }

    #[test]
    fn unavailable_medium_fails_save_and_lists_empty() {
        let medium = MemoryMedium::new();
        let store = PromptStore::new(&medium);
        store.save(record("p1", "Neon City")).expect("save");

        medium.set_unavailable(true);
        assert!(store.list_all().is_empty());
        assert!(matches!(
            store.save(record("p2", "Lost")),
            Err(StoreError::Unavailable(_))
        ));

        medium.set_unavailable(false);
        assert_eq!(store.list_all(), vec![record("p1", "Neon City")]);
    }

    #[test]
    fn sealed_blob_behind_plain_medium_is_never_overwritten() {
        let blob = format!("{}AAAA", crate::core::crypto::SEALED_PREFIX);
        let medium = MemoryMedium::with_contents(blob.clone());
        let store = PromptStore::new(&medium);

        assert!(store.list_all().is_empty());
        assert!(matches!(store.load(), Err(StoreError::Sealed(_))));
        assert!(matches!(
            store.save(record("p1", "Neon City")),
            Err(StoreError::Sealed(_))
        ));
        assert!(matches!(store.create(draft("New")), Err(StoreError::Sealed(_))));
        assert!(matches!(store.delete("p1"), Err(StoreError::Sealed(_))));
        assert_eq!(medium.contents(), Some(blob));
    }

    #[test]
    fn create_assigns_identity_and_timestamp() {
        let store = PromptStore::new(MemoryMedium::new());
        let before = now_millis();
        let pd = store.create(draft("Fresh")).expect("create");
        assert_eq!(pd.id.len(), 16);
        assert!(pd.created_at >= before);
        assert_eq!(store.find(&pd.id), Some(pd));
    }

    // Each create rewrites the whole collection, so this stays well below
    // the 10,000 ids covered by utils::tests.
    #[test]
    fn created_ids_are_unique() {
        let store = PromptStore::new(MemoryMedium::new());
        for i in 0..200 {
            store.create(draft(&format!("n{}", i))).expect("create");
        }
        let ids: HashSet<String> = store.list_all().into_iter().map(|pd| pd.id).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn legacy_entries_get_default_category() {
        let raw = r#"[{"id":"old","title":"Legacy","prompt":"p","imageUrl":"","createdAt":1}]"#;
        let store = PromptStore::new(MemoryMedium::with_contents(raw));
        assert_eq!(store.get("old").expect("found").category, Category::NanoBanana);
    }

    #[test]
    fn delete_removes_only_the_target() {
        let store = PromptStore::new(MemoryMedium::new());
        store.save(record("a", "A")).expect("save");
        store.save(record("b", "B")).expect("save");
        assert!(store.delete("a").expect("delete"));
        assert!(!store.delete("a").expect("delete"));
        assert_eq!(store.list_all(), vec![record("b", "B")]);
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let store = PromptStore::new(MemoryMedium::new());
        assert!(matches!(store.get("nope"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn stats_count_per_category() {
        let store = PromptStore::new(MemoryMedium::new());
        store.save(record("a", "A")).expect("save");
        store.create(draft("S")).expect("create");
        assert_eq!(
            store.stats(),
            vec![
                (Category::NanoBanana, 0),
                (Category::Midjourney, 1),
                (Category::Seedream, 1),
            ]
        );
    }
}
