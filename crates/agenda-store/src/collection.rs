//! # Generic Collection Store
//!
//! One `CollectionStore<R>` instance owns the authoritative in-memory list
//! for one entity type and keeps it synchronized with a persistence blob.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Collection Store Lifecycle                           │
//! │                                                                         │
//! │  load(persistence)                                                      │
//! │    ├── blob present + parseable ──► use stored records                  │
//! │    ├── blob absent ───────────────► use seed records                    │
//! │    └── blob unreadable/corrupt ───► warn + use seed records             │
//! │                                     (silent recovery, never an error)   │
//! │                                                                         │
//! │  insert / update_with / delete                                          │
//! │    └── mutate the in-memory list, then persist() the WHOLE list         │
//! │                                                                         │
//! │  persist()                                                              │
//! │    ├── list empty ──► skip the write (load-race guard: an empty         │
//! │    │                  list must never clobber saved data)               │
//! │    └── otherwise ───► serialize all records, set(STORAGE_KEY, blob);    │
//! │                       failures are logged and swallowed                 │
//! │                                                                         │
//! │  search(term)                                                           │
//! │    └── derived view, recomputed per call, never persisted               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation is a total function over the in-memory state: nothing
//! here returns a persistence error to the caller.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::persistence::KeyValueStore;

// =============================================================================
// Search Filter
// =============================================================================

/// A search term prepared for matching: the raw text (used against fields
/// like phone numbers and prices, where case is meaningless) and its
/// lowercase form (used against text fields).
#[derive(Debug, Clone)]
pub struct SearchFilter {
    raw: String,
    lower: String,
}

impl SearchFilter {
    /// Prepares a filter from the raw search box contents.
    pub fn new(term: &str) -> Self {
        SearchFilter {
            raw: term.to_string(),
            lower: term.to_lowercase(),
        }
    }

    /// An empty term matches everything.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The term exactly as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The lowercased term.
    pub fn lower(&self) -> &str {
        &self.lower
    }
}

// =============================================================================
// Record Trait
// =============================================================================

/// The per-entity seam of the generic store: each entity type declares its
/// storage key, its searchable fields, and its first-run seed data.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Fixed persistence key for this collection's blob.
    const STORAGE_KEY: &'static str;

    /// Entity name used in log lines ("contact", "product", "purchase").
    const KIND: &'static str;

    /// The record's unique identifier.
    fn id(&self) -> &str;

    /// Case-insensitive substring match over this entity's fixed field set.
    fn matches(&self, filter: &SearchFilter) -> bool;

    /// Example records used when no persisted collection exists yet.
    fn seed() -> Vec<Self>;
}

// =============================================================================
// Collection Store
// =============================================================================

/// In-memory list + persistence synchronization for one entity type.
///
/// Records are kept newest-first: `insert` prepends.
pub struct CollectionStore<R: Record> {
    records: Vec<R>,
    persistence: Arc<dyn KeyValueStore>,
}

impl<R: Record> CollectionStore<R> {
    /// Loads the collection from persistence, falling back to seed data.
    ///
    /// Load failure is recovered locally: the store always comes up usable.
    pub fn load(persistence: Arc<dyn KeyValueStore>) -> Self {
        let records = match persistence.get(R::STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<R>>(&raw) {
                Ok(records) => {
                    debug!(kind = R::KIND, count = records.len(), "collection loaded");
                    records
                }
                Err(err) => {
                    warn!(
                        kind = R::KIND,
                        error = %err,
                        "stored blob is unparseable, seeding example data"
                    );
                    R::seed()
                }
            },
            Ok(None) => {
                debug!(kind = R::KIND, "no stored blob, seeding example data");
                R::seed()
            }
            Err(err) => {
                warn!(
                    kind = R::KIND,
                    error = %err,
                    "persistence read failed, seeding example data"
                );
                R::seed()
            }
        };

        CollectionStore {
            records,
            persistence,
        }
    }

    /// All records, newest first.
    pub fn all(&self) -> &[R] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks a record up by id.
    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Prepends a new record and persists the collection.
    pub fn insert(&mut self, record: R) -> &R {
        self.records.insert(0, record);
        self.persist();
        &self.records[0]
    }

    /// Applies `apply` to the record with the given id, persists, and
    /// returns the updated record. `None` when the id is unknown (a stale
    /// id is a graceful no-op, not an error).
    pub fn update_with(&mut self, id: &str, apply: impl FnOnce(&mut R)) -> Option<R> {
        let record = self.records.iter_mut().find(|record| record.id() == id)?;
        apply(record);
        let updated = record.clone();
        self.persist();
        Some(updated)
    }

    /// Removes the record with the given id. Returns whether anything was
    /// deleted; a stale id returns `false`.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        if self.records.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Case-insensitive substring search over the entity's field set.
    ///
    /// An empty term returns the full list unfiltered. The result is a
    /// derived view, recomputed on every call and never persisted.
    pub fn search(&self, term: &str) -> Vec<R> {
        let filter = SearchFilter::new(term);
        if filter.is_empty() {
            return self.records.clone();
        }
        self.records
            .iter()
            .filter(|record| record.matches(&filter))
            .cloned()
            .collect()
    }

    /// Writes the whole collection back to persistence.
    ///
    /// Skipped while the collection is empty so a not-yet-loaded or
    /// fully-emptied list never clobbers saved data. Write failures are
    /// logged; in-memory state remains the source of truth.
    fn persist(&self) {
        if self.records.is_empty() {
            debug!(kind = R::KIND, "collection empty, skipping persistence write");
            return;
        }

        let raw = match serde_json::to_string(&self.records) {
            Ok(raw) => raw,
            Err(err) => {
                error!(kind = R::KIND, error = %err, "collection serialization failed");
                return;
            }
        };

        if let Err(err) = self.persistence.set(R::STORAGE_KEY, &raw) {
            error!(
                kind = R::KIND,
                error = %err,
                "persistence write failed, keeping in-memory state"
            );
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        body: String,
    }

    impl Record for Note {
        const STORAGE_KEY: &'static str = "notes-test";
        const KIND: &'static str = "note";

        fn id(&self) -> &str {
            &self.id
        }

        fn matches(&self, filter: &SearchFilter) -> bool {
            self.body.to_lowercase().contains(filter.lower())
        }

        fn seed() -> Vec<Self> {
            vec![Note {
                id: "seed-1".to_string(),
                body: "seeded".to_string(),
            }]
        }
    }

    fn note(id: &str, body: &str) -> Note {
        Note {
            id: id.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_load_seeds_when_blob_absent() {
        let store = CollectionStore::<Note>::load(Arc::new(MemoryStore::new()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].id, "seed-1");
    }

    #[test]
    fn test_load_seeds_when_blob_corrupt() {
        let persistence = Arc::new(MemoryStore::new());
        persistence.set("notes-test", "{not json[").unwrap();

        let store = CollectionStore::<Note>::load(persistence);
        assert_eq!(store.all()[0].id, "seed-1");
    }

    #[test]
    fn test_load_reads_persisted_blob() {
        let persistence = Arc::new(MemoryStore::new());
        persistence
            .set("notes-test", r#"[{"id":"a","body":"hello"}]"#)
            .unwrap();

        let store = CollectionStore::<Note>::load(persistence);
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].body, "hello");
    }

    #[test]
    fn test_insert_prepends_and_persists() {
        let persistence: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut store = CollectionStore::<Note>::load(Arc::clone(&persistence));

        store.insert(note("a", "first"));
        store.insert(note("b", "second"));

        assert_eq!(store.all()[0].id, "b");
        assert_eq!(store.all()[1].id, "a");

        // The whole collection landed in persistence
        let blob = persistence.get("notes-test").unwrap().unwrap();
        let stored: Vec<Note> = serde_json::from_str(&blob).unwrap();
        assert_eq!(stored.len(), 3); // two inserts + the seed record
    }

    #[test]
    fn test_persistence_roundtrip_is_field_for_field_equal() {
        let persistence: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut store = CollectionStore::<Note>::load(Arc::clone(&persistence));
        store.insert(note("a", "hello"));
        let expected = store.all().to_vec();

        let reloaded = CollectionStore::<Note>::load(persistence);
        assert_eq!(reloaded.all(), expected.as_slice());
    }

    #[test]
    fn test_update_with_unknown_id_is_noop() {
        let mut store = CollectionStore::<Note>::load(Arc::new(MemoryStore::new()));
        assert!(store.update_with("ghost", |n| n.body.clear()).is_none());
    }

    #[test]
    fn test_delete_then_search_never_returns_record() {
        let mut store = CollectionStore::<Note>::load(Arc::new(MemoryStore::new()));
        store.insert(note("a", "findable"));

        assert!(store.delete("a"));
        assert!(!store.delete("a"));
        assert!(store.search("findable").is_empty());
        assert!(store.search("").iter().all(|n| n.id != "a"));
    }

    #[test]
    fn test_empty_collection_skips_persistence_write() {
        let persistence: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        persistence
            .set("notes-test", r#"[{"id":"a","body":"keep me"}]"#)
            .unwrap();

        let mut store = CollectionStore::<Note>::load(Arc::clone(&persistence));
        assert!(store.delete("a"));
        assert!(store.is_empty());

        // Deleting the last record empties the collection; the write is
        // skipped, so the previous blob survives
        let blob = persistence.get("notes-test").unwrap().unwrap();
        assert!(blob.contains("keep me"));
    }

    #[test]
    fn test_search_empty_term_returns_everything() {
        let mut store = CollectionStore::<Note>::load(Arc::new(MemoryStore::new()));
        store.insert(note("a", "Alpha"));
        store.insert(note("b", "Beta"));

        assert_eq!(store.search("").len(), 3);
        assert_eq!(store.search("ALPHA").len(), 1);
        assert_eq!(store.search("zzz").len(), 0);
    }
}
