//! # Contact Store
//!
//! The collection store for customer contacts.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use agenda_core::types::Contact;
use agenda_core::validation::ContactDraft;

use crate::collection::{CollectionStore, Record, SearchFilter};
use crate::persistence::KeyValueStore;
use crate::seed;

impl Record for Contact {
    const STORAGE_KEY: &'static str = "contacts-agenda";
    const KIND: &'static str = "contact";

    fn id(&self) -> &str {
        &self.id
    }

    /// Searchable fields: name parts, email, and company (case-insensitive),
    /// plus the phone number matched against the raw term.
    fn matches(&self, filter: &SearchFilter) -> bool {
        self.first_name.to_lowercase().contains(filter.lower())
            || self.last_name.to_lowercase().contains(filter.lower())
            || self.email.to_lowercase().contains(filter.lower())
            || self.phone.contains(filter.raw())
            || self
                .company
                .as_ref()
                .is_some_and(|company| company.to_lowercase().contains(filter.lower()))
    }

    fn seed() -> Vec<Self> {
        seed::seed_contacts()
    }
}

/// Store for the contacts collection.
pub struct ContactStore {
    inner: CollectionStore<Contact>,
}

impl ContactStore {
    /// Loads contacts from persistence (seeding on first run).
    pub fn load(persistence: Arc<dyn KeyValueStore>) -> Self {
        ContactStore {
            inner: CollectionStore::load(persistence),
        }
    }

    /// All contacts, newest first.
    pub fn all(&self) -> &[Contact] {
        self.inner.all()
    }

    /// Looks a contact up by id.
    pub fn get(&self, id: &str) -> Option<&Contact> {
        self.inner.get(id)
    }

    /// Creates a contact from a validated draft and persists the collection.
    pub fn create(&mut self, draft: ContactDraft) -> Contact {
        let now = Utc::now();
        let contact = Contact {
            id: Uuid::new_v4().to_string(),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            company: draft.company,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        };
        debug!(id = %contact.id, "contact created");
        self.inner.insert(contact).clone()
    }

    /// Replaces the mutable fields of an existing contact. Identity and
    /// `created_at` are preserved; `updated_at` is refreshed. `None` when
    /// the id is unknown.
    pub fn update(&mut self, id: &str, draft: ContactDraft) -> Option<Contact> {
        let updated = self.inner.update_with(id, |contact| {
            contact.first_name = draft.first_name;
            contact.last_name = draft.last_name;
            contact.email = draft.email;
            contact.phone = draft.phone;
            contact.company = draft.company;
            contact.notes = draft.notes;
            contact.updated_at = Utc::now();
        });
        if updated.is_some() {
            debug!(id, "contact updated");
        }
        updated
    }

    /// Deletes a contact. Returns `false` for a stale id.
    ///
    /// Purchases referencing this contact keep their dangling id; display
    /// logic resolves it to a "not found" placeholder.
    pub fn delete(&mut self, id: &str) -> bool {
        let deleted = self.inner.delete(id);
        debug!(id, deleted, "contact delete");
        deleted
    }

    /// Substring search across name, email, phone, and company.
    pub fn search(&self, term: &str) -> Vec<Contact> {
        self.inner.search(term)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
