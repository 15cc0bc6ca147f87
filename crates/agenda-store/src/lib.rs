//! # agenda-store: Collection Store Layer for Agenda Gestión
//!
//! This crate owns the authoritative in-memory collections and keeps each
//! one synchronized with an injected key-value persistence service.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Agenda Gestión Data Flow                            │
//! │                                                                         │
//! │  Backoffice command (create_purchase)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    agenda-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌──────────────────┐   ┌──────────────┐  │   │
//! │  │   │ persistence  │   │  CollectionStore │   │    seed      │  │   │
//! │  │   │ KeyValueStore│◄──│  ContactStore    │   │  first-run   │  │   │
//! │  │   │ Memory/File  │   │  ProductStore    │──►│  examples    │  │   │
//! │  │   │              │   │  PurchaseStore   │   │              │  │   │
//! │  │   └──────────────┘   └──────────────────┘   └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  One JSON blob per collection:                                          │
//! │    contacts-agenda.json · products-inventory.json ·                     │
//! │    purchases-management.json                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`persistence`] - The injected key-value boundary and its backends
//! - [`collection`] - Generic store: load/seed, CRUD, search, persist policy
//! - [`store`] - Per-entity stores (contacts, products, purchases)
//! - [`seed`] - First-run example records
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use agenda_store::{MemoryStore, Stores};
//!
//! let stores = Stores::load(Arc::new(MemoryStore::new()));
//! assert!(!stores.products.all().is_empty()); // seeded on first run
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod collection;
pub mod persistence;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use collection::{CollectionStore, Record, SearchFilter};
pub use persistence::{FileStore, KeyValueStore, MemoryStore, PersistenceError};
pub use store::{purchase_details, ContactStore, ProductStore, PurchaseDetails, PurchaseStore};

use std::sync::Arc;

use tracing::info;

/// All three collection stores, loaded from one persistence backend.
///
/// Convenience for the application shell; the stores stay independent and
/// each one persists its own blob.
pub struct Stores {
    pub contacts: ContactStore,
    pub products: ProductStore,
    pub purchases: PurchaseStore,
}

impl Stores {
    /// Loads every collection (seeding those never persisted).
    pub fn load(persistence: Arc<dyn KeyValueStore>) -> Self {
        let contacts = ContactStore::load(Arc::clone(&persistence));
        let products = ProductStore::load(Arc::clone(&persistence));
        let purchases = PurchaseStore::load(persistence);

        info!(
            contacts = contacts.all().len(),
            products = products.all().len(),
            purchases = purchases.all().len(),
            "collections loaded"
        );

        Stores {
            contacts,
            products,
            purchases,
        }
    }
}
