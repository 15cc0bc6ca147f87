//! # Purchase Store
//!
//! The collection store for purchases, plus the detail view that resolves
//! a purchase's references against the other collections.
//!
//! ## Create/Update Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Purchase Persistence Flow                            │
//! │                                                                         │
//! │  PurchaseDraft (validated form)      Product catalog                    │
//! │         │                                  │                            │
//! │         └──────────────┬───────────────────┘                            │
//! │                        ▼                                                │
//! │        compute_items + compute_totals  (agenda-core)                    │
//! │                        │                                                │
//! │                        ▼                                                │
//! │        Purchase record: frozen prices, derived totals,                  │
//! │        status Pending on create / preserved on update                   │
//! │                        │                                                │
//! │                        ▼                                                │
//! │        prepend to collection, persist whole blob                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Editing a purchase re-runs the computation against the catalog as it is
//! *now*; purchases that are never edited keep their original prices
//! forever.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use agenda_core::compute::{compute_items, compute_totals};
use agenda_core::types::{Contact, Product, Purchase, PurchaseItem, PurchaseStatus};
use agenda_core::validation::PurchaseDraft;

use crate::collection::{CollectionStore, Record, SearchFilter};
use crate::persistence::KeyValueStore;
use crate::seed;

impl Record for Purchase {
    const STORAGE_KEY: &'static str = "purchases-management";
    const KIND: &'static str = "purchase";

    fn id(&self) -> &str {
        &self.id
    }

    /// Searchable fields: id, status, and notes (case-insensitive), plus
    /// the total rendered as a decimal string matched against the raw term.
    fn matches(&self, filter: &SearchFilter) -> bool {
        self.id.to_lowercase().contains(filter.lower())
            || self.total().decimal_string().contains(filter.raw())
            || self.status.as_str().contains(filter.lower())
            || self
                .notes
                .as_ref()
                .is_some_and(|notes| notes.to_lowercase().contains(filter.lower()))
    }

    fn seed() -> Vec<Self> {
        seed::seed_purchases()
    }
}

/// Store for the purchases collection.
pub struct PurchaseStore {
    inner: CollectionStore<Purchase>,
}

impl PurchaseStore {
    /// Loads purchases from persistence (seeding on first run).
    pub fn load(persistence: Arc<dyn KeyValueStore>) -> Self {
        PurchaseStore {
            inner: CollectionStore::load(persistence),
        }
    }

    /// All purchases, newest first.
    pub fn all(&self) -> &[Purchase] {
        self.inner.all()
    }

    /// Looks a purchase up by id.
    pub fn get(&self, id: &str) -> Option<&Purchase> {
        self.inner.get(id)
    }

    /// Creates a purchase from a validated draft.
    ///
    /// Line items are priced from the supplied catalog (freezing unit
    /// prices) and totals derived from them; status starts at `Pending`.
    pub fn create(&mut self, draft: PurchaseDraft, catalog: &[Product]) -> Purchase {
        let items = compute_items(&draft.items, catalog);
        let totals = compute_totals(&items);
        let now = Utc::now();

        let purchase = Purchase {
            id: Uuid::new_v4().to_string(),
            customer_contact_id: draft.customer_contact_id,
            items,
            subtotal_cents: totals.subtotal_cents,
            tax_cents: totals.tax_cents,
            total_cents: totals.total_cents,
            status: PurchaseStatus::default(),
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        };
        debug!(
            id = %purchase.id,
            total_cents = purchase.total_cents,
            items = purchase.items.len(),
            "purchase created"
        );
        self.inner.insert(purchase).clone()
    }

    /// Re-submits an edited purchase: items and totals are recomputed from
    /// the current catalog, customer and notes replaced. Identity,
    /// `created_at`, and status are preserved; `updated_at` is refreshed.
    /// `None` when the id is unknown.
    pub fn update(
        &mut self,
        id: &str,
        draft: PurchaseDraft,
        catalog: &[Product],
    ) -> Option<Purchase> {
        let items = compute_items(&draft.items, catalog);
        let totals = compute_totals(&items);

        let updated = self.inner.update_with(id, |purchase| {
            purchase.customer_contact_id = draft.customer_contact_id;
            purchase.items = items;
            purchase.subtotal_cents = totals.subtotal_cents;
            purchase.tax_cents = totals.tax_cents;
            purchase.total_cents = totals.total_cents;
            purchase.notes = draft.notes;
            purchase.updated_at = Utc::now();
        });
        if updated.is_some() {
            debug!(id, total_cents = totals.total_cents, "purchase updated");
        }
        updated
    }

    /// Sets the status of a purchase (the only status mutation after
    /// creation). Returns whether the purchase existed.
    pub fn update_status(&mut self, id: &str, status: PurchaseStatus) -> bool {
        let updated = self
            .inner
            .update_with(id, |purchase| {
                purchase.status = status;
                purchase.updated_at = Utc::now();
            })
            .is_some();
        debug!(id, status = status.as_str(), updated, "purchase status change");
        updated
    }

    /// Deletes a purchase. Returns `false` for a stale id.
    pub fn delete(&mut self, id: &str) -> bool {
        let deleted = self.inner.delete(id);
        debug!(id, deleted, "purchase delete");
        deleted
    }

    /// Substring search across id, total, status, and notes.
    pub fn search(&self, term: &str) -> Vec<Purchase> {
        self.inner.search(term)
    }
}

// =============================================================================
// Detail View
// =============================================================================

/// One line item with its product resolved (or not: a deleted product
/// leaves `None`, which the UI renders as a "product not found"
/// placeholder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItemDetails {
    pub item: PurchaseItem,
    pub product: Option<Product>,
}

/// A purchase with its references resolved against the current contact and
/// product collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDetails {
    pub purchase: Purchase,
    /// The customer, or `None` if the contact was deleted after the
    /// purchase was recorded.
    pub customer: Option<Contact>,
    pub items: Vec<PurchaseItemDetails>,
}

/// Resolves a purchase's customer and product references.
///
/// Lookups that fail produce `None` placeholders instead of errors;
/// referential integrity is not enforced across collections.
pub fn purchase_details(
    purchase: &Purchase,
    contacts: &[Contact],
    products: &[Product],
) -> PurchaseDetails {
    let customer = contacts
        .iter()
        .find(|contact| contact.id == purchase.customer_contact_id)
        .cloned();

    let items = purchase
        .items
        .iter()
        .map(|item| PurchaseItemDetails {
            item: item.clone(),
            product: products
                .iter()
                .find(|product| product.id == item.product_id)
                .cloned(),
        })
        .collect();

    PurchaseDetails {
        purchase: purchase.clone(),
        customer,
        items,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
