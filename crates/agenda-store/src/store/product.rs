//! # Product Store
//!
//! The collection store for the product catalog.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use agenda_core::types::Product;
use agenda_core::validation::ProductDraft;

use crate::collection::{CollectionStore, Record, SearchFilter};
use crate::persistence::KeyValueStore;
use crate::seed;

impl Record for Product {
    const STORAGE_KEY: &'static str = "products-inventory";
    const KIND: &'static str = "product";

    fn id(&self) -> &str {
        &self.id
    }

    /// Searchable fields: code, description, and brand (case-insensitive),
    /// plus price and stock rendered as strings and matched against the raw
    /// term, so "899.99" or "15" find products too.
    fn matches(&self, filter: &SearchFilter) -> bool {
        self.codigo.to_lowercase().contains(filter.lower())
            || self.descripcion.to_lowercase().contains(filter.lower())
            || self.marca.to_lowercase().contains(filter.lower())
            || self.precio().decimal_string().contains(filter.raw())
            || self.stock.to_string().contains(filter.raw())
    }

    fn seed() -> Vec<Self> {
        seed::seed_products()
    }
}

/// Store for the product catalog collection.
pub struct ProductStore {
    inner: CollectionStore<Product>,
}

impl ProductStore {
    /// Loads products from persistence (seeding on first run).
    pub fn load(persistence: Arc<dyn KeyValueStore>) -> Self {
        ProductStore {
            inner: CollectionStore::load(persistence),
        }
    }

    /// All products, newest first.
    pub fn all(&self) -> &[Product] {
        self.inner.all()
    }

    /// Looks a product up by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.inner.get(id)
    }

    /// Creates a product from a validated draft and persists the
    /// collection.
    pub fn create(&mut self, draft: ProductDraft) -> Product {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            codigo: draft.codigo,
            descripcion: draft.descripcion,
            marca: draft.marca,
            precio_cents: draft.precio.cents(),
            costo_cents: draft.costo.cents(),
            stock: draft.stock,
            created_at: now,
            updated_at: now,
        };
        debug!(id = %product.id, codigo = %product.codigo, "product created");
        self.inner.insert(product).clone()
    }

    /// Replaces the mutable fields of an existing product. Identity and
    /// `created_at` are preserved; `updated_at` is refreshed. `None` when
    /// the id is unknown.
    ///
    /// Changing `precio` here never touches historical purchases: their
    /// line items carry frozen unit prices.
    pub fn update(&mut self, id: &str, draft: ProductDraft) -> Option<Product> {
        let updated = self.inner.update_with(id, |product| {
            product.codigo = draft.codigo;
            product.descripcion = draft.descripcion;
            product.marca = draft.marca;
            product.precio_cents = draft.precio.cents();
            product.costo_cents = draft.costo.cents();
            product.stock = draft.stock;
            product.updated_at = Utc::now();
        });
        if updated.is_some() {
            debug!(id, "product updated");
        }
        updated
    }

    /// Deletes a product. Returns `false` for a stale id.
    ///
    /// Purchases referencing this product keep their dangling id; display
    /// logic resolves it to a "not found" placeholder.
    pub fn delete(&mut self, id: &str) -> bool {
        let deleted = self.inner.delete(id);
        debug!(id, deleted, "product delete");
        deleted
    }

    /// Substring search across code, description, brand, price, and stock.
    pub fn search(&self, term: &str) -> Vec<Product> {
        self.inner.search(term)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
