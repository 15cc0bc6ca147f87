//! # Entity Stores
//!
//! Per-entity façades over the generic [`CollectionStore`]. Each store owns
//! the typed create/update operations for its entity and the `Record`
//! implementation that declares storage key, searchable fields, and seed
//! data.
//!
//! [`CollectionStore`]: crate::collection::CollectionStore

mod contact;
mod product;
mod purchase;

pub use contact::ContactStore;
pub use product::ProductStore;
pub use purchase::{purchase_details, PurchaseDetails, PurchaseItemDetails, PurchaseStore};
