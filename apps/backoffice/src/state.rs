//! # State Module
//!
//! Shared store state for the backoffice commands.
//!
//! ## Why One Focused State Per Store?
//! Instead of a single `AppState` struct containing everything, each
//! collection store gets its own state wrapper:
//!
//! 1. **Clearer Command Signatures**: Commands declare exactly which
//!    collections they touch
//! 2. **Reduced Contention**: Searching products never blocks a contact
//!    mutation
//! 3. **Easier Testing**: A test wires up only the states its command needs
//!
//! ## Thread Safety
//! `Arc<Mutex<S>>` because the frontend host may invoke commands from
//! multiple threads while each store mutation must be exclusive. All
//! operations are quick, synchronous list work; a `RwLock` would add
//! complexity with minimal benefit.

use std::sync::{Arc, Mutex};

use agenda_store::{ContactStore, ProductStore, PurchaseStore, Stores};

/// Shared handle to one collection store.
#[derive(Debug)]
pub struct StoreState<S> {
    inner: Arc<Mutex<S>>,
}

// Manual Clone: `S` itself need not be Clone, only the Arc is cloned.
impl<S> Clone for StoreState<S> {
    fn clone(&self) -> Self {
        StoreState {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> StoreState<S> {
    /// Wraps a loaded store.
    pub fn new(store: S) -> Self {
        StoreState {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let catalog = products.with(|store| store.all().to_vec());
    /// ```
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&S) -> R,
    {
        let store = self.inner.lock().expect("store mutex poisoned");
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let created = contacts.with_mut(|store| store.create(draft));
    /// ```
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut S) -> R,
    {
        let mut store = self.inner.lock().expect("store mutex poisoned");
        f(&mut store)
    }
}

/// Shared contact collection.
pub type ContactsState = StoreState<ContactStore>;

/// Shared product catalog.
pub type ProductsState = StoreState<ProductStore>;

/// Shared purchase collection.
pub type PurchasesState = StoreState<PurchaseStore>;

/// Splits loaded stores into the per-collection states the commands take.
pub fn into_states(stores: Stores) -> (ContactsState, ProductsState, PurchasesState) {
    (
        StoreState::new(stores.contacts),
        StoreState::new(stores.products),
        StoreState::new(stores.purchases),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_store::MemoryStore;
    use std::sync::Arc as StdArc;

    #[test]
    fn test_states_share_one_underlying_store() {
        let stores = Stores::load(StdArc::new(MemoryStore::new()));
        let (contacts, _products, _purchases) = into_states(stores);

        let clone = contacts.clone();
        let seen_by_clone = clone.with(|store| store.all().len());
        let seen_directly = contacts.with(|store| store.all().len());
        assert_eq!(seen_by_clone, seen_directly);
    }
}
