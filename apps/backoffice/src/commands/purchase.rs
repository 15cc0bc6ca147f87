//! # Purchase Commands
//!
//! Commands for purchase search, submission, status changes, the detail
//! view, and the live totals preview.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create_purchase / update_purchase                    │
//! │                                                                         │
//! │  PurchaseFormData (raw text from the form)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_purchase ── Err(FieldErrors) ──► ApiError, nothing persisted  │
//! │       │ Ok(draft)                                                       │
//! │       ▼                                                                 │
//! │  simulated submission delay (disabled submit button feedback)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  snapshot catalog ──► PurchaseStore::create/update                      │
//! │  (compute_items + compute_totals inside the store)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use agenda_core::compute::{preview_totals, PurchaseTotals};
use agenda_core::types::{Purchase, PurchaseFormData, PurchaseItem, PurchaseItemForm, PurchaseStatus};
use agenda_core::validation::validate_purchase;
use agenda_store::purchase_details;

use crate::commands::contact::ContactDto;
use crate::commands::product::ProductDto;
use crate::commands::simulate_submit_delay;
use crate::error::ApiError;
use crate::state::{ContactsState, ProductsState, PurchasesState};

// =============================================================================
// DTOs
// =============================================================================

/// Line item DTO: the frozen snapshot exactly as persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItemDto {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub subtotal_cents: i64,
}

impl From<PurchaseItem> for PurchaseItemDto {
    fn from(item: PurchaseItem) -> Self {
        PurchaseItemDto {
            id: item.id,
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price_cents: item.unit_price_cents,
            subtotal_cents: item.subtotal_cents,
        }
    }
}

/// Purchase DTO for lists and submission responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDto {
    pub id: String,
    pub customer_contact_id: String,
    pub items: Vec<PurchaseItemDto>,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub status: PurchaseStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Purchase> for PurchaseDto {
    fn from(purchase: Purchase) -> Self {
        PurchaseDto {
            id: purchase.id,
            customer_contact_id: purchase.customer_contact_id,
            items: purchase.items.into_iter().map(PurchaseItemDto::from).collect(),
            subtotal_cents: purchase.subtotal_cents,
            tax_cents: purchase.tax_cents,
            total_cents: purchase.total_cents,
            status: purchase.status,
            notes: purchase.notes,
            created_at: purchase.created_at,
            updated_at: purchase.updated_at,
        }
    }
}

/// One detail-view line: the frozen item plus its product, if it still
/// exists. A `None` product renders as a "product not found" placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLineDto {
    pub item: PurchaseItemDto,
    pub product: Option<ProductDto>,
}

/// Detail view of a purchase with references resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDetailsDto {
    pub purchase: PurchaseDto,
    /// The customer, or `None` when the contact was deleted.
    pub customer: Option<ContactDto>,
    pub items: Vec<PurchaseLineDto>,
}

// =============================================================================
// Commands
// =============================================================================

/// Searches purchases by id, total, status, or notes.
pub async fn search_purchases(purchases: &PurchasesState, query: &str) -> Vec<PurchaseDto> {
    debug!(query, "search_purchases command");
    purchases.with(|store| {
        store
            .search(query)
            .into_iter()
            .map(PurchaseDto::from)
            .collect()
    })
}

/// Gets a single purchase by id.
pub async fn get_purchase(purchases: &PurchasesState, id: &str) -> Result<PurchaseDto, ApiError> {
    debug!(id, "get_purchase command");
    purchases.with(|store| {
        store
            .get(id)
            .cloned()
            .map(PurchaseDto::from)
            .ok_or_else(|| ApiError::not_found("Purchase", id))
    })
}

/// Validates and creates a purchase.
///
/// Unit prices are frozen from the catalog as it is at this moment; the
/// purchase starts in `Pending` status.
pub async fn create_purchase(
    purchases: &PurchasesState,
    products: &ProductsState,
    form: PurchaseFormData,
) -> Result<PurchaseDto, ApiError> {
    debug!("create_purchase command");

    let draft = validate_purchase(&form)?;
    simulate_submit_delay().await;

    let catalog = products.with(|store| store.all().to_vec());
    let created = purchases.with_mut(|store| store.create(draft, &catalog));
    info!(
        id = %created.id,
        total_cents = created.total_cents,
        items = created.items.len(),
        "purchase created"
    );
    Ok(PurchaseDto::from(created))
}

/// Validates and re-submits an edited purchase. Items and totals are
/// recomputed from the current catalog; status is preserved.
pub async fn update_purchase(
    purchases: &PurchasesState,
    products: &ProductsState,
    id: &str,
    form: PurchaseFormData,
) -> Result<PurchaseDto, ApiError> {
    debug!(id, "update_purchase command");

    let draft = validate_purchase(&form)?;
    simulate_submit_delay().await;

    let catalog = products.with(|store| store.all().to_vec());
    let updated = purchases
        .with_mut(|store| store.update(id, draft, &catalog))
        .ok_or_else(|| ApiError::not_found("Purchase", id))?;
    info!(id, total_cents = updated.total_cents, "purchase updated");
    Ok(PurchaseDto::from(updated))
}

/// Sets a purchase's status. Returns whether the purchase existed.
pub async fn update_purchase_status(
    purchases: &PurchasesState,
    id: &str,
    status: PurchaseStatus,
) -> bool {
    debug!(id, status = status.as_str(), "update_purchase_status command");
    let updated = purchases.with_mut(|store| store.update_status(id, status));
    if updated {
        info!(id, status = status.as_str(), "purchase status updated");
    }
    updated
}

/// Deletes a purchase. Returns whether anything was deleted.
pub async fn delete_purchase(purchases: &PurchasesState, id: &str) -> bool {
    debug!(id, "delete_purchase command");
    let deleted = purchases.with_mut(|store| store.delete(id));
    if deleted {
        info!(id, "purchase deleted");
    }
    deleted
}

/// Builds the detail view of a purchase, resolving the customer and each
/// line's product against the current collections. Dangling references
/// come back as `None` placeholders, never errors.
pub async fn get_purchase_details(
    purchases: &PurchasesState,
    contacts: &ContactsState,
    products: &ProductsState,
    id: &str,
) -> Result<PurchaseDetailsDto, ApiError> {
    debug!(id, "get_purchase_details command");

    let purchase = purchases
        .with(|store| store.get(id).cloned())
        .ok_or_else(|| ApiError::not_found("Purchase", id))?;
    let contact_list = contacts.with(|store| store.all().to_vec());
    let catalog = products.with(|store| store.all().to_vec());

    let details = purchase_details(&purchase, &contact_list, &catalog);
    Ok(PurchaseDetailsDto {
        purchase: PurchaseDto::from(details.purchase),
        customer: details.customer.map(ContactDto::from),
        items: details
            .items
            .into_iter()
            .map(|line| PurchaseLineDto {
                item: PurchaseItemDto::from(line.item),
                product: line.product.map(ProductDto::from),
            })
            .collect(),
    })
}

/// Live totals for the open purchase form. Lenient: half-edited rows count
/// as zero so the summary never errors mid-keystroke.
pub async fn preview_purchase_totals(
    products: &ProductsState,
    rows: &[PurchaseItemForm],
) -> PurchaseTotals {
    let catalog = products.with(|store| store.all().to_vec());
    preview_totals(rows, &catalog)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::product::{create_product, delete_product};
    use crate::error::ErrorCode;
    use crate::state::StoreState;
    use agenda_core::types::ProductFormData;
    use agenda_store::{MemoryStore, Stores};
    use std::sync::Arc;

    fn states() -> (ContactsState, ProductsState, PurchasesState) {
        crate::state::into_states(Stores::load(Arc::new(MemoryStore::new())))
    }

    fn item(product_id: &str, quantity: &str) -> PurchaseItemForm {
        PurchaseItemForm {
            product_id: product_id.to_string(),
            quantity: quantity.to_string(),
        }
    }

    fn form(customer: &str, items: Vec<PurchaseItemForm>) -> PurchaseFormData {
        PurchaseFormData {
            customer_contact_id: customer.to_string(),
            items,
            notes: String::new(),
        }
    }

    async fn product_at_100(products: &ProductsState) -> String {
        create_product(
            products,
            ProductFormData {
                codigo: "P1".into(),
                descripcion: "Producto de prueba".into(),
                marca: "Prueba".into(),
                precio: "100.00".into(),
                costo: "60.00".into(),
                stock: "10".into(),
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_create_purchase_computes_totals() {
        let (_contacts, products, purchases) = states();
        let product_id = product_at_100(&products).await;

        // 2 × 100.00 → subtotal 200.00, tax 42.00, total 242.00
        let created = create_purchase(
            &purchases,
            &products,
            form("1", vec![item(&product_id, "2")]),
        )
        .await
        .unwrap();

        assert_eq!(created.subtotal_cents, 20000);
        assert_eq!(created.tax_cents, 4200);
        assert_eq!(created.total_cents, 24200);
        assert_eq!(created.status, PurchaseStatus::Pending);
        assert_eq!(created.items[0].unit_price_cents, 10000);
    }

    #[tokio::test]
    async fn test_duplicate_product_blocks_submission() {
        let (_contacts, products, purchases) = states();
        let product_id = product_at_100(&products).await;
        let before = search_purchases(&purchases, "").await.len();

        let err = create_purchase(
            &purchases,
            &products,
            form("1", vec![item(&product_id, "1"), item(&product_id, "3")]),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.fields.unwrap().contains_key("items"));
        assert_eq!(search_purchases(&purchases, "").await.len(), before);
    }

    #[tokio::test]
    async fn test_blank_items_block_submission() {
        let (_contacts, products, purchases) = states();
        let before = search_purchases(&purchases, "").await.len();

        let err = create_purchase(&purchases, &products, form("1", vec![item("", "")]))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(search_purchases(&purchases, "").await.len(), before);
    }

    #[tokio::test]
    async fn test_status_update_and_stale_ids() {
        let (_contacts, products, purchases) = states();
        let product_id = product_at_100(&products).await;

        let created = create_purchase(
            &purchases,
            &products,
            form("1", vec![item(&product_id, "1")]),
        )
        .await
        .unwrap();

        assert!(update_purchase_status(&purchases, &created.id, PurchaseStatus::Confirmed).await);
        let fetched = get_purchase(&purchases, &created.id).await.unwrap();
        assert_eq!(fetched.status, PurchaseStatus::Confirmed);

        assert!(!update_purchase_status(&purchases, "ghost", PurchaseStatus::Cancelled).await);
        assert!(!delete_purchase(&purchases, "ghost").await);
    }

    #[tokio::test]
    async fn test_details_show_placeholder_after_product_delete() {
        let (contacts, products, purchases) = states();
        let product_id = product_at_100(&products).await;

        let created = create_purchase(
            &purchases,
            &products,
            form("1", vec![item(&product_id, "1")]),
        )
        .await
        .unwrap();

        // Deleting the product succeeds at the catalog level...
        assert!(delete_product(&products, &product_id).await);

        // ...and the purchase detail view renders with a placeholder line
        let details = get_purchase_details(&purchases, &contacts, &products, &created.id)
            .await
            .unwrap();
        assert!(details.customer.is_some()); // seed contact "1" still exists
        assert!(details.items[0].product.is_none());
        assert_eq!(details.items[0].item.unit_price_cents, 10000);
    }

    #[tokio::test]
    async fn test_preview_totals_live_path() {
        let (_contacts, products, _purchases) = states();
        let product_id = product_at_100(&products).await;

        let totals = preview_purchase_totals(
            &products,
            &[item(&product_id, "2"), item("", "3")],
        )
        .await;

        assert_eq!(totals.subtotal_cents, 20000);
        assert_eq!(totals.total_cents, 24200);
    }
}
