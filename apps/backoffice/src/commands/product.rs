//! # Product Commands
//!
//! Commands for catalog search, CRUD, and the stock-aware select options
//! the purchase form uses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use agenda_core::types::{Product, ProductFormData};
use agenda_core::validation::validate_product;

use crate::commands::simulate_submit_delay;
use crate::error::ApiError;
use crate::state::ProductsState;

/// Product DTO for the frontend.
///
/// Carries the derived profit numbers the product form displays so the
/// frontend never re-implements the margin arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub codigo: String,
    pub descripcion: String,
    pub marca: String,
    pub precio_cents: i64,
    pub costo_cents: i64,
    pub stock: i64,
    /// Profit per unit in cents (precio - costo).
    pub ganancia_cents: i64,
    /// Profit margin as a percentage of the sale price.
    pub margin_percent: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        ProductDto {
            ganancia_cents: product.ganancia().cents(),
            margin_percent: product.margin_percent(),
            id: product.id,
            codigo: product.codigo,
            descripcion: product.descripcion,
            marca: product.marca,
            precio_cents: product.precio_cents,
            costo_cents: product.costo_cents,
            stock: product.stock,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// One entry of the purchase form's product select.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionDto {
    pub id: String,
    /// Display label: `"LAP001 - Laptop HP Pavilion 15\" (Stock: 15)"`.
    pub label: String,
    pub stock: i64,
}

/// Searches products by code, description, brand, price, or stock.
///
/// An empty query returns the full catalog (newest first).
pub async fn search_products(products: &ProductsState, query: &str) -> Vec<ProductDto> {
    debug!(query, "search_products command");
    products.with(|store| {
        store
            .search(query)
            .into_iter()
            .map(ProductDto::from)
            .collect()
    })
}

/// Gets a single product by id.
pub async fn get_product(products: &ProductsState, id: &str) -> Result<ProductDto, ApiError> {
    debug!(id, "get_product command");
    products.with(|store| {
        store
            .get(id)
            .cloned()
            .map(ProductDto::from)
            .ok_or_else(|| ApiError::not_found("Product", id))
    })
}

/// Validates and creates a product.
pub async fn create_product(
    products: &ProductsState,
    form: ProductFormData,
) -> Result<ProductDto, ApiError> {
    debug!("create_product command");

    let draft = validate_product(&form)?;
    simulate_submit_delay().await;

    let created = products.with_mut(|store| store.create(draft));
    info!(id = %created.id, codigo = %created.codigo, "product created");
    Ok(ProductDto::from(created))
}

/// Validates and updates an existing product.
///
/// Historical purchases keep their frozen unit prices regardless of what
/// happens to `precio` here.
pub async fn update_product(
    products: &ProductsState,
    id: &str,
    form: ProductFormData,
) -> Result<ProductDto, ApiError> {
    debug!(id, "update_product command");

    let draft = validate_product(&form)?;
    simulate_submit_delay().await;

    let updated = products
        .with_mut(|store| store.update(id, draft))
        .ok_or_else(|| ApiError::not_found("Product", id))?;
    info!(id, "product updated");
    Ok(ProductDto::from(updated))
}

/// Deletes a product. Returns whether anything was deleted.
///
/// Purchases referencing the product keep their dangling id and render a
/// "product not found" placeholder.
pub async fn delete_product(products: &ProductsState, id: &str) -> bool {
    debug!(id, "delete_product command");
    let deleted = products.with_mut(|store| store.delete(id));
    if deleted {
        info!(id, "product deleted");
    }
    deleted
}

/// Lists the products the purchase form may select: everything in stock,
/// plus the row's current selection when editing (so an existing line does
/// not vanish just because its product sold out).
pub async fn purchase_product_options(
    products: &ProductsState,
    selected: Option<&str>,
) -> Vec<ProductOptionDto> {
    debug!(?selected, "purchase_product_options command");
    products.with(|store| {
        store
            .all()
            .iter()
            .filter(|product| product.in_stock() || selected == Some(product.id.as_str()))
            .map(|product| ProductOptionDto {
                id: product.id.clone(),
                label: format!(
                    "{} - {} (Stock: {})",
                    product.codigo, product.descripcion, product.stock
                ),
                stock: product.stock,
            })
            .collect()
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::StoreState;
    use agenda_store::{MemoryStore, ProductStore};
    use std::sync::Arc;

    fn state() -> ProductsState {
        StoreState::new(ProductStore::load(Arc::new(MemoryStore::new())))
    }

    fn form(codigo: &str, precio: &str, stock: &str) -> ProductFormData {
        ProductFormData {
            codigo: codigo.to_string(),
            descripcion: "Monitor Dell 27\"".to_string(),
            marca: "Dell".to_string(),
            precio: precio.to_string(),
            costo: "150.00".to_string(),
            stock: stock.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_product_uppercases_codigo_and_derives_margin() {
        let products = state();
        let created = create_product(&products, form("mon004", "300.00", "5"))
            .await
            .unwrap();

        assert_eq!(created.codigo, "MON004");
        assert_eq!(created.precio_cents, 30000);
        assert_eq!(created.ganancia_cents, 15000);
        assert!((created.margin_percent - 50.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_create_product_invalid_numbers_create_nothing() {
        let products = state();
        let before = search_products(&products, "").await.len();

        let err = create_product(&products, form("MON004", "free", "5"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.fields.unwrap().contains_key("precio"));
        assert_eq!(search_products(&products, "").await.len(), before);
    }

    #[tokio::test]
    async fn test_options_filter_out_of_stock() {
        let products = state();
        let sold_out = create_product(&products, form("AGO001", "10.00", "0"))
            .await
            .unwrap();

        let options = purchase_product_options(&products, None).await;
        assert!(options.iter().all(|option| option.id != sold_out.id));
        // Seed catalog (3 products, all in stock) is still offered
        assert_eq!(options.len(), 3);
        assert!(options[0].label.contains("(Stock: "));
    }

    #[tokio::test]
    async fn test_options_keep_current_selection_when_editing() {
        let products = state();
        let sold_out = create_product(&products, form("AGO001", "10.00", "0"))
            .await
            .unwrap();

        let options = purchase_product_options(&products, Some(&sold_out.id)).await;
        assert!(options.iter().any(|option| option.id == sold_out.id));
    }
}
