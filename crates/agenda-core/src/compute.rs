//! # Purchase Computation Engine
//!
//! Turns validated purchase input into priced line items and aggregate
//! totals. This is the one place in the system with real arithmetic and
//! cross-entity lookups.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Purchase Computation                                 │
//! │                                                                         │
//! │  PurchaseDraft.items               Product catalog                      │
//! │  [{product_id, quantity}]          [{id, precio_cents, ...}]            │
//! │         │                                 │                             │
//! │         └────────────┬────────────────────┘                             │
//! │                      ▼                                                  │
//! │              compute_items()                                            │
//! │         price lookup + snapshot, subtotal = qty × unit price            │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │              [PurchaseItem]  (unit prices now FROZEN)                   │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │              compute_totals()                                           │
//! │         subtotal = Σ item subtotals                                     │
//! │         tax      = subtotal × 21%                                       │
//! │         total    = subtotal + tax                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Snapshots
//! Unit prices are captured at the moment items are computed (creation or
//! edit-submit), never re-derived from the current catalog on read. Editing
//! a purchase goes through this module again, which is the only way its
//! prices can move.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::types::{Product, PurchaseItem, PurchaseItemForm};
use crate::validation::PurchaseItemDraft;
use crate::TAX_RATE;

// =============================================================================
// Totals
// =============================================================================

/// Aggregate amounts for a set of line items.
///
/// Pure data; recomputed from the items on every call, never cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseTotals {
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
}

impl PurchaseTotals {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the tax as Money.
    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Item Computation
// =============================================================================

/// Builds priced line items from validated draft rows and the current
/// product catalog.
///
/// - Quantities are already positive integers (drafts are
///   post-validation)
/// - The unit price is the catalog price at this moment, frozen into the
///   item
/// - An unresolvable `product_id` prices at 0 rather than failing; the UI
///   only offers catalog products, so this is reachable only through the
///   deleted-product edge, which display handles with a placeholder
/// - Input order is preserved; each item gets a fresh id
///
/// ## Example
/// ```rust
/// use agenda_core::compute::compute_items;
/// use agenda_core::validation::PurchaseItemDraft;
///
/// let items = compute_items(&[], &[]);
/// assert!(items.is_empty());
/// ```
pub fn compute_items(drafts: &[PurchaseItemDraft], catalog: &[Product]) -> Vec<PurchaseItem> {
    drafts
        .iter()
        .map(|draft| {
            let unit_price = catalog
                .iter()
                .find(|product| product.id == draft.product_id)
                .map(Product::precio)
                .unwrap_or_else(Money::zero);
            let subtotal = unit_price.multiply_quantity(draft.quantity);

            PurchaseItem {
                id: Uuid::new_v4().to_string(),
                product_id: draft.product_id.clone(),
                quantity: draft.quantity,
                unit_price_cents: unit_price.cents(),
                subtotal_cents: subtotal.cents(),
            }
        })
        .collect()
}

// =============================================================================
// Totals Computation
// =============================================================================

/// Derives subtotal, tax, and total from a set of line items.
///
/// `tax = subtotal × 21%` rounded half-up to the cent; `total = subtotal +
/// tax`. Deterministic and pure. Callers re-invoke this whenever items
/// change, including during interactive editing, so the form summary is
/// always live.
///
/// ## Example
/// ```rust
/// use agenda_core::compute::compute_totals;
/// use agenda_core::types::PurchaseItem;
///
/// let items = vec![PurchaseItem {
///     id: "i1".into(),
///     product_id: "p1".into(),
///     quantity: 2,
///     unit_price_cents: 10000,
///     subtotal_cents: 20000,
/// }];
/// let totals = compute_totals(&items);
/// assert_eq!(totals.subtotal_cents, 20000);
/// assert_eq!(totals.tax_cents, 4200);
/// assert_eq!(totals.total_cents, 24200);
/// ```
pub fn compute_totals(items: &[PurchaseItem]) -> PurchaseTotals {
    let subtotal = items
        .iter()
        .fold(Money::zero(), |acc, item| acc + item.subtotal());
    let tax = subtotal.calculate_tax(TAX_RATE);
    let total = subtotal + tax;

    PurchaseTotals {
        subtotal_cents: subtotal.cents(),
        tax_cents: tax.cents(),
        total_cents: total.cents(),
    }
}

// =============================================================================
// Live Preview
// =============================================================================

/// Lenient totals over raw, possibly half-edited form rows, for the live
/// summary shown while the purchase form is open.
///
/// Unlike the submit path this does not validate: an unparseable quantity
/// counts as 0 and an unknown product prices at 0, so the summary reads
/// 0.00 instead of erroring while the user is mid-keystroke. Submission
/// still goes through `validate_purchase` + [`compute_items`].
pub fn preview_totals(rows: &[PurchaseItemForm], catalog: &[Product]) -> PurchaseTotals {
    let subtotal = rows
        .iter()
        .filter(|row| !row.product_id.is_empty() && !row.quantity.trim().is_empty())
        .fold(Money::zero(), |acc, row| {
            let quantity = row.quantity.trim().parse::<i64>().unwrap_or(0).max(0);
            let unit_price = catalog
                .iter()
                .find(|product| product.id == row.product_id)
                .map(Product::precio)
                .unwrap_or_else(Money::zero);
            acc + unit_price.multiply_quantity(quantity)
        });
    let tax = subtotal.calculate_tax(TAX_RATE);

    PurchaseTotals {
        subtotal_cents: subtotal.cents(),
        tax_cents: tax.cents(),
        total_cents: (subtotal + tax).cents(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn product(id: &str, precio_cents: i64) -> Product {
        let ts = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        Product {
            id: id.to_string(),
            codigo: format!("COD-{id}"),
            descripcion: format!("Product {id}"),
            marca: "Marca".to_string(),
            precio_cents,
            costo_cents: precio_cents / 2,
            stock: 10,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn draft(product_id: &str, quantity: i64) -> PurchaseItemDraft {
        PurchaseItemDraft {
            product_id: product_id.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_two_units_at_100_totals_242() {
        // 2 × 100.00 = 200.00, tax 42.00, total 242.00
        let catalog = vec![product("p1", 10000)];
        let items = compute_items(&[draft("p1", 2)], &catalog);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].unit_price_cents, 10000);
        assert_eq!(items[0].subtotal_cents, 20000);

        let totals = compute_totals(&items);
        assert_eq!(totals.subtotal_cents, 20000);
        assert_eq!(totals.tax_cents, 4200);
        assert_eq!(totals.total_cents, 24200);
    }

    #[test]
    fn test_items_preserve_order_and_get_fresh_ids() {
        let catalog = vec![product("p1", 89999), product("p2", 9999)];
        let items = compute_items(&[draft("p2", 1), draft("p1", 1)], &catalog);

        assert_eq!(items[0].product_id, "p2");
        assert_eq!(items[1].product_id, "p1");
        assert_ne!(items[0].id, items[1].id);
    }

    #[test]
    fn test_unit_price_is_frozen_at_computation_time() {
        let mut catalog = vec![product("p1", 10000)];
        let items = compute_items(&[draft("p1", 1)], &catalog);
        assert_eq!(items[0].unit_price_cents, 10000);

        // A later catalog price change must not touch the computed item,
        // but a recomputation sees the new price.
        catalog[0].precio_cents = 12345;
        assert_eq!(items[0].unit_price_cents, 10000);

        let recomputed = compute_items(&[draft("p1", 1)], &catalog);
        assert_eq!(recomputed[0].unit_price_cents, 12345);
    }

    #[test]
    fn test_unknown_product_prices_at_zero() {
        let items = compute_items(&[draft("ghost", 3)], &[]);
        assert_eq!(items[0].unit_price_cents, 0);
        assert_eq!(items[0].subtotal_cents, 0);
    }

    #[test]
    fn test_totals_of_empty_items_are_zero() {
        let totals = compute_totals(&[]);
        assert_eq!(totals, PurchaseTotals::default());
    }

    #[test]
    fn test_totals_match_seed_purchase_numbers() {
        // Laptop 899.99 × 1 + Mouse 99.99 × 2 = 1099.97,
        // tax 230.99, total 1330.96
        let catalog = vec![product("p1", 89999), product("p2", 9999)];
        let items = compute_items(&[draft("p1", 1), draft("p2", 2)], &catalog);
        let totals = compute_totals(&items);

        assert_eq!(totals.subtotal_cents, 109997);
        assert_eq!(totals.tax_cents, 23099);
        assert_eq!(totals.total_cents, 133096);
    }

    #[test]
    fn test_preview_is_lenient_about_half_edited_rows() {
        let catalog = vec![product("p1", 10000)];
        let rows = vec![
            PurchaseItemForm {
                product_id: "p1".into(),
                quantity: "2".into(),
            },
            // Row still being edited: no product picked yet
            PurchaseItemForm {
                product_id: String::new(),
                quantity: "5".into(),
            },
            // Garbage quantity counts as zero, not an error
            PurchaseItemForm {
                product_id: "p1".into(),
                quantity: "x".into(),
            },
        ];

        let totals = preview_totals(&rows, &catalog);
        assert_eq!(totals.subtotal_cents, 20000);
        assert_eq!(totals.total_cents, 24200);
    }
}
