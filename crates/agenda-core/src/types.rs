//! # Domain Types
//!
//! Core domain types used throughout Agenda Gestión.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Contact      │   │    Product      │   │    Purchase     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  first/last name│   │  codigo         │   │  customer (FK)  │       │
//! │  │  email, phone   │   │  precio_cents   │   │  items[]        │       │
//! │  │  company, notes │   │  costo, stock   │   │  totals, status │       │
//! │  └─────────────────┘   └─────────────────┘   └────────┬────────┘       │
//! │                                                       │                 │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌────────┴────────┐       │
//! │  │    TaxRate      │   │ PurchaseStatus  │   │  PurchaseItem   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Pending        │   │  product (FK)   │       │
//! │  │  2100 = 21%     │   │  Confirmed      │   │  quantity       │       │
//! │  └─────────────────┘   │  Cancelled      │   │  frozen price   │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reference Model
//! Purchases reference contacts and products by string id, never by owned
//! object. Each collection persists independently; a deleted referent leaves
//! a dangling id that display logic resolves to a placeholder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000, so 2100 bps = 21% (IVA).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Contact
// =============================================================================

/// A customer contact record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Contact {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,

    /// Company the contact belongs to, when known.
    pub company: Option<String>,

    /// Free-form notes.
    pub notes: Option<String>,

    /// When the contact was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the contact was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Display name, "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Raw contact form submission. All fields arrive as text; empty optional
/// fields are normalized away during validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ContactFormData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub notes: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business code, upper-cased at input time (e.g. "LAP001").
    pub codigo: String,

    /// Display description.
    pub descripcion: String,

    /// Brand name.
    pub marca: String,

    /// Unit sale price in cents.
    pub precio_cents: i64,

    /// Unit cost in cents (for profit margin calculations).
    pub costo_cents: i64,

    /// Current stock level. Never negative.
    pub stock: i64,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the sale price as a Money type.
    #[inline]
    pub fn precio(&self) -> Money {
        Money::from_cents(self.precio_cents)
    }

    /// Returns the unit cost as a Money type.
    #[inline]
    pub fn costo(&self) -> Money {
        Money::from_cents(self.costo_cents)
    }

    /// Profit per unit (precio - costo).
    #[inline]
    pub fn ganancia(&self) -> Money {
        self.precio() - self.costo()
    }

    /// Profit margin as a percentage of the sale price.
    ///
    /// Defined as `(precio - costo) / precio * 100`, or 0 when either side
    /// is not positive (the form shows 0% until both fields are filled).
    pub fn margin_percent(&self) -> f64 {
        if self.precio_cents > 0 && self.costo_cents > 0 {
            (self.precio_cents - self.costo_cents) as f64 / self.precio_cents as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Whether any units are available.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Checks if the requested quantity can be covered by current stock.
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity > 0 && quantity <= self.stock
    }
}

/// Raw product form submission. Numeric fields (`precio`, `costo`, `stock`)
/// arrive as text and are parsed during validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductFormData {
    pub codigo: String,
    pub descripcion: String,
    pub marca: String,
    pub precio: String,
    pub costo: String,
    pub stock: String,
}

// =============================================================================
// Purchase Status
// =============================================================================

/// The lifecycle status of a purchase.
///
/// Set to `Pending` at creation; changed only through the explicit
/// status-update operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PurchaseStatus {
    /// Recorded but not yet confirmed.
    Pending,
    /// Confirmed by the business.
    Confirmed,
    /// Cancelled; kept for history.
    Cancelled,
}

impl PurchaseStatus {
    /// Lowercase wire/name form ("pending", "confirmed", "cancelled").
    pub const fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::Pending => "pending",
            PurchaseStatus::Confirmed => "confirmed",
            PurchaseStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for PurchaseStatus {
    fn default() -> Self {
        PurchaseStatus::Pending
    }
}

// =============================================================================
// Purchase Item
// =============================================================================

/// A line item in a purchase.
/// Uses snapshot pattern to freeze the unit price at purchase time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseItem {
    pub id: String,

    /// Product reference by id. May dangle if the product is later deleted.
    pub product_id: String,

    /// Quantity purchased. Always a positive integer.
    pub quantity: i64,

    /// Unit price in cents at purchase time (frozen).
    /// Later catalog price changes never alter this value.
    pub unit_price_cents: i64,

    /// Line total (quantity × unit price).
    pub subtotal_cents: i64,
}

impl PurchaseItem {
    /// Returns the frozen unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

// =============================================================================
// Purchase
// =============================================================================

/// A customer purchase: one contact, one or more line items, derived totals.
///
/// ## Invariants
/// - `items` is non-empty
/// - No two items share a `product_id`
/// - Every `quantity` is a positive integer
/// - `subtotal`/`tax`/`total` are derived from `items` and the fixed tax
///   rate, never edited independently
/// - Item unit prices are frozen at create/edit time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Purchase {
    pub id: String,

    /// Customer reference by id. May dangle if the contact is later deleted.
    pub customer_contact_id: String,

    /// Ordered line items.
    pub items: Vec<PurchaseItem>,

    /// Sum of item subtotals, in cents.
    pub subtotal_cents: i64,

    /// Tax on the subtotal at the fixed rate, in cents.
    pub tax_cents: i64,

    /// Subtotal plus tax, in cents.
    pub total_cents: i64,

    pub status: PurchaseStatus,

    /// Free-form notes.
    pub notes: Option<String>,

    /// When the purchase was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the purchase was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Purchase {
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

/// One row of the purchase form's item table. Both fields arrive as raw
/// text from the select/input controls; either may be empty while the form
/// is being edited.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseItemForm {
    pub product_id: String,
    pub quantity: String,
}

/// Raw purchase form submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseFormData {
    pub customer_contact_id: String,
    pub items: Vec<PurchaseItemForm>,
    pub notes: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
