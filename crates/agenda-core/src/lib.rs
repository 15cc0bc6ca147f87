//! # agenda-core: Pure Business Logic for Agenda Gestión
//!
//! This crate is the **heart** of Agenda Gestión. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Agenda Gestión Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (web UI)                            │   │
//! │  │    Contact forms ──► Product forms ──► Purchase form + summary  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ command calls                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Backoffice Commands                          │   │
//! │  │    create_contact, search_products, create_purchase, etc.       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ agenda-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  compute  │  │ validation│  │   │
//! │  │   │  Contact  │  │   Money   │  │   items   │  │   rules   │  │   │
//! │  │   │  Product  │  │  TaxCalc  │  │   totals  │  │   drafts  │  │   │
//! │  │   │  Purchase │  │           │  │  preview  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  agenda-store (Storage Layer)                   │   │
//! │  │          Collection stores, key-value blobs, seed data          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Contact, Product, Purchase, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Form validation producing typed drafts
//! - [`compute`] - Purchase line-item and totals computation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use agenda_core::money::Money;
//! use agenda_core::TAX_RATE;
//!
//! // Parse a form field into money (never go through floats)
//! let subtotal = Money::parse("200.00").unwrap();
//!
//! // 21% IVA on 200.00 = 42.00
//! let tax = subtotal.calculate_tax(TAX_RATE);
//! assert_eq!(tax.cents(), 4200);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod compute;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use agenda_core::Money` instead of
// `use agenda_core::money::Money`

pub use compute::{compute_items, compute_totals, preview_totals, PurchaseTotals};
pub use error::{FieldErrors, MoneyParseError, ValidationError};
pub use money::Money;
pub use types::*;
pub use validation::{
    validate_contact, validate_product, validate_purchase, ContactDraft, ProductDraft,
    PurchaseDraft, PurchaseItemDraft,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The fixed purchase tax rate: 21% IVA, expressed in basis points.
///
/// Applied to every purchase subtotal. Not configurable per purchase; real
/// tax-jurisdiction logic is out of scope.
pub const TAX_RATE: types::TaxRate = types::TaxRate::from_bps(2100);
