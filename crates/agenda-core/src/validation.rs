//! # Validation Module
//!
//! Form validation for Agenda Gestión.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation as Parsing                              │
//! │                                                                         │
//! │  Raw form data (all fields are text)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_*(form)  ── every rule checked, errors collected per field   │
//! │       │                                                                 │
//! │       ├── any rule failed ──► Err(FieldErrors)                          │
//! │       │                       submission aborted, nothing persisted     │
//! │       │                                                                 │
//! │       └── all rules passed ─► Ok(Draft)                                 │
//! │                               typed values: Money, i64, Option<String>  │
//! │                                                                         │
//! │  Downstream code (computation, stores) only ever sees drafts, so       │
//! │  string-to-number parsing can never silently coerce to 0 or NaN.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use agenda_core::types::ContactFormData;
//! use agenda_core::validation::validate_contact;
//!
//! let form = ContactFormData {
//!     first_name: "Juan".into(),
//!     last_name: "Pérez".into(),
//!     email: "juan.perez@email.com".into(),
//!     phone: "+34 600 123 456".into(),
//!     company: String::new(),
//!     notes: String::new(),
//! };
//! let draft = validate_contact(&form).unwrap();
//! assert_eq!(draft.company, None);
//! ```

use crate::error::{FieldErrors, ValidationError};
use crate::money::Money;
use crate::types::{ContactFormData, ProductFormData, PurchaseFormData};

// =============================================================================
// Drafts (validated, typed form output)
// =============================================================================

/// A contact form that passed validation. Field values are the submitted
/// text; empty optional fields are normalized to `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub notes: Option<String>,
}

/// A product form that passed validation, with numeric fields parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    /// Trimmed and upper-cased, as the input field renders it.
    pub codigo: String,
    pub descripcion: String,
    pub marca: String,
    pub precio: Money,
    pub costo: Money,
    pub stock: i64,
}

/// One valid purchase line: a selected product and a positive integer
/// quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseItemDraft {
    pub product_id: String,
    pub quantity: i64,
}

/// A purchase form that passed validation. `items` holds only the valid
/// lines (blank form rows are dropped, not errors).
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseDraft {
    pub customer_contact_id: String,
    pub items: Vec<PurchaseItemDraft>,
    pub notes: Option<String>,
}

// =============================================================================
// Contact Validation
// =============================================================================

/// Validates a contact form.
///
/// ## Rules
/// - `firstName`, `lastName`, `phone`: non-empty after trimming
/// - `email`: non-empty and shaped `local@domain.tld`
pub fn validate_contact(form: &ContactFormData) -> Result<ContactDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    if form.first_name.trim().is_empty() {
        errors.insert("firstName", ValidationError::Required { field: "firstName" });
    }
    if form.last_name.trim().is_empty() {
        errors.insert("lastName", ValidationError::Required { field: "lastName" });
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.insert("email", ValidationError::Required { field: "email" });
    } else if !is_valid_email(email) {
        errors.insert("email", ValidationError::InvalidEmail);
    }

    if form.phone.trim().is_empty() {
        errors.insert("phone", ValidationError::Required { field: "phone" });
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ContactDraft {
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        email: form.email.clone(),
        phone: form.phone.clone(),
        company: none_if_empty(&form.company),
        notes: none_if_empty(&form.notes),
    })
}

/// Checks the `local@domain.tld` shape: no whitespace, a non-empty local
/// part, a single `@`, and a domain with a dot and non-empty tail.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(|c| c.is_whitespace()) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty(),
        None => false,
    }
}

// =============================================================================
// Product Validation
// =============================================================================

/// Validates a product form.
///
/// ## Rules
/// - `codigo`, `descripcion`, `marca`: non-empty after trimming
/// - `precio`, `costo`: parse as money and are > 0
/// - `stock`: parses as an integer and is >= 0
pub fn validate_product(form: &ProductFormData) -> Result<ProductDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    if form.codigo.trim().is_empty() {
        errors.insert("codigo", ValidationError::Required { field: "codigo" });
    }
    if form.descripcion.trim().is_empty() {
        errors.insert(
            "descripcion",
            ValidationError::Required { field: "descripcion" },
        );
    }
    if form.marca.trim().is_empty() {
        errors.insert("marca", ValidationError::Required { field: "marca" });
    }

    let precio = parse_positive_money(&form.precio, "precio");
    let costo = parse_positive_money(&form.costo, "costo");
    let stock = parse_stock(&form.stock);

    if let Err(e) = &precio {
        errors.insert("precio", e.clone());
    }
    if let Err(e) = &costo {
        errors.insert("costo", e.clone());
    }
    if let Err(e) = &stock {
        errors.insert("stock", e.clone());
    }

    match (precio, costo, stock) {
        (Ok(precio), Ok(costo), Ok(stock)) if errors.is_empty() => Ok(ProductDraft {
            codigo: form.codigo.trim().to_uppercase(),
            descripcion: form.descripcion.clone(),
            marca: form.marca.clone(),
            precio,
            costo,
            stock,
        }),
        _ => Err(errors),
    }
}

/// Parses a money form field that must be strictly positive.
fn parse_positive_money(raw: &str, field: &'static str) -> Result<Money, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    let amount = Money::parse(raw).map_err(|_| ValidationError::NotANumber { field })?;
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive { field });
    }
    Ok(amount)
}

/// Parses the stock field: an integer >= 0.
fn parse_stock(raw: &str) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required { field: "stock" });
    }
    let stock = raw
        .parse::<i64>()
        .map_err(|_| ValidationError::NotANumber { field: "stock" })?;
    if stock < 0 {
        return Err(ValidationError::MustBeNonNegative { field: "stock" });
    }
    Ok(stock)
}

// =============================================================================
// Purchase Validation
// =============================================================================

/// Validates a purchase form.
///
/// ## Rules
/// - `customerContactId`: non-empty (the select only offers existing
///   contacts, so this is a presence check, not a lookup)
/// - at least one item row with a product and a quantity that parses to a
///   positive integer, otherwise a `NoValidItems` error on `items`
/// - no product may appear in more than one valid row, otherwise a
///   `DuplicateProduct` error on `items` (this replaces `NoValidItems`
///   when both could apply, matching the form's error precedence)
///
/// Rows that are blank or partly filled are dropped from the draft rather
/// than reported; the form keeps empty rows around while the user edits.
pub fn validate_purchase(form: &PurchaseFormData) -> Result<PurchaseDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    if form.customer_contact_id.is_empty() {
        errors.insert(
            "customerContactId",
            ValidationError::Required {
                field: "customerContactId",
            },
        );
    }

    let valid_items: Vec<PurchaseItemDraft> = form
        .items
        .iter()
        .filter_map(|item| {
            if item.product_id.is_empty() {
                return None;
            }
            let quantity = item.quantity.trim().parse::<i64>().ok()?;
            if quantity > 0 {
                Some(PurchaseItemDraft {
                    product_id: item.product_id.clone(),
                    quantity,
                })
            } else {
                None
            }
        })
        .collect();

    if valid_items.is_empty() {
        errors.insert("items", ValidationError::NoValidItems);
    }

    let mut seen = std::collections::HashSet::new();
    if valid_items
        .iter()
        .any(|item| !seen.insert(item.product_id.as_str()))
    {
        errors.insert("items", ValidationError::DuplicateProduct);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(PurchaseDraft {
        customer_contact_id: form.customer_contact_id.clone(),
        items: valid_items,
        notes: none_if_empty(&form.notes),
    })
}

/// Normalizes an optional text field: whitespace-only becomes `None`.
fn none_if_empty(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PurchaseItemForm;

    fn contact_form() -> ContactFormData {
        ContactFormData {
            first_name: "Juan".into(),
            last_name: "Pérez".into(),
            email: "juan.perez@email.com".into(),
            phone: "+34 600 123 456".into(),
            company: "Acme Corp".into(),
            notes: String::new(),
        }
    }

    fn product_form() -> ProductFormData {
        ProductFormData {
            codigo: "lap001".into(),
            descripcion: "Laptop HP Pavilion 15\"".into(),
            marca: "HP".into(),
            precio: "899.99".into(),
            costo: "650.00".into(),
            stock: "15".into(),
        }
    }

    fn item(product_id: &str, quantity: &str) -> PurchaseItemForm {
        PurchaseItemForm {
            product_id: product_id.into(),
            quantity: quantity.into(),
        }
    }

    #[test]
    fn test_valid_contact_normalizes_optionals() {
        let draft = validate_contact(&contact_form()).unwrap();
        assert_eq!(draft.company.as_deref(), Some("Acme Corp"));
        assert_eq!(draft.notes, None);
    }

    #[test]
    fn test_contact_missing_fields() {
        let form = ContactFormData::default();
        let errors = validate_contact(&form).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.get("firstName"),
            Some(&ValidationError::Required { field: "firstName" })
        );
    }

    #[test]
    fn test_contact_bad_email_blocks_submission() {
        let mut form = contact_form();
        form.email = "not-an-email".into();
        let errors = validate_contact(&form).unwrap_err();
        assert_eq!(errors.get("email"), Some(&ValidationError::InvalidEmail));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("maria.garcia@email.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.c"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@@b.c"));
    }

    #[test]
    fn test_valid_product_parses_numbers() {
        let draft = validate_product(&product_form()).unwrap();
        assert_eq!(draft.codigo, "LAP001");
        assert_eq!(draft.precio.cents(), 89999);
        assert_eq!(draft.costo.cents(), 65000);
        assert_eq!(draft.stock, 15);
    }

    #[test]
    fn test_product_rejects_zero_and_garbage_numbers() {
        let mut form = product_form();
        form.precio = "0".into();
        form.costo = "abc".into();
        form.stock = "-1".into();

        let errors = validate_product(&form).unwrap_err();
        assert_eq!(
            errors.get("precio"),
            Some(&ValidationError::MustBePositive { field: "precio" })
        );
        assert_eq!(
            errors.get("costo"),
            Some(&ValidationError::NotANumber { field: "costo" })
        );
        assert_eq!(
            errors.get("stock"),
            Some(&ValidationError::MustBeNonNegative { field: "stock" })
        );
    }

    #[test]
    fn test_purchase_happy_path_keeps_only_valid_rows() {
        let form = PurchaseFormData {
            customer_contact_id: "c1".into(),
            items: vec![item("p1", "2"), item("", ""), item("p2", "1")],
            notes: "  ".into(),
        };
        let draft = validate_purchase(&form).unwrap();
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.items[0].quantity, 2);
        assert_eq!(draft.items[1].product_id, "p2");
        assert_eq!(draft.notes, None);
    }

    #[test]
    fn test_purchase_all_blank_rows_is_no_valid_items() {
        let form = PurchaseFormData {
            customer_contact_id: "c1".into(),
            items: vec![item("", "")],
            notes: String::new(),
        };
        let errors = validate_purchase(&form).unwrap_err();
        assert_eq!(errors.get("items"), Some(&ValidationError::NoValidItems));
    }

    #[test]
    fn test_purchase_zero_or_garbage_quantity_is_not_valid() {
        let form = PurchaseFormData {
            customer_contact_id: "c1".into(),
            items: vec![item("p1", "0"), item("p2", "two")],
            notes: String::new(),
        };
        let errors = validate_purchase(&form).unwrap_err();
        assert_eq!(errors.get("items"), Some(&ValidationError::NoValidItems));
    }

    #[test]
    fn test_purchase_duplicate_product_blocks_submission() {
        let form = PurchaseFormData {
            customer_contact_id: "c1".into(),
            items: vec![item("p1", "1"), item("p1", "3")],
            notes: String::new(),
        };
        let errors = validate_purchase(&form).unwrap_err();
        assert_eq!(errors.get("items"), Some(&ValidationError::DuplicateProduct));
    }

    #[test]
    fn test_purchase_missing_customer() {
        let form = PurchaseFormData {
            customer_contact_id: String::new(),
            items: vec![item("p1", "1")],
            notes: String::new(),
        };
        let errors = validate_purchase(&form).unwrap_err();
        assert!(errors.get("customerContactId").is_some());
        assert!(errors.get("items").is_none());
    }
}
