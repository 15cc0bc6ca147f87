//! # Seed Data
//!
//! Fixed example records used when a collection has never been persisted
//! (or its blob cannot be read). Seeds use small stable ids so the example
//! purchases can reference the example contacts and products.

use agenda_core::types::{Contact, Product, Purchase, PurchaseItem, PurchaseStatus};
use chrono::{DateTime, TimeZone, Utc};

/// Midnight UTC on a fixed date. Seed dates are literals and always valid.
fn seed_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid seed date")
}

/// Example contacts for a first run.
pub fn seed_contacts() -> Vec<Contact> {
    vec![
        Contact {
            id: "1".to_string(),
            first_name: "Juan".to_string(),
            last_name: "Pérez".to_string(),
            email: "juan.perez@email.com".to_string(),
            phone: "+34 600 123 456".to_string(),
            company: Some("Acme Corp".to_string()),
            notes: Some("Cliente importante".to_string()),
            created_at: seed_date(2024, 1, 15),
            updated_at: seed_date(2024, 1, 15),
        },
        Contact {
            id: "2".to_string(),
            first_name: "María".to_string(),
            last_name: "García".to_string(),
            email: "maria.garcia@email.com".to_string(),
            phone: "+34 700 987 654".to_string(),
            company: Some("Tech Solutions".to_string()),
            notes: None,
            created_at: seed_date(2024, 2, 10),
            updated_at: seed_date(2024, 2, 10),
        },
    ]
}

/// Example products for a first run.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            codigo: "LAP001".to_string(),
            descripcion: "Laptop HP Pavilion 15\"".to_string(),
            marca: "HP".to_string(),
            precio_cents: 89999,
            costo_cents: 65000,
            stock: 15,
            created_at: seed_date(2024, 1, 10),
            updated_at: seed_date(2024, 1, 10),
        },
        Product {
            id: "2".to_string(),
            codigo: "MOU002".to_string(),
            descripcion: "Mouse Inalámbrico Logitech MX Master 3".to_string(),
            marca: "Logitech".to_string(),
            precio_cents: 9999,
            costo_cents: 6500,
            stock: 8,
            created_at: seed_date(2024, 2, 5),
            updated_at: seed_date(2024, 2, 5),
        },
        Product {
            id: "3".to_string(),
            codigo: "TEC003".to_string(),
            descripcion: "Teclado Mecánico RGB Corsair K70".to_string(),
            marca: "Corsair".to_string(),
            precio_cents: 15999,
            costo_cents: 11000,
            stock: 12,
            created_at: seed_date(2024, 1, 20),
            updated_at: seed_date(2024, 1, 20),
        },
    ]
}

/// Example purchases for a first run. Totals are consistent with the item
/// subtotals and the fixed 21% tax rate.
pub fn seed_purchases() -> Vec<Purchase> {
    vec![
        Purchase {
            id: "1".to_string(),
            customer_contact_id: "1".to_string(), // Juan Pérez
            items: vec![
                PurchaseItem {
                    id: "1".to_string(),
                    product_id: "1".to_string(), // Laptop HP
                    quantity: 1,
                    unit_price_cents: 89999,
                    subtotal_cents: 89999,
                },
                PurchaseItem {
                    id: "2".to_string(),
                    product_id: "2".to_string(), // Mouse Logitech
                    quantity: 2,
                    unit_price_cents: 9999,
                    subtotal_cents: 19998,
                },
            ],
            subtotal_cents: 109997,
            tax_cents: 23099,
            total_cents: 133096,
            status: PurchaseStatus::Confirmed,
            notes: Some("Compra de equipos para oficina".to_string()),
            created_at: seed_date(2024, 1, 20),
            updated_at: seed_date(2024, 1, 20),
        },
        Purchase {
            id: "2".to_string(),
            customer_contact_id: "2".to_string(), // María García
            items: vec![PurchaseItem {
                id: "3".to_string(),
                product_id: "3".to_string(), // Teclado Corsair
                quantity: 1,
                unit_price_cents: 15999,
                subtotal_cents: 15999,
            }],
            subtotal_cents: 15999,
            tax_cents: 3360,
            total_cents: 19359,
            status: PurchaseStatus::Pending,
            notes: None,
            created_at: seed_date(2024, 2, 15),
            updated_at: seed_date(2024, 2, 15),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::compute::compute_totals;

    #[test]
    fn test_seed_purchases_reference_seed_records() {
        let contacts = seed_contacts();
        let products = seed_products();

        for purchase in seed_purchases() {
            assert!(contacts
                .iter()
                .any(|c| c.id == purchase.customer_contact_id));
            for item in &purchase.items {
                assert!(products.iter().any(|p| p.id == item.product_id));
            }
        }
    }

    #[test]
    fn test_seed_purchase_totals_are_internally_consistent() {
        for purchase in seed_purchases() {
            let totals = compute_totals(&purchase.items);
            assert_eq!(totals.subtotal_cents, purchase.subtotal_cents);
            assert_eq!(totals.tax_cents, purchase.tax_cents);
            assert_eq!(totals.total_cents, purchase.total_cents);
        }
    }

    #[test]
    fn test_seed_item_prices_match_seed_catalog() {
        let products = seed_products();
        for purchase in seed_purchases() {
            for item in &purchase.items {
                let product = products.iter().find(|p| p.id == item.product_id).unwrap();
                assert_eq!(item.unit_price_cents, product.precio_cents);
                assert_eq!(item.subtotal_cents, item.unit_price_cents * item.quantity);
            }
        }
    }
}
