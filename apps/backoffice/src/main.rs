//! # Agenda Backoffice Entry Point
//!
//! Boots the backoffice and reports the loaded collections. The web
//! frontend host embeds `agenda_backoffice_lib` and invokes the command
//! functions directly; running this binary standalone is a smoke check
//! that persistence, seeding, and store loading all work on this machine.

use tracing::info;

#[tokio::main]
async fn main() {
    let (contacts, products, purchases) = match agenda_backoffice_lib::run() {
        Ok(states) => states,
        Err(err) => {
            eprintln!("failed to start backoffice: {err}");
            std::process::exit(1);
        }
    };

    let contact_count = contacts.with(|store| store.all().len());
    let product_count = products.with(|store| store.all().len());
    let purchase_count = purchases.with(|store| store.all().len());

    info!(
        contacts = contact_count,
        products = product_count,
        purchases = purchase_count,
        "backoffice ready"
    );
}
