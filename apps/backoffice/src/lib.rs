//! # Agenda Backoffice Library
//!
//! Core library for the Agenda Gestión backoffice application: the command
//! boundary a web frontend invokes, plus the boot sequence that wires
//! stores to on-disk persistence.
//!
//! ## Module Organization
//! ```text
//! agenda_backoffice_lib/
//! ├── lib.rs          ◄─── You are here (boot sequence)
//! ├── state.rs        ◄─── StoreState wrappers (one per collection)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports + submission delay
//! │   ├── contact.rs  ◄─── Contact search/CRUD commands
//! │   ├── product.rs  ◄─── Product CRUD + stock-aware select options
//! │   └── purchase.rs ◄─── Purchase submission, status, details, preview
//! ├── config.rs       ◄─── Data directory resolution
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: INFO, can be overridden with RUST_LOG                    │
//! │                                                                         │
//! │  2. Resolve Data Directory ───────────────────────────────────────────► │
//! │     • AGENDA_DATA_DIR override, else the platform app-data dir          │
//! │                                                                         │
//! │  3. Open File Store ──────────────────────────────────────────────────► │
//! │     • One JSON blob per collection                                      │
//! │                                                                         │
//! │  4. Load Collections ─────────────────────────────────────────────────► │
//! │     • contacts, products, purchases (seeded on first run)               │
//! │                                                                         │
//! │  5. Hand the states to the frontend host ─────────────────────────────► │
//! │     • Commands in `commands::*` operate on the states                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use agenda_store::{FileStore, Stores};
use config::AppConfig;
use state::{into_states, ContactsState, ProductsState, PurchasesState};

/// Boots the backoffice: logging, persistence, stores.
///
/// Returns the per-collection states the frontend host hands to the
/// command functions.
pub fn run() -> Result<(ContactsState, ProductsState, PurchasesState), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Agenda Gestión backoffice");

    let config = AppConfig::from_env()?;
    info!(data_dir = %config.data_dir.display(), "data directory resolved");

    let persistence = FileStore::new(&config.data_dir)?;
    let stores = Stores::load(Arc::new(persistence));

    info!("State initialized");
    Ok(into_states(stores))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=agenda=trace` - Show trace for agenda crates only
/// - Default: INFO level
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,agenda=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
