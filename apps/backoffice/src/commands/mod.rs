//! # Commands Module
//!
//! The in-process boundary the web frontend invokes. Each command is an
//! async function over the store states, returning DTOs (camelCase serde)
//! or an [`ApiError`].
//!
//! Create/update/submit paths pause for a short fixed delay before
//! mutating, purely so the frontend's disabled-submit feedback is visible.
//! The delay has no correctness role.
//!
//! [`ApiError`]: crate::error::ApiError

use std::time::Duration;

pub mod contact;
pub mod product;
pub mod purchase;

/// Fixed pause applied to submission commands (UX latency simulation).
pub const SUBMIT_DELAY: Duration = Duration::from_millis(300);

/// Awaits the simulated submission delay.
pub(crate) async fn simulate_submit_delay() {
    tokio::time::sleep(SUBMIT_DELAY).await;
}
