#![doc(test(attr(deny(warnings))))]

//! Budget Coach turns a raw list of financial transactions into categorized
//! spending data, compares it against user-defined budgets, previews
//! hypothetical reductions, flags recurring subscriptions, and emits
//! actionable suggestions.

pub mod cli;
pub mod engine;
pub mod errors;
pub mod import;
pub mod model;
pub mod report;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Coach tracing initialized.");
    });
}
