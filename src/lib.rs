#![doc(test(attr(deny(warnings))))]

//! Balance Core is a small personal ledger: signed money transactions with
//! tags and a date, kept in a plain-text file and driven from a line shell.
//!
//! ```
//! use balance_core::ledger::MoneyAmount;
//!
//! let total = MoneyAmount::sum(["12.50", "-2.25"].map(|s| s.parse::<MoneyAmount>().unwrap()));
//! assert_eq!(total.to_string(), "10.25");
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod formatter;
pub mod grammar;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Balance Core tracing initialized.");
    });
}
