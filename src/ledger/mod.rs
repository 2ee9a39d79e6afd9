//! Transaction data model and the in-memory ledger.

pub mod amount;
pub mod book;
pub mod transaction;

pub use amount::{AmountParseError, MoneyAmount};
pub use book::{Ledger, LoadReport};
pub use transaction::Transaction;
