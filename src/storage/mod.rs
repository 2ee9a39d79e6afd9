//! Backing stores for the ledger and the line-oriented record codec.

pub mod memory;
pub mod record;
pub mod text_file;

use std::io;

/// A single readable/writable resource that holds the persisted records.
///
/// Only one process is expected to use a store at a time; nothing here locks.
pub trait RecordStore: Send + Sync {
    /// Returns the raw contents, or `None` when the store does not exist yet.
    ///
    /// Bytes are returned undecoded so one bad line cannot hide the others.
    fn read(&self) -> io::Result<Option<Vec<u8>>>;

    /// Replaces the contents entirely.
    fn write(&self, contents: &str) -> io::Result<()>;

    /// Creates an empty store if none exists.
    fn create(&self) -> io::Result<()>;

    /// Human-readable location used in messages and logs.
    fn location(&self) -> String;
}

pub use memory::MemoryStore;
pub use record::{format_record, parse_record, parse_records, serialize_records};
pub use text_file::TextFileStore;
