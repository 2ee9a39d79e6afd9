use std::convert::Infallible;

use tracing::{debug, info, warn};

use crate::{
    errors::{LedgerError, MalformedRecord, Result},
    grammar::AddRequest,
    storage::{parse_records, serialize_records, RecordStore},
};

use super::{amount::MoneyAmount, transaction::Transaction};

/// Outcome of reading the backing store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    /// Lines that were skipped because they do not parse as records.
    pub rejected: Vec<MalformedRecord>,
    /// `true` when the store was missing and has just been created.
    pub created: bool,
}

/// Ordered, in-memory transactions backed by a [`RecordStore`].
///
/// Positions double as display and removal indices. Nothing is written until
/// [`Ledger::save`] is called.
pub struct Ledger {
    entries: Vec<Transaction>,
    store: Box<dyn RecordStore>,
    dirty: bool,
}

impl Ledger {
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        Self {
            entries: Vec::new(),
            store,
            dirty: false,
        }
    }

    /// Replaces the in-memory entries with the stored records.
    ///
    /// A missing store is created empty. Malformed lines are skipped and
    /// reported; an I/O failure leaves the current entries untouched.
    pub fn load(&mut self) -> Result<LoadReport> {
        let Some(contents) = self.store.read()? else {
            self.store.create()?;
            self.entries.clear();
            self.dirty = false;
            info!(store = %self.store.location(), "created empty ledger store");
            return Ok(LoadReport {
                created: true,
                ..LoadReport::default()
            });
        };

        let mut entries = Vec::new();
        let mut rejected = Vec::new();
        for parsed in parse_records(&contents) {
            match parsed {
                Ok(txn) => entries.push(txn),
                Err(record) => {
                    warn!(line = record.line, reason = %record.reason, "skipping malformed record");
                    rejected.push(record);
                }
            }
        }

        self.entries = entries;
        self.dirty = false;
        info!(
            store = %self.store.location(),
            loaded = self.entries.len(),
            rejected = rejected.len(),
            "ledger loaded"
        );
        Ok(LoadReport {
            loaded: self.entries.len(),
            rejected,
            created: false,
        })
    }

    /// Overwrites the store with every entry in order; returns the count written.
    pub fn save(&mut self) -> Result<usize> {
        let contents = serialize_records(&self.entries);
        self.store.write(&contents)?;
        self.dirty = false;
        info!(store = %self.store.location(), saved = self.entries.len(), "ledger saved");
        Ok(self.entries.len())
    }

    pub fn add(&mut self, request: AddRequest) -> &Transaction {
        let txn = request.into_transaction();
        debug!(record = %txn, index = self.entries.len(), "transaction added");
        self.entries.push(txn);
        self.dirty = true;
        &self.entries[self.entries.len() - 1]
    }

    /// Removes the entry at `index`, shifting later entries down by one.
    pub fn remove(&mut self, index: usize) -> Result<Transaction> {
        if index >= self.entries.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        let txn = self.entries.remove(index);
        self.dirty = true;
        debug!(record = %txn, index, "transaction removed");
        Ok(txn)
    }

    pub fn total(&self) -> MoneyAmount {
        MoneyAmount::sum(self.entries.iter().map(Transaction::amount))
    }

    /// Entries paired with their display index.
    ///
    /// With a tag filter only matching entries are returned and they are
    /// numbered from 0 within the filtered result.
    pub fn list(&self, tag: Option<&str>) -> Vec<(usize, &Transaction)> {
        match tag {
            None => self.entries.iter().enumerate().collect(),
            Some(tag) => self
                .entries
                .iter()
                .filter(|txn| txn.has_tag(tag))
                .enumerate()
                .collect(),
        }
    }

    /// Transactions are immutable once recorded.
    pub fn edit(&mut self, _index: usize) -> Result<Infallible> {
        Err(LedgerError::Unsupported { operation: "edit" })
    }

    /// There is no history to step back through.
    pub fn undo(&mut self) -> Result<Infallible> {
        Err(LedgerError::Unsupported { operation: "undo" })
    }

    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether there are additions or removals not yet saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn location(&self) -> String {
        self.store.location()
    }
}
