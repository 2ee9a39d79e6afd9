//! Dispatch boundary between typed lines and the ledger.

use crate::{
    errors::{CommandError, LedgerError, SessionError},
    formatter::{render_listing, render_total},
    grammar::{Command, CommandGrammar, Keyword, RemoveRequest, SearchRequest},
    ledger::{Ledger, LoadReport, Transaction},
    utils::clock::Clock,
};

/// Label attached to the synthetic transaction that carries the total.
pub const TOTAL_TAG: &str = "total";

/// What a successfully handled line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Exit {
        unsaved: bool,
    },
    Loaded(LoadReport),
    Saved {
        count: usize,
    },
    /// Rendered rows; `tag` is set for a tag search.
    Listing {
        text: String,
        tag: Option<String>,
    },
    Total(String),
    Added(Transaction),
    Removed {
        index: usize,
        transaction: Transaction,
    },
    Help,
}

/// One shell session: a ledger, the grammar and a clock for default dates.
pub struct Session {
    ledger: Ledger,
    grammar: CommandGrammar,
    clock: Box<dyn Clock>,
}

impl Session {
    pub fn new(ledger: Ledger, clock: Box<dyn Clock>) -> Self {
        Self {
            ledger,
            grammar: CommandGrammar::new(),
            clock,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Initial read of the backing store.
    pub fn load(&mut self) -> Result<LoadReport, LedgerError> {
        self.ledger.load()
    }

    /// Runs one command. On error the ledger is left as it was.
    pub fn handle_line(&mut self, line: &str) -> Result<Reply, SessionError> {
        let today = self.clock.today();
        let reply = match self.grammar.classify(line, today)? {
            Command::Keyword(keyword) => self.run_keyword(keyword)?,
            Command::Add(request) => Reply::Added(self.ledger.add(request).clone()),
            Command::Remove(RemoveRequest { index }) => Reply::Removed {
                index,
                transaction: self.ledger.remove(index)?,
            },
            Command::Search(SearchRequest { tag }) => Reply::Listing {
                text: render_listing(&self.ledger.list(Some(&tag))),
                tag: Some(tag),
            },
            Command::Edit { index } => match self.ledger.edit(index)? {},
            Command::Unrecognized { input, suggestion } => {
                return Err(CommandError::UnrecognizedCommand { input, suggestion }.into())
            }
        };
        Ok(reply)
    }

    fn run_keyword(&mut self, keyword: Keyword) -> Result<Reply, LedgerError> {
        let reply = match keyword {
            Keyword::Exit => Reply::Exit {
                unsaved: self.ledger.is_dirty(),
            },
            Keyword::Load => Reply::Loaded(self.ledger.load()?),
            Keyword::Save => Reply::Saved {
                count: self.ledger.save()?,
            },
            Keyword::List => Reply::Listing {
                text: render_listing(&self.ledger.list(None)),
                tag: None,
            },
            Keyword::Help => Reply::Help,
            Keyword::Total => {
                let total = Transaction::new(self.ledger.total(), [TOTAL_TAG], self.clock.today());
                Reply::Total(render_total(&total))
            }
            Keyword::Undo => match self.ledger.undo()? {},
        };
        Ok(reply)
    }
}
