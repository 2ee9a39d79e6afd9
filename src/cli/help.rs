use crate::cli::output;

/// One row of the help table.
pub struct CommandEntry {
    pub usage: &'static str,
    pub description: &'static str,
}

impl CommandEntry {
    const fn new(usage: &'static str, description: &'static str) -> Self {
        Self { usage, description }
    }
}

pub const COMMANDS: &[CommandEntry] = &[
    CommandEntry::new(
        "spent <amount> [on YYYY-MM-DD] [#tag ...]",
        "Record money going out (date defaults to today)",
    ),
    CommandEntry::new(
        "made <amount> [on YYYY-MM-DD] [#tag ...]",
        "Record money coming in",
    ),
    CommandEntry::new("list | ls", "List every transaction with its index"),
    CommandEntry::new("#<tag>", "List transactions carrying a tag"),
    CommandEntry::new("remove | rm <index>", "Delete the transaction at an index"),
    CommandEntry::new("total", "Sum of all transactions"),
    CommandEntry::new("save", "Write the ledger to disk"),
    CommandEntry::new("load", "Reload from disk, discarding unsaved changes"),
    CommandEntry::new("help", "Show this overview"),
    CommandEntry::new("exit", "Leave the shell (does not save)"),
];

/// Plain-text command table, one command per line.
pub fn overview() -> String {
    let width = COMMANDS
        .iter()
        .map(|entry| entry.usage.len())
        .max()
        .unwrap_or(0);
    COMMANDS
        .iter()
        .map(|entry| format!("  {:<width$}  {}", entry.usage, entry.description))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_overview() {
    output::section("Available commands");
    output::plain(overview());
    output::info("Amounts take at most two decimals; tags are letters only.");
}
