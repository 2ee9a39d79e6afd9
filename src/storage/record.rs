use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    errors::MalformedRecord,
    ledger::{MoneyAmount, Transaction},
};

static RECORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?[0-9]+\.[0-9]{2}) on ([0-9]{4}-[0-9]{2}-[0-9]{2})((?: #[A-Za-z]+)*)$")
        .expect("record pattern compiles")
});

const RECORD_SHAPE: &str = "expected `<amount> on <YYYY-MM-DD>[ #<tag>]*`";

/// Renders one transaction as a persisted line, without the newline.
pub fn format_record(txn: &Transaction) -> String {
    txn.to_string()
}

/// Renders every transaction, one newline-terminated line each.
pub fn serialize_records<'a, I>(transactions: I) -> String
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions.into_iter().fold(String::new(), |mut out, txn| {
        out.push_str(&format_record(txn));
        out.push('\n');
        out
    })
}

/// Parses one persisted line; `line` is the 1-based position used in reports.
pub fn parse_record(line: usize, content: &str) -> Result<Transaction, MalformedRecord> {
    let malformed = |reason: String| MalformedRecord {
        line,
        content: content.to_string(),
        reason,
    };

    let text = content.trim_end();
    let captures = RECORD_PATTERN
        .captures(text)
        .ok_or_else(|| malformed(RECORD_SHAPE.to_string()))?;

    let amount = captures[1]
        .parse::<MoneyAmount>()
        .map_err(|err| malformed(err.to_string()))?;
    let date = NaiveDate::parse_from_str(&captures[2], "%Y-%m-%d")
        .map_err(|_| malformed(format!("`{}` is not a calendar date", &captures[2])))?;
    let tags = captures[3]
        .split(' ')
        .filter_map(|token| token.strip_prefix('#'));

    Ok(Transaction::new(amount, tags, date))
}

/// Decodes raw store contents line by line, skipping blank lines.
///
/// Each line is decoded on its own, so invalid UTF-8 only rejects the line it
/// appears on.
pub fn parse_records(
    contents: &[u8],
) -> impl Iterator<Item = Result<Transaction, MalformedRecord>> + '_ {
    contents
        .split(|byte| *byte == b'\n')
        .enumerate()
        .filter_map(|(idx, raw)| {
            let line = idx + 1;
            match std::str::from_utf8(raw) {
                Ok(text) if text.trim().is_empty() => None,
                Ok(text) => Some(parse_record(line, text)),
                Err(_) => Some(Err(MalformedRecord {
                    line,
                    content: String::from_utf8_lossy(raw).trim_end().to_string(),
                    reason: "not valid UTF-8".to_string(),
                })),
            }
        })
}
