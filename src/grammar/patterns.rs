use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("grammar pattern compiles")
}

/// `spent|made` followed by whitespace-separated fields.
pub(super) static ADD_PATTERN: Lazy<Regex> = Lazy::new(|| compile(r"^(spent|made)(?:\s+(.*))?$"));

/// Integer, or decimal with one or two fractional digits.
pub(super) static AMOUNT_TOKEN: Lazy<Regex> =
    Lazy::new(|| compile(r"^[0-9]+(?:\.[0-9]{1,2})?$"));

pub(super) static DATE_TOKEN: Lazy<Regex> = Lazy::new(|| compile(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$"));

/// `#` and letters only; also the whole-line tag search.
pub(super) static TAG_TOKEN: Lazy<Regex> = Lazy::new(|| compile(r"^#([A-Za-z]+)$"));

pub(super) static REMOVE_PATTERN: Lazy<Regex> =
    Lazy::new(|| compile(r"^(?:remove|rm)\s+([0-9]+)$"));

pub(super) static EDIT_PATTERN: Lazy<Regex> = Lazy::new(|| compile(r"^edit\s+([0-9]+)(?:\s.*)?$"));
