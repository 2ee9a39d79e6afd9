//! Recognizes one typed line as a command.
//!
//! Matchers run in a fixed order and the first one that claims the line wins:
//! exact keywords first, then the add, remove, tag-search and edit patterns.

mod patterns;

use chrono::NaiveDate;
use strsim::levenshtein;

use crate::{
    errors::{CommandError, InputField},
    ledger::{transaction::normalize_tags, MoneyAmount, Transaction},
};

use patterns::{
    ADD_PATTERN, AMOUNT_TOKEN, DATE_TOKEN, EDIT_PATTERN, REMOVE_PATTERN, TAG_TOKEN,
};

/// Words the shell understands, used for completion and suggestions.
pub const COMMAND_WORDS: &[&str] = &[
    "spent", "made", "remove", "rm", "list", "ls", "total", "load", "save", "undo", "help",
    "exit",
];

const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Fixed single-word commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Exit,
    Load,
    Save,
    List,
    Help,
    Total,
    Undo,
}

impl Keyword {
    /// Exact, case-sensitive lookup.
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "exit" => Some(Keyword::Exit),
            "load" => Some(Keyword::Load),
            "save" => Some(Keyword::Save),
            "list" | "ls" => Some(Keyword::List),
            "help" => Some(Keyword::Help),
            "total" => Some(Keyword::Total),
            "undo" => Some(Keyword::Undo),
            _ => None,
        }
    }
}

/// Fields extracted from `spent|made <amount> [on <date>] [#tag]*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    pub amount: MoneyAmount,
    pub date: NaiveDate,
    pub tags: Vec<String>,
}

impl AddRequest {
    pub fn into_transaction(self) -> Transaction {
        Transaction::new(self.amount, self.tags, self.date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveRequest {
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub tag: String,
}

/// Result of classifying one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Keyword(Keyword),
    Add(AddRequest),
    Remove(RemoveRequest),
    Search(SearchRequest),
    /// Recognized so it can be refused explicitly; editing is not supported.
    Edit { index: usize },
    Unrecognized {
        input: String,
        suggestion: Option<&'static str>,
    },
}

type Matcher = fn(&str, NaiveDate) -> Option<Result<Command, CommandError>>;

/// Ordered list of matchers; see the module docs for the order.
pub struct CommandGrammar {
    matchers: Vec<(&'static str, Matcher)>,
}

impl Default for CommandGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandGrammar {
    pub fn new() -> Self {
        Self {
            matchers: vec![
                ("keyword", match_keyword as Matcher),
                ("add", match_add as Matcher),
                ("remove", match_remove as Matcher),
                ("search", match_search as Matcher),
                ("edit", match_edit as Matcher),
            ],
        }
    }

    /// Classifies `line`; `today` is used when an add command omits its date.
    ///
    /// Errors are only raised by a grammar that claimed the line but found its
    /// fields invalid. Lines no grammar claims come back as
    /// [`Command::Unrecognized`].
    pub fn classify(&self, line: &str, today: NaiveDate) -> Result<Command, CommandError> {
        let line = line.trim();
        for (name, matcher) in &self.matchers {
            if let Some(result) = matcher(line, today) {
                tracing::trace!(matcher = name, line, "input matched");
                return result;
            }
        }
        Ok(Command::Unrecognized {
            input: line.to_string(),
            suggestion: suggest(line),
        })
    }
}

fn match_keyword(line: &str, _today: NaiveDate) -> Option<Result<Command, CommandError>> {
    Keyword::from_word(line).map(|keyword| Ok(Command::Keyword(keyword)))
}

fn match_add(line: &str, today: NaiveDate) -> Option<Result<Command, CommandError>> {
    let captures = ADD_PATTERN.captures(line)?;
    let negative = &captures[1] == "spent";
    let rest = captures.get(2).map_or("", |m| m.as_str());
    Some(parse_add(line, negative, rest, today).map(Command::Add))
}

fn parse_add(
    line: &str,
    negative: bool,
    rest: &str,
    today: NaiveDate,
) -> Result<AddRequest, CommandError> {
    let mut amounts: Vec<&str> = Vec::new();
    let mut dates: Vec<(&str, NaiveDate)> = Vec::new();
    let mut tags: Vec<&str> = Vec::new();

    let mut tokens = rest.split_whitespace();
    while let Some(token) = tokens.next() {
        if AMOUNT_TOKEN.is_match(token) {
            amounts.push(token);
        } else if token == "on" {
            let raw = tokens.next().ok_or_else(|| unrecognized(line))?;
            dates.push((raw, parse_date(raw)?));
        } else if let Some(tag) = TAG_TOKEN.captures(token).and_then(|c| c.get(1)) {
            tags.push(tag.as_str());
        } else {
            return Err(unrecognized(line));
        }
    }

    let amount_text = match amounts.as_slice() {
        [] => return Err(CommandError::InsufficientInput),
        [single] => *single,
        [_, second, ..] => {
            return Err(CommandError::AmbiguousInput {
                field: InputField::Amount,
                token: second.to_string(),
                expected: 1,
            })
        }
    };
    let date = match dates.as_slice() {
        [] => today,
        [(_, date)] => *date,
        [_, (second, _), ..] => {
            return Err(CommandError::AmbiguousInput {
                field: InputField::Date,
                token: format!("on {second}"),
                expected: 1,
            })
        }
    };
    let amount = amount_text
        .parse::<MoneyAmount>()
        .map_err(|_| unrecognized(line))?
        .with_sign(negative);

    Ok(AddRequest {
        amount,
        date,
        tags: normalize_tags(tags),
    })
}

fn parse_date(token: &str) -> Result<NaiveDate, CommandError> {
    let invalid = || CommandError::InvalidDate {
        token: token.to_string(),
    };
    if !DATE_TOKEN.is_match(token) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(token, "%Y-%m-%d").map_err(|_| invalid())
}

fn match_remove(line: &str, _today: NaiveDate) -> Option<Result<Command, CommandError>> {
    let captures = REMOVE_PATTERN.captures(line)?;
    Some(Ok(Command::Remove(RemoveRequest {
        index: parse_index(&captures[1]),
    })))
}

fn match_search(line: &str, _today: NaiveDate) -> Option<Result<Command, CommandError>> {
    let captures = TAG_TOKEN.captures(line)?;
    Some(Ok(Command::Search(SearchRequest {
        tag: captures[1].to_lowercase(),
    })))
}

fn match_edit(line: &str, _today: NaiveDate) -> Option<Result<Command, CommandError>> {
    let captures = EDIT_PATTERN.captures(line)?;
    Some(Ok(Command::Edit {
        index: parse_index(&captures[1]),
    }))
}

/// Digits too large for `usize` saturate; the ledger then reports them out of range.
fn parse_index(digits: &str) -> usize {
    digits.parse().unwrap_or(usize::MAX)
}

fn unrecognized(line: &str) -> CommandError {
    CommandError::UnrecognizedCommand {
        input: line.to_string(),
        suggestion: suggest(line),
    }
}

/// Closest known command word to the first word of `line`, if it is a near miss.
pub(crate) fn suggest(line: &str) -> Option<&'static str> {
    let first = line.split_whitespace().next()?;
    let lowered = first.to_lowercase();
    COMMAND_WORDS
        .iter()
        .map(|word| (levenshtein(word, &lowered), *word))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, word)| *distance <= MAX_SUGGESTION_DISTANCE && *word != first)
        .map(|(_, word)| word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn classify(line: &str) -> Result<Command, CommandError> {
        CommandGrammar::new().classify(line, today())
    }

    fn add(line: &str) -> AddRequest {
        match classify(line) {
            Ok(Command::Add(request)) => request,
            other => panic!("expected add request for `{line}`, got {other:?}"),
        }
    }

    #[test]
    fn keywords_match_exactly() {
        assert_eq!(classify("exit"), Ok(Command::Keyword(Keyword::Exit)));
        assert_eq!(classify("ls"), Ok(Command::Keyword(Keyword::List)));
        assert_eq!(classify("list"), Ok(Command::Keyword(Keyword::List)));
        assert_eq!(classify("  total "), Ok(Command::Keyword(Keyword::Total)));
        assert_eq!(classify("undo"), Ok(Command::Keyword(Keyword::Undo)));
        assert!(matches!(
            classify("totals"),
            Ok(Command::Unrecognized { .. })
        ));
        assert!(matches!(classify("Exit"), Ok(Command::Unrecognized { .. })));
    }

    #[test]
    fn spent_is_negative_and_made_is_positive() {
        let spent = add("spent 12.50 on 2020-01-01 #food #food");
        assert_eq!(spent.amount.to_text(), "-12.50");
        assert_eq!(spent.date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(spent.tags, vec!["food".to_string()]);

        let made = add("made 1000 #Salary");
        assert_eq!(made.amount.to_text(), "1000.00");
        assert_eq!(made.tags, vec!["salary".to_string()]);
    }

    #[test]
    fn missing_date_defaults_to_today() {
        assert_eq!(add("spent 3.5").date, today());
    }

    #[test]
    fn tags_keep_first_seen_order() {
        let request = add("spent 4 #Coffee #work #coffee #Work #snack");
        assert_eq!(request.tags, ["coffee", "work", "snack"]);
    }

    #[test]
    fn fields_may_follow_the_verb_in_any_order() {
        let request = add("made #gift on 2021-12-25 20");
        assert_eq!(request.amount.to_text(), "20.00");
        assert_eq!(request.date, NaiveDate::from_ymd_opt(2021, 12, 25).unwrap());
        assert_eq!(request.tags, ["gift"]);
    }

    #[test]
    fn missing_amount_is_too_short() {
        assert_eq!(classify("spent"), Err(CommandError::InsufficientInput));
        assert_eq!(
            classify("made on 2020-01-01 #pay"),
            Err(CommandError::InsufficientInput)
        );
    }

    #[test]
    fn second_amount_is_ambiguous() {
        assert_eq!(
            classify("spent 12.50 12.50"),
            Err(CommandError::AmbiguousInput {
                field: InputField::Amount,
                token: "12.50".into(),
                expected: 1,
            })
        );
    }

    #[test]
    fn second_date_is_ambiguous() {
        assert_eq!(
            classify("spent 1 on 2020-01-01 on 2020-02-02"),
            Err(CommandError::AmbiguousInput {
                field: InputField::Date,
                token: "on 2020-02-02".into(),
                expected: 1,
            })
        );
    }

    #[test]
    fn bad_dates_are_reported() {
        assert_eq!(
            classify("spent 1 on 2020-02-30"),
            Err(CommandError::InvalidDate {
                token: "2020-02-30".into()
            })
        );
        assert_eq!(
            classify("spent 1 on tuesday"),
            Err(CommandError::InvalidDate {
                token: "tuesday".into()
            })
        );
        assert!(matches!(
            classify("spent 1 on"),
            Err(CommandError::UnrecognizedCommand { .. })
        ));
    }

    #[test]
    fn stray_tokens_make_add_unrecognized() {
        for line in ["spent 12.505", "spent 1.2.3", "spent 5 dollars", "spent -5", "spent 5 #f00d"] {
            assert!(
                matches!(classify(line), Err(CommandError::UnrecognizedCommand { .. })),
                "accepted `{line}`"
            );
        }
    }

    #[test]
    fn verb_must_be_a_whole_word() {
        assert!(matches!(
            classify("spentt 5"),
            Ok(Command::Unrecognized {
                suggestion: Some("spent"),
                ..
            })
        ));
    }

    #[test]
    fn remove_extracts_index() {
        assert_eq!(
            classify("remove 3"),
            Ok(Command::Remove(RemoveRequest { index: 3 }))
        );
        assert_eq!(
            classify("rm 0"),
            Ok(Command::Remove(RemoveRequest { index: 0 }))
        );
        assert_eq!(
            classify("rm 99999999999999999999999"),
            Ok(Command::Remove(RemoveRequest { index: usize::MAX }))
        );
        assert!(matches!(classify("rm -1"), Ok(Command::Unrecognized { .. })));
        assert!(matches!(classify("rm"), Ok(Command::Unrecognized { .. })));
    }

    #[test]
    fn bare_tag_is_a_search() {
        assert_eq!(
            classify("#Food"),
            Ok(Command::Search(SearchRequest { tag: "food".into() }))
        );
        assert!(matches!(classify("#food #bills"), Ok(Command::Unrecognized { .. })));
    }

    #[test]
    fn edit_is_recognized() {
        assert_eq!(
            classify("edit 2 made 5"),
            Ok(Command::Edit { index: 2 })
        );
    }

    #[test]
    fn unrecognized_lines_suggest_near_misses() {
        assert_eq!(
            classify("lst"),
            Ok(Command::Unrecognized {
                input: "lst".into(),
                suggestion: Some("list"),
            })
        );
        assert_eq!(
            classify("frobnicate now"),
            Ok(Command::Unrecognized {
                input: "frobnicate now".into(),
                suggestion: None,
            })
        );
        assert_eq!(
            classify(""),
            Ok(Command::Unrecognized {
                input: String::new(),
                suggestion: None,
            })
        );
    }

    #[test]
    fn into_transaction_keeps_fields() {
        let txn = add("spent 9.99 on 2022-08-01 #books").into_transaction();
        assert_eq!(txn.to_string(), "-9.99 on 2022-08-01 #books");
    }
}
