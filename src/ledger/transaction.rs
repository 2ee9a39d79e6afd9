use std::fmt;

use chrono::NaiveDate;

use super::amount::MoneyAmount;

/// One signed money movement with its tags and calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    amount: MoneyAmount,
    tags: Vec<String>,
    date: NaiveDate,
}

impl Transaction {
    /// Tags are lower-cased and de-duplicated, keeping first-seen order.
    pub fn new<I, S>(amount: MoneyAmount, tags: I, date: NaiveDate) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            amount,
            tags: normalize_tags(tags),
            date,
        }
    }

    pub fn amount(&self) -> MoneyAmount {
        self.amount
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Case-insensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|existing| *existing == tag)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.amount, self.date.format("%Y-%m-%d"))?;
        for tag in &self.tags {
            write!(f, " #{tag}")?;
        }
        Ok(())
    }
}

pub(crate) fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim().to_lowercase();
        if !tag.is_empty() && !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn renders_without_tags() {
        let txn = Transaction::new(
            MoneyAmount::from_decimal(100.01),
            Vec::<String>::new(),
            date(1995, 12, 12),
        );
        assert_eq!(txn.to_string(), "100.01 on 1995-12-12");
    }

    #[test]
    fn renders_negative_amounts() {
        let txn = Transaction::new(
            MoneyAmount::from_decimal(-100.01),
            Vec::<String>::new(),
            date(1995, 12, 12),
        );
        assert_eq!(txn.to_string(), "-100.01 on 1995-12-12");
    }

    #[test]
    fn renders_tags_in_order() {
        let txn = Transaction::new(
            MoneyAmount::from_decimal(100.0),
            ["birthday", "toy"],
            date(1995, 12, 12),
        );
        assert_eq!(txn.to_string(), "100.00 on 1995-12-12 #birthday #toy");
    }

    #[test]
    fn tags_are_lowercased_and_deduplicated() {
        let txn = Transaction::new(
            MoneyAmount::from_decimal(5.0),
            ["Food", "rent", "FOOD", "food"],
            date(2020, 1, 1),
        );
        assert_eq!(txn.tags(), ["food", "rent"]);
        assert!(txn.has_tag("RENT"));
        assert!(!txn.has_tag("bills"));
    }
}
