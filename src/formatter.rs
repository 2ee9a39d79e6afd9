//! Column layout for transaction listings.

use crate::ledger::Transaction;

/// Width of the shortest rendered amount, `0.00`.
const MIN_AMOUNT_WIDTH: usize = 4;
/// Spaces kept between the index column and the widest amount.
const AMOUNT_MARGIN: usize = 4;

/// Renders `(index, transaction)` rows with zero-padded indices and
/// right-aligned amounts, one row per line with no trailing newline.
///
/// ```text
/// 0     12.50 on 2020-01-01 #food
/// 1  -1040.00 on 2020-01-02 #rent
/// ```
pub fn render_listing(rows: &[(usize, &Transaction)]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let id_width = digit_count(rows.len() - 1);
    let amount_width = amount_column_width(rows.iter().map(|(_, txn)| *txn));

    rows.iter()
        .map(|(index, txn)| {
            let padding = AMOUNT_MARGIN + amount_width - txn.amount().width();
            format!("{index:0id_width$}{:padding$}{txn}", "")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the synthetic total transaction aligned like a listing row without an index.
pub fn render_total(total: &Transaction) -> String {
    let amount_width = amount_column_width(std::iter::once(total));
    let padding = AMOUNT_MARGIN + amount_width - total.amount().width();
    format!("{:padding$}{total}", "")
}

fn amount_column_width<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> usize {
    transactions
        .map(|txn| txn.amount().width())
        .max()
        .unwrap_or(0)
        .max(MIN_AMOUNT_WIDTH)
}

fn digit_count(value: usize) -> usize {
    value.checked_ilog10().map_or(1, |digits| digits as usize + 1)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::ledger::MoneyAmount;

    fn txn(amount: &str, tags: &[&str]) -> Transaction {
        Transaction::new(
            amount.parse::<MoneyAmount>().unwrap(),
            tags.iter().copied(),
            NaiveDate::from_ymd_opt(2015, 11, 30).unwrap(),
        )
    }

    #[test]
    fn empty_listing_is_empty_string() {
        assert_eq!(render_listing(&[]), "");
    }

    #[test]
    fn aligns_amounts_to_the_widest() {
        let a = txn("100.00", &["bill", "hydro"]);
        let b = txn("-5.25", &[]);
        let c = txn("10.00", &["food"]);
        let rows = vec![(0, &a), (1, &b), (2, &c)];
        assert_eq!(
            render_listing(&rows),
            "0    100.00 on 2015-11-30 #bill #hydro\n\
             1     -5.25 on 2015-11-30\n\
             2     10.00 on 2015-11-30 #food"
        );
    }

    #[test]
    fn small_amounts_use_minimum_width() {
        let a = txn("0.00", &[]);
        assert_eq!(render_listing(&[(0, &a)]), "0    0.00 on 2015-11-30");
    }

    #[test]
    fn pads_indices_to_the_last_index_width() {
        let entries: Vec<Transaction> = (0..11).map(|_| txn("1.00", &[])).collect();
        let rows: Vec<(usize, &Transaction)> = entries.iter().enumerate().collect();
        let rendered = render_listing(&rows);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "00    1.00 on 2015-11-30");
        assert_eq!(lines[10], "10    1.00 on 2015-11-30");
    }

    #[test]
    fn total_line_has_margin_and_no_index() {
        let total = txn("-12.34", &["total"]);
        assert_eq!(render_total(&total), "    -12.34 on 2015-11-30 #total");
    }

    #[test]
    fn digit_count_handles_zero() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(1000), 4);
    }
}
