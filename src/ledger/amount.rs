use std::{borrow::Borrow, fmt, str::FromStr};

use thiserror::Error;

const SUBUNITS_PER_UNIT: u64 = 100;

/// Signed fixed-point money value with two decimal places.
///
/// The sign is stored apart from the magnitude so `-0.00` survives a
/// render/parse round trip unchanged. Entered amounts hold at most
/// `u64::MAX` units; sums widen to `u128` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MoneyAmount {
    negative: bool,
    units: u128,
    subunits: u8,
}

/// Text that could not be read as an amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{text}` is not a valid amount")]
pub struct AmountParseError {
    pub text: String,
}

impl MoneyAmount {
    /// Builds an amount from its parts, carrying any subunit overflow into units.
    pub fn new(negative: bool, units: u64, subunits: u64) -> Self {
        Self {
            negative,
            units: u128::from(units) + u128::from(subunits / SUBUNITS_PER_UNIT),
            subunits: (subunits % SUBUNITS_PER_UNIT) as u8,
        }
    }

    /// Converts a decimal value, rounding the fraction to the nearest subunit.
    ///
    /// A fraction that rounds up to a full unit (e.g. `0.995`) carries into
    /// the integer part.
    pub fn from_decimal(value: f64) -> Self {
        let magnitude = value.abs();
        let whole = magnitude.trunc();
        let fraction = ((magnitude - whole) * SUBUNITS_PER_UNIT as f64).round() as u64;
        Self::new(value.is_sign_negative(), whole as u64, fraction)
    }

    /// Sums amounts exactly.
    ///
    /// Credits and debits are accumulated as separate unsigned magnitudes and
    /// subtracted once at the end, so units are never scaled into subunits or
    /// narrowed.
    pub fn sum<I>(amounts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<MoneyAmount>,
    {
        let (credits, debits) = amounts.into_iter().fold(
            ((0u128, 0u128), (0u128, 0u128)),
            |(credits, debits), amount| {
                let amount = amount.borrow();
                let add = |(units, subunits): (u128, u128)| {
                    (units + amount.units, subunits + u128::from(amount.subunits))
                };
                if amount.negative {
                    (credits, add(debits))
                } else {
                    (add(credits), debits)
                }
            },
        );

        let credits = carry(credits);
        let debits = carry(debits);
        let (negative, larger, smaller) = if credits >= debits {
            (false, credits, debits)
        } else {
            (true, debits, credits)
        };
        let (units, subunits) = if larger.1 >= smaller.1 {
            (larger.0 - smaller.0, larger.1 - smaller.1)
        } else {
            (
                larger.0 - smaller.0 - 1,
                larger.1 + u128::from(SUBUNITS_PER_UNIT) - smaller.1,
            )
        };
        Self {
            negative,
            units,
            subunits: subunits as u8,
        }
    }

    /// Returns the same magnitude with the given sign.
    pub fn with_sign(self, negative: bool) -> Self {
        Self { negative, ..self }
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn units(&self) -> u128 {
        self.units
    }

    pub fn subunits(&self) -> u8 {
        self.subunits
    }

    /// Rendered form, e.g. `-100.01`.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Number of characters in the rendered form.
    pub fn width(&self) -> usize {
        let sign = usize::from(self.negative);
        sign + self.units.to_string().len() + 3
    }
}

/// Moves whole units out of the subunit count; `subunits` ends below 100.
fn carry((units, subunits): (u128, u128)) -> (u128, u128) {
    let per_unit = u128::from(SUBUNITS_PER_UNIT);
    (units + subunits / per_unit, subunits % per_unit)
}

impl fmt::Display for MoneyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        write!(f, "{}.{:02}", self.units, self.subunits)
    }
}

impl FromStr for MoneyAmount {
    type Err = AmountParseError;

    /// Reads `[-]digits[.d[d]]` exactly, without passing through floating point.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || AmountParseError {
            text: text.to_string(),
        };

        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (whole, fraction) = match body.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (body, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || fraction.len() > 2 || !all_digits(fraction) {
            return Err(invalid());
        }
        if body.ends_with('.') {
            return Err(invalid());
        }

        let units: u64 = whole.parse().map_err(|_| invalid())?;
        let subunits = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse::<u64>().map_err(|_| invalid())?,
        };
        Ok(Self::new(negative, units, subunits))
    }
}
