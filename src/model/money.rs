//! Money amounts stored as whole cents

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Money(cents)
    }

    pub const fn dollars(dollars: u64) -> Self {
        Money(dollars * 100)
    }

    /// Average of the given amounts, rounded half up to the cent
    pub fn average(amounts: &[Money]) -> Money {
        if amounts.is_empty() {
            return Money::ZERO;
        }
        let total: u64 = amounts.iter().map(|m| m.0).sum();
        let count = amounts.len() as u64;
        Money((total + count / 2) / count)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Formats as `$1,250.75`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = (self.0 / 100).to_string();
        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, c) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        write!(f, "${}.{:02}", grouped, self.0 % 100)
    }
}

/// Parses `$5.50`, `1,250.75`, `12` or `0.5`
impl FromStr for Money {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',')
            .collect();
        if cleaned.is_empty() {
            return Err(format!("'{}' is not an amount", s));
        }

        let (whole, fraction) = match cleaned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (cleaned.as_str(), ""),
        };
        if fraction.len() > 2
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(format!("'{}' is not an amount", s));
        }

        let dollars: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| format!("'{}' is too large", s))?
        };
        let cents: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().unwrap_or(0) * 10,
            _ => fraction.parse().unwrap_or(0),
        };
        dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or_else(|| format!("'{}' is too large", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_cents(125_075).to_string(), "$1,250.75");
        assert_eq!(Money::from_cents(50).to_string(), "$0.50");
        assert_eq!(Money::dollars(1_000_000).to_string(), "$1,000,000.00");
    }

    #[test]
    fn test_parse_source_formats() {
        assert_eq!("$5.50".parse::<Money>().unwrap(), Money::from_cents(550));
        assert_eq!("$1,250.75".parse::<Money>().unwrap(), Money::from_cents(125_075));
        assert_eq!("12".parse::<Money>().unwrap(), Money::dollars(12));
        assert_eq!("0.5".parse::<Money>().unwrap(), Money::from_cents(50));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("$".parse::<Money>().is_err());
        assert!("1.234".parse::<Money>().is_err());
        assert!("ten".parse::<Money>().is_err());
        assert!("-3.00".parse::<Money>().is_err());
    }

    #[test]
    fn test_parse_rejects_amount_past_u64_cents() {
        let err = "999999999999999999".parse::<Money>().unwrap_err();
        assert_eq!(err, "'999999999999999999' is too large");
        assert_eq!(
            "184467440737095516.15".parse::<Money>().unwrap(),
            Money::from_cents(u64::MAX)
        );
        assert!("184467440737095516.16".parse::<Money>().is_err());
    }

    #[test]
    fn test_average_rounds_to_cent() {
        let amounts = [Money::from_cents(100), Money::from_cents(101)];
        assert_eq!(Money::average(&amounts), Money::from_cents(101));
        assert_eq!(Money::average(&[]), Money::ZERO);
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::dollars(12), Money::from_cents(50)].into_iter().sum();
        assert_eq!(total, Money::from_cents(1250));
    }
}
