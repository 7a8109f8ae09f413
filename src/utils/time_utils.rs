use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// A calendar month used as the grouping key for summaries and budgets.
///
/// Parsed from the `"YYYY-MM"` wire form. Matching against dates compares
/// the parsed year and month rather than the string prefix, so a malformed
/// date like `"2024-0305"` can never leak into month `2024-03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(MonthKey { year, month })
        } else {
            None
        }
    }

    /// The month containing the given date.
    pub fn of(date: NaiveDate) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Whether the date falls inside this calendar month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // month is validated at construction, day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// The month immediately before this one.
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            MonthKey {
                year: self.year - 1,
                month: 12,
            }
        } else {
            MonthKey {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidMonthKey(s.to_string());
        let (year_part, month_part) = s.split_once('-').ok_or_else(invalid)?;
        if year_part.len() != 4 || month_part.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year_part.parse().map_err(|_| invalid())?;
        let month: u32 = month_part.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> String {
        key.to_string()
    }
}

/// The `n` months ending at the month containing `today`, oldest first.
/// Feeds the income/expense trend line.
pub fn last_n_months(today: NaiveDate, n: u32) -> Vec<MonthKey> {
    let mut months = Vec::with_capacity(n as usize);
    let mut current = MonthKey::of(today);
    for _ in 0..n {
        months.push(current);
        current = current.previous();
    }
    months.reverse();
    months
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_month_key() {
        let key: MonthKey = "2024-03".parse().unwrap();
        assert_eq!(key.year(), 2024);
        assert_eq!(key.month(), 3);
        assert_eq!(key.to_string(), "2024-03");
    }

    #[test]
    fn rejects_malformed_month_keys() {
        for input in ["2024-13", "2024-0", "202403", "2024-3", "abcd-ef", ""] {
            assert!(
                input.parse::<MonthKey>().is_err(),
                "expected '{input}' to be rejected"
            );
        }
    }

    #[test]
    fn contains_compares_parsed_dates() {
        let key: MonthKey = "2024-03".parse().unwrap();
        assert!(key.contains(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()));
        assert!(!key.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        assert!(!key.contains(NaiveDate::from_ymd_opt(2023, 3, 5).unwrap()));
    }

    #[test]
    fn last_n_months_spans_year_boundary() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let months = last_n_months(today, 4);
        let keys: Vec<String> = months.iter().map(|m| m.to_string()).collect();
        assert_eq!(keys, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);
    }
}
