//! Year-month period key used to group transactions.

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A calendar month, ordered chronologically. Displays as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Invalid month {month} for year {year}"));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::from_date(date) == *self
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| anyhow!("Invalid month '{s}', expected YYYY-MM"))?;
        let year: i32 = year
            .parse()
            .with_context(|| format!("Invalid year in month '{s}'"))?;
        let month: u32 = month
            .parse()
            .with_context(|| format!("Invalid month number in '{s}'"))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let ym: YearMonth = "2024-03".parse().unwrap();
        assert_eq!((ym.year, ym.month), (2024, 3));
        assert_eq!(ym.to_string(), "2024-03");
    }

    #[test]
    fn test_invalid_months_are_rejected() {
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("2024-00".parse::<YearMonth>().is_err());
        assert!("2024".parse::<YearMonth>().is_err());
        assert!("abcd-01".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let dec: YearMonth = "2023-12".parse().unwrap();
        let jan: YearMonth = "2024-01".parse().unwrap();
        let feb: YearMonth = "2024-02".parse().unwrap();
        let mut months = vec![feb, dec, jan];
        months.sort();
        assert_eq!(months, vec![dec, jan, feb]);
    }

    #[test]
    fn test_from_date_and_contains() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let ym = YearMonth::from_date(date);
        assert_eq!(ym.to_string(), "2024-02");
        assert!(ym.contains(date));
        assert!(!ym.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    }

    #[test]
    fn test_serde_as_string() {
        let ym: YearMonth = "2024-07".parse().unwrap();
        let json = serde_json::to_string(&ym).unwrap();
        assert_eq!(json, "\"2024-07\"");
        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym);
    }
}
