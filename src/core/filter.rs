//! Date filters selecting which transactions feed the reports.

use super::period::YearMonth;
use super::transaction::Transaction;
use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Display;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DateFilter {
    /// Inclusive date range. Missing bounds fall back to the data's extremes.
    Range {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    Month { month: YearMonth },
    /// Two months side by side; `second` is the one reported, `first` the baseline.
    Compare { first: YearMonth, second: YearMonth },
}

impl Default for DateFilter {
    fn default() -> Self {
        DateFilter::Range {
            start: None,
            end: None,
        }
    }
}

impl Display for DateFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateFilter::Range { start, end } => {
                let fmt_bound = |d: &Option<NaiveDate>| {
                    d.map_or_else(|| "…".to_string(), |d| d.format("%Y-%m-%d").to_string())
                };
                write!(f, "{} to {}", fmt_bound(start), fmt_bound(end))
            }
            DateFilter::Month { month } => write!(f, "{month}"),
            DateFilter::Compare { first, second } => write!(f, "{first} vs {second}"),
        }
    }
}

impl DateFilter {
    /// Compares the latest month in the data with the month before it. With a
    /// single month both sides are that month; with no data there is nothing
    /// to compare.
    pub fn compare_latest(records: &[Transaction]) -> Option<Self> {
        let months = available_months(records);
        let first = *months.last()?;
        let second = if months.len() > 1 {
            months[months.len() - 2]
        } else {
            first
        };
        Some(DateFilter::Compare { first, second })
    }

    /// Fills open range bounds from the data so the filter describes exactly
    /// what was selected.
    pub fn resolve(&self, records: &[Transaction]) -> Result<Self> {
        match *self {
            DateFilter::Range { start, end } => {
                let first = records.iter().map(|t| t.date).min();
                let last = records.iter().map(|t| t.date).max();
                match (start, end, first, last) {
                    (Some(s), Some(e), _, _) if s > e => {
                        bail!("Start date {s} is after end date {e}")
                    }
                    (Some(s), None, _, Some(l)) if l < s => {
                        bail!("No transactions on or after {s}: the data ends on {l}")
                    }
                    (None, Some(e), Some(f), _) if f > e => {
                        bail!("No transactions on or before {e}: the data starts on {f}")
                    }
                    _ => {}
                }
                Ok(DateFilter::Range {
                    start: start.or(first),
                    end: end.or(last),
                })
            }
            other => Ok(other),
        }
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            DateFilter::Range { start, end } => {
                start.is_none_or(|s| transaction.date >= s)
                    && end.is_none_or(|e| transaction.date <= e)
            }
            DateFilter::Month { month } => month.contains(transaction.date),
            DateFilter::Compare { first, second } => {
                first.contains(transaction.date) || second.contains(transaction.date)
            }
        }
    }

    pub fn apply(&self, records: &[Transaction]) -> Vec<Transaction> {
        let selected: Vec<Transaction> = records
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect();
        debug!(
            "Filter {} selected {} of {} transactions",
            self,
            selected.len(),
            records.len()
        );
        selected
    }
}

/// Distinct months present in the data, oldest first.
pub fn available_months(records: &[Transaction]) -> Vec<YearMonth> {
    records
        .iter()
        .map(Transaction::period)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transaction::TransactionType;
    use rust_decimal::Decimal;

    fn txn(y: i32, m: u32, d: u32) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            kind: TransactionType::Expense,
            category: "Food".to_string(),
            amount: Decimal::ONE,
            description: String::new(),
            recurring: false,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(2024, 1, 31),
            txn(2024, 2, 1),
            txn(2024, 2, 15),
            txn(2024, 3, 10),
            txn(2023, 12, 24),
        ]
    }

    #[test]
    fn test_range_is_inclusive() {
        let filter = DateFilter::Range {
            start: Some(date(2024, 1, 31)),
            end: Some(date(2024, 2, 15)),
        };
        let selected = filter.apply(&sample());
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn test_open_range_selects_everything() {
        assert_eq!(DateFilter::default().apply(&sample()).len(), 5);
    }

    #[test]
    fn test_resolve_fills_bounds_from_data() {
        let resolved = DateFilter::default().resolve(&sample()).unwrap();
        assert_eq!(
            resolved,
            DateFilter::Range {
                start: Some(date(2023, 12, 24)),
                end: Some(date(2024, 3, 10)),
            }
        );
    }

    #[test]
    fn test_resolve_rejects_inverted_range() {
        let filter = DateFilter::Range {
            start: Some(date(2024, 3, 1)),
            end: Some(date(2024, 2, 1)),
        };
        assert!(filter.resolve(&sample()).is_err());
    }

    #[test]
    fn test_resolve_open_bound_outside_data() {
        let after = DateFilter::Range {
            start: Some(date(2024, 4, 1)),
            end: None,
        };
        let err = after.resolve(&sample()).unwrap_err().to_string();
        assert_eq!(
            err,
            "No transactions on or after 2024-04-01: the data ends on 2024-03-10"
        );

        let before = DateFilter::Range {
            start: None,
            end: Some(date(2023, 1, 1)),
        };
        let err = before.resolve(&sample()).unwrap_err().to_string();
        assert_eq!(
            err,
            "No transactions on or before 2023-01-01: the data starts on 2023-12-24"
        );

        // Without data the open bounds stay open.
        assert_eq!(after.resolve(&[]).unwrap(), after);
    }

    #[test]
    fn test_month_filter() {
        let filter = DateFilter::Month {
            month: "2024-02".parse().unwrap(),
        };
        let selected = filter.apply(&sample());
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|t| t.period().to_string() == "2024-02"));
    }

    #[test]
    fn test_compare_filter_selects_both_months() {
        let filter = DateFilter::Compare {
            first: "2023-12".parse().unwrap(),
            second: "2024-03".parse().unwrap(),
        };
        assert_eq!(filter.apply(&sample()).len(), 2);
    }

    #[test]
    fn test_available_months_sorted_and_distinct() {
        let months: Vec<String> = available_months(&sample())
            .iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-02", "2024-03"]);
    }

    #[test]
    fn test_compare_latest_defaults() {
        let filter = DateFilter::compare_latest(&sample()).unwrap();
        assert_eq!(
            filter,
            DateFilter::Compare {
                first: "2024-03".parse().unwrap(),
                second: "2024-02".parse().unwrap(),
            }
        );

        let single = vec![txn(2024, 5, 1)];
        let filter = DateFilter::compare_latest(&single).unwrap();
        assert_eq!(
            filter,
            DateFilter::Compare {
                first: "2024-05".parse().unwrap(),
                second: "2024-05".parse().unwrap(),
            }
        );

        assert!(DateFilter::compare_latest(&[]).is_none());
    }
}
