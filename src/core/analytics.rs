//! Aggregations over a (filtered) set of transactions.
//!
//! Every function is pure and returns an empty result for empty input.
//! Series keyed by month or date are returned in chronological order.
use super::period::YearMonth;
use super::transaction::{Transaction, TransactionType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Income, expense and savings totals for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub savings: Decimal,
}

impl MonthlyTotals {
    pub fn get(&self, kind: TransactionType) -> Decimal {
        match kind {
            TransactionType::Income => self.income,
            TransactionType::Expense => self.expense,
            TransactionType::Savings => self.savings,
        }
    }

    pub fn add(&mut self, kind: TransactionType, amount: Decimal) {
        match kind {
            TransactionType::Income => self.income += amount,
            TransactionType::Expense => self.expense += amount,
            TransactionType::Savings => self.savings += amount,
        }
    }

    /// Net balance for the month: savings leave the balance like expenses do.
    pub fn net(&self) -> Decimal {
        self.income - self.expense - self.savings
    }
}

/// A single point of a dated running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// A category and its summed amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// A category's share of the grand total, in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Decimal,
    pub percentage: f64,
}

/// Sums amounts per (month, type). Every month with at least one row is
/// present; types without rows in that month are zero.
pub fn group_by_month_and_type(records: &[Transaction]) -> BTreeMap<YearMonth, MonthlyTotals> {
    let mut grouped: BTreeMap<YearMonth, MonthlyTotals> = BTreeMap::new();
    for t in records {
        grouped.entry(t.period()).or_default().add(t.kind, t.amount);
    }
    debug!("Grouped {} transactions into {} months", records.len(), grouped.len());
    grouped
}

/// Running total of signed amounts, one point per distinct date.
pub fn cumulative_signed_balance(records: &[Transaction]) -> Vec<DatedValue> {
    running_total(records.iter().map(|t| (t.date, t.signed_amount())))
}

/// Running total of the amounts of a single type, one point per date on which
/// that type occurs.
pub fn cumulative_totals(records: &[Transaction], kind: TransactionType) -> Vec<DatedValue> {
    running_total(
        records
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| (t.date, t.amount)),
    )
}

fn running_total(values: impl Iterator<Item = (NaiveDate, Decimal)>) -> Vec<DatedValue> {
    let mut per_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for (date, amount) in values {
        *per_date.entry(date).or_default() += amount;
    }

    let mut total = Decimal::ZERO;
    per_date
        .into_iter()
        .map(|(date, amount)| {
            total += amount;
            DatedValue { date, value: total }
        })
        .collect()
}

/// Sums amounts per category for one type, largest first. Ties are broken by
/// category name.
pub fn category_totals(records: &[Transaction], kind: TransactionType) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for t in records.iter().filter(|t| t.kind == kind) {
        *totals.entry(t.category.as_str()).or_default() += t.amount;
    }

    let mut totals: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    // Stable sort keeps the alphabetical order from the map for equal totals.
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// Percentage of the grand total for each category. Shares are zero when the
/// grand total is zero.
pub fn category_shares(totals: &[CategoryTotal]) -> Vec<CategoryShare> {
    let grand_total: Decimal = totals.iter().map(|c| c.total).sum();
    totals
        .iter()
        .map(|c| {
            let percentage = if grand_total.is_zero() {
                0.0
            } else {
                decimal_to_f64(c.total / grand_total * Decimal::ONE_HUNDRED)
            };
            CategoryShare {
                category: c.category.clone(),
                total: c.total,
                percentage,
            }
        })
        .collect()
}

/// Monthly sums of one type. Only months containing that type appear.
pub fn monthly_series(records: &[Transaction], kind: TransactionType) -> Vec<(YearMonth, Decimal)> {
    let mut series: BTreeMap<YearMonth, Decimal> = BTreeMap::new();
    for t in records.iter().filter(|t| t.kind == kind) {
        *series.entry(t.period()).or_default() += t.amount;
    }
    series.into_iter().collect()
}

/// Income minus expenses minus savings for every month present in the data.
pub fn monthly_net_balance(records: &[Transaction]) -> Vec<(YearMonth, Decimal)> {
    group_by_month_and_type(records)
        .into_iter()
        .map(|(month, totals)| (month, totals.net()))
        .collect()
}

/// Month x category matrix of one type. Each month row holds every category
/// seen in the data, zero when the category has no rows that month.
pub fn monthly_category_totals(
    records: &[Transaction],
    kind: TransactionType,
) -> BTreeMap<YearMonth, BTreeMap<String, Decimal>> {
    let selected: Vec<&Transaction> = records.iter().filter(|t| t.kind == kind).collect();
    let categories: BTreeSet<&str> = selected.iter().map(|t| t.category.as_str()).collect();

    let mut matrix: BTreeMap<YearMonth, BTreeMap<String, Decimal>> = BTreeMap::new();
    for t in &selected {
        let row = matrix.entry(t.period()).or_insert_with(|| {
            categories
                .iter()
                .map(|c| (c.to_string(), Decimal::ZERO))
                .collect()
        });
        *row.entry(t.category.clone()).or_default() += t.amount;
    }
    matrix
}

/// `series[i] - series[i - 1]`, or zero when either side does not exist.
pub fn period_delta(series: &[Decimal], i: usize) -> Decimal {
    match (i.checked_sub(1).and_then(|p| series.get(p)), series.get(i)) {
        (Some(previous), Some(current)) => current - previous,
        _ => Decimal::ZERO,
    }
}

pub fn total(records: &[Transaction], kind: TransactionType) -> Decimal {
    records
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

pub(crate) fn decimal_to_f64(value: Decimal) -> f64 {
    use rust_decimal::prelude::ToPrimitive;
    value.to_f64().unwrap_or(0.0)
}
