//! Headline metrics shown above the reports.
use super::analytics::{self, CategoryTotal};
use super::filter::DateFilter;
use super::period::YearMonth;
use super::transaction::{Transaction, TransactionType};
use rust_decimal::Decimal;
use serde::Serialize;

/// A headline value with an optional change against the previous period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub value: Decimal,
    pub delta: Option<Decimal>,
}

impl Metric {
    fn plain(value: Decimal) -> Self {
        Self { value, delta: None }
    }

    fn with_delta(value: Decimal, delta: Decimal) -> Self {
        Self {
            value,
            delta: Some(delta),
        }
    }
}

/// Which period the cards describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum SummaryScope {
    /// Last month of each series in the range, compared with the month before.
    LatestInRange,
    Month { month: YearMonth },
    Compare { first: YearMonth, second: YearMonth },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCards {
    pub scope: SummaryScope,
    pub income: Metric,
    pub expenses: Metric,
    pub savings: Metric,
    pub net_balance: Metric,
    /// Month used for the per-category expense list, if any.
    pub breakdown_month: Option<YearMonth>,
    pub expense_breakdown: Vec<CategoryTotal>,
}

impl SummaryCards {
    /// Builds the cards from transactions that already passed `filter`.
    pub fn compute(records: &[Transaction], filter: &DateFilter) -> Self {
        let income = analytics::monthly_series(records, TransactionType::Income);
        let expenses = analytics::monthly_series(records, TransactionType::Expense);
        let savings = analytics::monthly_series(records, TransactionType::Savings);
        let net = analytics::monthly_net_balance(records);

        match *filter {
            DateFilter::Month { month } => {
                let at = |series: &[(YearMonth, Decimal)]| Metric::plain(value_at(series, month));
                SummaryCards {
                    scope: SummaryScope::Month { month },
                    income: at(&income),
                    expenses: at(&expenses),
                    savings: at(&savings),
                    net_balance: at(&net),
                    breakdown_month: Some(month),
                    expense_breakdown: expense_breakdown(records, month),
                }
            }
            DateFilter::Compare { first, second } => {
                let compare = |series: &[(YearMonth, Decimal)]| {
                    let current = value_at(series, second);
                    Metric::with_delta(current, current - value_at(series, first))
                };
                SummaryCards {
                    scope: SummaryScope::Compare { first, second },
                    income: compare(&income),
                    expenses: compare(&expenses),
                    savings: compare(&savings),
                    net_balance: compare(&net),
                    breakdown_month: None,
                    expense_breakdown: Vec::new(),
                }
            }
            DateFilter::Range { .. } => {
                let breakdown_month = expenses.last().map(|(month, _)| *month);
                SummaryCards {
                    scope: SummaryScope::LatestInRange,
                    income: latest(&income),
                    expenses: latest(&expenses),
                    savings: latest(&savings),
                    net_balance: latest(&net),
                    breakdown_month,
                    expense_breakdown: breakdown_month
                        .map(|month| expense_breakdown(records, month))
                        .unwrap_or_default(),
                }
            }
        }
    }
}

fn value_at(series: &[(YearMonth, Decimal)], month: YearMonth) -> Decimal {
    series
        .iter()
        .find(|(m, _)| *m == month)
        .map_or(Decimal::ZERO, |(_, v)| *v)
}

/// Last entry of a series and its change from the entry before. Each series
/// is taken on its own, so the last income month may differ from the last
/// expense month.
fn latest(series: &[(YearMonth, Decimal)]) -> Metric {
    let values: Vec<Decimal> = series.iter().map(|(_, v)| *v).collect();
    match values.len() {
        0 => Metric::with_delta(Decimal::ZERO, Decimal::ZERO),
        n => Metric::with_delta(values[n - 1], analytics::period_delta(&values, n - 1)),
    }
}

fn expense_breakdown(records: &[Transaction], month: YearMonth) -> Vec<CategoryTotal> {
    let in_month: Vec<Transaction> = records
        .iter()
        .filter(|t| t.period() == month)
        .cloned()
        .collect();
    analytics::category_totals(&in_month, TransactionType::Expense)
}
