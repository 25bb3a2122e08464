use super::analytics::{self, CategoryShare, CategoryTotal, DatedValue, MonthlyTotals};
use super::filter::DateFilter;
use super::period::YearMonth;
use super::summary::SummaryCards;
use super::transaction::{Transaction, TransactionType};
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCashflow {
    pub month: YearMonth,
    #[serde(flatten)]
    pub totals: MonthlyTotals,
    pub net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAmount {
    pub month: YearMonth,
    pub amount: Decimal,
}

/// One row of the expense detail table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRow {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    pub recurring: bool,
}

/// Everything the reports need, computed once for a filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub filter: DateFilter,
    pub transaction_count: usize,
    pub summary: SummaryCards,
    pub monthly_cashflow: Vec<MonthlyCashflow>,
    pub monthly_income: Vec<MonthlyAmount>,
    pub expense_by_category: Vec<CategoryShare>,
    pub monthly_expense_by_category: BTreeMap<YearMonth, BTreeMap<String, Decimal>>,
    pub cumulative_balance: Vec<DatedValue>,
    pub cumulative_savings: Vec<DatedValue>,
    pub expenses: Vec<ExpenseRow>,
}

impl Dashboard {
    pub fn build(records: &[Transaction], filter: &DateFilter) -> Result<Self> {
        let filter = filter.resolve(records)?;
        let selected = filter.apply(records);
        debug!("Building dashboard for {} ({} rows)", filter, selected.len());

        let monthly_cashflow = analytics::group_by_month_and_type(&selected)
            .into_iter()
            .map(|(month, totals)| MonthlyCashflow {
                month,
                totals,
                net: totals.net(),
            })
            .collect();

        let monthly_income = analytics::monthly_series(&selected, TransactionType::Income)
            .into_iter()
            .map(|(month, amount)| MonthlyAmount { month, amount })
            .collect();

        let category_totals: Vec<CategoryTotal> =
            analytics::category_totals(&selected, TransactionType::Expense);

        let mut expenses: Vec<ExpenseRow> = selected
            .iter()
            .filter(|t| t.kind == TransactionType::Expense)
            .map(|t| ExpenseRow {
                date: t.date,
                description: t.description.clone(),
                category: t.category.clone(),
                amount: t.amount,
                recurring: t.recurring,
            })
            .collect();
        expenses.sort_by_key(|row| row.date);

        Ok(Dashboard {
            filter,
            transaction_count: selected.len(),
            summary: SummaryCards::compute(&selected, &filter),
            monthly_cashflow,
            monthly_income,
            expense_by_category: analytics::category_shares(&category_totals),
            monthly_expense_by_category: analytics::monthly_category_totals(
                &selected,
                TransactionType::Expense,
            ),
            cumulative_balance: analytics::cumulative_signed_balance(&selected),
            cumulative_savings: analytics::cumulative_totals(&selected, TransactionType::Savings),
            expenses,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}
