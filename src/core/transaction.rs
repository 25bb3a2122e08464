//! Transaction model shared by the loader and the aggregations.

use super::period::YearMonth;
use anyhow::anyhow;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
    Savings,
}

impl TransactionType {
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Income,
        TransactionType::Expense,
        TransactionType::Savings,
    ];
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TransactionType::Income => "Income",
                TransactionType::Expense => "Expense",
                TransactionType::Savings => "Savings",
            }
        )
    }
}

impl FromStr for TransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            "savings" => Ok(TransactionType::Savings),
            _ => Err(anyhow!(
                "Invalid transaction type: '{s}' (expected Income, Expense or Savings)"
            )),
        }
    }
}

/// A single row of the cash-flow file. Amounts are always non-negative; the
/// direction comes from `kind`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub amount: Decimal,
    pub description: String,
    pub recurring: bool,
}

impl Transaction {
    /// Income counts positive, Expense and Savings both leave the balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense | TransactionType::Savings => -self.amount,
        }
    }

    pub fn period(&self) -> YearMonth {
        YearMonth::from_date(self.date)
    }
}
