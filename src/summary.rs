//! Spending totals per category and per month.

use crate::core::{Category, Expense};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    /// `YYYY-MM`
    pub month: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingSummary {
    pub count: usize,
    pub total: Decimal,
    pub by_category: Vec<CategoryTotal>,
    pub monthly: Vec<MonthTotal>,
}

/// Inclusive date bounds; a missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

pub fn summarize(expenses: &[Expense], range: DateRange) -> SpendingSummary {
    let mut count = 0;
    let mut total = Decimal::ZERO;
    let mut by_category: BTreeMap<Category, Decimal> = BTreeMap::new();
    let mut monthly: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();

    for expense in expenses.iter().filter(|e| range.contains(e.date)) {
        count += 1;
        total += expense.amount;
        *by_category.entry(expense.category).or_default() += expense.amount;
        *monthly
            .entry((expense.date.year(), expense.date.month()))
            .or_default() += expense.amount;
    }

    SpendingSummary {
        count,
        total: with_cents(total),
        by_category: by_category
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                category,
                total: with_cents(total),
            })
            .collect(),
        monthly: monthly
            .into_iter()
            .map(|((year, month), total)| MonthTotal {
                month: format!("{year:04}-{month:02}"),
                total: with_cents(total),
            })
            .collect(),
    }
}

fn with_cents(mut value: Decimal) -> Decimal {
    value.rescale(crate::core::expense::AMOUNT_DECIMAL_PLACES);
    value
}
