//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod expense;
pub mod log;
pub mod news;

// Re-export main types for cleaner imports
pub use currency::{CurrencyRateProvider, RateQuote};
pub use expense::{Category, Expense, ExpenseChanges, ExpenseDraft, NewExpense, ValidationErrors};
pub use news::{HeadlineProvider, HeadlineSummary};
