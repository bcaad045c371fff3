//! Expense entity, categories and write-time validation

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Fractional digits kept for every amount.
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;
/// Total digits allowed in an amount.
pub const AMOUNT_MAX_DIGITS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Travel,
    Bills,
    Shopping,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Travel,
        Category::Bills,
        Category::Shopping,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Bills => "Bills",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("\"{s}\" is not a valid choice."))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn apply(&mut self, changes: ExpenseChanges) {
        if let Some(amount) = changes.amount {
            self.amount = amount;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(date) = changes.date {
            self.date = date;
        }
        if let Some(notes) = changes.notes {
            self.notes = notes;
        }
    }
}

/// Validated fields for a new expense.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl NewExpense {
    pub fn into_expense(self, id: u64, created_at: DateTime<Utc>) -> Expense {
        Expense {
            id,
            amount: self.amount,
            category: self.category,
            date: self.date,
            notes: self.notes,
            created_at,
        }
    }
}

/// Validated fields for an update. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseChanges {
    pub amount: Option<Decimal>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
    pub notes: Option<Option<String>>,
}

/// Field-keyed validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(" ")))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";

/// Raw client payload for an expense write.
///
/// Fields stay untyped until [`ExpenseDraft::validate_new`] or
/// [`ExpenseDraft::validate_changes`] so that every bad field is reported at
/// once instead of failing on the first type mismatch. `id` and `created_at`
/// are read-only and silently dropped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseDraft {
    #[serde(default, deserialize_with = "present")]
    pub amount: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub date: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<Value>,
}

// Keeps an explicit `null` distinguishable from an absent key.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl ExpenseDraft {
    pub fn validate_new(&self) -> Result<NewExpense, ValidationErrors> {
        let changes = self.validate(true)?;
        match (changes.amount, changes.category, changes.date) {
            (Some(amount), Some(category), Some(date)) => Ok(NewExpense {
                amount,
                category,
                date,
                notes: changes.notes.flatten(),
            }),
            // unreachable: validate(true) reports every missing field
            _ => {
                let mut errors = ValidationErrors::default();
                errors.add("non_field_errors", "Incomplete expense.");
                Err(errors)
            }
        }
    }

    /// `partial` is false for a full update, which needs every required field.
    pub fn validate_changes(&self, partial: bool) -> Result<ExpenseChanges, ValidationErrors> {
        self.validate(!partial)
    }

    fn validate(&self, require_all: bool) -> Result<ExpenseChanges, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let mut changes = ExpenseChanges::default();

        match &self.amount {
            Some(value) => match parse_amount(value) {
                Ok(amount) => changes.amount = Some(amount),
                Err(msg) => errors.add("amount", msg),
            },
            None if require_all => errors.add("amount", REQUIRED),
            None => {}
        }

        match &self.category {
            Some(Value::String(s)) => match s.parse::<Category>() {
                Ok(category) => changes.category = Some(category),
                Err(msg) => errors.add("category", msg),
            },
            Some(Value::Null) => errors.add("category", NOT_NULL),
            Some(other) => errors.add("category", format!("\"{other}\" is not a valid choice.")),
            None if require_all => errors.add("category", REQUIRED),
            None => {}
        }

        match &self.date {
            Some(value) => match parse_date(value) {
                Ok(date) => changes.date = Some(date),
                Err(msg) => errors.add("date", msg),
            },
            None if require_all => errors.add("date", REQUIRED),
            None => {}
        }

        match &self.notes {
            Some(Value::Null) => changes.notes = Some(None),
            Some(Value::String(s)) => changes.notes = Some(Some(s.clone())),
            Some(_) => errors.add("notes", "Not a valid string."),
            None => {}
        }

        if errors.is_empty() {
            Ok(changes)
        } else {
            Err(errors)
        }
    }
}

fn parse_amount(value: &Value) -> Result<Decimal, String> {
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        Value::Null => return Err(NOT_NULL.to_string()),
        _ => return Err("A valid number is required.".to_string()),
    };
    let mut amount = Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|_| "A valid number is required.".to_string())?;

    // Scale as written: trailing zeros still count as decimal places.
    if amount.scale() > AMOUNT_DECIMAL_PLACES {
        return Err(format!(
            "Ensure that there are no more than {AMOUNT_DECIMAL_PLACES} decimal places."
        ));
    }
    let whole_digits = AMOUNT_MAX_DIGITS - AMOUNT_DECIMAL_PLACES;
    if amount.abs() >= Decimal::from(10u64.pow(whole_digits)) {
        return Err(format!(
            "Ensure that there are no more than {whole_digits} digits before the decimal point."
        ));
    }

    amount.rescale(AMOUNT_DECIMAL_PLACES);
    Ok(amount)
}

fn parse_date(value: &Value) -> Result<NaiveDate, String> {
    const WRONG_FORMAT: &str =
        "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
    match value {
        Value::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| WRONG_FORMAT.to_string()),
        Value::Null => Err(NOT_NULL.to_string()),
        _ => Err(WRONG_FORMAT.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(value: Value) -> ExpenseDraft {
        serde_json::from_value(value).expect("draft should deserialize")
    }

    #[test]
    fn test_every_category_is_accepted() {
        for category in Category::ALL {
            let new = draft(json!({
                "amount": "10.00",
                "category": category.as_str(),
                "date": "2024-03-01"
            }))
            .validate_new()
            .unwrap();
            assert_eq!(new.category, category);
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let errors = draft(json!({
            "amount": "10.00",
            "category": "Gadgets",
            "date": "2024-03-01"
        }))
        .validate_new()
        .unwrap_err();

        assert_eq!(
            errors.field("category").unwrap(),
            ["\"Gadgets\" is not a valid choice."]
        );
        assert!(errors.field("amount").is_none());
    }

    #[test]
    fn test_category_is_case_sensitive() {
        let errors = draft(json!({"amount": 1, "category": "food", "date": "2024-03-01"}))
            .validate_new()
            .unwrap_err();
        assert!(errors.field("category").is_some());
    }

    #[test]
    fn test_missing_required_fields_are_all_reported() {
        let errors = draft(json!({"notes": "lunch"})).validate_new().unwrap_err();
        for field in ["amount", "category", "date"] {
            assert_eq!(errors.field(field).unwrap(), [REQUIRED]);
        }
    }

    #[test]
    fn test_amount_is_rescaled_to_two_places() {
        let new = draft(json!({"amount": 12.5, "category": "Food", "date": "2024-03-01"}))
            .validate_new()
            .unwrap();
        assert_eq!(new.amount.to_string(), "12.50");

        let new = draft(json!({"amount": "7", "category": "Food", "date": "2024-03-01"}))
            .validate_new()
            .unwrap();
        assert_eq!(new.amount.to_string(), "7.00");
    }

    #[test]
    fn test_amount_precision_limits() {
        let errors = draft(json!({"amount": "1.234", "category": "Food", "date": "2024-03-01"}))
            .validate_new()
            .unwrap_err();
        assert_eq!(
            errors.field("amount").unwrap(),
            ["Ensure that there are no more than 2 decimal places."]
        );

        let errors = draft(json!({
            "amount": "123456789.00",
            "category": "Food",
            "date": "2024-03-01"
        }))
        .validate_new()
        .unwrap_err();
        assert_eq!(
            errors.field("amount").unwrap(),
            ["Ensure that there are no more than 8 digits before the decimal point."]
        );

        let errors = draft(json!({"amount": "abc", "category": "Food", "date": "2024-03-01"}))
            .validate_new()
            .unwrap_err();
        assert_eq!(errors.field("amount").unwrap(), ["A valid number is required."]);
    }

    #[test]
    fn test_trailing_zeros_count_as_decimal_places() {
        let errors = draft(json!({"amount": "12.500", "category": "Food", "date": "2024-03-01"}))
            .validate_new()
            .unwrap_err();
        assert_eq!(
            errors.field("amount").unwrap(),
            ["Ensure that there are no more than 2 decimal places."]
        );

        let new = draft(json!({"amount": "12.50", "category": "Food", "date": "2024-03-01"}))
            .validate_new()
            .unwrap();
        assert_eq!(new.amount.to_string(), "12.50");
    }

    #[test]
    fn test_bad_date_format() {
        let errors = draft(json!({"amount": 1, "category": "Food", "date": "01/03/2024"}))
            .validate_new()
            .unwrap_err();
        assert!(errors.field("date").unwrap()[0].starts_with("Date has wrong format"));
    }

    #[test]
    fn test_partial_changes_only_touch_supplied_fields() {
        let changes = draft(json!({"notes": null})).validate_changes(true).unwrap();
        assert_eq!(
            changes,
            ExpenseChanges {
                notes: Some(None),
                ..Default::default()
            }
        );

        let changes = draft(json!({"category": "Bills"}))
            .validate_changes(true)
            .unwrap();
        assert_eq!(changes.category, Some(Category::Bills));
        assert!(changes.amount.is_none());
        assert!(changes.notes.is_none());
    }

    #[test]
    fn test_full_update_requires_all_fields() {
        let errors = draft(json!({"category": "Bills"}))
            .validate_changes(false)
            .unwrap_err();
        assert!(errors.field("amount").is_some());
        assert!(errors.field("date").is_some());
        assert!(errors.field("category").is_none());
    }

    #[test]
    fn test_read_only_fields_are_ignored() {
        let new = draft(json!({
            "id": 99,
            "created_at": "2000-01-01T00:00:00Z",
            "amount": "3.10",
            "category": "Other",
            "date": "2024-01-02"
        }))
        .validate_new()
        .unwrap();
        let expense = new.into_expense(1, Utc::now());
        assert_eq!(expense.id, 1);
    }

    #[test]
    fn test_expense_json_shape() {
        let expense = Expense {
            id: 4,
            amount: Decimal::new(1250, 2),
            category: Category::Travel,
            date: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
            notes: None,
            created_at: DateTime::parse_from_rfc3339("2024-05-17T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let value = serde_json::to_value(&expense).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 4,
                "amount": "12.50",
                "category": "Travel",
                "date": "2024-05-17",
                "notes": null,
                "created_at": "2024-05-17T10:00:00Z"
            })
        );
    }
}
