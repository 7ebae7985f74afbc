//! Expense model
//!
//! An expense is a single spend event owned by one user. Besides manual
//! entry, expenses can originate from AI-parsed chat text, voice recordings,
//! or receipt photos; the originating channel is kept on the row.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId, UserId};
use super::money::Money;

/// How an expense was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
    /// Typed in field by field
    #[default]
    Manual,
    /// Parsed from free chat text
    Chat,
    /// Parsed from a voice recording
    Voice,
    /// Parsed from a receipt photo
    Photo,
}

impl InputMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Chat => "chat",
            Self::Voice => "voice",
            Self::Photo => "photo",
        }
    }
}

impl fmt::Display for InputMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single expense row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Owning user
    pub user_id: UserId,

    /// Amount spent (expected non-negative, not enforced)
    pub amount: Money,

    /// Category, if assigned. Expected to reference a category of the same
    /// user; not enforced on this side of the wire.
    pub category_id: Option<CategoryId>,

    /// Free-text description
    pub description: Option<String>,

    /// Calendar date of the spend (no timezone beyond ISO-8601 storage)
    pub date: NaiveDate,

    /// How the expense was captured
    #[serde(default)]
    pub input_method: InputMethod,

    /// Reference to an attached receipt photo, if any
    pub photo_url: Option<String>,

    /// When the row was created
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Materialize an expense from a creation request, assigning a fresh id
    /// and creation timestamp. Used by stores that do not delegate those to
    /// a backing database.
    pub fn from_new(user_id: UserId, new: NewExpense) -> Self {
        Self {
            id: ExpenseId::new(),
            user_id,
            amount: new.amount,
            category_id: new.category_id,
            description: new.description,
            date: new.date,
            input_method: new.input_method,
            photo_url: new.photo_url,
            created_at: Utc::now(),
        }
    }
}

/// Fields supplied when creating an expense; the store fills in the id,
/// owner, and creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: Money,
    pub category_id: Option<CategoryId>,
    pub description: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub input_method: InputMethod,
    pub photo_url: Option<String>,
}

/// A partial update to an expense.
///
/// Outer `None` means "leave unchanged" and is omitted from the wire;
/// `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExpensePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<CategoryId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<Option<String>>,
}

impl ExpensePatch {
    /// Check whether the patch changes anything
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category_id.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.photo_url.is_none()
    }

    /// Apply the patch to a local expense row
    pub fn apply(&self, expense: &mut Expense) {
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(category_id) = self.category_id {
            expense.category_id = category_id;
        }
        if let Some(description) = &self.description {
            expense.description = description.clone();
        }
        if let Some(date) = self.date {
            expense.date = date;
        }
        if let Some(photo_url) = &self.photo_url {
            expense.photo_url = photo_url.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_new() -> NewExpense {
        NewExpense {
            amount: Money::from_cents(550),
            category_id: Some(CategoryId::new()),
            description: Some("Coffee".into()),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            input_method: InputMethod::Chat,
            photo_url: None,
        }
    }

    #[test]
    fn test_from_new() {
        let user = UserId::new();
        let new = sample_new();
        let expense = Expense::from_new(user, new.clone());

        assert_eq!(expense.user_id, user);
        assert_eq!(expense.amount, new.amount);
        assert_eq!(expense.category_id, new.category_id);
        assert_eq!(expense.input_method, InputMethod::Chat);
    }

    #[test]
    fn test_input_method_serde() {
        assert_eq!(serde_json::to_string(&InputMethod::Photo).unwrap(), "\"photo\"");
        let m: InputMethod = serde_json::from_str("\"voice\"").unwrap();
        assert_eq!(m, InputMethod::Voice);
    }

    #[test]
    fn test_patch_apply() {
        let mut expense = Expense::from_new(UserId::new(), sample_new());

        let patch = ExpensePatch {
            amount: Some(Money::from_cents(999)),
            category_id: Some(None),
            description: None,
            date: None,
            photo_url: None,
        };
        patch.apply(&mut expense);

        assert_eq!(expense.amount.cents(), 999);
        assert!(expense.category_id.is_none());
        assert_eq!(expense.description.as_deref(), Some("Coffee"));
    }

    #[test]
    fn test_patch_wire_format() {
        // Unchanged fields are omitted; cleared fields serialize as null
        let patch = ExpensePatch {
            amount: Some(Money::from_cents(100)),
            category_id: Some(None),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["amount"], 100);
        assert!(json["category_id"].is_null());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ExpensePatch::default().is_empty());
        let patch = ExpensePatch {
            date: Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_serialization_round_trip() {
        let expense = Expense::from_new(UserId::new(), sample_new());
        let json = serde_json::to_string(&expense).unwrap();
        let deserialized: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(expense.id, deserialized.id);
        assert_eq!(expense.amount, deserialized.amount);
        assert_eq!(expense.date, deserialized.date);
    }
}
