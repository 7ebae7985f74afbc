//! Core data models for Outlay
//!
//! Plain serde-friendly types mirroring the three remote resources
//! (expenses, categories, budgets), plus the strongly-typed IDs and the
//! fixed-point money type they share.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;

pub use budget::{Budget, BudgetPatch, BudgetPeriod, NewBudget};
pub use category::{
    match_category, Category, CategoryPatch, CategoryValidationError, DefaultCategory, NewCategory,
};
pub use expense::{Expense, ExpensePatch, InputMethod, NewExpense};
pub use ids::{BudgetId, CategoryId, ExpenseId, UserId};
pub use money::{Money, MoneyParseError};
