//! Data-access layer for Outlay
//!
//! The remote relational store is the single source of truth. [`DataStore`]
//! is the generic access seam: three resources (expenses, categories,
//! budgets), each scoped by the owning user, with list/create/update verbs
//! and delete for expenses only. Every operation is one independent remote
//! call; there is no pagination and no transaction spanning writes.
//!
//! Two implementations exist: [`RestStore`] talks to the remote store over
//! HTTP, [`MemoryStore`] keeps everything in process for offline/demo use
//! and tests.

pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use crate::error::OutlayResult;
use crate::models::{
    Budget, BudgetId, BudgetPatch, Category, CategoryId, CategoryPatch, Expense, ExpenseId,
    ExpensePatch, NewBudget, NewCategory, NewExpense, UserId,
};

/// Generic access to the three owner-scoped resources.
///
/// Callers must check the returned `Result` before trusting any data; on
/// error the caller's local state is expected to stay untouched.
#[allow(async_fn_in_trait)]
pub trait DataStore {
    /// List a user's expenses, newest date first
    async fn list_expenses(&self, user_id: UserId) -> OutlayResult<Vec<Expense>>;

    /// Create an expense, returning the stored row
    async fn create_expense(&self, user_id: UserId, new: &NewExpense) -> OutlayResult<Expense>;

    /// Apply a partial update to an expense
    async fn update_expense(&self, id: ExpenseId, patch: &ExpensePatch) -> OutlayResult<()>;

    /// Delete an expense
    async fn delete_expense(&self, id: ExpenseId) -> OutlayResult<()>;

    /// List a user's categories, name ascending
    async fn list_categories(&self, user_id: UserId) -> OutlayResult<Vec<Category>>;

    /// Create a category, returning the stored row
    async fn create_category(&self, user_id: UserId, new: &NewCategory) -> OutlayResult<Category>;

    /// Apply a partial update to a category
    async fn update_category(&self, id: CategoryId, patch: &CategoryPatch) -> OutlayResult<()>;

    /// List a user's budgets (unordered)
    async fn list_budgets(&self, user_id: UserId) -> OutlayResult<Vec<Budget>>;

    /// Create a budget, returning the stored row
    async fn create_budget(&self, user_id: UserId, new: &NewBudget) -> OutlayResult<Budget>;

    /// Apply a partial update to a budget
    async fn update_budget(&self, id: BudgetId, patch: &BudgetPatch) -> OutlayResult<()>;
}
