//! In-process implementation of the data store
//!
//! Backs the same contract as the HTTP client with process-local maps.
//! Used when no remote store is configured (offline/demo operation) and as
//! the store double in tests.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{OutlayError, OutlayResult};
use crate::models::{
    Budget, BudgetId, BudgetPatch, Category, CategoryId, CategoryPatch, Expense, ExpenseId,
    ExpensePatch, NewBudget, NewCategory, NewExpense, UserId,
};

use super::DataStore;

/// A data store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    expenses: RwLock<HashMap<ExpenseId, Expense>>,
    categories: RwLock<HashMap<CategoryId, Category>>,
    budgets: RwLock<HashMap<BudgetId, Budget>>,
}

fn lock_err<T>(_: T) -> OutlayError {
    OutlayError::Store("store lock poisoned".into())
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of expense rows across all users (test/diagnostic aid)
    pub fn expense_count(&self) -> OutlayResult<usize> {
        Ok(self.expenses.read().map_err(lock_err)?.len())
    }

    /// Total number of category rows across all users (test/diagnostic aid)
    pub fn category_count(&self) -> OutlayResult<usize> {
        Ok(self.categories.read().map_err(lock_err)?.len())
    }

    /// Total number of budget rows across all users (test/diagnostic aid)
    pub fn budget_count(&self) -> OutlayResult<usize> {
        Ok(self.budgets.read().map_err(lock_err)?.len())
    }
}

impl DataStore for MemoryStore {
    async fn list_expenses(&self, user_id: UserId) -> OutlayResult<Vec<Expense>> {
        let expenses = self.expenses.read().map_err(lock_err)?;

        let mut rows: Vec<_> = expenses
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        // Newest date first, matching the remote ordering; creation time
        // breaks ties within a day.
        rows.sort_by(|a, b| (b.date, b.created_at).cmp(&(a.date, a.created_at)));
        Ok(rows)
    }

    async fn create_expense(&self, user_id: UserId, new: &NewExpense) -> OutlayResult<Expense> {
        let row = Expense::from_new(user_id, new.clone());
        let mut expenses = self.expenses.write().map_err(lock_err)?;
        expenses.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_expense(&self, id: ExpenseId, patch: &ExpensePatch) -> OutlayResult<()> {
        let mut expenses = self.expenses.write().map_err(lock_err)?;
        let row = expenses
            .get_mut(&id)
            .ok_or_else(|| OutlayError::expense_not_found(id.to_string()))?;
        patch.apply(row);
        Ok(())
    }

    async fn delete_expense(&self, id: ExpenseId) -> OutlayResult<()> {
        let mut expenses = self.expenses.write().map_err(lock_err)?;
        expenses
            .remove(&id)
            .ok_or_else(|| OutlayError::expense_not_found(id.to_string()))?;
        Ok(())
    }

    async fn list_categories(&self, user_id: UserId) -> OutlayResult<Vec<Category>> {
        let categories = self.categories.read().map_err(lock_err)?;

        let mut rows: Vec<_> = categories
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.name.to_lowercase());
        Ok(rows)
    }

    async fn create_category(&self, user_id: UserId, new: &NewCategory) -> OutlayResult<Category> {
        let row = Category::from_new(user_id, new.clone());
        let mut categories = self.categories.write().map_err(lock_err)?;
        categories.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_category(&self, id: CategoryId, patch: &CategoryPatch) -> OutlayResult<()> {
        let mut categories = self.categories.write().map_err(lock_err)?;
        let row = categories
            .get_mut(&id)
            .ok_or_else(|| OutlayError::category_not_found(id.to_string()))?;
        patch.apply(row);
        Ok(())
    }

    async fn list_budgets(&self, user_id: UserId) -> OutlayResult<Vec<Budget>> {
        let budgets = self.budgets.read().map_err(lock_err)?;

        Ok(budgets
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_budget(&self, user_id: UserId, new: &NewBudget) -> OutlayResult<Budget> {
        let row = Budget::from_new(user_id, new.clone());
        let mut budgets = self.budgets.write().map_err(lock_err)?;
        budgets.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_budget(&self, id: BudgetId, patch: &BudgetPatch) -> OutlayResult<()> {
        let mut budgets = self.budgets.write().map_err(lock_err)?;
        let row = budgets
            .get_mut(&id)
            .ok_or_else(|| OutlayError::budget_not_found(id.to_string()))?;
        patch.apply(row);
        Ok(())
    }
}
