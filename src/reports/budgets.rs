//! Budget consumption view
//!
//! Pairs each budget with the spend recorded against its category across
//! the full loaded expense set. Budgets whose category reference does not
//! resolve (null, or pointing at a deleted category) are skipped, matching
//! how the budget screen of the original app filtered its rows.

use crate::models::{Budget, BudgetId, Category, CategoryId, Expense, Money};

/// One budget's consumption
#[derive(Debug, Clone)]
pub struct BudgetStatus {
    pub budget_id: BudgetId,
    pub category_id: CategoryId,
    pub category_name: String,
    /// The budget's limit for its period
    pub limit: Money,
    /// Spend recorded against the category over the loaded set
    pub spent: Money,
    /// `limit - spent`; negative when over budget
    pub remaining: Money,
    pub over_budget: bool,
}

impl BudgetStatus {
    /// Share of the limit consumed, as a percentage. A zero limit counts
    /// as fully consumed once anything is spent.
    pub fn percent_used(&self) -> f64 {
        if self.limit.is_zero() {
            if self.spent.is_zero() {
                0.0
            } else {
                100.0
            }
        } else {
            (self.spent.cents() as f64 / self.limit.cents() as f64) * 100.0
        }
    }
}

/// Compute consumption for every budget with a resolvable category
pub fn budget_status(
    budgets: &[Budget],
    expenses: &[Expense],
    categories: &[Category],
) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .filter_map(|budget| {
            let category_id = budget.category_id?;
            let category = categories.iter().find(|c| c.id == category_id)?;

            let spent: Money = expenses
                .iter()
                .filter(|e| e.category_id == Some(category_id))
                .map(|e| e.amount)
                .sum();

            Some(BudgetStatus {
                budget_id: budget.id,
                category_id,
                category_name: category.name.clone(),
                limit: budget.amount,
                spent,
                remaining: budget.amount - spent,
                over_budget: spent > budget.amount,
            })
        })
        .collect()
}
