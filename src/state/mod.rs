//! Expense aggregate state
//!
//! [`ExpenseState`] owns the session user's working set of expenses,
//! categories, and budgets, and mediates every mutation. The remote store
//! remains the source of truth; the collections here are an optimistically
//! patched cache. On a successful write the returned or patched row is
//! spliced into the local arrays without re-fetching, so concurrent edits
//! from another device can leave this cache stale until the next refresh.
//! That divergence is accepted.

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use crate::config::Session;
use crate::error::{OutlayError, OutlayResult};
use crate::models::{
    match_category, Budget, BudgetId, BudgetPatch, Category, CategoryId, CategoryPatch,
    DefaultCategory, Expense, ExpenseId, ExpensePatch, NewBudget, NewCategory, NewExpense, UserId,
};
use crate::reports::{
    budget_status, category_breakdown, daily_spend, month_summary, BudgetStatus, CategorySpend,
    DailySpend, MonthSummary,
};
use crate::store::DataStore;

/// Lifecycle of the aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// Nothing fetched yet
    #[default]
    Uninitialized,
    /// A load is in flight
    Loading,
    /// Collections reflect the last successful load
    Loaded,
    /// No session; collections cleared
    Empty,
}

/// The session user's working set, backed by an injected store
pub struct ExpenseState<S> {
    store: S,
    session: Option<Session>,
    phase: LoadPhase,
    expenses: Vec<Expense>,
    categories: Vec<Category>,
    budgets: Vec<Budget>,
}

impl<S: DataStore> ExpenseState<S> {
    /// Create an unloaded aggregate with no session
    pub fn new(store: S) -> Self {
        Self {
            store,
            session: None,
            phase: LoadPhase::Uninitialized,
            expenses: Vec::new(),
            categories: Vec::new(),
            budgets: Vec::new(),
        }
    }

    /// Create an unloaded aggregate for a session
    pub fn with_session(store: S, session: Session) -> Self {
        let mut state = Self::new(store);
        state.session = Some(session);
        state
    }

    /// Replace the session (e.g. on login/logout). The caller is expected
    /// to follow up with [`ExpenseState::load`].
    pub fn set_session(&mut self, session: Option<Session>) {
        self.session = session;
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The backing store (read access; mutations go through this aggregate)
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    /// Fetch all three collections for the session user.
    ///
    /// The fetches run concurrently with no mutual ordering. When the
    /// category fetch comes back empty the seven defaults are seeded
    /// sequentially before the collection is exposed. With no session the
    /// collections are cleared instead. On any fetch error the previous
    /// collections and phase are left untouched.
    pub async fn load(&mut self) -> OutlayResult<()> {
        let Some(session) = self.session.clone() else {
            self.expenses.clear();
            self.categories.clear();
            self.budgets.clear();
            self.phase = LoadPhase::Empty;
            return Ok(());
        };

        let previous = self.phase;
        self.phase = LoadPhase::Loading;
        let user = session.user_id;

        let fetched = tokio::try_join!(
            self.store.list_expenses(user),
            self.store.list_categories(user),
            self.store.list_budgets(user),
        );

        let (expenses, categories, budgets) = match fetched {
            Ok(collections) => collections,
            Err(e) => {
                self.phase = previous;
                return Err(e);
            }
        };

        debug!(
            expenses = expenses.len(),
            categories = categories.len(),
            budgets = budgets.len(),
            "loaded collections"
        );

        self.categories = if categories.is_empty() {
            // First run for this user. Not guarded against a concurrent
            // first load elsewhere; two racing sessions can both seed.
            self.seed_default_categories(user).await
        } else {
            categories
        };
        self.expenses = expenses;
        self.budgets = budgets;
        self.phase = LoadPhase::Loaded;
        Ok(())
    }

    /// Re-fetch everything (pull-to-refresh equivalent)
    pub async fn refresh(&mut self) -> OutlayResult<()> {
        self.load().await
    }

    /// Create the seven default categories one by one, preserving their
    /// order. A failed create is logged and skipped; there is no rollback
    /// or retry, so a mid-way failure leaves a partial default set.
    async fn seed_default_categories(&self, user: UserId) -> Vec<Category> {
        let defaults = DefaultCategory::all();
        let mut seeded = Vec::with_capacity(defaults.len());

        for default in defaults {
            match self.store.create_category(user, &default.to_new()).await {
                Ok(row) => seeded.push(row),
                Err(e) => {
                    warn!(category = default.name(), error = %e, "failed to seed default category")
                }
            }
        }

        debug!(count = seeded.len(), "seeded default categories");
        seeded
    }

    /// Record a new expense and prepend the stored row to the local list.
    ///
    /// The list is not re-sorted, on the assumption that new expenses are
    /// chronologically newest; a backdated entry sits out of order until
    /// the next refresh.
    pub async fn add_expense(&mut self, new: NewExpense) -> OutlayResult<&Expense> {
        let user = self.require_session()?.user_id;
        let row = self.store.create_expense(user, &new).await?;
        self.expenses.insert(0, row);
        Ok(&self.expenses[0])
    }

    /// Update an expense remotely, then patch the cached row
    pub async fn update_expense(&mut self, id: ExpenseId, patch: ExpensePatch) -> OutlayResult<()> {
        self.require_session()?;
        self.store.update_expense(id, &patch).await?;
        if let Some(row) = self.expenses.iter_mut().find(|e| e.id == id) {
            patch.apply(row);
        }
        Ok(())
    }

    /// Delete an expense remotely, then drop exactly that row locally
    pub async fn delete_expense(&mut self, id: ExpenseId) -> OutlayResult<()> {
        self.require_session()?;
        self.store.delete_expense(id).await?;
        self.expenses.retain(|e| e.id != id);
        Ok(())
    }

    /// Create a category and append the stored row
    pub async fn add_category(&mut self, new: NewCategory) -> OutlayResult<&Category> {
        new.validate()
            .map_err(|e| OutlayError::Validation(e.to_string()))?;
        let user = self.require_session()?.user_id;
        let row = self.store.create_category(user, &new).await?;
        self.categories.push(row);
        let last = self.categories.len() - 1;
        Ok(&self.categories[last])
    }

    /// Update a category remotely, then patch the cached row
    pub async fn update_category(
        &mut self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> OutlayResult<()> {
        self.require_session()?;
        self.store.update_category(id, &patch).await?;
        if let Some(row) = self.categories.iter_mut().find(|c| c.id == id) {
            patch.apply(row);
        }
        Ok(())
    }

    /// Create a budget and append the stored row.
    ///
    /// No duplicate-per-category check happens here; the presentation
    /// layer screens for that before calling.
    pub async fn add_budget(&mut self, new: NewBudget) -> OutlayResult<&Budget> {
        let user = self.require_session()?.user_id;
        let row = self.store.create_budget(user, &new).await?;
        self.budgets.push(row);
        let last = self.budgets.len() - 1;
        Ok(&self.budgets[last])
    }

    /// Update a budget remotely, then patch the cached row
    pub async fn update_budget(&mut self, id: BudgetId, patch: BudgetPatch) -> OutlayResult<()> {
        self.require_session()?;
        self.store.update_budget(id, &patch).await?;
        if let Some(row) = self.budgets.iter_mut().find(|b| b.id == id) {
            patch.apply(row);
        }
        Ok(())
    }

    /// Look up an expense in the cache
    pub fn find_expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Look up a category in the cache
    pub fn category_by_id(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Resolve a category by id or exact (case-insensitive) name
    pub fn resolve_category(&self, reference: &str) -> Option<&Category> {
        if let Ok(id) = reference.parse::<CategoryId>() {
            if let Some(category) = self.category_by_id(id) {
                return Some(category);
            }
        }
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(reference.trim()))
    }

    /// Match an AI-reported category label (exact, then substring)
    pub fn match_ai_category(&self, label: &str) -> Option<&Category> {
        match_category(&self.categories, label)
    }

    /// The budget covering a category, if one exists
    pub fn budget_for_category(&self, category_id: CategoryId) -> Option<&Budget> {
        self.budgets
            .iter()
            .find(|b| b.category_id == Some(category_id))
    }

    /// Current-month total and count (see [`month_summary`])
    pub fn month_summary(&self) -> MonthSummary {
        month_summary(&self.expenses, Utc::now().date_naive())
    }

    /// Current-month total and count for a fixed `today` (testable form)
    pub fn month_summary_at(&self, today: NaiveDate) -> MonthSummary {
        month_summary(&self.expenses, today)
    }

    /// Per-category totals over the full loaded set
    pub fn category_breakdown(&self) -> Vec<CategorySpend> {
        category_breakdown(&self.expenses, &self.categories)
    }

    /// Spend bucketed by the last `days` distinct days
    pub fn daily_spend(&self, days: usize) -> Vec<DailySpend> {
        daily_spend(&self.expenses, days)
    }

    /// Spent-vs-limit for every resolvable budget
    pub fn budget_status(&self) -> Vec<BudgetStatus> {
        budget_status(&self.budgets, &self.expenses, &self.categories)
    }

    fn require_session(&self) -> OutlayResult<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| OutlayError::Auth("not signed in".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InputMethod, Money, UserId};
    use crate::store::MemoryStore;

    fn session() -> Session {
        Session {
            user_id: UserId::new(),
            access_token: String::new(),
        }
    }

    fn new_expense(cents: i64, date: &str) -> NewExpense {
        NewExpense {
            amount: Money::from_cents(cents),
            category_id: None,
            description: Some("test".into()),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            input_method: InputMethod::Manual,
            photo_url: None,
        }
    }

    #[tokio::test]
    async fn test_load_without_session_empties() {
        let mut state = ExpenseState::new(MemoryStore::new());
        state.load().await.unwrap();
        assert_eq!(state.phase(), LoadPhase::Empty);
        assert!(state.expenses().is_empty());
        assert!(state.categories().is_empty());
    }

    #[tokio::test]
    async fn test_first_load_seeds_seven_defaults() {
        let mut state = ExpenseState::with_session(MemoryStore::new(), session());
        state.load().await.unwrap();

        assert_eq!(state.phase(), LoadPhase::Loaded);
        assert_eq!(state.categories().len(), 7);
        let names: Vec<_> = state.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Food", "Transport", "Shopping", "Entertainment", "Bills", "Health", "Other"]
        );
    }

    #[tokio::test]
    async fn test_second_load_does_not_reseed() {
        let mut state = ExpenseState::with_session(MemoryStore::new(), session());
        state.load().await.unwrap();
        state.refresh().await.unwrap();
        assert_eq!(state.categories().len(), 7);
    }

    #[tokio::test]
    async fn test_add_expense_prepends_without_reload() {
        let mut state = ExpenseState::with_session(MemoryStore::new(), session());
        state.load().await.unwrap();

        state.add_expense(new_expense(500, "2026-08-01")).await.unwrap();
        state.add_expense(new_expense(900, "2026-08-02")).await.unwrap();

        // Most recent mutation is visible first, no refresh needed
        assert_eq!(state.expenses().len(), 2);
        assert_eq!(state.expenses()[0].amount.cents(), 900);
    }

    #[tokio::test]
    async fn test_add_expense_requires_session() {
        let mut state = ExpenseState::new(MemoryStore::new());
        state.load().await.unwrap();

        let err = state.add_expense(new_expense(500, "2026-08-01")).await.unwrap_err();
        assert!(err.is_auth());
        assert!(state.expenses().is_empty());
    }

    #[tokio::test]
    async fn test_backdated_expense_stays_at_front_until_refresh() {
        let mut state = ExpenseState::with_session(MemoryStore::new(), session());
        state.load().await.unwrap();

        state.add_expense(new_expense(100, "2026-08-02")).await.unwrap();
        state.add_expense(new_expense(200, "2026-07-01")).await.unwrap();

        // Optimistic prepend leaves the backdated row first...
        assert_eq!(state.expenses()[0].amount.cents(), 200);

        // ...and a refresh restores store ordering (newest date first)
        state.refresh().await.unwrap();
        assert_eq!(state.expenses()[0].amount.cents(), 100);
    }

    #[tokio::test]
    async fn test_update_expense_patches_cache() {
        let mut state = ExpenseState::with_session(MemoryStore::new(), session());
        state.load().await.unwrap();

        let id = state.add_expense(new_expense(500, "2026-08-01")).await.unwrap().id;
        state
            .update_expense(
                id,
                ExpensePatch {
                    amount: Some(Money::from_cents(750)),
                    description: Some(Some("updated".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let row = state.find_expense(id).unwrap();
        assert_eq!(row.amount.cents(), 750);
        assert_eq!(row.description.as_deref(), Some("updated"));
    }

    #[tokio::test]
    async fn test_failed_update_leaves_cache_unchanged() {
        let mut state = ExpenseState::with_session(MemoryStore::new(), session());
        state.load().await.unwrap();

        state.add_expense(new_expense(500, "2026-08-01")).await.unwrap();
        let err = state
            .update_expense(
                ExpenseId::new(), // unknown id: the store rejects it
                ExpensePatch {
                    amount: Some(Money::from_cents(1)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(state.expenses()[0].amount.cents(), 500);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let mut state = ExpenseState::with_session(MemoryStore::new(), session());
        state.load().await.unwrap();

        let keep = state.add_expense(new_expense(100, "2026-08-01")).await.unwrap().id;
        let gone = state.add_expense(new_expense(200, "2026-08-02")).await.unwrap().id;

        state.delete_expense(gone).await.unwrap();

        assert_eq!(state.expenses().len(), 1);
        assert_eq!(state.expenses()[0].id, keep);
        assert!(state.find_expense(gone).is_none());
    }

    #[tokio::test]
    async fn test_month_summary_over_live_cache() {
        let mut state = ExpenseState::with_session(MemoryStore::new(), session());
        state.load().await.unwrap();

        state.add_expense(new_expense(1000, "2026-08-01")).await.unwrap();
        state.add_expense(new_expense(500, "2026-08-03")).await.unwrap();
        state.add_expense(new_expense(9000, "2026-07-15")).await.unwrap();

        let summary = state.month_summary_at(NaiveDate::from_ymd_opt(2026, 8, 5).unwrap());
        assert_eq!(summary.total.cents(), 1500);
        assert_eq!(summary.count, 2);
    }

    #[tokio::test]
    async fn test_budget_lookup_and_status() {
        let mut state = ExpenseState::with_session(MemoryStore::new(), session());
        state.load().await.unwrap();

        let food_id = state.resolve_category("food").unwrap().id;
        state
            .add_budget(NewBudget {
                category_id: Some(food_id),
                amount: Money::from_cents(10000),
                period: Default::default(),
            })
            .await
            .unwrap();

        assert!(state.budget_for_category(food_id).is_some());

        state
            .add_expense(NewExpense {
                category_id: Some(food_id),
                ..new_expense(2500, "2026-08-01")
            })
            .await
            .unwrap();

        let statuses = state.budget_status();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].spent.cents(), 2500);
        assert!(!statuses[0].over_budget);
    }

    #[tokio::test]
    async fn test_ai_category_matching() {
        let mut state = ExpenseState::with_session(MemoryStore::new(), session());
        state.load().await.unwrap();

        assert_eq!(state.match_ai_category("food").unwrap().name, "Food");
        assert!(state.match_ai_category("Subscriptions").is_none());
    }

    #[tokio::test]
    async fn test_logout_empties_collections() {
        let mut state = ExpenseState::with_session(MemoryStore::new(), session());
        state.load().await.unwrap();
        state.add_expense(new_expense(100, "2026-08-01")).await.unwrap();

        state.set_session(None);
        state.load().await.unwrap();

        assert_eq!(state.phase(), LoadPhase::Empty);
        assert!(state.expenses().is_empty());
        assert!(state.budgets().is_empty());
    }
}
