//! Demo data
//!
//! Seeds a representative week and a half of expenses through the normal
//! mutation path, so the reports have something to show when trying the
//! tool out against the in-memory store.

use chrono::{Duration, Utc};

use crate::error::OutlayResult;
use crate::models::{InputMethod, Money, NewExpense};
use crate::state::ExpenseState;
use crate::store::DataStore;

/// (description, amount in cents, category name, days ago)
const DEMO_EXPENSES: &[(&str, i64, &str, i64)] = &[
    ("Coffee at Starbucks", 550, "Food", 0),
    ("Lunch with friends", 2500, "Food", 1),
    ("Uber to office", 1250, "Transport", 1),
    ("Netflix subscription", 1599, "Entertainment", 2),
    ("Grocery shopping", 8530, "Shopping", 2),
    ("Gas station", 4500, "Transport", 3),
    ("Movie tickets", 2800, "Entertainment", 3),
    ("Pharmacy", 3250, "Health", 4),
    ("Dinner at restaurant", 6500, "Food", 4),
    ("Electricity bill", 12000, "Bills", 5),
    ("Gym membership", 5000, "Health", 5),
    ("Online shopping", 9500, "Shopping", 6),
];

/// Seed the demo expenses into the loaded state, resolving category names
/// against whatever categories the load produced. Returns how many rows
/// were created.
pub async fn seed_demo_data<S: DataStore>(state: &mut ExpenseState<S>) -> OutlayResult<usize> {
    let today = Utc::now().date_naive();

    for (description, cents, category, days_ago) in DEMO_EXPENSES {
        let category_id = state.resolve_category(category).map(|c| c.id);

        state
            .add_expense(NewExpense {
                amount: Money::from_cents(*cents),
                category_id,
                description: Some((*description).to_string()),
                date: today - Duration::days(*days_ago),
                input_method: InputMethod::Manual,
                photo_url: None,
            })
            .await?;
    }

    Ok(DEMO_EXPENSES.len())
}
