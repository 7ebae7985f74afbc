//! Spending views
//!
//! Pure computations over the loaded expense and category arrays: the
//! current-month summary, the per-category breakdown across the full
//! loaded set, and spend bucketed by the last few distinct days. Nothing
//! here is stored; callers recompute on demand.

use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap};

use crate::models::{Category, CategoryId, DefaultCategory, Expense, Money};

/// Total and transaction count for the current month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSummary {
    /// Sum of amounts dated in [first-of-month, today]
    pub total: Money,
    /// Number of expenses in the window
    pub count: usize,
}

/// Current-month spend: every expense dated from the first of `today`'s
/// month up to `today` inclusive. Future-dated entries are excluded.
pub fn month_summary(expenses: &[Expense], today: NaiveDate) -> MonthSummary {
    let first_of_month =
        NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);

    let in_month = expenses
        .iter()
        .filter(|e| e.date >= first_of_month && e.date <= today);

    let mut total = Money::zero();
    let mut count = 0;
    for expense in in_month {
        total += expense.amount;
        count += 1;
    }

    MonthSummary { total, count }
}

/// One category's share of the full loaded expense set
#[derive(Debug, Clone)]
pub struct CategorySpend {
    /// `None` for the fallback bucket of uncategorized or unresolvable rows
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub color: String,
    pub total: Money,
    pub count: usize,
}

/// Per-category totals over all loaded expenses.
///
/// Rows without a category, or whose category no longer resolves, land in
/// a single fallback bucket named after the default "Other" category.
/// Sorted by total descending, then name.
pub fn category_breakdown(expenses: &[Expense], categories: &[Category]) -> Vec<CategorySpend> {
    let by_id: HashMap<CategoryId, &Category> =
        categories.iter().map(|c| (c.id, c)).collect();

    let mut buckets: HashMap<Option<CategoryId>, (Money, usize)> = HashMap::new();
    for expense in expenses {
        let key = expense
            .category_id
            .filter(|id| by_id.contains_key(id));
        let entry = buckets.entry(key).or_insert((Money::zero(), 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let mut spends: Vec<CategorySpend> = buckets
        .into_iter()
        .map(|(key, (total, count))| match key.and_then(|id| by_id.get(&id)) {
            Some(category) => CategorySpend {
                category_id: Some(category.id),
                name: category.name.clone(),
                color: category.color.clone(),
                total,
                count,
            },
            None => CategorySpend {
                category_id: None,
                name: DefaultCategory::Other.name().to_string(),
                color: DefaultCategory::Other.color().to_string(),
                total,
                count,
            },
        })
        .collect();

    spends.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    spends
}

/// Total spend on one calendar day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySpend {
    pub date: NaiveDate,
    pub total: Money,
}

/// Spend bucketed by day for the last `days` distinct days that have any
/// expenses, oldest first. Days without expenses do not produce buckets.
pub fn daily_spend(expenses: &[Expense], days: usize) -> Vec<DailySpend> {
    let mut by_day: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for expense in expenses {
        *by_day.entry(expense.date).or_insert(Money::zero()) += expense.amount;
    }

    let mut recent: Vec<DailySpend> = by_day
        .into_iter()
        .rev()
        .take(days)
        .map(|(date, total)| DailySpend { date, total })
        .collect();
    recent.reverse();
    recent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InputMethod, NewExpense, UserId};

    fn expense(user: UserId, cents: i64, date: &str, category_id: Option<CategoryId>) -> Expense {
        Expense::from_new(
            user,
            NewExpense {
                amount: Money::from_cents(cents),
                category_id,
                description: None,
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                input_method: InputMethod::Manual,
                photo_url: None,
            },
        )
    }

    #[test]
    fn test_month_summary_window() {
        let user = UserId::new();
        let today = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let expenses = vec![
            expense(user, 1000, "2026-08-01", None), // in window
            expense(user, 2000, "2026-08-05", None), // today, in window
            expense(user, 4000, "2026-08-20", None), // future-dated, out
            expense(user, 8000, "2026-07-31", None), // last month, out
        ];

        let summary = month_summary(&expenses, today);
        assert_eq!(summary.total.cents(), 3000);
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn test_month_summary_empty() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let summary = month_summary(&[], today);
        assert_eq!(summary.total, Money::zero());
        assert_eq!(summary.count, 0);
    }

    #[test]
    fn test_breakdown_totals_and_order() {
        let user = UserId::new();
        let food = Category::from_new(user, DefaultCategory::Food.to_new());
        let bills = Category::from_new(user, DefaultCategory::Bills.to_new());
        let categories = vec![food.clone(), bills.clone()];

        let expenses = vec![
            expense(user, 500, "2026-08-01", Some(food.id)),
            expense(user, 1500, "2026-08-02", Some(food.id)),
            expense(user, 12000, "2026-08-03", Some(bills.id)),
        ];

        let breakdown = category_breakdown(&expenses, &categories);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].name, "Bills");
        assert_eq!(breakdown[0].total.cents(), 12000);
        assert_eq!(breakdown[1].name, "Food");
        assert_eq!(breakdown[1].total.cents(), 2000);
        assert_eq!(breakdown[1].count, 2);
    }

    #[test]
    fn test_breakdown_unmatched_rows_fall_back_to_other() {
        let user = UserId::new();
        let categories = vec![Category::from_new(user, DefaultCategory::Food.to_new())];

        let expenses = vec![
            expense(user, 100, "2026-08-01", None),                      // uncategorized
            expense(user, 200, "2026-08-02", Some(CategoryId::new())),   // dangling reference
        ];

        let breakdown = category_breakdown(&expenses, &categories);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].name, "Other");
        assert!(breakdown[0].category_id.is_none());
        assert_eq!(breakdown[0].total.cents(), 300);
    }

    #[test]
    fn test_daily_spend_last_seven_distinct_days() {
        let user = UserId::new();
        let mut expenses = Vec::new();
        for day in 1..=9 {
            expenses.push(expense(user, 100 * day as i64, &format!("2026-08-{:02}", day), None));
        }
        // A second expense on an existing day merges into its bucket
        expenses.push(expense(user, 1, "2026-08-09", None));

        let buckets = daily_spend(&expenses, 7);
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].date, NaiveDate::from_ymd_opt(2026, 8, 3).unwrap());
        assert_eq!(buckets[6].date, NaiveDate::from_ymd_opt(2026, 8, 9).unwrap());
        assert_eq!(buckets[6].total.cents(), 901);
    }

    #[test]
    fn test_daily_spend_fewer_days_than_requested() {
        let user = UserId::new();
        let expenses = vec![expense(user, 100, "2026-08-01", None)];
        assert_eq!(daily_spend(&expenses, 7).len(), 1);
        assert!(daily_spend(&[], 7).is_empty());
    }
}
