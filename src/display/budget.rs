//! Budget display formatting

use crate::reports::BudgetStatus;

/// Format budget consumption rows
pub fn format_budget_status(statuses: &[BudgetStatus]) -> String {
    if statuses.is_empty() {
        return "No budgets set yet.\n\nRun 'outlay budget set <category> <amount>' to create one.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<16} {:>10} {:>10} {:>10} {:>7}  {}\n",
        "Category", "Limit", "Spent", "Left", "Used", "ID"
    ));
    output.push_str(&"-".repeat(95));
    output.push('\n');

    for status in statuses {
        let marker = if status.over_budget { "  OVER" } else { "" };
        output.push_str(&format!(
            "{:<16} {:>10} {:>10} {:>10} {:>6.0}%  {}{}\n",
            status.category_name,
            status.limit.to_string(),
            status.spent.to_string(),
            status.remaining.to_string(),
            status.percent_used(),
            status.budget_id.as_uuid(),
            marker,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetId, CategoryId, Money};

    fn status(spent: i64, limit: i64) -> BudgetStatus {
        BudgetStatus {
            budget_id: BudgetId::new(),
            category_id: CategoryId::new(),
            category_name: "Food".into(),
            limit: Money::from_cents(limit),
            spent: Money::from_cents(spent),
            remaining: Money::from_cents(limit - spent),
            over_budget: spent > limit,
        }
    }

    #[test]
    fn test_empty() {
        assert!(format_budget_status(&[]).contains("No budgets set"));
    }

    #[test]
    fn test_over_budget_marker() {
        let output = format_budget_status(&[status(12000, 10000)]);
        assert!(output.contains("OVER"));
        assert!(output.contains("-$20.00"));
    }

    #[test]
    fn test_within_budget_has_no_marker() {
        let output = format_budget_status(&[status(2500, 10000)]);
        assert!(!output.contains("OVER"));
        assert!(output.contains("$75.00"));
    }
}
