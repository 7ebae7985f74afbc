//! Expense display formatting

use crate::models::{Category, Expense};

/// Format expenses as a table for terminal output
pub fn format_expense_list(expenses: &[Expense], categories: &[Category]) -> String {
    if expenses.is_empty() {
        return "No expenses recorded yet.\n\nRun 'outlay expense add' or 'outlay parse chat' to capture one.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12} {:>10}  {:<14} {:<7} {:<30}  {}\n",
        "Date", "Amount", "Category", "Via", "Description", "ID"
    ));
    output.push_str(&"-".repeat(100));
    output.push('\n');

    for expense in expenses {
        let category = expense
            .category_id
            .and_then(|id| categories.iter().find(|c| c.id == id))
            .map(|c| c.name.as_str())
            .unwrap_or("-");

        let description = expense.description.as_deref().unwrap_or("-");

        output.push_str(&format!(
            "{:<12} {:>10}  {:<14} {:<7} {:<30}  {}\n",
            expense.date.format("%Y-%m-%d"),
            expense.amount.to_string(),
            category,
            expense.input_method.as_str(),
            truncate(description, 30),
            expense.id.as_uuid(),
        ));
    }

    output
}

/// Format one expense in detail
pub fn format_expense_details(expense: &Expense, category: Option<&Category>) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense {}\n", expense.id.as_uuid()));
    output.push_str(&format!("  Amount:      {}\n", expense.amount));
    output.push_str(&format!("  Date:        {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!(
        "  Category:    {}\n",
        category.map(|c| c.name.as_str()).unwrap_or("(none)")
    ));
    output.push_str(&format!(
        "  Description: {}\n",
        expense.description.as_deref().unwrap_or("(none)")
    ));
    output.push_str(&format!("  Captured:    {}\n", expense.input_method));
    if let Some(photo) = &expense.photo_url {
        output.push_str(&format!("  Photo:       {}\n", photo));
    }
    output.push_str(&format!(
        "  Created:     {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
