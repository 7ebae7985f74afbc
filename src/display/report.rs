//! Report display formatting

use crate::models::Money;
use crate::reports::{CategorySpend, DailySpend, MonthSummary};

/// Format the current-month summary
pub fn format_month_summary(summary: &MonthSummary) -> String {
    format!(
        "This month\n  Total spent:  {}\n  Transactions: {}\n",
        summary.total, summary.count
    )
}

/// Format the per-category breakdown with share-of-total percentages
pub fn format_category_breakdown(spends: &[CategorySpend]) -> String {
    if spends.is_empty() {
        return "No expenses to break down yet.".to_string();
    }

    let grand_total: Money = spends.iter().map(|s| s.total).sum();

    let mut output = String::new();
    output.push_str(&format!(
        "{:<16} {:>10} {:>7} {:>7}\n",
        "Category", "Amount", "Count", "%"
    ));
    output.push_str(&"-".repeat(44));
    output.push('\n');

    for spend in spends {
        let percentage = if grand_total.is_zero() {
            0.0
        } else {
            (spend.total.cents() as f64 / grand_total.cents() as f64) * 100.0
        };
        output.push_str(&format!(
            "{:<16} {:>10} {:>7} {:>6.1}%\n",
            spend.name,
            spend.total.to_string(),
            spend.count,
            percentage
        ));
    }

    output.push_str(&"-".repeat(44));
    output.push('\n');
    output.push_str(&format!("{:<16} {:>10}\n", "Total", grand_total.to_string()));

    output
}

/// Format daily spend buckets with a proportional bar
pub fn format_daily_spend(buckets: &[DailySpend]) -> String {
    if buckets.is_empty() {
        return "No expenses in the last few days.".to_string();
    }

    let max_cents = buckets.iter().map(|b| b.total.cents()).max().unwrap_or(1).max(1);

    let mut output = String::new();
    for bucket in buckets {
        let width = ((bucket.total.cents() as f64 / max_cents as f64) * 30.0).round() as usize;
        output.push_str(&format!(
            "{:<12} {:>10}  {}\n",
            bucket.date.format("%Y-%m-%d"),
            bucket.total.to_string(),
            "#".repeat(width),
        ));
    }

    output
}
