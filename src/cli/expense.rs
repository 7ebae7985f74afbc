//! Expense CLI commands
//!
//! Manual capture and maintenance. All validation (amount format, category
//! resolution, date format) happens before any remote call.

use chrono::{NaiveDate, Utc};
use clap::Subcommand;

use crate::display::expense::{format_expense_details, format_expense_list};
use crate::error::{OutlayError, OutlayResult};
use crate::models::{CategoryId, ExpenseId, ExpensePatch, InputMethod, Money, NewExpense};
use crate::state::ExpenseState;
use crate::store::DataStore;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add an expense by hand
    Add {
        /// Amount spent (e.g. "12.50")
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Short description
        #[arg(short, long)]
        description: Option<String>,
        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List recent expenses
    List {
        /// Number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show one expense in detail
    Show {
        /// Expense ID (full UUID or unambiguous prefix)
        id: String,
    },

    /// Edit an expense
    Edit {
        /// Expense ID (full UUID or unambiguous prefix)
        id: String,
        /// New amount
        #[arg(long)]
        amount: Option<String>,
        /// New category name or ID
        #[arg(long)]
        category: Option<String>,
        /// Remove the category assignment
        #[arg(long)]
        clear_category: bool,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID (full UUID or unambiguous prefix)
        id: String,
    },
}

/// Handle an expense command
pub async fn handle_expense_command<S: DataStore>(
    state: &mut ExpenseState<S>,
    cmd: ExpenseCommands,
) -> OutlayResult<()> {
    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            description,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let category_id = match &category {
                Some(reference) => Some(resolve_category_id(state, reference)?),
                None => None,
            };
            let date = parse_date_or_today(date.as_deref())?;

            let expense = state
                .add_expense(NewExpense {
                    amount,
                    category_id,
                    description,
                    date,
                    input_method: InputMethod::Manual,
                    photo_url: None,
                })
                .await?;

            println!("Added expense: {} on {}", expense.amount, expense.date);
            println!("  ID: {}", expense.id.as_uuid());
        }

        ExpenseCommands::List { limit } => {
            let shown = &state.expenses()[..limit.min(state.expenses().len())];
            print!("{}", format_expense_list(shown, state.categories()));
        }

        ExpenseCommands::Show { id } => {
            let id = resolve_expense_id(state, &id)?;
            let expense = state
                .find_expense(id)
                .ok_or_else(|| OutlayError::expense_not_found(id.to_string()))?;
            let category = expense.category_id.and_then(|cid| state.category_by_id(cid));
            print!("{}", format_expense_details(expense, category));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            clear_category,
            description,
            date,
        } => {
            let id = resolve_expense_id(state, &id)?;

            let mut patch = ExpensePatch::default();
            if let Some(amount) = amount {
                patch.amount = Some(parse_amount(&amount)?);
            }
            if clear_category {
                patch.category_id = Some(None);
            } else if let Some(reference) = category {
                patch.category_id = Some(Some(resolve_category_id(state, &reference)?));
            }
            if let Some(description) = description {
                patch.description = Some(Some(description));
            }
            if let Some(date) = date {
                patch.date = Some(parse_date_or_today(Some(&date))?);
            }

            if patch.is_empty() {
                println!("No changes specified. Use --amount, --category, --description, or --date.");
                return Ok(());
            }

            state.update_expense(id, patch).await?;
            println!("Updated expense {}", id.as_uuid());
        }

        ExpenseCommands::Delete { id } => {
            let id = resolve_expense_id(state, &id)?;
            state.delete_expense(id).await?;
            println!("Deleted expense {}", id.as_uuid());
        }
    }

    Ok(())
}

/// Parse an amount argument
pub(crate) fn parse_amount(s: &str) -> OutlayResult<Money> {
    Money::parse(s).map_err(|e| OutlayError::Validation(e.to_string()))
}

/// Parse a YYYY-MM-DD date argument, defaulting to today
pub(crate) fn parse_date_or_today(s: Option<&str>) -> OutlayResult<NaiveDate> {
    match s {
        None => Ok(Utc::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| OutlayError::Validation(format!("invalid date '{}', expected YYYY-MM-DD", s))),
    }
}

/// Resolve a category argument (name or ID) against the loaded categories
pub(crate) fn resolve_category_id<S: DataStore>(
    state: &ExpenseState<S>,
    reference: &str,
) -> OutlayResult<CategoryId> {
    state
        .resolve_category(reference)
        .map(|c| c.id)
        .ok_or_else(|| OutlayError::category_not_found(reference))
}

/// Resolve an expense argument: a full UUID, or a prefix of one that
/// matches exactly one cached expense.
pub(crate) fn resolve_expense_id<S: DataStore>(
    state: &ExpenseState<S>,
    reference: &str,
) -> OutlayResult<ExpenseId> {
    if let Ok(id) = reference.parse::<ExpenseId>() {
        return Ok(id);
    }

    let needle = reference
        .strip_prefix("exp-")
        .unwrap_or(reference)
        .to_lowercase();
    if needle.len() < 4 {
        return Err(OutlayError::Validation(format!(
            "expense id '{}' is too short to match on",
            reference
        )));
    }

    let mut matches = state
        .expenses()
        .iter()
        .filter(|e| e.id.as_uuid().to_string().starts_with(&needle))
        .map(|e| e.id);

    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id),
        (Some(_), Some(_)) => Err(OutlayError::Validation(format!(
            "expense id '{}' is ambiguous",
            reference
        ))),
        (None, _) => Err(OutlayError::expense_not_found(reference)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Session;
    use crate::store::MemoryStore;

    async fn loaded_state() -> ExpenseState<MemoryStore> {
        let mut state = ExpenseState::with_session(MemoryStore::new(), Session::local());
        state.load().await.unwrap();
        state
    }

    #[test]
    fn test_parse_date_or_today() {
        let date = parse_date_or_today(Some("2026-08-01")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        assert!(parse_date_or_today(Some("08/01/2026")).is_err());
        assert!(parse_date_or_today(None).is_ok());
    }

    #[tokio::test]
    async fn test_add_with_bad_amount_makes_no_store_call() {
        let mut state = loaded_state().await;

        let err = handle_expense_command(
            &mut state,
            ExpenseCommands::Add {
                amount: "lunch".into(),
                category: None,
                description: None,
                date: None,
            },
        )
        .await
        .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(state.store().expense_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_with_unknown_category_fails() {
        let mut state = loaded_state().await;

        let err = handle_expense_command(
            &mut state,
            ExpenseCommands::Add {
                amount: "5.00".into(),
                category: Some("Subscriptions".into()),
                description: None,
                date: None,
            },
        )
        .await
        .unwrap_err();

        assert!(err.is_not_found());
        assert!(state.expenses().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_expense_id_by_prefix() {
        let mut state = loaded_state().await;
        let id = state
            .add_expense(NewExpense {
                amount: Money::from_cents(100),
                category_id: None,
                description: None,
                date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                input_method: InputMethod::Manual,
                photo_url: None,
            })
            .await
            .unwrap()
            .id;

        let prefix = id.as_uuid().to_string()[..8].to_string();
        assert_eq!(resolve_expense_id(&state, &prefix).unwrap(), id);
        assert_eq!(
            resolve_expense_id(&state, &format!("exp-{}", prefix)).unwrap(),
            id
        );
        assert!(resolve_expense_id(&state, "ab").unwrap_err().is_validation());
        assert!(resolve_expense_id(&state, "ffffffff").unwrap_err().is_not_found());
    }
}
