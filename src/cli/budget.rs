//! Budget CLI commands
//!
//! The one-budget-per-category rule is enforced here, before any remote
//! call, matching where the original app kept that check. The data layer
//! itself accepts duplicates.

use clap::Subcommand;

use crate::display::budget::format_budget_status;
use crate::error::{OutlayError, OutlayResult};
use crate::models::{BudgetId, BudgetPatch, BudgetPeriod, Money, NewBudget};
use crate::state::ExpenseState;
use crate::store::DataStore;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show budgets with spend against them
    List,

    /// Create a budget for a category
    Set {
        /// Category name or ID
        category: String,
        /// Limit amount (e.g. "300")
        amount: String,
        /// Budget period (weekly, monthly, yearly)
        #[arg(long, default_value = "monthly")]
        period: String,
    },

    /// Change a budget's limit or period
    Edit {
        /// Budget ID
        id: String,
        /// New limit amount
        #[arg(long)]
        amount: Option<String>,
        /// New period (weekly, monthly, yearly)
        #[arg(long)]
        period: Option<String>,
    },
}

/// Handle a budget command
pub async fn handle_budget_command<S: DataStore>(
    state: &mut ExpenseState<S>,
    cmd: BudgetCommands,
) -> OutlayResult<()> {
    match cmd {
        BudgetCommands::List => {
            print!("{}", format_budget_status(&state.budget_status()));
        }

        BudgetCommands::Set {
            category,
            amount,
            period,
        } => {
            let (category_id, category_name) = {
                let c = state
                    .resolve_category(&category)
                    .ok_or_else(|| OutlayError::category_not_found(category.clone()))?;
                (c.id, c.name.clone())
            };

            if state.budget_for_category(category_id).is_some() {
                return Err(OutlayError::Duplicate {
                    entity_type: "Budget",
                    identifier: category_name,
                });
            }

            let amount =
                Money::parse(&amount).map_err(|e| OutlayError::Validation(e.to_string()))?;
            let period: BudgetPeriod = period.parse().map_err(OutlayError::Validation)?;

            let budget = state
                .add_budget(NewBudget {
                    category_id: Some(category_id),
                    amount,
                    period,
                })
                .await?;

            println!(
                "Budget set: {} at {} per {}",
                category_name, budget.amount, budget.period
            );
            println!("  ID: {}", budget.id.as_uuid());
        }

        BudgetCommands::Edit { id, amount, period } => {
            let id: BudgetId = id
                .parse()
                .map_err(|_| OutlayError::Validation(format!("invalid budget id '{}'", id)))?;

            let mut patch = BudgetPatch::default();
            if let Some(amount) = amount {
                patch.amount =
                    Some(Money::parse(&amount).map_err(|e| OutlayError::Validation(e.to_string()))?);
            }
            if let Some(period) = period {
                patch.period = Some(period.parse().map_err(OutlayError::Validation)?);
            }

            if patch.is_empty() {
                println!("No changes specified. Use --amount or --period.");
                return Ok(());
            }

            state.update_budget(id, patch).await?;
            println!("Updated budget {}", id.as_uuid());
        }
    }

    Ok(())
}
