//! Category CLI commands

use clap::Subcommand;

use crate::display::category::format_category_list;
use crate::error::{OutlayError, OutlayResult};
use crate::models::{CategoryPatch, NewCategory};
use crate::state::ExpenseState;
use crate::store::DataStore;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Create a custom category
    Add {
        /// Category name
        name: String,
        /// Display color (hex)
        #[arg(long, default_value = "#767676")]
        color: String,
        /// Icon identifier
        #[arg(long, default_value = "pricetag")]
        icon: String,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New display color (hex)
        #[arg(long)]
        color: Option<String>,
        /// New icon identifier
        #[arg(long)]
        icon: Option<String>,
    },
}

/// Handle a category command
pub async fn handle_category_command<S: DataStore>(
    state: &mut ExpenseState<S>,
    cmd: CategoryCommands,
) -> OutlayResult<()> {
    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(state.categories()));
        }

        CategoryCommands::Add { name, color, icon } => {
            let category = state.add_category(NewCategory { name, color, icon }).await?;
            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id.as_uuid());
        }

        CategoryCommands::Edit {
            category,
            name,
            color,
            icon,
        } => {
            let id = state
                .resolve_category(&category)
                .map(|c| c.id)
                .ok_or_else(|| OutlayError::category_not_found(category.clone()))?;

            let patch = CategoryPatch { name, color, icon };
            if patch.is_empty() {
                println!("No changes specified. Use --name, --color, or --icon.");
                return Ok(());
            }

            state.update_category(id, patch).await?;
            let updated = state
                .category_by_id(id)
                .ok_or_else(|| OutlayError::category_not_found(category.clone()))?;
            println!("Updated category: {}", updated.name);
        }
    }

    Ok(())
}
