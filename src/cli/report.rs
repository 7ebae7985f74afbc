//! Report CLI commands

use clap::Subcommand;

use crate::display::report::{
    format_category_breakdown, format_daily_spend, format_month_summary,
};
use crate::error::OutlayResult;
use crate::state::ExpenseState;
use crate::store::DataStore;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// This month's total and transaction count
    Month,

    /// Spend per category over everything loaded
    Categories,

    /// Spend per day for the last few distinct days
    Daily {
        /// Number of distinct days to show
        #[arg(long, default_value = "7")]
        days: usize,
    },
}

/// Handle a report command
pub async fn handle_report_command<S: DataStore>(
    state: &ExpenseState<S>,
    cmd: ReportCommands,
) -> OutlayResult<()> {
    match cmd {
        ReportCommands::Month => {
            print!("{}", format_month_summary(&state.month_summary()));
        }
        ReportCommands::Categories => {
            print!("{}", format_category_breakdown(&state.category_breakdown()));
        }
        ReportCommands::Daily { days } => {
            print!("{}", format_daily_spend(&state.daily_spend(days)));
        }
    }

    Ok(())
}
