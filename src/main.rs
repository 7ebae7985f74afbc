use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use outlay::ai::AiGateway;
use outlay::cli::{
    handle_budget_command, handle_category_command, handle_expense_command, handle_parse_command,
    handle_report_command, BudgetCommands, CategoryCommands, ExpenseCommands, ParseCommands,
    ReportCommands,
};
use outlay::config::{paths::OutlayPaths, settings::Settings, Session};
use outlay::state::ExpenseState;
use outlay::store::{DataStore, MemoryStore, RestStore};

#[derive(Parser)]
#[command(
    name = "outlay",
    version,
    about = "AI-assisted expense tracking from the command line",
    long_about = "Outlay tracks personal expenses against a remote store and \
                  uses a generative-AI model to turn chat text, receipt \
                  photos, and voice recordings into structured expenses."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense capture and maintenance
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// AI-assisted capture from text, photos, or voice
    #[command(subcommand)]
    Parse(ParseCommands),

    /// Category management
    #[command(subcommand, alias = "cat")]
    Category(CategoryCommands),

    /// Budget management
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Analytics over the loaded expenses
    #[command(subcommand)]
    Report(ReportCommands),

    /// Seed demo data (useful with the in-memory store)
    Demo,

    /// Show current configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = OutlayPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    settings.apply_env_overrides();

    let command = match cli.command {
        None => {
            println!("Outlay - AI-assisted expense tracking");
            println!();
            println!("Run 'outlay --help' for usage information.");
            println!("Run 'outlay demo' for a quick tour on sample data.");
            return Ok(());
        }
        Some(Commands::Config) => {
            println!("Outlay Configuration");
            println!("====================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!(
                "  Store URL:  {}",
                if settings.has_remote_store() {
                    settings.store_url.as_str()
                } else {
                    "(not set; using in-memory store)"
                }
            );
            println!(
                "  User:       {}",
                settings
                    .user_id
                    .map(|u| u.as_uuid().to_string())
                    .unwrap_or_else(|| "(not set)".into())
            );
            println!(
                "  AI URL:     {}",
                if settings.ai_url.is_empty() {
                    "(not set)"
                } else {
                    settings.ai_url.as_str()
                }
            );
            println!("  AI model:   {}", settings.ai_model);
            println!("  Currency:   {}", settings.currency_symbol);
            println!("  Dates:      {}", settings.date_format);
            return Ok(());
        }
        Some(command) => command,
    };

    if settings.has_remote_store() {
        let store = RestStore::new(
            settings.store_url.clone(),
            settings.store_api_key.clone(),
            settings.access_token.clone(),
        );
        let mut state = ExpenseState::new(store);
        state.set_session(settings.session());
        run_command(&mut state, &settings, command).await?;
    } else {
        // No remote store configured: run against an in-memory store with
        // an ephemeral session. Data lives for the duration of the process.
        tracing::info!("no remote store configured; using in-memory store");
        let mut state = ExpenseState::with_session(MemoryStore::new(), Session::local());
        run_command(&mut state, &settings, command).await?;
    }

    Ok(())
}

async fn run_command<S: DataStore>(
    state: &mut ExpenseState<S>,
    settings: &Settings,
    command: Commands,
) -> Result<()> {
    state.load().await?;

    match command {
        Commands::Expense(cmd) => handle_expense_command(state, cmd).await?,
        Commands::Parse(cmd) => {
            let gateway = AiGateway::new(
                settings.ai_url.clone(),
                settings.ai_api_key.clone(),
                settings.ai_model.clone(),
            );
            handle_parse_command(state, &gateway, cmd).await?;
        }
        Commands::Category(cmd) => handle_category_command(state, cmd).await?,
        Commands::Budget(cmd) => handle_budget_command(state, cmd).await?,
        Commands::Report(cmd) => handle_report_command(state, cmd).await?,
        Commands::Demo => {
            let count = outlay::demo::seed_demo_data(state).await?;
            println!("Seeded {} demo expenses.", count);
            println!();
            print!(
                "{}",
                outlay::display::report::format_month_summary(&state.month_summary())
            );
            println!();
            print!(
                "{}",
                outlay::display::report::format_category_breakdown(&state.category_breakdown())
            );
        }
        Commands::Config => unreachable!("config is handled before a store is constructed"),
    }

    Ok(())
}
