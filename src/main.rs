use anyhow::Result;
use clap::{Parser, Subcommand};

use flip_ledger::cli::{
    handle_audit_command, handle_category_command, handle_expense_command,
    handle_export_command, handle_project_command, handle_report_command,
};
use flip_ledger::config::{paths::LedgerPaths, settings::Settings};
use flip_ledger::services::CategoryService;
use flip_ledger::storage::{init, Storage};

#[derive(Parser)]
#[command(
    name = "flip",
    version,
    about = "Expense and profit tracking for real-estate flip projects",
    long_about = "flip-ledger tracks the expenses and sales of real-estate flip \
                  projects and reports per-project and portfolio metrics: \
                  margins, ROI, cost per square meter, time to close and \
                  monthly realized profit."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize data directories, settings and default categories
    Init,

    /// Show current configuration and paths
    Config,

    /// Project management commands
    #[command(subcommand)]
    Project(flip_ledger::cli::ProjectCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(flip_ledger::cli::ExpenseCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(flip_ledger::cli::CategoryCommands),

    /// Project and portfolio reports
    #[command(subcommand)]
    Report(flip_ledger::cli::ReportCommands),

    /// Export data to JSON, YAML or CSV
    #[command(subcommand)]
    Export(flip_ledger::cli::ExportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    if let Some(Commands::Init) = cli.command {
        println!("Initializing flip-ledger at: {}", paths.base_dir().display());
        init::initialize_storage(&paths, &settings)?;
        settings.setup_completed = true;
        settings.save(&paths)?;
        println!("Initialization complete!");
        println!();
        println!("Expense categories: {}", settings.default_categories.join(", "));
        println!();
        println!("Run 'flip project create --help' to add your first project.");
        return Ok(());
    }

    let first_run = init::needs_initialization(&paths);

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    if first_run {
        CategoryService::new(&storage).ensure_defaults(&settings.default_categories)?;
    }

    match cli.command {
        Some(Commands::Init) => {}
        Some(Commands::Config) => {
            println!("flip-ledger Configuration");
            println!("=========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Date format:        {}", settings.date_format);
            println!("  Fetch policy:       {:?}", settings.fetch_policy);
            println!(
                "  Default categories: {}",
                settings.default_categories.join(", ")
            );
            println!("  Initialized:        {}", settings.setup_completed);
        }
        Some(Commands::Project(cmd)) => {
            handle_project_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Audit { count }) => {
            handle_audit_command(&storage, count)?;
        }
        None => {
            println!("flip-ledger - Real-estate flip project tracking");
            println!();
            println!("Run 'flip --help' for usage information.");
            if !paths.is_initialized() {
                println!("Run 'flip init' to set up a new ledger.");
            }
        }
    }

    Ok(())
}
