use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use fintrack::cli::{
    handle_annual_command, handle_audit, handle_expense_command, handle_export,
    handle_income_command, handle_login, handle_logout, handle_me_command, handle_month_command,
    handle_tag_command, handle_user_command, resolve_identity, AnnualCommands, ExpenseCommands,
    ExportFormat, IncomeCommands, MeCommands, MonthCommands, TagCommands, UserCommands,
};
use fintrack::config::{paths::FintrackPaths, settings::Settings};
use fintrack::models::Identity;
use fintrack::storage::{initialize_storage, Storage};
use fintrack::LedgerError;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance ledger: budgets, expenses and income",
    long_about = "fintrack keeps a per-user ledger of annual budgets, month budgets, \
                  expenses tags, expenses and incomes. Every record belongs to the \
                  user who created it and is invisible to everyone else."
)]
struct Cli {
    /// Session token (overrides the one saved by `login`)
    #[arg(
        long,
        global = true,
        env = "FINTRACK_TOKEN",
        hide_env_values = true,
        allow_hyphen_values = true
    )]
    token: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// User accounts and tokens
    #[command(subcommand)]
    User(UserCommands),

    /// Log in and save the session token
    Login {
        email: String,
        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Revoke the session token
    Logout,

    /// The logged-in user's own account
    #[command(subcommand)]
    Me(MeCommands),

    /// Annual budgets
    #[command(subcommand)]
    Annual(AnnualCommands),

    /// Expenses tags
    #[command(subcommand)]
    Tag(TagCommands),

    /// Month budgets
    #[command(subcommand)]
    Month(MonthCommands),

    /// Expenses
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Incomes
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Export the ledger
    Export {
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show your recent changes
    Audit {
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let code = err
                .downcast_ref::<LedgerError>()
                .map(exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

/// Exit status per failure kind: 2 bad input, 3 not authenticated,
/// 4 not permitted, 5 not found, 6 conflict, 1 anything else
fn exit_code(err: &LedgerError) -> u8 {
    match err.status_code() {
        400 => 2,
        401 => 3,
        403 => 4,
        404 => 5,
        409 => 6,
        _ => 1,
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let paths = FintrackPaths::new()?;
    let token = cli.token.as_deref();

    let Some(command) = cli.command else {
        println!("fintrack - personal finance ledger");
        println!();
        println!("Run 'fintrack --help' for usage information.");
        return Ok(());
    };

    match command {
        Commands::Init => {
            println!("Initializing fintrack at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'fintrack user create <email>' to register.");
        }
        Commands::Config => {
            let settings = Settings::load_or_create(&paths)?;
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Date format:         {}", settings.date_format);
            println!("  Min password length: {}", settings.min_password_length);
            println!("  Audit enabled:       {}", settings.audit_enabled);
        }
        Commands::User(cmd) => handle_user_command(&Storage::open(paths)?, token, cmd)?,
        Commands::Login { email, password } => {
            handle_login(&Storage::open(paths)?, &email, password)?
        }
        Commands::Logout => handle_logout(&Storage::open(paths)?, token)?,
        Commands::Me(cmd) => {
            let (storage, identity) = authenticated(paths, token)?;
            handle_me_command(&storage, &identity, cmd)?
        }
        Commands::Annual(cmd) => {
            let (storage, identity) = authenticated(paths, token)?;
            handle_annual_command(&storage, &identity, cmd)?
        }
        Commands::Tag(cmd) => {
            let (storage, identity) = authenticated(paths, token)?;
            handle_tag_command(&storage, &identity, cmd)?
        }
        Commands::Month(cmd) => {
            let (storage, identity) = authenticated(paths, token)?;
            handle_month_command(&storage, &identity, cmd)?
        }
        Commands::Expense(cmd) => {
            let (storage, identity) = authenticated(paths, token)?;
            handle_expense_command(&storage, &identity, cmd)?
        }
        Commands::Income(cmd) => {
            let (storage, identity) = authenticated(paths, token)?;
            handle_income_command(&storage, &identity, cmd)?
        }
        Commands::Export { format, output } => {
            let (storage, identity) = authenticated(paths, token)?;
            handle_export(&storage, &identity, format, output)?
        }
        Commands::Audit { limit } => {
            let (storage, identity) = authenticated(paths, token)?;
            handle_audit(&storage, &identity, limit)?
        }
    }

    Ok(())
}

/// Open the store and resolve the caller's session
fn authenticated(paths: FintrackPaths, token: Option<&str>) -> Result<(Storage, Identity)> {
    let storage = Storage::open(paths)?;
    let identity = resolve_identity(&storage, token)?;
    Ok((storage, identity))
}
