//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod args;
pub mod budget;
pub mod expense;
pub mod export;
pub mod income;
pub mod session;
pub mod user;

pub use budget::{
    handle_annual_command, handle_month_command, handle_tag_command, AnnualCommands,
    MonthCommands, TagCommands,
};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export, ExportFormat};
pub use income::{handle_income_command, IncomeCommands};
pub use session::{handle_login, handle_logout, resolve_identity};
pub use user::{handle_audit, handle_me_command, handle_user_command, MeCommands, UserCommands};
