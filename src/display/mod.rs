//! Display formatting for terminal output
//!
//! List views render as `tabled` tables; detail views are plain
//! indented text.

pub mod budget;
pub mod movement;
pub mod user;

pub use budget::{
    format_annual_budget_details, format_annual_budget_list, format_month_budget_details,
    format_month_budget_list, format_tag_details, format_tag_list,
};
pub use movement::{
    format_expense_details, format_expense_list, format_income_details, format_income_list,
    ClassificationLabels,
};
pub use user::{format_audit_entries, format_profile, format_user_list};
