//! Core data models for fintrack
//!
//! Users, the budget ledger entities they own (annual budgets, month
//! budgets, expenses tags, expenses, incomes) and the validation rules those
//! entities share.

pub mod annual_budget;
pub mod auth_token;
pub mod expense;
pub mod expenses_tag;
pub mod identity;
pub mod ids;
pub mod income;
pub mod money;
pub mod month_budget;
pub mod user;
pub mod validation;

pub use annual_budget::{AnnualBudget, AnnualBudgetPatch};
pub use auth_token::AuthToken;
pub use expense::{Classification, ClassificationError, Expense, ExpensePatch};
pub use expenses_tag::ExpensesTag;
pub use identity::{Identity, Owned};
pub use ids::{AnnualBudgetId, ExpenseId, ExpensesTagId, IncomeId, MonthBudgetId, UserId};
pub use income::{Income, IncomePatch, Periodicity};
pub use money::{Money, MoneyParseError};
pub use month_budget::{MonthBudget, MonthBudgetPatch};
pub use user::{normalize_email, User, UserProfile};
pub use validation::{BudgetEntry, ValidationError};
