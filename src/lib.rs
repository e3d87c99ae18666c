//! fintrack - personal finance ledger
//!
//! Users keep annual budgets, month budgets split by expenses tag, expenses
//! and incomes. Every ledger record belongs to exactly one user; another
//! user's records behave as if they did not exist.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models and their validation
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer, scoped to the calling identity
//! - `audit`: Audit logging system
//! - `crypto`: Password hashing and session tokens
//! - `export`: JSON, YAML and CSV export
//! - `cli`, `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::paths::FintrackPaths;
//! use fintrack::services::{AnnualBudgetService, UserService};
//! use fintrack::storage::Storage;
//!
//! let storage = Storage::open(FintrackPaths::new()?)?;
//! let users = UserService::new(&storage);
//! users.create_user("ana@example.com", "s3cret", "Ana")?;
//! let token = users.issue_token("ana@example.com", "s3cret")?;
//! let identity = users.resolve_token(&token.key)?;
//!
//! AnnualBudgetService::new(&storage).create(&identity, 2020, "24000".parse()?, "")?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
