//! Storage layer for fintrack
//!
//! One JSON file per table with atomic writes. Unique constraints live in
//! the repositories; cross-table check-then-act sequences and restrictive
//! deletes run under the store-wide [`Storage::write_guard`], which also
//! excludes writers in other processes.

pub mod annual_budgets;
pub mod expenses;
pub mod expenses_tags;
pub mod file_io;
pub mod incomes;
pub mod init;
pub mod month_budgets;
pub mod table;
pub mod tokens;
pub mod users;

use std::fs::{File, OpenOptions};
use std::sync::{Mutex, MutexGuard};

use fs2::FileExt;
use serde::Serialize;

pub use annual_budgets::AnnualBudgetRepository;
pub use expenses::ExpenseRepository;
pub use expenses_tags::ExpensesTagRepository;
pub use file_io::{read_json, write_json_atomic};
pub use incomes::IncomeRepository;
pub use init::initialize_storage;
pub use month_budgets::MonthBudgetRepository;
pub use tokens::TokenRepository;
pub use users::UserRepository;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FintrackPaths;
use crate::config::settings::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{AnnualBudget, ExpensesTag, MonthBudget, User, UserId};

/// Exclusive right to change the store, released on drop
pub struct WriteGuard<'a> {
    _local: MutexGuard<'a, ()>,
    lock_file: File,
}

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.lock_file);
    }
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FintrackPaths,
    settings: Settings,
    write_lock: Mutex<()>,
    audit: AuditLogger,
    pub users: UserRepository,
    pub tokens: TokenRepository,
    pub annual_budgets: AnnualBudgetRepository,
    pub expenses_tags: ExpensesTagRepository,
    pub month_budgets: MonthBudgetRepository,
    pub expenses: ExpenseRepository,
    pub incomes: IncomeRepository,
}

impl Storage {
    /// Open the store rooted at `paths`, loading settings from `config.json`
    pub fn new(paths: FintrackPaths) -> LedgerResult<Self> {
        let settings = Settings::load_or_create(&paths)?;
        Self::with_settings(paths, settings)
    }

    pub fn with_settings(paths: FintrackPaths, settings: Settings) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            write_lock: Mutex::new(()),
            users: UserRepository::new(paths.users_file()),
            tokens: TokenRepository::new(paths.tokens_file()),
            annual_budgets: AnnualBudgetRepository::new(paths.annual_budgets_file()),
            expenses_tags: ExpensesTagRepository::new(paths.expenses_tags_file()),
            month_budgets: MonthBudgetRepository::new(paths.month_budgets_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            incomes: IncomeRepository::new(paths.incomes_file()),
            settings,
            paths,
        })
    }

    /// Open and load every table
    pub fn open(paths: FintrackPaths) -> LedgerResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &FintrackPaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn audit_logger(&self) -> &AuditLogger {
        &self.audit
    }

    /// Serialize a mutating operation against every other writer
    ///
    /// Takes the in-process lock, then an exclusive lock on `store.lock`
    /// shared with other `fintrack` processes, then reloads every table so
    /// checks see rows written since this store was opened. Services hold
    /// the guard from their first existence/reference check until the
    /// change is saved.
    pub fn write_guard(&self) -> LedgerResult<WriteGuard<'_>> {
        let local = self
            .write_lock
            .lock()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire store lock: {}", e)))?;

        let lock_path = self.paths.lock_file();
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| {
                LedgerError::Storage(format!("Failed to open {}: {}", lock_path.display(), e))
            })?;
        lock_file
            .lock_exclusive()
            .map_err(|e| LedgerError::Storage(format!("Failed to lock the store: {}", e)))?;

        let guard = WriteGuard {
            _local: local,
            lock_file,
        };
        self.load_all()?;
        Ok(guard)
    }

    /// Load all data from disk
    pub fn load_all(&self) -> LedgerResult<()> {
        self.users.load()?;
        self.tokens.load()?;
        self.annual_budgets.load()?;
        self.expenses_tags.load()?;
        self.month_budgets.load()?;
        self.expenses.load()?;
        self.incomes.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> LedgerResult<()> {
        self.users.save()?;
        self.tokens.save()?;
        self.annual_budgets.save()?;
        self.expenses_tags.save()?;
        self.month_budgets.save()?;
        self.expenses.save()?;
        self.incomes.save()?;
        Ok(())
    }

    /// Remove a user that owns no ledger records, with their token
    ///
    /// Call with the write guard held.
    pub fn delete_user(&self, user: &User) -> LedgerResult<()> {
        let owner = user.id;
        let dependents = self.annual_budgets.count_for_owner(owner)?
            + self.expenses_tags.count_for_owner(owner)?
            + self.month_budgets.count_for_owner(owner)?
            + self.expenses.count_for_owner(owner)?
            + self.incomes.count_for_owner(owner)?;
        if dependents > 0 {
            return Err(LedgerError::Protected {
                entity_type: "User",
                identifier: user.email.clone(),
                dependents,
            });
        }

        if self.tokens.remove_for_user(owner)? {
            self.tokens.save()?;
        }
        self.users.delete(owner)?;
        self.users.save()
    }

    /// Remove an annual budget no month budget draws on
    ///
    /// Call with the write guard held.
    pub fn delete_annual_budget(&self, budget: &AnnualBudget) -> LedgerResult<()> {
        let dependents = self.month_budgets.count_for_annual_budget(budget.id)?;
        if dependents > 0 {
            return Err(LedgerError::Protected {
                entity_type: "Annual budget",
                identifier: budget.year.to_string(),
                dependents,
            });
        }

        self.annual_budgets.delete(budget.id)?;
        self.annual_budgets.save()
    }

    /// Remove an expenses tag no month budget or expense is filed under
    ///
    /// Call with the write guard held.
    pub fn delete_expenses_tag(&self, tag: &ExpensesTag) -> LedgerResult<()> {
        let dependents = self.month_budgets.count_for_expenses_tag(tag.id)?
            + self.expenses.count_for_expenses_tag(tag.id)?;
        if dependents > 0 {
            return Err(LedgerError::Protected {
                entity_type: "Expenses tag",
                identifier: tag.name.clone(),
                dependents,
            });
        }

        self.expenses_tags.delete(tag.id)?;
        self.expenses_tags.save()
    }

    /// Remove a month budget no expense is booked against
    ///
    /// Call with the write guard held.
    pub fn delete_month_budget(&self, budget: &MonthBudget) -> LedgerResult<()> {
        let dependents = self.expenses.count_for_month_budget(budget.id)?;
        if dependents > 0 {
            return Err(LedgerError::Protected {
                entity_type: "Month budget",
                identifier: budget.id.to_string(),
                dependents,
            });
        }

        self.month_budgets.delete(budget.id)?;
        self.month_budgets.save()
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        actor: UserId,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> LedgerResult<()> {
        if !self.settings.audit_enabled {
            return Ok(());
        }
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity).by(actor))
    }

    /// Record an update in the audit log, with a summary of changed fields
    pub fn log_update<T: Serialize>(
        &self,
        actor: UserId,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> LedgerResult<()> {
        if !self.settings.audit_enabled {
            return Ok(());
        }
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.audit.log(
            &AuditEntry::update(entity_type, entity_id, entity_name, before, after, diff)
                .by(actor),
        )
    }

    /// Record a delete in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        actor: UserId,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> LedgerResult<()> {
        if !self.settings.audit_enabled {
            return Ok(());
        }
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity).by(actor))
    }
}
