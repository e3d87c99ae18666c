//! Annual budget repository (`annual_budgets.json`)
//!
//! (owner, year) is unique. The check runs inside `insert` and `update`
//! while the table's write lock is held, so two writers can never both
//! store the same year for one user.

use std::path::PathBuf;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AnnualBudget, AnnualBudgetId, UserId};

use super::table::{Record, Table};

impl Record for AnnualBudget {
    type Key = AnnualBudgetId;

    fn key(&self) -> AnnualBudgetId {
        self.id
    }
}

pub struct AnnualBudgetRepository {
    table: Table<AnnualBudget>,
}

impl AnnualBudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            table: Table::new(path),
        }
    }

    pub fn load(&self) -> LedgerResult<()> {
        self.table.load()
    }

    pub fn save(&self) -> LedgerResult<()> {
        self.table.save()
    }

    pub fn get(&self, id: AnnualBudgetId) -> LedgerResult<Option<AnnualBudget>> {
        self.table.get(&id)
    }

    /// The owner's budgets ordered by year
    pub fn list_for_owner(&self, owner: UserId) -> LedgerResult<Vec<AnnualBudget>> {
        let mut budgets = self.table.select(|b| b.owner == owner)?;
        budgets.sort_by_key(|b| b.year);
        Ok(budgets)
    }

    pub fn get_by_year(&self, owner: UserId, year: i32) -> LedgerResult<Option<AnnualBudget>> {
        self.table.find(|b| b.owner == owner && b.year == year)
    }

    pub fn count_for_owner(&self, owner: UserId) -> LedgerResult<usize> {
        self.table.count(|b| b.owner == owner)
    }

    pub fn insert(&self, budget: AnnualBudget) -> LedgerResult<()> {
        let mut rows = self.table.write()?;
        if rows
            .values()
            .any(|b| b.owner == budget.owner && b.year == budget.year)
        {
            return Err(year_conflict(budget.year));
        }
        rows.insert(budget.id, budget);
        Ok(())
    }

    pub fn update(&self, budget: AnnualBudget) -> LedgerResult<()> {
        let mut rows = self.table.write()?;
        if !rows.contains_key(&budget.id) {
            return Err(LedgerError::annual_budget_not_found(budget.id.to_string()));
        }
        if rows
            .values()
            .any(|b| b.owner == budget.owner && b.year == budget.year && b.id != budget.id)
        {
            return Err(year_conflict(budget.year));
        }
        rows.insert(budget.id, budget);
        Ok(())
    }

    /// Unchecked removal; [`Storage`](super::Storage) checks dependents first
    pub(crate) fn delete(&self, id: AnnualBudgetId) -> LedgerResult<bool> {
        Ok(self.table.remove(&id)?.is_some())
    }
}

fn year_conflict(year: i32) -> LedgerError {
    LedgerError::Conflict {
        entity_type: "Annual budget",
        identifier: format!("year {}", year),
    }
}
