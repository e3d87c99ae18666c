//! Month budget repository (`month_budgets.json`)

use std::path::PathBuf;

use crate::error::LedgerResult;
use crate::models::{AnnualBudgetId, ExpensesTagId, MonthBudget, MonthBudgetId, UserId};

use super::table::{Record, Table};

impl Record for MonthBudget {
    type Key = MonthBudgetId;

    fn key(&self) -> MonthBudgetId {
        self.id
    }
}

pub struct MonthBudgetRepository {
    table: Table<MonthBudget>,
}

impl MonthBudgetRepository {
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

    pub fn get(&self, id: MonthBudgetId) -> LedgerResult<Option<MonthBudget>> {
        self.table.get(&id)
    }

    /// The owner's month budgets in creation order
    pub fn list_for_owner(&self, owner: UserId) -> LedgerResult<Vec<MonthBudget>> {
        let mut budgets = self.table.select(|b| b.owner == owner)?;
        budgets.sort_by_key(|b| (b.created_at, b.id));
        Ok(budgets)
    }

    pub fn list_for_annual_budget(&self, id: AnnualBudgetId) -> LedgerResult<Vec<MonthBudget>> {
        let mut budgets = self.table.select(|b| b.annual_budget == id)?;
        budgets.sort_by_key(|b| (b.created_at, b.id));
        Ok(budgets)
    }

    /// Number of month budgets drawing on an annual budget
    pub fn count_for_annual_budget(&self, id: AnnualBudgetId) -> LedgerResult<usize> {
        self.table.count(|b| b.annual_budget == id)
    }

    /// Number of month budgets filed under a tag
    pub fn count_for_expenses_tag(&self, id: ExpensesTagId) -> LedgerResult<usize> {
        self.table.count(|b| b.expenses_tag == id)
    }

    pub fn count_for_owner(&self, owner: UserId) -> LedgerResult<usize> {
        self.table.count(|b| b.owner == owner)
    }

    pub fn upsert(&self, budget: MonthBudget) -> LedgerResult<()> {
        self.table.upsert(budget)
    }

    /// Unchecked removal; [`Storage`](super::Storage) checks dependents first
    pub(crate) fn delete(&self, id: MonthBudgetId) -> LedgerResult<bool> {
        Ok(self.table.remove(&id)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, MonthBudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = MonthBudgetRepository::new(temp_dir.path().join("month_budgets.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_reference_counts() {
        let (_temp, repo) = create_test_repo();
        let owner = UserId::new();
        let annual = AnnualBudgetId::new();
        let tag = ExpensesTagId::new();
        let other_tag = ExpensesTagId::new();

        repo.upsert(MonthBudget::new(owner, annual, tag, Money::from_cents(100), "enero"))
            .unwrap();
        repo.upsert(MonthBudget::new(owner, annual, other_tag, Money::from_cents(100), ""))
            .unwrap();

        assert_eq!(repo.count_for_annual_budget(annual).unwrap(), 2);
        assert_eq!(repo.count_for_expenses_tag(tag).unwrap(), 1);
        assert_eq!(repo.count_for_expenses_tag(ExpensesTagId::new()).unwrap(), 0);
        assert_eq!(repo.list_for_annual_budget(annual).unwrap().len(), 2);
    }

    #[test]
    fn test_list_for_owner_is_scoped() {
        let (_temp, repo) = create_test_repo();
        let owner = UserId::new();
        let budget = MonthBudget::new(
            owner,
            AnnualBudgetId::new(),
            ExpensesTagId::new(),
            Money::from_cents(100),
            "",
        );
        repo.upsert(budget.clone()).unwrap();
        repo.upsert(MonthBudget::new(
            UserId::new(),
            AnnualBudgetId::new(),
            ExpensesTagId::new(),
            Money::from_cents(100),
            "",
        ))
        .unwrap();

        let mine = repo.list_for_owner(owner).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, budget.id);
    }
}
