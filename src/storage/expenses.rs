//! Expense repository (`expenses.json`)

use std::path::PathBuf;

use crate::error::LedgerResult;
use crate::models::{Expense, ExpenseId, ExpensesTagId, MonthBudgetId, UserId};

use super::table::{Record, Table};

impl Record for Expense {
    type Key = ExpenseId;

    fn key(&self) -> ExpenseId {
        self.id
    }
}

pub struct ExpenseRepository {
    table: Table<Expense>,
}

impl ExpenseRepository {
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

    pub fn get(&self, id: ExpenseId) -> LedgerResult<Option<Expense>> {
        self.table.get(&id)
    }

    /// The owner's expenses ordered by date, then creation time
    pub fn list_for_owner(&self, owner: UserId) -> LedgerResult<Vec<Expense>> {
        let mut expenses = self.table.select(|e| e.owner == owner)?;
        expenses.sort_by_key(|e| (e.date, e.created_at, e.id));
        Ok(expenses)
    }

    /// Expenses classified directly under a tag
    pub fn count_for_expenses_tag(&self, id: ExpensesTagId) -> LedgerResult<usize> {
        self.table.count(|e| e.expenses_tag() == Some(id))
    }

    /// Expenses classified under a month budget
    pub fn count_for_month_budget(&self, id: MonthBudgetId) -> LedgerResult<usize> {
        self.table.count(|e| e.month_budget() == Some(id))
    }

    pub fn count_for_owner(&self, owner: UserId) -> LedgerResult<usize> {
        self.table.count(|e| e.owner == owner)
    }

    pub fn upsert(&self, expense: Expense) -> LedgerResult<()> {
        self.table.upsert(expense)
    }

    pub fn delete(&self, id: ExpenseId) -> LedgerResult<bool> {
        Ok(self.table.remove(&id)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Classification, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        (temp_dir, repo)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    #[test]
    fn test_counts_by_classification() {
        let (_temp, repo) = create_test_repo();
        let owner = UserId::new();
        let tag = ExpensesTagId::new();
        let month = MonthBudgetId::new();

        repo.upsert(Expense::new(
            owner,
            Money::from_cents(100),
            date(1),
            Classification::ExpensesTag(tag),
            "cheve",
        ))
        .unwrap();
        repo.upsert(Expense::new(
            owner,
            Money::from_cents(100),
            date(2),
            Classification::MonthBudget(month),
            "renta",
        ))
        .unwrap();

        assert_eq!(repo.count_for_expenses_tag(tag).unwrap(), 1);
        assert_eq!(repo.count_for_month_budget(month).unwrap(), 1);
        assert_eq!(repo.count_for_owner(owner).unwrap(), 2);
    }

    #[test]
    fn test_list_ordered_by_date() {
        let (_temp, repo) = create_test_repo();
        let owner = UserId::new();
        let tag = Classification::ExpensesTag(ExpensesTagId::new());
        for d in [15, 3, 9] {
            repo.upsert(Expense::new(owner, Money::from_cents(1), date(d), tag, ""))
                .unwrap();
        }

        let days: Vec<_> = repo
            .list_for_owner(owner)
            .unwrap()
            .iter()
            .map(|e| e.date)
            .collect();
        assert_eq!(days, vec![date(3), date(9), date(15)]);
    }
}
