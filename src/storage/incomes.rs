//! Income repository (`incomes.json`)

use std::path::PathBuf;

use crate::error::LedgerResult;
use crate::models::{Income, IncomeId, UserId};

use super::table::{Record, Table};

impl Record for Income {
    type Key = IncomeId;

    fn key(&self) -> IncomeId {
        self.id
    }
}

pub struct IncomeRepository {
    table: Table<Income>,
}

impl IncomeRepository {
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

    pub fn get(&self, id: IncomeId) -> LedgerResult<Option<Income>> {
        self.table.get(&id)
    }

    /// The owner's incomes ordered by date, then creation time
    pub fn list_for_owner(&self, owner: UserId) -> LedgerResult<Vec<Income>> {
        let mut incomes = self.table.select(|i| i.owner == owner)?;
        incomes.sort_by_key(|i| (i.date, i.created_at, i.id));
        Ok(incomes)
    }

    pub fn count_for_owner(&self, owner: UserId) -> LedgerResult<usize> {
        self.table.count(|i| i.owner == owner)
    }

    pub fn upsert(&self, income: Income) -> LedgerResult<()> {
        self.table.upsert(income)
    }

    pub fn delete(&self, id: IncomeId) -> LedgerResult<bool> {
        Ok(self.table.remove(&id)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Periodicity};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_upsert_list_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("incomes.json");
        let repo = IncomeRepository::new(path.clone());
        let owner = UserId::new();

        let income = Income::new(
            owner,
            Money::from_cents(1_500_000),
            NaiveDate::from_ymd_opt(2020, 1, 31).unwrap(),
            Periodicity::Monthly,
            "salario",
        );
        repo.upsert(income.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = IncomeRepository::new(path);
        reloaded.load().unwrap();
        let mine = reloaded.list_for_owner(owner).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].periodicity, Periodicity::Monthly);
        assert!(reloaded.list_for_owner(UserId::new()).unwrap().is_empty());
    }
}
