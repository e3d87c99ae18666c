//! Expenses tag repository (`expenses_tags.json`)

use std::path::PathBuf;

use crate::error::LedgerResult;
use crate::models::{ExpensesTag, ExpensesTagId, UserId};

use super::table::{Record, Table};

impl Record for ExpensesTag {
    type Key = ExpensesTagId;

    fn key(&self) -> ExpensesTagId {
        self.id
    }
}

pub struct ExpensesTagRepository {
    table: Table<ExpensesTag>,
}

impl ExpensesTagRepository {
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

    pub fn get(&self, id: ExpensesTagId) -> LedgerResult<Option<ExpensesTag>> {
        self.table.get(&id)
    }

    /// The owner's tags ordered by name (case-insensitive)
    pub fn list_for_owner(&self, owner: UserId) -> LedgerResult<Vec<ExpensesTag>> {
        let mut tags = self.table.select(|t| t.owner == owner)?;
        tags.sort_by_key(|t| t.name.to_lowercase());
        Ok(tags)
    }

    /// Look up one of the owner's tags by name (case-insensitive)
    pub fn get_by_name(&self, owner: UserId, name: &str) -> LedgerResult<Option<ExpensesTag>> {
        let name = name.trim().to_lowercase();
        self.table
            .find(|t| t.owner == owner && t.name.to_lowercase() == name)
    }

    pub fn count_for_owner(&self, owner: UserId) -> LedgerResult<usize> {
        self.table.count(|t| t.owner == owner)
    }

    pub fn upsert(&self, tag: ExpensesTag) -> LedgerResult<()> {
        self.table.upsert(tag)
    }

    /// Unchecked removal; [`Storage`](super::Storage) checks dependents first
    pub(crate) fn delete(&self, id: ExpensesTagId) -> LedgerResult<bool> {
        Ok(self.table.remove(&id)?.is_some())
    }
}
