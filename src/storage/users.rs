//! User repository
//!
//! Owns `users.json`. The normalized email is a unique key: `insert` and
//! `update` check it under the table's write lock.

use std::path::PathBuf;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{User, UserId};

use super::table::{Record, Table};

impl Record for User {
    type Key = UserId;

    fn key(&self) -> UserId {
        self.id
    }
}

pub struct UserRepository {
    table: Table<User>,
}

impl UserRepository {
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

    pub fn get(&self, id: UserId) -> LedgerResult<Option<User>> {
        self.table.get(&id)
    }

    /// Look up by an already normalized email
    pub fn get_by_email(&self, email: &str) -> LedgerResult<Option<User>> {
        self.table.find(|u| u.email == email)
    }

    /// All users ordered by email
    pub fn get_all(&self) -> LedgerResult<Vec<User>> {
        let mut users = self.table.select(|_| true)?;
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    /// Add a new user, failing with `Conflict` if the email is taken
    pub fn insert(&self, user: User) -> LedgerResult<()> {
        let mut rows = self.table.write()?;
        if rows.values().any(|u| u.email == user.email) {
            return Err(email_conflict(&user.email));
        }
        rows.insert(user.id, user);
        Ok(())
    }

    /// Replace an existing user, failing with `Conflict` if the new email
    /// belongs to someone else
    pub fn update(&self, user: User) -> LedgerResult<()> {
        let mut rows = self.table.write()?;
        if !rows.contains_key(&user.id) {
            return Err(LedgerError::NotFound {
                entity_type: "User",
                identifier: user.id.to_string(),
            });
        }
        if rows
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(email_conflict(&user.email));
        }
        rows.insert(user.id, user);
        Ok(())
    }

    /// Unchecked removal; [`Storage`](super::Storage) checks dependents first
    pub(crate) fn delete(&self, id: UserId) -> LedgerResult<bool> {
        Ok(self.table.remove(&id)?.is_some())
    }

    pub fn count(&self) -> LedgerResult<usize> {
        self.table.count(|_| true)
    }
}

fn email_conflict(email: &str) -> LedgerError {
    LedgerError::Conflict {
        entity_type: "User",
        identifier: email.to_string(),
    }
}
