//! Session token repository (`tokens.json`)
//!
//! Keyed by the token string; a user holds at most one token.

use std::path::PathBuf;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AuthToken, UserId};

use super::table::{Record, Table};

impl Record for AuthToken {
    type Key = String;

    fn key(&self) -> String {
        self.key.clone()
    }
}

pub struct TokenRepository {
    table: Table<AuthToken>,
}

impl TokenRepository {
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

    /// Resolve a presented token string
    pub fn get(&self, token: &str) -> LedgerResult<Option<AuthToken>> {
        self.table.get(&token.to_string())
    }

    pub fn get_for_user(&self, user_id: UserId) -> LedgerResult<Option<AuthToken>> {
        self.table.find(|t| t.user_id == user_id)
    }

    /// Store a token, failing with `Conflict` if the user already has one or
    /// the key collides
    pub fn insert(&self, token: AuthToken) -> LedgerResult<()> {
        let mut rows = self.table.write()?;
        let key = token.key();
        if rows.contains_key(&key) || rows.values().any(|t| t.user_id == token.user_id) {
            return Err(LedgerError::Conflict {
                entity_type: "Token",
                identifier: token.user_id.to_string(),
            });
        }
        rows.insert(key, token);
        Ok(())
    }

    /// Drop the user's token; returns whether one existed
    pub fn remove_for_user(&self, user_id: UserId) -> LedgerResult<bool> {
        let mut rows = self.table.write()?;
        let before = rows.len();
        rows.retain(|_, t| t.user_id != user_id);
        Ok(rows.len() != before)
    }
}
