//! Expenses tag model
//!
//! A tag is a user-defined expense category. Month budgets are tied to a
//! tag, and an expense may be classified directly under one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::identity::Owned;
use super::ids::{ExpensesTagId, UserId};
use super::validation::{validate_required_text, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpensesTag {
    pub id: ExpensesTagId,
    pub owner: UserId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExpensesTag {
    pub fn new(owner: UserId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ExpensesTagId::new(),
            owner,
            name: name.into().trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into().trim().to_string();
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required_text("name", &self.name)
    }
}

impl Owned for ExpensesTag {
    fn owner(&self) -> UserId {
        self.owner
    }
}

impl fmt::Display for ExpensesTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
