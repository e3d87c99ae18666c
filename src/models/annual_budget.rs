//! Annual budget model
//!
//! One budget per user per year. The (year, owner) uniqueness is enforced by
//! the store, not here; see `storage::annual_budgets`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::identity::Owned;
use super::ids::{AnnualBudgetId, UserId};
use super::money::Money;
use super::validation::{BudgetEntry, ValidationError};

/// A user's budget for a whole year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualBudget {
    pub id: AnnualBudgetId,
    pub owner: UserId,
    #[serde(default)]
    pub description: String,
    pub amount: Money,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AnnualBudget {
    /// Create a new annual budget
    pub fn new(owner: UserId, year: i32, amount: Money, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: AnnualBudgetId::new(),
            owner,
            description: description.into(),
            amount,
            year,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_entry()
    }
}

impl Owned for AnnualBudget {
    fn owner(&self) -> UserId {
        self.owner
    }
}

impl BudgetEntry for AnnualBudget {
    fn description(&self) -> &str {
        &self.description
    }

    fn amount(&self) -> Money {
        self.amount
    }
}

impl fmt::Display for AnnualBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Budget for {}", self.year)
    }
}

/// Partial update for an annual budget
#[derive(Debug, Clone, Default)]
pub struct AnnualBudgetPatch {
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub year: Option<i32>,
}

impl AnnualBudgetPatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.amount.is_none() && self.year.is_none()
    }

    /// Merge into a copy of the budget; the caller re-validates the result
    pub fn apply(&self, budget: &AnnualBudget) -> AnnualBudget {
        let mut merged = budget.clone();
        if let Some(description) = &self.description {
            merged.description = description.clone();
        }
        if let Some(amount) = self.amount {
            merged.amount = amount;
        }
        if let Some(year) = self.year {
            merged.year = year;
        }
        merged.updated_at = Utc::now();
        merged
    }
}
