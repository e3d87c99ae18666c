//! Expense model
//!
//! An expense is classified under exactly one of a month budget or a
//! standalone expenses tag. Inputs arrive as two optional references and are
//! folded into [`Classification`], so a stored expense always holds exactly
//! one of them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::identity::Owned;
use super::ids::{ExpenseId, ExpensesTagId, MonthBudgetId, UserId};
use super::money::Money;
use super::validation::{BudgetEntry, ValidationError};

/// Where an expense is booked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    ExpensesTag(ExpensesTagId),
    MonthBudget(MonthBudgetId),
}

/// Rejected combinations of classification references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClassificationError {
    #[error("choose exactly one classification: month budget or expenses tag, not both")]
    Both,
    #[error("must choose one classification: month budget or expenses tag")]
    Neither,
}

impl Classification {
    /// Build from the two optional references; exactly one must be set
    pub fn from_parts(
        expenses_tag: Option<ExpensesTagId>,
        month_budget: Option<MonthBudgetId>,
    ) -> Result<Self, ClassificationError> {
        match (expenses_tag, month_budget) {
            (Some(_), Some(_)) => Err(ClassificationError::Both),
            (None, None) => Err(ClassificationError::Neither),
            (Some(tag), None) => Ok(Self::ExpensesTag(tag)),
            (None, Some(budget)) => Ok(Self::MonthBudget(budget)),
        }
    }

    pub fn expenses_tag(&self) -> Option<ExpensesTagId> {
        match self {
            Self::ExpensesTag(id) => Some(*id),
            Self::MonthBudget(_) => None,
        }
    }

    pub fn month_budget(&self) -> Option<MonthBudgetId> {
        match self {
            Self::MonthBudget(id) => Some(*id),
            Self::ExpensesTag(_) => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpensesTag(id) => write!(f, "tag {}", id),
            Self::MonthBudget(id) => write!(f, "month budget {}", id),
        }
    }
}

/// A single, detailed expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub owner: UserId,
    #[serde(default)]
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub classification: Classification,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        owner: UserId,
        amount: Money,
        date: NaiveDate,
        classification: Classification,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            owner,
            description: description.into(),
            amount,
            date,
            classification,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn expenses_tag(&self) -> Option<ExpensesTagId> {
        self.classification.expenses_tag()
    }

    pub fn month_budget(&self) -> Option<MonthBudgetId> {
        self.classification.month_budget()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_entry()
    }
}

impl Owned for Expense {
    fn owner(&self) -> UserId {
        self.owner
    }
}

impl BudgetEntry for Expense {
    fn description(&self) -> &str {
        &self.description
    }

    fn amount(&self) -> Money {
        self.amount
    }
}

/// Partial update for an expense
///
/// For the classification references, `None` keeps the current value,
/// `Some(None)` clears it and `Some(Some(id))` sets it.
#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub expenses_tag: Option<Option<ExpensesTagId>>,
    pub month_budget: Option<Option<MonthBudgetId>>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.expenses_tag.is_none()
            && self.month_budget.is_none()
    }

    /// Merge into a copy of the expense, re-checking the classification
    /// against the merged references
    pub fn apply(&self, expense: &Expense) -> Result<Expense, ClassificationError> {
        let expenses_tag = self.expenses_tag.unwrap_or(expense.expenses_tag());
        let month_budget = self.month_budget.unwrap_or(expense.month_budget());

        let mut merged = expense.clone();
        merged.classification = Classification::from_parts(expenses_tag, month_budget)?;
        if let Some(description) = &self.description {
            merged.description = description.clone();
        }
        if let Some(amount) = self.amount {
            merged.amount = amount;
        }
        if let Some(date) = self.date {
            merged.date = date;
        }
        merged.updated_at = Utc::now();
        Ok(merged)
    }
}
