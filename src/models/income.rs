//! Income model
//!
//! Income entries are dated amounts with an optional recurrence label.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::identity::Owned;
use super::ids::{IncomeId, UserId};
use super::money::Money;
use super::validation::{BudgetEntry, ValidationError};

/// Recurrence label on an income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Periodicity {
    Monthly,
    Annual,
    #[default]
    None,
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Annual => write!(f, "annual"),
            Self::None => write!(f, "none"),
        }
    }
}

impl FromStr for Periodicity {
    type Err = ValidationError;

    /// Accepts the long names and the single-letter codes ("m", "a")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "monthly" => Ok(Self::Monthly),
            "a" | "annual" | "yearly" => Ok(Self::Annual),
            "" | "none" | "once" => Ok(Self::None),
            other => Err(ValidationError::InvalidPeriodicity(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: IncomeId,
    pub owner: UserId,
    #[serde(default)]
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    #[serde(default)]
    pub periodicity: Periodicity,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Income {
    pub fn new(
        owner: UserId,
        amount: Money,
        date: NaiveDate,
        periodicity: Periodicity,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: IncomeId::new(),
            owner,
            description: description.into(),
            amount,
            date,
            periodicity,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_entry()
    }
}

impl Owned for Income {
    fn owner(&self) -> UserId {
        self.owner
    }
}

impl BudgetEntry for Income {
    fn description(&self) -> &str {
        &self.description
    }

    fn amount(&self) -> Money {
        self.amount
    }
}

/// Partial update for an income
#[derive(Debug, Clone, Default)]
pub struct IncomePatch {
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub periodicity: Option<Periodicity>,
}

impl IncomePatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.periodicity.is_none()
    }

    pub fn apply(&self, income: &Income) -> Income {
        let mut merged = income.clone();
        if let Some(description) = &self.description {
            merged.description = description.clone();
        }
        if let Some(amount) = self.amount {
            merged.amount = amount;
        }
        if let Some(date) = self.date {
            merged.date = date;
        }
        if let Some(periodicity) = self.periodicity {
            merged.periodicity = periodicity;
        }
        merged.updated_at = Utc::now();
        merged
    }
}
