//! Month budget model
//!
//! A monthly slice of an annual budget, earmarked for one expenses tag.
//! Both references are required; the service checks that they exist and
//! belong to the same owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identity::Owned;
use super::ids::{AnnualBudgetId, ExpensesTagId, MonthBudgetId, UserId};
use super::money::Money;
use super::validation::{BudgetEntry, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthBudget {
    pub id: MonthBudgetId,
    pub owner: UserId,
    #[serde(default)]
    pub description: String,
    pub amount: Money,
    pub annual_budget: AnnualBudgetId,
    pub expenses_tag: ExpensesTagId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MonthBudget {
    pub fn new(
        owner: UserId,
        annual_budget: AnnualBudgetId,
        expenses_tag: ExpensesTagId,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: MonthBudgetId::new(),
            owner,
            description: description.into(),
            amount,
            annual_budget,
            expenses_tag,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_entry()
    }
}

impl Owned for MonthBudget {
    fn owner(&self) -> UserId {
        self.owner
    }
}

impl BudgetEntry for MonthBudget {
    fn description(&self) -> &str {
        &self.description
    }

    fn amount(&self) -> Money {
        self.amount
    }
}

/// Partial update for a month budget
#[derive(Debug, Clone, Default)]
pub struct MonthBudgetPatch {
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub annual_budget: Option<AnnualBudgetId>,
    pub expenses_tag: Option<ExpensesTagId>,
}

impl MonthBudgetPatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.amount.is_none()
            && self.annual_budget.is_none()
            && self.expenses_tag.is_none()
    }

    pub fn apply(&self, budget: &MonthBudget) -> MonthBudget {
        let mut merged = budget.clone();
        if let Some(description) = &self.description {
            merged.description = description.clone();
        }
        if let Some(amount) = self.amount {
            merged.amount = amount;
        }
        if let Some(annual_budget) = self.annual_budget {
            merged.annual_budget = annual_budget;
        }
        if let Some(expenses_tag) = self.expenses_tag {
            merged.expenses_tag = expenses_tag;
        }
        merged.updated_at = Utc::now();
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(amount: Money) -> MonthBudget {
        MonthBudget::new(
            UserId::new(),
            AnnualBudgetId::new(),
            ExpensesTagId::new(),
            amount,
            "mensualidad carro",
        )
    }

    #[test]
    fn test_valid_month_budget() {
        assert!(sample(Money::from_units(3000)).validate().is_ok());
    }

    #[test]
    fn test_month_budget_amount_zero() {
        assert!(matches!(
            sample(Money::zero()).validate(),
            Err(ValidationError::NonPositiveAmount { field: "amount", .. })
        ));
    }

    #[test]
    fn test_patch_swaps_tag() {
        let budget = sample(Money::from_units(3000));
        let new_tag = ExpensesTagId::new();
        let merged = MonthBudgetPatch {
            expenses_tag: Some(new_tag),
            ..Default::default()
        }
        .apply(&budget);
        assert_eq!(merged.expenses_tag, new_tag);
        assert_eq!(merged.annual_budget, budget.annual_budget);
    }
}
