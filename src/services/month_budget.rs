//! Month budget service
//!
//! A month budget draws on one of the caller's annual budgets and is filed
//! under one of the caller's tags. Both references are resolved through the
//! owner scope on create and whenever a patch changes them.

use crate::audit::EntityType;
use crate::error::LedgerResult;
use crate::models::{
    AnnualBudgetId, ExpensesTagId, Identity, Money, MonthBudget, MonthBudgetId, MonthBudgetPatch,
};
use crate::storage::Storage;

use super::scope;

/// Service for month budget management
pub struct MonthBudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> MonthBudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(
        &self,
        identity: &Identity,
        annual_budget: AnnualBudgetId,
        expenses_tag: ExpensesTagId,
        amount: Money,
        description: &str,
    ) -> LedgerResult<MonthBudget> {
        let budget = MonthBudget::new(
            identity.user_id,
            annual_budget,
            expenses_tag,
            amount,
            description,
        );
        budget.validate()?;

        let _guard = self.storage.write_guard()?;

        scope::annual_budget(self.storage, identity, annual_budget)?;
        let tag = scope::expenses_tag(self.storage, identity, expenses_tag)?;

        self.storage.month_budgets.upsert(budget.clone())?;
        self.storage.month_budgets.save()?;

        self.storage.log_create(
            identity.user_id,
            EntityType::MonthBudget,
            budget.id.to_string(),
            Some(tag.name),
            &budget,
        )?;

        Ok(budget)
    }

    pub fn list(&self, identity: &Identity) -> LedgerResult<Vec<MonthBudget>> {
        self.storage.month_budgets.list_for_owner(identity.user_id)
    }

    /// Month budgets drawing on one of the caller's annual budgets
    pub fn list_for_annual_budget(
        &self,
        identity: &Identity,
        annual_budget: AnnualBudgetId,
    ) -> LedgerResult<Vec<MonthBudget>> {
        scope::annual_budget(self.storage, identity, annual_budget)?;
        self.storage.month_budgets.list_for_annual_budget(annual_budget)
    }

    pub fn get(&self, identity: &Identity, id: MonthBudgetId) -> LedgerResult<MonthBudget> {
        scope::month_budget(self.storage, identity, id)
    }

    pub fn update(
        &self,
        identity: &Identity,
        id: MonthBudgetId,
        patch: MonthBudgetPatch,
    ) -> LedgerResult<MonthBudget> {
        let _guard = self.storage.write_guard()?;

        let before = scope::month_budget(self.storage, identity, id)?;
        let budget = patch.apply(&before);
        budget.validate()?;

        if budget.annual_budget != before.annual_budget {
            scope::annual_budget(self.storage, identity, budget.annual_budget)?;
        }
        if budget.expenses_tag != before.expenses_tag {
            scope::expenses_tag(self.storage, identity, budget.expenses_tag)?;
        }

        self.storage.month_budgets.upsert(budget.clone())?;
        self.storage.month_budgets.save()?;

        self.storage.log_update(
            identity.user_id,
            EntityType::MonthBudget,
            budget.id.to_string(),
            None,
            &before,
            &budget,
        )?;

        Ok(budget)
    }

    /// Delete a month budget no expense is booked against
    pub fn delete(&self, identity: &Identity, id: MonthBudgetId) -> LedgerResult<MonthBudget> {
        let _guard = self.storage.write_guard()?;

        let budget = scope::month_budget(self.storage, identity, id)?;

        self.storage.delete_month_budget(&budget)?;

        self.storage.log_delete(
            identity.user_id,
            EntityType::MonthBudget,
            budget.id.to_string(),
            None,
            &budget,
        )?;

        Ok(budget)
    }
}
