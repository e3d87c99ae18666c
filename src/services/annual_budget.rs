//! Annual budget service
//!
//! One budget per user and year. The year is checked here for a clear
//! message and again by the repository, which is what actually guarantees
//! uniqueness.

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{AnnualBudget, AnnualBudgetId, AnnualBudgetPatch, Identity, Money};
use crate::storage::Storage;

use super::scope;

/// Service for annual budget management
pub struct AnnualBudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> AnnualBudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a budget for `year` owned by the caller
    pub fn create(
        &self,
        identity: &Identity,
        year: i32,
        amount: Money,
        description: &str,
    ) -> LedgerResult<AnnualBudget> {
        let budget = AnnualBudget::new(identity.user_id, year, amount, description);
        budget.validate()?;

        let _guard = self.storage.write_guard()?;

        if self
            .storage
            .annual_budgets
            .get_by_year(identity.user_id, year)?
            .is_some()
        {
            return Err(duplicate_year(year));
        }

        self.storage.annual_budgets.insert(budget.clone())?;
        self.storage.annual_budgets.save()?;

        self.storage.log_create(
            identity.user_id,
            EntityType::AnnualBudget,
            budget.id.to_string(),
            Some(budget.to_string()),
            &budget,
        )?;

        Ok(budget)
    }

    pub fn list(&self, identity: &Identity) -> LedgerResult<Vec<AnnualBudget>> {
        self.storage.annual_budgets.list_for_owner(identity.user_id)
    }

    pub fn get(&self, identity: &Identity, id: AnnualBudgetId) -> LedgerResult<AnnualBudget> {
        scope::annual_budget(self.storage, identity, id)
    }

    pub fn get_by_year(&self, identity: &Identity, year: i32) -> LedgerResult<Option<AnnualBudget>> {
        self.storage.annual_budgets.get_by_year(identity.user_id, year)
    }

    /// Find by year (e.g. `2020`) or by ID
    pub fn find(&self, identity: &Identity, identifier: &str) -> LedgerResult<AnnualBudget> {
        let identifier = identifier.trim();

        if let Ok(year) = identifier.parse::<i32>() {
            if let Some(budget) = self.get_by_year(identity, year)? {
                return Ok(budget);
            }
        }

        match identifier.parse::<AnnualBudgetId>() {
            Ok(id) => self.get(identity, id),
            Err(_) => Err(LedgerError::annual_budget_not_found(identifier)),
        }
    }

    pub fn update(
        &self,
        identity: &Identity,
        id: AnnualBudgetId,
        patch: AnnualBudgetPatch,
    ) -> LedgerResult<AnnualBudget> {
        let _guard = self.storage.write_guard()?;

        let before = scope::annual_budget(self.storage, identity, id)?;
        let budget = patch.apply(&before);
        budget.validate()?;

        if budget.year != before.year {
            if let Some(other) = self
                .storage
                .annual_budgets
                .get_by_year(identity.user_id, budget.year)?
            {
                if other.id != id {
                    return Err(duplicate_year(budget.year));
                }
            }
        }

        self.storage.annual_budgets.update(budget.clone())?;
        self.storage.annual_budgets.save()?;

        self.storage.log_update(
            identity.user_id,
            EntityType::AnnualBudget,
            budget.id.to_string(),
            Some(budget.to_string()),
            &before,
            &budget,
        )?;

        Ok(budget)
    }

    /// Delete a budget no month budget draws on
    pub fn delete(&self, identity: &Identity, id: AnnualBudgetId) -> LedgerResult<AnnualBudget> {
        let _guard = self.storage.write_guard()?;

        let budget = scope::annual_budget(self.storage, identity, id)?;

        self.storage.delete_annual_budget(&budget)?;

        self.storage.log_delete(
            identity.user_id,
            EntityType::AnnualBudget,
            budget.id.to_string(),
            Some(budget.to_string()),
            &budget,
        )?;

        Ok(budget)
    }
}

fn duplicate_year(year: i32) -> LedgerError {
    LedgerError::Conflict {
        entity_type: "Annual budget",
        identifier: format!("year {}", year),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FintrackPaths;
    use crate::models::{ExpensesTag, MonthBudget, ValidationError};
    use crate::services::testing::{create_test_storage, register};

    #[test]
    fn test_create_and_find_by_owner_and_year() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let service = AnnualBudgetService::new(&storage);

        let budget = service
            .create(&alice, 2020, Money::from_cents(202000000), "carro")
            .unwrap();

        let found = service.get_by_year(&alice, 2020).unwrap().unwrap();
        assert_eq!(found.id, budget.id);
        assert_eq!(found.owner, alice.user_id);
    }

    #[test]
    fn test_duplicate_year_conflicts_per_owner() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let bob = register(&storage, "bob@example.com");
        let service = AnnualBudgetService::new(&storage);
        let amount = Money::from_cents(202000000);

        service.create(&alice, 2020, amount, "").unwrap();

        let err = service.create(&alice, 2020, amount, "").unwrap_err();
        assert!(err.is_conflict());
        assert!(!err.is_validation());

        let theirs = service.create(&bob, 2020, amount, "").unwrap();
        assert_eq!(theirs.owner, bob.user_id);
        assert_eq!(service.list(&alice).unwrap().len(), 1);
        assert_eq!(service.list(&bob).unwrap().len(), 1);
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let service = AnnualBudgetService::new(&storage);

        for cents in [0, -1, -202000000] {
            let err = service
                .create(&alice, 2020, Money::from_cents(cents), "")
                .unwrap_err();
            assert!(matches!(
                err,
                LedgerError::Validation(ValidationError::NonPositiveAmount { field: "amount", .. })
            ));
        }
        assert!(service.list(&alice).unwrap().is_empty());
    }

    #[test]
    fn test_update_year_onto_existing_conflicts() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let service = AnnualBudgetService::new(&storage);
        service.create(&alice, 2020, Money::from_cents(100), "").unwrap();
        let other = service.create(&alice, 2021, Money::from_cents(100), "").unwrap();

        let err = service
            .update(
                &alice,
                other.id,
                AnnualBudgetPatch {
                    year: Some(2020),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_conflict());

        let updated = service
            .update(
                &alice,
                other.id,
                AnnualBudgetPatch {
                    amount: Some(Money::from_cents(999)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount.cents(), 999);
        assert_eq!(updated.year, 2021);
    }

    #[test]
    fn test_patch_amount_to_zero_rejected() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let service = AnnualBudgetService::new(&storage);
        let budget = service.create(&alice, 2020, Money::from_cents(100), "").unwrap();

        let err = service
            .update(
                &alice,
                budget.id,
                AnnualBudgetPatch {
                    amount: Some(Money::zero()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.get(&alice, budget.id).unwrap().amount.cents(), 100);
    }

    #[test]
    fn test_other_owner_sees_not_found() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let bob = register(&storage, "bob@example.com");
        let service = AnnualBudgetService::new(&storage);
        let budget = service.create(&alice, 2020, Money::from_cents(100), "").unwrap();

        assert!(service.get(&bob, budget.id).unwrap_err().is_not_found());
        assert!(service
            .update(&bob, budget.id, AnnualBudgetPatch::default())
            .unwrap_err()
            .is_not_found());
        assert!(service.delete(&bob, budget.id).unwrap_err().is_not_found());
        assert!(service.list(&bob).unwrap().is_empty());
        assert!(service.find(&bob, "2020").unwrap_err().is_not_found());
    }

    #[test]
    fn test_find_by_year_or_id() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let service = AnnualBudgetService::new(&storage);
        let budget = service.create(&alice, 2020, Money::from_cents(100), "").unwrap();

        assert_eq!(service.find(&alice, "2020").unwrap().id, budget.id);
        assert_eq!(service.find(&alice, &budget.id.full()).unwrap().id, budget.id);
        assert!(service.find(&alice, "nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_year_unique_across_separately_opened_stores() {
        let (temp_dir, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let other = Storage::open(paths.clone()).unwrap();

        AnnualBudgetService::new(&storage)
            .create(&alice, 2020, Money::from_units(1000), "carro")
            .unwrap();
        let err = AnnualBudgetService::new(&other)
            .create(&alice, 2020, Money::from_units(500), "")
            .unwrap_err();
        assert_eq!(err.status_code(), 409);

        let reopened = Storage::open(paths).unwrap();
        let budgets = AnnualBudgetService::new(&reopened).list(&alice).unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].description, "carro");
    }

    #[test]
    fn test_delete_blocked_by_month_budget() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let service = AnnualBudgetService::new(&storage);
        let budget = service.create(&alice, 2020, Money::from_cents(100), "").unwrap();

        let tag = ExpensesTag::new(alice.user_id, "renta");
        storage.expenses_tags.upsert(tag.clone()).unwrap();
        storage.expenses_tags.save().unwrap();
        let month = MonthBudget::new(alice.user_id, budget.id, tag.id, Money::from_cents(10), "");
        storage.month_budgets.upsert(month.clone()).unwrap();
        storage.month_budgets.save().unwrap();

        let err = service.delete(&alice, budget.id).unwrap_err();
        assert!(matches!(err, LedgerError::Protected { dependents: 1, .. }));
        assert_eq!(err.status_code(), 409);

        storage.month_budgets.delete(month.id).unwrap();
        storage.month_budgets.save().unwrap();
        service.delete(&alice, budget.id).unwrap();
        assert!(service.list(&alice).unwrap().is_empty());
    }
}
