//! Income service

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::LedgerResult;
use crate::models::{Identity, Income, IncomeId, IncomePatch, Money, Periodicity};
use crate::storage::Storage;

use super::scope;

/// Service for income management
pub struct IncomeService<'a> {
    storage: &'a Storage,
}

impl<'a> IncomeService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(
        &self,
        identity: &Identity,
        amount: Money,
        date: NaiveDate,
        periodicity: Periodicity,
        description: &str,
    ) -> LedgerResult<Income> {
        let income = Income::new(identity.user_id, amount, date, periodicity, description);
        income.validate()?;

        let _guard = self.storage.write_guard()?;

        self.storage.incomes.upsert(income.clone())?;
        self.storage.incomes.save()?;

        self.storage.log_create(
            identity.user_id,
            EntityType::Income,
            income.id.to_string(),
            Some(income.description.clone()).filter(|d| !d.is_empty()),
            &income,
        )?;

        Ok(income)
    }

    pub fn list(&self, identity: &Identity) -> LedgerResult<Vec<Income>> {
        self.storage.incomes.list_for_owner(identity.user_id)
    }

    pub fn get(&self, identity: &Identity, id: IncomeId) -> LedgerResult<Income> {
        scope::income(self.storage, identity, id)
    }

    pub fn update(
        &self,
        identity: &Identity,
        id: IncomeId,
        patch: IncomePatch,
    ) -> LedgerResult<Income> {
        let _guard = self.storage.write_guard()?;

        let before = scope::income(self.storage, identity, id)?;
        let income = patch.apply(&before);
        income.validate()?;

        self.storage.incomes.upsert(income.clone())?;
        self.storage.incomes.save()?;

        self.storage.log_update(
            identity.user_id,
            EntityType::Income,
            income.id.to_string(),
            None,
            &before,
            &income,
        )?;

        Ok(income)
    }

    pub fn delete(&self, identity: &Identity, id: IncomeId) -> LedgerResult<Income> {
        let _guard = self.storage.write_guard()?;

        let income = scope::income(self.storage, identity, id)?;

        self.storage.incomes.delete(id)?;
        self.storage.incomes.save()?;

        self.storage.log_delete(
            identity.user_id,
            EntityType::Income,
            income.id.to_string(),
            None,
            &income,
        )?;

        Ok(income)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{create_test_storage, register};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 31).unwrap()
    }

    #[test]
    fn test_create_list_update_delete() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let service = IncomeService::new(&storage);

        let income = service
            .create(&alice, Money::from_units(15000), date(), Periodicity::Monthly, "salario")
            .unwrap();
        assert_eq!(service.list(&alice).unwrap().len(), 1);

        let updated = service
            .update(
                &alice,
                income.id,
                IncomePatch {
                    periodicity: Some(Periodicity::Annual),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.periodicity, Periodicity::Annual);
        assert_eq!(updated.description, "salario");

        service.delete(&alice, income.id).unwrap();
        assert!(service.list(&alice).unwrap().is_empty());
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let service = IncomeService::new(&storage);

        for cents in [0, -1] {
            assert!(service
                .create(&alice, Money::from_cents(cents), date(), Periodicity::None, "")
                .unwrap_err()
                .is_validation());
        }

        let income = service
            .create(&alice, Money::from_units(1), date(), Periodicity::None, "")
            .unwrap();
        assert!(service
            .update(
                &alice,
                income.id,
                IncomePatch {
                    amount: Some(Money::from_cents(-5)),
                    ..Default::default()
                },
            )
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_other_owner_sees_not_found() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let bob = register(&storage, "bob@example.com");
        let service = IncomeService::new(&storage);
        let income = service
            .create(&alice, Money::from_units(1), date(), Periodicity::None, "")
            .unwrap();

        assert!(service.list(&bob).unwrap().is_empty());
        assert!(service.get(&bob, income.id).unwrap_err().is_not_found());
        assert!(service
            .update(&bob, income.id, IncomePatch::default())
            .unwrap_err()
            .is_not_found());
        assert!(service.delete(&bob, income.id).unwrap_err().is_not_found());
    }
}
