//! Expense service
//!
//! Every create and update folds the two optional references into a
//! [`Classification`] (exactly one must be set) and then checks that the
//! chosen tag or month budget belongs to the caller. Patches are merged
//! first and the merged result is validated, so a patch can neither clear
//! the only reference nor add a second one.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::LedgerResult;
use crate::models::{
    Classification, Expense, ExpenseId, ExpensePatch, ExpensesTagId, Identity, Money,
    MonthBudgetId,
};
use crate::storage::Storage;

use super::scope;

/// Input for [`ExpenseService::create`]
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub expenses_tag: Option<ExpensesTagId>,
    pub month_budget: Option<MonthBudgetId>,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, identity: &Identity, input: NewExpense) -> LedgerResult<Expense> {
        let classification = Classification::from_parts(input.expenses_tag, input.month_budget)?;
        let expense = Expense::new(
            identity.user_id,
            input.amount,
            input.date,
            classification,
            input.description,
        );
        expense.validate()?;

        let _guard = self.storage.write_guard()?;

        self.check_classification(identity, &expense.classification)?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            identity.user_id,
            EntityType::Expense,
            expense.id.to_string(),
            non_empty(&expense.description),
            &expense,
        )?;

        Ok(expense)
    }

    pub fn list(&self, identity: &Identity) -> LedgerResult<Vec<Expense>> {
        self.storage.expenses.list_for_owner(identity.user_id)
    }

    pub fn get(&self, identity: &Identity, id: ExpenseId) -> LedgerResult<Expense> {
        scope::expense(self.storage, identity, id)
    }

    pub fn update(
        &self,
        identity: &Identity,
        id: ExpenseId,
        patch: ExpensePatch,
    ) -> LedgerResult<Expense> {
        let _guard = self.storage.write_guard()?;

        let before = scope::expense(self.storage, identity, id)?;
        let expense = patch.apply(&before)?;
        expense.validate()?;

        if expense.classification != before.classification {
            self.check_classification(identity, &expense.classification)?;
        }

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_update(
            identity.user_id,
            EntityType::Expense,
            expense.id.to_string(),
            non_empty(&expense.description),
            &before,
            &expense,
        )?;

        Ok(expense)
    }

    pub fn delete(&self, identity: &Identity, id: ExpenseId) -> LedgerResult<Expense> {
        let _guard = self.storage.write_guard()?;

        let expense = scope::expense(self.storage, identity, id)?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            identity.user_id,
            EntityType::Expense,
            expense.id.to_string(),
            non_empty(&expense.description),
            &expense,
        )?;

        Ok(expense)
    }

    /// The referenced tag or month budget must be the caller's
    fn check_classification(
        &self,
        identity: &Identity,
        classification: &Classification,
    ) -> LedgerResult<()> {
        match *classification {
            Classification::ExpensesTag(id) => {
                scope::expenses_tag(self.storage, identity, id)?;
            }
            Classification::MonthBudget(id) => {
                scope::month_budget(self.storage, identity, id)?;
            }
        }
        Ok(())
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::models::{AnnualBudget, ClassificationError, ExpensesTag, MonthBudget};
    use crate::services::testing::{create_test_storage, register};

    struct Fixture {
        tag: ExpensesTagId,
        month: MonthBudgetId,
    }

    fn seed(storage: &Storage, identity: &Identity) -> Fixture {
        let annual = AnnualBudget::new(identity.user_id, 2020, Money::from_units(24000), "");
        let tag = ExpensesTag::new(identity.user_id, "cheve");
        let month = MonthBudget::new(identity.user_id, annual.id, tag.id, Money::from_units(500), "");
        storage.annual_budgets.insert(annual).unwrap();
        storage.annual_budgets.save().unwrap();
        storage.expenses_tags.upsert(tag.clone()).unwrap();
        storage.expenses_tags.save().unwrap();
        storage.month_budgets.upsert(month.clone()).unwrap();
        storage.month_budgets.save().unwrap();
        Fixture {
            tag: tag.id,
            month: month.id,
        }
    }

    fn input(tag: Option<ExpensesTagId>, month: Option<MonthBudgetId>) -> NewExpense {
        NewExpense {
            description: "cerveza".into(),
            amount: Money::from_units(200),
            date: NaiveDate::from_ymd_opt(2020, 12, 12).unwrap(),
            expenses_tag: tag,
            month_budget: month,
        }
    }

    #[test]
    fn test_classification_on_create() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let f = seed(&storage, &alice);
        let service = ExpenseService::new(&storage);

        let err = service
            .create(&alice, input(Some(f.tag), Some(f.month)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidState(ClassificationError::Both)));
        assert!(err.to_string().contains("choose exactly one classification"));

        let err = service.create(&alice, input(None, None)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidState(ClassificationError::Neither)));
        assert!(err.to_string().contains("must choose one classification"));

        let expense = service.create(&alice, input(Some(f.tag), None)).unwrap();
        assert_eq!(expense.expenses_tag(), Some(f.tag));
        assert_eq!(expense.month_budget(), None);

        let expense = service.create(&alice, input(None, Some(f.month))).unwrap();
        assert_eq!(expense.month_budget(), Some(f.month));

        assert_eq!(service.list(&alice).unwrap().len(), 2);
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let f = seed(&storage, &alice);
        let service = ExpenseService::new(&storage);

        for cents in [0, -20000] {
            let mut new = input(Some(f.tag), None);
            new.amount = Money::from_cents(cents);
            assert!(service.create(&alice, new).unwrap_err().is_validation());
        }
    }

    #[test]
    fn test_reference_must_belong_to_caller() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let bob = register(&storage, "bob@example.com");
        let theirs = seed(&storage, &bob);
        let service = ExpenseService::new(&storage);

        assert!(service
            .create(&alice, input(Some(theirs.tag), None))
            .unwrap_err()
            .is_not_found());
        assert!(service
            .create(&alice, input(None, Some(theirs.month)))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_update_revalidates_merged_classification() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let f = seed(&storage, &alice);
        let service = ExpenseService::new(&storage);
        let expense = service.create(&alice, input(Some(f.tag), None)).unwrap();

        // Adding a second reference
        let err = service
            .update(
                &alice,
                expense.id,
                ExpensePatch {
                    month_budget: Some(Some(f.month)),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidState(ClassificationError::Both)));

        // Clearing the only reference
        let err = service
            .update(
                &alice,
                expense.id,
                ExpensePatch {
                    expenses_tag: Some(None),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidState(ClassificationError::Neither)));

        // Switching in one patch is fine
        let moved = service
            .update(
                &alice,
                expense.id,
                ExpensePatch {
                    expenses_tag: Some(None),
                    month_budget: Some(Some(f.month)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(moved.classification, Classification::MonthBudget(f.month));

        let stored = service.get(&alice, expense.id).unwrap();
        assert_eq!(stored.classification, Classification::MonthBudget(f.month));
    }

    #[test]
    fn test_update_amount_to_zero_rejected() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let f = seed(&storage, &alice);
        let service = ExpenseService::new(&storage);
        let expense = service.create(&alice, input(Some(f.tag), None)).unwrap();

        let err = service
            .update(
                &alice,
                expense.id,
                ExpensePatch {
                    amount: Some(Money::zero()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_other_owner_sees_not_found() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let bob = register(&storage, "bob@example.com");
        let f = seed(&storage, &alice);
        let service = ExpenseService::new(&storage);
        let expense = service.create(&alice, input(Some(f.tag), None)).unwrap();

        assert!(service.list(&bob).unwrap().is_empty());
        assert!(service.get(&bob, expense.id).unwrap_err().is_not_found());
        assert!(service
            .update(&bob, expense.id, ExpensePatch::default())
            .unwrap_err()
            .is_not_found());
        assert!(service.delete(&bob, expense.id).unwrap_err().is_not_found());

        service.delete(&alice, expense.id).unwrap();
        assert!(service.list(&alice).unwrap().is_empty());
    }
}
