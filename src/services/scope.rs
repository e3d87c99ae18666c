//! Owner-scoped lookups
//!
//! Every ledger read goes through these helpers. A record that exists but
//! belongs to someone else comes back as `NotFound`, exactly like a missing
//! one.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    AnnualBudget, AnnualBudgetId, Expense, ExpenseId, ExpensesTag, ExpensesTagId, Identity,
    Income, IncomeId, MonthBudget, MonthBudgetId, Owned,
};
use crate::storage::Storage;

/// Keep `record` only if `identity` owns it
pub fn owned<T: Owned>(
    identity: &Identity,
    record: Option<T>,
    not_found: impl FnOnce() -> LedgerError,
) -> LedgerResult<T> {
    record
        .filter(|r| identity.owns(r))
        .ok_or_else(not_found)
}

pub fn annual_budget(
    storage: &Storage,
    identity: &Identity,
    id: AnnualBudgetId,
) -> LedgerResult<AnnualBudget> {
    owned(identity, storage.annual_budgets.get(id)?, || {
        LedgerError::annual_budget_not_found(id.to_string())
    })
}

pub fn expenses_tag(
    storage: &Storage,
    identity: &Identity,
    id: ExpensesTagId,
) -> LedgerResult<ExpensesTag> {
    owned(identity, storage.expenses_tags.get(id)?, || {
        LedgerError::expenses_tag_not_found(id.to_string())
    })
}

pub fn month_budget(
    storage: &Storage,
    identity: &Identity,
    id: MonthBudgetId,
) -> LedgerResult<MonthBudget> {
    owned(identity, storage.month_budgets.get(id)?, || {
        LedgerError::month_budget_not_found(id.to_string())
    })
}

pub fn expense(storage: &Storage, identity: &Identity, id: ExpenseId) -> LedgerResult<Expense> {
    owned(identity, storage.expenses.get(id)?, || {
        LedgerError::expense_not_found(id.to_string())
    })
}

pub fn income(storage: &Storage, identity: &Identity, id: IncomeId) -> LedgerResult<Income> {
    owned(identity, storage.incomes.get(id)?, || {
        LedgerError::income_not_found(id.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FintrackPaths;
    use crate::models::{User, UserId};
    use tempfile::TempDir;

    fn identity_for(email: &str) -> Identity {
        Identity::from_user(&User::new(email, "", "hash"))
    }

    #[test]
    fn test_foreign_record_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(FintrackPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let alice = identity_for("alice@example.com");
        let bob = identity_for("bob@example.com");

        let tag = ExpensesTag::new(alice.user_id, "cheve");
        storage.expenses_tags.upsert(tag.clone()).unwrap();
        storage.expenses_tags.save().unwrap();

        assert_eq!(expenses_tag(&storage, &alice, tag.id).unwrap().name, "cheve");

        let foreign = expenses_tag(&storage, &bob, tag.id).unwrap_err();
        let missing = expenses_tag(&storage, &bob, ExpensesTagId::new()).unwrap_err();
        assert!(foreign.is_not_found());
        assert_eq!(foreign.status_code(), missing.status_code());
        assert_eq!(foreign.to_string(), format!("Expenses tag not found: {}", tag.id));
    }

    #[test]
    fn test_owned_helper() {
        let owner = UserId::new();
        let identity = Identity {
            user_id: owner,
            email: "o@example.com".into(),
            is_staff: false,
        };
        let tag = ExpensesTag::new(owner, "x");

        assert!(owned(&identity, Some(tag), || LedgerError::Unauthenticated).is_ok());
        assert!(owned::<ExpensesTag>(&identity, None, || LedgerError::Unauthenticated).is_err());
    }
}
