//! JSON export
//!
//! The caller's whole ledger as one versioned document. Only records owned
//! by the exporting identity are included.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    AnnualBudget, Classification, Expense, ExpensesTag, Identity, Income, MonthBudget, UserProfile,
};
use crate::services::{
    AnnualBudgetService, ExpenseService, ExpensesTagService, IncomeService, MonthBudgetService,
    UserService,
};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// One user's complete ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub owner: UserProfile,
    pub annual_budgets: Vec<AnnualBudget>,
    pub expenses_tags: Vec<ExpensesTag>,
    pub month_budgets: Vec<MonthBudget>,
    pub expenses: Vec<Expense>,
    pub incomes: Vec<Income>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub annual_budget_count: usize,
    pub expenses_tag_count: usize,
    pub month_budget_count: usize,
    pub expense_count: usize,
    pub income_count: usize,
    pub earliest_expense: Option<String>,
    pub latest_expense: Option<String>,
}

impl LedgerExport {
    /// Collect everything `identity` owns
    pub fn for_identity(storage: &Storage, identity: &Identity) -> LedgerResult<Self> {
        let owner = UserService::new(storage).profile(identity)?;
        let annual_budgets = AnnualBudgetService::new(storage).list(identity)?;
        let expenses_tags = ExpensesTagService::new(storage).list(identity)?;
        let month_budgets = MonthBudgetService::new(storage).list(identity)?;
        let expenses = ExpenseService::new(storage).list(identity)?;
        let incomes = IncomeService::new(storage).list(identity)?;

        let metadata = ExportMetadata {
            annual_budget_count: annual_budgets.len(),
            expenses_tag_count: expenses_tags.len(),
            month_budget_count: month_budgets.len(),
            expense_count: expenses.len(),
            income_count: incomes.len(),
            earliest_expense: expenses.iter().map(|e| e.date).min().map(|d| d.to_string()),
            latest_expense: expenses.iter().map(|e| e.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            owner,
            annual_budgets,
            expenses_tags,
            month_budgets,
            expenses,
            incomes,
            metadata,
        })
    }

    /// Check the schema version and that every reference resolves inside
    /// the document
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let annual_ids: HashSet<_> = self.annual_budgets.iter().map(|b| b.id).collect();
        let tag_ids: HashSet<_> = self.expenses_tags.iter().map(|t| t.id).collect();
        let month_ids: HashSet<_> = self.month_budgets.iter().map(|b| b.id).collect();

        for budget in &self.month_budgets {
            if !annual_ids.contains(&budget.annual_budget) {
                return Err(format!(
                    "Month budget {} references unknown annual budget {}",
                    budget.id, budget.annual_budget
                ));
            }
            if !tag_ids.contains(&budget.expenses_tag) {
                return Err(format!(
                    "Month budget {} references unknown tag {}",
                    budget.id, budget.expenses_tag
                ));
            }
        }

        for expense in &self.expenses {
            let known = match expense.classification {
                Classification::ExpensesTag(id) => tag_ids.contains(&id),
                Classification::MonthBudget(id) => month_ids.contains(&id),
            };
            if !known {
                return Err(format!(
                    "Expense {} references unknown {}",
                    expense.id, expense.classification
                ));
            }
        }

        Ok(())
    }
}

/// Write the caller's ledger as pretty-printed JSON
pub fn export_json<W: Write>(
    storage: &Storage,
    identity: &Identity,
    writer: &mut W,
) -> LedgerResult<()> {
    let export = LedgerExport::for_identity(storage, identity)?;
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::services::testing::{create_test_storage, register};
    use crate::services::NewExpense;
    use chrono::NaiveDate;

    #[test]
    fn test_export_contains_only_own_records() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let bob = register(&storage, "bob@example.com");

        let tags = ExpensesTagService::new(&storage);
        let mine = tags.create(&alice, "cheve").unwrap();
        tags.create(&bob, "renta").unwrap();
        ExpenseService::new(&storage)
            .create(
                &alice,
                NewExpense {
                    description: "cerveza".into(),
                    amount: Money::from_units(200),
                    date: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
                    expenses_tag: Some(mine.id),
                    month_budget: None,
                },
            )
            .unwrap();

        let export = LedgerExport::for_identity(&storage, &alice).unwrap();
        assert_eq!(export.owner.email, "alice@example.com");
        assert_eq!(export.expenses_tags.len(), 1);
        assert_eq!(export.expenses_tags[0].name, "cheve");
        assert_eq!(export.metadata.expense_count, 1);
        assert_eq!(export.metadata.earliest_expense.as_deref(), Some("2020-03-01"));
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_export_json_output() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        AnnualBudgetService::new(&storage)
            .create(&alice, 2020, Money::from_cents(202000000), "")
            .unwrap();

        let mut buffer = Vec::new();
        export_json(&storage, &alice, &mut buffer).unwrap();

        let parsed: LedgerExport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.annual_budgets.len(), 1);
        assert_eq!(parsed.annual_budgets[0].year, 2020);
        assert!(!String::from_utf8(buffer).unwrap().contains("password"));
    }

    #[test]
    fn test_validate_detects_dangling_reference() {
        let (_temp, storage) = create_test_storage();
        let alice = register(&storage, "alice@example.com");
        let mut export = LedgerExport::for_identity(&storage, &alice).unwrap();

        export.expenses.push(Expense::new(
            alice.user_id,
            Money::from_units(1),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            Classification::ExpensesTag(crate::models::ExpensesTagId::new()),
            "",
        ));
        assert!(export.validate().is_err());
    }
}
