//! CSV export
//!
//! Expenses and incomes as one flat, spreadsheet-friendly list. Expenses
//! carry the name of the tag they are filed under (directly or through
//! their month budget).

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Classification, Identity};
use crate::services::{ExpenseService, ExpensesTagService, IncomeService, MonthBudgetService};
use crate::storage::Storage;

#[derive(Debug, Serialize)]
struct MovementRow {
    kind: &'static str,
    id: String,
    date: String,
    description: String,
    amount: String,
    classification: String,
    tag: String,
    periodicity: String,
}

/// Write the caller's expenses and incomes, ordered by date
pub fn export_movements_csv<W: Write>(
    storage: &Storage,
    identity: &Identity,
    writer: W,
) -> LedgerResult<()> {
    let tag_names: HashMap<_, _> = ExpensesTagService::new(storage)
        .list(identity)?
        .into_iter()
        .map(|t| (t.id, t.name))
        .collect();
    let month_tags: HashMap<_, _> = MonthBudgetService::new(storage)
        .list(identity)?
        .into_iter()
        .map(|b| (b.id, b.expenses_tag))
        .collect();

    let mut rows = Vec::new();

    for expense in ExpenseService::new(storage).list(identity)? {
        let (classification, tag_id) = match expense.classification {
            Classification::ExpensesTag(id) => ("expenses_tag", Some(id)),
            Classification::MonthBudget(id) => ("month_budget", month_tags.get(&id).copied()),
        };
        let tag = tag_id
            .and_then(|id| tag_names.get(&id).cloned())
            .unwrap_or_default();

        rows.push(MovementRow {
            kind: "expense",
            id: expense.id.full(),
            date: expense.date.to_string(),
            description: expense.description,
            amount: expense.amount.to_decimal_string(),
            classification: classification.to_string(),
            tag,
            periodicity: String::new(),
        });
    }

    for income in IncomeService::new(storage).list(identity)? {
        rows.push(MovementRow {
            kind: "income",
            id: income.id.full(),
            date: income.date.to_string(),
            description: income.description,
            amount: income.amount.to_decimal_string(),
            classification: String::new(),
            tag: String::new(),
            periodicity: income.periodicity.to_string(),
        });
    }

    // Dates are ISO formatted, so string order is date order
    rows.sort_by(|a, b| a.date.cmp(&b.date));

    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in &rows {
        csv_writer
            .serialize(row)
            .map_err(|e| LedgerError::Export(e.to_string()))?;
    }
    if rows.is_empty() {
        csv_writer
            .write_record([
                "kind",
                "id",
                "date",
                "description",
                "amount",
                "classification",
                "tag",
                "periodicity",
            ])
            .map_err(|e| LedgerError::Export(e.to_string()))?;
    }
    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}
