//! Expense CLI commands

use clap::Subcommand;

use crate::display::{format_expense_details, format_expense_list, ClassificationLabels};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{ExpenseId, ExpensePatch, Identity};
use crate::services::{ExpenseService, ExpensesTagService, MonthBudgetService, NewExpense};
use crate::storage::Storage;

use super::args::{parse_date, parse_date_or_today, parse_id, parse_money};
use super::budget::{month_budget_id, tag_labels, year_labels};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List expenses
    List,
    /// Record an expense under a tag or a month budget
    Create {
        amount: String,
        /// Date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
        /// Expenses tag (name or ID)
        #[arg(short, long)]
        tag: Option<String>,
        /// Month budget ID
        #[arg(short, long)]
        month_budget: Option<String>,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Show an expense
    Show { id: String },
    /// Edit an expense
    Update {
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// File under this tag (name or ID)
        #[arg(short, long, conflicts_with = "clear_tag")]
        tag: Option<String>,
        /// Book against this month budget
        #[arg(short, long, conflicts_with = "clear_month_budget")]
        month_budget: Option<String>,
        /// Remove the tag reference
        #[arg(long)]
        clear_tag: bool,
        /// Remove the month budget reference
        #[arg(long)]
        clear_month_budget: bool,
    },
    /// Delete an expense
    Delete { id: String },
}

pub fn handle_expense_command(
    storage: &Storage,
    identity: &Identity,
    cmd: ExpenseCommands,
) -> LedgerResult<()> {
    let service = ExpenseService::new(storage);
    let tags = ExpensesTagService::new(storage);

    match cmd {
        ExpenseCommands::List => {
            let expenses = service.list(identity)?;
            let labels = classification_labels(storage, identity)?;
            println!("{}", format_expense_list(&expenses, &labels));
        }

        ExpenseCommands::Create {
            amount,
            date,
            tag,
            month_budget,
            description,
        } => {
            let input = NewExpense {
                description,
                amount: parse_money(&amount)?,
                date: parse_date_or_today(date.as_deref())?,
                expenses_tag: match tag {
                    Some(tag) => Some(tags.find(identity, &tag)?.id),
                    None => None,
                },
                month_budget: month_budget.as_deref().map(month_budget_id).transpose()?,
            };

            let expense = service.create(identity, input)?;
            let labels = classification_labels(storage, identity)?;
            println!("Created expense: {} on {}", expense.amount, expense.date);
            println!("  Booked under: {}", labels.label(&expense.classification));
            println!("  ID: {}", expense.id.full());
        }

        ExpenseCommands::Show { id } => {
            let expense = service.get(identity, expense_id(&id)?)?;
            let labels = classification_labels(storage, identity)?;
            print!("{}", format_expense_details(&expense, &labels));
        }

        ExpenseCommands::Update {
            id,
            amount,
            date,
            description,
            tag,
            month_budget,
            clear_tag,
            clear_month_budget,
        } => {
            let id = expense_id(&id)?;

            let expenses_tag = match (tag, clear_tag) {
                (Some(tag), _) => Some(Some(tags.find(identity, &tag)?.id)),
                (None, true) => Some(None),
                (None, false) => None,
            };
            let month_budget = match (month_budget, clear_month_budget) {
                (Some(id), _) => Some(Some(month_budget_id(&id)?)),
                (None, true) => Some(None),
                (None, false) => None,
            };

            let patch = ExpensePatch {
                description,
                amount: amount.as_deref().map(parse_money).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                expenses_tag,
                month_budget,
            };

            if patch.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(identity, id, patch)?;
            println!("Updated expense: {}", updated.id);
        }

        ExpenseCommands::Delete { id } => {
            let deleted = service.delete(identity, expense_id(&id)?)?;
            println!("Deleted expense: {} ({})", deleted.id, deleted.amount);
        }
    }

    Ok(())
}

fn expense_id(input: &str) -> LedgerResult<ExpenseId> {
    parse_id(input, |s| LedgerError::expense_not_found(s))
}

/// Month budgets are labelled "<year>/<tag>"
fn classification_labels(storage: &Storage, identity: &Identity) -> LedgerResult<ClassificationLabels> {
    let years = year_labels(storage, identity)?;
    let tags = tag_labels(storage, identity)?;

    let month_budgets = MonthBudgetService::new(storage)
        .list(identity)?
        .into_iter()
        .map(|b| {
            let year = years
                .get(&b.annual_budget)
                .map(|y| y.to_string())
                .unwrap_or_default();
            let tag = tags.get(&b.expenses_tag).cloned().unwrap_or_default();
            (b.id, format!("{}/{}", year, tag))
        })
        .collect();

    Ok(ClassificationLabels {
        tags,
        month_budgets,
    })
}
