//! Annual budget, month budget and expenses tag CLI commands

use std::collections::HashMap;

use clap::Subcommand;

use crate::display::{
    format_annual_budget_details, format_annual_budget_list, format_month_budget_details,
    format_month_budget_list, format_tag_details, format_tag_list,
};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    AnnualBudgetId, AnnualBudgetPatch, ExpensesTagId, Identity, MonthBudgetId, MonthBudgetPatch,
};
use crate::services::{AnnualBudgetService, ExpensesTagService, MonthBudgetService};
use crate::storage::Storage;

use super::args::{parse_id, parse_money};

/// Annual budget subcommands
#[derive(Subcommand)]
pub enum AnnualCommands {
    /// List annual budgets
    List,
    /// Create the budget for a year
    Create {
        year: i32,
        /// Amount (e.g., "24000" or "24000.00")
        amount: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Show a budget and its month budgets
    Show {
        /// Year or ID
        budget: String,
    },
    /// Edit a budget
    Update {
        /// Year or ID
        budget: String,
        #[arg(short, long)]
        year: Option<i32>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a budget with no month budgets
    Delete {
        /// Year or ID
        budget: String,
    },
}

/// Expenses tag subcommands
#[derive(Subcommand)]
pub enum TagCommands {
    /// List tags
    List,
    /// Create a tag
    Create { name: String },
    /// Show a tag
    Show {
        /// Tag name or ID
        tag: String,
    },
    /// Rename a tag
    Update {
        /// Tag name or ID
        tag: String,
        /// New name
        name: String,
    },
    /// Delete a tag nothing is filed under
    Delete {
        /// Tag name or ID
        tag: String,
    },
}

/// Month budget subcommands
#[derive(Subcommand)]
pub enum MonthCommands {
    /// List month budgets
    List {
        /// Only those of one annual budget (year or ID)
        #[arg(short, long)]
        annual: Option<String>,
    },
    /// Create a month budget
    Create {
        /// Annual budget (year or ID)
        annual: String,
        /// Expenses tag (name or ID)
        tag: String,
        amount: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Show a month budget
    Show { id: String },
    /// Edit a month budget
    Update {
        id: String,
        /// Move to another annual budget (year or ID)
        #[arg(long)]
        annual: Option<String>,
        /// File under another tag (name or ID)
        #[arg(short, long)]
        tag: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a month budget no expense is booked against
    Delete { id: String },
}

pub fn handle_annual_command(
    storage: &Storage,
    identity: &Identity,
    cmd: AnnualCommands,
) -> LedgerResult<()> {
    let service = AnnualBudgetService::new(storage);

    match cmd {
        AnnualCommands::List => {
            println!("{}", format_annual_budget_list(&service.list(identity)?));
        }

        AnnualCommands::Create {
            year,
            amount,
            description,
        } => {
            let amount = parse_money(&amount)?;
            let budget = service.create(identity, year, amount, &description)?;
            println!("Created annual budget: {}", budget.year);
            println!("  Amount: {}", budget.amount);
            println!("  ID: {}", budget.id.full());
        }

        AnnualCommands::Show { budget } => {
            let budget = service.find(identity, &budget)?;
            let months = MonthBudgetService::new(storage).list_for_annual_budget(identity, budget.id)?;
            print!("{}", format_annual_budget_details(&budget, &months));
        }

        AnnualCommands::Update {
            budget,
            year,
            amount,
            description,
        } => {
            let found = service.find(identity, &budget)?;
            let patch = AnnualBudgetPatch {
                description,
                amount: amount.as_deref().map(parse_money).transpose()?,
                year,
            };

            if patch.is_empty() {
                println!("No changes specified. Use --year, --amount or --description.");
                return Ok(());
            }

            let updated = service.update(identity, found.id, patch)?;
            println!("Updated annual budget: {}", updated.year);
        }

        AnnualCommands::Delete { budget } => {
            let found = service.find(identity, &budget)?;
            let deleted = service.delete(identity, found.id)?;
            println!("Deleted annual budget: {}", deleted.year);
        }
    }

    Ok(())
}

pub fn handle_tag_command(storage: &Storage, identity: &Identity, cmd: TagCommands) -> LedgerResult<()> {
    let service = ExpensesTagService::new(storage);

    match cmd {
        TagCommands::List => {
            println!("{}", format_tag_list(&service.list(identity)?));
        }
        TagCommands::Create { name } => {
            let tag = service.create(identity, &name)?;
            println!("Created tag: {} ({})", tag.name, tag.id.full());
        }
        TagCommands::Show { tag } => {
            print!("{}", format_tag_details(&service.find(identity, &tag)?));
        }
        TagCommands::Update { tag, name } => {
            let found = service.find(identity, &tag)?;
            let renamed = service.rename(identity, found.id, &name)?;
            println!("Renamed tag '{}' to '{}'", found.name, renamed.name);
        }
        TagCommands::Delete { tag } => {
            let found = service.find(identity, &tag)?;
            let deleted = service.delete(identity, found.id)?;
            println!("Deleted tag: {}", deleted.name);
        }
    }

    Ok(())
}

pub fn handle_month_command(
    storage: &Storage,
    identity: &Identity,
    cmd: MonthCommands,
) -> LedgerResult<()> {
    let service = MonthBudgetService::new(storage);
    let annual = AnnualBudgetService::new(storage);
    let tags = ExpensesTagService::new(storage);

    match cmd {
        MonthCommands::List { annual: filter } => {
            let budgets = match filter {
                Some(filter) => {
                    let parent = annual.find(identity, &filter)?;
                    service.list_for_annual_budget(identity, parent.id)?
                }
                None => service.list(identity)?,
            };
            let output = format_month_budget_list(
                &budgets,
                &year_labels(storage, identity)?,
                &tag_labels(storage, identity)?,
            );
            println!("{}", output);
        }

        MonthCommands::Create {
            annual: parent,
            tag,
            amount,
            description,
        } => {
            let parent = annual.find(identity, &parent)?;
            let tag = tags.find(identity, &tag)?;
            let amount = parse_money(&amount)?;

            let budget = service.create(identity, parent.id, tag.id, amount, &description)?;
            println!("Created month budget: {} / {}", parent.year, tag.name);
            println!("  Amount: {}", budget.amount);
            println!("  ID: {}", budget.id.full());
        }

        MonthCommands::Show { id } => {
            let budget = service.get(identity, month_budget_id(&id)?)?;
            let parent = annual.get(identity, budget.annual_budget)?;
            let tag = tags.get(identity, budget.expenses_tag)?;
            print!("{}", format_month_budget_details(&budget, &parent, &tag));
        }

        MonthCommands::Update {
            id,
            annual: parent,
            tag,
            amount,
            description,
        } => {
            let id = month_budget_id(&id)?;
            let patch = MonthBudgetPatch {
                description,
                amount: amount.as_deref().map(parse_money).transpose()?,
                annual_budget: match parent {
                    Some(parent) => Some(annual.find(identity, &parent)?.id),
                    None => None,
                },
                expenses_tag: match tag {
                    Some(tag) => Some(tags.find(identity, &tag)?.id),
                    None => None,
                },
            };

            if patch.is_empty() {
                println!("No changes specified. Use --annual, --tag, --amount or --description.");
                return Ok(());
            }

            let updated = service.update(identity, id, patch)?;
            println!("Updated month budget: {}", updated.id);
        }

        MonthCommands::Delete { id } => {
            let deleted = service.delete(identity, month_budget_id(&id)?)?;
            println!("Deleted month budget: {}", deleted.id);
        }
    }

    Ok(())
}

pub(crate) fn month_budget_id(input: &str) -> LedgerResult<MonthBudgetId> {
    parse_id(input, |s| LedgerError::month_budget_not_found(s))
}

pub(crate) fn year_labels(
    storage: &Storage,
    identity: &Identity,
) -> LedgerResult<HashMap<AnnualBudgetId, i32>> {
    Ok(AnnualBudgetService::new(storage)
        .list(identity)?
        .into_iter()
        .map(|b| (b.id, b.year))
        .collect())
}

pub(crate) fn tag_labels(
    storage: &Storage,
    identity: &Identity,
) -> LedgerResult<HashMap<ExpensesTagId, String>> {
    Ok(ExpensesTagService::new(storage)
        .list(identity)?
        .into_iter()
        .map(|t| (t.id, t.name))
        .collect())
}
