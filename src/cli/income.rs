//! Income CLI commands

use clap::Subcommand;

use crate::display::{format_income_details, format_income_list};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Identity, IncomeId, IncomePatch};
use crate::services::IncomeService;
use crate::storage::Storage;

use super::args::{parse_date, parse_date_or_today, parse_id, parse_money, parse_periodicity};

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// List incomes
    List,
    /// Record an income
    Create {
        amount: String,
        /// Date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
        /// How often it recurs (monthly, annual, none)
        #[arg(short, long, default_value = "none")]
        periodicity: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Show an income
    Show { id: String },
    /// Edit an income
    Update {
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(short, long)]
        periodicity: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete an income
    Delete { id: String },
}

pub fn handle_income_command(
    storage: &Storage,
    identity: &Identity,
    cmd: IncomeCommands,
) -> LedgerResult<()> {
    let service = IncomeService::new(storage);

    match cmd {
        IncomeCommands::List => {
            println!("{}", format_income_list(&service.list(identity)?));
        }

        IncomeCommands::Create {
            amount,
            date,
            periodicity,
            description,
        } => {
            let income = service.create(
                identity,
                parse_money(&amount)?,
                parse_date_or_today(date.as_deref())?,
                parse_periodicity(&periodicity)?,
                &description,
            )?;
            println!("Created income: {} ({})", income.amount, income.periodicity);
            println!("  ID: {}", income.id.full());
        }

        IncomeCommands::Show { id } => {
            print!("{}", format_income_details(&service.get(identity, income_id(&id)?)?));
        }

        IncomeCommands::Update {
            id,
            amount,
            date,
            periodicity,
            description,
        } => {
            let id = income_id(&id)?;
            let patch = IncomePatch {
                description,
                amount: amount.as_deref().map(parse_money).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                periodicity: periodicity.as_deref().map(parse_periodicity).transpose()?,
            };

            if patch.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(identity, id, patch)?;
            println!("Updated income: {}", updated.id);
        }

        IncomeCommands::Delete { id } => {
            let deleted = service.delete(identity, income_id(&id)?)?;
            println!("Deleted income: {} ({})", deleted.id, deleted.amount);
        }
    }

    Ok(())
}

fn income_id(input: &str) -> LedgerResult<IncomeId> {
    parse_id(input, |s| LedgerError::income_not_found(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Periodicity;
    use crate::services::testing::{create_test_storage, register};

    #[test]
    fn test_create_and_update_periodicity() {
        let (_temp_dir, storage) = create_test_storage();
        let identity = register(&storage, "a@example.com");

        handle_income_command(
            &storage,
            &identity,
            IncomeCommands::Create {
                amount: "15000".into(),
                date: Some("2020-01-31".into()),
                periodicity: "m".into(),
                description: "salario".into(),
            },
        )
        .unwrap();

        let income = &IncomeService::new(&storage).list(&identity).unwrap()[0];
        assert_eq!(income.periodicity, Periodicity::Monthly);

        handle_income_command(
            &storage,
            &identity,
            IncomeCommands::Update {
                id: income.id.full(),
                amount: None,
                date: None,
                periodicity: Some("annual".into()),
                description: None,
            },
        )
        .unwrap();

        let income = IncomeService::new(&storage).get(&identity, income.id).unwrap();
        assert_eq!(income.periodicity, Periodicity::Annual);
    }

    #[test]
    fn test_invalid_periodicity() {
        let (_temp_dir, storage) = create_test_storage();
        let identity = register(&storage, "a@example.com");

        let err = handle_income_command(
            &storage,
            &identity,
            IncomeCommands::Create {
                amount: "10".into(),
                date: None,
                periodicity: "weekly".into(),
                description: String::new(),
            },
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("periodicity"));
    }

    #[test]
    fn test_unparseable_id_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let identity = register(&storage, "a@example.com");

        let err = handle_income_command(&storage, &identity, IncomeCommands::Delete { id: "inc-x".into() })
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
