//! Expense and income formatting

use std::collections::HashMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Classification, Expense, ExpensesTagId, Income, MonthBudgetId};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Booked under")]
    booked_under: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(Tabled)]
struct IncomeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Periodicity")]
    periodicity: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Labels for the records an expense can be booked under
#[derive(Debug, Default)]
pub struct ClassificationLabels {
    pub tags: HashMap<ExpensesTagId, String>,
    pub month_budgets: HashMap<MonthBudgetId, String>,
}

impl ClassificationLabels {
    pub fn label(&self, classification: &Classification) -> String {
        match classification {
            Classification::ExpensesTag(id) => match self.tags.get(id) {
                Some(name) => format!("tag {}", name),
                None => format!("tag {}", id),
            },
            Classification::MonthBudget(id) => match self.month_budgets.get(id) {
                Some(label) => format!("month budget {}", label),
                None => format!("month budget {}", id),
            },
        }
    }
}

pub fn format_expense_list(expenses: &[Expense], labels: &ClassificationLabels) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.full(),
        date: e.date.to_string(),
        amount: e.amount.to_string(),
        booked_under: labels.label(&e.classification),
        description: e.description.clone(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

pub fn format_expense_details(expense: &Expense, labels: &ClassificationLabels) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.id));
    output.push_str(&format!("  ID:           {}\n", expense.id.full()));
    output.push_str(&format!("  Date:         {}\n", expense.date));
    output.push_str(&format!("  Amount:       {}\n", expense.amount));
    output.push_str(&format!(
        "  Booked under: {}\n",
        labels.label(&expense.classification)
    ));
    if !expense.description.is_empty() {
        output.push_str(&format!("  Description:  {}\n", expense.description));
    }

    output
}

pub fn format_income_list(incomes: &[Income]) -> String {
    if incomes.is_empty() {
        return "No incomes found.".to_string();
    }

    let rows = incomes.iter().map(|i| IncomeRow {
        id: i.id.full(),
        date: i.date.to_string(),
        amount: i.amount.to_string(),
        periodicity: i.periodicity.to_string(),
        description: i.description.clone(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

pub fn format_income_details(income: &Income) -> String {
    let mut output = String::new();

    output.push_str(&format!("Income: {}\n", income.id));
    output.push_str(&format!("  ID:          {}\n", income.id.full()));
    output.push_str(&format!("  Date:        {}\n", income.date));
    output.push_str(&format!("  Amount:      {}\n", income.amount));
    output.push_str(&format!("  Periodicity: {}\n", income.periodicity));
    if !income.description.is_empty() {
        output.push_str(&format!("  Description: {}\n", income.description));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Periodicity, UserId};
    use chrono::NaiveDate;

    #[test]
    fn test_expense_list_uses_labels() {
        let tag = ExpensesTagId::new();
        let expense = Expense::new(
            UserId::new(),
            Money::from_units(200),
            NaiveDate::from_ymd_opt(2025, 12, 12).unwrap(),
            Classification::ExpensesTag(tag),
            "cerveza",
        );
        let labels = ClassificationLabels {
            tags: HashMap::from([(tag, "cheve".to_string())]),
            ..Default::default()
        };

        let output = format_expense_list(&[expense], &labels);
        assert!(output.contains("tag cheve"));
        assert!(output.contains("$200.00"));
        assert!(output.contains("2025-12-12"));
    }

    #[test]
    fn test_unknown_label_falls_back_to_id() {
        let month = MonthBudgetId::new();
        let label = ClassificationLabels::default().label(&Classification::MonthBudget(month));
        assert_eq!(label, format!("month budget {}", month));
    }

    #[test]
    fn test_income_details() {
        let income = Income::new(
            UserId::new(),
            Money::from_units(15000),
            NaiveDate::from_ymd_opt(2020, 1, 31).unwrap(),
            Periodicity::Monthly,
            "salario",
        );
        let output = format_income_details(&income);
        assert!(output.contains("Periodicity: monthly"));
        assert!(output.contains("salario"));
        assert_eq!(format_income_list(&[]), "No incomes found.");
    }
}
