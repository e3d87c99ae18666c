//! Annual budget, month budget and tag formatting

use std::collections::HashMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{AnnualBudget, AnnualBudgetId, ExpensesTag, ExpensesTagId, MonthBudget};

#[derive(Tabled)]
struct AnnualBudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Tabled)]
struct MonthBudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

pub fn format_annual_budget_list(budgets: &[AnnualBudget]) -> String {
    if budgets.is_empty() {
        return "No annual budgets found.".to_string();
    }

    let rows = budgets.iter().map(|b| AnnualBudgetRow {
        id: b.id.full(),
        year: b.year,
        amount: b.amount.to_string(),
        description: b.description.clone(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

pub fn format_annual_budget_details(budget: &AnnualBudget, month_budgets: &[MonthBudget]) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", budget));
    output.push_str(&format!("  ID:          {}\n", budget.id.full()));
    output.push_str(&format!("  Amount:      {}\n", budget.amount));
    if !budget.description.is_empty() {
        output.push_str(&format!("  Description: {}\n", budget.description));
    }
    output.push_str(&format!("  Month budgets: {}\n", month_budgets.len()));
    output.push_str(&format!(
        "  Created:     {}\n",
        budget.created_at.format("%Y-%m-%d %H:%M")
    ));

    output
}

pub fn format_tag_list(tags: &[ExpensesTag]) -> String {
    if tags.is_empty() {
        return "No expenses tags found.".to_string();
    }

    let rows = tags.iter().map(|t| TagRow {
        id: t.id.full(),
        name: t.name.clone(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

pub fn format_tag_details(tag: &ExpensesTag) -> String {
    format!(
        "Tag: {}\n  ID:      {}\n  Created: {}\n",
        tag.name,
        tag.id.full(),
        tag.created_at.format("%Y-%m-%d %H:%M")
    )
}

/// Month budgets with their year and tag resolved to labels
pub fn format_month_budget_list(
    budgets: &[MonthBudget],
    years: &HashMap<AnnualBudgetId, i32>,
    tags: &HashMap<ExpensesTagId, String>,
) -> String {
    if budgets.is_empty() {
        return "No month budgets found.".to_string();
    }

    let rows = budgets.iter().map(|b| MonthBudgetRow {
        id: b.id.full(),
        year: years
            .get(&b.annual_budget)
            .map(|y| y.to_string())
            .unwrap_or_else(|| b.annual_budget.to_string()),
        tag: tags
            .get(&b.expenses_tag)
            .cloned()
            .unwrap_or_else(|| b.expenses_tag.to_string()),
        amount: b.amount.to_string(),
        description: b.description.clone(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

pub fn format_month_budget_details(
    budget: &MonthBudget,
    annual: &AnnualBudget,
    tag: &ExpensesTag,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Month budget: {}\n", budget.id));
    output.push_str(&format!("  ID:            {}\n", budget.id.full()));
    output.push_str(&format!("  Annual budget: {} ({})\n", annual.year, annual.id));
    output.push_str(&format!("  Tag:           {} ({})\n", tag.name, tag.id));
    output.push_str(&format!("  Amount:        {}\n", budget.amount));
    if !budget.description.is_empty() {
        output.push_str(&format!("  Description:   {}\n", budget.description));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, UserId};

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_annual_budget_list(&[]), "No annual budgets found.");
        assert_eq!(format_tag_list(&[]), "No expenses tags found.");
        assert_eq!(
            format_month_budget_list(&[], &HashMap::new(), &HashMap::new()),
            "No month budgets found."
        );
    }

    #[test]
    fn test_annual_budget_table() {
        let budget = AnnualBudget::new(UserId::new(), 2020, Money::from_cents(202000000), "carro");
        let output = format_annual_budget_list(&[budget]);

        assert!(output.contains("Year"));
        assert!(output.contains("2020"));
        assert!(output.contains("$2020000.00"));
        assert!(output.contains("carro"));
    }

    #[test]
    fn test_month_budget_table_resolves_labels() {
        let owner = UserId::new();
        let annual = AnnualBudget::new(owner, 2021, Money::from_units(1), "");
        let tag = ExpensesTag::new(owner, "renta");
        let budget = MonthBudget::new(owner, annual.id, tag.id, Money::from_units(500), "");

        let years = HashMap::from([(annual.id, annual.year)]);
        let tags = HashMap::from([(tag.id, tag.name.clone())]);
        let output = format_month_budget_list(&[budget.clone()], &years, &tags);
        assert!(output.contains("2021"));
        assert!(output.contains("renta"));

        let details = format_month_budget_details(&budget, &annual, &tag);
        assert!(details.contains("Annual budget: 2021"));
    }
}
