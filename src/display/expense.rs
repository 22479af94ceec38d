//! Expense and income display formatting

use super::project::over_goal_marker;
use crate::models::{Income, Money};
use crate::services::ExpenseSummary;

/// Goal-versus-spent table with a total row
pub fn format_expense_summary(rows: &[ExpenseSummary]) -> String {
    if rows.is_empty() {
        return "No expenses found.".to_string();
    }

    let category_width = rows
        .iter()
        .map(|r| r.category.len())
        .max()
        .unwrap_or(8)
        .max(8);
    let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(7).max(7);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<category_width$}  {:<name_width$}  {:>12}  {:>12}  {:>12}  {:>5}\n",
        "Category", "Expense", "Goal", "Spent", "Remaining", "Items",
    ));
    output.push_str(&format!(
        "{:-<category_width$}  {:-<name_width$}  {:->12}  {:->12}  {:->12}  {:->5}\n",
        "", "", "", "", "", "",
    ));

    for row in rows {
        output.push_str(&format!(
            "{:<category_width$}  {:<name_width$}  {:>12}  {:>12}  {:>12}  {:>5}{}\n",
            row.category,
            row.name,
            row.goal.to_string(),
            row.amount.to_string(),
            row.remaining().to_string(),
            row.item_count,
            over_goal_marker(row.amount, row.goal),
        ));
    }

    let total_goal: Money = rows.iter().map(|r| r.goal).sum();
    let total_spent: Money = rows.iter().map(|r| r.amount).sum();
    output.push_str(&format!(
        "{:<category_width$}  {:<name_width$}  {:>12}  {:>12}  {:>12}\n",
        "Total",
        "",
        total_goal.to_string(),
        total_spent.to_string(),
        (total_goal - total_spent).to_string(),
    ));

    output
}

pub fn format_income_list(incomes: &[Income], date_format: &str) -> String {
    if incomes.is_empty() {
        return "No incomes found.".to_string();
    }

    let name_width = incomes
        .iter()
        .map(|i| i.name().len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10}  {:<name_width$}  {:>12}  {}\n",
        "Date", "Name", "Amount", "Description",
    ));
    output.push_str(&format!(
        "{:-<10}  {:-<name_width$}  {:->12}  {:-<11}\n",
        "", "", "", "",
    ));

    for income in incomes {
        output.push_str(&format!(
            "{:<10}  {:<name_width$}  {:>12}  {}\n",
            income.date().format(date_format).to_string(),
            income.name(),
            income.amount().to_string(),
            income.description(),
        ));
    }

    let total: Money = incomes.iter().map(Income::amount).sum();
    output.push_str(&format!(
        "{:<10}  {:<name_width$}  {:>12}\n",
        "Total",
        "",
        total.to_string()
    ));

    output
}
