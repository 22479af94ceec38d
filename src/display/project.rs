//! Project display formatting
//!
//! Formats projects for terminal output in table and tree views.

use crate::models::{Money, Project};

/// Format a list of projects with income, spending and balance
pub fn format_project_list(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects found.\n\nRun 'easyfinance project create <name>' to start one."
            .to_string();
    }

    let name_width = projects
        .iter()
        .map(|p| p.name().len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<8}  {:>12}  {:>12}  {:>12}\n",
        "Name", "Type", "Income", "Spent", "Balance",
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<8}  {:->12}  {:->12}  {:->12}\n",
        "", "", "", "", "",
    ));

    for project in projects {
        output.push_str(&format!(
            "{:<name_width$}  {:<8}  {:>12}  {:>12}  {:>12}\n",
            project.name(),
            project.project_type().to_string(),
            project.total_income().to_string(),
            project.total_spent().to_string(),
            project.balance().to_string(),
        ));
    }

    output
}

/// Format a project as a tree of categories and expenses
pub fn format_project_details(project: &Project) -> String {
    let mut output = String::new();

    output.push_str(&format!("Project: {}\n", project.name()));
    output.push_str(&format!("  ID:       {}\n", project.id()));
    output.push_str(&format!("  Type:     {}\n", project.project_type()));
    output.push_str(&format!("  Income:   {}\n", project.total_income()));
    output.push_str(&format!("  Spent:    {}\n", project.total_spent()));
    output.push_str(&format!("  Balance:  {}\n", project.balance()));

    if project.categories().is_empty() {
        output.push_str("\n  (no categories)\n");
        return output;
    }

    output.push('\n');
    for category in project.categories() {
        output.push_str(&format!(
            "  {} ({} of {})\n",
            category.name(),
            category.total_spent(),
            category.total_goal()
        ));

        let count = category.expenses().len();
        for (i, expense) in category.expenses().iter().enumerate() {
            let prefix = if i == count - 1 { "└── " } else { "├── " };
            output.push_str(&format!(
                "    {}{}: {} / {}{}\n",
                prefix,
                expense.name(),
                expense.amount(),
                expense.goal(),
                over_goal_marker(expense.amount(), expense.goal()),
            ));
        }
    }

    output
}

pub(crate) fn over_goal_marker(amount: Money, goal: Money) -> &'static str {
    if amount > goal {
        "  (over goal)"
    } else {
        ""
    }
}
