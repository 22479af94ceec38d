//! Display formatting for terminal output
//!
//! Plain-text tables and trees for projects, expenses, incomes and users.

pub mod account;
pub mod expense;
pub mod project;

pub use account::format_user_profile;
pub use expense::{format_expense_summary, format_income_list};
pub use project::{format_project_details, format_project_list};
