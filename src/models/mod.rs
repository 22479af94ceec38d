//! Domain entities for EasyFinance
//!
//! Projects own categories and incomes; categories own expenses; expenses own
//! items and attachments. Every entity keeps its fields private and exposes
//! validating setters built on the guards in `validation`.

pub mod attachment;
pub mod category;
pub mod expense;
pub mod ids;
pub mod income;
pub mod money;
pub mod project;
pub mod user;
pub mod validation;

pub use attachment::{Attachment, AttachmentType};
pub use category::Category;
pub use expense::{Expense, ExpenseItem};
pub use ids::{AttachmentId, CategoryId, ExpenseId, ExpenseItemId, IncomeId, ProjectId, UserId};
pub use income::Income;
pub use money::Money;
pub use project::{Project, ProjectType};
pub use user::{available_currencies, User};
pub use validation::DatePolicy;
