//! Display formatting for terminal output
//!
//! Tables and detail views for the data models, and text renderings of
//! the metrics reports with bar charts.

pub mod category;
pub mod expense;
pub mod project;
pub mod report;

pub use category::format_category_list;
pub use expense::format_expense_list;
pub use project::{format_project_details, format_project_list};
pub use report::{
    format_portfolio_analysis, format_portfolio_report, format_project_metrics, format_sale_month,
};
