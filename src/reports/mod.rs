//! Financial metrics for flip-ledger
//!
//! Per-project metrics (costs, profit, margins, ROI, per-square-meter
//! figures) and portfolio aggregates across all projects. Both are plain
//! value objects; turning them into text is left to `display`.

pub mod portfolio;
pub mod project_metrics;

pub use portfolio::{ExpenseSource, FetchFailure, FetchPolicy, PortfolioReport};
pub use project_metrics::{CategoryTotal, ProjectMetrics};
