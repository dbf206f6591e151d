//! Portfolio metrics
//!
//! Aggregates every project (open and closed) into capital, profit, ROI and
//! time-to-close figures, broken down by property type and by sale month.
//!
//! Aggregation is split in two steps. `PortfolioReport::aggregate` is a pure
//! fold over projects paired with their expenses. `PortfolioReport::compute`
//! performs one expense lookup per project through an [`ExpenseSource`] and
//! applies a [`FetchPolicy`] to lookups that fail.

use std::collections::BTreeMap;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, Money, Project, ProjectId, PropertyType, SaleMonth};
use crate::storage::Storage;

use super::project_metrics::percent;

/// Anything that can list the expenses recorded against a project
pub trait ExpenseSource {
    fn expenses_for(&self, project_id: ProjectId) -> LedgerResult<Vec<Expense>>;
}

impl ExpenseSource for Storage {
    fn expenses_for(&self, project_id: ProjectId) -> LedgerResult<Vec<Expense>> {
        self.expenses.get_by_project(project_id)
    }
}

/// What to do when an expense lookup fails during aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchPolicy {
    /// Abort the whole report with the lookup's error
    #[default]
    Strict,
    /// Treat the project as having no expenses and record the failure
    Lenient,
}

/// An expense lookup that failed under [`FetchPolicy::Lenient`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub project_id: ProjectId,
    pub project_name: String,
    pub message: String,
}

/// Portfolio-wide metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    /// Expenses of every project, open or closed
    pub total_capital_deployed: Money,
    /// Expenses of closed projects
    pub total_investment_realized: Money,
    /// Sale minus cost, summed over closed projects with a sale
    pub total_profit_realized: Money,
    pub closed_projects_count: usize,
    /// Expenses of projects still open
    pub capital_employed_active_projects: Money,
    /// Realized profit as a percentage of realized investment
    pub portfolio_profit_margin: f64,
    /// Days from creation to sale, summed over closed sold projects with both dates
    pub total_project_duration_days: i64,
    /// Total duration divided by the number of closed projects
    pub average_time_to_close_project: f64,
    /// Mean of profit/cost over closed sold projects with positive cost, as a percentage
    pub average_roi: f64,
    /// Realized profit per closed project, in currency units
    pub average_profit_per_project: f64,
    pub profit_margin_by_type: BTreeMap<PropertyType, f64>,
    pub average_time_to_close_by_type: BTreeMap<PropertyType, f64>,
    pub project_distribution_by_type: BTreeMap<PropertyType, usize>,
    /// Realized profit grouped by month of sale, in chronological order
    pub monthly_profit: BTreeMap<SaleMonth, Money>,
    /// Lookups skipped under the lenient policy
    pub fetch_failures: Vec<FetchFailure>,
}

#[derive(Default)]
struct TypeProfit {
    total_profit: Money,
    total_sale_amount: Money,
}

#[derive(Default)]
struct TypeDuration {
    total_days: i64,
    count: usize,
}

impl PortfolioReport {
    /// Load every project from storage and aggregate it
    pub fn generate(storage: &Storage, policy: FetchPolicy) -> LedgerResult<Self> {
        let projects = storage.projects.get_all()?;
        Self::compute(&projects, storage, policy)
    }

    /// Fetch each project's expenses from `source`, then aggregate
    ///
    /// Lookups run one project at a time. Under [`FetchPolicy::Strict`] the
    /// first failure is returned; under [`FetchPolicy::Lenient`] the project
    /// is counted with no expenses and listed in `fetch_failures`.
    pub fn compute<S>(projects: &[Project], source: &S, policy: FetchPolicy) -> LedgerResult<Self>
    where
        S: ExpenseSource + ?Sized,
    {
        let mut fetched = Vec::with_capacity(projects.len());
        let mut failures = Vec::new();

        for project in projects {
            match source.expenses_for(project.id) {
                Ok(expenses) => fetched.push((project, expenses)),
                Err(e) if policy == FetchPolicy::Lenient => {
                    failures.push(FetchFailure {
                        project_id: project.id,
                        project_name: project.name.clone(),
                        message: e.to_string(),
                    });
                    fetched.push((project, Vec::new()));
                }
                Err(e) => return Err(e),
            }
        }

        let mut report = Self::aggregate(fetched.iter().map(|(p, e)| (*p, e.as_slice())));
        report.fetch_failures = failures;
        Ok(report)
    }

    /// Aggregate projects paired with their own expenses
    pub fn aggregate<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a Project, &'a [Expense])>,
    {
        let mut total_capital_deployed = Money::zero();
        let mut total_investment_realized = Money::zero();
        let mut total_profit_realized = Money::zero();
        let mut closed_projects_count = 0usize;
        let mut capital_employed_active_projects = Money::zero();
        let mut total_project_duration_days = 0i64;
        let mut roi_sum = 0.0f64;
        let mut roi_count = 0usize;

        let mut project_distribution_by_type: BTreeMap<PropertyType, usize> = BTreeMap::new();
        let mut monthly_profit: BTreeMap<SaleMonth, Money> = BTreeMap::new();
        let mut profit_by_type: BTreeMap<PropertyType, TypeProfit> = BTreeMap::new();
        let mut duration_by_type: BTreeMap<PropertyType, TypeDuration> = BTreeMap::new();

        for (project, expenses) in entries {
            let project_cost: Money = expenses.iter().map(|e| e.amount).sum();

            total_capital_deployed += project_cost;
            *project_distribution_by_type
                .entry(project.project_type.clone())
                .or_default() += 1;

            if !project.is_closed {
                capital_employed_active_projects += project_cost;
                continue;
            }

            closed_projects_count += 1;
            total_investment_realized += project_cost;

            let sale_amount = match project.sale_amount {
                Some(amount) if project.has_sale() => amount,
                _ => continue,
            };

            let profit = sale_amount - project_cost;
            total_profit_realized += profit;

            if let Some(days) = days_to_close(project) {
                total_project_duration_days += days;
                let bucket = duration_by_type
                    .entry(project.project_type.clone())
                    .or_default();
                bucket.total_days += days;
                bucket.count += 1;
            }

            if project_cost.is_positive() {
                roi_sum += profit.as_f64() / project_cost.as_f64();
                roi_count += 1;
            }

            if let Some(sale_date) = project.sale_date {
                *monthly_profit.entry(SaleMonth::of(sale_date)).or_default() += profit;
            }

            let bucket = profit_by_type
                .entry(project.project_type.clone())
                .or_default();
            bucket.total_profit += profit;
            bucket.total_sale_amount += sale_amount;
        }

        let portfolio_profit_margin = if total_investment_realized.is_positive() {
            percent(total_profit_realized, total_investment_realized)
        } else {
            0.0
        };

        let (average_time_to_close_project, average_profit_per_project) =
            if closed_projects_count > 0 {
                (
                    total_project_duration_days as f64 / closed_projects_count as f64,
                    total_profit_realized.as_f64() / closed_projects_count as f64,
                )
            } else {
                (0.0, 0.0)
            };

        let average_roi = if roi_count > 0 {
            roi_sum / roi_count as f64 * 100.0
        } else {
            0.0
        };

        let profit_margin_by_type = profit_by_type
            .into_iter()
            .map(|(kind, bucket)| {
                let margin = if bucket.total_sale_amount.is_positive() {
                    percent(bucket.total_profit, bucket.total_sale_amount)
                } else {
                    0.0
                };
                (kind, margin)
            })
            .collect();

        let average_time_to_close_by_type = duration_by_type
            .into_iter()
            .map(|(kind, bucket)| {
                let average = if bucket.count > 0 {
                    bucket.total_days as f64 / bucket.count as f64
                } else {
                    0.0
                };
                (kind, average)
            })
            .collect();

        Self {
            total_capital_deployed,
            total_investment_realized,
            total_profit_realized,
            closed_projects_count,
            capital_employed_active_projects,
            portfolio_profit_margin,
            total_project_duration_days,
            average_time_to_close_project,
            average_roi,
            average_profit_per_project,
            profit_margin_by_type,
            average_time_to_close_by_type,
            project_distribution_by_type,
            monthly_profit,
            fetch_failures: Vec::new(),
        }
    }

    /// Number of projects of every type
    pub fn total_projects(&self) -> usize {
        self.project_distribution_by_type.values().sum()
    }

    /// Write the monthly profit series as CSV
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> LedgerResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(["Month", "Profit"])
            .map_err(|e| LedgerError::Export(e.to_string()))?;

        for (month, profit) in &self.monthly_profit {
            csv_writer
                .write_record([month.to_string(), format!("{:.2}", profit.as_f64())])
                .map_err(|e| LedgerError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| LedgerError::Export(e.to_string()))?;

        Ok(())
    }
}

/// Whole days between creation and sale, when both dates are known
fn days_to_close(project: &Project) -> Option<i64> {
    let created = project.created_at?;
    let sold = project.sale_date?;
    Some((sold - created).num_days().abs())
}
