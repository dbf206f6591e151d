//! Per-project metrics
//!
//! Cost, profit and efficiency figures for a single flip. `compute` is a
//! pure function of a project and the expenses recorded against it; the
//! caller is responsible for passing only that project's expenses.

use std::io::Write;

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, Money, Project, ProjectId};
use crate::storage::Storage;

/// Total spent in one expense category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Money,
}

/// Financial metrics for one project
///
/// Every ratio is 0 when its denominator is zero, negative or absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectMetrics {
    pub project_id: ProjectId,
    pub project_name: String,
    /// Sum of all expense amounts
    pub total_cost: Money,
    /// Sale amount minus total cost; 0 while no sale is recorded
    pub gross_profit: Money,
    /// Gross profit as a percentage of the sale amount
    pub profit_margin: f64,
    /// Total cost per square meter, in currency units
    pub cost_per_sq_meter: f64,
    /// Gross profit as a percentage of total cost
    pub roi: f64,
    /// Gross profit per square meter, in currency units
    pub profit_per_sq_meter: f64,
    /// Spend per category, in the order each category first appears
    pub expenses_by_category: Vec<CategoryTotal>,
}

impl ProjectMetrics {
    /// Compute metrics for `project` from its expenses
    pub fn compute(project: &Project, expenses: &[Expense]) -> Self {
        let total_cost: Money = expenses.iter().map(|e| e.amount).sum();

        // A sale recorded at exactly zero counts as no sale
        let sale = project.sale_amount.filter(|_| project.has_sale());

        let gross_profit = match sale {
            Some(amount) => amount - total_cost,
            None => Money::zero(),
        };

        let profit_margin = match sale {
            Some(amount) if amount.is_positive() => percent(gross_profit, amount),
            _ => 0.0,
        };

        let roi = if total_cost.is_positive() {
            percent(gross_profit, total_cost)
        } else {
            0.0
        };

        let (cost_per_sq_meter, profit_per_sq_meter) = if project.square_meters > 0.0 {
            (
                total_cost.as_f64() / project.square_meters,
                gross_profit.as_f64() / project.square_meters,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            project_id: project.id,
            project_name: project.name.clone(),
            total_cost,
            gross_profit,
            profit_margin,
            cost_per_sq_meter,
            roi,
            profit_per_sq_meter,
            expenses_by_category: group_by_category(expenses),
        }
    }

    /// Load a project and its expenses from storage and compute its metrics
    pub fn generate(storage: &Storage, project_id: ProjectId) -> LedgerResult<Self> {
        let project = storage
            .projects
            .get(project_id)?
            .ok_or_else(|| LedgerError::project_not_found(project_id.to_string()))?;
        let expenses = storage.expenses.get_by_project(project_id)?;

        Ok(Self::compute(&project, &expenses))
    }

    /// Amount spent in `category` (case-insensitive), if any expense carries that name
    pub fn category_total(&self, category: &str) -> Option<Money> {
        let wanted = category.to_lowercase();
        self.expenses_by_category
            .iter()
            .find(|c| c.category.to_lowercase() == wanted)
            .map(|c| c.amount)
    }

    /// Write the category breakdown as CSV
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> LedgerResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(["Project", "Category", "Amount"])
            .map_err(|e| LedgerError::Export(e.to_string()))?;

        for row in &self.expenses_by_category {
            csv_writer
                .write_record([
                    self.project_name.as_str(),
                    row.category.as_str(),
                    &format!("{:.2}", row.amount.as_f64()),
                ])
                .map_err(|e| LedgerError::Export(e.to_string()))?;
        }

        csv_writer
            .write_record([
                self.project_name.as_str(),
                "TOTAL",
                &format!("{:.2}", self.total_cost.as_f64()),
            ])
            .map_err(|e| LedgerError::Export(e.to_string()))?;

        csv_writer
            .flush()
            .map_err(|e| LedgerError::Export(e.to_string()))?;

        Ok(())
    }
}

/// `part / whole * 100`; callers guarantee `whole` is non-zero
pub(crate) fn percent(part: Money, whole: Money) -> f64 {
    part.as_f64() / whole.as_f64() * 100.0
}

fn group_by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(total) => total.amount += expense.amount,
            None => totals.push(CategoryTotal {
                category: expense.category.clone(),
                amount: expense.amount,
            }),
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::PropertyType;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn house(square_meters: f64) -> Project {
        Project::new(
            "Casa Norte",
            PropertyType::House,
            "Bogotá",
            square_meters,
            date(2025, 1, 10),
        )
    }

    fn expense(project: &Project, units: i64, category: &str) -> Expense {
        Expense::new(
            project.id,
            Money::from_units(units),
            category,
            "",
            date(2025, 2, 1),
        )
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_no_expenses_no_sale_is_all_zero() {
        let project = house(100.0);
        let metrics = ProjectMetrics::compute(&project, &[]);

        assert_eq!(metrics.total_cost, Money::zero());
        assert_eq!(metrics.gross_profit, Money::zero());
        assert_eq!(metrics.profit_margin, 0.0);
        assert_eq!(metrics.cost_per_sq_meter, 0.0);
        assert_eq!(metrics.roi, 0.0);
        assert_eq!(metrics.profit_per_sq_meter, 0.0);
        assert!(metrics.expenses_by_category.is_empty());
    }

    #[test]
    fn test_sold_project_metrics() {
        let mut project = house(50.0);
        project.record_sale(Money::from_units(2000), date(2025, 6, 1));
        let expenses = vec![
            expense(&project, 1000, "materials"),
            expense(&project, 500, "labor"),
        ];

        let metrics = ProjectMetrics::compute(&project, &expenses);

        assert_eq!(metrics.total_cost, Money::from_units(1500));
        assert_eq!(metrics.gross_profit, Money::from_units(500));
        assert_close(metrics.profit_margin, 25.0);
        assert_close(metrics.cost_per_sq_meter, 30.0);
        assert_close(metrics.roi, 100.0 / 3.0);
        assert_close(metrics.profit_per_sq_meter, 10.0);
        assert_eq!(metrics.category_total("materials"), Some(Money::from_units(1000)));
        assert_eq!(metrics.category_total("labor"), Some(Money::from_units(500)));
        assert_eq!(metrics.category_total("LABOR"), Some(Money::from_units(500)));
        assert_eq!(metrics.category_total("services"), None);
    }

    #[test]
    fn test_zero_area_guards_per_meter_figures() {
        let mut project = house(0.0);
        project.record_sale(Money::from_units(900), date(2025, 6, 1));
        let expenses = vec![expense(&project, 300, "labor")];

        let metrics = ProjectMetrics::compute(&project, &expenses);

        assert_eq!(metrics.cost_per_sq_meter, 0.0);
        assert_eq!(metrics.profit_per_sq_meter, 0.0);
        assert_eq!(metrics.gross_profit, Money::from_units(600));
    }

    #[test]
    fn test_no_sale_means_no_profit() {
        let project = house(80.0);
        let expenses = vec![expense(&project, 4000, "materials")];

        let metrics = ProjectMetrics::compute(&project, &expenses);

        assert_eq!(metrics.gross_profit, Money::zero());
        assert_eq!(metrics.profit_margin, 0.0);
        assert_eq!(metrics.roi, 0.0);
        assert_close(metrics.cost_per_sq_meter, 50.0);
    }

    #[test]
    fn test_sale_of_zero_counts_as_no_sale() {
        let mut project = house(80.0);
        project.record_sale(Money::zero(), date(2025, 6, 1));
        let expenses = vec![expense(&project, 4000, "materials")];

        let metrics = ProjectMetrics::compute(&project, &expenses);

        // Not -4000: a zero sale is indistinguishable from no sale
        assert_eq!(metrics.gross_profit, Money::zero());
        assert_eq!(metrics.profit_margin, 0.0);
    }

    #[test]
    fn test_loss_gives_negative_ratios() {
        let mut project = house(10.0);
        project.record_sale(Money::from_units(800), date(2025, 6, 1));
        let expenses = vec![expense(&project, 1000, "labor")];

        let metrics = ProjectMetrics::compute(&project, &expenses);

        assert_eq!(metrics.gross_profit, Money::from_units(-200));
        assert_close(metrics.profit_margin, -25.0);
        assert_close(metrics.roi, -20.0);
        assert_close(metrics.profit_per_sq_meter, -20.0);
    }

    #[test]
    fn test_total_cost_is_order_independent() {
        let project = house(100.0);
        let mut expenses = vec![
            Expense::new(project.id, Money::from_cents(10), "a", "", date(2025, 1, 1)),
            Expense::new(project.id, Money::from_cents(20), "b", "", date(2025, 1, 2)),
            Expense::new(project.id, Money::from_cents(70), "a", "", date(2025, 1, 3)),
            Expense::new(project.id, Money::from_cents(-5), "c", "", date(2025, 1, 4)),
        ];

        let forward = ProjectMetrics::compute(&project, &expenses);
        expenses.reverse();
        let backward = ProjectMetrics::compute(&project, &expenses);

        assert_eq!(forward.total_cost, Money::from_cents(95));
        assert_eq!(forward.total_cost, backward.total_cost);
        assert_eq!(forward.category_total("a"), backward.category_total("a"));
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        let project = house(100.0);
        let expenses = vec![
            expense(&project, 10, "services"),
            expense(&project, 20, "labor"),
            expense(&project, 30, "services"),
            expense(&project, 40, "materials"),
        ];

        let metrics = ProjectMetrics::compute(&project, &expenses);
        let order: Vec<_> = metrics
            .expenses_by_category
            .iter()
            .map(|c| c.category.as_str())
            .collect();

        assert_eq!(order, vec!["services", "labor", "materials"]);
        assert_eq!(metrics.category_total("services"), Some(Money::from_units(40)));
    }

    #[test]
    fn test_generate_from_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let project = house(20.0);
        let other = house(20.0);
        storage.expenses.upsert(expense(&project, 100, "labor")).unwrap();
        storage.expenses.upsert(expense(&other, 999, "labor")).unwrap();
        storage.projects.upsert(project.clone()).unwrap();

        let metrics = ProjectMetrics::generate(&storage, project.id).unwrap();
        assert_eq!(metrics.total_cost, Money::from_units(100));

        let missing = ProjectMetrics::generate(&storage, ProjectId::new());
        assert!(missing.unwrap_err().is_not_found());
    }

    #[test]
    fn test_export_csv() {
        let project = house(20.0);
        let expenses = vec![
            expense(&project, 100, "labor"),
            expense(&project, 50, "materials"),
        ];
        let metrics = ProjectMetrics::compute(&project, &expenses);

        let mut buffer = Vec::new();
        metrics.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        assert!(csv.starts_with("Project,Category,Amount\n"));
        assert!(csv.contains("Casa Norte,labor,100.00"));
        assert!(csv.contains("Casa Norte,TOTAL,150.00"));
    }
}
