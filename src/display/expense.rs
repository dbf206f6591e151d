//! Expense display formatting

use crate::models::{Expense, Money};

use super::report::truncate;

/// Format expenses as an aligned list with a total row
pub fn format_expense_list(expenses: &[Expense], symbol: &str, date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let category_width = expenses
        .iter()
        .map(|e| e.category.chars().count())
        .max()
        .unwrap_or(8)
        .clamp(8, 20);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<category_width$}  {:>14}  {}\n",
        "ID",
        "Date",
        "Category",
        "Amount",
        "Description",
        category_width = category_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<category_width$}  {:->14}  {:-<11}\n",
        "",
        "",
        "",
        "",
        "",
        category_width = category_width,
    ));

    for expense in expenses {
        output.push_str(&format!(
            "{:<12}  {:<10}  {:<category_width$}  {:>14}  {}\n",
            expense.id.to_string(),
            expense.date.format(date_format).to_string(),
            truncate(&expense.category, category_width),
            expense.amount.format_with_symbol(symbol),
            truncate(&expense.description, 40),
            category_width = category_width,
        ));
    }

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<category_width$}  {:>14}\n",
        "",
        "",
        "Total",
        total.format_with_symbol(symbol),
        category_width = category_width,
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectId;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_expense_list(&[], "$", "%Y-%m-%d"), "No expenses found.");
    }

    #[test]
    fn test_expense_list_with_total() {
        let project_id = ProjectId::new();
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let expenses = vec![
            Expense::new(project_id, Money::from_units(1200), "Materials", "Tiles", date),
            Expense::new(project_id, Money::from_cents(-5050), "Materials", "Refund", date),
        ];

        let text = format_expense_list(&expenses, "$", "%Y-%m-%d");
        assert!(text.contains("2025-04-01"));
        assert!(text.contains("$1,200.00"));
        assert!(text.contains("-$50.50"));
        assert!(text.contains("Tiles"));
        assert!(text.lines().last().unwrap().contains("$1,149.50"));
    }

    #[test]
    fn test_expense_list_uses_date_format() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let expenses = vec![Expense::new(ProjectId::new(), Money::from_units(10), "Labor", "", date)];

        let text = format_expense_list(&expenses, "$", "%d/%m/%Y");
        assert!(text.contains("01/04/2025"));
        assert!(!text.contains("2025-04-01"));
    }
}
