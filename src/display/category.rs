//! Category display formatting

use crate::models::Category;

/// Format categories with the number of expenses recorded under each name
pub fn format_category_list(categories: &[(Category, usize)]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'flip init' to create the default categories."
            .to_string();
    }

    let name_width = categories
        .iter()
        .map(|(c, _)| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:>8}\n",
        "ID",
        "Name",
        "Expenses",
        name_width = name_width
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:->8}\n",
        "",
        "",
        "",
        name_width = name_width
    ));

    for (category, count) in categories {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:>8}\n",
            category.id.to_string(),
            category.name,
            count,
            name_width = name_width
        ));
    }

    output
}
