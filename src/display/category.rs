//! Category display formatting

use crate::models::Category;

/// Format a list of categories
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nCategories are seeded on first load; run any data command first.".to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:<9} {:<20} {}\n",
        "Category",
        "Color",
        "Icon",
        "ID",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<width$}  {:-<9} {:-<20} {:-<36}\n",
        "",
        "",
        "",
        "",
        width = name_width
    ));

    for category in categories {
        output.push_str(&format!(
            "{:<width$}  {:<9} {:<20} {}\n",
            category.name,
            category.color,
            category.icon,
            category.id.as_uuid(),
            width = name_width
        ));
    }

    output
}
