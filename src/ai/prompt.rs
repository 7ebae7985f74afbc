//! Prompt templates and reply cleanup for the parsing gateway
//!
//! The model is instructed, in plain language, to emit a four-field JSON
//! object. Models still wrap replies in markdown code fences often enough
//! that the fences are stripped before decoding.

use chrono::NaiveDate;

use crate::models::DefaultCategory;

/// Comma-separated list of the recognized category names
fn category_names() -> String {
    DefaultCategory::all()
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Instruction for free-text and transcribed-voice input
pub(crate) fn text_prompt(today: NaiveDate) -> String {
    format!(
        "Parse the following expense information into a JSON object with these fields:\n\
         - \"amount\" (number): The total cost.\n\
         - \"description\" (string): A short summary of what was purchased.\n\
         - \"category\" (string): One of these categories: {}.\n\
         - \"date\" (string): The date of the expense in ISO-8601 format (YYYY-MM-DD). \
         If no date is provided, use today's date ({}).\n\n\
         Return ONLY the raw JSON object. Do not include markdown code blocks or additional text.",
        category_names(),
        today.format("%Y-%m-%d"),
    )
}

/// Instruction for receipt photos
pub(crate) fn receipt_prompt(today: NaiveDate) -> String {
    format!(
        "Extract expense information from this receipt. Return a JSON object with: \
         amount (number), description (string), category (one of: {}), \
         date (ISO-8601 format YYYY-MM-DD, use today's date {} if not visible). \
         Return ONLY the raw JSON object. Do not include markdown code blocks or additional text.",
        category_names(),
        today.format("%Y-%m-%d"),
    )
}

/// Remove markdown code fences from a model reply before JSON decoding
pub fn strip_code_fences(reply: &str) -> String {
    reply.replace("```json", "").replace("```", "").trim().to_string()
}
