//! AI-assisted expense parsing

pub mod gateway;
pub mod prompt;

pub use gateway::{AiGateway, ParseInput, ParsedExpense};
pub use prompt::strip_code_fences;
