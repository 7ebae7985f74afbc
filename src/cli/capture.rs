//! AI capture CLI commands
//!
//! The CLI's version of the app's capture sheet: free text, a receipt
//! photo, or a voice recording goes through the parsing gateway, the
//! returned category label is matched against the loaded categories, and
//! the result is saved with the originating input method.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use clap::Subcommand;

use crate::ai::{AiGateway, ParseInput};
use crate::error::{OutlayError, OutlayResult};
use crate::models::NewExpense;
use crate::state::ExpenseState;
use crate::store::DataStore;

/// Capture subcommands
#[derive(Subcommand)]
pub enum ParseCommands {
    /// Parse an expense from free text ("coffee 4.50 yesterday")
    Chat {
        /// The text to parse
        text: String,
        /// Show the parse without saving it
        #[arg(long)]
        dry_run: bool,
    },

    /// Parse an expense from a receipt photo
    Photo {
        /// Path to the image file
        file: PathBuf,
        /// Show the parse without saving it
        #[arg(long)]
        dry_run: bool,
    },

    /// Parse an expense from a voice recording
    Voice {
        /// Path to the audio file (m4a/mp4)
        file: PathBuf,
        /// Show the parse without saving it
        #[arg(long)]
        dry_run: bool,
    },
}

/// Handle a capture command
pub async fn handle_parse_command<S: DataStore>(
    state: &mut ExpenseState<S>,
    gateway: &AiGateway,
    cmd: ParseCommands,
) -> OutlayResult<()> {
    let (input, dry_run) = match cmd {
        ParseCommands::Chat { text, dry_run } => (ParseInput::chat(text), dry_run),
        ParseCommands::Photo { file, dry_run } => (ParseInput::photo(read_base64(&file)?), dry_run),
        ParseCommands::Voice { file, dry_run } => (ParseInput::voice(read_base64(&file)?), dry_run),
    };
    let method = input.method;

    let parsed = gateway.parse_expense(&input).await?;

    let matched = state.match_ai_category(&parsed.category);
    let category_id = matched.map(|c| c.id);
    let category_label = matched
        .map(|c| c.name.clone())
        .unwrap_or_else(|| format!("(no match for \"{}\")", parsed.category));

    println!("Parsed expense:");
    println!("  Amount:      {}", parsed.amount);
    println!("  Description: {}", parsed.description);
    println!("  Category:    {}", category_label);
    println!("  Date:        {}", parsed.date.format("%Y-%m-%d"));

    if dry_run {
        println!("Dry run; nothing saved.");
        return Ok(());
    }

    let expense = state
        .add_expense(NewExpense {
            amount: parsed.amount,
            category_id,
            description: Some(parsed.description),
            date: parsed.date,
            input_method: method,
            photo_url: None,
        })
        .await?;

    println!("Saved. ID: {}", expense.id.as_uuid());
    Ok(())
}

/// Read a file and base64-encode its contents
fn read_base64(path: &Path) -> OutlayResult<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| OutlayError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Session;
    use crate::store::MemoryStore;
    use std::io::Write as _;

    #[test]
    fn test_read_base64() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello").unwrap();
        assert_eq!(read_base64(file.path()).unwrap(), "aGVsbG8=");
    }

    #[tokio::test]
    async fn test_missing_file_fails_before_the_gateway() {
        let mut state = ExpenseState::with_session(MemoryStore::new(), Session::local());
        state.load().await.unwrap();

        // An unconfigured gateway would fail with an auth error; a missing
        // file must surface as I/O before the gateway is ever consulted.
        let gateway = AiGateway::new("https://ai.example.com", "", "test-model");
        let err = handle_parse_command(
            &mut state,
            &gateway,
            ParseCommands::Photo {
                file: PathBuf::from("/definitely/not/here.jpg"),
                dry_run: false,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, OutlayError::Io(_)));
        assert!(state.expenses().is_empty());
    }
}
