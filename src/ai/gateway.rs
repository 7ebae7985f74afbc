//! AI parsing gateway
//!
//! Turns one piece of unstructured input (chat text, a receipt photo, or a
//! voice recording) into a best-effort structured expense by calling an
//! OpenAI-compatible `chat/completions` endpoint once. There is no retry,
//! no timeout tuning, and no confidence scoring; the reply is cleaned up,
//! decoded, and defaulted field by field.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OutlayError, OutlayResult};
use crate::models::{InputMethod, Money};

use super::prompt::{receipt_prompt, strip_code_fences, text_prompt};

/// One piece of input for the gateway, tagged with how it was captured
#[derive(Debug, Clone)]
pub struct ParseInput {
    pub text: Option<String>,
    pub image_base64: Option<String>,
    pub audio_base64: Option<String>,
    pub method: InputMethod,
}

impl ParseInput {
    /// Free chat text
    pub fn chat(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            image_base64: None,
            audio_base64: None,
            method: InputMethod::Chat,
        }
    }

    /// A base64-encoded receipt photo (with or without a data-URL prefix)
    pub fn photo(image_base64: impl Into<String>) -> Self {
        Self {
            text: None,
            image_base64: Some(image_base64.into()),
            audio_base64: None,
            method: InputMethod::Photo,
        }
    }

    /// A base64-encoded voice recording
    pub fn voice(audio_base64: impl Into<String>) -> Self {
        Self {
            text: None,
            image_base64: None,
            audio_base64: Some(audio_base64.into()),
            method: InputMethod::Voice,
        }
    }
}

/// The normalized result of a parse
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExpense {
    pub amount: Money,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
}

/// Client for the expense-parsing model endpoint
#[derive(Debug, Clone)]
pub struct AiGateway {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AiGateway {
    /// Create a gateway for the endpoint at `base_url` (the segment before
    /// `/chat/completions`)
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Parse one input into a structured expense.
    ///
    /// Fails without touching the network when no credential is configured
    /// or no payload was supplied. Upstream failures carry the status code
    /// and response body; a reply that is not JSON after fence stripping is
    /// a parse error.
    pub async fn parse_expense(&self, input: &ParseInput) -> OutlayResult<ParsedExpense> {
        if self.api_key.is_empty() {
            return Err(OutlayError::Auth("AI API key is not configured".into()));
        }

        let today = Utc::now().date_naive();
        let messages = build_messages(input, today)?;

        debug!(method = %input.method, model = %self.model, "requesting expense parse");

        let request = ChatRequest {
            model: &self.model,
            messages,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OutlayError::Ai(format!("({}): {}", status.as_u16(), body)));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| OutlayError::Parse(format!("malformed completion envelope: {}", e)))?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| OutlayError::Parse("completion contained no choices".into()))?;

        decode_reply(&content, today)
    }
}

/// Assemble the chat messages for one input.
///
/// Payload priority follows the original capture flow: audio, then image,
/// then text. No payload at all is a validation error.
fn build_messages(input: &ParseInput, today: NaiveDate) -> OutlayResult<Vec<ChatMessage>> {
    if let Some(audio) = &input.audio_base64 {
        return Ok(vec![ChatMessage::parts(vec![
            ContentPart::text(text_prompt(today)),
            ContentPart::InputAudio {
                input_audio: InputAudio {
                    data: audio.clone(),
                    format: "mp4".into(),
                },
            },
        ])]);
    }

    if let Some(image) = &input.image_base64 {
        return Ok(vec![ChatMessage::parts(vec![
            ContentPart::text(receipt_prompt(today)),
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: ensure_data_url(image),
                },
            },
        ])]);
    }

    if let Some(text) = &input.text {
        return Ok(vec![ChatMessage::text(format!(
            "{}\n\n{}",
            text_prompt(today),
            text
        ))]);
    }

    Err(OutlayError::Validation("no input provided".into()))
}

/// Prefix raw base64 image bytes with a data-URL header if missing
fn ensure_data_url(image_base64: &str) -> String {
    if image_base64.starts_with("data:") {
        image_base64.to_string()
    } else {
        format!("data:image/jpeg;base64,{}", image_base64)
    }
}

/// Clean up and decode a model reply, defaulting any missing field
fn decode_reply(content: &str, today: NaiveDate) -> OutlayResult<ParsedExpense> {
    let cleaned = strip_code_fences(content);

    let raw: RawParsed = serde_json::from_str(&cleaned)
        .map_err(|e| OutlayError::Parse(format!("model returned malformed JSON: {}", e)))?;

    Ok(ParsedExpense {
        amount: Money::from_dollars_f64(raw.amount.unwrap_or(0.0)),
        description: raw
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| "Expense".to_string()),
        category: raw
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| "Other".to_string()),
        date: raw
            .date
            .as_deref()
            .and_then(parse_reply_date)
            .unwrap_or(today),
    })
}

/// Accept a plain calendar date or anything with one as its prefix
/// (models occasionally answer with a full timestamp)
fn parse_reply_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.len() >= 10 {
        NaiveDate::parse_from_str(&s[..10], "%Y-%m-%d").ok()
    } else {
        None
    }
}

// Wire types for the chat/completions endpoint

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

impl ChatMessage {
    fn text(text: String) -> Self {
        Self {
            role: "user",
            content: MessageContent::Text(text),
        }
    }

    fn parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: "user",
            content: MessageContent::Parts(parts),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
    InputAudio { input_audio: InputAudio },
}

impl ContentPart {
    fn text(text: String) -> Self {
        Self::Text { text }
    }
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct InputAudio {
    data: String,
    format: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// The model's reply before normalization; every field is optional
#[derive(Debug, Deserialize)]
struct RawParsed {
    #[serde(default)]
    amount: Option<f64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
    }

    #[test]
    fn test_no_input_is_a_validation_error() {
        let input = ParseInput {
            text: None,
            image_base64: None,
            audio_base64: None,
            method: InputMethod::Chat,
        };
        let err = build_messages(&input, today()).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("no input provided"));
    }

    #[test]
    fn test_missing_api_key_fails_before_any_request() {
        let gateway = AiGateway::new("https://ai.example.com", "", "test-model");
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let err = rt
            .block_on(gateway.parse_expense(&ParseInput::chat("coffee 4.50")))
            .unwrap_err();
        assert!(err.is_auth());
    }

    #[test]
    fn test_chat_message_embeds_text_after_prompt() {
        let messages = build_messages(&ParseInput::chat("coffee 4.50"), today()).unwrap();
        assert_eq!(messages.len(), 1);
        let json = serde_json::to_value(&messages[0]).unwrap();
        let content = json["content"].as_str().unwrap();
        assert!(content.ends_with("coffee 4.50"));
        assert!(content.contains("2026-08-05"));
    }

    #[test]
    fn test_photo_message_carries_data_url() {
        let messages = build_messages(&ParseInput::photo("aGVsbG8="), today()).unwrap();
        let json = serde_json::to_value(&messages[0]).unwrap();
        let parts = json["content"].as_array().unwrap();
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[1]["type"], "image_url");
        assert_eq!(
            parts[1]["image_url"]["url"],
            "data:image/jpeg;base64,aGVsbG8="
        );
    }

    #[test]
    fn test_existing_data_url_not_double_prefixed() {
        let url = "data:image/png;base64,aGVsbG8=";
        assert_eq!(ensure_data_url(url), url);
    }

    #[test]
    fn test_voice_message_carries_audio_part() {
        let messages = build_messages(&ParseInput::voice("YXVkaW8="), today()).unwrap();
        let json = serde_json::to_value(&messages[0]).unwrap();
        let parts = json["content"].as_array().unwrap();
        assert_eq!(parts[1]["type"], "input_audio");
        assert_eq!(parts[1]["input_audio"]["data"], "YXVkaW8=");
        assert_eq!(parts[1]["input_audio"]["format"], "mp4");
    }

    #[test]
    fn test_decode_fenced_reply() {
        let content = "```json\n{\"amount\": 4.5, \"description\": \"Coffee\", \
                       \"category\": \"Food\", \"date\": \"2026-08-04\"}\n```";
        let parsed = decode_reply(content, today()).unwrap();
        assert_eq!(parsed.amount.cents(), 450);
        assert_eq!(parsed.description, "Coffee");
        assert_eq!(parsed.category, "Food");
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2026, 8, 4).unwrap());
    }

    #[test]
    fn test_decode_defaults_missing_fields() {
        let parsed = decode_reply("{}", today()).unwrap();
        assert_eq!(parsed.amount, Money::zero());
        assert_eq!(parsed.description, "Expense");
        assert_eq!(parsed.category, "Other");
        assert_eq!(parsed.date, today());
    }

    #[test]
    fn test_decode_timestamp_date() {
        let parsed = decode_reply("{\"date\": \"2026-08-01T10:30:00Z\"}", today()).unwrap();
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
    }

    #[test]
    fn test_decode_garbage_is_a_parse_error() {
        let err = decode_reply("sure! here's your expense", today()).unwrap_err();
        assert!(matches!(err, OutlayError::Parse(_)));
    }
}
