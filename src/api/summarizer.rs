use crate::api::ApiError;
use crate::data::RentalTable;
use serde_json::{json, Value};

/// The sorted table is truncated to this many rows before summarization.
pub const SUMMARY_ROW_LIMIT: usize = 100;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

const SUMMARY_PROMPT: &str = "Please provide a summary on the properties noting that a lower \
relative value is better. Things to note: how many have a negative relative value, how many \
have a positive relative value, and lowest 3 relative values.";

pub struct SummarizerConfig {
    pub api_key: String,
    pub model: String,
}

impl SummarizerConfig {
    pub fn from_env() -> Result<Self, ApiError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ApiError::Config("OPENAI_API_KEY environment variable not set".into()))?;
        Ok(Self {
            api_key,
            model: "gpt-4o-mini".to_string(),
        })
    }
}

/// Thin client for the chat-completions endpoint. No retry contract; a
/// failed summary is reported to the caller and the page simply renders
/// without one.
pub struct Summarizer {
    config: SummarizerConfig,
}

impl Summarizer {
    pub fn new(config: SummarizerConfig) -> Self {
        Self { config }
    }

    pub fn summarize(&self, table: &RentalTable) -> Result<String, ApiError> {
        self.summarize_text(&table.to_text(SUMMARY_ROW_LIMIT))
    }

    fn summarize_text(&self, table_text: &str) -> Result<String, ApiError> {
        let client = reqwest::blocking::Client::new();

        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SUMMARY_PROMPT },
                { "role": "user", "content": table_text }
            ],
            "temperature": 1,
            "max_tokens": 256,
            "top_p": 1,
            "frequency_penalty": 0,
            "presence_penalty": 0
        });

        let response = client
            .post(COMPLETIONS_URL)
            .bearer_auth(&self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Http(status.as_u16(), text));
        }

        let parsed: Value =
            serde_json::from_str(&text).map_err(|e| ApiError::JsonParse(e.to_string()))?;

        parsed["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| ApiError::JsonParse("no summary content in response".to_string()))
    }
}
