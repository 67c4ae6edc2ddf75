//! Suggestion client for the language-model API: forwards a user prompt and
//! turns the reply into addable task texts.

use crate::errors::AppError;
use std::env;
use std::time::Duration;

pub const DEFAULT_ASSISTANT_URL: &str = "http://127.0.0.1:11434";
const REQUEST_TIMEOUT_SECS: u64 = 60;
const MAX_SUGGESTIONS: usize = 10;

#[derive(Clone)]
pub struct AssistantClient {
    base_url: String,
    model: String,
}

impl AssistantClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    // No ASSISTANT_MODEL means the assistant stays disabled.
    pub fn from_env() -> Option<Self> {
        let model = env::var("ASSISTANT_MODEL").ok()?;
        if model.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("ASSISTANT_URL").unwrap_or_else(|_| DEFAULT_ASSISTANT_URL.to_string());
        Some(Self::new(base_url, model))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn suggest(&self, prompt: &str) -> Result<Vec<String>, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(AppError::internal)?;

        let body = serde_json::json!({
            "model": self.model,
            "prompt": build_prompt(prompt),
            "stream": false,
        });

        let response = client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|err| AppError::bad_gateway(format!("assistant request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(AppError::bad_gateway(format!(
                "assistant returned {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|err| AppError::bad_gateway(format!("assistant reply unreadable: {err}")))?;
        let text = json.get("response").and_then(|r| r.as_str()).unwrap_or("");

        let suggestions = parse_suggestions(text);
        if suggestions.is_empty() {
            return Err(AppError::bad_gateway("assistant returned no suggestions"));
        }
        Ok(suggestions)
    }
}

fn build_prompt(request: &str) -> String {
    format!(
        "You are the quest assistant for a daily task tracker. Answer with a \
         short plain list of concrete tasks, one per line, no commentary.\n\n{request}"
    )
}

fn parse_suggestions(text: &str) -> Vec<String> {
    text.lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty() && !line.ends_with(':'))
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim().trim_start_matches(['-', '*', '•']).trim_start();

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix(['.', ')']) {
            return rest.trim();
        }
    }
    line.trim_end()
}
