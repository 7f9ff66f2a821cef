//! Natural-language questions over production records, answered by a
//! hosted language model.
//!
//! Records are condensed to short keys before they are sent. The primary
//! model is tried first and the fallback model second; when both fail the
//! caller still gets a readable answer rather than an error.

use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use crate::config::InsightsConfig;
use crate::errors::{AppError, AppResult};
use crate::models::ProductionRecord;

pub const SYSTEM_INSTRUCTION: &str = "You are an expert Data Analyst for a team production dashboard.
Answer the user's questions based strictly on the provided JSON data.
Key: u=User, p=Process, t=Task, util=Utilization, d=Date, rem=Remarks, tm=Team.
Provide insights, comparisons, and trends. Be precise with numbers.";

pub const UNAVAILABLE_ANSWER: &str =
    "I'm having trouble connecting to my brain right now. Please try again later.";

const EMPTY_ANSWER: &str = "No response generated.";
const EMPTY_FALLBACK_ANSWER: &str = "No response generated from fallback model.";

#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("model returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// One generation call against a named model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// `thinking_budget` caps reasoning tokens on models that support it;
    /// `None` leaves the model's default.
    async fn generate(
        &self,
        model: &str,
        thinking_budget: Option<u32>,
        system: &str,
        prompt: &str,
    ) -> Result<String, InsightsError>;
}

/// Client for the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(
        &self,
        model: &str,
        thinking_budget: Option<u32>,
        system: &str,
        prompt: &str,
    ) -> Result<String, InsightsError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.endpoint, model);
        let body = request_body(system, prompt, thinking_budget);

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InsightsError::Api { status: status.as_u16(), body });
        }

        let value: Value = resp.json().await?;
        Ok(extract_text(&value))
    }
}

fn request_body(system: &str, prompt: &str, thinking_budget: Option<u32>) -> Value {
    let mut body = json!({
        "systemInstruction": { "parts": [{ "text": system }] },
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
    });
    if let Some(budget) = thinking_budget {
        body["generationConfig"] = json!({ "thinkingConfig": { "thinkingBudget": budget } });
    }
    body
}

// Concatenated text parts of the first candidate.
fn extract_text(value: &Value) -> String {
    value["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p["text"].as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

#[derive(Serialize)]
struct ContextRow<'a> {
    u: &'a str,
    p: &'a str,
    t: &'a str,
    tm: &'a str,
    util: f64,
    d: String,
    rem: &'a str,
}

pub fn build_prompt(query: &str, records: &[ProductionRecord]) -> String {
    let rows: Vec<ContextRow> = records
        .iter()
        .map(|r| ContextRow {
            u: &r.user_name,
            p: &r.process_name,
            t: &r.task,
            tm: &r.team,
            util: r.total_utilization,
            d: r.completed_date.to_string(),
            rem: &r.remarks,
        })
        .collect();
    let context = serde_json::to_string(&rows).unwrap_or_else(|_| "[]".to_string());

    format!("Context Data: {}\n\nUser Query: {}", context, query)
}

pub struct InsightsService {
    model: Option<Arc<dyn LanguageModel>>,
    primary_model: String,
    fallback_model: String,
    // primary model only; the fallback runs without a thinking budget
    thinking_budget: Option<u32>,
}

impl InsightsService {
    pub fn new(model: Arc<dyn LanguageModel>, primary_model: &str, fallback_model: &str) -> Self {
        Self {
            model: Some(model),
            primary_model: primary_model.to_string(),
            fallback_model: fallback_model.to_string(),
            thinking_budget: None,
        }
    }

    pub fn with_thinking_budget(mut self, budget: Option<u32>) -> Self {
        self.thinking_budget = budget;
        self
    }

    pub fn disabled() -> Self {
        Self {
            model: None,
            primary_model: String::new(),
            fallback_model: String::new(),
            thinking_budget: None,
        }
    }

    pub fn from_config(config: &InsightsConfig) -> Self {
        match config.api_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) if config.enabled => Self::new(
                Arc::new(GeminiClient::new(config.endpoint.clone(), key)),
                &config.primary_model,
                &config.fallback_model,
            )
            .with_thinking_budget(config.thinking_budget),
            _ => {
                tracing::info!("AI assistant disabled (no API key configured)");
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.model.is_some()
    }

    pub async fn answer(&self, query: &str, records: &[ProductionRecord]) -> AppResult<String> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| AppError::Unavailable("AI assistant is not configured".into()))?;
        if query.trim().is_empty() {
            return Err(AppError::BadRequest("Query must not be empty".into()));
        }

        let prompt = build_prompt(query, records);

        tracing::debug!("Asking primary model {}", self.primary_model);
        let primary_err = match model
            .generate(&self.primary_model, self.thinking_budget, SYSTEM_INSTRUCTION, &prompt)
            .await
        {
            Ok(text) => return Ok(non_empty(text, EMPTY_ANSWER)),
            Err(e) => e,
        };
        tracing::warn!("Primary model failed, trying fallback: {}", primary_err);

        match model.generate(&self.fallback_model, None, SYSTEM_INSTRUCTION, &prompt).await {
            Ok(text) => Ok(non_empty(text, EMPTY_FALLBACK_ANSWER)),
            Err(e) => {
                tracing::error!("All models failed: {}", e);
                Ok(UNAVAILABLE_ANSWER.to_string())
            }
        }
    }
}

fn non_empty(text: String, placeholder: &str) -> String {
    if text.trim().is_empty() {
        placeholder.to_string()
    } else {
        text
    }
}
