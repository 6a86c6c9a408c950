//! OpenAI-backed implementation of the NER trait.
//!
//! Uses chat completions with strict `json_schema` structured output to
//! extract `(text, label)` entity pairs, then locates each pair in the
//! source text left-to-right to assign byte offsets.
//!
//! # Example
//!
//! ```rust,ignore
//! use letters::ner::openai::OpenAiNer;
//!
//! let ner = OpenAiNer::from_env()?.with_model("gpt-4o-mini");
//! let mut doc = NamedEntityDocument::new(transcription, ner);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{NerError, NerResult};
use crate::ner::{EntitySpan, Ner, NerDoc};

const SYSTEM_PROMPT: &str = "You are a named-entity recognizer for nineteenth-century \
    correspondence. Extract every named entity from the user's text, in the order it \
    occurs, quoting each entity exactly as written. Use the labels PERSON, GPE, DATE, \
    ORG, LOC, NORP, EVENT, WORK_OF_ART.";

/// OpenAI-based NER tagger.
#[derive(Clone)]
pub struct OpenAiNer {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiNer {
    /// Create a new tagger with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> NerResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| NerError::Config("OPENAI_API_KEY not set".to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// JSON schema for the structured response.
    fn entity_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "entities": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "text": { "type": "string" },
                            "label": { "type": "string" }
                        },
                        "required": ["text", "label"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["entities"],
            "additionalProperties": false
        })
    }

    async fn extract_entities(&self, text: &str) -> NerResult<Vec<RawEntity>> {
        let request = StructuredRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            temperature: 0.0,
            response_format: ResponseFormat {
                format_type: "json_schema".to_string(),
                json_schema: JsonSchemaFormat {
                    name: "entities".to_string(),
                    strict: true,
                    schema: Self::entity_schema(),
                },
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| NerError::Backend(Box::new(e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(NerError::Backend(
                format!("OpenAI structured output error: {}", error_text).into(),
            ));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| NerError::Backend(Box::new(e)))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| NerError::Backend("no response from OpenAI".into()))?;

        let parsed: EntityResponse =
            serde_json::from_str(&content).map_err(|e| NerError::Backend(Box::new(e)))?;
        Ok(parsed.entities)
    }
}

#[async_trait]
impl Ner for OpenAiNer {
    async fn annotate(&self, text: &str) -> NerResult<NerDoc> {
        let raw = self.extract_entities(text).await?;
        tracing::debug!(model = %self.model, candidates = raw.len(), "model returned entities");

        // Assign offsets by scanning left to right; an entity the model
        // paraphrased instead of quoting cannot be located and is skipped.
        let mut spans = Vec::with_capacity(raw.len());
        let mut cursor = 0;
        for entity in raw {
            match text[cursor..].find(&entity.text) {
                Some(offset) => {
                    let start = cursor + offset;
                    let end = start + entity.text.len();
                    cursor = end;
                    spans.push(EntitySpan {
                        text: entity.text,
                        label: entity.label,
                        start,
                        end,
                    });
                }
                None => {
                    tracing::warn!(
                        text = %entity.text,
                        label = %entity.label,
                        "entity not found in source text, skipping"
                    );
                }
            }
        }

        Ok(NerDoc::new(text, spans))
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Serialize)]
struct StructuredRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
    json_schema: JsonSchemaFormat,
}

#[derive(Serialize)]
struct JsonSchemaFormat {
    name: String,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct RawEntity {
    text: String,
    label: String,
}

#[derive(Deserialize)]
struct EntityResponse {
    entities: Vec<RawEntity>,
}
