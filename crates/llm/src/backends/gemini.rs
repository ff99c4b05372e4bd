use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::generator::{GenerationError, GenerationParams, Message, Role, TextGenerator};

pub struct GeminiBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiBackend {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    /// Build the request body for the Gemini generateContent API.
    fn build_request_body(parts: &[Message], params: &GenerationParams) -> serde_json::Value {
        // Gemini takes the system part in a separate system_instruction field.
        let system = parts
            .iter()
            .find(|p| p.role == Role::System)
            .map(|p| p.content.clone());

        let contents: Vec<serde_json::Value> = parts
            .iter()
            .filter(|p| p.role == Role::User)
            .map(|p| {
                json!({
                    "role": "user",
                    "parts": [{ "text": p.content }],
                })
            })
            .collect();

        let mut body = json!({
            "contents": contents,
            "generationConfig": {
                "temperature": params.temperature,
                "topP": params.top_p,
                "topK": params.top_k,
                "maxOutputTokens": params.max_output_tokens,
            },
        });

        if let Some(system) = system {
            body["system_instruction"] = json!({
                "parts": [{ "text": system }],
            });
        }

        body
    }
}

#[async_trait]
impl TextGenerator for GeminiBackend {
    async fn generate(
        &self,
        parts: Vec<Message>,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key,
        );

        let body = Self::build_request_body(&parts, params);

        debug!("Gemini request to model={}", self.model);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        let resp: serde_json::Value = response.json().await?;
        let text = resp["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                GenerationError::Parse("missing candidates[0].content.parts[0].text".into())
            })?
            .to_string();

        Ok(text)
    }
}
