use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::generator::{GenerationError, GenerationParams, Message, Role, TextGenerator};

/// Local-model backend for development without a Gemini key.
pub struct OllamaBackend {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OllamaBackend {
    pub fn new(url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            model,
        }
    }

    fn build_request_body(&self, parts: &[Message], params: &GenerationParams) -> serde_json::Value {
        let messages: Vec<serde_json::Value> = parts
            .iter()
            .map(|p| {
                json!({
                    "role": match p.role {
                        Role::System => "system",
                        Role::User => "user",
                    },
                    "content": p.content,
                })
            })
            .collect();

        json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
            "options": {
                "temperature": params.temperature,
                "top_p": params.top_p,
                "top_k": params.top_k,
                "num_predict": params.max_output_tokens,
            },
        })
    }
}

#[async_trait]
impl TextGenerator for OllamaBackend {
    async fn generate(
        &self,
        parts: Vec<Message>,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/api/chat", self.url);
        let body = self.build_request_body(&parts, params);

        debug!("Ollama request to {}", url);

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
        let text = resp["message"]["content"]
            .as_str()
            .ok_or_else(|| GenerationError::Parse("missing message.content".into()))?
            .to_string();

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_maps_roles_and_options() {
        let backend = OllamaBackend::new("http://localhost:11434".into(), "llama3.2".into());
        let parts = vec![Message::system("sys"), Message::user("usr")];
        let body = backend.build_request_body(&parts, &GenerationParams::default());

        assert_eq!(body["model"], "llama3.2");
        assert_eq!(body["stream"], false);

        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(body["options"]["num_predict"], 8192);
    }
}
