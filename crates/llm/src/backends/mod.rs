pub mod gemini;
pub mod ollama;

use lexi_core::config::LlmConfig;

use crate::generator::{GenerationError, TextGenerator};

/// Create the appropriate text-generation backend based on config.
pub fn create_generator(config: &LlmConfig) -> Result<Box<dyn TextGenerator>, GenerationError> {
    match config.provider.as_str() {
        "gemini" => {
            let api_key = config
                .gemini_api_key
                .as_ref()
                .ok_or_else(|| GenerationError::NotConfigured("GEMINI_API_KEY not set".into()))?;
            Ok(Box::new(gemini::GeminiBackend::new(
                api_key.clone(),
                config.gemini_model.clone(),
            )))
        }
        "ollama" => Ok(Box::new(ollama::OllamaBackend::new(
            config.ollama_url.clone(),
            config.ollama_model.clone(),
        ))),
        other => Err(GenerationError::NotConfigured(format!(
            "unknown generator provider: '{}'",
            other
        ))),
    }
}
