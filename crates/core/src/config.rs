use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_f32(key: &str, default: f32) -> f32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub drafter: DrafterConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            llm: LlmConfig::from_env(),
            drafter: DrafterConfig::from_env(),
        }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  server:   {}:{}", self.server.host, self.server.port);
        tracing::info!(
            "  llm:      provider={}, model={}, configured={}",
            self.llm.provider,
            self.llm.model_name(),
            self.llm.is_configured()
        );
        tracing::info!(
            "  drafter:  max_regeneration_attempts={}, rules={}",
            self.drafter.max_regeneration_attempts,
            self.drafter
                .rules_path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(builtin)".to_string())
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_u16("PORT", 3001),
        }
    }
}

// ── LLM (Gemini / Ollama) ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "gemini" or "ollama"
    pub provider: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl LlmConfig {
    fn from_env() -> Self {
        Self {
            provider: env_or("LLM_PROVIDER", "gemini"),
            gemini_api_key: env_opt("GEMINI_API_KEY"),
            gemini_model: env_or("GEMINI_MODEL", "gemini-2.0-flash-exp"),
            ollama_url: env_or("OLLAMA_URL", "http://localhost:11434"),
            ollama_model: env_or("OLLAMA_MODEL", "llama3.2"),
            temperature: env_f32("LLM_TEMPERATURE", 0.3),
            top_p: env_f32("LLM_TOP_P", 0.8),
            top_k: env_u32("LLM_TOP_K", 40),
            max_output_tokens: env_u32("LLM_MAX_OUTPUT_TOKENS", 8192),
        }
    }

    /// The model identifier the active provider will call.
    pub fn model_name(&self) -> &str {
        match self.provider.as_str() {
            "ollama" => &self.ollama_model,
            _ => &self.gemini_model,
        }
    }

    pub fn is_configured(&self) -> bool {
        match self.provider.as_str() {
            "gemini" => self.gemini_api_key.is_some(),
            "ollama" => true,
            _ => false,
        }
    }
}

// ── Drafter ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrafterConfig {
    /// Extra generation passes allowed when a draft fails compliance validation.
    pub max_regeneration_attempts: u32,
    /// Optional YAML rule file; the builtin seed set is used when unset.
    pub rules_path: Option<PathBuf>,
}

impl DrafterConfig {
    fn from_env() -> Self {
        Self {
            max_regeneration_attempts: env_u32("DRAFTER_MAX_REGENERATION_ATTEMPTS", 1),
            rules_path: env_opt("LEXI_RULES_PATH").map(PathBuf::from),
        }
    }
}
