//! LLM integration for askdb.
//!
//! Provides the generation-capability trait and its implementations, plus
//! prompt construction and response parsing.

pub mod gemini;
pub mod mock;
pub mod parser;
pub mod prompt;

pub use gemini::{GeminiClient, GeminiConfig};
pub use mock::{FailingLlmClient, MockLlmClient};
pub use parser::{extract_sql, ExtractedSql};
pub use prompt::build_prompt;

use async_trait::async_trait;
use std::str::FromStr;

use crate::error::{AskdbError, Result};

/// Trait for LLM clients that can generate text from a prompt.
///
/// This is the single capability the agent depends on; implementations must
/// be thread-safe (Send + Sync) so a client handle can be shared freely.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given prompt.
    ///
    /// Returns the complete response as a single string. May fail with a
    /// transport, auth, or quota error.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    /// Google Gemini API.
    #[default]
    Gemini,
    /// Mock client for testing (no API key required).
    Mock,
}

impl LlmProvider {
    /// Returns the provider as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Mock => "mock",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown LLM provider: {}", s)),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Creates an LLM client for the given provider.
///
/// For Gemini, the API key is resolved in order:
/// 1. Provided `api_key` parameter
/// 2. `GEMINI_API_KEY` environment variable
///
/// The model defaults to `GEMINI_MODEL` (or the built-in default) unless one
/// is passed explicitly.
pub fn create_client(
    provider: LlmProvider,
    api_key: Option<String>,
    model: Option<String>,
) -> Result<Box<dyn LlmClient>> {
    match provider {
        LlmProvider::Gemini => {
            let key = api_key
                .or_else(|| std::env::var("GEMINI_API_KEY").ok())
                .ok_or_else(|| {
                    AskdbError::llm("No API key configured. Set GEMINI_API_KEY or use --api-key.")
                })?;
            let model = model
                .or_else(|| std::env::var("GEMINI_MODEL").ok())
                .unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string());
            Ok(Box::new(GeminiClient::new(GeminiConfig::new(key, model))?))
        }
        LlmProvider::Mock => Ok(Box::new(MockLlmClient::new())),
    }
}
