//! Ollama-backed collaborators: query rewriter, summarizer, and embeddings.
//!
//! This module is only available when the `ollama` feature is enabled. It
//! talks to a local Ollama server over HTTP; prompt templates live here, on
//! the collaborator side of the boundary, never in the core.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{CtiError, Result};
use crate::rewrite::QueryRewriter;
use crate::summarize::Summarizer;

/// The default Ollama server address.
const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// The default generation model.
const DEFAULT_GENERATE_MODEL: &str = "phi3.5";

/// The default embedding model.
const DEFAULT_EMBED_MODEL: &str = "nomic-embed-text";

/// The default dimensionality for `nomic-embed-text`.
const DEFAULT_EMBED_DIMENSIONS: usize = 768;

/// System instruction for query rewriting.
const REWRITE_INSTRUCTION: &str = "You are a CTI analyst. Reformulate this question into a \
search query optimized for a database of posts scraped from cybercriminal Telegram channels. \
Add technical CTI terms. Maximum 25 words. Respond ONLY with the query.";

/// System instruction for evidence analysis.
const ANALYSIS_INSTRUCTION: &str = "You are a senior CTI analyst. Analyze the following data \
extracted from cybercriminal Telegram channels.\n\
\n\
RULES:\n\
1. Base your analysis ONLY on the retrieved data below\n\
2. Cite POST_ID and CHANNEL values in your sources\n\
3. Assess reliability: posts whose replies are mostly questions are probable spam or scams; \
posts with high views and forwards are potentially real threats\n\
4. If the data is insufficient, say so\n\
\n\
FORMAT:\n\
## Analysis\n\
## Threat Indicators (IOC)\n\
## Sources\n\
## Overall Reliability";

// ── Ollama API request/response types ──────────────────────────────

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_ctx: usize,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

// ── Generation client ──────────────────────────────────────────────

/// A [`QueryRewriter`] and [`Summarizer`] backed by an Ollama model.
///
/// Uses `reqwest` to call `/api/generate` with streaming disabled.
///
/// # Example
///
/// ```rust,ignore
/// use cti_rag::ollama::OllamaGenerator;
///
/// let generator = OllamaGenerator::new().with_model("phi3.5");
/// let query = generator.rewrite("What cracking tools are shared?").await?;
/// ```
pub struct OllamaGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
    num_ctx: usize,
}

impl Default for OllamaGenerator {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_GENERATE_MODEL.to_string(),
            temperature: 0.1,
            num_ctx: 4096,
        }
    }
}

impl OllamaGenerator {
    /// Create a generator against `http://localhost:11434` with the default
    /// model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Ollama server address.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the generation model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    async fn generate(&self, prompt: String) -> Result<String> {
        debug!(model = %self.model, prompt_len = prompt.len(), "ollama generate");

        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions { temperature: self.temperature, num_ctx: self.num_ctx },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Ollama", error = %e, "request failed");
                CtiError::Model {
                    provider: "Ollama".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(provider = "Ollama", %status, "API error");
            return Err(CtiError::Model {
                provider: "Ollama".into(),
                message: format!("API returned {status}: {body}"),
            });
        }

        let generate_response: GenerateResponse = response.json().await.map_err(|e| {
            error!(provider = "Ollama", error = %e, "failed to parse response");
            CtiError::Model {
                provider: "Ollama".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(generate_response.response)
    }
}

#[async_trait]
impl QueryRewriter for OllamaGenerator {
    async fn rewrite(&self, question: &str) -> Result<String> {
        self.generate(format!("{REWRITE_INSTRUCTION}\n\nQuestion: {question}")).await
    }
}

#[async_trait]
impl Summarizer for OllamaGenerator {
    async fn summarize(&self, context: &str, question: &str) -> Result<String> {
        self.generate(format!(
            "{ANALYSIS_INSTRUCTION}\n\nRETRIEVED DATA:\n{context}\n\nQuestion: {question}"
        ))
        .await
    }
}

// ── Embedding client ───────────────────────────────────────────────

/// An [`EmbeddingProvider`] backed by the Ollama embeddings API.
pub struct OllamaEmbeddingProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl Default for OllamaEmbeddingProvider {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_EMBED_MODEL.to_string(),
            dimensions: DEFAULT_EMBED_DIMENSIONS,
        }
    }
}

impl OllamaEmbeddingProvider {
    /// Create a provider against `http://localhost:11434` with the default
    /// embedding model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Ollama server address.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the embedding model and its dimensionality.
    pub fn with_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.model = model.into();
        self.dimensions = dimensions;
        self
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(model = %self.model, text_len = text.len(), "ollama embed");

        let request = EmbeddingRequest { model: &self.model, prompt: text };

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Ollama", error = %e, "request failed");
                CtiError::Embedding {
                    provider: "Ollama".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(provider = "Ollama", %status, "API error");
            return Err(CtiError::Embedding {
                provider: "Ollama".into(),
                message: format!("API returned {status}: {body}"),
            });
        }

        let embedding_response: EmbeddingResponse = response.json().await.map_err(|e| {
            error!(provider = "Ollama", error = %e, "failed to parse response");
            CtiError::Embedding {
                provider: "Ollama".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(embedding_response.embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
