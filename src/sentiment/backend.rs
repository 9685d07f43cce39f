use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::CallError;
use crate::invoke::ExternalCall;

use super::options::BackendOptions;

/// One non-streaming completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub num_predict: u32,
}

/// Ask the backend which models it has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListModels;

#[derive(Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateBodyOptions,
}

#[derive(Serialize)]
struct GenerateBodyOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateReply {
    #[serde(default)]
    response: String,
}

#[derive(Deserialize)]
struct TagsReply {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Deserialize)]
struct TagEntry {
    name: Option<String>,
    model: Option<String>,
}

fn decode_generate(body: &[u8]) -> Result<String, CallError> {
    let reply: GenerateReply = serde_json::from_slice(body).map_err(|e| CallError::Decode(format!("/api/generate: {e}")))?;
    Ok(reply.response)
}

/// Model names from a tag listing; entries may carry `name`, `model`, or both.
fn decode_tags(body: &[u8]) -> Result<Vec<String>, CallError> {
    let reply: TagsReply = serde_json::from_slice(body).map_err(|e| CallError::Decode(format!("/api/tags: {e}")))?;
    Ok(reply.models.into_iter().filter_map(|m| m.name.or(m.model)).collect())
}

/// Blocking client for an Ollama-compatible HTTP API.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    http: Client,
}

impl OllamaClient {
    /// # Errors
    /// Returns `CallError::Http` if the HTTP client cannot be built.
    pub fn new(opts: &BackendOptions) -> Result<Self, CallError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(opts.request_timeout_secs.max(1)))
            .build()?;
        Ok(Self { base_url: opts.url.trim_end_matches('/').to_string(), http })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ExternalCall<GenerateRequest> for OllamaClient {
    type Output = String;

    fn call(&self, req: &GenerateRequest) -> Result<String, CallError> {
        let body = GenerateBody {
            model: &req.model,
            prompt: &req.prompt,
            stream: false,
            options: GenerateBodyOptions { temperature: req.temperature, num_predict: req.num_predict },
        };
        let bytes = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()?
            .error_for_status()?
            .bytes()?;
        decode_generate(&bytes)
    }
}

impl ExternalCall<ListModels> for OllamaClient {
    type Output = Vec<String>;

    fn call(&self, _req: &ListModels) -> Result<Vec<String>, CallError> {
        let bytes = self
            .http
            .get(format!("{}/api/tags", self.base_url))
            .send()?
            .error_for_status()?
            .bytes()?;
        decode_tags(&bytes)
    }
}

/// First model whose name contains `hint` (case-insensitive), else `default`.
#[must_use]
pub fn select_model(available: &[String], hint: &str, default: &str) -> String {
    let hint = hint.to_lowercase();
    available
        .iter()
        .find(|m| m.to_lowercase().contains(&hint))
        .cloned()
        .unwrap_or_else(|| default.to_string())
}
