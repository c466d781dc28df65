use std::collections::VecDeque;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::{Oracle, OracleError};
use crate::config;

/// Ollama HTTP client for local LLM inference.
///
/// Blocking, one request per call, no streaming. The per-request timeout is
/// the only cancellation mechanism.
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaClient {
    /// Create a client pointing at an Ollama instance.
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        }
    }

    /// Default local instance with the configured default model.
    pub fn default_local(model: &str) -> Self {
        Self::new(config::OLLAMA_BASE_URL, model, config::DEFAULT_TIMEOUT_SECS)
    }

    /// The model name this client queries.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Names of the models the Ollama instance has pulled.
    pub fn list_models(&self) -> Result<Vec<String>, OracleError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self.client.get(&url).send().map_err(|e| {
            if e.is_connect() {
                OracleError::Unreachable(self.base_url.clone())
            } else {
                OracleError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(OracleError::RequestFailed(format!(
                "status {}",
                status.as_u16()
            )));
        }

        let parsed: TagsResponse = response
            .json()
            .map_err(|e| OracleError::DecodeFailed(e.to_string()))?;
        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }
}

/// Request body for Ollama /api/generate
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
}

/// Response body from Ollama /api/generate
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Response body from Ollama /api/tags
#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

impl Oracle for OllamaClient {
    fn call(&self, prompt: &str, temperature: f32) -> Result<String, OracleError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions { temperature },
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                OracleError::Unreachable(self.base_url.clone())
            } else if e.is_timeout() {
                OracleError::RequestFailed(format!(
                    "request timed out after {}s",
                    self.timeout_secs
                ))
            } else {
                OracleError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(OracleError::RequestFailed(format!(
                "status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| OracleError::DecodeFailed(e.to_string()))?;

        Ok(parsed.response)
    }
}

/// Scripted oracle for testing — replays a fixed sequence of results.
pub struct ScriptedOracle {
    script: Mutex<VecDeque<Result<String, OracleError>>>,
}

impl ScriptedOracle {
    pub fn new(script: Vec<Result<String, OracleError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }

    /// Oracle that answers every call with the same text.
    pub fn always(response: &str) -> AlwaysOracle {
        AlwaysOracle {
            response: response.to_string(),
        }
    }

    /// Oracle that fails every call with the same error.
    pub fn always_failing(error: OracleError) -> FailingOracle {
        FailingOracle { error }
    }
}

impl Oracle for ScriptedOracle {
    fn call(&self, _prompt: &str, _temperature: f32) -> Result<String, OracleError> {
        self.script
            .lock()
            .expect("oracle script lock")
            .pop_front()
            .unwrap_or_else(|| Err(OracleError::Unexpected("oracle script exhausted".into())))
    }
}

/// See [`ScriptedOracle::always`].
pub struct AlwaysOracle {
    response: String,
}

impl Oracle for AlwaysOracle {
    fn call(&self, _prompt: &str, _temperature: f32) -> Result<String, OracleError> {
        Ok(self.response.clone())
    }
}

/// See [`ScriptedOracle::always_failing`].
pub struct FailingOracle {
    error: OracleError,
}

impl Oracle for FailingOracle {
    fn call(&self, _prompt: &str, _temperature: f32) -> Result<String, OracleError> {
        Err(self.error.clone())
    }
}
