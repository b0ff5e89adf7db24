use std::time::{Duration, Instant};

use anyhow::{Error, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shown in place of a reply when the endpoint answers without one.
pub const NO_VALID_RESPONSE: &str = "[Error: No valid response]";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

impl GenerationRequest {
    pub fn new(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            prompt: prompt.to_string(),
            stream: false,
        }
    }
}

/// The outcome of a single generation. Failures are carried as text
/// so they can be shown inline like any other reply.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationResult {
    pub success: bool,
    pub text: String,
    /// The payload as received when it didn't contain a reply.
    pub raw: Option<Value>,
}

impl GenerationResult {
    pub fn reply(text: &str) -> Self {
        Self {
            success: true,
            text: text.to_string(),
            raw: None,
        }
    }

    pub fn missing_reply(raw: Value) -> Self {
        Self {
            success: true,
            text: NO_VALID_RESPONSE.to_string(),
            raw: Some(raw),
        }
    }

    pub fn failure(err: &Error) -> Self {
        Self {
            success: false,
            text: format!("[Error: {:#}]", err),
            raw: None,
        }
    }
}

/// Sends a non-streaming request to the `/api/generate` endpoint and
/// returns the decoded JSON body as is.
pub async fn generate(
    request: &GenerationRequest,
    api_hostname: &str,
    timeout: Duration,
) -> Result<Value, Error> {
    let url = format!("{}/api/generate", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .header("Content-Type", "application/json")
        .timeout(timeout)
        .json(request)
        .send()
        .await?
        .json()
        .await?;

    Ok(response)
}

/// Pulls the reply out of a decoded body. Only an object without a
/// `response` key gets the placeholder; anything that isn't an object
/// is a malformed body.
pub fn interpret_reply(resp: Value) -> GenerationResult {
    let Some(body) = resp.as_object() else {
        let err = anyhow!("Expected a JSON object from the generation endpoint, got: {}", resp);
        tracing::warn!("{}", err);
        return GenerationResult::failure(&err);
    };

    match body.get("response") {
        Some(Value::String(text)) => GenerationResult::reply(text),
        Some(other) => GenerationResult::reply(&other.to_string()),
        None => {
            tracing::warn!("Generation response missing `response` field:\n{}", resp);
            GenerationResult::missing_reply(resp)
        }
    }
}

/// Runs a prompt against `model` and normalizes whatever happens into
/// a `GenerationResult`. Never returns an error and never retries.
pub async fn dispatch(
    model: &str,
    prompt: &str,
    api_hostname: &str,
    timeout: Duration,
) -> GenerationResult {
    let request = GenerationRequest::new(model, prompt);
    let started = Instant::now();

    tracing::debug!(model, prompt_len = prompt.len(), "Dispatching generation request");

    let result = match generate(&request, api_hostname, timeout).await {
        Ok(resp) => interpret_reply(resp),
        Err(err) => {
            tracing::warn!("Generation request failed: {:#}", err);
            GenerationResult::failure(&err)
        }
    };

    tracing::debug!(
        model,
        success = result.success,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Generation finished"
    );

    result
}
