use crate::error::{Error, Result};
use crate::models::completion::ChatCompletionRequest;
use reqwest::{Client, StatusCode};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

/// Thin client for an OpenAI-compatible chat completion endpoint.
///
/// One call, one request: no retries and no backoff. The request timeout is
/// whatever the supplied [`Client`] was built with.
#[derive(Clone)]
pub struct ModelClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl ModelClient {
    pub fn new(api_url: String, api_key: String, client: Client) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }

    pub async fn chat_completion(
        &self,
        payload: &ChatCompletionRequest,
    ) -> Result<UpstreamResponse> {
        tracing::info!(model = %payload.model, "Sending request to model API");
        let res = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        tracing::info!(status = status.as_u16(), "Model API responded");

        if status != StatusCode::OK {
            tracing::error!(status = status.as_u16(), body = %body, "Model API request failed");
            return Err(Error::UpstreamRequest {
                status: status.as_u16(),
                detail: upstream_error_detail(&body),
            });
        }

        tracing::debug!(body = %body, "Model API response body");
        Ok(UpstreamResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Compact JSON when the error body is JSON, the raw text otherwise.
fn upstream_error_detail(body: &str) -> String {
    match serde_json::from_str::<JsonValue>(body) {
        Ok(value) => value.to_string(),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_detail_compacts_json() {
        let detail = upstream_error_detail("{\n  \"error\": { \"message\": \"bad key\" }\n}");
        assert_eq!(detail, r#"{"error":{"message":"bad key"}}"#);
    }

    #[test]
    fn error_detail_keeps_plain_text() {
        assert_eq!(upstream_error_detail("Bad Gateway"), "Bad Gateway");
    }
}
