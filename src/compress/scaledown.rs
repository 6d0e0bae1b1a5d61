//! ScaleDown client — condenses thread context via the ScaleDown REST API.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::compress::{Compressed, ThreadCompressor};
use crate::config::CompressionConfig;
use crate::error::CompressError;

/// HTTP client for the ScaleDown compression service.
pub struct ScaleDownClient {
    config: CompressionConfig,
    client: reqwest::Client,
}

impl ScaleDownClient {
    pub fn new(config: CompressionConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ThreadCompressor for ScaleDownClient {
    async fn compress(
        &self,
        context: &str,
        instruction: &str,
    ) -> Result<Compressed, CompressError> {
        let body = serde_json::json!({
            "context": context,
            "prompt": instruction,
            "scaledown": {
                "rate": self.config.rate,
            },
        });

        let resp = self
            .client
            .post(&self.config.endpoint)
            .header("x-api-key", self.config.api_key.expose_secret())
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompressError::RequestFailed {
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(CompressError::BadStatus {
                status: resp.status().as_u16(),
            });
        }

        let payload: CompressResponse =
            resp.json().await.map_err(|e| CompressError::InvalidResponse {
                reason: e.to_string(),
            })?;

        if !payload.successful {
            return Err(CompressError::EmptyPayload);
        }

        match payload.compressed_prompt {
            Some(text) if !text.is_empty() => {
                tracing::info!(
                    original_tokens = ?payload.original_prompt_tokens,
                    compressed_tokens = ?payload.compressed_prompt_tokens,
                    "ScaleDown compression succeeded"
                );
                Ok(Compressed {
                    text,
                    original_tokens: payload.original_prompt_tokens,
                    compressed_tokens: payload.compressed_prompt_tokens,
                })
            }
            _ => Err(CompressError::EmptyPayload),
        }
    }
}

/// Wire format of a ScaleDown compression response.
#[derive(Debug, Deserialize)]
struct CompressResponse {
    #[serde(default)]
    successful: bool,
    #[serde(default)]
    compressed_prompt: Option<String>,
    #[serde(default)]
    original_prompt_tokens: Option<u64>,
    #[serde(default)]
    compressed_prompt_tokens: Option<u64>,
}
