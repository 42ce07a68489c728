// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::retry::retry_transient;
use super::{CommitMessageGenerator, Provider, SYSTEM_PROMPT, build_user_prompt};
use crate::config::ProviderConfig;
use crate::error::GeneratorError;

/// Backend for any chat-completions API (OpenAI and compatible endpoints).
pub struct ChatCompletionsGenerator {
    client: Client,
    name: String,
    base_url: String,
    model: String,
    api_key: Option<SecretString>,
    timeout_secs: u64,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionsGenerator {
    /// Fails only when the HTTP client cannot be built; a client without the
    /// configured timeout is never used.
    pub fn new(provider: Provider, config: &ProviderConfig) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeneratorError::Transport {
                provider: provider.to_string(),
                message: format!("cannot build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            name: provider.to_string(),
            base_url: config
                .base_url
                .as_deref()
                .unwrap_or(provider.default_base_url())
                .trim_end_matches('/')
                .to_string(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| provider.default_model().to_string()),
            api_key: config.api_key.clone(),
            timeout_secs: config.timeout.as_secs(),
            max_retries: config.max_retries,
        })
    }

    async fn request(&self, api_key: &str, diff: &str, hint: &str) -> Result<String, GeneratorError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(provider = %self.name, model = %self.model, %url, "requesting commit message");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&ChatRequest {
                model: self.model.clone(),
                messages: vec![
                    Message {
                        role: "system".into(),
                        content: SYSTEM_PROMPT.into(),
                    },
                    Message {
                        role: "user".into(),
                        content: build_user_prompt(diff, hint),
                    },
                ],
            })
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            return Err(GeneratorError::Protocol {
                provider: self.name.clone(),
                message: format!("HTTP {status}: {}", body.trim()),
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| GeneratorError::Protocol {
                provider: self.name.clone(),
                message: format!("cannot decode response: {e}"),
            })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty());

        content.ok_or_else(|| GeneratorError::EmptyResult {
            provider: self.name.clone(),
        })
    }

    fn transport_error(&self, e: &reqwest::Error) -> GeneratorError {
        let message = if e.is_timeout() {
            format!("request timed out after {}s", self.timeout_secs)
        } else {
            e.to_string()
        };
        GeneratorError::Transport {
            provider: self.name.clone(),
            message,
        }
    }
}

#[async_trait]
impl CommitMessageGenerator for ChatCompletionsGenerator {
    async fn generate(&self, diff: &str, hint: &str) -> Result<String, GeneratorError> {
        let api_key = self
            .api_key
            .as_ref()
            .map(|k| k.expose_secret())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GeneratorError::MissingApiKey {
                provider: self.name.clone(),
            })?;

        retry_transient(self.max_retries, || self.request(api_key, diff, hint)).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
