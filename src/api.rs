use crate::{
    config::Config,
    errors::{ChatError, ChatResult},
    logging::{log_api_call, summarize},
    models::{ApiCallLog, ChatReply, ChatRequest},
};
use chrono::Utc;
use reqwest::Client;
use std::future::Future;
use std::time::{Duration, Instant};

/// Sends one user message to the chat server and yields the reply text.
pub trait ChatTransport: Send + Sync + 'static {
    fn send(&self, message: String) -> impl Future<Output = ChatResult<String>> + Send;
}

/// Talks to the chat endpoint over HTTP with a JSON body.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> ChatResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::transport_error(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &Config) -> ChatResult<Self> {
        Self::new(config.endpoint.clone(), config.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn exchange(&self, message: String) -> (u16, ChatResult<String>) {
        let payload = ChatRequest { message };

        let response = match self.client.post(&self.endpoint).json(&payload).send().await {
            Ok(response) => response,
            Err(e) => {
                let reason = if e.is_timeout() {
                    format!("Request timed out: {}", e)
                } else if e.is_connect() {
                    format!("Could not connect to {}: {}", self.endpoint, e)
                } else {
                    e.to_string()
                };
                return (0, Err(ChatError::transport_error(reason)));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return (
                    status.as_u16(),
                    Err(ChatError::transport_error(format!(
                        "Failed to read response body: {}",
                        e
                    ))),
                )
            }
        };

        if !status.is_success() {
            return (
                status.as_u16(),
                Err(ChatError::Status {
                    status: status.as_u16(),
                    body,
                }),
            );
        }

        (status.as_u16(), parse_reply(&body))
    }
}

impl ChatTransport for HttpTransport {
    async fn send(&self, message: String) -> ChatResult<String> {
        let request_summary = summarize(&message, 80);
        let started = Instant::now();

        let (status, result) = self.exchange(message).await;

        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: self.endpoint.clone(),
            request_summary,
            response_status: status,
            response_time_ms: started.elapsed().as_millis(),
        });

        if let Err(e) = &result {
            log::warn!("Chat request failed: {}", e);
        }

        result
    }
}

/// Validates a reply body, which must be `{"response": <string>}`.
pub fn parse_reply(body: &str) -> ChatResult<String> {
    serde_json::from_str::<ChatReply>(body)
        .map(|reply| reply.response)
        .map_err(|e| ChatError::malformed_reply(e.to_string()))
}
