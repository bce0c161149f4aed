//! HTTP gateway SMS provider
//!
//! Posts `{"to", "from", "message"}` as JSON to a configured gateway with a
//! bearer key. Server errors and 429 responses are retried with exponential
//! backoff; other failures are returned immediately.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use sb_shared::config::SmsConfig;
use sb_shared::phone::{is_valid_phone, mask_phone_number};

use crate::sms::sms_service::SmsService;
use crate::InfrastructureError;

/// Maximum message length accepted by the gateway
const MAX_MESSAGE_LENGTH: usize = 1600;

/// HTTP SMS gateway configuration
#[derive(Debug, Clone)]
pub struct HttpSmsConfig {
    /// Gateway endpoint receiving the JSON message
    pub gateway_url: String,
    /// Bearer key; omitted from the request when empty
    pub api_key: String,
    /// Sender id shown to the recipient
    pub sender_id: String,
    /// Timeout for a single request in seconds
    pub request_timeout_secs: u64,
    /// Attempts before giving up
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
}

impl TryFrom<&SmsConfig> for HttpSmsConfig {
    type Error = InfrastructureError;

    fn try_from(config: &SmsConfig) -> Result<Self, Self::Error> {
        let gateway_url = config
            .gateway_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| InfrastructureError::Config("SMS_GATEWAY_URL not set".to_string()))?;

        Ok(Self {
            gateway_url,
            api_key: config.api_key.clone(),
            sender_id: config.sender_id.clone(),
            request_timeout_secs: config.timeout_seconds,
            max_retries: 3,
            retry_delay_ms: 500,
        })
    }
}

#[derive(Debug, Serialize)]
struct OutboundMessage<'a> {
    to: &'a str,
    from: &'a str,
    message: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GatewayResponse {
    #[serde(default, alias = "id")]
    message_id: Option<String>,
}

/// SMS provider backed by an HTTP gateway
pub struct HttpSmsService {
    client: Client,
    config: HttpSmsConfig,
}

impl HttpSmsService {
    /// Create a new HTTP SMS service
    pub fn new(config: HttpSmsConfig) -> Result<Self, InfrastructureError> {
        if !config.gateway_url.starts_with("http://") && !config.gateway_url.starts_with("https://") {
            return Err(InfrastructureError::Config(format!(
                "SMS gateway URL must be http(s): {}",
                config.gateway_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()?;

        info!("HTTP SMS service initialized with gateway: {}", config.gateway_url);

        Ok(Self { client, config })
    }

    async fn post_once(&self, to: &str, message: &str) -> Result<String, (InfrastructureError, bool)> {
        let body = OutboundMessage {
            to,
            from: &self.config.sender_id,
            message,
        };

        let mut request = self.client.post(&self.config.gateway_url).json(&body);
        if !self.config.api_key.is_empty() {
            request = request.bearer_auth(&self.config.api_key);
        }

        let response = request.send().await.map_err(|e| {
            let retryable = e.is_timeout() || e.is_connect();
            (InfrastructureError::Http(e), retryable)
        })?;

        let status = response.status();
        if !status.is_success() {
            let retryable = status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS;
            return Err((
                InfrastructureError::Sms(format!("Gateway returned status {}", status.as_u16())),
                retryable,
            ));
        }

        // Gateways that return no body or no id still accepted the message
        let parsed: GatewayResponse = response.json().await.unwrap_or_default();
        Ok(parsed
            .message_id
            .unwrap_or_else(|| format!("http_{}", uuid::Uuid::new_v4())))
    }

    /// Send with retry logic
    async fn send_with_retry(&self, to: &str, message: &str) -> Result<String, InfrastructureError> {
        let max_attempts = self.config.max_retries.max(1);
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending SMS attempt {}/{} to {}",
                attempts,
                max_attempts,
                mask_phone_number(to)
            );

            match self.post_once(to, message).await {
                Ok(message_id) => {
                    info!(
                        "SMS sent successfully to {} with id: {}",
                        mask_phone_number(to),
                        message_id
                    );
                    return Ok(message_id);
                }
                Err((e, retryable)) => {
                    error!(
                        "Failed to send SMS (attempt {}/{}): {}",
                        attempts, max_attempts, e
                    );

                    if !retryable {
                        return Err(e);
                    }
                    if attempts >= max_attempts {
                        return Err(InfrastructureError::Sms(format!(
                            "Failed to send SMS after {} attempts: {}",
                            max_attempts, e
                        )));
                    }

                    warn!("Retrying SMS delivery after {:?}", delay);
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }
}

#[async_trait]
impl SmsService for HttpSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        if !is_valid_phone(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number: {}",
                mask_phone_number(phone_number)
            )));
        }

        if message.len() > MAX_MESSAGE_LENGTH {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        info!(
            "Sending SMS to {} via HTTP gateway (message length: {} chars)",
            mask_phone_number(phone_number),
            message.len()
        );

        self.send_with_retry(phone_number, message).await
    }

    fn provider_name(&self) -> &str {
        "Http"
    }
}
