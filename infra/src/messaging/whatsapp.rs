//! WhatsApp Cloud API OTP sender
//!
//! Sends the code as a plain text message through the Business phone number
//! configured for the connector, retrying transient failures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use mb_core::services::verification::OtpSender;
use mb_shared::config::DeliveryConfig;
use mb_shared::utils::phone::mask_phone_number;

use super::otp_message_body;
use crate::InfrastructureError;

/// WhatsApp Cloud API configuration
#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    /// API base URL, e.g. https://graph.facebook.com/v19.0
    pub api_url: String,
    /// WhatsApp Business phone number id
    pub phone_number_id: String,
    /// Bearer access token
    pub access_token: String,
    /// Maximum send attempts
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl WhatsAppConfig {
    /// Build from the shared delivery configuration
    pub fn from_delivery_config(config: &DeliveryConfig) -> Result<Self, InfrastructureError> {
        if !config.has_whatsapp_credentials() {
            return Err(InfrastructureError::Config(
                "WHATSAPP_PHONE_NUMBER_ID and WHATSAPP_ACCESS_TOKEN must be set".to_string(),
            ));
        }

        Ok(Self {
            api_url: config.whatsapp_api_url().trim_end_matches('/').to_string(),
            phone_number_id: config.whatsapp_phone_number_id.clone().unwrap_or_default(),
            access_token: config.whatsapp_access_token.clone().unwrap_or_default(),
            max_retries: 3,
            retry_delay_ms: 500,
            request_timeout_secs: 15,
        })
    }

    /// Messages endpoint for the configured phone number id
    pub fn messages_endpoint(&self) -> String {
        format!("{}/{}/messages", self.api_url, self.phone_number_id)
    }
}

/// Outgoing text message payload
#[derive(Debug, Serialize)]
pub struct OutgoingTextMessage {
    messaging_product: &'static str,
    recipient_type: &'static str,
    to: String,
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextBody,
}

#[derive(Debug, Serialize)]
struct TextBody {
    preview_url: bool,
    body: String,
}

impl OutgoingTextMessage {
    /// Text message to an E.164 phone number (sent without the leading '+')
    pub fn new(phone: &str, body: String) -> Self {
        Self {
            messaging_product: "whatsapp",
            recipient_type: "individual",
            to: phone.trim_start_matches('+').to_string(),
            kind: "text",
            text: TextBody {
                preview_url: false,
                body,
            },
        }
    }
}

/// Response from the messages endpoint
#[derive(Debug, Deserialize)]
pub struct WhatsAppMessageResponse {
    #[serde(default)]
    pub messages: Vec<WhatsAppMessageId>,
}

#[derive(Debug, Deserialize)]
pub struct WhatsAppMessageId {
    pub id: String,
}

impl WhatsAppMessageResponse {
    /// Id of the first accepted message
    pub fn message_id(&self) -> Option<&str> {
        self.messages.first().map(|m| m.id.as_str())
    }
}

/// WhatsApp Cloud API sender
pub struct WhatsAppOtpSender {
    client: reqwest::Client,
    config: WhatsAppConfig,
}

impl WhatsAppOtpSender {
    /// Create a new WhatsApp sender
    pub fn new(config: WhatsAppConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            phone_number_id = %config.phone_number_id,
            "WhatsApp OTP sender initialized"
        );

        Ok(Self { client, config })
    }

    async fn send_once(&self, message: &OutgoingTextMessage) -> Result<String, InfrastructureError> {
        let response = self
            .client
            .post(self.config.messages_endpoint())
            .bearer_auth(&self.config.access_token)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: WhatsAppMessageResponse = response.json().await?;
        parsed
            .message_id()
            .map(str::to_string)
            .ok_or_else(|| {
                InfrastructureError::Delivery("WhatsApp API response had no message id".to_string())
            })
    }

    /// Send with retry and exponential backoff; permanent failures return at once
    async fn send_with_retry(
        &self,
        phone: &str,
        message: &OutgoingTextMessage,
    ) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;
            debug!(
                "Sending WhatsApp OTP attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_phone_number(phone)
            );

            match self.send_once(message).await {
                Ok(message_id) => {
                    info!(
                        "WhatsApp OTP sent to {} with id: {}",
                        mask_phone_number(phone),
                        message_id
                    );
                    return Ok(message_id);
                }
                Err(e) => {
                    error!(
                        "Failed to send WhatsApp OTP (attempt {}/{}): {}",
                        attempts, self.config.max_retries, e
                    );
                    if !e.is_retryable() || attempts >= self.config.max_retries {
                        return Err(e);
                    }
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }
}

#[async_trait]
impl OtpSender for WhatsAppOtpSender {
    async fn send_otp(&self, phone: &str, code: &str) -> Result<String, String> {
        let message = OutgoingTextMessage::new(phone, otp_message_body(code));
        self.send_with_retry(phone, &message)
            .await
            .map_err(|e| e.to_string())
    }
}
