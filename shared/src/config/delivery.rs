//! Outbound OTP delivery configuration

use serde::{Deserialize, Serialize};

/// Default WhatsApp Cloud API base URL
pub const DEFAULT_WHATSAPP_API_URL: &str = "https://graph.facebook.com/v19.0";

/// Channel used to relay issued codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryProvider {
    /// Log a masked delivery instead of sending (development)
    Log,
    /// WhatsApp Cloud API text message
    #[serde(rename = "whatsapp")]
    WhatsApp,
}

impl Default for DeliveryProvider {
    fn default() -> Self {
        DeliveryProvider::Log
    }
}

impl std::str::FromStr for DeliveryProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log" | "mock" => Ok(DeliveryProvider::Log),
            "whatsapp" | "wa" => Ok(DeliveryProvider::WhatsApp),
            _ => Err(format!("Invalid delivery provider: {}", s)),
        }
    }
}

/// Delivery channel configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeliveryConfig {
    /// Selected provider
    #[serde(default)]
    pub provider: DeliveryProvider,

    /// WhatsApp Cloud API base URL
    #[serde(default)]
    pub whatsapp_api_url: Option<String>,

    /// WhatsApp Business phone number id
    #[serde(default)]
    pub whatsapp_phone_number_id: Option<String>,

    /// WhatsApp access token
    #[serde(default, skip_serializing)]
    pub whatsapp_access_token: Option<String>,
}

impl DeliveryConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            provider: super::parse_or(lookup, "OTP_DELIVERY", DeliveryProvider::Log),
            whatsapp_api_url: lookup("WHATSAPP_API_URL"),
            whatsapp_phone_number_id: lookup("WHATSAPP_PHONE_NUMBER_ID"),
            whatsapp_access_token: lookup("WHATSAPP_ACCESS_TOKEN"),
        }
    }

    /// WhatsApp API base URL, defaulting to the public Graph endpoint
    pub fn whatsapp_api_url(&self) -> &str {
        self.whatsapp_api_url
            .as_deref()
            .unwrap_or(DEFAULT_WHATSAPP_API_URL)
    }

    /// Whether both WhatsApp credentials are present
    pub fn has_whatsapp_credentials(&self) -> bool {
        self.whatsapp_phone_number_id.as_deref().map_or(false, |v| !v.is_empty())
            && self.whatsapp_access_token.as_deref().map_or(false, |v| !v.is_empty())
    }
}
