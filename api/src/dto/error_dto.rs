use actix_web::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_attempts: Option<u32>,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            remaining_attempts: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_remaining_attempts(mut self, remaining: u32) -> Self {
        self.remaining_attempts = Some(remaining);
        self
    }

    pub fn to_response(&self, status: StatusCode) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(status).json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_attempts_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::new("otp_not_found", "gone")).unwrap();
        assert_eq!(json["error"], "otp_not_found");
        assert!(json.get("remainingAttempts").is_none());
    }

    #[test]
    fn test_remaining_attempts_serialized_in_camel_case() {
        let response = ErrorResponse::new("invalid_otp", "Invalid OTP. 1 attempt remaining.")
            .with_remaining_attempts(1);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["remainingAttempts"], 1);
        assert!(json.get("remaining_attempts").is_none());
    }
}
