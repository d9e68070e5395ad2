use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/otp/send`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    #[serde(default)]
    pub phone_number: String,
}

/// Body of `POST /api/v1/otp/verify`
///
/// Absent fields deserialize as empty strings so the handler can report
/// `missing_fields` instead of a JSON error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpResponse {
    pub message: String,
    /// Seconds until the issued code expires
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
