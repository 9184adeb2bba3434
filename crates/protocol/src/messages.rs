use serde::{Deserialize, Serialize};

use crate::constants::{INVALID_STATUS_ERROR, USAGE_GET, USAGE_POST};
use crate::types::Status;

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// JSON body accepted by `POST /set-messenger-icon`.
///
/// The token is kept as raw text so an unrecognised value can be reported
/// back instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SetStatusRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl SetStatusRequest {
    pub fn new(status: Status) -> Self {
        Self {
            status: Some(status.as_str().to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// Success payload of the set-status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetStatusResponse {
    pub success: bool,
    pub status: Status,
    pub message: String,
}

impl SetStatusResponse {
    /// Builds the payload describing an accepted status.
    pub fn accepted(status: Status) -> Self {
        let message = match status {
            Status::Read => "Icon set to grayscale (read)",
            Status::Unread => "Icon set to colored (unread)",
        };
        Self {
            success: true,
            status,
            message: message.into(),
        }
    }
}

/// Usage hint listing both request conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(rename = "GET")]
    pub get: String,
    #[serde(rename = "POST")]
    pub post: String,
}

impl Default for Usage {
    fn default() -> Self {
        Self {
            get: USAGE_GET.into(),
            post: USAGE_POST.into(),
        }
    }
}

/// Client-error payload returned for a missing or invalid status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub usage: Usage,
}

impl ErrorResponse {
    pub fn invalid_status() -> Self {
        Self {
            success: false,
            error: INVALID_STATUS_ERROR.into(),
            usage: Usage::default(),
        }
    }
}

/// Payload of `GET /status`.
///
/// `current_status` is `None` until the first report arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub success: bool,
    pub current_status: Option<Status>,
    pub port: u16,
}
