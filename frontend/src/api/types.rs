use leptos::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
pub const REQUEST_FAILED: &str = "REQUEST_FAILED";
pub const BUSY: &str = "BUSY";
pub const UNKNOWN: &str = "UNKNOWN";

/// Admin account as stored by the backend. `uid` is backend-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRecord {
    pub uid: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl AdminRecord {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Photo URL, treating the empty string the backend stores for
    /// "no photo" the same as a missing field.
    pub fn photo(&self) -> Option<&str> {
        self.photo_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "photoURL")]
    pub photo_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveAdminRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminRequest {
    pub uid: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "photoURL")]
    pub photo_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            details: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, VALIDATION_ERROR)
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::with_code(msg, UNAUTHENTICATED)
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::with_code(msg, REQUEST_FAILED)
    }

    pub fn busy(msg: impl Into<String>) -> Self {
        Self::with_code(msg, BUSY)
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, UNKNOWN)
    }

    /// Builds the error for a non-success response. The backend payload wins
    /// when it carries a message; otherwise the status is reported.
    pub fn from_failed_response(status: u16, body: &str) -> Self {
        let trimmed = body.trim();
        let parsed = serde_json::from_str::<Value>(trimmed).ok();
        let message = parsed
            .as_ref()
            .and_then(payload_message)
            .or_else(|| {
                (parsed.is_none() && !trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        Self {
            error: message,
            code: REQUEST_FAILED.to_string(),
            details: parsed,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.code == VALIDATION_ERROR
    }
}

fn payload_message(payload: &Value) -> Option<String> {
    match payload {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Object(map) => ["error", "message", "detail"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|text| !text.is_empty())
            .map(str::to_string),
        _ => None,
    }
}
