use serde::{Deserialize, Serialize};

/// Envelope wrapped around every JSON body the backend returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse<T> {
    pub success: bool,
    pub message: String,
    pub response_object: Option<T>,
    pub status_code: u16,
}

impl<T> ServiceResponse<T> {
    pub fn success(message: impl Into<String>, response_object: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            response_object: Some(response_object),
            status_code: 200,
        }
    }

    pub fn failure(message: impl Into<String>, response_object: Option<T>, status_code: u16) -> Self {
        Self {
            success: false,
            message: message.into(),
            response_object,
            status_code,
        }
    }
}

/// Details attached to a failure envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}
