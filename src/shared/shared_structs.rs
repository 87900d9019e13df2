// src/shared/shared_structs.rs

use serde::Serialize;

/// Generic envelope used to standardise every API response.
/// `T` is the body type, which may be absent.
#[derive(Serialize)]
pub struct GenericResponse<T> {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")] // Omit `body` when there is none
    pub body: Option<T>,
}

impl<T> GenericResponse<T> {
    /// Builds a `"success"` envelope carrying `body`.
    pub fn success(message: impl Into<String>, body: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            body: Some(body),
        }
    }
}

impl GenericResponse<()> {
    /// Builds a body-less envelope with the given status category.
    pub fn bare(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
            body: None,
        }
    }
}
