//! Backend error envelope

use serde::Deserialize;

/// Structured error information from backend responses.
///
/// The backend reports application-level failures as a JSON body of the form
/// `{"error": "...", "message": "..."}`. The `message` field is optional and,
/// when present, carries the user-facing explanation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendError {
    /// Short error label (e.g. "No similar LGAs found").
    pub error: String,
    /// Longer user-facing explanation, if provided.
    #[serde(default)]
    pub message: Option<String>,
}

impl BackendError {
    /// Creates a new backend error detail.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    /// Creates a new backend error detail with an explanation.
    pub fn with_message(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: Some(message.into()),
        }
    }

    /// Returns the most descriptive text available for display.
    pub fn display_message(&self) -> &str {
        self.message.as_deref().unwrap_or(&self.error)
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.error, message),
            None => write!(f, "{}", self.error),
        }
    }
}
