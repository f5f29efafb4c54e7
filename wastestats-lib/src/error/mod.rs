//! Error types

mod api;
mod backend;

pub use api::*;
pub use backend::*;

/// Top-level error type for all client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level or protocol-level failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The backend answered with its structured `{error, message}` envelope.
    ///
    /// The backend uses this for application-level outcomes (for example
    /// "No similar LGAs found"), sometimes with a 200 status, so it is kept
    /// distinct from HTTP failures.
    #[error("Backend error: {0}")]
    Backend(BackendError),
}

impl Error {
    /// Returns the backend error detail if this is a backend error.
    pub fn backend_detail(&self) -> Option<&BackendError> {
        match self {
            Self::Backend(detail) => Some(detail),
            Self::Api(_) => None,
        }
    }
}
