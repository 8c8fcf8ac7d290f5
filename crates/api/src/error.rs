//! The error taxonomy of the API collaborator.

/// Errors reported by implementations of
/// [`PatientTreatmentApi`](crate::PatientTreatmentApi).
///
/// Controllers treat these uniformly: read failures are logged and leave
/// prior state in place, write failures surface a user notification. No
/// variant is ever fatal to the application.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered with an unexpected status code.
    #[error("unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// The response body could not be decoded into the expected model.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Shorthand for results produced by the API collaborator.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
