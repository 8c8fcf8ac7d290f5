//! Error types for the controllers.

use ptui_api::ApiError;

/// Local validation failures that block a submission.
///
/// These never reach the network: the submit operation marks the form
/// controls as touched so the validation messages render, and returns one of
/// these instead of calling the API collaborator.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("a name is required")]
    MissingName,
    #[error("the name exceeds {max} characters")]
    NameTooLong { max: usize },
    #[error("the status before the treatment is required")]
    MissingBeforeStatus,
    #[error("the expected status after the treatment is required")]
    MissingExpectedStatus,
    #[error("at least one treatment action must be selected")]
    NoActionSelected,
}

/// The outcome of a form submission that did not produce an entity.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The form is invalid; nothing was sent.
    #[error(transparent)]
    Form(#[from] FormError),

    /// The API collaborator rejected or failed the write.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Invalid startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("the page size must be greater than zero")]
    InvalidPageSize,
    #[error("the retry delay window must be a non-empty range")]
    InvalidRetryWindow,
    #[error("invalid value for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
}
