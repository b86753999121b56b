use thiserror::Error;

use crate::domain::OrderField;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("malformed price '{0}'")]
    Malformed(String),
    #[error("price must be greater than zero")]
    NotPositive,
    #[error("price is out of range")]
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("product name must not be empty")]
    MissingName,
}

/// Failure reported by the transport for a single exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("endpoint responded with status {0}")]
    Status(u16),
    #[error("{0}")]
    Exchange(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionFailure {
    #[error("missing required fields: {}", join_labels(.0))]
    ValidationFailed(Vec<OrderField>),
    #[error("total price is out of range for quantity {0}")]
    InvalidQuantity(u32),
    #[error("order endpoint is not configured")]
    ConfigurationMissing,
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl SubmissionFailure {
    /// Local failures are detected before any network call is attempted.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            SubmissionFailure::ValidationFailed(_)
                | SubmissionFailure::InvalidQuantity(_)
                | SubmissionFailure::ConfigurationMissing
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success,
    Failed(SubmissionFailure),
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success)
    }

    pub fn failure(&self) -> Option<&SubmissionFailure> {
        match self {
            SubmissionResult::Success => None,
            SubmissionResult::Failed(failure) => Some(failure),
        }
    }
}

impl From<SubmissionFailure> for SubmissionResult {
    fn from(value: SubmissionFailure) -> Self {
        SubmissionResult::Failed(value)
    }
}

impl From<TransportError> for SubmissionResult {
    fn from(value: TransportError) -> Self {
        SubmissionResult::Failed(SubmissionFailure::Transport(value))
    }
}

/// Comma-separated field labels, in the given order.
pub fn join_labels(fields: &[OrderField]) -> String {
    fields
        .iter()
        .map(OrderField::label)
        .collect::<Vec<_>>()
        .join(", ")
}
