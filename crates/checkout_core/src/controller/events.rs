//! Mapping from submission outcomes to user-facing notifications.

use shared::error::{join_labels, SubmissionFailure, TransportError};

use crate::notify::Notification;

pub const SUCCESS_TITLE: &str = "Order Submitted Successfully!";
pub const SUCCESS_DESCRIPTION: &str = "We'll contact you soon with shipping details.";
pub const SUBMIT_ERROR_TITLE: &str = "Error Submitting Order";
pub const SUBMIT_ERROR_DESCRIPTION: &str = "Please try again later.";
pub const VALIDATION_TITLE: &str = "Missing Order Details";
pub const CONFIGURATION_TITLE: &str = "Ordering Unavailable";
pub const CONFIGURATION_DESCRIPTION: &str =
    "Online ordering is temporarily unavailable. Please contact support to place your order.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Validation,
    Configuration,
    Transport,
}

pub fn classify_failure(failure: &SubmissionFailure) -> FailureCategory {
    match failure {
        SubmissionFailure::ValidationFailed(_) | SubmissionFailure::InvalidQuantity(_) => {
            FailureCategory::Validation
        }
        SubmissionFailure::ConfigurationMissing => FailureCategory::Configuration,
        SubmissionFailure::Transport(_) => FailureCategory::Transport,
    }
}

pub fn success_notification() -> Notification {
    Notification::normal(SUCCESS_TITLE, SUCCESS_DESCRIPTION)
}

pub fn failure_notification(failure: &SubmissionFailure) -> Notification {
    match failure {
        SubmissionFailure::ValidationFailed(fields) => Notification::destructive(
            VALIDATION_TITLE,
            format!("Please fill in: {}.", join_labels(fields)),
        ),
        SubmissionFailure::InvalidQuantity(quantity) => Notification::destructive(
            VALIDATION_TITLE,
            format!("A quantity of {quantity} cannot be ordered. Please lower the quantity."),
        ),
        SubmissionFailure::ConfigurationMissing => {
            Notification::destructive(CONFIGURATION_TITLE, CONFIGURATION_DESCRIPTION)
        }
        SubmissionFailure::Transport(err) => Notification::destructive(
            SUBMIT_ERROR_TITLE,
            format!("{SUBMIT_ERROR_DESCRIPTION} ({})", transport_reason(err)),
        ),
    }
}

fn transport_reason(err: &TransportError) -> String {
    match err {
        TransportError::Status(code) => format!("server responded with status {code}"),
        TransportError::Exchange(reason) => reason.clone(),
    }
}
