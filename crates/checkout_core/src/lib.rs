//! Order capture for the single-product storefront: draft editing, validation,
//! and single-flight submission to the order-intake endpoint.

pub mod config;
pub mod controller;
pub mod gallery;
pub mod notify;
pub mod transport;

pub use config::{resolve_endpoint, Settings};
pub use controller::{ControllerError, OrderFormController, SubmissionState};
pub use gallery::MediaGallery;
pub use notify::{Notification, NotificationSink, Severity, TracingNotificationSink};
pub use transport::{OrderSubmissionClient, OrderTransport};
