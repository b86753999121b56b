//! Order dialog controller: owns the draft and drives the submission state machine.

pub mod events;

use std::sync::Arc;

use chrono::Utc;
use shared::{
    domain::{OrderDraft, OrderField, Price, Product},
    error::{SubmissionFailure, SubmissionResult, TransportError},
    protocol::OrderRequest,
};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::{
    controller::events::{classify_failure, failure_notification, success_notification},
    notify::NotificationSink,
    transport::OrderTransport,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Failed(SubmissionFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("an order submission is already in progress")]
    SubmissionInFlight,
}

struct DialogSession {
    draft: OrderDraft,
    state: SubmissionState,
    dialog_open: bool,
}

impl DialogSession {
    fn ensure_editable(&mut self) -> Result<(), ControllerError> {
        match self.state {
            SubmissionState::Submitting => Err(ControllerError::SubmissionInFlight),
            SubmissionState::Failed(_) => {
                self.state = SubmissionState::Idle;
                Ok(())
            }
            SubmissionState::Idle => Ok(()),
        }
    }
}

/// Single source of truth for one order dialog session.
///
/// At most one request is in flight per controller: `submit` is a no-op
/// while a previous submission is still pending. A started submission runs
/// to completion even if the caller stops awaiting it.
pub struct OrderFormController {
    product: Product,
    endpoint: Option<Url>,
    transport: Arc<dyn OrderTransport>,
    notifications: Arc<dyn NotificationSink>,
    session: Arc<Mutex<DialogSession>>,
}

impl OrderFormController {
    pub fn new(
        product: Product,
        endpoint: Option<Url>,
        transport: Arc<dyn OrderTransport>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            product,
            endpoint,
            transport,
            notifications,
            session: Arc::new(Mutex::new(DialogSession {
                draft: OrderDraft::default(),
                state: SubmissionState::Idle,
                dialog_open: false,
            })),
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub async fn open_dialog(&self) {
        self.session.lock().await.dialog_open = true;
    }

    /// Closing keeps the draft so reopening shows what was entered.
    pub async fn close_dialog(&self) {
        self.session.lock().await.dialog_open = false;
    }

    pub async fn is_dialog_open(&self) -> bool {
        self.session.lock().await.dialog_open
    }

    pub async fn draft(&self) -> OrderDraft {
        self.session.lock().await.draft.clone()
    }

    pub async fn state(&self) -> SubmissionState {
        self.session.lock().await.state.clone()
    }

    pub async fn is_submitting(&self) -> bool {
        self.session.lock().await.state == SubmissionState::Submitting
    }

    /// Live total for the current quantity.
    pub async fn total_price(&self) -> Option<Price> {
        let quantity = self.session.lock().await.draft.quantity();
        self.product.unit_price().times(quantity)
    }

    pub async fn update_field(
        &self,
        field: OrderField,
        value: impl Into<String>,
    ) -> Result<(), ControllerError> {
        let mut session = self.session.lock().await;
        session.ensure_editable()?;
        session.draft.set_field(field, value);
        Ok(())
    }

    /// Adds `delta` to the quantity, clamped to a floor of 1.
    pub async fn set_quantity(&self, delta: i64) -> Result<u32, ControllerError> {
        let mut session = self.session.lock().await;
        session.ensure_editable()?;
        session.draft.adjust_quantity(delta);
        Ok(session.draft.quantity())
    }

    /// Validates and submits the draft.
    ///
    /// Returns `None` when ignored because a submission is already pending.
    pub async fn submit(&self) -> Option<SubmissionResult> {
        let (endpoint, request) = {
            let mut session = self.session.lock().await;
            if session.state == SubmissionState::Submitting {
                debug!("submit ignored: order submission already in flight");
                return None;
            }

            match self.prepare(&session.draft) {
                Ok(prepared) => {
                    session.state = SubmissionState::Submitting;
                    prepared
                }
                Err(failure) => {
                    warn!(
                        error = %failure,
                        category = ?classify_failure(&failure),
                        local = failure.is_local(),
                        "order rejected before submission"
                    );
                    session.state = SubmissionState::Failed(failure.clone());
                    drop(session);
                    self.notifications.notify(failure_notification(&failure));
                    return Some(SubmissionResult::Failed(failure));
                }
            }
        };

        info!(
            quantity = request.quantity,
            total_price = %request.total_price,
            "submitting order"
        );

        // Completes and leaves `Submitting` even if this future is dropped.
        let exchange = tokio::spawn(complete_submission(
            self.transport.clone(),
            self.session.clone(),
            self.notifications.clone(),
            endpoint,
            request,
        ));

        match exchange.await {
            Ok(result) => Some(result),
            Err(err) => {
                error!(error = %err, "order submission task did not complete");
                let failure = SubmissionFailure::Transport(TransportError::Exchange(
                    "order submission was interrupted".to_string(),
                ));
                self.session.lock().await.state = SubmissionState::Failed(failure.clone());
                self.notifications.notify(failure_notification(&failure));
                Some(SubmissionResult::Failed(failure))
            }
        }
    }

    fn prepare(&self, draft: &OrderDraft) -> Result<(Url, OrderRequest), SubmissionFailure> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(SubmissionFailure::ValidationFailed(missing));
        }

        let endpoint = self
            .endpoint
            .clone()
            .ok_or(SubmissionFailure::ConfigurationMissing)?;

        let request = OrderRequest::from_draft(draft, &self.product, Utc::now())?;
        Ok((endpoint, request))
    }
}

async fn complete_submission(
    transport: Arc<dyn OrderTransport>,
    session: Arc<Mutex<DialogSession>>,
    notifications: Arc<dyn NotificationSink>,
    endpoint: Url,
    request: OrderRequest,
) -> SubmissionResult {
    let result = transport.submit(&endpoint, &request).await;

    let mut session = session.lock().await;
    match &result {
        SubmissionResult::Success => {
            session.draft.reset();
            session.dialog_open = false;
            session.state = SubmissionState::Idle;
            drop(session);
            info!("order submitted; draft reset");
            notifications.notify(success_notification());
        }
        SubmissionResult::Failed(failure) => {
            session.state = SubmissionState::Failed(failure.clone());
            drop(session);
            warn!(
                error = %failure,
                category = ?classify_failure(failure),
                local = failure.is_local(),
                "order submission failed; draft kept"
            );
            notifications.notify(failure_notification(failure));
        }
    }

    result
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
