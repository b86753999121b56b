use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::{SubmissionResult, TransportError},
    protocol::OrderRequest,
};
use tracing::{info, warn};
use url::Url;

/// One outbound exchange with the order-intake endpoint.
///
/// Implementations never fail past this boundary: every transport outcome is
/// folded into the returned [`SubmissionResult`]. No retries, no queuing.
#[async_trait]
pub trait OrderTransport: Send + Sync {
    async fn submit(&self, endpoint: &Url, request: &OrderRequest) -> SubmissionResult;
}

/// Posts orders as `application/x-www-form-urlencoded` bodies.
#[derive(Debug, Clone, Default)]
pub struct OrderSubmissionClient {
    http: Client,
}

impl OrderSubmissionClient {
    pub fn new() -> Self {
        Self::with_http_client(Client::new())
    }

    pub fn with_http_client(http: Client) -> Self {
        Self { http }
    }

    async fn post_form(&self, endpoint: &Url, request: &OrderRequest) -> Result<(), TransportError> {
        let response = self
            .http
            .post(endpoint.clone())
            .form(request)
            .send()
            .await
            .map_err(|err| TransportError::Exchange(describe_reqwest_error(&err)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderTransport for OrderSubmissionClient {
    async fn submit(&self, endpoint: &Url, request: &OrderRequest) -> SubmissionResult {
        match self.post_form(endpoint, request).await {
            Ok(()) => {
                info!(
                    host = endpoint.host_str().unwrap_or_default(),
                    quantity = request.quantity,
                    total_price = %request.total_price,
                    "order accepted by endpoint"
                );
                SubmissionResult::Success
            }
            Err(err) => {
                warn!(
                    host = endpoint.host_str().unwrap_or_default(),
                    error = %err,
                    "order submission failed"
                );
                err.into()
            }
        }
    }
}

fn describe_reqwest_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "failed to connect to order endpoint".to_string()
    } else if err.is_builder() {
        format!("failed to build order request: {err}")
    } else {
        err.to_string()
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
