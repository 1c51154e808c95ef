use std::fmt::Debug;
use std::time::Duration;

use reqwest::Client;
use reqwest::StatusCode;
use serde::Serialize;

use crate::domain::WaitlistEmail;
use crate::utils::error_chain_fmt;

/// Why the collection endpoint did not take the email. The form shows the
/// same message for both; the distinction only ends up in the logs.
#[derive(thiserror::Error)]
pub enum SubmitError {
    #[error("Collection endpoint rejected the submission ({0})")]
    Rejected(StatusCode),
    #[error("Could not reach the collection endpoint")]
    Network(#[source] reqwest::Error),
}

impl Debug for SubmitError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Client end of the (external) collection endpoint.
///
/// Establishing a HTTP connection is expensive, so a single `Client` is built
/// once and shared (via `web::Data`) by every worker; `Client::clone` only
/// clones an `Arc`.
#[derive(Clone, Debug)]
pub struct WaitlistClient {
    http_client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct SubmitEmailRequest<'a> {
    email: &'a str,
}

impl WaitlistClient {
    /// `timeout: None` leaves the request unbounded; it only fails when the
    /// transport gives up.
    pub fn new(
        base_url: String,
        submit_path: String,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let endpoint = match submit_path.starts_with('/') {
            true => format!("{}{submit_path}", base_url.trim_end_matches('/')),
            false => format!("{}/{submit_path}", base_url.trim_end_matches('/')),
        };
        Ok(Self {
            http_client: builder.build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str { &self.endpoint }

    /// `POST {"email": ...}` to the collection endpoint. Any 2xx is success;
    /// the response body is never read.
    ///
    /// No retries, no idempotency key: calling this twice sends two requests.
    #[tracing::instrument(
        name = "Submitting email to collection endpoint",
        skip(self),
        fields(endpoint = %self.endpoint),
    )]
    pub async fn submit_email(
        &self,
        email: &WaitlistEmail,
    ) -> Result<(), SubmitError> {
        let body = SubmitEmailRequest {
            email: email.as_ref(),
        };

        // `.json` also sets `Content-Type: application/json`
        let resp = self
            .http_client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(SubmitError::Network)?;

        match resp.status() {
            s if s.is_success() => Ok(()),
            s => Err(SubmitError::Rejected(s)),
        }
    }
}
