//! State of a single waitlist form.
//!
//! ```text
//! Idle --submit--> Pending --2xx-----------> Success (email cleared)
//!                     `----non-2xx/error---> Failed  (email kept)
//! Failed/Success --submit--> Pending
//! ```
//!
//! Every attempt gets a sequence number; only the outcome of the most recently
//! issued attempt is ever applied, whatever order the responses come back in.

use crate::domain::WaitlistEmail;
use crate::waitlist_client::SubmitError;
use crate::waitlist_client::WaitlistClient;

pub const SUBMIT_LABEL: &str = "Request access";
pub const PENDING_LABEL: &str = "Submitting...";
pub const SUCCESS_MESSAGE: &str = "Thank you! We'll be in touch soon.";
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// What went wrong, for the logs. Visitors see `FAILURE_MESSAGE` regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Never sent; the input would not pass `type=email required`
    Validation,
    /// Endpoint answered with a non-2xx status
    Rejected(u16),
    /// No response at all
    Network,
}

impl From<&SubmitError> for FailureKind {
    fn from(e: &SubmitError) -> Self {
        match e {
            SubmitError::Rejected(status) => Self::Rejected(status.as_u16()),
            SubmitError::Network(_) => Self::Network,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Failed(FailureKind),
}

/// A single submission, handed out by `WaitlistForm::begin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    seq: u64,
    email: WaitlistEmail,
}

impl Attempt {
    pub fn seq(&self) -> u64 { self.seq }

    pub fn email(&self) -> &WaitlistEmail { &self.email }
}

/// One waitlist form (one per page view). Nothing is shared between
/// instances and nothing outlives the instance.
#[derive(Debug, Default)]
pub struct WaitlistForm {
    email: String,
    status: SubmissionStatus,
    /// Sequence number of the most recently issued attempt (0: none yet)
    latest_seq: u64,
}

impl WaitlistForm {
    pub fn new() -> Self { Self::default() }

    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn email(&self) -> &str { &self.email }

    pub fn status(&self) -> SubmissionStatus { self.status }

    /// The input is disabled while an attempt is in flight, so edits are
    /// dropped until it resolves.
    pub fn set_email(
        &mut self,
        email: impl Into<String>,
    ) {
        if !self.is_disabled() {
            self.email = email.into();
        }
    }

    /// Start a new attempt for the current email.
    ///
    /// Returns `None` (and issues nothing) while another attempt is pending,
    /// or when the email would not get past the input's own constraints; the
    /// latter marks the form `Failed(Validation)`.
    pub fn begin(&mut self) -> Option<Attempt> {
        if self.status == SubmissionStatus::Pending {
            tracing::debug!("submit ignored, an attempt is already pending");
            return None;
        }

        let email = match WaitlistEmail::parse(self.email.clone()) {
            Ok(email) => email,
            Err(e) => {
                tracing::warn!(error.message = %e, "waitlist email failed validation");
                self.status = SubmissionStatus::Failed(FailureKind::Validation);
                return None;
            }
        };

        self.latest_seq += 1;
        self.status = SubmissionStatus::Pending;
        Some(Attempt {
            seq: self.latest_seq,
            email,
        })
    }

    /// Apply the outcome of attempt `seq`. Outcomes of anything but the latest
    /// attempt are discarded; returns whether this one was applied.
    pub fn resolve(
        &mut self,
        seq: u64,
        outcome: Result<(), SubmitError>,
    ) -> bool {
        if seq != self.latest_seq {
            tracing::warn!(
                seq,
                latest_seq = self.latest_seq,
                "discarding outcome of a superseded waitlist attempt"
            );
            return false;
        }

        match outcome {
            Ok(()) => {
                tracing::info!("waitlist submission accepted");
                self.status = SubmissionStatus::Success;
                self.email.clear();
            }
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "waitlist submission failed"
                );
                self.status = SubmissionStatus::Failed(FailureKind::from(&e));
            }
        }
        true
    }

    /// Give up on whatever is in flight: back to Idle with the email kept. A
    /// late outcome of the abandoned attempt is treated as stale.
    pub fn reset(&mut self) {
        if self.status == SubmissionStatus::Pending {
            self.latest_seq += 1;
        }
        self.status = SubmissionStatus::Idle;
    }

    /// `begin`, one request, `resolve`. A no-op while already pending.
    #[tracing::instrument(
        name = "Submitting waitlist form",
        skip(self, client),
        fields(email = %self.email)
    )]
    pub async fn submit(
        &mut self,
        client: &WaitlistClient,
    ) -> SubmissionStatus {
        let Some(attempt) = self.begin() else {
            return self.status;
        };
        let outcome = client.submit_email(attempt.email()).await;
        self.resolve(attempt.seq(), outcome);
        self.status
    }

    pub fn is_disabled(&self) -> bool { self.status == SubmissionStatus::Pending }

    pub fn button_label(&self) -> &'static str {
        match self.status {
            SubmissionStatus::Pending => PENDING_LABEL,
            _ => SUBMIT_LABEL,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self.status {
            SubmissionStatus::Success => Some(SUCCESS_MESSAGE),
            SubmissionStatus::Failed(_) => Some(FAILURE_MESSAGE),
            SubmissionStatus::Idle | SubmissionStatus::Pending => None,
        }
    }
}
