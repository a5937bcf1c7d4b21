//! The polling state machine.
//!
//! One iteration fetches statuses newer than the watermark, validates the
//! payload, extracts a message from the most recent record and, if the
//! message is new, delivers it. The watermark and the remembered message
//! only move after a confirmed delivery, so a status change is never lost
//! to a transient Telegram failure.

use crate::notifier::{MessageSender, Notifier};
use hwstatus_api::{current_date, extract, validate, StatusSource};
use hwstatus_common::{format_watermark, HomeworkError, Result, Watermark};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Mutable state carried between iterations. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// Statuses changed after this point are requested.
    pub watermark: Watermark,
    /// Last status message that reached the chat.
    pub last_notified_message: Option<String>,
    /// Last failure text forwarded to the chat.
    pub last_error_message: Option<String>,
}

impl PollState {
    /// Fresh state starting from `watermark`.
    pub const fn new(watermark: Watermark) -> Self {
        Self {
            watermark,
            last_notified_message: None,
            last_error_message: None,
        }
    }

    /// Fresh state starting from the current time.
    pub fn starting_now() -> Self {
        Self::new(Watermark::now())
    }
}

/// What a single iteration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IterationOutcome {
    /// The API reported nothing new.
    NoUpdates,
    /// A new status message was delivered and the watermark moved.
    Notified {
        /// The watermark for the next request.
        watermark: Watermark,
    },
    /// The message equals the last delivered one and was not sent.
    Duplicate,
    /// The message could not be delivered; it will be retried.
    DeliveryFailed,
    /// Fetching, validation or extraction failed.
    Failed {
        /// Text of the failure notification.
        message: String,
        /// Whether that text reached the chat during this iteration.
        reported: bool,
    },
}

/// Chat text for an iteration failure.
pub fn failure_message(error: &HomeworkError) -> String {
    format!("Возникла ошибка {error}")
}

/// Poll loop over a status source and a message transport.
pub struct PollLoop<S, M> {
    source: S,
    notifier: Notifier<M>,
    state: PollState,
    retry_period: Duration,
}

impl<S, M> PollLoop<S, M>
where
    S: StatusSource,
    M: MessageSender,
{
    /// Creates a loop whose watermark starts at the current time.
    pub fn new(source: S, notifier: Notifier<M>, retry_period: Duration) -> Self {
        Self::with_state(source, notifier, retry_period, PollState::starting_now())
    }

    /// Creates a loop resuming from `state`.
    pub const fn with_state(
        source: S,
        notifier: Notifier<M>,
        retry_period: Duration,
        state: PollState,
    ) -> Self {
        Self {
            source,
            notifier,
            state,
            retry_period,
        }
    }

    /// Current state.
    pub const fn state(&self) -> &PollState {
        &self.state
    }

    /// The notifier used for deliveries.
    pub const fn notifier(&self) -> &Notifier<M> {
        &self.notifier
    }

    /// Runs iterations forever, sleeping `retry_period` after each one
    /// whatever its outcome.
    pub async fn run(mut self) {
        info!(
            retry_period_secs = self.retry_period.as_secs(),
            "Polling from {}",
            format_watermark(self.state.watermark)
        );

        loop {
            let outcome = self.run_iteration().await;
            debug!(?outcome, "Iteration finished");
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// Runs a single iteration. Never fails; errors become
    /// [`IterationOutcome::Failed`].
    pub async fn run_iteration(&mut self) -> IterationOutcome {
        match self.poll_once().await {
            Ok(outcome) => outcome,
            Err(e) => self.report_failure(&e).await,
        }
    }

    async fn poll_once(&mut self) -> Result<IterationOutcome> {
        let raw = self.source.fetch_statuses(self.state.watermark).await?;
        let records = validate(&raw)?;

        let Some(message) = extract(records)? else {
            debug!("Nothing new, no message sent");
            return Ok(IterationOutcome::NoUpdates);
        };

        if self.state.last_notified_message.as_deref() == Some(message.as_str()) {
            debug!("Status message unchanged since last delivery, skipping");
            return Ok(IterationOutcome::Duplicate);
        }

        if !self.notifier.notify(&message).await {
            warn!("Status message not delivered; watermark stays at {}", self.state.watermark);
            return Ok(IterationOutcome::DeliveryFailed);
        }

        let watermark = current_date(&raw).unwrap_or_else(Watermark::now);
        info!(
            from = %self.state.watermark,
            to = %watermark,
            "Status change delivered, advancing watermark"
        );
        self.state.watermark = watermark;
        self.state.last_notified_message = Some(message);

        Ok(IterationOutcome::Notified { watermark })
    }

    async fn report_failure(&mut self, e: &HomeworkError) -> IterationOutcome {
        error!(error = ?e, "Polling iteration failed: {}", e);

        let message = failure_message(e);
        if self.state.last_error_message.as_deref() == Some(message.as_str()) {
            debug!("Same failure as last time, not notifying again");
            return IterationOutcome::Failed {
                message,
                reported: false,
            };
        }

        let reported = self.notifier.notify(&message).await;
        self.state.last_error_message = Some(message.clone());

        IterationOutcome::Failed { message, reported }
    }
}
