//! The feedback submitter state machine.
//!
//! `Idle -> Submitting -> Acknowledging(n) -> ... -> Idle`, with failures
//! falling straight back to `Idle`. The submitter owns the only busy state,
//! the countdown and the in-flight request slot; the view only ever receives
//! effects.

mod countdown;
mod jobs;
mod state;
mod view;


use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::rating::Rating;
use crate::transport::{RatingTransport, SubmitError};

use countdown::Countdown;
use jobs::{SubmitJobs, SubmitOutcome};

pub use countdown::TICK_INTERVAL;
pub use state::SubmissionState;
pub use view::FeedbackView;

/// Message shown to the visitor for every kind of failure.
pub const FAILURE_NOTICE: &str = "Could not register your rating. Please try again.";

/// Drives one feedback widget: guards submissions, applies view effects and
/// runs the acknowledgment countdown.
pub struct FeedbackSubmitter<V: FeedbackView> {
    view: V,
    jobs: SubmitJobs,
    acknowledgment_seconds: NonZeroU32,
    state: SubmissionState,
    countdown: Option<Countdown>,
}

impl<V: FeedbackView> FeedbackSubmitter<V> {
    /// Create an idle submitter and project the idle state onto `view`.
    pub fn new(
        view: V,
        transport: Arc<dyn RatingTransport>,
        acknowledgment_seconds: NonZeroU32,
    ) -> Self {
        let mut submitter = Self {
            view,
            jobs: SubmitJobs::new(transport),
            acknowledgment_seconds,
            state: SubmissionState::Idle,
            countdown: None,
        };
        submitter.show_idle();
        submitter
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// The view the submitter projects onto.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access for view-local actions such as dismissing a notice.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn acknowledgment_seconds(&self) -> NonZeroU32 {
        self.acknowledgment_seconds
    }

    /// Whether a request is outstanding on the worker thread.
    pub fn is_request_in_flight(&self) -> bool {
        self.jobs.in_flight().is_some()
    }

    /// When the next countdown tick falls due, if a countdown is running.
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.countdown.as_ref().map(Countdown::next_tick)
    }

    /// Start submitting `rating`. Ignored unless idle with no request in flight.
    ///
    /// Returns whether a request was dispatched.
    pub fn submit(&mut self, rating: Rating) -> bool {
        if !self.state.is_idle() || self.is_request_in_flight() {
            tracing::debug!(%rating, state = %self.state, "Ignoring rating while busy");
            return false;
        }
        self.cancel_countdown();
        let Some(id) = self.jobs.begin(rating) else {
            return false;
        };
        self.state = SubmissionState::Submitting;
        self.view.set_controls_enabled(false);
        self.view.show_acknowledgment(false);
        self.view.show_submitting(true);
        tracing::info!(%rating, request = id, "Submitting rating");
        true
    }

    /// Apply any finished requests without blocking.
    pub fn poll(&mut self) {
        while let Some(outcome) = self.jobs.try_recv() {
            self.complete(outcome);
        }
    }

    /// Block up to `timeout` for a finished request and apply it.
    ///
    /// Returns whether a completion was received.
    pub fn wait_for_completion(&mut self, timeout: Duration) -> bool {
        match self.jobs.recv_timeout(timeout) {
            Some(outcome) => {
                self.complete(outcome);
                true
            }
            None => false,
        }
    }

    /// Apply finished requests and every countdown tick due at `now`.
    pub fn advance(&mut self, now: Instant) {
        self.poll();
        while self
            .countdown
            .as_mut()
            .is_some_and(|countdown| countdown.take_due(now))
        {
            self.tick();
        }
    }

    /// One second of the acknowledgment countdown has elapsed.
    ///
    /// A no-op unless a countdown is running.
    pub fn tick(&mut self) {
        let SubmissionState::Acknowledging(remaining) = self.state else {
            tracing::trace!(state = %self.state, "Tick without countdown");
            return;
        };
        if self.countdown.is_none() {
            return;
        }
        let remaining = remaining.saturating_sub(1);
        self.view.set_countdown_text(&remaining.to_string());
        if remaining == 0 {
            self.cancel_countdown();
            self.state = SubmissionState::Idle;
            self.show_idle();
            tracing::debug!("Acknowledgment finished");
        } else {
            self.state = SubmissionState::Acknowledging(remaining);
        }
    }

    /// Cancel any acknowledgment and return to idle.
    ///
    /// An in-flight request keeps the submitter in `Submitting` until it resolves.
    pub fn reset(&mut self) {
        self.cancel_countdown();
        if self.state == SubmissionState::Submitting {
            tracing::debug!("Reset deferred until the in-flight request resolves");
            return;
        }
        self.state = SubmissionState::Idle;
        self.show_idle();
    }

    fn complete(&mut self, outcome: SubmitOutcome) {
        if !self.jobs.finish(outcome.id) {
            tracing::debug!(request = outcome.id, "Dropping stale completion");
            return;
        }
        if self.state != SubmissionState::Submitting {
            tracing::debug!(request = outcome.id, state = %self.state, "Completion outside submit");
            return;
        }
        match outcome.result {
            Ok(()) => self.acknowledge(outcome.rating),
            Err(err) => self.fail(outcome.rating, &err),
        }
    }

    fn acknowledge(&mut self, rating: Rating) {
        let seconds = self.acknowledgment_seconds.get();
        tracing::info!(%rating, seconds, "Rating recorded");
        self.view.show_submitting(false);
        self.view.set_countdown_text(&seconds.to_string());
        self.view.show_acknowledgment(true);
        self.cancel_countdown();
        self.countdown = Some(Countdown::start(Instant::now()));
        self.state = SubmissionState::Acknowledging(seconds);
    }

    fn fail(&mut self, rating: Rating, err: &SubmitError) {
        tracing::warn!(%rating, error = %err, "Rating submission failed");
        self.state = SubmissionState::Idle;
        self.view.show_submitting(false);
        self.view.set_controls_enabled(true);
        self.view.notify_failure(FAILURE_NOTICE);
    }

    fn cancel_countdown(&mut self) {
        self.countdown = None;
    }

    fn show_idle(&mut self) {
        self.view.show_submitting(false);
        self.view.show_acknowledgment(false);
        self.view.set_controls_enabled(true);
    }
}
