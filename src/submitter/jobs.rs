use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{
        Arc,
        mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError},
    },
    thread,
    time::Duration,
};

use crate::rating::Rating;
use crate::transport::{RatingTransport, SubmitError};

/// Outcome of one dispatched request, reported by the worker thread.
#[derive(Debug)]
pub(crate) struct SubmitOutcome {
    pub(crate) id: u64,
    pub(crate) rating: Rating,
    pub(crate) result: Result<(), SubmitError>,
}

/// Runs rating requests off the UI loop and hands results back over a channel.
pub(crate) struct SubmitJobs {
    transport: Arc<dyn RatingTransport>,
    message_tx: Sender<SubmitOutcome>,
    message_rx: Receiver<SubmitOutcome>,
    in_flight: Option<u64>,
    next_id: u64,
}

impl SubmitJobs {
    pub(crate) fn new(transport: Arc<dyn RatingTransport>) -> Self {
        let (message_tx, message_rx) = mpsc::channel();
        Self {
            transport,
            message_tx,
            message_rx,
            in_flight: None,
            next_id: 1,
        }
    }

    pub(crate) fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Spawn the request for `rating`; returns `None` while another is outstanding.
    pub(crate) fn begin(&mut self, rating: Rating) -> Option<u64> {
        if self.in_flight.is_some() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.in_flight = Some(id);
        let transport = Arc::clone(&self.transport);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = catch_unwind(AssertUnwindSafe(|| transport.send(rating)))
                .unwrap_or_else(|payload| Err(SubmitError::Transport(panic_to_string(payload))));
            let _ = tx.send(SubmitOutcome { id, rating, result });
        });
        Some(id)
    }

    /// Release the in-flight slot if `id` holds it. Returns whether it did.
    pub(crate) fn finish(&mut self, id: u64) -> bool {
        if self.in_flight == Some(id) {
            self.in_flight = None;
            return true;
        }
        false
    }

    pub(crate) fn try_recv(&self) -> Option<SubmitOutcome> {
        match self.message_rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    pub(crate) fn recv_timeout(&self, timeout: Duration) -> Option<SubmitOutcome> {
        match self.message_rx.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

fn panic_to_string(payload: Box<dyn std::any::Any + Send>) -> String {
    let message = if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Unknown panic payload".to_string()
    };
    format!("Rating transport panicked: {message}")
}
