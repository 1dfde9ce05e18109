//! Library exports for the kiosk binary and integration tests.
/// Application directory resolution.
pub mod app_dirs;
/// Kiosk configuration.
pub mod config;
pub(crate) mod http_client;
/// egui kiosk window.
pub mod kiosk;
/// Logging setup.
pub mod logging;
/// Ratings offered to visitors.
pub mod rating;
/// Feedback submitter state machine.
pub mod submitter;
/// Rating delivery to the endpoint.
pub mod transport;

pub use rating::Rating;
pub use submitter::{FeedbackSubmitter, FeedbackView, SubmissionState};
