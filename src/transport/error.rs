/// Why a submission did not succeed.
///
/// The submitter treats every variant the same way; the split exists for logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The request never produced a response (unreachable host, timeout, broken read).
    #[error("Transport error: {0}")]
    Transport(String),
    /// The endpoint answered and refused the rating.
    #[error("Rating rejected: {0}")]
    Application(String),
    /// The endpoint answered with something that could not be understood.
    #[error("Unexpected response: {0}")]
    Protocol(String),
}
