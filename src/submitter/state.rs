use std::fmt;

/// Lifecycle of the feedback widget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// Waiting for a rating; controls are enabled.
    #[default]
    Idle,
    /// One request is in flight; controls are disabled.
    Submitting,
    /// Confirmation is showing; the value is the seconds left on the countdown.
    Acknowledging(u32),
}

impl SubmissionState {
    /// Whether the widget is waiting for a rating.
    pub fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether rating controls accept input in this state.
    pub fn controls_enabled(self) -> bool {
        self.is_idle()
    }

    /// Seconds left on the acknowledgment countdown, if one is showing.
    pub fn seconds_remaining(self) -> Option<u32> {
        match self {
            Self::Acknowledging(seconds) => Some(seconds),
            _ => None,
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Submitting => f.write_str("submitting"),
            Self::Acknowledging(seconds) => write!(f, "acknowledging ({seconds}s)"),
        }
    }
}
