use crate::submitter::FeedbackView;

/// Widget state rendered by the kiosk window each frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KioskView {
    /// Whether the rating buttons accept input.
    pub controls_enabled: bool,
    /// Whether the sending spinner is shown.
    pub submitting_visible: bool,
    /// Whether the thank-you panel is shown.
    pub acknowledgment_visible: bool,
    /// Seconds left before the widget resets, as displayed.
    pub countdown_text: String,
    /// Failure message waiting for the visitor to dismiss it.
    pub failure_notice: Option<String>,
}

impl KioskView {
    /// Clear the failure notice once the visitor acknowledges it.
    pub fn dismiss_failure(&mut self) {
        self.failure_notice = None;
    }
}

impl FeedbackView for KioskView {
    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }

    fn show_submitting(&mut self, visible: bool) {
        self.submitting_visible = visible;
        if visible {
            self.failure_notice = None;
        }
    }

    fn show_acknowledgment(&mut self, visible: bool) {
        self.acknowledgment_visible = visible;
    }

    fn set_countdown_text(&mut self, text: &str) {
        self.countdown_text.clear();
        self.countdown_text.push_str(text);
    }

    fn notify_failure(&mut self, message: &str) {
        self.failure_notice = Some(message.to_string());
    }
}
