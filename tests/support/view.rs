use ratekiosk::FeedbackView;

#[derive(Debug, Default)]
pub struct RecordingView {
    pub controls_enabled: bool,
    pub submitting: bool,
    pub acknowledgment: bool,
    pub countdown: Vec<String>,
    pub failures: Vec<String>,
}

impl FeedbackView for RecordingView {
    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }

    fn show_submitting(&mut self, visible: bool) {
        self.submitting = visible;
    }

    fn show_acknowledgment(&mut self, visible: bool) {
        self.acknowledgment = visible;
    }

    fn set_countdown_text(&mut self, text: &str) {
        self.countdown.push(text.to_string());
    }

    fn notify_failure(&mut self, message: &str) {
        self.failures.push(message.to_string());
    }
}
