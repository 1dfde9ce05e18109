/// UI effects the submitter drives.
///
/// The submitter never reads from the view; everything shown is a projection
/// of its state. The kiosk window implements this for egui and tests use a
/// recording double.
pub trait FeedbackView {
    /// Enable or disable (and undim or dim) every rating control.
    fn set_controls_enabled(&mut self, enabled: bool);
    /// Show or hide the in-flight indicator.
    fn show_submitting(&mut self, visible: bool);
    /// Show or hide the acknowledgment panel.
    fn show_acknowledgment(&mut self, visible: bool);
    /// Replace the countdown text inside the acknowledgment panel.
    fn set_countdown_text(&mut self, text: &str);
    /// Surface a failed submission to the visitor.
    fn notify_failure(&mut self, message: &str);
}
