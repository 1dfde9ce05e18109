//! egui shell hosting one feedback widget.

mod view;

use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui::{self, Align2, Color32, RichText};

use crate::config::KioskConfig;
use crate::rating::Rating;
use crate::submitter::{FeedbackSubmitter, SubmissionState};
use crate::transport::RatingTransport;

pub use view::KioskView;

/// Minimum window size that still fits the three rating buttons.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(820.0, 480.0);

/// How often the frame loop checks for a finished request.
const POLL_INTERVAL: Duration = Duration::from_millis(50);
const BUTTON_SIZE: egui::Vec2 = egui::vec2(240.0, 140.0);
const BUTTON_GAP: f32 = 24.0;

/// Renders the rating buttons and drives the submitter from the frame loop.
pub struct KioskApp {
    submitter: FeedbackSubmitter<KioskView>,
    prompt: String,
    visuals_set: bool,
}

impl KioskApp {
    /// Create the app for the configured endpoint.
    pub fn new(config: &KioskConfig) -> Self {
        let transport: Arc<dyn RatingTransport> = Arc::new(config.build_transport());
        Self::with_transport(config, transport)
    }

    /// Create the app with a caller-supplied transport.
    pub fn with_transport(config: &KioskConfig, transport: Arc<dyn RatingTransport>) -> Self {
        Self {
            submitter: FeedbackSubmitter::new(
                KioskView::default(),
                transport,
                config.acknowledgment_seconds,
            ),
            prompt: config.display.prompt.clone(),
            visuals_set: false,
        }
    }

    /// Current state of the hosted widget.
    pub fn state(&self) -> SubmissionState {
        self.submitter.state()
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = Color32::from_rgb(16, 16, 16);
        visuals.window_fill = Color32::from_rgb(24, 24, 24);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn accepting_input(&self) -> bool {
        self.submitter.state().controls_enabled()
            && self.submitter.view().failure_notice.is_none()
    }

    fn keyboard_rating(&self, ctx: &egui::Context) -> Option<Rating> {
        ctx.input(|input| {
            [egui::Key::Num1, egui::Key::Num2, egui::Key::Num3]
                .into_iter()
                .filter(|key| input.key_pressed(*key))
                .find_map(rating_for_key)
        })
    }

    fn render_ratings(&self, ui: &mut egui::Ui) -> Option<Rating> {
        let enabled = self.accepting_input();
        let mut picked = None;
        ui.horizontal(|ui| {
            let count = Rating::ALL.len() as f32;
            let row_width = BUTTON_SIZE.x * count + BUTTON_GAP * (count - 1.0);
            ui.add_space(((ui.available_width() - row_width) / 2.0).max(0.0));
            for (index, rating) in Rating::ALL.into_iter().enumerate() {
                if index > 0 {
                    ui.add_space(BUTTON_GAP);
                }
                let caption = format!("{}\n\n[{}]", rating.label(), index + 1);
                let button =
                    egui::Button::new(RichText::new(caption).size(26.0)).min_size(BUTTON_SIZE);
                if ui.add_enabled(enabled, button).clicked() {
                    picked = Some(rating);
                }
            }
        });
        picked
    }

    fn render_progress(&self, ui: &mut egui::Ui) {
        let view = self.submitter.view();
        if view.submitting_visible {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new().size(28.0));
                ui.label(RichText::new("Sending your rating…").size(22.0));
            });
        }
        if view.acknowledgment_visible {
            ui.label(
                RichText::new("Thank you for your feedback!")
                    .size(34.0)
                    .color(Color32::from_rgb(96, 200, 140)),
            );
            ui.label(
                RichText::new(format!("Ready again in {}s", view.countdown_text))
                    .size(20.0)
                    .color(Color32::from_gray(170)),
            );
        }
    }

    fn render_failure_notice(&mut self, ctx: &egui::Context) {
        let Some(message) = self.submitter.view().failure_notice.clone() else {
            return;
        };
        let mut dismissed = ctx.input(|input| {
            input.key_pressed(egui::Key::Enter) || input.key_pressed(egui::Key::Escape)
        });
        egui::Window::new("Rating not sent")
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(RichText::new(message).size(22.0));
                ui.add_space(12.0);
                if ui.button(RichText::new("OK").size(22.0)).clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.submitter.view_mut().dismiss_failure();
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        if self.submitter.is_request_in_flight() {
            ctx.request_repaint_after(POLL_INTERVAL);
        } else if let Some(at) = self.submitter.next_wakeup() {
            ctx.request_repaint_after(at.saturating_duration_since(now));
        }
    }
}

impl eframe::App for KioskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        let now = Instant::now();
        self.submitter.advance(now);

        let mut picked = if self.accepting_input() {
            self.keyboard_rating(ctx)
        } else {
            None
        };
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.15);
                ui.heading(RichText::new(&self.prompt).size(38.0));
                ui.add_space(48.0);
                if let Some(rating) = self.render_ratings(ui) {
                    picked = Some(rating);
                }
                ui.add_space(36.0);
                self.render_progress(ui);
            });
        });
        self.render_failure_notice(ctx);

        if let Some(rating) = picked {
            self.submitter.submit(rating);
        }
        self.schedule_repaint(ctx, now);
    }
}

/// Keyboard shortcut for each rating button, numbered left to right.
fn rating_for_key(key: egui::Key) -> Option<Rating> {
    let index = match key {
        egui::Key::Num1 => 0,
        egui::Key::Num2 => 1,
        egui::Key::Num3 => 2,
        _ => return None,
    };
    Rating::ALL.get(index).copied()
}
