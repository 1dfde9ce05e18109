#![deny(missing_docs)]

//! Entry point for the ratekiosk feedback window.
use eframe::egui;
use ratekiosk::config;
use ratekiosk::kiosk::{KioskApp, MIN_VIEWPORT_SIZE};
use ratekiosk::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let loaded = config::load_or_default();
    let fullscreen = loaded
        .as_ref()
        .map(|config| config.display.fullscreen)
        .unwrap_or(false);
    let viewport = egui::ViewportBuilder::default()
        .with_title("Feedback")
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_fullscreen(fullscreen);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "ratekiosk",
        native_options,
        Box::new(move |_cc| match loaded {
            Ok(config) => {
                tracing::info!(
                    endpoint = %config.endpoint,
                    encoding = ?config.transport.encoding,
                    response = ?config.transport.response,
                    "Starting kiosk"
                );
                Ok(Box::new(KioskApp::new(&config)))
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to load configuration");
                Ok(Box::new(LaunchError {
                    message: format!("Failed to load config: {err}"),
                }))
            }
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start kiosk");
                ui.label(&self.message);
            });
        });
    }
}
