#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the egui-based CS Predictor UI.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use cs_predictor::config::{self, AppSettings};
use cs_predictor::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use cs_predictor::logging;
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let settings = load_settings();

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size(egui::vec2(1200.0, 800.0));
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "CS Predictor",
        native_options,
        Box::new(move |_cc| match EguiApp::new(&settings) {
            Ok(app) => Ok(Box::new(app)),
            Err(err) => {
                tracing::error!("{err}");
                Ok(Box::new(LaunchError { message: err }))
            }
        }),
    )?;
    Ok(())
}

/// Fall back to defaults when the settings file cannot be read.
fn load_settings() -> AppSettings {
    match config::load_or_default() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("Using default settings: {err}");
            AppSettings::default()
        }
    }
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
