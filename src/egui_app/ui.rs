//! egui renderer for the application UI.

mod headshot_view;
mod model_info_panel;
mod prediction_panel;
mod round_view;
mod status_bar;
pub mod style;

use crate::config::{AppSettings, PredictorTab};
use crate::egui_app::controller::EguiController;
use eframe::egui::{self, Frame, Margin, RichText};
use std::time::Duration;

/// Minimum window size that keeps both form and result columns readable.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(960.0, 640.0);

const REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    /// Create the app against the configured prediction service.
    pub fn new(settings: &AppSettings) -> Result<Self, String> {
        let controller = EguiController::new(settings)
            .map_err(|err| format!("Failed to configure prediction service: {err}"))?;
        Ok(Self::from_controller(controller))
    }

    pub fn from_controller(controller: EguiController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    /// Draw one frame; split from `update` so it can run without a native window.
    pub(crate) fn render(&mut self, ctx: &egui::Context) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        self.render_top_bar(ctx);
        status_bar::render(
            ctx,
            &self.controller.ui.service,
            &self.controller.ui.endpoint,
        );
        self.render_central(ctx);
        if self.controller.has_pending_work() {
            ctx.request_repaint_after(REPAINT_INTERVAL);
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_secondary)
                    .inner_margin(Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("CS Predictor")
                            .size(20.0)
                            .strong()
                            .color(palette.accent_orange),
                    );
                    ui.add_space(16.0);
                    ui.separator();
                    let tab = &mut self.controller.ui.tab;
                    ui.selectable_value(tab, PredictorTab::Round, "Ganador de Ronda");
                    ui.selectable_value(tab, PredictorTab::Headshot, "Headshots");
                });
            });
    }

    fn render_central(&mut self, ctx: &egui::Context) {
        let controller = &mut self.controller;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("prediction_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| match controller.ui.tab {
                    PredictorTab::Round => {
                        let model_info = &controller.ui.model_info;
                        prediction_panel::render_prediction_view(
                            ui,
                            &mut controller.round,
                            |ui| model_info_panel::render(ui, model_info),
                        );
                    }
                    PredictorTab::Headshot => {
                        prediction_panel::render_prediction_view(
                            ui,
                            &mut controller.headshot,
                            |_| {},
                        );
                    }
                });
        });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render(ctx);
    }
}
