use super::style::{self, StatusTone};
use crate::egui_app::state::ServiceStatus;
use eframe::egui::{self, Frame, Margin, RichText};

/// Badge and message shown for the current service status.
#[derive(Debug, PartialEq)]
pub(super) struct StatusLine {
    pub tone: StatusTone,
    pub badge_label: &'static str,
    pub text: String,
}

pub(super) fn status_line(status: &ServiceStatus) -> StatusLine {
    match status {
        ServiceStatus::Checking => StatusLine {
            tone: StatusTone::Busy,
            badge_label: "Comprobando",
            text: "Conectando con el servicio de predicción...".to_string(),
        },
        ServiceStatus::Online(health) if health.model_loaded => StatusLine {
            tone: StatusTone::Info,
            badge_label: "En línea",
            text: match health.version.as_deref() {
                Some(version) => format!("Servicio activo (v{version})"),
                None => "Servicio activo".to_string(),
            },
        },
        ServiceStatus::Online(_) => StatusLine {
            tone: StatusTone::Warning,
            badge_label: "Sin modelo",
            text: "Modelo no cargado".to_string(),
        },
        ServiceStatus::Offline => StatusLine {
            tone: StatusTone::Error,
            badge_label: "Sin conexión",
            text: "Servicio no disponible".to_string(),
        },
    }
}

pub(super) fn render(ctx: &egui::Context, status: &ServiceStatus, endpoint: &str) {
    let palette = style::palette();
    let line = status_line(status);
    egui::TopBottomPanel::bottom("status_bar")
        .frame(
            Frame::new()
                .fill(palette.bg_secondary)
                .inner_margin(Margin::symmetric(8, 4)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                ui.painter()
                    .circle_filled(rect.center(), 6.0, style::status_badge_color(line.tone));
                ui.label(RichText::new(line.badge_label).strong());
                ui.separator();
                ui.label(&line.text);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(endpoint).color(palette.text_muted));
                });
            });
        });
}
