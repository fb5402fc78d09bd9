use super::style;
use crate::egui_app::state::ModelInfoState;
use crate::prediction::{RoundModelInfo, humanize_feature_name};
use eframe::egui::{self, RichText, Ui};

const FEATURE_LIST_MAX_HEIGHT: f32 = 160.0;

/// Model metadata card under the round result; absent when the fetch failed.
pub(super) fn render(ui: &mut Ui, state: &ModelInfoState) {
    match state {
        ModelInfoState::Loading => {
            style::card_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(
                        RichText::new("Cargando información del modelo...")
                            .color(style::palette().text_muted),
                    );
                });
            });
        }
        ModelInfoState::Ready(info) => render_info(ui, info),
        ModelInfoState::Unavailable => {}
    }
}

fn render_info(ui: &mut Ui, info: &RoundModelInfo) {
    let palette = style::palette();
    style::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.heading("Información del Modelo");
        ui.add_space(6.0);
        egui::Grid::new("round_model_info")
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Tipo de Modelo").color(palette.text_muted));
                ui.label(&info.model_type);
                ui.end_row();
                ui.label(RichText::new("Estimadores").color(palette.text_muted));
                ui.label(estimators_label(info));
                ui.end_row();
                ui.label(RichText::new("Características").color(palette.text_muted));
                ui.label(format!("{} variables", info.n_features));
                ui.end_row();
                ui.label(RichText::new("Estado").color(palette.text_muted));
                ui.label(RichText::new("✓ Modelo cargado").color(palette.success));
                ui.end_row();
            });
        if !info.feature_names.is_empty() {
            ui.add_space(6.0);
            ui.label(RichText::new("Variables del Modelo:").strong());
            egui::ScrollArea::vertical()
                .id_salt("round_model_features")
                .max_height(FEATURE_LIST_MAX_HEIGHT)
                .show(ui, |ui| {
                    for name in &info.feature_names {
                        ui.label(format!("• {}", humanize_feature_name(name)));
                    }
                });
        }
    });
}

fn estimators_label(info: &RoundModelInfo) -> String {
    match info.n_estimators {
        Some(count) => format!("{count} árboles"),
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimators_fall_back_to_dash_when_missing() {
        let mut info = RoundModelInfo {
            model_type: "RandomForestClassifier".to_string(),
            n_estimators: Some(100),
            n_features: 9,
            feature_names: Vec::new(),
        };
        assert_eq!(estimators_label(&info), "100 árboles");
        info.n_estimators = None;
        assert_eq!(estimators_label(&info), "—");
    }
}
