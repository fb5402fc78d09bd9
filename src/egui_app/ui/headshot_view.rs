use super::prediction_panel::{PredictionView, confidence_line, number_row};
use super::style;
use crate::prediction::headshot::{
    EQUIPMENT_VALUE_RANGE, EQUIPMENT_VALUE_STEP, MATCH_KILLS_RANGE, ROUND_STAT_RANGE,
    format_currency, format_headshots,
};
use crate::prediction::{HeadshotCount, HeadshotPrediction, HistoryEntry, PlayerStats};
use eframe::egui::{self, Color32, RichText, Ui};

impl PredictionView for HeadshotCount {
    const FORM_HEADING: &'static str = "Estadísticas del Jugador";
    const SUBMIT_LABEL: &'static str = "Predecir Headshots";
    const LOADING_LABEL: &'static str = "Analizando...";
    const IDLE_HEADING: &'static str = "Listo para Predecir";
    const IDLE_TEXT: &'static str =
        "Introduce las estadísticas del jugador para estimar sus headshots en la ronda.";

    fn accent() -> Color32 {
        style::palette().accent_blue
    }

    fn render_form(ui: &mut Ui, form: &mut PlayerStats) {
        egui::Grid::new("headshot_form_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                number_row(ui, "Kills en la partida", &mut form.match_kills, MATCH_KILLS_RANGE, 0.1);
                number_row(ui, "Kills en la ronda", &mut form.round_kills, ROUND_STAT_RANGE, 0.05);
                number_row(ui, "Asistencias", &mut form.round_assists, ROUND_STAT_RANGE, 0.05);
                number_row(
                    ui,
                    "Kills de flanco",
                    &mut form.round_flank_kills,
                    ROUND_STAT_RANGE,
                    0.05,
                );
                number_row(
                    ui,
                    "Valor del equipo",
                    &mut form.round_starting_equipment_value,
                    EQUIPMENT_VALUE_RANGE,
                    f64::from(EQUIPMENT_VALUE_STEP) / 10.0,
                );
            });
        ui.label(
            RichText::new(format_currency(form.round_starting_equipment_value))
                .color(style::palette().text_muted),
        );
        ui.add_space(6.0);
        ui.label("Arma principal");
        ui.checkbox(&mut form.primary_assault_rifle, "Rifle de Asalto");
        ui.checkbox(&mut form.primary_sniper_rifle, "Rifle de Francotirador");
    }

    fn render_result(ui: &mut Ui, prediction: &HeadshotPrediction) {
        let palette = style::palette();
        let tier = prediction.confidence_tier();
        ui.set_width(ui.available_width());
        style::tinted_frame(palette.accent_blue).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("Headshots Predichos").color(palette.text_muted));
                ui.label(
                    RichText::new(prediction.headshots_label())
                        .size(40.0)
                        .strong()
                        .color(palette.text_primary),
                );
            });
        });
        ui.add_space(8.0);
        confidence_line(ui, prediction.confidence_percent(), tier);
        ui.add(
            egui::ProgressBar::new(prediction.confidence_score.clamp(0.0, 1.0) as f32)
                .fill(style::tier_color(tier)),
        );
        ui.add_space(8.0);
        let info = &prediction.model_info;
        ui.label(RichText::new("Información del Modelo").strong());
        egui::Grid::new("headshot_model_info")
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                info_row(ui, "Tipo", &info.model_type);
                info_row(ui, "Características", &info.features_used.to_string());
                info_row(ui, "Rango", &info.prediction_range);
            });
        if !info.accuracy_note.is_empty() {
            ui.label(RichText::new(&info.accuracy_note).italics().color(palette.text_muted));
        }
    }

    fn render_history_entry(ui: &mut Ui, entry: &HistoryEntry<PlayerStats>) {
        let palette = style::palette();
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("{} headshots", format_headshots(entry.prediction)))
                    .strong()
                    .color(palette.accent_blue),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(entry.time_label()).color(palette.text_muted));
            });
        });
        ui.label(
            RichText::new(format!(
                "Kills: {} | Equipo: {}",
                entry.stats.round_kills,
                format_currency(entry.stats.round_starting_equipment_value)
            ))
            .color(palette.text_muted),
        );
    }
}

fn info_row(ui: &mut Ui, label: &str, value: &str) {
    ui.label(RichText::new(label).color(style::palette().text_muted));
    ui.label(if value.is_empty() { "—" } else { value });
    ui.end_row();
}
