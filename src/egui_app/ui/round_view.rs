use super::prediction_panel::{PredictionView, confidence_line, number_row};
use super::style;
use crate::prediction::round::{
    GRENADES_RANGE, MapName, ROUND_KILLS_RANGE, TIME_ALIVE_RANGE, TRAVELLED_DISTANCE_RANGE, Team,
};
use crate::prediction::{RoundFeatures, RoundOutcome, RoundPrediction, humanize_feature_name};
use eframe::egui::{self, Color32, RichText, Ui};

const TOP_FEATURES: usize = 5;

impl PredictionView for RoundOutcome {
    const FORM_HEADING: &'static str = "Estadísticas de la Ronda";
    const SUBMIT_LABEL: &'static str = "Predecir Resultado";
    const LOADING_LABEL: &'static str = "Prediciendo...";
    const IDLE_HEADING: &'static str = "Listo para Predecir";
    const IDLE_TEXT: &'static str =
        "Completa las estadísticas de la ronda y pulsa Predecir para ver si el jugador gana.";

    fn accent() -> Color32 {
        style::palette().accent_orange
    }

    fn render_form(ui: &mut Ui, form: &mut RoundFeatures) {
        ui.label("Equipo");
        ui.horizontal(|ui| {
            for team in Team::ALL {
                ui.selectable_value(&mut form.team, team, team.label());
            }
        });
        ui.add_space(6.0);
        ui.label("Mapa");
        egui::ComboBox::from_id_salt("round_map")
            .selected_text(form.map_name.display_name())
            .show_ui(ui, |ui| {
                for map in MapName::ALL {
                    ui.selectable_value(&mut form.map_name, map, map.display_name());
                }
            });
        ui.add_space(8.0);
        egui::Grid::new("round_form_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                number_row(ui, "Kills en la ronda", &mut form.round_kills, ROUND_KILLS_RANGE, 0.1);
                number_row(ui, "Tiempo vivo (s)", &mut form.time_alive, TIME_ALIVE_RANGE, 1.0);
                number_row(
                    ui,
                    "Granadas letales",
                    &mut form.lethal_grenades,
                    GRENADES_RANGE,
                    0.1,
                );
                number_row(
                    ui,
                    "Granadas no letales",
                    &mut form.non_lethal_grenades,
                    GRENADES_RANGE,
                    0.1,
                );
                number_row(
                    ui,
                    "Distancia recorrida",
                    &mut form.travelled_distance,
                    TRAVELLED_DISTANCE_RANGE,
                    5.0,
                );
            });
        ui.add_space(6.0);
        ui.checkbox(&mut form.survived, "Sobrevivió a la ronda");
        ui.checkbox(&mut form.abnormal_match, "Partida anormal");
    }

    fn render_result(ui: &mut Ui, prediction: &RoundPrediction) {
        let palette = style::palette();
        let tier = prediction.confidence_tier();
        let (icon, color) = if prediction.player_won() {
            ("🏆", palette.success)
        } else {
            ("❌", palette.danger)
        };
        ui.set_width(ui.available_width());
        style::tinted_frame(result_tint(prediction)).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(icon).size(40.0));
                ui.label(
                    RichText::new(prediction.outcome_label())
                        .size(24.0)
                        .strong()
                        .color(color),
                );
            });
        });
        ui.add_space(8.0);
        confidence_line(ui, prediction.confidence_percent(), tier);
        ui.add(
            egui::ProgressBar::new(prediction.probability.clamp(0.0, 1.0) as f32)
                .fill(style::tier_color(tier)),
        );
        ui.add_space(8.0);
        ui.label(RichText::new("Probabilidad por equipo").strong());
        let odds = prediction.team_win_probability;
        probability_row(ui, "Pierde", odds.team_0, palette.danger);
        probability_row(ui, "Gana", odds.team_1, palette.success);

        let ranked = prediction.ranked_features();
        if !ranked.is_empty() {
            ui.add_space(8.0);
            ui.label(RichText::new("Factores más influyentes").strong());
            for (name, weight) in ranked.into_iter().take(TOP_FEATURES) {
                ui.label(RichText::new(humanize_feature_name(name)).color(palette.text_muted));
                ui.add(
                    egui::ProgressBar::new(weight.clamp(0.0, 1.0) as f32)
                        .text(format!("{:.1}%", weight * 100.0))
                        .fill(palette.accent_orange),
                );
            }
        }
    }
}

/// Card tint follows the confidence tier, not the predicted outcome.
fn result_tint(prediction: &RoundPrediction) -> Color32 {
    style::tier_color(prediction.confidence_tier())
}

fn probability_row(ui: &mut Ui, label: &str, probability: f64, color: Color32) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(
            egui::ProgressBar::new(probability.clamp(0.0, 1.0) as f32)
                .text(format!("{:.1}%", probability * 100.0))
                .fill(color),
        );
    });
}
