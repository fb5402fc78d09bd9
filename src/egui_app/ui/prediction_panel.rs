use super::style;
use crate::egui_app::controller::PredictionController;
use crate::egui_app::state::ResultDisplay;
use crate::prediction::{HistoryEntry, PredictionSchema};
use eframe::egui::{self, Align, Color32, RichText, Ui};
use std::ops::RangeInclusive;

const SUBMIT_BUTTON_HEIGHT: f32 = 36.0;
const HISTORY_MAX_HEIGHT: f32 = 320.0;

/// How one prediction view draws its form, result card and history rows.
pub(super) trait PredictionView: PredictionSchema {
    const FORM_HEADING: &'static str;
    const SUBMIT_LABEL: &'static str;
    const LOADING_LABEL: &'static str;
    const IDLE_HEADING: &'static str;
    const IDLE_TEXT: &'static str;

    fn accent() -> Color32;

    fn render_form(ui: &mut Ui, form: &mut Self::Request);

    fn render_result(ui: &mut Ui, response: &Self::Response);

    /// Only reached for schemas that keep history.
    fn render_history_entry(_ui: &mut Ui, _entry: &HistoryEntry<Self::Request>) {}
}

/// Two columns: the form on the left, the single result slot on the right.
///
/// `extra` is drawn under the result, before the history list.
pub(super) fn render_prediction_view<V: PredictionView>(
    ui: &mut Ui,
    controller: &mut PredictionController<V>,
    extra: impl FnOnce(&mut Ui),
) {
    ui.columns(2, |columns| {
        let (left, right) = columns.split_at_mut(1);
        render_form_column(&mut left[0], controller);
        render_result_column(&mut right[0], controller, extra);
    });
}

fn render_form_column<V: PredictionView>(ui: &mut Ui, controller: &mut PredictionController<V>) {
    style::card_frame().show(ui, |ui| {
        ui.heading(RichText::new(V::FORM_HEADING).color(V::accent()));
        ui.add_space(8.0);
        V::render_form(ui, &mut controller.ui.form);
        ui.add_space(12.0);
        let loading = controller.is_loading();
        let label = if loading {
            V::LOADING_LABEL
        } else {
            V::SUBMIT_LABEL
        };
        let button = egui::Button::new(RichText::new(label).strong().color(Color32::WHITE))
            .fill(V::accent())
            .min_size(egui::vec2(ui.available_width(), SUBMIT_BUTTON_HEIGHT));
        let clicked = ui.add_enabled(!loading, button).clicked();
        if loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new(V::LOADING_LABEL).color(style::palette().text_muted));
            });
        }
        if clicked {
            controller.submit();
        }
        if let Some(label) = controller.ui.history_toggle_label() {
            ui.add_space(8.0);
            if ui.button(label).clicked() {
                controller.toggle_history();
            }
        }
    });
}

fn render_result_column<V: PredictionView>(
    ui: &mut Ui,
    controller: &mut PredictionController<V>,
    extra: impl FnOnce(&mut Ui),
) {
    let scroll = controller.take_scroll_request();
    match controller.ui.display() {
        ResultDisplay::Error(message) => render_error_banner(ui, message),
        ResultDisplay::Prediction(prediction) => {
            let response = style::card_frame()
                .show(ui, |ui| V::render_result(ui, prediction))
                .response;
            if scroll {
                response.scroll_to_me(Some(Align::TOP));
            }
        }
        ResultDisplay::Idle => render_idle::<V>(ui),
    }
    ui.add_space(12.0);
    extra(ui);
    if controller.ui.show_history && !controller.ui.history.is_empty() {
        ui.add_space(12.0);
        render_history::<V>(ui, controller);
    }
}

fn render_error_banner(ui: &mut Ui, message: &str) {
    let danger = style::palette().danger;
    style::tinted_frame(danger).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("⚠").color(danger).size(18.0));
            ui.label(RichText::new(message).color(danger));
        });
    });
}

fn render_idle<V: PredictionView>(ui: &mut Ui) {
    let palette = style::palette();
    style::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(RichText::new("🎯").size(40.0));
            ui.add_space(8.0);
            ui.heading(V::IDLE_HEADING);
            ui.label(RichText::new(V::IDLE_TEXT).color(palette.text_muted));
            ui.add_space(24.0);
        });
    });
}

fn render_history<V: PredictionView>(ui: &mut Ui, controller: &PredictionController<V>) {
    let history = &controller.ui.history;
    style::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.heading(format!("Historial ({}/{})", history.len(), history.limit()));
        ui.add_space(6.0);
        egui::ScrollArea::vertical()
            .id_salt(("prediction_history", V::NAME))
            .max_height(HISTORY_MAX_HEIGHT)
            .show(ui, |ui| {
                for entry in history.iter() {
                    ui.push_id(entry.id, |ui| {
                        V::render_history_entry(ui, entry);
                    });
                    ui.separator();
                }
            });
    });
}

/// Labeled integer input clamped to `range`, one grid row.
pub(super) fn number_row(
    ui: &mut Ui,
    label: &str,
    value: &mut u32,
    range: RangeInclusive<u32>,
    speed: f64,
) {
    ui.label(label);
    ui.add(egui::DragValue::new(value).range(range).speed(speed));
    ui.end_row();
}

/// "Confianza: 85% (Alta)" tinted by tier.
pub(super) fn confidence_line(ui: &mut Ui, percent: u8, tier: crate::prediction::ConfidenceTier) {
    ui.horizontal(|ui| {
        ui.label("Confianza:");
        ui.label(
            RichText::new(format!("{percent}% ({})", tier.label()))
                .strong()
                .color(style::tier_color(tier)),
        );
    });
}
