//! Shared state types for the egui UI.

use crate::config::PredictorTab;
use crate::prediction::{PredictionHistory, PredictionSchema, RoundModelInfo, ServiceHealth};

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub tab: PredictorTab,
    /// Service base URL, shown in the status bar.
    pub endpoint: String,
    pub service: ServiceStatus,
    pub model_info: ModelInfoState,
}

impl UiState {
    pub fn new(tab: PredictorTab, endpoint: impl Into<String>) -> Self {
        Self {
            tab,
            endpoint: endpoint.into(),
            service: ServiceStatus::Checking,
            model_info: ModelInfoState::Loading,
        }
    }
}

/// Reachability of the prediction service, shown in the status bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServiceStatus {
    Checking,
    Online(ServiceHealth),
    Offline,
}

/// Lifecycle of the optional `/model-info` panel.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelInfoState {
    Loading,
    Ready(RoundModelInfo),
    /// Fetch failed; the panel is omitted.
    Unavailable,
}

/// Form, result and history state of one prediction view.
pub struct PredictionViewState<S: PredictionSchema> {
    pub form: S::Request,
    pub loading: bool,
    pub prediction: Option<S::Response>,
    pub error: Option<String>,
    pub history: PredictionHistory<S::Request>,
    pub show_history: bool,
    /// One-shot request to bring the result panel into view.
    pub scroll_to_result: bool,
}

impl<S: PredictionSchema> PredictionViewState<S> {
    pub fn new(history_limit: usize) -> Self {
        Self {
            form: S::Request::default(),
            loading: false,
            prediction: None,
            error: None,
            history: PredictionHistory::new(history_limit),
            show_history: false,
            scroll_to_result: false,
        }
    }

    /// Pick the single result branch to render; an error hides any kept prediction.
    pub fn display(&self) -> ResultDisplay<'_, S> {
        if let Some(error) = self.error.as_deref() {
            return ResultDisplay::Error(error);
        }
        match self.prediction.as_ref() {
            Some(prediction) => ResultDisplay::Prediction(prediction),
            None => ResultDisplay::Idle,
        }
    }

    /// The history toggle only appears once something has been recorded.
    pub fn history_toggle_label(&self) -> Option<String> {
        if self.history.is_empty() {
            return None;
        }
        let verb = if self.show_history { "Ocultar" } else { "Mostrar" };
        Some(format!("{verb} Historial ({})", self.history.len()))
    }
}

pub enum ResultDisplay<'a, S: PredictionSchema> {
    Idle,
    Error(&'a str),
    Prediction(&'a S::Response),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::{HeadshotCount, PredictionSummary, RoundOutcome};

    #[test]
    fn fresh_state_is_idle_with_default_form() {
        let state = PredictionViewState::<RoundOutcome>::new(10);
        assert!(matches!(state.display(), ResultDisplay::Idle));
        assert_eq!(state.form.time_alive, 100);
        assert!(!state.loading);
    }

    #[test]
    fn error_takes_the_display_slot_over_a_kept_prediction() {
        let mut state = PredictionViewState::<HeadshotCount>::new(10);
        state.prediction = Some(crate::prediction::HeadshotPrediction {
            predicted_headshots: 1.0,
            confidence_score: 0.9,
            player_stats: state.form.clone(),
            model_info: Default::default(),
        });
        assert!(matches!(state.display(), ResultDisplay::Prediction(_)));
        state.error = Some("boom".to_string());
        assert!(matches!(state.display(), ResultDisplay::Error("boom")));
    }

    #[test]
    fn history_toggle_label_tracks_visibility() {
        let mut state = PredictionViewState::<HeadshotCount>::new(10);
        assert_eq!(state.history_toggle_label(), None);
        state.history.record(
            state.form.clone(),
            PredictionSummary {
                value: 2.0,
                confidence: 0.85,
            },
            time::OffsetDateTime::UNIX_EPOCH,
        );
        assert_eq!(state.history_toggle_label().as_deref(), Some("Mostrar Historial (1)"));
        state.show_history = true;
        assert_eq!(state.history_toggle_label().as_deref(), Some("Ocultar Historial (1)"));
    }
}
