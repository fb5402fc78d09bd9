//! Application state owner bridging the prediction service to the egui UI.

mod jobs;
mod prediction_view;

pub use prediction_view::PredictionController;

use crate::config::{AppSettings, ConfigError};
use crate::egui_app::state::{ModelInfoState, ServiceStatus, UiState};
use crate::prediction::{
    HeadshotCount, HttpPredictionService, PredictionService, RoundOutcome,
};
use jobs::{StartupJobs, StartupMessage};
use std::sync::Arc;

/// Owns both prediction views plus the startup service checks.
pub struct EguiController {
    pub ui: UiState,
    pub round: PredictionController<RoundOutcome>,
    pub headshot: PredictionController<HeadshotCount>,
    startup: StartupJobs,
}

impl EguiController {
    /// Build against the configured endpoint and start the startup service checks.
    pub fn new(settings: &AppSettings) -> Result<Self, ConfigError> {
        let service = Arc::new(HttpPredictionService::from_settings(settings)?);
        tracing::info!("Prediction service at {}", service.base_url());
        let mut controller = Self::with_services(
            settings,
            Arc::clone(&service) as Arc<dyn PredictionService<RoundOutcome>>,
            Arc::clone(&service) as Arc<dyn PredictionService<HeadshotCount>>,
        );
        controller.start_service_checks(service);
        Ok(controller)
    }

    /// Build with explicit prediction backends and no startup checks running.
    pub fn with_services(
        settings: &AppSettings,
        round: Arc<dyn PredictionService<RoundOutcome>>,
        headshot: Arc<dyn PredictionService<HeadshotCount>>,
    ) -> Self {
        Self {
            ui: UiState::new(settings.default_tab, settings.endpoint.clone()),
            round: PredictionController::new(round, settings.history_limit),
            headshot: PredictionController::new(headshot, settings.history_limit),
            startup: StartupJobs::new(),
        }
    }

    /// Fetch `/model-info` and `/health` in the background.
    pub fn start_service_checks(&mut self, service: Arc<HttpPredictionService>) {
        self.ui.model_info = ModelInfoState::Loading;
        self.ui.service = ServiceStatus::Checking;
        self.startup.begin_model_info(Arc::clone(&service));
        self.startup.begin_health_check(service);
    }

    /// Drain every finished background job into UI state.
    pub fn poll_background_jobs(&mut self) {
        self.round.poll_jobs();
        self.headshot.poll_jobs();
        while let Ok(message) = self.startup.try_recv_message() {
            match message {
                StartupMessage::ModelInfo(Ok(info)) => {
                    tracing::info!(
                        "Model info loaded: {} ({} features)",
                        info.model_type,
                        info.n_features
                    );
                    self.ui.model_info = ModelInfoState::Ready(info);
                }
                StartupMessage::ModelInfo(Err(err)) => {
                    tracing::warn!("Model info unavailable: {err}");
                    self.ui.model_info = ModelInfoState::Unavailable;
                }
                StartupMessage::Health(Ok(health)) => {
                    tracing::info!(
                        "Service health: {} (model loaded: {})",
                        health.status,
                        health.model_loaded
                    );
                    self.ui.service = ServiceStatus::Online(health);
                }
                StartupMessage::Health(Err(err)) => {
                    tracing::warn!("Service health check failed: {err}");
                    self.ui.service = ServiceStatus::Offline;
                }
            }
        }
    }

    /// True while any response is still outstanding, so the UI keeps repainting.
    pub fn has_pending_work(&self) -> bool {
        self.round.has_pending_work() || self.headshot.has_pending_work() || self.startup.pending()
    }
}
