use super::jobs::{PredictionJobResult, PredictionJobs};
use crate::egui_app::state::PredictionViewState;
use crate::prediction::{PredictionSchema, PredictionService};
use std::sync::Arc;
use time::OffsetDateTime;

/// Drives one prediction view: submit, collect the response, update state.
pub struct PredictionController<S: PredictionSchema> {
    pub ui: PredictionViewState<S>,
    service: Arc<dyn PredictionService<S>>,
    jobs: PredictionJobs<S>,
}

impl<S: PredictionSchema> PredictionController<S> {
    pub fn new(service: Arc<dyn PredictionService<S>>, history_limit: usize) -> Self {
        Self {
            ui: PredictionViewState::new(history_limit),
            service,
            jobs: PredictionJobs::new(),
        }
    }

    /// Post the current form in the background and return its generation id.
    ///
    /// The error is cleared right away; the last prediction stays until a
    /// newer one arrives.
    pub fn submit(&mut self) -> u64 {
        S::clamp_request(&mut self.ui.form);
        self.ui.loading = true;
        self.ui.error = None;
        let request_id = self
            .jobs
            .begin_predict(Arc::clone(&self.service), self.ui.form.clone());
        tracing::info!(view = S::NAME, request_id, "Prediction requested");
        request_id
    }

    /// Apply finished jobs without blocking; returns how many were received.
    pub fn poll_jobs(&mut self) -> usize {
        let mut received = 0;
        while let Ok(message) = self.jobs.try_recv_message() {
            received += 1;
            self.apply_job_result(message);
        }
        received
    }

    fn apply_job_result(&mut self, message: PredictionJobResult<S>) {
        if !self.jobs.complete(message.request_id) {
            tracing::debug!(
                view = S::NAME,
                request_id = message.request_id,
                "Discarding response from superseded request"
            );
            return;
        }
        self.ui.loading = false;
        match message.result {
            Ok(response) => {
                tracing::info!(view = S::NAME, request_id = message.request_id, "Prediction received");
                if S::KEEPS_HISTORY {
                    self.ui.history.record(
                        message.request,
                        S::summarize(&response),
                        now_local_or_utc(),
                    );
                }
                self.ui.prediction = Some(response);
                self.ui.error = None;
                self.ui.scroll_to_result = true;
            }
            Err(err) => {
                tracing::warn!(view = S::NAME, request_id = message.request_id, "Prediction failed: {err}");
                self.ui.error = Some(S::failure_message(&err));
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.ui.loading
    }

    pub(crate) fn has_pending_work(&self) -> bool {
        self.jobs.in_flight()
    }

    pub fn toggle_history(&mut self) {
        self.ui.show_history = !self.ui.show_history;
    }

    /// Consume the one-shot scroll request raised by a fresh result.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.ui.scroll_to_result)
    }
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::egui_app::state::ResultDisplay;
    use crate::prediction::round::TeamWinProbability;
    use crate::prediction::{
        HeadshotCount, HeadshotPrediction, PlayerStats, PredictError, RoundFeatures,
        RoundOutcome, RoundPrediction,
    };
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Mutex;
    use std::sync::mpsc::{Receiver, Sender, channel};
    use std::time::Duration;

    struct FnService<F>(F);

    impl<S, F> PredictionService<S> for FnService<F>
    where
        S: PredictionSchema,
        F: Fn(&S::Request) -> Result<S::Response, PredictError> + Send + Sync,
    {
        fn predict(&self, request: &S::Request) -> Result<S::Response, PredictError> {
            (self.0)(request)
        }
    }

    fn fn_service<S, F>(respond: F) -> Arc<dyn PredictionService<S>>
    where
        S: PredictionSchema,
        F: Fn(&S::Request) -> Result<S::Response, PredictError> + Send + Sync + 'static,
    {
        Arc::new(FnService(respond))
    }

    type RoundReply = Result<RoundPrediction, PredictError>;

    /// Holds each round request (keyed by `round_kills`) until the test releases it.
    fn gated_round_service() -> (
        Arc<dyn PredictionService<RoundOutcome>>,
        HashMap<u32, Sender<RoundReply>>,
    ) {
        let mut senders = HashMap::new();
        let mut receivers: HashMap<u32, Receiver<RoundReply>> = HashMap::new();
        for key in 1..=2 {
            let (tx, rx) = channel();
            senders.insert(key, tx);
            receivers.insert(key, rx);
        }
        let receivers = Mutex::new(receivers);
        let service = fn_service::<RoundOutcome, _>(move |request: &RoundFeatures| {
            let rx = receivers
                .lock()
                .unwrap()
                .remove(&request.round_kills)
                .expect("unexpected request");
            rx.recv().expect("reply released")
        });
        (service, senders)
    }

    fn round_prediction(prediction: u8, probability: f64) -> RoundPrediction {
        RoundPrediction {
            prediction,
            probability,
            team_win_probability: TeamWinProbability {
                team_0: 1.0 - probability,
                team_1: probability,
            },
            feature_importance: BTreeMap::new(),
        }
    }

    fn headshot_prediction(stats: &PlayerStats, value: f64) -> HeadshotPrediction {
        HeadshotPrediction {
            predicted_headshots: value,
            confidence_score: 0.85,
            player_stats: stats.clone(),
            model_info: Default::default(),
        }
    }

    fn poll_until<S: PredictionSchema>(
        controller: &mut PredictionController<S>,
        mut done: impl FnMut(&PredictionController<S>, usize) -> bool,
    ) {
        let mut received = 0;
        for _ in 0..400 {
            received += controller.poll_jobs();
            if done(&*controller, received) {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("condition not reached");
    }

    #[test]
    fn success_stores_prediction_and_requests_scroll() {
        let service = fn_service::<RoundOutcome, _>(|_| Ok(round_prediction(1, 0.9)));
        let mut controller = PredictionController::new(service, 10);
        controller.ui.error = Some("old".to_string());
        controller.submit();
        assert!(controller.is_loading());
        assert_eq!(controller.ui.error, None);

        poll_until(&mut controller, |c, _| !c.is_loading());
        let prediction = controller.ui.prediction.as_ref().unwrap();
        assert_eq!(prediction.outcome_label(), "¡El jugador ganó!");
        assert!(controller.ui.history.is_empty());
        assert!(controller.take_scroll_request());
        assert!(!controller.take_scroll_request());
    }

    #[test]
    fn failure_keeps_previous_prediction_and_sets_message() {
        let fail = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&fail);
        let service = fn_service::<RoundOutcome, _>(move |_| {
            if *flag.lock().unwrap() {
                Err(PredictError::Status {
                    code: 500,
                    body: String::new(),
                })
            } else {
                Ok(round_prediction(0, 0.7))
            }
        });
        let mut controller = PredictionController::new(service, 10);
        controller.submit();
        poll_until(&mut controller, |c, _| !c.is_loading());
        let before = controller.ui.prediction.clone();

        *fail.lock().unwrap() = true;
        controller.submit();
        poll_until(&mut controller, |c, _| !c.is_loading());
        assert_eq!(controller.ui.prediction, before);
        assert_eq!(controller.ui.error.as_deref(), Some("Error al hacer la predicción"));
        assert!(matches!(controller.ui.display(), ResultDisplay::Error(_)));
    }

    #[test]
    fn submit_clamps_the_form_before_sending() {
        let service =
            fn_service::<HeadshotCount, _>(|request| Ok(headshot_prediction(request, 1.0)));
        let mut controller = PredictionController::new(service, 10);
        controller.ui.form.round_kills = 42;
        controller.submit();
        assert_eq!(controller.ui.form.round_kills, 5);
        poll_until(&mut controller, |c, _| !c.is_loading());
        assert_eq!(controller.ui.history.latest().unwrap().stats.round_kills, 5);
    }

    #[test]
    fn history_is_bounded_and_newest_first() {
        let service = fn_service::<HeadshotCount, _>(|request| {
            Ok(headshot_prediction(request, f64::from(request.match_kills)))
        });
        let mut controller = PredictionController::new(service, 10);
        for kills in 0..12 {
            controller.ui.form.match_kills = kills;
            controller.submit();
            poll_until(&mut controller, |c, _| !c.is_loading());
        }
        assert_eq!(controller.ui.history.len(), 10);
        assert_eq!(controller.ui.history.latest().unwrap().prediction, 11.0);
        let ids: Vec<u64> = controller.ui.history.iter().map(|entry| entry.id).collect();
        assert!(ids.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn headshot_failures_are_not_recorded() {
        let service = fn_service::<HeadshotCount, _>(|_| {
            Err(PredictError::Transport("connection refused".to_string()))
        });
        let mut controller = PredictionController::new(service, 10);
        controller.submit();
        poll_until(&mut controller, |c, _| !c.is_loading());
        assert!(controller.ui.history.is_empty());
        assert!(controller.ui.prediction.is_none());
        assert!(controller.ui.error.as_deref().unwrap().contains("servidor"));
    }

    #[test]
    fn panicking_service_still_ends_loading_with_an_error() {
        let service = fn_service::<RoundOutcome, _>(|_| panic!("model crashed"));
        let mut controller = PredictionController::new(service, 10);
        controller.submit();
        poll_until(&mut controller, |c, _| !c.is_loading());
        assert!(!controller.has_pending_work());
        assert!(controller.ui.prediction.is_none());
        assert!(controller.ui.error.is_some());
    }

    #[test]
    fn late_response_from_superseded_submit_is_ignored() {
        let (service, senders) = gated_round_service();
        let mut controller = PredictionController::<RoundOutcome>::new(service, 10);
        controller.ui.form.round_kills = 1;
        let first = controller.submit();
        controller.ui.form.round_kills = 2;
        let second = controller.submit();
        assert!(second > first);

        senders[&2].send(Ok(round_prediction(0, 0.6))).unwrap();
        poll_until(&mut controller, |c, _| !c.is_loading());
        assert_eq!(controller.ui.prediction.as_ref().unwrap().probability, 0.6);

        senders[&1].send(Ok(round_prediction(1, 0.9))).unwrap();
        poll_until(&mut controller, |_, received| received == 1);
        assert_eq!(controller.ui.prediction.as_ref().unwrap().probability, 0.6);
        assert!(!controller.is_loading());
    }

    #[test]
    fn early_response_from_superseded_submit_keeps_loading() {
        let (service, senders) = gated_round_service();
        let mut controller = PredictionController::<RoundOutcome>::new(service, 10);
        controller.ui.form.round_kills = 1;
        controller.submit();
        controller.ui.form.round_kills = 2;
        controller.submit();

        senders[&1]
            .send(Err(PredictError::Transport("reset".to_string())))
            .unwrap();
        poll_until(&mut controller, |_, received| received == 1);
        assert!(controller.is_loading());
        assert_eq!(controller.ui.error, None);

        senders[&2].send(Ok(round_prediction(1, 0.85))).unwrap();
        poll_until(&mut controller, |c, _| !c.is_loading());
        let prediction = controller.ui.prediction.as_ref().unwrap();
        assert_eq!(prediction.probability, 0.85);
        assert!(!controller.has_pending_work());
    }
}
