use crate::prediction::{
    HttpPredictionService, PredictError, PredictionSchema, PredictionService, RoundModelInfo,
    ServiceHealth,
};
use std::{
    panic::{self, AssertUnwindSafe},
    sync::{
        Arc,
        mpsc::{Receiver, Sender},
    },
    thread,
};

type TryRecvError = std::sync::mpsc::TryRecvError;

/// Outcome of one `POST /predict`, tagged with its generation id.
#[derive(Debug)]
pub(crate) struct PredictionJobResult<S: PredictionSchema> {
    pub(crate) request_id: u64,
    pub(crate) request: S::Request,
    pub(crate) result: Result<S::Response, PredictError>,
}

/// Background prediction calls for one view.
///
/// Every submit gets a fresh id; only the most recent id counts as in flight,
/// so responses from superseded submits can be recognized and dropped.
pub(crate) struct PredictionJobs<S: PredictionSchema> {
    message_tx: Sender<PredictionJobResult<S>>,
    message_rx: Receiver<PredictionJobResult<S>>,
    next_request_id: u64,
    latest_request_id: Option<u64>,
}

impl<S: PredictionSchema> PredictionJobs<S> {
    pub(crate) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel();
        Self {
            message_tx,
            message_rx,
            next_request_id: 1,
            latest_request_id: None,
        }
    }

    pub(crate) fn begin_predict(
        &mut self,
        service: Arc<dyn PredictionService<S>>,
        request: S::Request,
    ) -> u64 {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.latest_request_id = Some(request_id);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = run_guarded(|| service.predict(&request));
            let _ = tx.send(PredictionJobResult {
                request_id,
                request,
                result,
            });
        });
        request_id
    }

    pub(crate) fn try_recv_message(&self) -> Result<PredictionJobResult<S>, TryRecvError> {
        self.message_rx.try_recv()
    }

    /// Mark `request_id` finished; false when a newer submit superseded it.
    pub(crate) fn complete(&mut self, request_id: u64) -> bool {
        if self.latest_request_id == Some(request_id) {
            self.latest_request_id = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn in_flight(&self) -> bool {
        self.latest_request_id.is_some()
    }
}

/// Results of the startup calls that feed the status bar and model panel.
#[derive(Debug)]
pub(crate) enum StartupMessage {
    ModelInfo(Result<RoundModelInfo, PredictError>),
    Health(Result<ServiceHealth, PredictError>),
}

pub(crate) struct StartupJobs {
    message_tx: Sender<StartupMessage>,
    message_rx: Receiver<StartupMessage>,
    pending: usize,
}

impl StartupJobs {
    pub(crate) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel();
        Self {
            message_tx,
            message_rx,
            pending: 0,
        }
    }

    pub(crate) fn begin_model_info(&mut self, service: Arc<HttpPredictionService>) {
        self.spawn(move || service.fetch_model_info(), StartupMessage::ModelInfo);
    }

    pub(crate) fn begin_health_check(&mut self, service: Arc<HttpPredictionService>) {
        self.spawn(move || service.check_health(), StartupMessage::Health);
    }

    fn spawn<T: Send + 'static>(
        &mut self,
        call: impl FnOnce() -> Result<T, PredictError> + Send + 'static,
        wrap: fn(Result<T, PredictError>) -> StartupMessage,
    ) {
        self.pending += 1;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let _ = tx.send(wrap(run_guarded(call)));
        });
    }

    pub(crate) fn try_recv_message(&mut self) -> Result<StartupMessage, TryRecvError> {
        let message = self.message_rx.try_recv()?;
        self.pending = self.pending.saturating_sub(1);
        Ok(message)
    }

    pub(crate) fn pending(&self) -> bool {
        self.pending > 0
    }
}

/// Run a service call on a worker thread, turning a panic into an error so
/// the waiting view always hears back.
fn run_guarded<T>(call: impl FnOnce() -> Result<T, PredictError>) -> Result<T, PredictError> {
    panic::catch_unwind(AssertUnwindSafe(call)).unwrap_or_else(|payload| {
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        tracing::error!("Service worker panicked: {detail}");
        Err(PredictError::Transport(format!("worker panicked: {detail}")))
    })
}
