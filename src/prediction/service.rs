//! HTTP client for the external prediction service.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use url::Url;

use super::PredictionSchema;
use super::round::RoundModelInfo;
use crate::config::{AppSettings, ConfigError};
use crate::http_client;

const MAX_RESPONSE_BYTES: usize = 256 * 1024;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PredictError {
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Service returned HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("JSON error: {0}")]
    Json(String),
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl PredictError {
    /// Short Spanish description of the failure kind.
    pub fn user_detail(&self) -> &'static str {
        match self {
            Self::Transport(_) => "no se pudo conectar con el servicio",
            Self::Status { .. } => "el servicio rechazó la solicitud",
            Self::Json(_) => "respuesta inválida del servicio",
            Self::InvalidEndpoint(_) => "dirección del servicio inválida",
        }
    }
}

/// Answer of `GET /health`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub version: Option<String>,
}

/// Something that can answer `POST /predict` for schema `S`.
pub trait PredictionService<S: PredictionSchema>: Send + Sync {
    fn predict(&self, request: &S::Request) -> Result<S::Response, PredictError>;
}

/// Blocking client over the shared HTTP agent.
#[derive(Clone, Debug)]
pub struct HttpPredictionService {
    base: Url,
}

impl HttpPredictionService {
    /// `base` must end with `/` so relative joins keep its path.
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn from_settings(settings: &AppSettings) -> Result<Self, ConfigError> {
        Ok(Self::new(settings.endpoint_url()?))
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn fetch_model_info(&self) -> Result<RoundModelInfo, PredictError> {
        self.get_json("model-info")
    }

    pub fn check_health(&self) -> Result<ServiceHealth, PredictError> {
        self.get_json("health")
    }

    fn url(&self, path: &str) -> Result<Url, PredictError> {
        self.base
            .join(path)
            .map_err(|err| PredictError::InvalidEndpoint(err.to_string()))
    }

    fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, PredictError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.url(path)?;
        tracing::debug!("POST {url}");
        let request = http_client::agent()
            .post(url.as_str())
            .set("Accept", "application/json")
            .set("Content-Type", "application/json");
        read_json(request.send_json(body))
    }

    fn get_json<Resp: DeserializeOwned>(&self, path: &str) -> Result<Resp, PredictError> {
        let url = self.url(path)?;
        tracing::debug!("GET {url}");
        let request = http_client::agent()
            .get(url.as_str())
            .set("Accept", "application/json");
        read_json(request.call())
    }
}

impl<S: PredictionSchema> PredictionService<S> for HttpPredictionService {
    fn predict(&self, request: &S::Request) -> Result<S::Response, PredictError> {
        self.post_json("predict", request)
    }
}

fn read_json<Resp: DeserializeOwned>(
    outcome: Result<ureq::Response, ureq::Error>,
) -> Result<Resp, PredictError> {
    let response = match outcome {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            let body = http_client::read_response_text(response, MAX_RESPONSE_BYTES)
                .unwrap_or_else(|err| err.to_string());
            return Err(PredictError::Status { code, body });
        }
        Err(ureq::Error::Transport(err)) => {
            return Err(PredictError::Transport(err.to_string()));
        }
    };
    let body =
        http_client::read_response_text(response, MAX_RESPONSE_BYTES).map_err(body_read_error)?;
    parse_json_body(&body)
}

/// Oversized or non-UTF-8 bodies are unusable payloads; anything else failed on the wire.
fn body_read_error(err: std::io::Error) -> PredictError {
    match err.kind() {
        std::io::ErrorKind::InvalidData => PredictError::Json(err.to_string()),
        _ => PredictError::Transport(err.to_string()),
    }
}

fn parse_json_body<Resp: DeserializeOwned>(body: &str) -> Result<Resp, PredictError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(PredictError::Json("Empty response body".to_string()));
    }
    serde_json::from_str(trimmed).map_err(|err| PredictError::Json(err.to_string()))
}
