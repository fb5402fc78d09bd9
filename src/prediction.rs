//! Prediction contracts shared by the round-outcome and headshot views.
//!
//! Each view is described by a [`PredictionSchema`]: the request it posts to
//! the prediction service, the response it expects back, how failures are
//! worded for the user, and whether successes are kept in a history.

use std::fmt::Debug;

use serde::{Serialize, de::DeserializeOwned};

pub mod confidence;
pub mod headshot;
pub mod history;
pub mod round;
pub mod service;

pub use confidence::ConfidenceTier;
pub use headshot::{HeadshotCount, HeadshotPrediction, PlayerStats};
pub use history::{HistoryEntry, PredictionHistory};
pub use round::{RoundFeatures, RoundModelInfo, RoundOutcome, RoundPrediction};
pub use service::{HttpPredictionService, PredictError, PredictionService, ServiceHealth};

/// Scalar view of a response, recorded in the history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PredictionSummary {
    pub value: f64,
    pub confidence: f64,
}

/// Request/response contract of one prediction view.
pub trait PredictionSchema: Send + Sync + 'static {
    /// Form state, posted as the JSON body of `POST /predict`.
    type Request: Serialize + Clone + Default + Debug + Send + Sync + 'static;
    /// JSON body returned by a successful `POST /predict`.
    type Response: DeserializeOwned + Clone + Debug + Send + 'static;

    /// Short identifier used in logs.
    const NAME: &'static str;
    /// Whether successful predictions are recorded in the history.
    const KEEPS_HISTORY: bool;

    /// Clamp every field into the range the form advertises.
    fn clamp_request(request: &mut Self::Request);

    /// User-facing message shown when a prediction request fails.
    fn failure_message(error: &PredictError) -> String;

    fn summarize(response: &Self::Response) -> PredictionSummary;
}

/// Serde adapter for 0/1 integer flags on the wire.
pub(crate) mod int_flag {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireFlag {
        Bool(bool),
        Int(i64),
        Float(f64),
    }

    pub(crate) fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match WireFlag::deserialize(deserializer)? {
            WireFlag::Bool(value) => Ok(value),
            WireFlag::Int(0) => Ok(false),
            WireFlag::Int(1) => Ok(true),
            WireFlag::Float(value) if value == 0.0 => Ok(false),
            WireFlag::Float(value) if value == 1.0 => Ok(true),
            _ => Err(D::Error::custom("expected a 0/1 flag")),
        }
    }
}

/// Replace underscores so model feature names read as words.
pub fn humanize_feature_name(name: &str) -> String {
    name.replace('_', " ")
}
