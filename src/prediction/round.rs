//! Round winner classification: request features, response and model info.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::confidence::{ConfidenceTier, confidence_percent};
use super::service::PredictError;
use super::{PredictionSchema, PredictionSummary, int_flag};

pub const ROUND_KILLS_RANGE: RangeInclusive<u32> = 0..=100;
pub const TIME_ALIVE_RANGE: RangeInclusive<u32> = 0..=2400;
pub const GRENADES_RANGE: RangeInclusive<u32> = 0..=100;
pub const TRAVELLED_DISTANCE_RANGE: RangeInclusive<u32> = 0..=5000;

const FAILURE_MESSAGE: &str = "Error al hacer la predicción";

/// Side the player fought on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    #[default]
    #[serde(rename = "CT")]
    CounterTerrorists,
    #[serde(rename = "T")]
    Terrorists,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::CounterTerrorists, Team::Terrorists];

    pub fn label(self) -> &'static str {
        match self {
            Self::CounterTerrorists => "Counter-Terrorists",
            Self::Terrorists => "Terrorists",
        }
    }
}

/// Maps the classifier was trained on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapName {
    #[default]
    #[serde(rename = "de_dust2")]
    Dust2,
    #[serde(rename = "de_mirage")]
    Mirage,
    #[serde(rename = "de_inferno")]
    Inferno,
    #[serde(rename = "de_cache")]
    Cache,
}

impl MapName {
    pub const ALL: [MapName; 4] = [
        MapName::Dust2,
        MapName::Mirage,
        MapName::Inferno,
        MapName::Cache,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Dust2 => "Dust 2",
            Self::Mirage => "Mirage",
            Self::Inferno => "Inferno",
            Self::Cache => "Cache",
        }
    }
}

/// Per-round statistics posted to `POST /predict`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundFeatures {
    pub round_kills: u32,
    /// Seconds the player stayed alive.
    pub time_alive: u32,
    pub lethal_grenades: u32,
    pub non_lethal_grenades: u32,
    /// Distance in map units.
    pub travelled_distance: u32,
    #[serde(with = "int_flag")]
    pub survived: bool,
    pub team: Team,
    pub map_name: MapName,
    #[serde(with = "int_flag")]
    pub abnormal_match: bool,
}

impl Default for RoundFeatures {
    fn default() -> Self {
        Self {
            round_kills: 0,
            time_alive: 100,
            lethal_grenades: 0,
            non_lethal_grenades: 0,
            travelled_distance: 1000,
            survived: true,
            team: Team::CounterTerrorists,
            map_name: MapName::Dust2,
            abnormal_match: false,
        }
    }
}

impl RoundFeatures {
    pub fn clamp_to_bounds(&mut self) {
        self.round_kills = clamp(self.round_kills, ROUND_KILLS_RANGE);
        self.time_alive = clamp(self.time_alive, TIME_ALIVE_RANGE);
        self.lethal_grenades = clamp(self.lethal_grenades, GRENADES_RANGE);
        self.non_lethal_grenades = clamp(self.non_lethal_grenades, GRENADES_RANGE);
        self.travelled_distance = clamp(self.travelled_distance, TRAVELLED_DISTANCE_RANGE);
    }
}

fn clamp(value: u32, range: RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamWinProbability {
    pub team_0: f64,
    pub team_1: f64,
}

/// Classifier output for one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundPrediction {
    /// `1` when the player's side won the round.
    pub prediction: u8,
    /// Probability of the predicted class.
    pub probability: f64,
    pub team_win_probability: TeamWinProbability,
    #[serde(default)]
    pub feature_importance: BTreeMap<String, f64>,
}

impl RoundPrediction {
    pub fn player_won(&self) -> bool {
        self.prediction == 1
    }

    pub fn outcome_label(&self) -> &'static str {
        if self.player_won() {
            "¡El jugador ganó!"
        } else {
            "El jugador perdió"
        }
    }

    pub fn confidence_percent(&self) -> u8 {
        confidence_percent(self.probability)
    }

    pub fn confidence_tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_percent(self.confidence_percent())
    }

    /// Feature weights ordered from most to least important.
    pub fn ranked_features(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .feature_importance
            .iter()
            .map(|(name, weight)| (name.as_str(), *weight))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Metadata returned by `GET /model-info`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundModelInfo {
    pub model_type: String,
    /// Number of trees; some service builds omit it.
    #[serde(default)]
    pub n_estimators: Option<u32>,
    pub n_features: u32,
    #[serde(default)]
    pub feature_names: Vec<String>,
}

/// Schema marker for the round winner view.
#[derive(Debug)]
pub enum RoundOutcome {}

impl PredictionSchema for RoundOutcome {
    type Request = RoundFeatures;
    type Response = RoundPrediction;

    const NAME: &'static str = "round_outcome";
    const KEEPS_HISTORY: bool = false;

    fn clamp_request(request: &mut RoundFeatures) {
        request.clamp_to_bounds();
    }

    fn failure_message(error: &PredictError) -> String {
        match error {
            PredictError::Status { .. } => FAILURE_MESSAGE.to_string(),
            other => format!("{FAILURE_MESSAGE}: {}", other.user_detail()),
        }
    }

    fn summarize(response: &RoundPrediction) -> PredictionSummary {
        PredictionSummary {
            value: f64::from(response.prediction),
            confidence: response.probability,
        }
    }
}
