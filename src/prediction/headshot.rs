//! Headshot count regression: player stats, response and display helpers.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::confidence::{ConfidenceTier, confidence_percent};
use super::service::PredictError;
use super::{PredictionSchema, PredictionSummary, int_flag};

pub const MATCH_KILLS_RANGE: RangeInclusive<u32> = 0..=100;
pub const ROUND_STAT_RANGE: RangeInclusive<u32> = 0..=5;
pub const EQUIPMENT_VALUE_RANGE: RangeInclusive<u32> = 0..=16000;
pub const EQUIPMENT_VALUE_STEP: u32 = 100;

const FAILURE_MESSAGE: &str =
    "Error al conectar con el servidor. Asegúrate de que el backend esté ejecutándose.";

/// Player statistics posted to `POST /predict`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub match_kills: u32,
    pub round_kills: u32,
    pub round_assists: u32,
    pub round_flank_kills: u32,
    pub round_starting_equipment_value: u32,
    #[serde(with = "int_flag")]
    pub primary_assault_rifle: bool,
    #[serde(with = "int_flag")]
    pub primary_sniper_rifle: bool,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            match_kills: 15,
            round_kills: 2,
            round_assists: 1,
            round_flank_kills: 0,
            round_starting_equipment_value: 4500,
            primary_assault_rifle: true,
            primary_sniper_rifle: false,
        }
    }
}

impl PlayerStats {
    pub fn clamp_to_bounds(&mut self) {
        let clamp = |value: u32, range: RangeInclusive<u32>| value.clamp(*range.start(), *range.end());
        self.match_kills = clamp(self.match_kills, MATCH_KILLS_RANGE);
        self.round_kills = clamp(self.round_kills, ROUND_STAT_RANGE);
        self.round_assists = clamp(self.round_assists, ROUND_STAT_RANGE);
        self.round_flank_kills = clamp(self.round_flank_kills, ROUND_STAT_RANGE);
        self.round_starting_equipment_value =
            snap_to_step(clamp(self.round_starting_equipment_value, EQUIPMENT_VALUE_RANGE));
    }
}

/// Nearest multiple of `EQUIPMENT_VALUE_STEP`, halves rounding up, kept inside the range.
fn snap_to_step(value: u32) -> u32 {
    let snapped = (value + EQUIPMENT_VALUE_STEP / 2) / EQUIPMENT_VALUE_STEP * EQUIPMENT_VALUE_STEP;
    snapped.min(*EQUIPMENT_VALUE_RANGE.end())
}

/// Model metadata echoed with every headshot prediction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadshotModelInfo {
    pub model_type: String,
    pub features_used: u32,
    pub prediction_range: String,
    pub accuracy_note: String,
}

/// Regressor output for one player round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeadshotPrediction {
    /// Expected headshots; the service may return two decimals.
    pub predicted_headshots: f64,
    pub confidence_score: f64,
    pub player_stats: PlayerStats,
    #[serde(default)]
    pub model_info: HeadshotModelInfo,
}

impl HeadshotPrediction {
    pub fn confidence_tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_fraction(self.confidence_score)
    }

    pub fn confidence_percent(&self) -> u8 {
        confidence_percent(self.confidence_score)
    }

    pub fn headshots_label(&self) -> String {
        format_headshots(self.predicted_headshots)
    }
}

/// Whole numbers print bare, fractional ones with two decimals.
pub fn format_headshots(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Format an equipment value as dollars with thousands separators.
pub fn format_currency(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}

/// Schema marker for the headshot count view.
#[derive(Debug)]
pub enum HeadshotCount {}

impl PredictionSchema for HeadshotCount {
    type Request = PlayerStats;
    type Response = HeadshotPrediction;

    const NAME: &'static str = "headshot_count";
    const KEEPS_HISTORY: bool = true;

    fn clamp_request(request: &mut PlayerStats) {
        request.clamp_to_bounds();
    }

    fn failure_message(_error: &PredictError) -> String {
        FAILURE_MESSAGE.to_string()
    }

    fn summarize(response: &HeadshotPrediction) -> PredictionSummary {
        PredictionSummary {
            value: response.predicted_headshots,
            confidence: response.confidence_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_stats_serialize_to_service_shape() {
        let value = serde_json::to_value(PlayerStats::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "match_kills": 15,
                "round_kills": 2,
                "round_assists": 1,
                "round_flank_kills": 0,
                "round_starting_equipment_value": 4500,
                "primary_assault_rifle": 1,
                "primary_sniper_rifle": 0
            })
        );
    }

    #[test]
    fn clamp_respects_per_field_bounds() {
        let mut stats = PlayerStats {
            match_kills: 140,
            round_kills: 9,
            round_assists: 6,
            round_flank_kills: 3,
            round_starting_equipment_value: 20_000,
            ..PlayerStats::default()
        };
        stats.clamp_to_bounds();
        assert_eq!(stats.match_kills, 100);
        assert_eq!(stats.round_kills, 5);
        assert_eq!(stats.round_assists, 5);
        assert_eq!(stats.round_flank_kills, 3);
        assert_eq!(stats.round_starting_equipment_value, 16_000);
    }

    #[test]
    fn equipment_value_snaps_to_nearest_hundred() {
        for (raw, expected) in [(4537, 4500), (4550, 4600), (49, 0), (16_049, 16_000)] {
            let mut stats = PlayerStats {
                round_starting_equipment_value: raw,
                ..PlayerStats::default()
            };
            stats.clamp_to_bounds();
            assert_eq!(stats.round_starting_equipment_value, expected, "raw value {raw}");
        }
    }

    #[test]
    fn parses_service_response_with_fractional_headshots() {
        let prediction: HeadshotPrediction = serde_json::from_value(json!({
            "predicted_headshots": 1.37,
            "confidence_score": 0.85,
            "player_stats": serde_json::to_value(PlayerStats::default()).unwrap(),
            "model_info": {
                "model_type": "Random Forest Regressor",
                "features_used": 7,
                "prediction_range": "0-5 headshots",
                "accuracy_note": "Modelo real"
            }
        }))
        .unwrap();
        assert_eq!(prediction.headshots_label(), "1.37");
        assert_eq!(prediction.confidence_tier(), ConfidenceTier::High);
        assert_eq!(prediction.model_info.features_used, 7);
        assert_eq!(prediction.player_stats, PlayerStats::default());
    }

    #[test]
    fn whole_headshot_counts_print_without_decimals() {
        assert_eq!(format_headshots(2.0), "2");
        assert_eq!(format_headshots(0.5), "0.50");
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(950), "$950");
        assert_eq!(format_currency(4500), "$4,500");
        assert_eq!(format_currency(16000), "$16,000");
        assert_eq!(format_currency(1_234_567), "$1,234,567");
    }

    #[test]
    fn every_failure_mentions_the_backend() {
        let message = HeadshotCount::failure_message(&PredictError::Json("eof".to_string()));
        assert!(message.contains("backend"));
        let status = PredictError::Status {
            code: 500,
            body: String::new(),
        };
        assert_eq!(HeadshotCount::failure_message(&status), message);
    }
}
