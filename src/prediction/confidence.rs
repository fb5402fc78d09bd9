//! Three-tier qualitative labels for model confidence.

/// Qualitative bucket for a confidence value, driving label and color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// Classify a whole-number percentage: 80 and above is high, 60 and above medium.
    pub fn from_percent(percent: u8) -> Self {
        if percent >= 80 {
            Self::High
        } else if percent >= 60 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Classify a raw fraction in `[0, 1]` without rounding first.
    pub fn from_fraction(confidence: f64) -> Self {
        if confidence >= 0.8 {
            Self::High
        } else if confidence >= 0.6 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "Alta",
            Self::Medium => "Media",
            Self::Low => "Baja",
        }
    }
}

/// Convert a probability to a rounded percentage, clamped to `0..=100`.
pub fn confidence_percent(probability: f64) -> u8 {
    if probability.is_nan() {
        return 0;
    }
    (probability.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_thresholds_split_into_three_tiers() {
        assert_eq!(ConfidenceTier::from_percent(100), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_percent(80), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_percent(79), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_percent(60), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_percent(59), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_percent(0), ConfidenceTier::Low);
    }

    #[test]
    fn probability_085_is_high() {
        let percent = confidence_percent(0.85);
        assert_eq!(percent, 85);
        assert_eq!(ConfidenceTier::from_percent(percent), ConfidenceTier::High);
    }

    #[test]
    fn rounding_can_lift_a_fraction_into_the_next_tier() {
        assert_eq!(confidence_percent(0.795), 80);
        assert_eq!(ConfidenceTier::from_percent(80), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_fraction(0.795), ConfidenceTier::Medium);
    }

    #[test]
    fn out_of_range_probabilities_are_clamped() {
        assert_eq!(confidence_percent(1.7), 100);
        assert_eq!(confidence_percent(-0.2), 0);
        assert_eq!(confidence_percent(f64::NAN), 0);
    }

    #[test]
    fn labels_are_spanish() {
        assert_eq!(ConfidenceTier::High.label(), "Alta");
        assert_eq!(ConfidenceTier::Medium.label(), "Media");
        assert_eq!(ConfidenceTier::Low.label(), "Baja");
    }
}
