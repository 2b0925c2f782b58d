//! Threshold classifier for decoded sensor readings.
//!
//! The gateway evaluates each decoded reading against a per-kind advisory
//! threshold. Conditions are for display only; they never alter control flow
//! or stored state. Comparisons are strict: a value exactly at its threshold
//! is [`Condition::Nominal`].

use crate::sensor::{Reading, SensorKind};

/// Advisory condition of a sensor reading.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// The reading is within its advisory threshold.
    #[default]
    Nominal,
    /// Vehicle speed above 100 km/h.
    HighSpeed,
    /// Engine temperature above 100 °C.
    Overheat,
    /// Ambient temperature below 0 °C.
    Freezing,
}

impl Condition {
    /// Returns `true` if the condition warrants an alert.
    #[must_use]
    pub const fn is_alert(self) -> bool {
        !matches!(self, Self::Nominal)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nominal => write!(f, "nominal"),
            Self::HighSpeed => write!(f, "high speed"),
            Self::Overheat => write!(f, "overheat"),
            Self::Freezing => write!(f, "freezing"),
        }
    }
}

/// Per-kind threshold policy.
#[derive(Debug, Clone, Copy)]
enum Policy {
    /// Alert when the value is strictly above the threshold.
    Above(f32, Condition),
    /// Alert when the value is strictly below the threshold.
    Below(f32, Condition),
}

/// Alert policy lookup, indexed by sensor kind.
const fn policy(kind: SensorKind) -> Policy {
    match kind {
        SensorKind::Speed => Policy::Above(100.0, Condition::HighSpeed),
        SensorKind::EngineTemperature => Policy::Above(100.0, Condition::Overheat),
        SensorKind::AmbientTemperature => Policy::Below(0.0, Condition::Freezing),
    }
}

/// Classifies a decoded reading of the given kind.
///
/// Out-of-physical-range values (negative speeds, NaN temperatures) pass
/// through unmodified; range clamping is a producer-side concern.
#[must_use]
pub fn classify(kind: SensorKind, reading: &Reading) -> Condition {
    match policy(kind) {
        Policy::Above(threshold, condition) if reading.value > threshold => condition,
        Policy::Below(threshold, condition) if reading.value < threshold => condition,
        _ => Condition::Nominal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_value(kind: SensorKind, value: f32) -> Condition {
        classify(kind, &Reading::new(value, 0))
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(classify_value(SensorKind::Speed, 100.0), Condition::Nominal);
        assert_eq!(
            classify_value(SensorKind::Speed, 100.0001),
            Condition::HighSpeed
        );
        assert_eq!(
            classify_value(SensorKind::EngineTemperature, 100.0),
            Condition::Nominal
        );
        assert_eq!(
            classify_value(SensorKind::EngineTemperature, 100.0001),
            Condition::Overheat
        );
        assert_eq!(
            classify_value(SensorKind::AmbientTemperature, 0.0),
            Condition::Nominal
        );
        assert_eq!(
            classify_value(SensorKind::AmbientTemperature, -0.0001),
            Condition::Freezing
        );
    }

    #[test]
    fn nominal_readings_raise_no_alert() {
        assert_eq!(classify_value(SensorKind::Speed, 85.5), Condition::Nominal);
        assert!(!classify_value(SensorKind::Speed, 85.5).is_alert());
    }

    #[test]
    fn alerting_readings_are_flagged() {
        let condition = classify_value(SensorKind::Speed, 120.0);
        assert_eq!(condition, Condition::HighSpeed);
        assert!(condition.is_alert());
    }

    #[test]
    fn out_of_range_values_pass_through() {
        // Negative speed is physically impossible but still classified.
        assert_eq!(classify_value(SensorKind::Speed, -10.0), Condition::Nominal);
        // NaN compares false against any threshold.
        assert_eq!(
            classify_value(SensorKind::EngineTemperature, f32::NAN),
            Condition::Nominal
        );
    }

    #[test]
    fn conditions_display_their_labels() {
        assert_eq!(format!("{}", Condition::HighSpeed), "high speed");
        assert_eq!(format!("{}", Condition::Overheat), "overheat");
        assert_eq!(format!("{}", Condition::Freezing), "freezing");
    }
}
