//! Sensor record model.
//!
//! The three record kinds carried by the demo service share a single shape: a
//! 32-bit float value and a 32-bit unsigned timestamp. They are distinguished
//! only by the method id they are addressed to, so they are modeled as one
//! [`Reading`] tagged by a [`SensorKind`] rather than three duplicated
//! structs.

use crate::someip::MethodId;
use std::{ops::RangeInclusive, time::Duration};

/// The kinds of sensor records exchanged by the demo service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Vehicle speed, in km/h.
    Speed,
    /// Engine coolant temperature, in °C.
    EngineTemperature,
    /// Outside air temperature, in °C.
    AmbientTemperature,
}

impl SensorKind {
    /// All sensor kinds, in method id order.
    pub const ALL: [Self; 3] = [Self::Speed, Self::EngineTemperature, Self::AmbientTemperature];

    /// Returns the method id a record of this kind is addressed to.
    ///
    /// The mapping is fixed for the lifetime of the process; it is the static
    /// dispatch table of the demo service.
    #[must_use]
    pub const fn method(self) -> MethodId {
        match self {
            Self::Speed => 0x0001,
            Self::EngineTemperature => 0x0002,
            Self::AmbientTemperature => 0x0003,
        }
    }

    /// Returns the kind addressed by the given method id, or [`None`] if the
    /// id is not mapped.
    #[must_use]
    pub const fn from_method(method: MethodId) -> Option<Self> {
        match method {
            0x0001 => Some(Self::Speed),
            0x0002 => Some(Self::EngineTemperature),
            0x0003 => Some(Self::AmbientTemperature),
            _ => None,
        }
    }

    /// Returns the physically valid range for simulated values of this kind.
    ///
    /// The producer clamps into this range before encoding; decoded values
    /// are never validated against it.
    #[must_use]
    pub const fn range(self) -> RangeInclusive<f32> {
        match self {
            Self::Speed => 0.0..=180.0,
            Self::EngineTemperature => 70.0..=115.0,
            Self::AmbientTemperature => -30.0..=45.0,
        }
    }

    /// Returns the largest per-step change of the simulated value.
    #[must_use]
    pub const fn step_delta(self) -> f32 {
        match self {
            Self::Speed => 5.0,
            Self::EngineTemperature => 2.0,
            Self::AmbientTemperature => 1.5,
        }
    }

    /// Returns the initial simulated value for this kind.
    #[must_use]
    pub const fn initial_value(self) -> f32 {
        match self {
            Self::Speed => 60.0,
            Self::EngineTemperature => 90.0,
            Self::AmbientTemperature => 15.0,
        }
    }

    /// Returns the default sampling period for this kind.
    #[must_use]
    pub const fn default_period(self) -> Duration {
        match self {
            Self::Speed => Duration::from_secs(2),
            Self::EngineTemperature => Duration::from_secs(3),
            Self::AmbientTemperature => Duration::from_secs(5),
        }
    }

    /// Returns the measurement unit of this kind, for display.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Speed => "km/h",
            Self::EngineTemperature | Self::AmbientTemperature => "°C",
        }
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Speed => write!(f, "speed"),
            Self::EngineTemperature => write!(f, "engine temperature"),
            Self::AmbientTemperature => write!(f, "ambient temperature"),
        }
    }
}

/// A single sensor sample.
///
/// Readings are transient values: they exist only between an encode and a
/// decode, and carry no identity beyond their fields.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Measured value, in the unit of the sensor kind.
    pub value: f32,
    /// Sample time, in seconds since the Unix epoch.
    pub timestamp: u32,
}

impl Reading {
    /// Creates a new [`Reading`].
    #[must_use]
    pub const fn new(value: f32, timestamp: u32) -> Self {
        Self { value, timestamp }
    }
}
