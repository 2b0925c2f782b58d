//! Producer-side sampling and periodic transmission.
//!
//! The ECU runs one independent task per sensor kind. Each task mutates a
//! simulated value by a small random bounded delta, clamps it into the kind's
//! valid range, and sends the encoded reading at its own fixed period. Tasks
//! share nothing but the link's availability flag: samples taken while the
//! gateway is unreachable are discarded, never queued or retried.

use crate::{
    link::Sender,
    sensor::{Reading, SensorKind},
    someip::Message,
    wire,
};
use rand::Rng;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Sampling periods of the producer tasks.
#[derive(Debug, Clone)]
pub struct Config {
    pub speed_period: Duration,
    pub engine_period: Duration,
    pub ambient_period: Duration,
}

impl Config {
    /// Returns the sampling period for the given kind.
    #[must_use]
    pub const fn period(&self, kind: SensorKind) -> Duration {
        match kind {
            SensorKind::Speed => self.speed_period,
            SensorKind::EngineTemperature => self.engine_period,
            SensorKind::AmbientTemperature => self.ambient_period,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed_period: SensorKind::Speed.default_period(),
            engine_period: SensorKind::EngineTemperature.default_period(),
            ambient_period: SensorKind::AmbientTemperature.default_period(),
        }
    }
}

/// Simulated state of a single sensor.
#[derive(Debug)]
pub struct Simulator {
    kind: SensorKind,
    value: f32,
}

impl Simulator {
    /// Creates a new [`Simulator`] at the kind's initial value.
    #[must_use]
    pub fn new(kind: SensorKind) -> Self {
        Self {
            kind,
            value: kind.initial_value(),
        }
    }

    /// Advances the simulated value and samples it.
    ///
    /// The value moves by a random delta bounded by the kind's step size, and
    /// is clamped into the kind's valid range. The sample is stamped with the
    /// current unix time.
    pub fn step(&mut self) -> Reading {
        let delta = self.kind.step_delta();
        let range = self.kind.range();
        let jitter = rand::thread_rng().gen_range(-delta..=delta);
        self.value = (self.value + jitter).clamp(*range.start(), *range.end());
        Reading::new(self.value, unix_seconds())
    }
}

/// Runs the sampling loop for a single sensor kind.
///
/// Samples and sends at the given period while the link reports the gateway
/// available. Returns when the token is cancelled or the link closes.
pub async fn run<S>(kind: SensorKind, period: Duration, mut sender: S, token: CancellationToken)
where
    S: Sender,
{
    let mut simulator = Simulator::new(kind);
    let availability = sender.availability();
    let mut ticks = time::interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            () = token.cancelled() => return,
            _ = ticks.tick() => {}
        }
        let reading = simulator.step();
        if !*availability.borrow() {
            tracing::debug!(%kind, value = reading.value, "gateway unavailable, sample discarded");
            continue;
        }
        let message = Message::new(kind.method(), wire::encode(&reading).to_vec());
        if let Err(error) = sender.send(message).await {
            tracing::warn!(%kind, %error, "link closed, stopping producer");
            return;
        }
        tracing::debug!(%kind, value = reading.value, timestamp = reading.timestamp, "sent reading");
    }
}

/// Seconds since the unix epoch, saturating at zero for a misset clock.
fn unix_seconds() -> u32 {
    #![allow(clippy::cast_possible_truncation)] // Wraps in 2106.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs() as u32)
}
