//! Consumer-side dispatch and display.
//!
//! The gateway routes each inbound message by its method id, decodes the
//! fixed-layout payload, and classifies the reading for display. The mapping
//! from method id to sensor kind is static for the lifetime of the process;
//! unknown ids are dropped without affecting anything else.

use crate::{
    classify::{self, Condition},
    link::Receiver,
    sensor::{Reading, SensorKind},
    someip::Message,
    wire, Error, Result,
};
use tokio_util::sync::CancellationToken;

/// Dispatches inbound sensor messages.
///
/// Owns the running message count; there is no ambient state.
#[derive(Debug, Default)]
pub struct Consumer {
    received: u64,
}

impl Consumer {
    /// Creates a new [`Consumer`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of messages dispatched so far.
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Routes a message to its sensor kind and classifies the decoded
    /// reading.
    ///
    /// Decoded values are passed to the classifier unvalidated; range
    /// clamping is a producer-side concern.
    ///
    /// # Errors
    ///
    /// Returns an error if the method id is not mapped to a sensor kind. The
    /// message count is unchanged in that case.
    pub fn handle(&mut self, message: &Message) -> Result<Observation> {
        let kind =
            SensorKind::from_method(message.method).ok_or(Error::UnknownMethod(message.method))?;
        let reading = wire::decode(&message.payload);
        let condition = classify::classify(kind, &reading);
        self.received += 1;
        Ok(Observation {
            sequence: self.received,
            kind,
            reading,
            condition,
        })
    }

    /// Drains the receiver until the link closes or the token is cancelled,
    /// logging each observation.
    pub async fn run<R>(&mut self, mut receiver: R, token: CancellationToken)
    where
        R: Receiver,
    {
        loop {
            let message = tokio::select! {
                () = token.cancelled() => return,
                message = receiver.recv() => message,
            };
            let Some(message) = message else {
                tracing::info!("link closed");
                return;
            };
            match self.handle(&message) {
                Ok(observation) if observation.condition.is_alert() => {
                    tracing::warn!("{observation}");
                }
                Ok(observation) => tracing::info!("{observation}"),
                Err(error) => tracing::warn!(%message, %error, "dropped message"),
            }
        }
    }
}

/// A dispatched and classified sensor reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Position of the message in the received sequence, starting at 1.
    pub sequence: u64,
    pub kind: SensorKind,
    pub reading: Reading,
    pub condition: Condition,
}

impl std::fmt::Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[#{:4}] {}: {:.1} {}",
            self.sequence,
            self.kind,
            self.reading.value,
            self.kind.unit()
        )?;
        if self.condition.is_alert() {
            write!(f, " ({})", self.condition)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
