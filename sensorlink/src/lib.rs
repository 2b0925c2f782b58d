//! A demonstration pair of vehicle telemetry programs built on a SOME/IP-style
//! service-oriented link.
//!
//! ## Overview
//!
//! An ECU periodically samples simulated sensor state (vehicle speed, engine
//! temperature, ambient temperature) and sends each sample to a gateway as a
//! fixed-layout 8-byte record addressed by a (service, instance, method)
//! triple. The gateway routes each record by its method id, decodes it, and
//! evaluates an advisory threshold condition for display.
//!
//! The service discovery, session management, and transport mechanics of a
//! real middleware are out of scope here; the [`link`] module defines the
//! boundary to that external collaborator and provides the minimal stand-ins
//! needed to run the demo pair and its tests.

#![warn(
    clippy::nursery,
    clippy::pedantic,
    clippy::expect_used,
    clippy::unwrap_used
)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::future_not_send
)]

pub mod classify;
pub mod consumer;
pub mod link;
pub mod producer;
pub mod sensor;
pub mod someip;
pub mod wire;

pub(crate) mod testing;

mod error;
pub use error::{Error, Result};
