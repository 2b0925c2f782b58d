//! Boundary to the external middleware.
//!
//! Discovery, session management, and transport belong to the middleware
//! runtime, not to this crate. This module defines the seam the producer and
//! consumer are written against, plus two stand-ins for the collaborator:
//!
//! - [`local`] pairs both roles in-process over channels, and is the
//!   reference for the availability semantics.
//!
//! - [`udp`] carries messages between the demo binaries as datagrams with a
//!   SOME/IP-layout header. It does no discovery beyond a single find/offer
//!   ping, and no session management.
//!
//! Availability is surfaced to producers as a [`watch::Receiver`]: a boolean
//! written by the link when the remote service instance's reachability
//! changes, and read by every producer task before transmitting.

use crate::{someip::Message, Result};
use tokio::sync::watch;

pub mod local;

pub mod udp;

/// A trait for sending messages to the remote service instance.
pub trait Sender {
    /// Sends the message to the remote service instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the link can no longer carry messages.
    #[allow(async_fn_in_trait)]
    async fn send(&mut self, message: Message) -> Result<()>;

    /// Returns a watch on the remote service instance's availability.
    ///
    /// The watch holds `false` until the remote instance is reported
    /// reachable, and reverts to `false` when it is withdrawn.
    fn availability(&self) -> watch::Receiver<bool>;
}

/// A trait for receiving messages addressed to the offered service instance.
pub trait Receiver {
    /// Receives the next inbound message.
    ///
    /// Returns [`None`] if the link is closed and will not deliver any more
    /// messages.
    #[allow(async_fn_in_trait)]
    async fn recv(&mut self) -> Option<Message>;
}
