//! `sensorlink` error types.

use crate::someip::MethodId;
use thiserror::Error;

/// A specialized result type for `sensorlink` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// An error associated with `sensorlink` operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The link to the peer has been closed and cannot carry any more
    /// messages.
    #[error("link closed")]
    LinkClosed,
    /// The message carried a method id which is not mapped to any sensor
    /// kind.
    #[error("unknown method id: {0:#06x}")]
    UnknownMethod(MethodId),
    /// A received frame was too short to contain a message header.
    #[error("frame too short for header: {0} bytes")]
    ShortFrame(usize),
    /// A socket address argument could not be parsed.
    #[error("invalid socket address: {0}")]
    Addr(#[from] std::net::AddrParseError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
