//! Datagram link between the demo binaries.
//!
//! Each message travels as a single datagram with a 16-byte SOME/IP-layout
//! header (message id, length, request id, protocol and interface versions,
//! message type, return code, all big-endian) followed by the opaque payload.
//!
//! Reachability is learned through a minimal find/offer exchange: the
//! producer side pings the configured gateway address until it answers, then
//! reports the remote instance available. A real middleware would own this
//! exchange, along with everything else this module deliberately leaves out.

use crate::{
    link::{Receiver, Sender},
    someip::{Message, MethodId, ServiceId, INSTANCE_ID, SERVICE_ID},
    Error, Result,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::{
    net,
    sync::{mpsc, watch},
    time,
};
use tokio_util::sync::{CancellationToken, DropGuard};

/// Max size of a datagram carried by the link, in bytes.
const MAX_DATAGRAM_SIZE: usize = 1400;

/// Size of the frame header, in bytes.
const HEADER_SIZE: usize = 16;

/// Method id of the find/offer ping.
const FIND_METHOD: MethodId = 0x0000;

/// Client id stamped into the request id of outbound frames.
const CLIENT_ID: u16 = 0x0001;

/// Interval between find pings while the gateway is unreachable.
const FIND_PERIOD: Duration = Duration::from_secs(1);

const PROTOCOL_VERSION: u8 = 0x01;
const INTERFACE_VERSION: u8 = 0x00;
const RETURN_CODE_OK: u8 = 0x00;

/// Connects the producer side of the link to a gateway address.
///
/// The returned sender reports the gateway as unavailable until it answers a
/// find ping.
///
/// # Errors
///
/// Returns an error if the local address cannot be bound or the remote
/// address cannot be set as the socket's peer.
pub async fn connect(local: SocketAddr, remote: SocketAddr) -> Result<UdpSender> {
    let socket = Arc::new(net::UdpSocket::bind(local).await?);
    socket.connect(remote).await?;
    let (availability_tx, availability_rx) = watch::channel(false);
    let token = CancellationToken::new();
    FindTask::spawn(socket.clone(), availability_tx, token.child_token());
    Ok(UdpSender {
        socket,
        availability: availability_rx,
        session: 0,
        _guard: Arc::new(token.drop_guard()),
    })
}

/// Binds the consumer side of the link and offers the service instance.
///
/// # Errors
///
/// Returns an error if the local address cannot be bound.
pub async fn offer(local: SocketAddr) -> Result<UdpReceiver> {
    let socket = Arc::new(net::UdpSocket::bind(local).await?);
    let (messages_tx, messages_rx) = mpsc::channel(32);
    let token = CancellationToken::new();
    OfferTask::spawn(socket, messages_tx, token.child_token());
    Ok(UdpReceiver {
        messages: messages_rx,
        _guard: token.drop_guard(),
    })
}

/// The producer half of a datagram link.
#[derive(Debug, Clone)]
pub struct UdpSender {
    // Socket connected to the gateway address.
    socket: Arc<net::UdpSocket>,
    // Reachability of the gateway, written by the find task.
    availability: watch::Receiver<bool>,
    // Session counter for outbound request ids.
    session: u16,
    // Stops the find task when the last clone is dropped.
    _guard: Arc<DropGuard>,
}

impl Sender for UdpSender {
    async fn send(&mut self, message: Message) -> Result<()> {
        let header = Frame {
            service: message.service,
            method: message.method,
            request: (u32::from(CLIENT_ID) << 16) | u32::from(self.session),
            frame_type: FrameType::RequestNoReturn,
        };
        self.session = self.session.wrapping_add(1);
        self.socket.send(&header.encode(&message.payload)).await?;
        Ok(())
    }

    fn availability(&self) -> watch::Receiver<bool> {
        self.availability.clone()
    }
}

/// The consumer half of a datagram link.
#[derive(Debug)]
pub struct UdpReceiver {
    // Messages decoded by the offer task.
    messages: mpsc::Receiver<Message>,
    // Stops the offer task when the receiver is dropped.
    _guard: DropGuard,
}

impl Receiver for UdpReceiver {
    async fn recv(&mut self) -> Option<Message> {
        self.messages.recv().await
    }
}

/// Pings the gateway until it answers, then tracks its availability.
struct FindTask {
    socket: Arc<net::UdpSocket>,
    availability: watch::Sender<bool>,
    buffer: Box<[u8]>,
}

impl FindTask {
    /// Spawns a new [`FindTask`] and runs it until the token is cancelled.
    fn spawn(socket: Arc<net::UdpSocket>, availability: watch::Sender<bool>, token: CancellationToken) {
        let mut task = Self {
            socket,
            availability,
            buffer: vec![0u8; MAX_DATAGRAM_SIZE].into_boxed_slice(),
        };
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {},
                () = task.run() => {}
            };
        });
    }

    /// Sends find pings while unreachable and processes inbound frames.
    async fn run(&mut self) {
        let ping = Frame {
            service: SERVICE_ID,
            method: FIND_METHOD,
            request: u32::from(CLIENT_ID) << 16,
            frame_type: FrameType::Request,
        }
        .encode(&[]);
        loop {
            if !*self.availability.borrow() {
                // Send errors here are transient (e.g. ICMP refusals while
                // the gateway is down); the next ping retries.
                let _ = self.socket.send(&ping).await;
            }
            let received = time::timeout(FIND_PERIOD, self.socket.recv(&mut self.buffer[..])).await;
            if let Ok(Ok(size)) = received {
                self.process_frame(size);
            }
        }
    }

    /// Marks the gateway available when it answers the find ping.
    fn process_frame(&mut self, size: usize) {
        let Ok((header, _)) = Frame::decode(&self.buffer[..size]) else {
            return;
        };
        if header.frame_type == FrameType::Response
            && header.method == FIND_METHOD
            && !self.availability.send_replace(true)
        {
            tracing::info!(service = SERVICE_ID, "gateway available");
        }
    }
}

/// Answers find pings and forwards sensor frames to the consumer.
struct OfferTask {
    socket: Arc<net::UdpSocket>,
    messages: mpsc::Sender<Message>,
    buffer: Box<[u8]>,
}

impl OfferTask {
    /// Spawns a new [`OfferTask`] and runs it until the token is cancelled.
    fn spawn(socket: Arc<net::UdpSocket>, messages: mpsc::Sender<Message>, token: CancellationToken) {
        let mut task = Self {
            socket,
            messages,
            buffer: vec![0u8; MAX_DATAGRAM_SIZE].into_boxed_slice(),
        };
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {},
                () = task.run() => {}
            };
        });
    }

    /// Reads frames from the socket until it closes or the consumer is gone.
    async fn run(&mut self) {
        while let Ok((size, source)) = self.socket.recv_from(&mut self.buffer[..]).await {
            match Frame::decode(&self.buffer[..size]) {
                Err(error) => {
                    tracing::warn!(%error, %source, "dropped frame");
                }
                Ok((header, _))
                    if header.frame_type == FrameType::Request && header.method == FIND_METHOD =>
                {
                    let pong = Frame {
                        frame_type: FrameType::Response,
                        ..header
                    }
                    .encode(&[]);
                    let _ = self.socket.send_to(&pong, source).await;
                    tracing::debug!(%source, "answered find ping");
                }
                Ok((header, payload)) => {
                    let message = Message {
                        service: header.service,
                        instance: INSTANCE_ID,
                        method: header.method,
                        payload: payload.to_vec(),
                    };
                    if self.messages.send(message).await.is_err() {
                        return;
                    }
                }
            }
        }
    }
}

/// Header of a datagram frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    service: ServiceId,
    method: MethodId,
    request: u32,
    frame_type: FrameType,
}

impl Frame {
    /// Encodes the header and payload into a datagram.
    fn encode(&self, payload: &[u8]) -> Vec<u8> {
        #[allow(clippy::cast_possible_truncation)] // Payloads fit a datagram.
        let length = payload.len() as u32 + 8;
        let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
        frame.extend_from_slice(
            &((u32::from(self.service) << 16) | u32::from(self.method)).to_be_bytes(),
        );
        frame.extend_from_slice(&length.to_be_bytes());
        frame.extend_from_slice(&self.request.to_be_bytes());
        frame.push(PROTOCOL_VERSION);
        frame.push(INTERFACE_VERSION);
        frame.push(self.frame_type.into());
        frame.push(RETURN_CODE_OK);
        frame.extend_from_slice(payload);
        frame
    }

    /// Decodes a datagram into its header and payload.
    ///
    /// The payload is cut to the length declared in the header; a declared
    /// length past the end of the datagram yields the available bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the datagram is shorter than the header.
    fn decode(buffer: &[u8]) -> Result<(Self, &[u8])> {
        #![allow(clippy::cast_possible_truncation)] // Truncation is intended.
        let Some((header, rest)) = buffer.split_first_chunk::<HEADER_SIZE>() else {
            return Err(Error::ShortFrame(buffer.len()));
        };
        let message = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);
        let length = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);
        let request = u32::from_be_bytes([header[8], header[9], header[10], header[11]]);
        let frame = Self {
            service: (message >> 16) as ServiceId,
            method: (message & 0xffff) as MethodId,
            request,
            frame_type: FrameType::from(header[14]),
        };
        let declared = usize::try_from(length.saturating_sub(8)).unwrap_or(usize::MAX);
        Ok((frame, &rest[..declared.min(rest.len())]))
    }
}

/// Identifies the type of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameType {
    Request,
    RequestNoReturn,
    Response,
    Unknown(u8),
}

impl From<u8> for FrameType {
    fn from(value: u8) -> Self {
        match value {
            0x00 => Self::Request,
            0x01 => Self::RequestNoReturn,
            0x80 => Self::Response,
            x => Self::Unknown(x),
        }
    }
}

impl From<FrameType> for u8 {
    fn from(value: FrameType) -> Self {
        match value {
            FrameType::Request => 0x00,
            FrameType::RequestNoReturn => 0x01,
            FrameType::Response => 0x80,
            FrameType::Unknown(x) => x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sensor::Reading, testing::ipv4, wire};

    #[test]
    fn frame_round_trips_through_a_datagram() {
        let header = Frame {
            service: SERVICE_ID,
            method: 0x0002,
            request: 0x0001_0007,
            frame_type: FrameType::RequestNoReturn,
        };
        let payload = wire::encode(&Reading::new(92.5, 1234));
        let datagram = header.encode(&payload);
        assert_eq!(datagram.len(), HEADER_SIZE + wire::SIZE);

        let (decoded, rest) = Frame::decode(&datagram).expect("should decode the frame");
        assert_eq!(decoded, header);
        assert_eq!(rest, &payload);
    }

    #[test]
    fn short_datagrams_are_rejected() {
        let result = Frame::decode(&[0u8; HEADER_SIZE - 1]);
        assert!(matches!(result, Err(Error::ShortFrame(15))));
    }

    #[test]
    fn payload_is_cut_to_the_declared_length() {
        let header = Frame {
            service: SERVICE_ID,
            method: 0x0001,
            request: 0,
            frame_type: FrameType::RequestNoReturn,
        };
        let mut datagram = header.encode(&[0xaa; 4]);
        datagram.extend_from_slice(&[0xbb; 4]);

        let (_, payload) = Frame::decode(&datagram).expect("should decode the frame");
        assert_eq!(payload, &[0xaa; 4]);
    }

    #[tokio::test]
    async fn link_carries_a_reading_end_to_end() {
        let gateway_address = ipv4!();
        let mut receiver = offer(gateway_address)
            .await
            .expect("should bind the gateway side");

        let mut sender = connect(ipv4!(), gateway_address)
            .await
            .expect("should connect the producer side");

        // Wait for the find/offer exchange to complete.
        let mut availability = sender.availability();
        availability
            .wait_for(|available| *available)
            .await
            .expect("should report the gateway available");

        let reading = Reading::new(85.5, 12345);
        let message = Message::new(0x0001, wire::encode(&reading).to_vec());
        sender
            .send(message.clone())
            .await
            .expect("should send the message");

        let received = receiver.recv().await.expect("should receive the message");
        assert_eq!(received, message);
        assert_eq!(wire::decode(&received.payload), reading);
    }
}
