//! In-process link between the producer and consumer roles.
//!
//! Both halves live in the same process and exchange messages over a bounded
//! channel. The consumer half owns the availability flag: it flips to `true`
//! when the consumer offers its service instance, and back to `false` when
//! the consumer half is dropped.

use crate::{
    link::{Receiver, Sender},
    someip::Message,
    Error, Result,
};
use tokio::sync::{mpsc, watch};

/// Creates a connected [`LocalSender`]-[`LocalReceiver`] pair.
///
/// `capacity` bounds the number of in-flight messages.
///
/// # Examples
///
/// ```rust
/// # tokio_test::block_on(async {
/// use sensorlink::link::{local, Receiver as _, Sender as _};
/// use sensorlink::someip::Message;
///
/// let (mut sender, mut receiver) = local::pair(4);
/// receiver.offer();
/// assert!(*sender.availability().borrow());
///
/// sender.send(Message::new(0x0001, vec![0u8; 8])).await.unwrap();
/// let message = receiver.recv().await.unwrap();
/// assert_eq!(message.method, 0x0001);
/// # });
/// ```
pub fn pair(capacity: usize) -> (LocalSender, LocalReceiver) {
    let (messages_tx, messages_rx) = mpsc::channel(capacity);
    let (offered, availability) = watch::channel(false);
    (
        LocalSender {
            messages: messages_tx,
            availability,
        },
        LocalReceiver {
            messages: messages_rx,
            offered,
        },
    )
}

/// The producer half of an in-process link.
#[derive(Debug, Clone)]
pub struct LocalSender {
    messages: mpsc::Sender<Message>,
    availability: watch::Receiver<bool>,
}

impl Sender for LocalSender {
    async fn send(&mut self, message: Message) -> Result<()> {
        self.messages
            .send(message)
            .await
            .map_err(|_| Error::LinkClosed)
    }

    fn availability(&self) -> watch::Receiver<bool> {
        self.availability.clone()
    }
}

/// The consumer half of an in-process link.
#[derive(Debug)]
pub struct LocalReceiver {
    messages: mpsc::Receiver<Message>,
    offered: watch::Sender<bool>,
}

impl LocalReceiver {
    /// Reports the service instance as available to the producer half.
    pub fn offer(&self) {
        self.offered.send_replace(true);
    }
}

impl Receiver for LocalReceiver {
    async fn recv(&mut self) -> Option<Message> {
        self.messages.recv().await
    }
}

impl Drop for LocalReceiver {
    // Withdraws the service instance when the consumer half goes away.
    fn drop(&mut self) {
        self.offered.send_replace(false);
    }
}
