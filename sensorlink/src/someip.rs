//! Common types of the SOME/IP-style addressing scheme.
//!
//! A message is addressed by a (service, instance, method) triple. Within the
//! demo, the service and instance are fixed, and the method id is the sole
//! discriminator between the three sensor record kinds.

/// Identifier of a service interface.
pub type ServiceId = u16;

/// Identifier of an instance of a service.
pub type InstanceId = u16;

/// Identifier of a method or event.
pub type MethodId = u16;

/// Identifier of a method of a service.
pub type MessageId = u32;

/// Service id of the demo vehicle sensor service.
pub const SERVICE_ID: ServiceId = 0x1234;

/// Instance id of the demo vehicle sensor service.
pub const INSTANCE_ID: InstanceId = 0x0001;

/// A payload addressed to a method of a service instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub service: ServiceId,
    pub instance: InstanceId,
    pub method: MethodId,
    pub payload: Vec<u8>,
}

impl Message {
    /// Creates a new [`Message`] addressed to the given method of the demo
    /// service.
    #[must_use]
    pub fn new(method: MethodId, payload: Vec<u8>) -> Self {
        Self {
            service: SERVICE_ID,
            instance: INSTANCE_ID,
            method,
            payload,
        }
    }

    /// Returns the [`MessageId`] of this [`Message`].
    pub fn id(&self) -> MessageId {
        (MessageId::from(self.service) << 16) | MessageId::from(self.method)
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:04x}.{:04x}.{:04x}]",
            self.service, self.instance, self.method
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_id_combines_service_and_method() {
        let message = Message::new(0x0002, Vec::new());
        assert_eq!(message.id(), 0x1234_0002);
    }

    #[test]
    fn message_displays_its_address() {
        let message = Message::new(0x0003, vec![0u8; 8]);
        assert_eq!(format!("{message}"), "[1234.0001.0003]");
    }
}
