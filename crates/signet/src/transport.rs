// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Transport seam: typed publish/subscribe endpoints over an opaque
//! byte-oriented transport.
//!
//! The codec layer never does I/O. A [`Transport`] implementation carries
//! framed payloads between processes (or, for [`LoopbackTransport`], within
//! one); [`Publisher`] and [`Subscription`] bind a topic to a registered
//! message type on either side of it.

use crate::codec;
use crate::error::CodecError;
use crate::message::DynamicMessage;
use crate::registry::{TypeHandle, TypeRegistry};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Byte-oriented message transport. `send` delivers one framed payload to
/// every endpoint subscribed to `topic`.
pub trait Transport: Send + Sync {
    fn send(&self, topic: &str, payload: &[u8]) -> io::Result<()>;
}

/// Errors surfaced by [`Publisher::publish`].
#[derive(Debug)]
pub enum PublishError {
    Codec(CodecError),
    Io(io::Error),
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishError::Codec(err) => write!(f, "encode failed: {}", err),
            PublishError::Io(err) => write!(f, "transport send failed: {}", err),
        }
    }
}

impl std::error::Error for PublishError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PublishError::Codec(err) => Some(err),
            PublishError::Io(err) => Some(err),
        }
    }
}

impl From<CodecError> for PublishError {
    fn from(err: CodecError) -> Self {
        PublishError::Codec(err)
    }
}

impl From<io::Error> for PublishError {
    fn from(err: io::Error) -> Self {
        PublishError::Io(err)
    }
}

/// Sending half of a topic: encodes messages of one registered type and
/// hands the framed bytes to the transport.
pub struct Publisher {
    registry: Arc<TypeRegistry>,
    transport: Arc<dyn Transport>,
    topic: String,
    handle: TypeHandle,
}

impl Publisher {
    pub fn new(
        registry: Arc<TypeRegistry>,
        transport: Arc<dyn Transport>,
        topic: impl Into<String>,
        handle: TypeHandle,
    ) -> Self {
        Self {
            registry,
            transport,
            topic: topic.into(),
            handle,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Encode and send one message.
    ///
    /// Panics if the message is of a different registered type than the
    /// publisher was bound to; that is a wiring defect, not a data error.
    pub fn publish(&self, message: &DynamicMessage) -> Result<(), PublishError> {
        assert_eq!(
            message.handle(),
            self.handle,
            "publisher for `{}` was given a `{}` message",
            self.registry.name(self.handle),
            message.type_name()
        );
        let bytes = codec::encode(&self.registry, message)?;
        log::trace!("publishing {} bytes on `{}`", bytes.len(), self.topic);
        self.transport.send(&self.topic, &bytes)?;
        Ok(())
    }
}

/// Receiving half of a topic: decodes framed payloads into messages of one
/// registered type.
///
/// A payload that fails to decode is logged and dropped; one bad frame
/// never tears down the subscription.
pub struct Subscription {
    registry: Arc<TypeRegistry>,
    topic: String,
    handle: TypeHandle,
}

impl Subscription {
    pub fn new(
        registry: Arc<TypeRegistry>,
        topic: impl Into<String>,
        handle: TypeHandle,
    ) -> Self {
        Self {
            registry,
            topic: topic.into(),
            handle,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Decode one raw payload received on this subscription's topic.
    pub fn accept(&self, payload: &[u8]) -> Option<DynamicMessage> {
        match codec::decode(&self.registry, self.handle, payload) {
            Ok(message) => Some(message),
            Err(err) => {
                log::warn!("dropping message on `{}`: {}", self.topic, err);
                None
            }
        }
    }
}

type Handler = Box<dyn Fn(&[u8]) + Send + Sync>;

/// In-process transport delivering each send synchronously to every handler
/// attached to the topic. Useful for tests and single-process wiring.
#[derive(Default)]
pub struct LoopbackTransport {
    topics: RwLock<HashMap<String, Vec<Handler>>>,
}

impl LoopbackTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a raw payload handler to `topic`.
    pub fn attach(&self, topic: impl Into<String>, handler: impl Fn(&[u8]) + Send + Sync + 'static) {
        self.topics
            .write()
            .entry(topic.into())
            .or_default()
            .push(Box::new(handler));
    }
}

impl Transport for LoopbackTransport {
    fn send(&self, topic: &str, payload: &[u8]) -> io::Result<()> {
        let topics = self.topics.read();
        if let Some(handlers) = topics.get(topic) {
            for handler in handlers {
                handler(payload);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TypeDescriptorBuilder;
    use crate::types::ScalarKind;
    use std::sync::mpsc;

    fn setup() -> (Arc<TypeRegistry>, TypeHandle) {
        let mut registry = TypeRegistry::new();
        let handle = registry.register(
            TypeDescriptorBuilder::new("Tick")
                .scalar("seq", ScalarKind::I64)
                .build(),
        );
        (Arc::new(registry), handle)
    }

    #[test]
    fn test_publish_reaches_attached_handler() {
        let (registry, handle) = setup();
        let transport = Arc::new(LoopbackTransport::new());
        let (tx, rx) = mpsc::channel::<Vec<u8>>();
        transport.attach("ticks", move |payload| {
            tx.send(payload.to_vec()).expect("send");
        });

        let publisher = Publisher::new(registry.clone(), transport, "ticks", handle);
        let mut msg = DynamicMessage::new(&registry, handle);
        msg.set("seq", 9i64).expect("set seq");
        publisher.publish(&msg).expect("publish");

        let payload = rx.try_recv().expect("payload delivered");
        let subscription = Subscription::new(registry, "ticks", handle);
        let back = subscription.accept(&payload).expect("decodes");
        assert_eq!(back.get::<i64>("seq").expect("seq"), 9);
    }

    #[test]
    fn test_publish_without_subscribers_is_ok() {
        let (registry, handle) = setup();
        let transport = Arc::new(LoopbackTransport::new());
        let publisher = Publisher::new(registry.clone(), transport, "quiet", handle);
        let msg = DynamicMessage::new(&registry, handle);
        publisher.publish(&msg).expect("publish");
    }

    #[test]
    fn test_subscription_drops_undecodable_payload() {
        let (registry, handle) = setup();
        let subscription = Subscription::new(registry, "ticks", handle);
        assert!(subscription.accept(&[1, 2, 3]).is_none());
    }

    #[test]
    #[should_panic(expected = "was given a")]
    fn test_publisher_rejects_wrong_type() {
        let mut registry = TypeRegistry::new();
        let tick = registry.register(
            TypeDescriptorBuilder::new("Tick")
                .scalar("seq", ScalarKind::I64)
                .build(),
        );
        let other = registry.register(
            TypeDescriptorBuilder::new("Other")
                .scalar("n", ScalarKind::I32)
                .build(),
        );
        let registry = Arc::new(registry);
        let transport = Arc::new(LoopbackTransport::new());
        let publisher = Publisher::new(registry.clone(), transport, "ticks", tick);
        let msg = DynamicMessage::new(&registry, other);
        let _ = publisher.publish(&msg);
    }
}
