//! Typed gateway events relevant to components.
//!
//! Whatever owns the gateway connection feeds raw payloads through
//! [`GatewayEvent::from_payload`] and gets back the handful of events the
//! component layer cares about: the session id from `READY`, new messages,
//! and component interactions. Everything else comes back as
//! [`GatewayEvent::Unknown`] with its raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::session::SessionHandle;
use crate::types::id::{ApplicationMarker, Id};
use crate::types::interaction::{ComponentInteraction, Interaction, InteractionType};
use crate::types::message::{Message, User};

/// Raw gateway frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GatewayPayload {
    pub op: u8,
    #[serde(default)]
    pub d: Option<Value>,
    #[serde(default)]
    pub s: Option<u64>,
    #[serde(default)]
    pub t: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ReadyApplication {
    pub id: Id<ApplicationMarker>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ReadyEvent {
    pub session_id: String,
    pub user: User,
    pub application: ReadyApplication,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GatewayEvent {
    /// Identify/resume succeeded; carries the session id.
    Ready(ReadyEvent),

    /// A message was created in a channel we can see.
    MessageCreate(Box<Message>),

    /// A user clicked a button or submitted a select.
    ComponentInteraction(Box<ComponentInteraction>),

    /// Gateway told us to reconnect (op 7).
    Reconnect,

    /// Session invalidated (op 9); `true` when it may be resumed.
    InvalidSession(bool),

    /// Anything else, kept raw.
    Unknown {
        event_name: Option<String>,
        op: u8,
        data: Option<Value>,
    },
}

fn parse_or_unknown<T: for<'de> Deserialize<'de>>(
    name: &str,
    data: Value,
    wrap: impl FnOnce(T) -> GatewayEvent,
) -> GatewayEvent {
    match serde_json::from_value::<T>(data.clone()) {
        Ok(parsed) => wrap(parsed),
        Err(e) => {
            warn!(event = name, error = %e, "failed to parse dispatch payload");
            GatewayEvent::Unknown {
                event_name: Some(name.to_string()),
                op: 0,
                data: Some(data),
            }
        }
    }
}

impl GatewayEvent {
    /// Convert a raw [`GatewayPayload`] into a typed event. Never fails.
    pub fn from_payload(payload: GatewayPayload) -> Self {
        match payload.op {
            0 => Self::parse_dispatch(payload.t, payload.d),
            7 => Self::Reconnect,
            9 => {
                let resumable = payload.d.as_ref().and_then(Value::as_bool).unwrap_or(false);
                Self::InvalidSession(resumable)
            }
            op => Self::Unknown {
                event_name: payload.t,
                op,
                data: payload.d,
            },
        }
    }

    fn parse_dispatch(event_name: Option<String>, data: Option<Value>) -> Self {
        let (name, d) = match (event_name, data) {
            (Some(name), Some(d)) => (name, d),
            (event_name, data) => {
                return Self::Unknown {
                    event_name,
                    op: 0,
                    data,
                }
            }
        };

        match name.as_str() {
            "READY" => parse_or_unknown(&name, d, Self::Ready),
            "MESSAGE_CREATE" => parse_or_unknown(&name, d, |message: Message| {
                Self::MessageCreate(Box::new(message))
            }),
            "INTERACTION_CREATE" => Self::parse_interaction(&name, d),
            _ => Self::Unknown {
                event_name: Some(name),
                op: 0,
                data: Some(d),
            },
        }
    }

    fn parse_interaction(name: &str, data: Value) -> Self {
        let unknown = |data| Self::Unknown {
            event_name: Some(name.to_string()),
            op: 0,
            data: Some(data),
        };

        let interaction = match serde_json::from_value::<Interaction>(data.clone()) {
            Ok(interaction) => interaction,
            Err(e) => {
                warn!(event = name, error = %e, "failed to parse INTERACTION_CREATE payload");
                return unknown(data);
            }
        };

        if interaction.kind != InteractionType::MessageComponent {
            debug!(kind = ?interaction.kind, "ignoring non-component interaction");
            return unknown(data);
        }

        match ComponentInteraction::try_from(interaction) {
            Ok(component) => Self::ComponentInteraction(Box::new(component)),
            Err(e) => {
                warn!(event = name, error = %e, "component interaction is incomplete");
                unknown(data)
            }
        }
    }

    /// Keep `session` in step with the gateway: set on `READY`, cleared when
    /// the session is invalidated for good.
    pub async fn track_session(&self, session: &SessionHandle) {
        match self {
            Self::Ready(ready) => session.set(ready.session_id.clone()).await,
            Self::InvalidSession(false) => session.clear().await,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionProvider;
    use crate::testing::message_json;
    use futures_lite::future::block_on;
    use serde_json::json;

    fn dispatch(t: &str, d: Value) -> GatewayPayload {
        GatewayPayload {
            op: 0,
            d: Some(d),
            s: Some(1),
            t: Some(t.to_string()),
        }
    }

    #[test]
    fn ready_feeds_session_handle() {
        block_on(async {
            let event = GatewayEvent::from_payload(dispatch(
                "READY",
                json!({
                    "session_id": "abc",
                    "user": {"id": "900", "username": "helper", "bot": true},
                    "application": {"id": "900"}
                }),
            ));
            assert!(matches!(event, GatewayEvent::Ready(_)));

            let session = SessionHandle::new();
            event.track_session(&session).await;
            assert_eq!(session.session_id().await.as_deref(), Some("abc"));

            GatewayEvent::InvalidSession(false)
                .track_session(&session)
                .await;
            assert_eq!(session.session_id().await, None);
        });
    }

    #[test]
    fn message_create_is_typed() {
        let event = GatewayEvent::from_payload(dispatch("MESSAGE_CREATE", message_json(0)));
        match event {
            GatewayEvent::MessageCreate(message) => assert_eq!(message.components.len(), 2),
            other => panic!("expected MessageCreate, got {other:?}"),
        }
    }

    #[test]
    fn component_interaction_is_typed() {
        let event = GatewayEvent::from_payload(dispatch(
            "INTERACTION_CREATE",
            json!({
                "id": "1",
                "application_id": "900",
                "type": 3,
                "token": "tok",
                "data": {"component_type": 2, "custom_id": "yes"},
                "message": message_json(0),
                "user": {"id": "5", "username": "bob"}
            }),
        ));
        match event {
            GatewayEvent::ComponentInteraction(interaction) => {
                assert_eq!(interaction.custom_id(), "yes");
                assert!(interaction.values().is_empty());
            }
            other => panic!("expected ComponentInteraction, got {other:?}"),
        }
    }

    #[test]
    fn slash_command_interaction_is_unknown() {
        let event = GatewayEvent::from_payload(dispatch(
            "INTERACTION_CREATE",
            json!({"id": "1", "application_id": "900", "type": 2, "token": "tok"}),
        ));
        assert!(matches!(event, GatewayEvent::Unknown { op: 0, .. }));
    }

    #[test]
    fn malformed_dispatch_keeps_raw_data() {
        let event = GatewayEvent::from_payload(dispatch("READY", json!({"nope": true})));
        assert_eq!(
            event,
            GatewayEvent::Unknown {
                event_name: Some("READY".into()),
                op: 0,
                data: Some(json!({"nope": true})),
            }
        );
    }

    #[test]
    fn control_opcodes() {
        let invalid = GatewayPayload {
            op: 9,
            d: Some(json!(true)),
            s: None,
            t: None,
        };
        assert_eq!(GatewayEvent::from_payload(invalid), GatewayEvent::InvalidSession(true));
        let reconnect = GatewayPayload {
            op: 7,
            d: None,
            s: None,
            t: None,
        };
        assert_eq!(GatewayEvent::from_payload(reconnect), GatewayEvent::Reconnect);
    }
}
