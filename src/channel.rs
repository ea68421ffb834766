//! Channels that can send and fetch component messages.

use async_trait::async_trait;

use crate::client::InteractionClient;
use crate::codec::ComponentInput;
use crate::component_message::ComponentMessage;
use crate::error::Result;
use crate::types::id::{ChannelMarker, Id, MessageMarker};
use crate::types::message::CreateMessage;

/// Capability of a channel-like object to exchange component messages.
///
/// Bot code that already has its own channel type can implement this
/// directly; [`ChannelHandle`] is the ready-made adapter.
#[async_trait]
pub trait ComponentAwareChannel: Send + Sync {
    fn channel_id(&self) -> Id<ChannelMarker>;

    /// Post `content` with `components` attached.
    async fn send_components(
        &self,
        content: String,
        components: ComponentInput,
    ) -> Result<ComponentMessage>;

    /// Post a full message body.
    async fn send(&self, body: CreateMessage) -> Result<ComponentMessage>;

    async fn fetch_message(&self, message_id: Id<MessageMarker>) -> Result<ComponentMessage>;
}

/// A channel id bound to a client.
#[derive(Clone, Debug)]
pub struct ChannelHandle {
    client: InteractionClient,
    channel_id: Id<ChannelMarker>,
}

impl ChannelHandle {
    pub fn new(client: InteractionClient, channel_id: Id<ChannelMarker>) -> Self {
        Self { client, channel_id }
    }
}

#[async_trait]
impl ComponentAwareChannel for ChannelHandle {
    fn channel_id(&self) -> Id<ChannelMarker> {
        self.channel_id
    }

    async fn send_components(
        &self,
        content: String,
        components: ComponentInput,
    ) -> Result<ComponentMessage> {
        self.client
            .send_with_components(self.channel_id, content, components)
            .await
    }

    async fn send(&self, body: CreateMessage) -> Result<ComponentMessage> {
        self.client.send_message(self.channel_id, body).await
    }

    async fn fetch_message(&self, message_id: Id<MessageMarker>) -> Result<ComponentMessage> {
        self.client
            .fetch_message(self.channel_id, message_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client, message_json};
    use crate::types::builders::link_button;
    use futures_lite::future::block_on;
    use static_assertions::assert_obj_safe;

    assert_obj_safe!(ComponentAwareChannel);

    #[test]
    fn handle_routes_through_bound_channel() {
        block_on(async {
            let (client, transport) = client();
            transport.respond(Ok(message_json(0))).await;
            transport.respond(Ok(message_json(0))).await;

            let channel: Box<dyn ComponentAwareChannel> =
                Box::new(ChannelHandle::new(client, Id::new(200)));
            let docs = link_button("Docs", "https://docs.rs").unwrap();
            let sent = channel
                .send_components("read me".into(), docs.into())
                .await
                .unwrap();
            channel.fetch_message(sent.id()).await.unwrap();

            let requests = transport.requests().await;
            assert_eq!(requests[0].describe(), "POST /channels/200/messages");
            assert_eq!(requests[1].describe(), "GET /channels/200/messages/300");
        });
    }
}
