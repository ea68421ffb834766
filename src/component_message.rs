//! Component-aware view over a received message.

use serde_json::Value;
use std::fmt;

use crate::client::InteractionClient;
use crate::codec::{decode, ComponentTree};
use crate::error::{ComponentError, Result};
use crate::types::component::{Component, Select, SelectOption};
use crate::types::ext::MessageExt;
use crate::types::id::{ChannelMarker, Id, MessageMarker};
use crate::types::message::{EditMessage, Message};

/// A received message together with its decoded component tree.
///
/// The tree is decoded once on construction; operations that change the
/// message return a fresh view built from Discord's reply.
#[derive(Clone)]
pub struct ComponentMessage {
    client: InteractionClient,
    message: Message,
    components: ComponentTree,
    ephemeral: bool,
}

impl ComponentMessage {
    pub fn new(client: InteractionClient, message: Message) -> Self {
        let components = decode(&message.components);
        Self {
            client,
            message,
            components,
            ephemeral: false,
        }
    }

    /// Treat the message as ephemeral even if its flags don't say so, e.g.
    /// for a reply that was sent with ephemeral visibility.
    pub fn with_ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }

    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral || self.message.is_ephemeral()
    }

    pub fn id(&self) -> Id<MessageMarker> {
        self.message.id
    }

    pub fn channel_id(&self) -> Id<ChannelMarker> {
        self.message.channel_id
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn into_message(self) -> Message {
        self.message
    }

    pub fn components(&self) -> &ComponentTree {
        &self.components
    }

    pub fn client(&self) -> &InteractionClient {
        &self.client
    }

    /// First component with `custom_id`, scanning rows then positions.
    pub fn find_component(&self, custom_id: &str) -> Option<&Component> {
        self.components.find(custom_id)
    }

    /// Disable every component with a single edit.
    pub async fn disable_all(&self) -> Result<Option<ComponentMessage>> {
        self.edit(EditMessage::new().components(self.components.disabled()))
            .await
    }

    /// Click the button with `custom_id`.
    pub async fn click(&self, custom_id: &str) -> Result<Value> {
        match self.find_component(custom_id) {
            None => Err(ComponentError::ComponentNotFound(custom_id.to_string())),
            Some(Component::Select(_)) => Err(ComponentError::NotAButton(custom_id.to_string())),
            Some(Component::Button(button)) => {
                self.client.click_button(&self.message, button).await
            }
        }
    }

    /// Choose `option` in `select`.
    pub async fn select(&self, select: &Select, option: &SelectOption) -> Result<Value> {
        self.client
            .select_option(&self.message, select, option)
            .await
    }

    /// Apply `edit`; a no-op returning `Ok(None)` for ephemeral messages.
    pub async fn edit(&self, edit: EditMessage) -> Result<Option<ComponentMessage>> {
        if self.ephemeral {
            edit.validate()?;
            return Ok(None);
        }
        self.client.edit_message(&self.message, edit).await
    }

    /// Delete the message; a no-op for ephemeral messages.
    pub async fn delete(&self) -> Result<()> {
        if self.ephemeral {
            return Ok(());
        }
        self.client.delete_message(&self.message).await
    }
}

impl fmt::Debug for ComponentMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentMessage")
            .field("id", &self.message.id)
            .field("channel_id", &self.message.channel_id)
            .field("components", &self.components)
            .field("ephemeral", &self.is_ephemeral())
            .finish()
    }
}
