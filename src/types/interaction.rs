//! Interaction wire types.
//!
//! Two directions live here. Outbound, [`InteractionCallbackBody`] is the
//! envelope POSTed to `/interactions` to simulate a user clicking a button or
//! choosing a select option. Inbound, [`Interaction`] is the raw
//! `INTERACTION_CREATE` payload and [`ComponentInteraction`] its
//! component-only view; [`InteractionResponse`] answers it.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::codec::ComponentTree;
use crate::error::ComponentError;
use crate::http::FileAttachment;
use crate::types::component::{is_false, ComponentType};
use crate::types::id::{
    ApplicationMarker, ChannelMarker, GuildMarker, Id, InteractionMarker, MessageMarker,
};
use crate::types::message::{AllowedMentions, Message, MessageFlags, User};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum InteractionType {
    Ping = 1,
    ApplicationCommand = 2,
    MessageComponent = 3,
    ApplicationCommandAutocomplete = 4,
    ModalSubmit = 5,
}

/// The type of callback for an interaction response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum InteractionCallbackType {
    Pong = 1,
    ChannelMessageWithSource = 4,
    DeferredChannelMessageWithSource = 5,
    DeferredUpdateMessage = 6,
    UpdateMessage = 7,
}

// ---------------------------------------------------------------------------
// Simulated interaction (outbound)
// ---------------------------------------------------------------------------

/// `data` of a component interaction, both simulated and received.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInteractionData {
    pub component_type: ComponentType,
    pub custom_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

/// Discord expects the interaction type of the simulation envelope as a
/// string (`"3"`), unlike everywhere else.
fn type_as_string<S: Serializer>(
    kind: &InteractionType,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&(*kind as u8))
}

/// Body of `POST /interactions`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InteractionCallbackBody {
    pub application_id: Id<ApplicationMarker>,
    pub channel_id: Id<ChannelMarker>,
    /// Serialized as `null` for DMs.
    pub guild_id: Option<Id<GuildMarker>>,
    #[serde(rename = "type", serialize_with = "type_as_string")]
    pub kind: InteractionType,
    pub data: ComponentInteractionData,
    pub message_flags: MessageFlags,
    pub message_id: Id<MessageMarker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl InteractionCallbackBody {
    /// Envelope for an interaction with a component on `message`.
    pub fn for_message(
        message: &Message,
        data: ComponentInteractionData,
        session_id: Option<String>,
    ) -> Self {
        Self {
            // Components are posted by the application whose bot user authored
            // the message; the two ids coincide.
            application_id: message.author.id.cast(),
            channel_id: message.channel_id,
            guild_id: message.guild_id,
            kind: InteractionType::MessageComponent,
            data,
            message_flags: message.flags,
            message_id: message.id,
            session_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Received interaction (inbound)
// ---------------------------------------------------------------------------

/// Guild member wrapper; only the user is of interest here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionMember {
    pub user: User,
}

/// Raw `INTERACTION_CREATE` payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Interaction {
    pub id: Id<InteractionMarker>,
    pub application_id: Id<ApplicationMarker>,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    pub token: String,
    #[serde(default)]
    pub channel_id: Option<Id<ChannelMarker>>,
    #[serde(default)]
    pub guild_id: Option<Id<GuildMarker>>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<Message>,
    /// Present in guilds.
    #[serde(default)]
    pub member: Option<InteractionMember>,
    /// Present in DMs.
    #[serde(default)]
    pub user: Option<User>,
}

impl Interaction {
    /// The invoking user, wherever Discord put it.
    pub fn invoker(&self) -> Option<&User> {
        self.member
            .as_ref()
            .map(|member| &member.user)
            .or(self.user.as_ref())
    }
}

/// A user clicked a button or submitted a select on one of our messages.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentInteraction {
    pub id: Id<InteractionMarker>,
    pub application_id: Id<ApplicationMarker>,
    pub token: String,
    pub guild_id: Option<Id<GuildMarker>>,
    pub data: ComponentInteractionData,
    pub message: Message,
    pub user: Option<User>,
}

impl ComponentInteraction {
    pub fn custom_id(&self) -> &str {
        &self.data.custom_id
    }

    /// Chosen option values; empty for buttons.
    pub fn values(&self) -> &[String] {
        self.data.values.as_deref().unwrap_or_default()
    }
}

impl TryFrom<Interaction> for ComponentInteraction {
    type Error = ComponentError;

    fn try_from(interaction: Interaction) -> Result<Self, Self::Error> {
        if interaction.kind != InteractionType::MessageComponent {
            return Err(ComponentError::InvalidMessage(format!(
                "interaction {} is {:?}, not a component interaction",
                interaction.id, interaction.kind
            )));
        }

        let user = interaction.invoker().cloned();
        let raw = interaction.data.ok_or_else(|| {
            ComponentError::InvalidMessage(format!("interaction {} has no data", interaction.id))
        })?;
        let data: ComponentInteractionData = serde_json::from_value(raw)
            .map_err(|e| ComponentError::InvalidMessage(format!("component data: {e}")))?;
        let message = interaction.message.ok_or_else(|| {
            ComponentError::InvalidMessage(format!(
                "interaction {} carries no message",
                interaction.id
            ))
        })?;

        Ok(Self {
            id: interaction.id,
            application_id: interaction.application_id,
            token: interaction.token,
            guild_id: interaction.guild_id,
            data,
            message,
            user,
        })
    }
}

// ---------------------------------------------------------------------------
// Interaction response
// ---------------------------------------------------------------------------

/// Message data carried by an interaction response or an `@original` edit.
#[derive(Clone, Debug, Default, Serialize)]
pub struct InteractionCallbackData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub tts: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<ComponentTree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
    #[serde(skip)]
    pub files: Vec<FileAttachment>,
}

impl InteractionCallbackData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, text: impl Into<String>) -> Self {
        self.content = Some(text.into());
        self
    }

    pub fn embed(mut self, embed: Value) -> Self {
        self.embeds.get_or_insert_with(Vec::new).push(embed);
        self
    }

    pub fn components(mut self, tree: ComponentTree) -> Self {
        self.components = Some(tree);
        self
    }

    /// Only the invoking user will see the response.
    pub fn ephemeral(mut self) -> Self {
        let flags = self.flags.unwrap_or_default() | MessageFlags::EPHEMERAL;
        self.flags = Some(flags);
        self
    }

    pub fn file(mut self, file: FileAttachment) -> Self {
        self.files.push(file);
        self
    }
}

/// An interaction response sent back to Discord.
#[derive(Clone, Debug, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: InteractionCallbackType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionCallbackData>,
}

impl InteractionResponse {
    /// Reply with a new message.
    pub fn message(data: InteractionCallbackData) -> Self {
        Self {
            kind: InteractionCallbackType::ChannelMessageWithSource,
            data: Some(data),
        }
    }

    /// Edit the message the component is attached to.
    pub fn update_message(data: InteractionCallbackData) -> Self {
        Self {
            kind: InteractionCallbackType::UpdateMessage,
            data: Some(data),
        }
    }

    /// Acknowledge now, edit the component's message later.
    pub fn deferred_update() -> Self {
        Self {
            kind: InteractionCallbackType::DeferredUpdateMessage,
            data: None,
        }
    }

    /// Show a loading state, send the reply later via `@original`.
    pub fn deferred_message() -> Self {
        Self {
            kind: InteractionCallbackType::DeferredChannelMessageWithSource,
            data: None,
        }
    }
}
