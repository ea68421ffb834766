//! Messages: the received payload and the bodies used to create or edit one.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::time::Duration;

use crate::codec::ComponentTree;
use crate::error::ValidationError;
use crate::http::FileAttachment;
use crate::types::component::is_false;
use crate::types::id::{
    AttachmentMarker, ChannelMarker, GuildMarker, Id, MessageMarker, UserMarker,
};

/// Discord rejects more than 10 embeds or 10 files on one message.
pub const EMBED_LIMIT: usize = 10;
pub const FILE_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

bitflags! {
    /// Message flag bits.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MessageFlags: u64 {
        const CROSSPOSTED = 1;
        const IS_CROSSPOST = 1 << 1;
        const SUPPRESS_EMBEDS = 1 << 2;
        const SOURCE_MESSAGE_DELETED = 1 << 3;
        const URGENT = 1 << 4;
        const HAS_THREAD = 1 << 5;
        /// Only visible to the user who invoked the interaction.
        const EPHEMERAL = 1 << 6;
        const LOADING = 1 << 7;
        const SUPPRESS_NOTIFICATIONS = 1 << 12;
    }
}

impl Serialize for MessageFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for MessageFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_bits_truncate(u64::deserialize(deserializer)?))
    }
}

// ---------------------------------------------------------------------------
// Received objects
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Id<UserMarker>,
    pub username: String,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Id<AttachmentMarker>,
    pub filename: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// A message as returned by the REST API or a gateway dispatch.
///
/// `components` is kept as raw JSON; [`ComponentMessage`] decodes it.
///
/// [`ComponentMessage`]: crate::component_message::ComponentMessage
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Id<MessageMarker>,
    pub channel_id: Id<ChannelMarker>,
    #[serde(default)]
    pub guild_id: Option<Id<GuildMarker>>,
    pub author: User,
    #[serde(default)]
    pub content: String,
    /// ISO 8601, exactly as Discord sent it.
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub flags: MessageFlags,
    #[serde(default)]
    pub embeds: Vec<Value>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub components: Vec<Value>,
}

// ---------------------------------------------------------------------------
// Outbound helpers
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionType {
    Roles,
    Users,
    Everyone,
}

/// Which mentions in `content` are allowed to ping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedMentions {
    #[serde(default)]
    pub parse: Vec<MentionType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<Id<UserMarker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replied_user: Option<bool>,
}

impl AllowedMentions {
    /// Suppress every ping.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            parse: vec![MentionType::Roles, MentionType::Users, MentionType::Everyone],
            users: Vec::new(),
            replied_user: Some(true),
        }
    }

    /// Overlay `other` on top of `self`. Fields set in `other` win.
    pub fn merge(&self, other: &AllowedMentions) -> Self {
        Self {
            parse: if other.parse.is_empty() {
                self.parse.clone()
            } else {
                other.parse.clone()
            },
            users: if other.users.is_empty() {
                self.users.clone()
            } else {
                other.users.clone()
            },
            replied_user: other.replied_user.or(self.replied_user),
        }
    }
}

/// Reference to the message being replied to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<Id<MessageMarker>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Id<ChannelMarker>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id<GuildMarker>>,
    #[serde(default)]
    pub fail_if_not_exists: bool,
}

pub(crate) fn check_limits(
    embeds: Option<&[Value]>,
    files: &[FileAttachment],
) -> Result<(), ValidationError> {
    if let Some(embeds) = embeds {
        if embeds.len() > EMBED_LIMIT {
            return Err(ValidationError::InvalidArgument(format!(
                "embeds must be a list of up to {EMBED_LIMIT} elements (got {})",
                embeds.len()
            )));
        }
    }
    if files.len() > FILE_LIMIT {
        return Err(ValidationError::InvalidArgument(format!(
            "files must be a list of up to {FILE_LIMIT} elements (got {})",
            files.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Outbound message body (for REST POST /channels/{id}/messages)
// ---------------------------------------------------------------------------

/// Body for creating a new message via the REST API.
///
/// ```
/// use hello_components::types::CreateMessage;
///
/// let msg = CreateMessage::new().content("Hello!").tts(false);
/// assert_eq!(msg.content.as_deref(), Some("Hello!"));
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub tts: bool,
    /// Embed objects, passed through as-is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_reference: Option<MessageReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticker_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<ComponentTree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
    /// Sent as multipart parts, never inside the JSON body.
    #[serde(skip)]
    pub files: Vec<FileAttachment>,
    /// Becomes `allowed_mentions.replied_user` when sent.
    #[serde(skip)]
    pub mention_author: Option<bool>,
    /// Delete the sent message after this long.
    #[serde(skip)]
    pub delete_after: Option<Duration>,
}

impl CreateMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, text: impl Into<String>) -> Self {
        self.content = Some(text.into());
        self
    }

    pub fn tts(mut self, tts: bool) -> Self {
        self.tts = tts;
        self
    }

    pub fn embed(mut self, embed: Value) -> Self {
        self.embeds.get_or_insert_with(Vec::new).push(embed);
        self
    }

    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn allowed_mentions(mut self, allowed_mentions: AllowedMentions) -> Self {
        self.allowed_mentions = Some(allowed_mentions);
        self
    }

    /// Mark the message as a reply to another message.
    pub fn reply_to(mut self, message_id: Id<MessageMarker>) -> Self {
        self.message_reference = Some(MessageReference {
            message_id: Some(message_id),
            ..Default::default()
        });
        self
    }

    pub fn sticker(mut self, sticker_id: impl Into<String>) -> Self {
        self.sticker_ids
            .get_or_insert_with(Vec::new)
            .push(sticker_id.into());
        self
    }

    pub fn components(mut self, tree: ComponentTree) -> Self {
        self.components = Some(tree);
        self
    }

    pub fn flags(mut self, flags: MessageFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    pub fn file(mut self, file: FileAttachment) -> Self {
        self.files.push(file);
        self
    }

    /// Whether a reply pings the author of the referenced message.
    pub fn mention_author(mut self, mention: bool) -> Self {
        self.mention_author = Some(mention);
        self
    }

    pub fn delete_after(mut self, delay: Duration) -> Self {
        self.delete_after = Some(delay);
        self
    }

    /// Check the embed and file limits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_limits(self.embeds.as_deref(), &self.files)
    }
}

// ---------------------------------------------------------------------------
// Outbound edit body (for REST PATCH /channels/{id}/messages/{id})
// ---------------------------------------------------------------------------

/// Body for editing an existing message. Only fields that are set are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EditMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    /// Existing attachments to keep; omitted ones are removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<ComponentTree>,
    #[serde(skip)]
    pub files: Vec<FileAttachment>,
    /// Delete the message this long after the edit.
    #[serde(skip)]
    pub delete_after: Option<Duration>,
}

impl EditMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, text: impl Into<String>) -> Self {
        self.content = Some(text.into());
        self
    }

    pub fn embeds(mut self, embeds: Vec<Value>) -> Self {
        self.embeds = Some(embeds);
        self
    }

    /// Hide (or restore) link previews on the message.
    pub fn suppress_embeds(mut self, suppress: bool) -> Self {
        self.flags = Some(if suppress {
            MessageFlags::SUPPRESS_EMBEDS
        } else {
            MessageFlags::empty()
        });
        self
    }

    pub fn allowed_mentions(mut self, allowed_mentions: AllowedMentions) -> Self {
        self.allowed_mentions = Some(allowed_mentions);
        self
    }

    pub fn keep_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = Some(attachments);
        self
    }

    pub fn components(mut self, tree: ComponentTree) -> Self {
        self.components = Some(tree);
        self
    }

    pub fn file(mut self, file: FileAttachment) -> Self {
        self.files.push(file);
        self
    }

    pub fn delete_after(mut self, delay: Duration) -> Self {
        self.delete_after = Some(delay);
        self
    }

    /// An edit with nothing set issues no request. `delete_after` is not
    /// part of the body, so it does not count.
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.embeds.is_none()
            && self.flags.is_none()
            && self.allowed_mentions.is_none()
            && self.attachments.is_none()
            && self.components.is_none()
            && self.files.is_empty()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_limits(self.embeds.as_deref(), &self.files)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
