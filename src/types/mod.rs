//! Discord API types used by the component layer.
//!
//! Everything here is plain serde-typed data. Components, messages and
//! interactions mirror the platform's JSON shapes; behaviour that needs the
//! network lives in [`client`](crate::client) and
//! [`component_message`](crate::component_message).

/// Validating builders and one-call component helpers.
pub mod builders;

/// Buttons, select menus and action rows.
pub mod component;

/// Extension traits (`.tag()`, `.created_at()`, ...).
pub mod ext;

/// Type-safe IDs with marker types.
pub mod id;

/// Simulated and received interactions, and interaction responses.
pub mod interaction;

/// Received messages and create/edit bodies.
pub mod message;

// ===========================================================================
// Convenience re-exports
// ===========================================================================

// ---- IDs ------------------------------------------------------------------
pub use self::id::{
    ApplicationMarker, AttachmentMarker, ChannelMarker, EmojiMarker, GuildMarker, Id,
    InteractionMarker, MessageMarker, UserMarker,
};

// ---- Components -----------------------------------------------------------
pub use self::component::{
    ActionRow, Button, ButtonStyle, Component, ComponentType, PartialEmoji, Select, SelectOption,
};

// ---- Messages -------------------------------------------------------------
pub use self::message::{
    AllowedMentions, Attachment, CreateMessage, EditMessage, MentionType, Message, MessageFlags,
    MessageReference, User,
};

// ---- Interactions ---------------------------------------------------------
pub use self::interaction::{
    ComponentInteraction, ComponentInteractionData, Interaction, InteractionCallbackBody,
    InteractionCallbackData, InteractionCallbackType, InteractionResponse, InteractionType,
};

// ---- Builders -------------------------------------------------------------
pub use self::builders::{action_row, button, link_button, select, ButtonBuilder, SelectBuilder};

// ---- Extension traits -----------------------------------------------------
pub use self::ext::{MessageExt, UserExt};
