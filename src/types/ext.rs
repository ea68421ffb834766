//! Extension traits for the wire types.
//!
//! The structs in [`message`](super::message) mirror Discord's JSON and stay
//! free of behaviour; the helpers callers tend to reach for (`.tag()`,
//! `.created_at()`, ...) live here instead.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

use crate::types::id::Id;
use crate::types::message::{Message, MessageFlags, User};

/// Milliseconds between the Unix epoch and the Discord epoch (2015-01-01).
pub const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// Creation time encoded in a snowflake.
pub fn snowflake_time<T>(id: Id<T>) -> Option<DateTime<Utc>> {
    let ms = (id.get() >> 22) + DISCORD_EPOCH_MS;
    Utc.timestamp_millis_opt(i64::try_from(ms).ok()?).single()
}

// ===========================================================================
// UserExt
// ===========================================================================

pub trait UserExt {
    /// `Username#Discriminator`, or just `Username` for migrated accounts.
    fn tag(&self) -> String;
}

impl UserExt for User {
    fn tag(&self) -> String {
        match self.discriminator.as_deref() {
            None | Some("0") | Some("0000") => self.username.clone(),
            Some(discriminator) => format!("{}#{discriminator}", self.username),
        }
    }
}

// ===========================================================================
// MessageExt
// ===========================================================================

pub trait MessageExt {
    /// Creation time derived from the message snowflake.
    fn created_at(&self) -> Option<DateTime<Utc>>;

    /// The `timestamp` field parsed as RFC 3339.
    fn sent_at(&self) -> Option<DateTime<FixedOffset>>;

    fn is_ephemeral(&self) -> bool;

    /// Whether the message carries any component rows.
    fn has_components(&self) -> bool;
}

impl MessageExt for Message {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        snowflake_time(self.id)
    }

    fn sent_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.timestamp).ok()
    }

    fn is_ephemeral(&self) -> bool {
        self.flags.contains(MessageFlags::EPHEMERAL)
    }

    fn has_components(&self) -> bool {
        !self.components.is_empty()
    }
}
