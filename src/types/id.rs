//! Type-safe snowflake IDs.
//!
//! Discord IDs are 64-bit integers transmitted as JSON strings. [`Id`] wraps
//! a non-zero `u64` and carries a marker type so that a channel ID can't be
//! passed where a message ID is expected.
//!
//! Markers themselves perform no logical action, and are only used to
//! ensure that IDs of incorrect types aren't used.

use serde::{
    de::{Deserializer, Error as DeError, Visitor},
    Deserialize, Serialize, Serializer,
};
use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
    num::NonZeroU64,
    str::FromStr,
};

/// Marker for application IDs.
///
/// The author of a message carrying components is the application that
/// posted them, so simulated interactions use this marker.
#[derive(Debug)]
#[non_exhaustive]
pub struct ApplicationMarker;

/// Marker for attachment IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct AttachmentMarker;

/// Marker for channel IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct ChannelMarker;

/// Marker for emoji IDs.
///
/// Types such as [`PartialEmoji`] use this ID marker.
///
/// [`PartialEmoji`]: crate::types::component::PartialEmoji
#[derive(Debug)]
#[non_exhaustive]
pub struct EmojiMarker;

/// Marker for guild IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct GuildMarker;

/// Marker for interaction IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct InteractionMarker;

/// Marker for message IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct MessageMarker;

/// Marker for user IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct UserMarker;

/// ID of a resource, such as the ID of a [channel] or [message].
///
/// [channel]: ChannelMarker
/// [message]: MessageMarker
pub struct Id<T> {
    phantom: PhantomData<fn(T) -> T>,
    value: NonZeroU64,
}

impl<T> Id<T> {
    /// Create a new ID.
    ///
    /// # Panics
    ///
    /// Panics if the value is 0.
    #[track_caller]
    pub const fn new(n: u64) -> Self {
        match NonZeroU64::new(n) {
            Some(value) => Self::from_nonzero(value),
            None => panic!("value is zero"),
        }
    }

    /// Create a new ID if the given value is not zero.
    pub const fn new_checked(n: u64) -> Option<Self> {
        match NonZeroU64::new(n) {
            Some(value) => Some(Self::from_nonzero(value)),
            None => None,
        }
    }

    const fn from_nonzero(value: NonZeroU64) -> Self {
        Self {
            phantom: PhantomData,
            value,
        }
    }

    /// Return the inner primitive value.
    pub const fn get(self) -> u64 {
        self.value.get()
    }

    /// Cast an ID from one marker type to another.
    ///
    /// Used when the platform reuses one ID namespace for another, e.g. a
    /// bot user's ID doubling as its application ID.
    pub const fn cast<New>(self) -> Id<New> {
        Id::from_nonzero(self.value)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("Id")?;
        let type_name = std::any::type_name::<T>();

        if let Some(position) = type_name.rfind("::") {
            if let Some(slice) = type_name.get(position + 2..) {
                f.write_str("<")?;
                f.write_str(slice)?;
                f.write_str(">")?;
            }
        }

        f.write_str("(")?;
        Debug::fmt(&self.value, f)?;
        f.write_str(")")
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.value.get(), f)
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> PartialEq<u64> for Id<T> {
    fn eq(&self, other: &u64) -> bool {
        self.value.get() == *other
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.value.get());
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> FromStr for Id<T> {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NonZeroU64::from_str(s).map(Self::from_nonzero)
    }
}

impl<T> From<NonZeroU64> for Id<T> {
    fn from(value: NonZeroU64) -> Self {
        Self::from_nonzero(value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor<T> {
            phantom: PhantomData<fn(T) -> T>,
        }

        impl<T> Visitor<'_> for IdVisitor<T> {
            type Value = Id<T>;

            fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str("a discord snowflake")
            }

            fn visit_u64<E: DeError>(self, value: u64) -> Result<Self::Value, E> {
                Id::new_checked(value).ok_or_else(|| DeError::custom("snowflake is zero"))
            }

            fn visit_i64<E: DeError>(self, value: i64) -> Result<Self::Value, E> {
                let unsigned = u64::try_from(value)
                    .map_err(|_| DeError::custom("snowflake is negative"))?;
                self.visit_u64(unsigned)
            }

            fn visit_str<E: DeError>(self, value: &str) -> Result<Self::Value, E> {
                value.parse().map_err(DeError::custom)
            }
        }

        deserializer.deserialize_any(IdVisitor {
            phantom: PhantomData,
        })
    }
}
