//! Error taxonomy.
//!
//! Composition errors ([`ValidationError`]) and caller-logic errors are raised
//! before any request is built. [`TransportError`] is whatever the HTTP
//! collaborator reported, passed through untouched.

use thiserror::Error;

use crate::types::component::ComponentType;

/// A component, row, or message body violated a static invariant.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid action row: {0}")]
    InvalidRowComposition(String),
    #[error("invalid select bounds: min_values={min}, max_values={max}, options={options}")]
    InvalidSelectBounds { min: u8, max: u8, options: usize },
    #[error("too many action rows: {0} (max 5)")]
    TooManyRows(usize),
    #[error("too many select options: {0} (max 25)")]
    TooManyOptions(usize),
    #[error("invalid button: {0}")]
    InvalidButton(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Failure reported by the HTTP collaborator.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Non-success status from Discord.
    #[error("Discord API error {status} on {route}: {body}")]
    Api {
        status: u16,
        body: String,
        route: String,
    },
    /// Network-level failure, timeout, or cancellation.
    #[error("HTTP transport error: {0}")]
    Network(String),
    /// Body could not be encoded or the response could not be parsed.
    #[error("serialisation error: {0}")]
    Serde(String),
}

/// A single component object could not be decoded.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unknown component type {0}")]
    UnknownComponentType(u64),
    #[error("component object has no integer `type` field")]
    MissingType,
    #[error("malformed {kind:?} component: {reason}")]
    Malformed { kind: ComponentType, reason: String },
}

/// Top-level error for component operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ComponentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("button {custom_id:?} is not clickable: {reason}")]
    NotClickable {
        custom_id: Option<String>,
        reason: &'static str,
    },
    #[error("component {0:?} is not a button")]
    NotAButton(String),
    #[error("no component with custom_id {0:?}")]
    ComponentNotFound(String),
    #[error("option {value:?} is not part of select {custom_id:?}")]
    OptionNotInSelect { custom_id: String, value: String },
    #[error("received message payload is invalid: {0}")]
    InvalidMessage(String),
}

pub type Result<T, E = ComponentError> = std::result::Result<T, E>;
