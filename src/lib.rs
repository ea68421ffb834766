//! Interactive message components (buttons and select menus) for Discord
//! bots.
//!
//! The crate is split the same way requests flow:
//!
//! - [`types`] holds the serde wire model, including the validating
//!   component builders.
//! - [`codec`] turns components into the `components` array of a message
//!   body and back.
//! - [`client::InteractionClient`] sends, edits and fetches component
//!   messages and simulates clicks/selections through any
//!   [`http::HttpTransport`].
//! - [`component_message::ComponentMessage`] wraps a received message with
//!   its decoded tree.
//!
//! ```
//! use hello_components::prelude::*;
//!
//! let tree = ComponentTree::build(vec![
//!     button(ButtonStyle::Success, "Accept", "accept").unwrap(),
//!     button(ButtonStyle::Danger, "Decline", "decline").unwrap(),
//! ])
//! .unwrap();
//! assert_eq!(tree.rows().len(), 1);
//! assert!(tree.find("decline").is_some());
//! ```

pub mod channel;
pub mod client;
pub mod codec;
pub mod component_message;
pub mod config;
pub mod error;
pub mod events;
pub mod http;
pub mod session;
pub mod types;

#[cfg(test)]
mod testing;

/// The common imports for bot code.
pub mod prelude {
    pub use crate::channel::{ChannelHandle, ComponentAwareChannel};
    pub use crate::client::InteractionClient;
    pub use crate::codec::{decode, encode, ComponentInput, ComponentTree};
    pub use crate::component_message::ComponentMessage;
    pub use crate::config::ClientConfig;
    pub use crate::error::{ComponentError, DecodeError, Result, TransportError, ValidationError};
    pub use crate::events::GatewayEvent;
    pub use crate::http::{FileAttachment, HttpTransport};
    pub use crate::session::{SessionHandle, SessionProvider};
    pub use crate::types::*;
}
