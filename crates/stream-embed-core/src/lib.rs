//! stream-embed-core: DOM-free foundation of the Stream embed components.
//!
//! This crate holds everything that can be computed and tested without a
//! browser:
//!
//! - Declarative configuration: [`config`]
//! - Embed URL construction and direct-URL recognition: [`embed`]
//! - Custom-element attribute planning: [`attrs`]
//! - The relayed event vocabulary: [`events`]
//! - The live-player handle abstraction: [`handle`]
//! - Config-to-handle property/listener synchronization: [`sync`]
//!
//! This crate has **zero web dependency**. It is consumed by `stream-embed`,
//! which supplies the wasm32 DOM glue.

pub mod attrs;
pub mod config;
pub mod embed;
pub mod error;
pub mod events;
pub mod handle;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_util;

pub use attrs::{attribute_plan, iframe_attribute_plan, iframe_style_plan};
pub use config::{Callbacks, EventCallback, Preload, StartTime, StreamConfig};
pub use embed::{iframe_src, valid_delivery_url, valid_src_url, EmbedOptions};
pub use error::{EmbedError, PlaybackError};
pub use events::PlayerEvent;
pub use handle::{HandleSlot, PlayResult, PlayerHandle, VideoDimensions};
pub use sync::{EventSync, PropertySync};
