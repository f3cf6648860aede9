//! stream-embed: browser components for the Stream embedded player.
//!
//! Wraps the third-party Stream player in two mountable components:
//!
//! - [`web::StreamPlayer`] — the iframe embed driven by the player SDK
//! - [`web::StreamElement`] — the legacy `<stream>` custom element
//!
//! Both take a declarative [`StreamConfig`]: mount once, then hand an
//! updated config to `update()` whenever something changes, and the
//! component performs the minimal writes and listener rebinds. Direct
//! playback control is available through the [`HandleSlot`] once the
//! player runtime has loaded.
//!
//! Everything browser-independent lives in `stream-embed-core` and is
//! re-exported here, so this crate is the only dependency callers need.

pub use stream_embed_core::{
    attribute_plan, iframe_attribute_plan, iframe_src, iframe_style_plan, valid_delivery_url,
    valid_src_url, Callbacks, EmbedError, EmbedOptions, EventCallback, EventSync, HandleSlot,
    PlayResult, PlaybackError, PlayerEvent, PlayerHandle, Preload, PropertySync, StartTime,
    StreamConfig, VideoDimensions,
};

#[cfg(target_arch = "wasm32")]
pub mod web;
