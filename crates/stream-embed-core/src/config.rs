//! Declarative player configuration.
//!
//! A [`StreamConfig`] is supplied fresh on every render; the components never
//! mutate it. Field changes are detected by the sync layer
//! ([`crate::sync::PropertySync`]) and pushed onto the live handle, so the
//! record itself carries no reactive machinery.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::events::PlayerEvent;

/// Preload hint forwarded to the player runtime.
///
/// The runtime treats this as a hint only. The underlying attribute also
/// accepts booleans; `true` maps to [`Preload::Auto`] and `false` to
/// [`Preload::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preload {
    /// Start downloading the video immediately.
    Auto,
    /// Load only the metadata needed to start playback on request.
    Metadata,
    /// Load nothing up front (the player still fetches minimal metadata).
    None,
}

impl Preload {
    /// Returns the wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Preload::Auto => "auto",
            Preload::Metadata => "metadata",
            Preload::None => "none",
        }
    }

    /// Resolves an optional preload to the value written to the handle:
    /// absent resolves to `"none"`.
    pub fn resolve(preload: Option<Preload>) -> &'static str {
        preload.map_or("none", Preload::as_str)
    }
}

impl From<bool> for Preload {
    fn from(enabled: bool) -> Self {
        if enabled {
            Preload::Auto
        } else {
            Preload::None
        }
    }
}

impl fmt::Display for Preload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timestamp at which playback begins.
///
/// Either plain seconds (`123` means 123 seconds in) or a human-readable
/// timestamp such as `1h12m27s`. Only consumed when the embed URL is built;
/// the live player does not react to later changes.
#[derive(Debug, Clone, PartialEq)]
pub enum StartTime {
    /// Offset in seconds.
    Seconds(f64),
    /// Human-readable timestamp, e.g. `"1h12m27s"`.
    Timestamp(String),
}

impl StartTime {
    /// Zero seconds and empty timestamps count as unset.
    pub fn is_set(&self) -> bool {
        match self {
            StartTime::Seconds(seconds) => *seconds != 0.0,
            StartTime::Timestamp(timestamp) => !timestamp.is_empty(),
        }
    }
}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole seconds print without a fractional part
            // (startTime=123, not startTime=123.0).
            StartTime::Seconds(seconds) if seconds.fract() == 0.0 && seconds.is_finite() => {
                write!(f, "{}", *seconds as i64)
            }
            StartTime::Seconds(seconds) => write!(f, "{seconds}"),
            StartTime::Timestamp(timestamp) => f.write_str(timestamp),
        }
    }
}

impl From<f64> for StartTime {
    fn from(seconds: f64) -> Self {
        StartTime::Seconds(seconds)
    }
}

impl From<&str> for StartTime {
    fn from(timestamp: &str) -> Self {
        StartTime::Timestamp(timestamp.to_string())
    }
}

/// A caller-supplied event handler. Identity (`Rc::ptr_eq`) decides whether
/// the sync layer rebinds, so callers should hold onto the same `Rc` across
/// renders rather than re-wrapping the closure every time.
pub type EventCallback = Rc<dyn Fn(PlayerEvent)>;

/// Map of event names to callback references.
#[derive(Clone, Default)]
pub struct Callbacks {
    handlers: HashMap<PlayerEvent, EventCallback>,
}

impl Callbacks {
    /// Creates an empty callback map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler, replacing any previous one for the same event.
    pub fn set(&mut self, event: PlayerEvent, handler: EventCallback) {
        self.handlers.insert(event, handler);
    }

    /// Builder-style [`Callbacks::set`].
    pub fn on<F>(mut self, event: PlayerEvent, handler: F) -> Self
    where
        F: Fn(PlayerEvent) + 'static,
    {
        self.set(event, Rc::new(handler));
        self
    }

    /// Returns the handler registered for `event`, if any.
    pub fn get(&self, event: PlayerEvent) -> Option<&EventCallback> {
        self.handlers.get(&event)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True when no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Closures are unprintable; the count is what matters when debugging.
        f.debug_struct("Callbacks")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Declarative configuration for an embedded player.
///
/// All fields are optional except `src` (a video UID, a signed token, or a
/// full embed URL — see [`crate::embed::valid_src_url`]). Boolean flags
/// default to `false`, `current_time` to `0`, `volume` and `playback_rate`
/// to `1`, `responsive` to `true`.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Video UID, signed URL token, or a full recognized embed URL.
    pub src: String,
    /// Per-customer subdomain code; switches the embed URL to the
    /// `customer-{code}` host variant.
    pub customer_code: Option<String>,
    /// VAST tag URL for displaying ads.
    pub ad_url: Option<String>,
    /// Show the player's built-in controls.
    pub controls: bool,
    /// Start with audio silenced.
    pub muted: bool,
    /// Begin playback as soon as the player can. Browsers generally require
    /// `muted` for this to take effect without a user gesture.
    pub autoplay: bool,
    /// Seek back to the start upon reaching the end.
    pub loop_playback: bool,
    /// Preload hint; absent resolves to [`Preload::None`] on the handle.
    pub preload: Option<Preload>,
    /// CSS color applied to the player UI accents.
    pub primary_color: Option<String>,
    /// CSS color for the letterbox area around the video.
    pub letterbox_color: Option<String>,
    /// BCP-47 language code of the text track to enable at initialization.
    pub default_text_track: Option<String>,
    /// Display height in CSS pixels (forwarded as a markup attribute).
    pub height: Option<String>,
    /// Display width in CSS pixels (forwarded as a markup attribute).
    pub width: Option<String>,
    /// Image URL shown before the video starts.
    pub poster: Option<String>,
    /// Playback position in seconds; writing it seeks.
    pub current_time: f64,
    /// Volume from 0.0 (silent) to 1.0 (maximum).
    pub volume: f64,
    /// Playback speed multiplier.
    pub playback_rate: f64,
    /// Position at which playback begins. Frozen into the embed URL at
    /// mount; later changes are intentionally not propagated.
    pub start_time: Option<StartTime>,
    /// Automatically maintain the video's aspect ratio via container
    /// padding. Disable to style the embed yourself.
    pub responsive: bool,
    /// CSS class applied to the containing element.
    pub class_name: Option<String>,
    /// Accessible title for the embed frame.
    pub title: Option<String>,
    /// Event handlers relayed from the live player.
    pub callbacks: Callbacks,
}

impl StreamConfig {
    /// Creates a configuration with the given source and all defaults.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            customer_code: None,
            ad_url: None,
            controls: false,
            muted: false,
            autoplay: false,
            loop_playback: false,
            preload: None,
            primary_color: None,
            letterbox_color: None,
            default_text_track: None,
            height: None,
            width: None,
            poster: None,
            current_time: 0.0,
            volume: 1.0,
            playback_rate: 1.0,
            start_time: None,
            responsive: true,
            class_name: None,
            title: None,
            callbacks: Callbacks::new(),
        }
    }

    /// Sets whether the built-in controls are shown.
    pub fn with_controls(mut self, controls: bool) -> Self {
        self.controls = controls;
        self
    }

    /// Sets the initial muted state.
    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    /// Sets whether playback starts automatically.
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Sets whether playback loops.
    pub fn with_loop(mut self, loop_playback: bool) -> Self {
        self.loop_playback = loop_playback;
        self
    }

    /// Sets the preload hint.
    pub fn with_preload(mut self, preload: Preload) -> Self {
        self.preload = Some(preload);
        self
    }

    /// Sets the per-customer subdomain code.
    pub fn with_customer_code(mut self, code: impl Into<String>) -> Self {
        self.customer_code = Some(code.into());
        self
    }

    /// Sets the VAST ad tag URL.
    pub fn with_ad_url(mut self, ad_url: impl Into<String>) -> Self {
        self.ad_url = Some(ad_url.into());
        self
    }

    /// Sets the poster image URL.
    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = Some(poster.into());
        self
    }

    /// Sets the player UI accent color.
    pub fn with_primary_color(mut self, color: impl Into<String>) -> Self {
        self.primary_color = Some(color.into());
        self
    }

    /// Sets the letterbox color.
    pub fn with_letterbox_color(mut self, color: impl Into<String>) -> Self {
        self.letterbox_color = Some(color.into());
        self
    }

    /// Sets the text track enabled at initialization.
    pub fn with_default_text_track(mut self, track: impl Into<String>) -> Self {
        self.default_text_track = Some(track.into());
        self
    }

    /// Sets the playback position in seconds.
    pub fn with_current_time(mut self, seconds: f64) -> Self {
        self.current_time = seconds;
        self
    }

    /// Sets the volume (0.0 to 1.0).
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// Sets the playback speed multiplier.
    pub fn with_playback_rate(mut self, rate: f64) -> Self {
        self.playback_rate = rate;
        self
    }

    /// Sets the position at which playback begins.
    pub fn with_start_time(mut self, start_time: impl Into<StartTime>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    /// Sets whether the container maintains the video's aspect ratio.
    pub fn with_responsive(mut self, responsive: bool) -> Self {
        self.responsive = responsive;
        self
    }

    /// Sets the CSS class of the containing element.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Sets the accessible title of the embed frame.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the display width in CSS pixels.
    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Sets the display height in CSS pixels.
    pub fn with_height(mut self, height: impl Into<String>) -> Self {
        self.height = Some(height.into());
        self
    }

    /// Registers an event handler.
    pub fn on<F>(mut self, event: PlayerEvent, handler: F) -> Self
    where
        F: Fn(PlayerEvent) + 'static,
    {
        self.callbacks.set(event, Rc::new(handler));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_defaults_match_substitution_policy() {
        let config = StreamConfig::new("abc123");
        assert!(!config.autoplay);
        assert!(!config.controls);
        assert!(!config.muted);
        assert!(!config.loop_playback);
        assert_eq!(config.current_time, 0.0);
        assert_eq!(config.volume, 1.0);
        assert_eq!(config.playback_rate, 1.0);
        assert_eq!(config.preload, None);
        assert!(config.responsive);
    }

    #[test]
    fn test_preload_resolution() {
        assert_eq!(Preload::resolve(None), "none");
        assert_eq!(Preload::resolve(Some(Preload::Auto)), "auto");
        assert_eq!(Preload::resolve(Some(Preload::Metadata)), "metadata");
        assert_eq!(Preload::from(true), Preload::Auto);
        assert_eq!(Preload::from(false), Preload::None);
    }

    #[test]
    fn test_start_time_formatting() {
        assert_eq!(StartTime::from(123.0).to_string(), "123");
        assert_eq!(StartTime::from(12.5).to_string(), "12.5");
        assert_eq!(StartTime::from("1h12m27s").to_string(), "1h12m27s");
        assert!(!StartTime::from(0.0).is_set());
        assert!(!StartTime::from("").is_set());
        assert!(StartTime::from(30.0).is_set());
    }

    #[test]
    fn test_callbacks_keep_identity() {
        let fired = Rc::new(Cell::new(0));
        let fired_in_handler = Rc::clone(&fired);
        let callbacks = Callbacks::new().on(PlayerEvent::Play, move |_| {
            fired_in_handler.set(fired_in_handler.get() + 1);
        });

        let handler = callbacks.get(PlayerEvent::Play).unwrap();
        handler(PlayerEvent::Play);
        assert_eq!(fired.get(), 1);

        let again = callbacks.get(PlayerEvent::Play).unwrap();
        assert!(Rc::ptr_eq(handler, again));
        assert!(callbacks.get(PlayerEvent::Pause).is_none());
    }
}
