//! Embed URL construction and direct-URL recognition.
//!
//! The embed URL is computed exactly once, at mount time, and never replaced
//! afterwards: swapping the URL would reload the whole embed, so later option
//! changes are instead pushed through live property updates by
//! [`crate::sync::PropertySync`]. That makes [`iframe_src`] a pure function
//! of its inputs — no hidden counters, no timestamps.
//!
//! # URL format
//!
//! ```text
//! https://iframe.cloudflarestream.com/{src}?{query}
//! https://customer-{code}.cloudflarestream.com/{src}/iframe?{query}
//! ```
//!
//! The query carries only the options that are actually set (see the
//! inclusion rules on [`iframe_src`]); when nothing is set the trailing `?`
//! remains, which the player tolerates.

use crate::config::{Preload, StartTime, StreamConfig};

/// Primary streaming-platform domain; embed URLs are built on it.
pub const STREAM_HOST: &str = "cloudflarestream.com";

/// Primary delivery domain, recognized for caller-supplied direct URLs.
pub const DELIVERY_HOST: &str = "videodelivery.net";

/// Optional parameters folded into the embed URL.
///
/// Booleans are tri-state here: `None` means "not specified" and emits
/// nothing, which is distinct from an explicit `Some(false)` — `controls`
/// is the one inverted flag where `Some(false)` emits `controls=false`
/// (the embed defaults to controls-on).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbedOptions {
    /// Switches to the `customer-{code}` subdomain URL form.
    pub customer_code: Option<String>,
    /// Poster image URL, percent-encoded into the query.
    pub poster: Option<String>,
    /// VAST ad tag URL, percent-encoded into the query as `ad-url`.
    pub ad_url: Option<String>,
    /// Initially-enabled text track, percent-encoded.
    pub default_text_track: Option<String>,
    /// Player UI accent color, percent-encoded.
    pub primary_color: Option<String>,
    /// Letterbox color, percent-encoded.
    pub letterbox_color: Option<String>,
    /// Playback start position; zero/empty counts as unset.
    pub start_time: Option<StartTime>,
    /// Emits `muted=true` when `Some(true)`.
    pub muted: Option<bool>,
    /// Emits `preload={value}` when present.
    pub preload: Option<Preload>,
    /// Emits `loop=true` when `Some(true)`.
    pub loop_playback: Option<bool>,
    /// Emits `autoplay=true` when `Some(true)`.
    pub autoplay: Option<bool>,
    /// Inverted: emits `controls=false` when `Some(false)`, nothing
    /// otherwise.
    pub controls: Option<bool>,
}

impl From<&StreamConfig> for EmbedOptions {
    fn from(config: &StreamConfig) -> Self {
        Self {
            customer_code: config.customer_code.clone(),
            poster: config.poster.clone(),
            ad_url: config.ad_url.clone(),
            default_text_track: config.default_text_track.clone(),
            primary_color: config.primary_color.clone(),
            letterbox_color: config.letterbox_color.clone(),
            start_time: config.start_time.clone(),
            muted: Some(config.muted),
            preload: config.preload,
            loop_playback: Some(config.loop_playback),
            autoplay: Some(config.autoplay),
            controls: Some(config.controls),
        }
    }
}

/// Builds the iframe embed URL for `src`.
///
/// Parameter inclusion order and policy (each emitted only when set):
/// `poster`, `ad-url`, `defaultTextTrack`, `primaryColor`, `letterboxColor`
/// (percent-encoded, skipped when empty); `startTime` (verbatim, skipped
/// when zero/empty); `muted=true`; `preload={value}`; `loop=true`;
/// `autoplay=true`; `controls=false` only when controls is explicitly off.
pub fn iframe_src(src: &str, options: &EmbedOptions) -> String {
    let mut params: Vec<String> = Vec::new();

    push_encoded(&mut params, "poster", options.poster.as_deref());
    push_encoded(&mut params, "ad-url", options.ad_url.as_deref());
    push_encoded(
        &mut params,
        "defaultTextTrack",
        options.default_text_track.as_deref(),
    );
    push_encoded(&mut params, "primaryColor", options.primary_color.as_deref());
    push_encoded(
        &mut params,
        "letterboxColor",
        options.letterbox_color.as_deref(),
    );
    if let Some(start_time) = options.start_time.as_ref().filter(|s| s.is_set()) {
        params.push(format!("startTime={start_time}"));
    }
    if options.muted == Some(true) {
        params.push("muted=true".to_string());
    }
    if let Some(preload) = options.preload {
        params.push(format!("preload={preload}"));
    }
    if options.loop_playback == Some(true) {
        params.push("loop=true".to_string());
    }
    if options.autoplay == Some(true) {
        params.push("autoplay=true".to_string());
    }
    if options.controls == Some(false) {
        params.push("controls=false".to_string());
    }

    let query = params.join("&");
    match options.customer_code.as_deref() {
        Some(code) => format!("https://customer-{code}.{STREAM_HOST}/{src}/iframe?{query}"),
        None => format!("https://iframe.{STREAM_HOST}/{src}?{query}"),
    }
}

fn push_encoded(params: &mut Vec<String>, name: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        params.push(format!("{name}={}", urlencoding::encode(value)));
    }
}

/// True when `src` is already a fully-qualified URL on a recognized player
/// host, in which case URL construction is bypassed and `src` is used
/// unchanged. Anything unparseable is simply "not a direct URL".
pub fn valid_src_url(src: &str) -> bool {
    hostname_matches(src, &[DELIVERY_HOST, STREAM_HOST])
}

/// Direct-URL check for the custom-element variant, which predates the
/// streaming-platform domain and recognizes only the delivery domain.
pub fn valid_delivery_url(src: &str) -> bool {
    hostname_matches(src, &[DELIVERY_HOST])
}

fn hostname_matches(src: &str, hosts: &[&str]) -> bool {
    let Ok(parsed) = url::Url::parse(src) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    hosts.iter().any(|suffix| host.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_src_with_empty_options() {
        let url = iframe_src("abc123", &EmbedOptions::default());
        assert_eq!(url, "https://iframe.cloudflarestream.com/abc123?");
    }

    #[test]
    fn test_flag_query_order() {
        let options = EmbedOptions {
            muted: Some(true),
            controls: Some(false),
            autoplay: Some(true),
            ..EmbedOptions::default()
        };
        let url = iframe_src("abc123", &options);
        assert_eq!(
            url,
            "https://iframe.cloudflarestream.com/abc123?muted=true&autoplay=true&controls=false"
        );
    }

    #[test]
    fn test_controls_on_is_omitted() {
        let options = EmbedOptions {
            controls: Some(true),
            ..EmbedOptions::default()
        };
        let url = iframe_src("abc123", &options);
        assert!(!url.contains("controls"));
    }

    #[test]
    fn test_false_flags_are_omitted_not_written() {
        let options = EmbedOptions {
            muted: Some(false),
            autoplay: Some(false),
            loop_playback: Some(false),
            ..EmbedOptions::default()
        };
        let url = iframe_src("abc123", &options);
        assert_eq!(url, "https://iframe.cloudflarestream.com/abc123?");
    }

    #[test]
    fn test_customer_code_variant() {
        let options = EmbedOptions {
            customer_code: Some("m3u8api".to_string()),
            autoplay: Some(true),
            ..EmbedOptions::default()
        };
        let url = iframe_src("abc123", &options);
        assert_eq!(
            url,
            "https://customer-m3u8api.cloudflarestream.com/abc123/iframe?autoplay=true"
        );
    }

    #[test]
    fn test_encoded_parameters_and_order() {
        let options = EmbedOptions {
            poster: Some("https://example.com/poster 1.jpg".to_string()),
            primary_color: Some("#f48120".to_string()),
            start_time: Some(StartTime::from(123.0)),
            muted: Some(true),
            preload: Some(Preload::Metadata),
            ..EmbedOptions::default()
        };
        let url = iframe_src("abc123", &options);
        assert_eq!(
            url,
            "https://iframe.cloudflarestream.com/abc123?\
             poster=https%3A%2F%2Fexample.com%2Fposter%201.jpg\
             &primaryColor=%23f48120&startTime=123&muted=true&preload=metadata"
        );
    }

    #[test]
    fn test_empty_strings_are_skipped() {
        let options = EmbedOptions {
            poster: Some(String::new()),
            ad_url: Some(String::new()),
            start_time: Some(StartTime::from(0.0)),
            ..EmbedOptions::default()
        };
        let url = iframe_src("abc123", &options);
        assert_eq!(url, "https://iframe.cloudflarestream.com/abc123?");
    }

    #[test]
    fn test_builder_is_pure() {
        let options = EmbedOptions {
            autoplay: Some(true),
            poster: Some("p.jpg".to_string()),
            ..EmbedOptions::default()
        };
        assert_eq!(iframe_src("abc123", &options), iframe_src("abc123", &options));
    }

    #[test]
    fn test_config_defaults_emit_controls_false() {
        // The component default is controls-off, so component-built URLs
        // always carry the inverted flag.
        let config = crate::config::StreamConfig::new("abc123");
        let url = iframe_src(&config.src, &EmbedOptions::from(&config));
        assert_eq!(url, "https://iframe.cloudflarestream.com/abc123?controls=false");
    }

    #[test]
    fn test_direct_url_recognition() {
        assert!(valid_src_url("https://videodelivery.net/xyz"));
        assert!(valid_src_url("https://watch.videodelivery.net/xyz"));
        assert!(valid_src_url("https://customer-m3u8api.cloudflarestream.com/xyz/iframe"));
        assert!(!valid_src_url("https://example.com/video.mp4"));
        assert!(!valid_src_url("abc123"));
        assert!(!valid_src_url(""));
    }

    #[test]
    fn test_delivery_only_recognition() {
        assert!(valid_delivery_url("https://videodelivery.net/xyz"));
        assert!(!valid_delivery_url("https://iframe.cloudflarestream.com/xyz"));
    }
}
