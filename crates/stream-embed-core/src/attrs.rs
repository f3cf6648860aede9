//! Markup attribute plan for the custom-element embed variant.
//!
//! The `<stream>` element reads its initial state from attributes rather
//! than an embed URL. A plan entry of `None` means the attribute must be
//! absent, so re-applying a plan can also remove attributes a previous
//! config had set.

use crate::config::StreamConfig;

/// Computes the full attribute set for `config`, in a stable order.
///
/// Boolean flags follow HTML boolean-attribute convention: present with the
/// value `"true"` when enabled, absent otherwise. `start_time` is not an
/// attribute; the element only honors it through the embed query, so it is
/// intentionally left out here.
pub fn attribute_plan(config: &StreamConfig) -> Vec<(&'static str, Option<String>)> {
    fn flag(enabled: bool) -> Option<String> {
        enabled.then(|| "true".to_string())
    }

    vec![
        ("src", Some(config.src.clone())),
        ("autoplay", flag(config.autoplay)),
        ("controls", flag(config.controls)),
        ("loop", flag(config.loop_playback)),
        ("muted", flag(config.muted)),
        ("preload", config.preload.map(|p| p.as_str().to_string())),
        ("poster", config.poster.clone()),
        ("ad-url", config.ad_url.clone()),
        ("defaultTextTrack", config.default_text_track.clone()),
        ("primaryColor", config.primary_color.clone()),
        ("letterboxColor", config.letterbox_color.clone()),
        ("height", config.height.clone()),
        ("width", config.width.clone()),
    ]
}

/// Inline-style plan for the iframe embed node. `None` clears a property a
/// previous config may have set, so toggling `responsive` off fully undoes
/// the absolute-fill styling.
pub fn iframe_style_plan(config: &StreamConfig) -> Vec<(&'static str, Option<&'static str>)> {
    if config.responsive {
        vec![
            ("position", Some("absolute")),
            ("top", Some("0")),
            ("left", Some("0")),
            ("width", Some("100%")),
            ("height", Some("100%")),
        ]
    } else {
        vec![
            ("position", None),
            ("top", None),
            ("left", None),
            ("width", None),
            ("height", None),
        ]
    }
}

/// Markup attributes of the iframe that follow the config across updates.
/// Fixed attributes (`frameBorder`, the allow list) are set once at creation
/// and are not part of the plan. Sizing attributes only apply when the
/// container is not responsive; responsive layouts size via CSS.
pub fn iframe_attribute_plan(config: &StreamConfig) -> Vec<(&'static str, Option<String>)> {
    let sized = !config.responsive;
    vec![
        ("title", config.title.clone()),
        ("height", config.height.clone().filter(|_| sized)),
        ("width", config.width.clone().filter(|_| sized)),
    ]
}
