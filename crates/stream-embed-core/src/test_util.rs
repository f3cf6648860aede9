//! In-memory player used by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::EventCallback;
use crate::error::PlaybackError;
use crate::events::PlayerEvent;
use crate::handle::{PlayResult, PlayerHandle};

#[derive(Debug, Clone)]
struct State {
    autoplay: bool,
    controls: bool,
    current_time: f64,
    loop_playback: bool,
    muted: bool,
    preload: String,
    src: String,
    volume: f64,
    video_width: f64,
    video_height: f64,
    paused: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            autoplay: false,
            controls: false,
            current_time: 0.0,
            loop_playback: false,
            muted: false,
            preload: "none".to_string(),
            src: String::new(),
            volume: 1.0,
            video_width: 0.0,
            video_height: 0.0,
            paused: true,
        }
    }
}

/// Fake player that records every write and keeps listener registrations,
/// so tests can assert exactly which operations the sync layer performed.
#[derive(Default)]
pub(crate) struct RecordingPlayer {
    state: RefCell<State>,
    writes: RefCell<Vec<String>>,
    listeners: RefCell<HashMap<PlayerEvent, Vec<EventCallback>>>,
    refuse_play: Cell<bool>,
}

impl RecordingPlayer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every setter call so far, in order, as `name=value` strings.
    pub(crate) fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    pub(crate) fn clear_writes(&self) {
        self.writes.borrow_mut().clear();
    }

    pub(crate) fn listener_count(&self, event: PlayerEvent) -> usize {
        self.listeners
            .borrow()
            .get(&event)
            .map_or(0, |listeners| listeners.len())
    }

    pub(crate) fn has_listener(&self, event: PlayerEvent, callback: &EventCallback) -> bool {
        self.listeners
            .borrow()
            .get(&event)
            .is_some_and(|listeners| listeners.iter().any(|l| Rc::ptr_eq(l, callback)))
    }

    pub(crate) fn total_listeners(&self) -> usize {
        self.listeners.borrow().values().map(Vec::len).sum()
    }

    /// Fires all listeners registered for `event`.
    pub(crate) fn emit(&self, event: PlayerEvent) {
        let listeners: Vec<EventCallback> = self
            .listeners
            .borrow()
            .get(&event)
            .cloned()
            .unwrap_or_default();
        for listener in listeners {
            listener(event);
        }
    }

    pub(crate) fn set_dimensions(&self, width: f64, height: f64) {
        let mut state = self.state.borrow_mut();
        state.video_width = width;
        state.video_height = height;
    }

    pub(crate) fn refuse_play(&self) {
        self.refuse_play.set(true);
    }

    fn record(&self, name: &str, value: impl std::fmt::Display) {
        self.writes.borrow_mut().push(format!("{name}={value}"));
    }
}

impl PlayerHandle for RecordingPlayer {
    fn autoplay(&self) -> bool {
        self.state.borrow().autoplay
    }

    fn set_autoplay(&self, autoplay: bool) {
        self.state.borrow_mut().autoplay = autoplay;
        self.record("autoplay", autoplay);
    }

    fn controls(&self) -> bool {
        self.state.borrow().controls
    }

    fn set_controls(&self, controls: bool) {
        self.state.borrow_mut().controls = controls;
        self.record("controls", controls);
    }

    fn current_time(&self) -> f64 {
        self.state.borrow().current_time
    }

    fn set_current_time(&self, seconds: f64) {
        self.state.borrow_mut().current_time = seconds;
        self.record("currentTime", seconds);
    }

    fn duration(&self) -> f64 {
        f64::NAN
    }

    fn ended(&self) -> bool {
        false
    }

    fn loop_playback(&self) -> bool {
        self.state.borrow().loop_playback
    }

    fn set_loop_playback(&self, loop_playback: bool) {
        self.state.borrow_mut().loop_playback = loop_playback;
        self.record("loop", loop_playback);
    }

    fn muted(&self) -> bool {
        self.state.borrow().muted
    }

    fn set_muted(&self, muted: bool) {
        self.state.borrow_mut().muted = muted;
        self.record("muted", muted);
    }

    fn paused(&self) -> bool {
        self.state.borrow().paused
    }

    fn preload(&self) -> String {
        self.state.borrow().preload.clone()
    }

    fn set_preload(&self, preload: &str) {
        self.state.borrow_mut().preload = preload.to_string();
        self.record("preload", preload);
    }

    fn seeking(&self) -> bool {
        false
    }

    fn src(&self) -> String {
        self.state.borrow().src.clone()
    }

    fn set_src(&self, src: &str) {
        self.state.borrow_mut().src = src.to_string();
        self.record("src", src);
    }

    fn volume(&self) -> f64 {
        self.state.borrow().volume
    }

    fn set_volume(&self, volume: f64) {
        self.state.borrow_mut().volume = volume;
        self.record("volume", volume);
    }

    fn set_playback_rate(&self, rate: f64) {
        self.record("playbackRate", rate);
    }

    fn set_primary_color(&self, color: Option<&str>) {
        self.record("primaryColor", color.unwrap_or(""));
    }

    fn set_letterbox_color(&self, color: Option<&str>) {
        self.record("letterboxColor", color.unwrap_or(""));
    }

    fn video_width(&self) -> f64 {
        self.state.borrow().video_width
    }

    fn video_height(&self) -> f64 {
        self.state.borrow().video_height
    }

    fn play(&self) -> PlayResult {
        self.state.borrow_mut().paused = false;
        self.writes.borrow_mut().push("play".to_string());
        let refused = self.refuse_play.get();
        Box::pin(async move {
            if refused {
                Err(PlaybackError::NotAllowed(
                    "play() requires a user gesture".to_string(),
                ))
            } else {
                Ok(())
            }
        })
    }

    fn pause(&self) {
        self.state.borrow_mut().paused = true;
        self.writes.borrow_mut().push("pause".to_string());
    }

    fn add_event_listener(&self, event: PlayerEvent, callback: EventCallback) {
        let mut listeners = self.listeners.borrow_mut();
        let entry = listeners.entry(event).or_default();
        // Browser EventTarget semantics: duplicate registrations collapse.
        if !entry.iter().any(|l| Rc::ptr_eq(l, &callback)) {
            entry.push(callback);
        }
    }

    fn remove_event_listener(&self, event: PlayerEvent, callback: &EventCallback) {
        if let Some(listeners) = self.listeners.borrow_mut().get_mut(&event) {
            listeners.retain(|l| !Rc::ptr_eq(l, callback));
        }
    }
}
