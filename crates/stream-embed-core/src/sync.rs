//! Config-to-handle synchronization.
//!
//! Callers re-supply a full [`StreamConfig`] whenever anything changes; this
//! module turns that into the minimal set of handle operations. Properties
//! are diffed against the previously-applied snapshot so an unchanged field
//! never touches the runtime, and event listeners are rebound only when the
//! callback identity actually changes.
//!
//! Both structs are plain state machines with no DOM types in sight, which
//! keeps them testable off-browser.

use std::collections::HashMap;
use std::rc::Rc;

use crate::config::{Callbacks, EventCallback, Preload, StreamConfig};
use crate::events::PlayerEvent;
use crate::handle::PlayerHandle;

thread_local! {
    // One shared no-op per thread. Binding the same Rc for every
    // handler-less event keeps its identity stable across applies, so a
    // config that never sets a handler never causes a rebind.
    static NOOP: EventCallback = Rc::new(|_| {});
}

fn noop() -> EventCallback {
    NOOP.with(Rc::clone)
}

/// The property values most recently written to the handle.
#[derive(Debug, Clone, PartialEq)]
struct PropertySnapshot {
    autoplay: bool,
    controls: bool,
    current_time: f64,
    loop_playback: bool,
    muted: bool,
    preload: &'static str,
    src: String,
    volume: f64,
    playback_rate: f64,
    primary_color: Option<String>,
    letterbox_color: Option<String>,
}

impl From<&StreamConfig> for PropertySnapshot {
    fn from(config: &StreamConfig) -> Self {
        Self {
            autoplay: config.autoplay,
            controls: config.controls,
            current_time: config.current_time,
            loop_playback: config.loop_playback,
            muted: config.muted,
            preload: Preload::resolve(config.preload),
            src: config.src.clone(),
            volume: config.volume,
            playback_rate: config.playback_rate,
            primary_color: config.primary_color.clone(),
            letterbox_color: config.letterbox_color.clone(),
        }
    }
}

/// Pushes changed config properties onto a live handle.
///
/// The first [`PropertySync::apply`] after construction (or after
/// [`PropertySync::reset`]) writes every property, which doubles as the
/// replay that brings a freshly-acquired handle in line with the config.
#[derive(Debug, Default)]
pub struct PropertySync {
    last: Option<PropertySnapshot>,
}

impl PropertySync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes each property whose value differs from the last applied
    /// snapshot. One write per changed property, none for the rest.
    pub fn apply(&mut self, handle: &dyn PlayerHandle, config: &StreamConfig) {
        let next = PropertySnapshot::from(config);
        let last = self.last.as_ref();
        if last.is_none() {
            tracing::debug!("replaying full property set onto player handle");
        }

        if last.map_or(true, |l| l.autoplay != next.autoplay) {
            handle.set_autoplay(next.autoplay);
        }
        if last.map_or(true, |l| l.controls != next.controls) {
            handle.set_controls(next.controls);
        }
        if last.map_or(true, |l| l.current_time != next.current_time) {
            handle.set_current_time(next.current_time);
        }
        if last.map_or(true, |l| l.loop_playback != next.loop_playback) {
            handle.set_loop_playback(next.loop_playback);
        }
        if last.map_or(true, |l| l.muted != next.muted) {
            handle.set_muted(next.muted);
        }
        if last.map_or(true, |l| l.preload != next.preload) {
            handle.set_preload(next.preload);
        }
        if last.map_or(true, |l| l.src != next.src) {
            handle.set_src(&next.src);
        }
        if last.map_or(true, |l| l.volume != next.volume) {
            handle.set_volume(next.volume);
        }
        if last.map_or(true, |l| l.playback_rate != next.playback_rate) {
            handle.set_playback_rate(next.playback_rate);
        }
        if last.map_or(true, |l| l.primary_color != next.primary_color) {
            handle.set_primary_color(next.primary_color.as_deref());
        }
        if last.map_or(true, |l| l.letterbox_color != next.letterbox_color) {
            handle.set_letterbox_color(next.letterbox_color.as_deref());
        }

        self.last = Some(next);
    }

    /// Forgets the applied snapshot so the next [`PropertySync::apply`]
    /// replays everything. Call when the handle is replaced.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Keeps exactly one listener bound per relayed event.
///
/// Events without a user handler get the shared no-op, so the runtime-side
/// listener set is constant and rebinds happen only when a handler's
/// identity changes between applies.
pub struct EventSync {
    events: &'static [PlayerEvent],
    bound: HashMap<PlayerEvent, EventCallback>,
}

impl EventSync {
    /// Synchronizes the given subset of events.
    pub fn new(events: &'static [PlayerEvent]) -> Self {
        Self {
            events,
            bound: HashMap::new(),
        }
    }

    /// Synchronizes every relayed event.
    pub fn all() -> Self {
        Self::new(&PlayerEvent::ALL)
    }

    /// Rebinds listeners whose callback changed since the last apply.
    pub fn apply(&mut self, handle: &dyn PlayerHandle, callbacks: &Callbacks) {
        for &event in self.events {
            let desired = callbacks.get(event).cloned().unwrap_or_else(noop);
            if let Some(current) = self.bound.get(&event) {
                if Rc::ptr_eq(current, &desired) {
                    continue;
                }
                handle.remove_event_listener(event, current);
            }
            handle.add_event_listener(event, desired.clone());
            self.bound.insert(event, desired);
        }
    }

    /// Removes every bound listener from the handle. Call on unmount while
    /// the handle is still reachable.
    pub fn detach_all(&mut self, handle: &dyn PlayerHandle) {
        for (event, callback) in self.bound.drain() {
            handle.remove_event_listener(event, &callback);
        }
    }

    /// Forgets bound listeners without touching the handle. Call when the
    /// handle is already gone.
    pub fn reset(&mut self) {
        self.bound.clear();
    }
}

impl std::fmt::Debug for EventSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSync")
            .field("events", &self.events.len())
            .field("bound", &self.bound.len())
            .finish()
    }
}
