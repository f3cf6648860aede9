//! The legacy `<stream>` custom-element component.
//!
//! The element predates the SDK: its runtime script upgrades `<stream>`
//! placeholders in the document, and an already-upgraded page exposes a
//! global `__stream` helper for elements added later. Unlike the iframe
//! variant there is no asynchronous handle acquisition; the element itself
//! is the player API surface from the moment it exists.

use std::rc::Rc;

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

use stream_embed_core::{
    attribute_plan, EmbedError, EventSync, HandleSlot, PlayerEvent, PlayerHandle, PropertySync,
    StreamConfig,
};

use super::script::ensure_script;
use super::sdk::JsPlayer;

/// URL of the runtime that upgrades `<stream>` elements.
pub const EMBED_SCRIPT_URL: &str = "https://embed.videodelivery.net/embed/r4xu.fla9.latest.js";

// The element runtime never fires `resize`; bind everything else.
static ELEMENT_EVENTS: [PlayerEvent; 24] = [
    PlayerEvent::Abort,
    PlayerEvent::CanPlay,
    PlayerEvent::CanPlayThrough,
    PlayerEvent::DurationChange,
    PlayerEvent::Ended,
    PlayerEvent::Error,
    PlayerEvent::LoadedData,
    PlayerEvent::LoadedMetaData,
    PlayerEvent::LoadStart,
    PlayerEvent::Pause,
    PlayerEvent::Play,
    PlayerEvent::Playing,
    PlayerEvent::Progress,
    PlayerEvent::RateChange,
    PlayerEvent::Seeked,
    PlayerEvent::Seeking,
    PlayerEvent::Stalled,
    PlayerEvent::Suspend,
    PlayerEvent::TimeUpdate,
    PlayerEvent::VolumeChange,
    PlayerEvent::Waiting,
    PlayerEvent::StreamAdStart,
    PlayerEvent::StreamAdEnd,
    PlayerEvent::StreamAdTimeout,
];

/// A `<stream>` element mounted into the document.
pub struct StreamElement {
    element: Element,
    config: StreamConfig,
    plan: Vec<(&'static str, Option<String>)>,
    properties: PropertySync,
    events: EventSync,
    slot: HandleSlot,
}

impl StreamElement {
    /// Mounts a `<stream>` element under `parent` and ensures the runtime
    /// script is loading. The handle is available immediately.
    pub fn mount(parent: &Element, config: StreamConfig) -> Result<Self, EmbedError> {
        Self::mount_with_slot(parent, config, HandleSlot::new())
    }

    /// Like [`StreamElement::mount`], but exposes the handle through the
    /// caller-supplied `slot`.
    pub fn mount_with_slot(
        parent: &Element,
        config: StreamConfig,
        slot: HandleSlot,
    ) -> Result<Self, EmbedError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(EmbedError::NoDocument)?;

        let element = document
            .create_element("stream")
            .map_err(|e| EmbedError::Dom(format!("failed to create stream element: {e:?}")))?;

        let plan = attribute_plan(&config);
        for (name, value) in &plan {
            if let Some(value) = value {
                let _ = element.set_attribute(name, value);
            }
        }

        parent
            .append_child(&element)
            .map_err(|e| EmbedError::Dom(format!("failed to append stream element: {e:?}")))?;

        ensure_script(&document, EMBED_SCRIPT_URL)?;
        init_element(&element);

        slot.fill(Rc::new(JsPlayer::new(element.clone().into())));

        let mut component = Self {
            element,
            config,
            plan,
            properties: PropertySync::new(),
            events: EventSync::new(&ELEMENT_EVENTS),
            slot,
        };
        component.sync();
        Ok(component)
    }

    /// Applies a new config: attribute edits for markup-level fields,
    /// property writes and listener rebinds for the rest.
    pub fn update(&mut self, config: StreamConfig) {
        let plan = attribute_plan(&config);
        for ((name, old), (_, new)) in self.plan.iter().zip(&plan) {
            if old == new {
                continue;
            }
            match new {
                Some(value) => {
                    let _ = self.element.set_attribute(name, value);
                }
                None => {
                    let _ = self.element.remove_attribute(name);
                }
            }
        }
        self.plan = plan;
        self.config = config;
        self.sync();
    }

    fn sync(&mut self) {
        let Some(handle) = self.slot.get() else {
            return;
        };
        self.properties.apply(handle.as_ref(), &self.config);
        self.events.apply(handle.as_ref(), &self.config.callbacks);
    }

    /// The slot exposing the element's player handle.
    pub fn slot(&self) -> HandleSlot {
        self.slot.clone()
    }

    /// The element's player handle.
    pub fn handle(&self) -> Option<Rc<dyn PlayerHandle>> {
        self.slot.get()
    }

    /// The underlying `<stream>` element.
    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl Drop for StreamElement {
    fn drop(&mut self) {
        if let Some(handle) = self.slot.get() {
            self.events.detach_all(handle.as_ref());
        }
        self.slot.clear();
        self.element.remove();
    }
}

/// Asks an already-loaded runtime to upgrade `element` now. When the script
/// is still in flight this is a no-op; the runtime upgrades every `<stream>`
/// element it finds once it executes.
fn init_element(element: &Element) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(runtime) = Reflect::get(&window, &JsValue::from_str("__stream")) else {
        return;
    };
    if runtime.is_undefined() || runtime.is_null() {
        return;
    }
    let Ok(init) = Reflect::get(&runtime, &JsValue::from_str("initElement")) else {
        return;
    };
    let Ok(init) = init.dyn_into::<Function>() else {
        return;
    };
    if let Err(e) = init.call1(&runtime, element.unchecked_ref()) {
        tracing::warn!("__stream.initElement failed: {e:?}");
    }
}
