//! The iframe-based player component.
//!
//! Mounting builds a container `<div>` holding the embed iframe, then loads
//! the SDK and asks it for the player API. The embed URL is computed once
//! from the mount-time config and never replaced; everything that can change
//! afterwards flows through property writes and listener rebinds against the
//! live handle.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlIFrameElement};

use stream_embed_core::{
    iframe_attribute_plan, iframe_src, iframe_style_plan, valid_src_url, Callbacks, EmbedError,
    EmbedOptions, EventSync, HandleSlot, PlayerEvent, PlayerHandle, PropertySync, StreamConfig,
    VideoDimensions,
};

use super::sdk::{with_stream_factory, JsPlayer};

/// Feature-policy grants the embed needs for ads, autoplay, and fullscreen.
const IFRAME_ALLOW: &str =
    "accelerometer; gyroscope; autoplay; encrypted-media; picture-in-picture;";

struct Shared {
    config: StreamConfig,
    properties: PropertySync,
    events: EventSync,
    slot: HandleSlot,
    container: HtmlElement,
    // Stable identity for the resize listener; created once at mount so
    // user-callback churn never rebinds it.
    resize_relay: Option<stream_embed_core::EventCallback>,
}

impl Shared {
    /// User callbacks with the resize slot taken over by our relay, which
    /// keeps responsive sizing working whether or not the caller listens.
    fn effective_callbacks(&self) -> Callbacks {
        let mut callbacks = self.config.callbacks.clone();
        if let Some(relay) = &self.resize_relay {
            callbacks.set(PlayerEvent::Resize, Rc::clone(relay));
        }
        callbacks
    }

    fn update_padding(&self) {
        if !self.config.responsive {
            return;
        }
        let dimensions = self
            .slot
            .get()
            .map(|handle| handle.dimensions())
            .unwrap_or_default();
        let style = self.container.style();
        match dimensions.padding_top_percent() {
            Some(padding) => {
                let _ = style.set_property("padding-top", &padding);
            }
            None => {
                let _ = style.remove_property("padding-top");
            }
        }
    }
}

fn sync_now(shared: &Rc<RefCell<Shared>>) {
    let Some(handle) = shared.borrow().slot.get() else {
        return;
    };
    let mut state = shared.borrow_mut();
    let effective = state.effective_callbacks();
    let config = state.config.clone();
    state.properties.apply(handle.as_ref(), &config);
    state.events.apply(handle.as_ref(), &effective);
}

/// An embedded player mounted into the document.
///
/// Dropping the component detaches all listeners, empties the handle slot,
/// and removes its DOM subtree.
pub struct StreamPlayer {
    container: HtmlElement,
    iframe: HtmlIFrameElement,
    slot: HandleSlot,
    shared: Rc<RefCell<Shared>>,
}

impl StreamPlayer {
    /// Mounts a player under `parent` with a fresh handle slot.
    pub fn mount(parent: &Element, config: StreamConfig) -> Result<Self, EmbedError> {
        Self::mount_with_slot(parent, config, HandleSlot::new())
    }

    /// Mounts a player under `parent`, exposing the live handle through the
    /// caller-supplied `slot` once the SDK has loaded.
    pub fn mount_with_slot(
        parent: &Element,
        config: StreamConfig,
        slot: HandleSlot,
    ) -> Result<Self, EmbedError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(EmbedError::NoDocument)?;

        let container = create_container(&document, &config)?;
        let iframe = create_iframe(&document, &config)?;
        container
            .append_child(&iframe)
            .map_err(|e| EmbedError::Dom(format!("failed to append iframe: {e:?}")))?;
        parent
            .append_child(&container)
            .map_err(|e| EmbedError::Dom(format!("failed to append container: {e:?}")))?;

        let shared = Rc::new(RefCell::new(Shared {
            config,
            properties: PropertySync::new(),
            events: EventSync::all(),
            slot: slot.clone(),
            container: container.clone(),
            resize_relay: None,
        }));

        let relay_state: Weak<RefCell<Shared>> = Rc::downgrade(&shared);
        let resize_relay: stream_embed_core::EventCallback = Rc::new(move |event| {
            let Some(shared) = relay_state.upgrade() else {
                return;
            };
            shared.borrow().update_padding();
            // Forward to whatever the caller currently has registered,
            // looked up per event so the relay itself never rebinds.
            let callback = shared.borrow().config.callbacks.get(event).cloned();
            if let Some(callback) = callback {
                callback(event);
            }
        });
        shared.borrow_mut().resize_relay = Some(resize_relay);

        acquire_handle(&document, &iframe, Rc::downgrade(&shared))?;

        Ok(Self {
            container,
            iframe,
            slot,
            shared,
        })
    }

    /// Applies a new config: one property write per changed field, listener
    /// rebinds only for changed callback identities. Before the handle is
    /// acquired this just records the config; acquisition replays it.
    pub fn update(&self, config: StreamConfig) {
        {
            let mut state = self.shared.borrow_mut();
            apply_container_config(&state.container, &config);
            apply_iframe_config(&self.iframe, &config);
            state.config = config;
        }
        sync_now(&self.shared);
        self.shared.borrow().update_padding();
    }

    /// The slot through which the live handle is (or will be) exposed.
    pub fn slot(&self) -> HandleSlot {
        self.slot.clone()
    }

    /// The live handle, once the SDK has produced it.
    pub fn handle(&self) -> Option<Rc<dyn PlayerHandle>> {
        self.slot.get()
    }

    /// Intrinsic dimensions of the loaded video; zero until metadata loads.
    pub fn dimensions(&self) -> VideoDimensions {
        self.handle()
            .map(|handle| handle.dimensions())
            .unwrap_or_default()
    }

    /// The embed iframe, for styling beyond what the config covers.
    pub fn iframe(&self) -> &HtmlIFrameElement {
        &self.iframe
    }
}

impl Drop for StreamPlayer {
    fn drop(&mut self) {
        if let Some(handle) = self.slot.get() {
            self.shared.borrow_mut().events.detach_all(handle.as_ref());
        } else {
            self.shared.borrow_mut().events.reset();
        }
        self.slot.clear();
        self.container.remove();
    }
}

fn create_container(document: &Document, config: &StreamConfig) -> Result<HtmlElement, EmbedError> {
    let container: HtmlElement = document
        .create_element("div")
        .map_err(|e| EmbedError::Dom(format!("failed to create container: {e:?}")))?
        .dyn_into()
        .map_err(|_| EmbedError::Dom("container is not an HTML element".to_string()))?;
    apply_container_config(&container, config);
    Ok(container)
}

fn apply_container_config(container: &HtmlElement, config: &StreamConfig) {
    container.set_class_name(config.class_name.as_deref().unwrap_or(""));
    let style = container.style();
    if config.responsive {
        let _ = style.set_property("position", "relative");
        let _ = style.remove_property("height");
        let _ = style.remove_property("width");
    } else {
        let _ = style.remove_property("position");
        let _ = style.remove_property("padding-top");
        if let Some(height) = &config.height {
            let _ = style.set_property("height", height);
        }
        if let Some(width) = &config.width {
            let _ = style.set_property("width", width);
        }
    }
}

fn create_iframe(
    document: &Document,
    config: &StreamConfig,
) -> Result<HtmlIFrameElement, EmbedError> {
    let iframe: HtmlIFrameElement = document
        .create_element("iframe")
        .map_err(|e| EmbedError::Dom(format!("failed to create iframe: {e:?}")))?
        .dyn_into()
        .map_err(|_| EmbedError::Dom("element is not an iframe".to_string()))?;

    // The URL is frozen here; swapping it later would reload the embed.
    let src = if valid_src_url(&config.src) {
        config.src.clone()
    } else {
        iframe_src(&config.src, &EmbedOptions::from(config))
    };
    iframe.set_src(&src);

    iframe.set_allow(IFRAME_ALLOW);
    iframe.set_allow_fullscreen(true);
    let _ = iframe.set_attribute("frameBorder", "0");
    apply_iframe_config(&iframe, config);

    Ok(iframe)
}

/// Styling and attributes that follow the config across updates. The plans
/// carry explicit removals, so a field that goes away also undoes itself.
fn apply_iframe_config(iframe: &HtmlIFrameElement, config: &StreamConfig) {
    for (name, value) in iframe_attribute_plan(config) {
        match value {
            Some(value) => {
                let _ = iframe.set_attribute(name, &value);
            }
            None => {
                let _ = iframe.remove_attribute(name);
            }
        }
    }

    let style = iframe.style();
    for (name, value) in iframe_style_plan(config) {
        match value {
            Some(value) => {
                let _ = style.set_property(name, value);
            }
            None => {
                let _ = style.remove_property(name);
            }
        }
    }
}

/// Loads the SDK (if needed) and fills the slot with the iframe's player
/// API. Holds only a weak reference to the component state, so an unmount
/// that races the SDK load wins cleanly.
fn acquire_handle(
    document: &Document,
    iframe: &HtmlIFrameElement,
    shared: Weak<RefCell<Shared>>,
) -> Result<(), EmbedError> {
    let iframe = iframe.clone();
    with_stream_factory(document, move |factory| {
        let Some(shared) = shared.upgrade() else {
            tracing::debug!("player unmounted before the SDK loaded");
            return;
        };
        let api = match factory.call1(&JsValue::UNDEFINED, iframe.unchecked_ref()) {
            Ok(api) => api,
            Err(e) => {
                tracing::warn!("Stream factory rejected the iframe: {e:?}");
                return;
            }
        };
        shared
            .borrow()
            .slot
            .fill(Rc::new(JsPlayer::new(api)));
        sync_now(&shared);
        shared.borrow().update_padding();
    })
}
