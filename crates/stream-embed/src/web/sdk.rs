//! Interop with the player runtime SDK.
//!
//! The SDK script installs a global `Stream` factory; calling it with an
//! iframe returns the player API object. That object is plain JavaScript
//! with no wasm-bindgen typing, so [`JsPlayer`] goes through `Reflect` for
//! every property and method.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Document;

use stream_embed_core::{
    EmbedError, EventCallback, PlayResult, PlaybackError, PlayerEvent, PlayerHandle,
};

use super::script::ensure_script;

/// URL of the SDK that installs the global `Stream` factory.
pub const SDK_SCRIPT_URL: &str = "https://embed.cloudflarestream.com/embed/sdk.latest.js";

/// Returns the global `Stream` factory if the SDK has already loaded.
pub(crate) fn stream_factory() -> Option<Function> {
    let window = web_sys::window()?;
    Reflect::get(&window, &JsValue::from_str("Stream"))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

/// Runs `ready` with the `Stream` factory, loading the SDK script first if
/// necessary. The callback fires at most once; if the script fails to load
/// it never fires, and the component simply stays in its pre-handle state.
pub(crate) fn with_stream_factory<F>(document: &Document, ready: F) -> Result<(), EmbedError>
where
    F: FnOnce(Function) + 'static,
{
    if let Some(factory) = stream_factory() {
        ready(factory);
        return Ok(());
    }

    let script = ensure_script(document, SDK_SCRIPT_URL)?;
    let on_load = Closure::once(move |_: web_sys::Event| match stream_factory() {
        Some(factory) => ready(factory),
        None => tracing::warn!("player SDK loaded but did not install a Stream factory"),
    });
    script
        .add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())
        .map_err(|e| EmbedError::Dom(format!("failed to attach SDK load listener: {e:?}")))?;
    // The listener must outlive this call; the script tag is permanent
    // anyway, so leaking one closure per URL is the intended lifetime.
    on_load.forget();
    Ok(())
}

type ListenerEntry = (EventCallback, Closure<dyn FnMut(web_sys::Event)>);

/// [`PlayerHandle`] over a runtime API object.
///
/// Works for both the SDK's iframe player object and an initialized
/// `<stream>` element, which exposes the same surface.
pub struct JsPlayer {
    api: JsValue,
    listeners: RefCell<HashMap<PlayerEvent, Vec<ListenerEntry>>>,
}

impl JsPlayer {
    pub fn new(api: JsValue) -> Self {
        Self {
            api,
            listeners: RefCell::new(HashMap::new()),
        }
    }

    fn get(&self, name: &str) -> JsValue {
        Reflect::get(&self.api, &JsValue::from_str(name)).unwrap_or(JsValue::UNDEFINED)
    }

    fn set(&self, name: &str, value: &JsValue) {
        if Reflect::set(&self.api, &JsValue::from_str(name), value).is_err() {
            tracing::warn!(property = name, "player rejected property write");
        }
    }

    fn get_bool(&self, name: &str) -> bool {
        self.get(name).as_bool().unwrap_or(false)
    }

    fn get_f64(&self, name: &str) -> f64 {
        self.get(name).as_f64().unwrap_or(0.0)
    }

    fn call0(&self, name: &str) -> Result<JsValue, JsValue> {
        let method: Function = Reflect::get(&self.api, &JsValue::from_str(name))?
            .dyn_into()
            .map_err(|_| JsValue::from_str(&format!("player has no {name}() method")))?;
        method.call0(&self.api)
    }

    fn call2(&self, name: &str, a: &JsValue, b: &JsValue) -> Result<JsValue, JsValue> {
        let method: Function = Reflect::get(&self.api, &JsValue::from_str(name))?
            .dyn_into()
            .map_err(|_| JsValue::from_str(&format!("player has no {name}() method")))?;
        method.call2(&self.api, a, b)
    }
}

fn map_play_error(err: JsValue) -> PlaybackError {
    let name = Reflect::get(&err, &JsValue::from_str("name"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    let message = Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    if name == "NotAllowedError" {
        PlaybackError::NotAllowed(message)
    } else {
        PlaybackError::Rejected(message)
    }
}

impl PlayerHandle for JsPlayer {
    fn autoplay(&self) -> bool {
        self.get_bool("autoplay")
    }

    fn set_autoplay(&self, autoplay: bool) {
        self.set("autoplay", &JsValue::from_bool(autoplay));
    }

    fn controls(&self) -> bool {
        self.get_bool("controls")
    }

    fn set_controls(&self, controls: bool) {
        self.set("controls", &JsValue::from_bool(controls));
    }

    fn current_time(&self) -> f64 {
        self.get_f64("currentTime")
    }

    fn set_current_time(&self, seconds: f64) {
        self.set("currentTime", &JsValue::from_f64(seconds));
    }

    fn duration(&self) -> f64 {
        self.get("duration").as_f64().unwrap_or(f64::NAN)
    }

    fn ended(&self) -> bool {
        self.get_bool("ended")
    }

    fn loop_playback(&self) -> bool {
        self.get_bool("loop")
    }

    fn set_loop_playback(&self, loop_playback: bool) {
        self.set("loop", &JsValue::from_bool(loop_playback));
    }

    fn muted(&self) -> bool {
        self.get_bool("muted")
    }

    fn set_muted(&self, muted: bool) {
        self.set("muted", &JsValue::from_bool(muted));
    }

    fn paused(&self) -> bool {
        self.get_bool("paused")
    }

    fn preload(&self) -> String {
        self.get("preload").as_string().unwrap_or_default()
    }

    fn set_preload(&self, preload: &str) {
        self.set("preload", &JsValue::from_str(preload));
    }

    fn seeking(&self) -> bool {
        self.get_bool("seeking")
    }

    fn src(&self) -> String {
        self.get("src").as_string().unwrap_or_default()
    }

    fn set_src(&self, src: &str) {
        self.set("src", &JsValue::from_str(src));
    }

    fn volume(&self) -> f64 {
        self.get("volume").as_f64().unwrap_or(1.0)
    }

    fn set_volume(&self, volume: f64) {
        self.set("volume", &JsValue::from_f64(volume));
    }

    fn set_playback_rate(&self, rate: f64) {
        self.set("playbackRate", &JsValue::from_f64(rate));
    }

    fn set_primary_color(&self, color: Option<&str>) {
        let value = color.map_or(JsValue::UNDEFINED, JsValue::from_str);
        self.set("primaryColor", &value);
    }

    fn set_letterbox_color(&self, color: Option<&str>) {
        let value = color.map_or(JsValue::UNDEFINED, JsValue::from_str);
        self.set("letterboxColor", &value);
    }

    fn video_width(&self) -> f64 {
        self.get_f64("videoWidth")
    }

    fn video_height(&self) -> f64 {
        self.get_f64("videoHeight")
    }

    fn play(&self) -> PlayResult {
        let result = self.call0("play");
        Box::pin(async move {
            let value = result.map_err(map_play_error)?;
            let promise: Promise = value
                .dyn_into()
                .map_err(|_| PlaybackError::Rejected("play() did not return a promise".to_string()))?;
            JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(map_play_error)
        })
    }

    fn pause(&self) {
        if let Err(e) = self.call0("pause") {
            tracing::warn!("pause() failed: {e:?}");
        }
    }

    fn add_event_listener(&self, event: PlayerEvent, callback: EventCallback) {
        let mut listeners = self.listeners.borrow_mut();
        let entries = listeners.entry(event).or_default();
        if entries.iter().any(|(cb, _)| Rc::ptr_eq(cb, &callback)) {
            return;
        }

        let relayed = Rc::clone(&callback);
        let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
            relayed(event);
        }) as Box<dyn FnMut(web_sys::Event)>);

        if let Err(e) = self.call2(
            "addEventListener",
            &JsValue::from_str(event.name()),
            closure.as_ref().unchecked_ref(),
        ) {
            tracing::warn!(event = event.name(), "addEventListener failed: {e:?}");
            return;
        }
        entries.push((callback, closure));
    }

    fn remove_event_listener(&self, event: PlayerEvent, callback: &EventCallback) {
        let mut listeners = self.listeners.borrow_mut();
        let Some(entries) = listeners.get_mut(&event) else {
            return;
        };
        let Some(index) = entries.iter().position(|(cb, _)| Rc::ptr_eq(cb, callback)) else {
            return;
        };
        let (_, closure) = entries.remove(index);
        if let Err(e) = self.call2(
            "removeEventListener",
            &JsValue::from_str(event.name()),
            closure.as_ref().unchecked_ref(),
        ) {
            tracing::warn!(event = event.name(), "removeEventListener failed: {e:?}");
        }
        // Dropping the closure invalidates it; the runtime-side
        // registration was just removed, so nothing can call it again.
    }
}
