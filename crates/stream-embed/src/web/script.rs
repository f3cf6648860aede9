//! Shared script-tag loading.
//!
//! Every component instance needs the player runtime script, but the
//! document must only ever carry one tag per URL. Get-or-create goes
//! through a DOM query rather than only an in-module cache, so a tag
//! injected by server-side markup (or another bundle) is adopted instead
//! of duplicated.

use std::cell::RefCell;
use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlScriptElement};

use stream_embed_core::EmbedError;

thread_local! {
    static SCRIPTS: RefCell<HashMap<String, HtmlScriptElement>> =
        RefCell::new(HashMap::new());
}

/// Returns the script tag for `url`, creating and appending it to `<head>`
/// on first use. Repeated calls for the same URL return the same tag.
pub fn ensure_script(document: &Document, url: &str) -> Result<HtmlScriptElement, EmbedError> {
    if let Some(script) = SCRIPTS.with(|scripts| scripts.borrow().get(url).cloned()) {
        // A cached tag can be stale if something removed it from the
        // document; fall through and re-install in that case.
        if script.is_connected() {
            return Ok(script);
        }
    }

    let script = find_existing(document, url)
        .map(Ok)
        .unwrap_or_else(|| install(document, url))?;

    SCRIPTS.with(|scripts| {
        scripts
            .borrow_mut()
            .insert(url.to_string(), script.clone());
    });
    Ok(script)
}

fn find_existing(document: &Document, url: &str) -> Option<HtmlScriptElement> {
    let selector = format!("script[src='{url}']");
    document
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
}

fn install(document: &Document, url: &str) -> Result<HtmlScriptElement, EmbedError> {
    tracing::debug!(url, "installing player runtime script");
    let script: HtmlScriptElement = document
        .create_element("script")
        .map_err(|e| EmbedError::Dom(format!("failed to create script tag: {e:?}")))?
        .dyn_into()
        .map_err(|_| EmbedError::Dom("created element is not a script".to_string()))?;
    script.set_src(url);

    let head = document
        .head()
        .ok_or_else(|| EmbedError::Dom("document has no head".to_string()))?;
    head.append_child(&script)
        .map_err(|e| EmbedError::Dom(format!("failed to append script tag: {e:?}")))?;
    Ok(script)
}
