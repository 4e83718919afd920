//! Browser platform layer
//!
//! Wires the pure engines to the DOM:
//! - `field_host`: canvas, animation frames, pointer, theme colour
//! - `nav_host`: panels, page controls, keyboard/wheel/touch input
//! - `page`: display mode, theme choice, glass panel hover
//!
//! Every subsystem starts independently; a missing element disables only the
//! part that needs it.

mod canvas;
mod field_host;
mod nav_host;
mod page;

pub use canvas::CanvasSurface;

use anyhow::Context;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget};

/// Start every subsystem the page has markup for
pub fn start() -> anyhow::Result<()> {
    let window = web_sys::window().context("no window")?;
    let document = window.document().context("no document")?;

    let page = page::PageState::load();

    match field_host::start(&window, &document) {
        Ok(gate) => page::wire_glass_panels(&document, gate),
        Err(e) => log::warn!("Particle field disabled: {e:#}"),
    }

    page::setup(&document, page.clone());

    if let Err(e) = nav_host::start(&document, page) {
        log::warn!("Panel navigation disabled: {e:#}");
    }
    Ok(())
}

/// Milliseconds on the same clock as animation frame timestamps
pub(crate) fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Attach a permanent listener
pub(crate) fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(_)>::new(handler);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Attach a permanent listener with an explicit `passive` flag
pub(crate) fn listen_passive(
    target: &EventTarget,
    event: &str,
    passive: bool,
    handler: impl FnMut(Event) + 'static,
) {
    let closure = Closure::<dyn FnMut(_)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    );
    closure.forget();
}

/// All elements matching `selector`, in document order
pub(crate) fn select_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Parse an optional `data-config` JSON override, keeping defaults on error
pub(crate) fn data_config<T>(el: &Element, parse: impl Fn(&str) -> Result<T, serde_json::Error>) -> Option<T> {
    let json = el.get_attribute("data-config")?;
    match parse(&json) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            log::warn!("Ignoring malformed data-config on #{}: {}", el.id(), e);
            None
        }
    }
}
