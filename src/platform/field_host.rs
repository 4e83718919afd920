//! Particle field in the page background

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, anyhow};
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, HtmlCanvasElement, MouseEvent, MutationObserver, MutationObserverInit, TouchEvent,
    Window,
};

use super::canvas::CanvasSurface;
use super::{data_config, listen, listen_passive, now};
use crate::field::{FieldConfig, GlowGate, MotionProfile, ParticleField};

const CANVAS_ID: &str = "particleCanvas";
const ACCENT_VAR: &str = "--accent-light";

struct FieldHost {
    field: ParticleField,
    surface: CanvasSurface,
    frame_id: Option<i32>,
}

impl FieldHost {
    fn resize(&mut self, window: &Window) {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
        let width = dim(window.inner_width());
        let height = dim(window.inner_height());
        self.field
            .resize(width, height, window.device_pixel_ratio() as f32);
        self.surface
            .apply_backing(self.field.backing_size(), self.field.dpr());
    }

    fn sync_theme(&mut self, window: &Window, document: &Document) {
        let Some(body) = document.body() else {
            return;
        };
        let value = window
            .get_computed_style(&body)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value(ACCENT_VAR).ok());
        if let Some(value) = value {
            self.field.sync_theme_color(value.trim());
        }
    }
}

/// Start the field on `#particleCanvas`; returns the glow gate for page UI
pub fn start(window: &Window, document: &Document) -> anyhow::Result<GlowGate> {
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .context("no particle canvas")?
        .dyn_into()
        .map_err(|_| anyhow!("#{CANVAS_ID} is not a canvas"))?;

    let cfg = data_config(&canvas, FieldConfig::from_json).unwrap_or_default();
    let reduced = window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false);
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    let profile = MotionProfile::detect(reduced, width);
    let pause_offscreen = cfg.pause_offscreen;

    let surface = CanvasSurface::new(canvas)?;
    let seed = js_sys::Date::now() as u64;
    let host = Rc::new(RefCell::new(FieldHost {
        field: ParticleField::new(cfg, profile, seed),
        surface,
        frame_id: None,
    }));
    let gate = host.borrow().field.glow_gate();

    {
        let mut h = host.borrow_mut();
        h.sync_theme(window, document);
        h.resize(window);
        h.field.resume(now());
        log::info!(
            "Particle field started: {} particles, {} profile",
            h.field.particles().len(),
            profile.as_str()
        );
    }

    setup_resize(window, host.clone());
    setup_pointer(document, host.clone());
    setup_theme_observer(window, document, host.clone())?;
    if pause_offscreen {
        setup_visibility(document, host.clone());
    }

    request_frame(host);
    Ok(gate)
}

fn request_frame(host: Rc<RefCell<FieldHost>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let next = host.clone();
    let closure = Closure::once(move |time: f64| {
        frame(next, time);
    });
    let id = window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
    host.borrow_mut().frame_id = id;
}

fn frame(host: Rc<RefCell<FieldHost>>, time: f64) {
    {
        let mut h = host.borrow_mut();
        h.frame_id = None;
        if !h.field.is_running() {
            return;
        }
        let FieldHost { field, surface, .. } = &mut *h;
        field.frame(time, surface);
    }
    request_frame(host);
}

fn setup_resize(window: &Window, host: Rc<RefCell<FieldHost>>) {
    listen(window, "resize", move |_event| {
        if let Some(window) = web_sys::window() {
            host.borrow_mut().resize(&window);
        }
    });
}

fn setup_pointer(document: &Document, host: Rc<RefCell<FieldHost>>) {
    {
        let host = host.clone();
        listen(document, "mousemove", move |event| {
            if let Some(e) = event.dyn_ref::<MouseEvent>() {
                host.borrow_mut()
                    .field
                    .set_pointer(e.client_x() as f32, e.client_y() as f32);
            }
        });
    }

    {
        let host = host.clone();
        listen(document, "mouseleave", move |_event| {
            host.borrow_mut().field.release_pointer();
        });
    }

    for name in ["touchstart", "touchmove"] {
        let host = host.clone();
        listen_passive(document, name, true, move |event| {
            let touch = event
                .dyn_ref::<TouchEvent>()
                .and_then(|e| e.touches().get(0));
            if let Some(t) = touch {
                host.borrow_mut()
                    .field
                    .set_pointer(t.client_x() as f32, t.client_y() as f32);
            }
        });
    }

    listen(document, "touchend", move |_event| {
        host.borrow_mut().field.release_pointer();
    });
}

/// Re-read the accent colour whenever `data-theme` changes on `<body>`
fn setup_theme_observer(
    window: &Window,
    document: &Document,
    host: Rc<RefCell<FieldHost>>,
) -> anyhow::Result<()> {
    let Some(body) = document.body() else {
        log::warn!("No <body>; theme colour will not follow theme changes");
        return Ok(());
    };
    let window = window.clone();
    let doc = document.clone();
    let closure = Closure::<dyn FnMut()>::new(move || {
        host.borrow_mut().sync_theme(&window, &doc);
    });
    let observer = MutationObserver::new(closure.as_ref().unchecked_ref())
        .map_err(|e| anyhow!("{e:?}"))?;
    closure.forget();

    let init = MutationObserverInit::new();
    init.set_attributes(true);
    init.set_attribute_filter(&js_sys::Array::of1(&JsValue::from_str("data-theme")));
    observer
        .observe_with_options(&body, &init)
        .map_err(|e| anyhow!("{e:?}"))?;
    Ok(())
}

/// Cancel frames while hidden; resume with clocks re-armed
fn setup_visibility(document: &Document, host: Rc<RefCell<FieldHost>>) {
    let doc = document.clone();
    listen(document, "visibilitychange", move |_event| {
        if doc.hidden() {
            let mut h = host.borrow_mut();
            if let (Some(id), Some(window)) = (h.frame_id.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(id);
            }
            h.field.pause();
        } else {
            let idle = {
                let mut h = host.borrow_mut();
                let idle = h.frame_id.is_none();
                h.field.resume(now());
                idle
            };
            if idle {
                request_frame(host.clone());
            }
        }
    });
}
