//! Panel navigation host
//!
//! Feeds DOM input into `NavController` and applies the resulting effects in
//! order. A single timeout is kept armed for the controller's next deadline.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::anyhow;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, KeyboardEvent, TouchEvent, WheelEvent,
};

use super::page::PageState;
use super::{data_config, listen, listen_passive, now, select_all};
use crate::nav::{
    InlineStyle, Leaf, NavConfig, NavController, NavEffect, PanelView, TransitionHint, UiState,
    ViewMode,
};

struct NavHost {
    nav: NavController,
    panels: Vec<HtmlElement>,
    dots: Vec<Element>,
    links: Vec<Element>,
    prev: Option<HtmlButtonElement>,
    next: Option<HtmlButtonElement>,
    readout: Option<Element>,
    cover: Option<Element>,
    terminal: Option<Element>,
    nav_bar: Option<Element>,
    open_btn: Option<Element>,
    timer: Option<i32>,
}

impl NavHost {
    fn apply(&self, effect: NavEffect) {
        match effect {
            NavEffect::Panel { index, view } => {
                if let Some(el) = self.panels.get(index) {
                    apply_panel(el, &view);
                }
            }
            NavEffect::Reflow { index } => {
                if let Some(el) = self.panels.get(index) {
                    let _ = el.offset_width();
                }
            }
            NavEffect::Ui(ui) => self.apply_ui(&ui),
            NavEffect::View(mode) => self.apply_view(mode),
        }
    }

    fn apply_ui(&self, ui: &UiState) {
        for (i, dot) in self.dots.iter().enumerate() {
            let _ = dot
                .class_list()
                .toggle_with_force("dot-active", ui.is_marker_active(i));
        }
        for (i, link) in self.links.iter().enumerate() {
            let _ = link
                .class_list()
                .toggle_with_force("active", ui.is_marker_active(i));
        }
        if let Some(btn) = &self.prev {
            btn.set_disabled(ui.prev_disabled);
        }
        if let Some(btn) = &self.next {
            btn.set_disabled(ui.next_disabled);
        }
        if let Some(el) = &self.readout {
            el.set_text_content(Some(&ui.readout()));
        }
    }

    fn apply_view(&self, mode: ViewMode) {
        let toggle = |el: &Option<Element>, class: &str, on: bool| {
            if let Some(el) = el {
                let _ = el.class_list().toggle_with_force(class, on);
            }
        };
        match mode {
            ViewMode::Cover => {
                toggle(&self.terminal, "active", false);
                toggle(&self.nav_bar, "nav-hidden", true);
                toggle(&self.cover, "cover-exit", false);
            }
            ViewMode::Opening => {
                toggle(&self.cover, "cover-exit", true);
                // No ghost clicks while the cover animates out
                toggle(&self.open_btn, "visible", false);
            }
            ViewMode::Panels => {
                toggle(&self.terminal, "active", true);
                toggle(&self.nav_bar, "nav-hidden", false);
            }
            ViewMode::Closing => {
                toggle(&self.terminal, "active", false);
                toggle(&self.nav_bar, "nav-hidden", true);
            }
        }
    }
}

fn apply_panel(el: &HtmlElement, view: &PanelView) {
    let classes = el.class_list();
    let _ = classes.toggle_with_force("active", view.active);
    let _ = classes.toggle_with_force(Leaf::Turned.class_name(), view.leaf == Some(Leaf::Turned));
    let _ = classes.toggle_with_force(
        Leaf::Upcoming.class_name(),
        view.leaf == Some(Leaf::Upcoming),
    );
    let _ = classes.toggle_with_force("flipping", view.flipping);
    let _ = classes.toggle_with_force("peek", view.peek);
    apply_style(el, &view.style);
}

fn apply_style(el: &HtmlElement, style: &InlineStyle) {
    let css = el.style();
    let set = |name: &str, value: Option<String>| {
        let _ = match value {
            Some(v) => css.set_property(name, &v),
            None => css.remove_property(name).map(|_| ()),
        };
    };
    set(
        "transition",
        match style.transition {
            TransitionHint::Inherit => None,
            TransitionHint::Disabled => Some("none".to_string()),
            TransitionHint::Snap { ms } => Some(format!(
                "transform {ms}ms ease-out, opacity {ms}ms ease-out"
            )),
        },
    );
    set("transform", style.translate_x.map(|x| format!("translateX({x}px)")));
    set("opacity", style.opacity.map(|o| o.to_string()));
}

/// Run effects produced by the last input, then re-arm the timer
fn flush(host: &Rc<RefCell<NavHost>>) {
    let effects = host.borrow_mut().nav.take_effects();
    {
        let h = host.borrow();
        for effect in effects {
            h.apply(effect);
        }
    }
    arm_timer(host);
}

fn arm_timer(host: &Rc<RefCell<NavHost>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let deadline = {
        let mut h = host.borrow_mut();
        if let Some(id) = h.timer.take() {
            window.clear_timeout_with_handle(id);
        }
        h.nav.next_deadline()
    };
    let Some(at) = deadline else {
        return;
    };

    let delay = (at - now()).max(0.0).ceil() as i32;
    let next = host.clone();
    let closure = Closure::once(move || {
        {
            let mut h = next.borrow_mut();
            h.timer = None;
            h.nav.advance(now());
        }
        flush(&next);
    });
    let id = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay,
        )
        .ok();
    closure.forget();
    host.borrow_mut().timer = id;
}

/// Catch the controller up to the clock, run `f` against it and apply
/// whatever it produced
fn drive<R>(host: &Rc<RefCell<NavHost>>, f: impl FnOnce(&mut NavController, f64) -> R) -> R {
    let now = now();
    let result = {
        let nav = &mut host.borrow_mut().nav;
        nav.advance(now);
        f(nav, now)
    };
    flush(host);
    result
}

pub fn start(document: &Document, page: Rc<RefCell<PageState>>) -> anyhow::Result<()> {
    let panels: Vec<HtmlElement> = select_all(document, ".panel")
        .into_iter()
        .filter_map(|el| el.dyn_into().ok())
        .collect();
    if panels.is_empty() {
        return Err(anyhow!("no .panel elements"));
    }

    let terminal = document.get_element_by_id("terminal");
    let cfg = terminal
        .as_ref()
        .and_then(|el| data_config(el, NavConfig::from_json))
        .unwrap_or_default();
    let cover = document.get_element_by_id("cover");
    let nav = match cover {
        Some(_) => NavController::with_cover(cfg, panels.len()),
        None => NavController::new(cfg, panels.len()),
    };

    let button = |id: &str| {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
    };
    let host = Rc::new(RefCell::new(NavHost {
        nav,
        dots: build_dots(document, panels.len()),
        panels,
        links: select_all(document, ".nav-links a[data-page]"),
        prev: button("prevPage"),
        next: button("nextPage"),
        readout: document.get_element_by_id("pageReadout"),
        cover,
        terminal,
        nav_bar: document.get_element_by_id("mainNav"),
        open_btn: document.get_element_by_id("openFileBtn"),
        timer: None,
    }));

    setup_controls(document, host.clone(), page)?;
    setup_keyboard(document, host.clone());
    setup_wheel(document, host.clone());
    setup_touch(document, host.clone());
    flush(&host);

    let h = host.borrow();
    log::info!(
        "Panel navigation ready: {} panels, {:?} transitions",
        h.nav.len(),
        h.nav.config().style
    );
    Ok(())
}

fn build_dots(document: &Document, count: usize) -> Vec<Element> {
    let Some(wrap) = document.get_element_by_id("pageDots") else {
        return Vec::new();
    };
    (0..count)
        .filter_map(|i| {
            let dot = document.create_element("button").ok()?;
            dot.set_class_name("page-dot");
            let _ = dot.set_attribute("aria-label", &format!("Page {}", i + 1));
            wrap.append_child(&dot).ok()?;
            Some(dot)
        })
        .collect()
}

fn setup_controls(
    document: &Document,
    host: Rc<RefCell<NavHost>>,
    page: Rc<RefCell<PageState>>,
) -> anyhow::Result<()> {
    let (prev, next, dots, links, open_btn) = {
        let h = host.borrow();
        (
            h.prev.clone(),
            h.next.clone(),
            h.dots.clone(),
            h.links.clone(),
            h.open_btn.clone(),
        )
    };

    if let Some(btn) = prev {
        let host = host.clone();
        listen(&btn, "click", move |_event| {
            drive(&host, |nav, now| nav.prev(now));
        });
    }
    if let Some(btn) = next {
        let host = host.clone();
        listen(&btn, "click", move |_event| {
            drive(&host, |nav, now| nav.next(now));
        });
    }

    for (i, dot) in dots.iter().enumerate() {
        let host = host.clone();
        listen(dot, "click", move |_event| {
            drive(&host, |nav, now| nav.go_to_page(i, true, now));
        });
    }

    for link in &links {
        let target = link
            .get_attribute("data-page")
            .and_then(|p| p.parse::<usize>().ok());
        let host = host.clone();
        listen(link, "click", move |event| {
            event.prevent_default();
            if let Some(i) = target {
                drive(&host, |nav, now| nav.go_to_page(i, true, now));
            }
        });
    }

    if let Some(btn) = open_btn.clone() {
        let host = host.clone();
        let page = page.clone();
        listen(&btn, "click", move |_event| {
            if !page.borrow().mode_chosen() {
                log::debug!("Cover stays closed until a display mode is chosen");
                return;
            }
            drive(&host, |nav, now| nav.open(now));
        });
    }

    let logo = document
        .query_selector(".nav-logo")
        .map_err(|e| anyhow!("{e:?}"))?;
    if let Some(logo) = logo {
        let host = host.clone();
        listen(&logo, "click", move |event| {
            event.prevent_default();
            drive(&host, |nav, now| nav.close(now));
            if let Some(btn) = open_btn.as_ref().filter(|_| page.borrow().mode_chosen()) {
                let _ = btn.class_list().add_1("visible");
            }
        });
    }
    Ok(())
}

fn setup_keyboard(document: &Document, host: Rc<RefCell<NavHost>>) {
    listen(document, "keydown", move |event| {
        let Some(e) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = e.key();
        let in_panels = host.borrow().nav.view() == ViewMode::Panels;
        if in_panels && matches!(key.as_str(), "ArrowRight" | "ArrowDown" | "ArrowLeft" | "ArrowUp") {
            e.prevent_default();
        }
        drive(&host, |nav, now| nav.handle_key(&key, now));
    });
}

fn setup_wheel(document: &Document, host: Rc<RefCell<NavHost>>) {
    listen_passive(document, "wheel", false, move |event| {
        let Some(e) = event.dyn_ref::<WheelEvent>() else {
            return;
        };
        let (dx, dy) = (e.delta_x() as f32, e.delta_y() as f32);
        if drive(&host, |nav, now| nav.on_wheel(dx, dy, now)) {
            e.prevent_default();
        }
    });
}

fn setup_touch(document: &Document, host: Rc<RefCell<NavHost>>) {
    {
        let host = host.clone();
        listen_passive(document, "touchstart", true, move |event| {
            let touch = event
                .dyn_ref::<TouchEvent>()
                .and_then(|e| e.touches().get(0));
            if let Some(t) = touch {
                host.borrow_mut()
                    .nav
                    .on_touch_start(t.client_x() as f32, t.client_y() as f32);
            }
        });
    }

    {
        let host = host.clone();
        listen_passive(document, "touchmove", false, move |event| {
            let touch = event
                .dyn_ref::<TouchEvent>()
                .and_then(|e| e.touches().get(0));
            let Some(t) = touch else {
                return;
            };
            let (x, y) = (t.client_x() as f32, t.client_y() as f32);
            if drive(&host, |nav, _| nav.on_touch_move(x, y)) {
                event.prevent_default();
            }
        });
    }

    listen(document, "touchend", move |event| {
        let touch = event
            .dyn_ref::<TouchEvent>()
            .and_then(|e| e.changed_touches().get(0));
        let Some(t) = touch else {
            return;
        };
        let (x, y) = (t.client_x() as f32, t.client_y() as f32);
        drive(&host, |nav, now| nav.on_touch_end(x, y, now));
    });
}
