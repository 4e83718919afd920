//! Page-level controls: display mode, theme choice, glass panel hover

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Element};

use super::{listen, select_all};
use crate::field::GlowGate;
use crate::prefs::{DisplayMode, KeyValueStore, LocalStore, MemoryStore, Preferences};

const RAW_BODY_CLASS: &str = "nobs-mode";
const OPEN_BUTTON_ID: &str = "openFileBtn";

/// Preferences plus where they are written
pub struct PageState {
    pub prefs: Preferences,
    store: Box<dyn KeyValueStore>,
}

impl PageState {
    pub fn load() -> Rc<RefCell<Self>> {
        let store: Box<dyn KeyValueStore> = match LocalStore::open() {
            Some(store) => Box::new(store),
            None => {
                log::warn!("LocalStorage unavailable; preferences last for this visit only");
                Box::new(MemoryStore::new())
            }
        };
        let prefs = Preferences::load(store.as_ref());
        log::info!(
            "Preferences: mode {:?}, theme {:?}",
            prefs.display_mode.map(|m| m.as_str()),
            prefs.theme
        );
        Rc::new(RefCell::new(Self { prefs, store }))
    }

    /// The cover can only be opened once a display mode was picked
    pub fn mode_chosen(&self) -> bool {
        self.prefs.display_mode.is_some()
    }

    fn set_display_mode(&mut self, mode: DisplayMode) {
        self.prefs.set_display_mode(self.store.as_mut(), mode);
    }

    fn set_theme(&mut self, theme: &str) {
        self.prefs.set_theme(self.store.as_mut(), theme);
    }
}

pub fn setup(document: &Document, state: Rc<RefCell<PageState>>) {
    setup_display_mode(document, state.clone());
    setup_theme(document, state);
}

fn setup_display_mode(document: &Document, state: Rc<RefCell<PageState>>) {
    if let Some(mode) = state.borrow().prefs.display_mode {
        apply_display_mode(document, mode);
    }

    for (id, mode) in [("btnSanitized", DisplayMode::Sanitized), ("btnRaw", DisplayMode::Raw)] {
        let Some(btn) = document.get_element_by_id(id) else {
            continue;
        };
        let state = state.clone();
        let doc = document.clone();
        listen(&btn, "click", move |_event| {
            state.borrow_mut().set_display_mode(mode);
            apply_display_mode(&doc, mode);
            log::info!("Display mode: {}", mode.as_str());
        });
    }
}

fn apply_display_mode(document: &Document, mode: DisplayMode) {
    if let Some(body) = document.body() {
        let _ = body
            .class_list()
            .toggle_with_force(RAW_BODY_CLASS, mode.is_raw());
    }
    set_flag(document.get_element_by_id("btnSanitized"), "data-active", !mode.is_raw());
    set_flag(document.get_element_by_id("btnRaw"), "data-active", mode.is_raw());
    if let Some(open) = document.get_element_by_id(OPEN_BUTTON_ID) {
        let _ = open.class_list().add_1("visible");
    }
}

/// Buttons carrying `data-theme-choice` switch `data-theme` on `<body>`
fn setup_theme(document: &Document, state: Rc<RefCell<PageState>>) {
    if let Some(theme) = state.borrow().prefs.theme.clone() {
        apply_theme(document, &theme);
    }

    for btn in select_all(document, "[data-theme-choice]") {
        let Some(theme) = btn.get_attribute("data-theme-choice") else {
            continue;
        };
        let state = state.clone();
        let doc = document.clone();
        listen(&btn, "click", move |_event| {
            state.borrow_mut().set_theme(&theme);
            apply_theme(&doc, &theme);
        });
    }
}

fn apply_theme(document: &Document, theme: &str) {
    if let Some(body) = document.body() {
        let _ = body.set_attribute("data-theme", theme);
    }
}

/// Suppress the pointer glow while the pointer is over a `.glass` panel
pub fn wire_glass_panels(document: &Document, gate: GlowGate) {
    let panels = select_all(document, ".glass");
    for panel in &panels {
        {
            let gate = gate.clone();
            listen(panel, "mouseenter", move |_event| gate.suppress());
        }
        let gate = gate.clone();
        listen(panel, "mouseleave", move |_event| gate.release());
    }
    log::debug!("Glow gate wired to {} glass panels", panels.len());
}

fn set_flag(el: Option<Element>, attr: &str, on: bool) {
    let Some(el) = el else {
        return;
    };
    let _ = if on {
        el.set_attribute(attr, "true")
    } else {
        el.remove_attribute(attr)
    };
}
