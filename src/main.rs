//! Dossier entry point
//!
//! On the web this boots the page; natively it runs both engines headless
//! and logs what they did.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    log::info!("Dossier starting...");

    match dossier::platform::start() {
        Ok(()) => log::info!("Dossier running!"),
        Err(e) => log::error!("Dossier failed to start: {e:#}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dossier (native) starting...");
    log::info!("Native mode runs the engines headless - use `trunk serve` for the site");

    run_field();
    run_nav();
}

/// Ten simulated seconds of the particle field against a recording surface
#[cfg(not(target_arch = "wasm32"))]
fn run_field() {
    use dossier::field::{FieldConfig, MotionProfile, ParticleField, Recorder};

    let mut field = ParticleField::new(FieldConfig::default(), MotionProfile::Standard, 7);
    field.resize(1920.0, 1080.0, 1.0);
    field.resume(0.0);
    field.set_pointer(960.0, 540.0);

    let mut surface = Recorder::new();
    let mut drawn = 0;
    let mut lines = 0;
    let mut t = 0.0;
    while t < 10_000.0 {
        surface.reset();
        if field.frame(t, &mut surface) {
            drawn += 1;
            lines += surface.lines();
        }
        t += 1000.0 / 60.0;
    }

    log::info!(
        "Field: {} particles, {} frames drawn, {:.0} links/frame, {} comets, {} shards, glow {:.2}",
        field.particles().len(),
        drawn,
        lines as f64 / drawn.max(1) as f64,
        field.comets().len(),
        field.shards().len(),
        field.glow_level()
    );
}

/// A short scripted browse through four panels
#[cfg(not(target_arch = "wasm32"))]
fn run_nav() {
    use dossier::nav::{NavConfig, NavController};

    let mut nav = NavController::with_cover(NavConfig::default(), 4);
    nav.open(0.0);
    nav.advance(350.0);
    nav.handle_key("ArrowRight", 400.0);
    nav.advance(750.0);
    for t in [800.0, 820.0, 840.0] {
        nav.on_wheel(0.0, 30.0, t);
    }
    nav.advance(2000.0);
    nav.on_touch_start(300.0, 200.0);
    nav.on_touch_move(260.0, 202.0);
    nav.on_touch_end(220.0, 202.0, 2100.0);
    nav.advance(3000.0);

    let effects = nav.take_effects();
    log::info!(
        "Nav: page {} after {} effects, idle: {}",
        nav.ui().readout(),
        effects.len(),
        !nav.is_animating()
    );
}
