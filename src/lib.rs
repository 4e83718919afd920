//! Dossier - animated case-file portfolio front-end
//!
//! Core modules:
//! - `field`: Particle field simulator (canvas background)
//! - `nav`: Paged panel navigation with wheel/touch/keyboard input
//! - `prefs`: Persisted display mode and theme
//! - `platform`: Browser wiring (wasm only)

pub mod field;
pub mod nav;
pub mod prefs;

#[cfg(target_arch = "wasm32")]
pub mod platform;

pub use field::{FieldConfig, MotionProfile, ParticleField};
pub use nav::{NavConfig, NavController, TransitionStyle};
pub use prefs::{DisplayMode, Preferences};
