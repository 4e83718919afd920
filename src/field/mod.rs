//! Particle field simulator
//!
//! The animated background: a pool of drifting particles linked by faint
//! lines, attracted to the pointer, with occasional comets and shards.
//! Everything here is pure and runs headless:
//! - Seeded RNG only
//! - Time is passed in explicitly (milliseconds)
//! - Drawing goes through the `Surface` trait

pub mod color;
pub mod config;
mod draw;
pub mod effects;
pub mod frame;
pub mod glow;
pub mod particle;
pub mod state;
pub mod surface;
mod tick;

pub use color::{Rgb, Rgba, parse_css_color};
pub use config::{FieldConfig, MotionProfile};
pub use effects::{Comet, Shard, Trail};
pub use frame::FrameLimiter;
pub use glow::GlowGate;
pub use particle::Particle;
pub use state::{ParticleField, Pointer, RunState};
pub use surface::{DrawOp, Recorder, Surface};
