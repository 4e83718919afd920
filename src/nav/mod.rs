//! Paged panel navigation
//!
//! Pure state machine: inputs carry their own timestamps, timed follow-ups
//! live in a [`Timeline`], and presentation changes come out as ordered
//! [`NavEffect`]s for whatever host renders the panels.

pub mod config;
pub mod gesture;
mod input;
pub mod panel;
pub mod state;
pub mod timeline;

pub use config::{NavConfig, TransitionStyle};
pub use gesture::{SwipeTracker, WheelGesture};
pub use panel::{InlineStyle, Leaf, NavEffect, PanelView, TransitionHint, UiState, ViewMode};
pub use state::{Direction, NavController, NavPhase};
pub use timeline::{Step, Timeline};
