//! Pointer glow suppression handle
//!
//! Overlapping translucent panels hold a clone and flip it while the pointer
//! is over them; the field reads it when easing the glow.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct GlowGate {
    suppressed: Rc<Cell<bool>>,
}

impl GlowGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suppress(&self) {
        self.suppressed.set(true);
    }

    pub fn release(&self) {
        self.suppressed.set(false);
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let gate = GlowGate::new();
        let panel_handle = gate.clone();
        panel_handle.suppress();
        assert!(gate.is_suppressed());
        panel_handle.release();
        assert!(!gate.is_suppressed());
    }
}
