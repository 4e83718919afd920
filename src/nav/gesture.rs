//! Gesture bookkeeping for wheel and touch paging

use glam::Vec2;

/// Running sum of unconsumed wheel input
#[derive(Debug, Clone, Default)]
pub struct WheelGesture {
    pub accum: f32,
    /// Cooldown after a committed gesture; input is drained while set
    pub locked: bool,
}

impl WheelGesture {
    /// Dominant axis: whichever delta has the larger magnitude
    pub fn dominant_delta(dx: f32, dy: f32) -> f32 {
        if dx.abs() > dy.abs() { dx } else { dy }
    }

    /// Add a delta, clamped to `±max`; returns the new accumulator
    pub fn accumulate(&mut self, delta: f32, max: f32) -> f32 {
        self.accum = (self.accum + delta).clamp(-max, max);
        self.accum
    }

    /// Take the accumulator, leaving zero behind
    pub fn take(&mut self) -> f32 {
        std::mem::take(&mut self.accum)
    }
}

/// Touch swipe tracker; only the first touch point is followed
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    pub start: Option<Vec2>,
    pub swiping: bool,
}

impl SwipeTracker {
    pub fn begin(&mut self, at: Vec2) {
        self.start = Some(at);
        self.swiping = false;
    }

    /// Update with the current touch position; returns the displacement once
    /// the motion has locked in as a horizontal swipe.
    pub fn track(&mut self, at: Vec2, lock_px: f32, dominance: f32) -> Option<Vec2> {
        let delta = at - self.start?;
        if !self.swiping && delta.x.abs() > lock_px && delta.x.abs() > delta.y.abs() * dominance {
            self.swiping = true;
        }
        self.swiping.then_some(delta)
    }

    /// Finish the touch; returns horizontal travel if it was a swipe
    pub fn finish(&mut self, at: Vec2) -> Option<f32> {
        let start = self.start.take()?;
        let was_swiping = std::mem::replace(&mut self.swiping, false);
        was_swiping.then_some(at.x - start.x)
    }

    pub fn reset(&mut self) {
        self.start = None;
        self.swiping = false;
    }
}
