//! Keyboard, wheel and touch input for the navigation controller

use glam::Vec2;

use super::gesture::WheelGesture;
use super::panel::{InlineStyle, TransitionHint, ViewMode};
use super::state::{NavController, NavEvent};

impl NavController {
    /// Arrow keys page through the panels; returns whether the key was used
    pub fn handle_key(&mut self, key: &str, now: f64) -> bool {
        if self.view != ViewMode::Panels {
            return false;
        }
        match key {
            "ArrowRight" | "ArrowDown" => self.next(now),
            "ArrowLeft" | "ArrowUp" => self.prev(now),
            _ => false,
        }
    }

    /// Feed one wheel event. Returns true when the event belongs to the
    /// panel view and the page should not scroll.
    pub fn on_wheel(&mut self, dx: f32, dy: f32, now: f64) -> bool {
        if self.view != ViewMode::Panels {
            return false;
        }
        if self.is_animating() || self.wheel.locked {
            self.wheel.accum = 0.0;
            self.timeline.cancel_where(|e| matches!(e, NavEvent::WheelSettle));
            return true;
        }

        let delta = WheelGesture::dominant_delta(dx, dy);
        let accum = self.wheel.accumulate(delta, self.cfg.wheel_max_accum);
        if self.cfg.drag_feedback {
            self.drag(accum, self.cfg.wheel_threshold);
        }

        self.timeline.cancel_where(|e| matches!(e, NavEvent::WheelSettle));
        self.timeline
            .schedule(now + self.cfg.wheel_debounce_ms, NavEvent::WheelSettle);
        true
    }

    /// Debounce elapsed: commit or snap back
    pub(super) fn settle_wheel(&mut self, at: f64) {
        let accum = self.wheel.take();
        if self.is_animating() || self.view != ViewMode::Panels {
            return;
        }
        if accum.abs() < self.cfg.wheel_threshold {
            self.snap_back(at);
            return;
        }

        let step = if accum > 0.0 { 1 } else { -1 };
        if !self.go_by(step, at) {
            self.snap_back(at);
        }
        log::debug!("Wheel gesture {:.0} settled, locking input", accum);
        self.wheel.locked = true;
        self.timeline
            .schedule(at + self.cfg.wheel_lock_ms(), NavEvent::WheelUnlock);
    }

    pub fn on_touch_start(&mut self, x: f32, y: f32) {
        if self.view != ViewMode::Panels || self.is_animating() {
            return;
        }
        self.swipe.begin(Vec2::new(x, y));
    }

    /// Returns true once the touch is a horizontal swipe, so native
    /// scrolling should be suppressed
    pub fn on_touch_move(&mut self, x: f32, y: f32) -> bool {
        if self.view != ViewMode::Panels || self.is_animating() {
            return false;
        }
        let tracked = self.swipe.track(
            Vec2::new(x, y),
            self.cfg.swipe_lock_px,
            self.cfg.swipe_dominance,
        );
        match tracked {
            Some(delta) => {
                if self.cfg.drag_feedback {
                    // Swiping left reveals the next panel
                    self.drag(-delta.x, self.cfg.swipe_threshold_px);
                }
                true
            }
            None => false,
        }
    }

    /// Returns whether the swipe committed a page change
    pub fn on_touch_end(&mut self, x: f32, y: f32, now: f64) -> bool {
        let Some(dx) = self.swipe.finish(Vec2::new(x, y)) else {
            return false;
        };
        if self.view != ViewMode::Panels || self.is_animating() {
            return false;
        }
        if dx.abs() >= self.cfg.swipe_threshold_px {
            let step = if dx < 0.0 { 1 } else { -1 };
            if self.go_by(step, now) {
                return true;
            }
        }
        self.snap_back(now);
        false
    }

    /// Live gesture feedback. `amount` is signed travel toward the next
    /// panel; `full` is the travel at which the drag is fully developed.
    fn drag(&mut self, amount: f32, full: f32) {
        if self.panels.is_empty() {
            return;
        }
        if amount == 0.0 {
            self.clear_drag();
            return;
        }
        let sign = amount.signum();
        let progress = (amount.abs() / full).min(1.0);
        let offset = self.cfg.slide_offset;
        let current = self.current;

        self.panels[current].style = InlineStyle::offset(
            -sign * offset * progress,
            1.0 - 0.5 * progress,
            TransitionHint::Disabled,
        );
        self.emit(current);

        let peek = current
            .checked_add_signed(sign as isize)
            .filter(|&i| i < self.panels.len());
        for i in 0..self.panels.len() {
            if self.panels[i].peek && Some(i) != peek {
                self.panels[i].peek = false;
                self.panels[i].style = InlineStyle::default();
                self.emit(i);
            }
        }
        if let Some(i) = peek {
            self.panels[i].peek = true;
            self.panels[i].style = InlineStyle::offset(
                sign * offset * (1.0 - progress),
                0.5 * progress,
                TransitionHint::Disabled,
            );
            self.emit(i);
        }
    }

    /// Ease dragged panels back to rest
    fn snap_back(&mut self, at: f64) {
        let snap = InlineStyle {
            transition: TransitionHint::Snap {
                ms: self.cfg.snap_ms,
            },
            ..Default::default()
        };
        let mut moved = false;
        for i in 0..self.panels.len() {
            let p = &mut self.panels[i];
            if p.peek || !p.style.is_at_rest() {
                p.peek = false;
                p.style = snap;
                self.emit(i);
                moved = true;
            }
        }
        if moved {
            self.timeline.cancel_where(|e| matches!(e, NavEvent::SnapDone));
            self.timeline
                .schedule(at + self.cfg.snap_ms, NavEvent::SnapDone);
        }
    }

    /// Drop drag overrides before a committed transition takes over
    pub(super) fn clear_drag(&mut self) {
        self.timeline.cancel_where(|e| matches!(e, NavEvent::SnapDone));
        for i in 0..self.panels.len() {
            let p = &mut self.panels[i];
            if p.peek || !p.style.is_clear() {
                p.peek = false;
                p.style = InlineStyle::default();
                self.emit(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::config::NavConfig;
    use super::super::panel::NavEffect;
    use super::*;

    fn nav(count: usize) -> NavController {
        let mut nav = NavController::new(NavConfig::default(), count);
        nav.take_effects();
        nav
    }

    #[test]
    fn test_keys() {
        let mut nav = nav(3);
        assert!(nav.handle_key("ArrowRight", 0.0));
        assert_eq!(nav.current(), 1);
        assert!(!nav.handle_key("ArrowLeft", 100.0));
        nav.advance(350.0);
        assert!(nav.handle_key("ArrowUp", 400.0));
        assert_eq!(nav.current(), 0);
        assert!(!nav.handle_key("Enter", 1000.0));
    }

    #[test]
    fn test_key_past_guard_needs_catch_up() {
        let mut nav = nav(3);
        assert!(nav.handle_key("ArrowRight", 0.0));
        // Release is due but has not fired yet
        assert!(!nav.handle_key("ArrowRight", 400.0));
        assert_eq!(nav.current(), 1);

        nav.advance(400.0);
        assert!(nav.handle_key("ArrowRight", 400.0));
        assert_eq!(nav.current(), 2);
    }

    #[test]
    fn test_keys_ignored_on_cover() {
        let mut nav = NavController::with_cover(NavConfig::default(), 3);
        assert!(!nav.handle_key("ArrowRight", 0.0));
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn test_wheel_and_touch_ignored_behind_cover() {
        let mut nav = NavController::with_cover(NavConfig::default(), 3);
        nav.take_effects();

        let swipe = |nav: &mut NavController, now: f64| {
            nav.on_touch_start(300.0, 200.0);
            assert!(!nav.on_touch_move(200.0, 202.0));
            nav.on_touch_end(150.0, 202.0, now)
        };

        assert!(!nav.on_wheel(0.0, 120.0, 0.0));
        assert_eq!(nav.wheel_accum(), 0.0);
        assert_eq!(nav.next_deadline(), None);
        assert!(!swipe(&mut nav, 10.0));
        assert_eq!(nav.current(), 0);
        assert!(nav.take_effects().is_empty());

        assert!(nav.open(100.0));
        nav.take_effects();
        assert!(!nav.on_wheel(0.0, 120.0, 150.0));
        assert_eq!(nav.wheel_accum(), 0.0);
        // Only the cover exit is pending
        assert_eq!(nav.next_deadline(), Some(450.0));
        assert!(!swipe(&mut nav, 160.0));
        assert_eq!(nav.current(), 0);
        assert!(nav.take_effects().is_empty());
        assert_eq!(nav.advance(449.0), 0);
        assert_eq!(nav.advance(450.0), 1);
        assert_eq!(nav.view(), ViewMode::Panels);
    }

    #[test]
    fn test_wheel_at_threshold_commits_once() {
        let mut nav = nav(4);
        nav.on_wheel(0.0, 30.0, 0.0);
        nav.on_wheel(0.0, 20.0, 40.0);
        // Still inside the debounce window
        nav.advance(139.0);
        assert_eq!(nav.current(), 0);

        nav.advance(140.0);
        assert_eq!(nav.current(), 1);
        assert_eq!(nav.wheel_accum(), 0.0);
        assert!(nav.wheel_locked());

        // Input during the lock is drained
        assert!(nav.on_wheel(0.0, 120.0, 200.0));
        assert_eq!(nav.wheel_accum(), 0.0);
        nav.advance(600.0);
        assert_eq!(nav.current(), 1);

        // duration + cooldown after the commit
        nav.advance(689.0);
        assert!(nav.wheel_locked());
        nav.advance(690.0);
        assert!(!nav.wheel_locked());
    }

    #[test]
    fn test_wheel_below_threshold_snaps_back() {
        let mut nav = nav(4);
        nav.on_wheel(0.0, 25.0, 0.0);
        assert!(nav.panels()[1].peek);
        assert_eq!(nav.panels()[0].style.translate_x, Some(-20.0));
        assert_eq!(nav.panels()[1].style.opacity, Some(0.25));

        nav.advance(100.0);
        assert_eq!(nav.current(), 0);
        assert_eq!(nav.wheel_accum(), 0.0);
        assert!(!nav.wheel_locked());
        assert!(nav.panels().iter().all(|p| !p.peek && p.style.is_at_rest()));
        assert_eq!(
            nav.panels()[0].style.transition,
            TransitionHint::Snap { ms: 180.0 }
        );

        nav.advance(280.0);
        assert!(nav.panels().iter().all(|p| p.style.is_clear()));
    }

    #[test]
    fn test_horizontal_wheel_and_direction() {
        let mut nav = nav(3);
        nav.go_to_page(2, false, 0.0);
        nav.on_wheel(-80.0, 5.0, 0.0);
        assert!(nav.panels()[1].peek);
        nav.advance(100.0);
        assert_eq!(nav.current(), 1);
    }

    #[test]
    fn test_wheel_past_last_panel_snaps_back_and_locks() {
        let mut nav = nav(2);
        nav.go_to_page(1, false, 0.0);
        nav.on_wheel(0.0, 90.0, 0.0);
        // No panel to peek at, but the current one still moves
        assert!(nav.panels().iter().all(|p| !p.peek));
        nav.advance(100.0);
        assert_eq!(nav.current(), 1);
        assert!(nav.wheel_locked());
        assert!(nav.panels()[1].style.is_at_rest());
    }

    #[test]
    fn test_wheel_without_drag_feedback() {
        let cfg = NavConfig {
            drag_feedback: false,
            ..Default::default()
        };
        let mut nav = NavController::new(cfg, 3);
        nav.take_effects();
        nav.on_wheel(0.0, 10.0, 0.0);
        assert!(nav.take_effects().is_empty());
        nav.advance(100.0);
        assert!(nav.take_effects().is_empty());
    }

    #[test]
    fn test_wheel_drained_while_animating() {
        let mut nav = nav(4);
        nav.go_to_page(1, true, 0.0);
        assert!(nav.on_wheel(0.0, 300.0, 10.0));
        assert_eq!(nav.wheel_accum(), 0.0);
        nav.advance(1000.0);
        assert_eq!(nav.current(), 1);
    }

    #[test]
    fn test_commit_clears_drag_before_slide() {
        let mut nav = nav(3);
        nav.on_wheel(0.0, 60.0, 0.0);
        nav.take_effects();
        nav.advance(100.0);
        let effects = nav.take_effects();
        // Peek panel cleared, then the exit offset on the old panel
        let first_exit = effects
            .iter()
            .position(|e| matches!(e, NavEffect::Panel { index: 0, view } if view.style.opacity == Some(0.0)))
            .unwrap();
        let peek_cleared = effects
            .iter()
            .position(|e| matches!(e, NavEffect::Panel { index: 1, view } if !view.peek))
            .unwrap();
        assert!(peek_cleared < first_exit);
    }

    #[test]
    fn test_swipe_left_goes_forward() {
        let mut nav = nav(3);
        nav.on_touch_start(300.0, 200.0);
        assert!(!nav.on_touch_move(296.0, 201.0));
        assert!(nav.on_touch_move(270.0, 205.0));
        assert!(nav.panels()[1].peek);
        assert!(nav.on_touch_end(250.0, 205.0, 0.0));
        assert_eq!(nav.current(), 1);
    }

    #[test]
    fn test_short_swipe_snaps_back() {
        let mut nav = nav(3);
        nav.go_to_page(1, false, 0.0);
        nav.on_touch_start(100.0, 200.0);
        assert!(nav.on_touch_move(125.0, 200.0));
        assert!(nav.panels()[0].peek);
        assert!(!nav.on_touch_end(130.0, 200.0, 0.0));
        assert_eq!(nav.current(), 1);
        assert!(nav.panels().iter().all(|p| !p.peek));
    }

    #[test]
    fn test_vertical_touch_is_ignored() {
        let mut nav = nav(3);
        nav.on_touch_start(100.0, 100.0);
        assert!(!nav.on_touch_move(110.0, 180.0));
        assert!(!nav.on_touch_end(160.0, 300.0, 0.0));
        assert_eq!(nav.current(), 0);
    }
}
