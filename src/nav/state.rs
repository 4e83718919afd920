//! Panel navigation controller
//!
//! Owns the cursor over a fixed set of panels and drives animated page
//! changes. At most one transition is in flight; the index and the secondary
//! UI move to the target the instant a transition starts.

use super::config::{NavConfig, TransitionStyle};
use super::gesture::{SwipeTracker, WheelGesture};
use super::panel::{InlineStyle, Leaf, NavEffect, PanelView, TransitionHint, UiState, ViewMode};
use super::timeline::Timeline;

/// Travel direction of a page change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn between(from: usize, to: usize) -> Self {
        if to > from {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    pub fn sign(&self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    Idle(usize),
    Transitioning {
        from: usize,
        to: usize,
        direction: Direction,
    },
}

/// Timed steps the controller schedules for itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum NavEvent {
    /// Slide: the exiting panel finished moving out
    ExitDone { panel: usize },
    /// Flip: a page starts turning toward `leaf`
    FlipStart { panel: usize, leaf: Option<Leaf> },
    FlipDone { panel: usize },
    /// Clear the in-flight guard
    Release,
    /// Wheel debounce elapsed
    WheelSettle,
    WheelUnlock,
    /// Snap-back easing finished
    SnapDone,
    /// Cover exit finished
    Enter,
    /// Panels faded out; bring the cover back
    CoverReturn,
}

pub struct NavController {
    pub(super) cfg: NavConfig,
    pub(super) panels: Vec<PanelView>,
    pub(super) current: usize,
    pub(super) phase: NavPhase,
    pub(super) view: ViewMode,
    pub(super) timeline: Timeline<NavEvent>,
    pub(super) effects: Vec<NavEffect>,
    pub(super) wheel: WheelGesture,
    pub(super) swipe: SwipeTracker,
    pub(super) ui: UiState,
}

impl NavController {
    /// Controller over `count` panels, showing panel 0 in the panel view
    pub fn new(cfg: NavConfig, count: usize) -> Self {
        let mut nav = Self {
            cfg,
            panels: vec![PanelView::default(); count],
            current: 0,
            phase: NavPhase::Idle(0),
            view: ViewMode::Panels,
            timeline: Timeline::new(),
            effects: Vec::new(),
            wheel: WheelGesture::default(),
            swipe: SwipeTracker::default(),
            ui: UiState::for_index(0, count),
        };
        if count > 0 {
            nav.place(0);
        }
        nav
    }

    /// Same as `new`, but starting behind the cover
    pub fn with_cover(cfg: NavConfig, count: usize) -> Self {
        let mut nav = Self::new(cfg, count);
        nav.view = ViewMode::Cover;
        nav.effects.push(NavEffect::View(ViewMode::Cover));
        nav
    }

    /// Move to `target`. Out-of-range, redundant and re-entrant animated
    /// requests are ignored; returns whether anything changed.
    pub fn go_to_page(&mut self, target: usize, animate: bool, now: f64) -> bool {
        if target >= self.panels.len() {
            log::debug!("Ignoring page {} (have {})", target, self.panels.len());
            return false;
        }
        if animate && target == self.current {
            return false;
        }
        if animate && self.is_animating() {
            log::debug!("Ignoring page {} while a transition is in flight", target);
            return false;
        }

        if !animate {
            self.timeline.cancel_where(|e| {
                matches!(
                    e,
                    NavEvent::ExitDone { .. } | NavEvent::FlipStart { .. } | NavEvent::FlipDone { .. }
                )
            });
            self.place(target);
            return true;
        }

        self.clear_drag();
        log::info!("Page {} -> {}", self.current + 1, target + 1);
        match self.cfg.style {
            TransitionStyle::Slide => self.slide(target, now),
            TransitionStyle::Flip => self.flip(target, now),
        }
        true
    }

    /// Relative move; negative targets are ignored like any out-of-range page
    pub fn go_by(&mut self, delta: isize, now: f64) -> bool {
        match self.current.checked_add_signed(delta) {
            Some(target) => self.go_to_page(target, true, now),
            None => false,
        }
    }

    pub fn next(&mut self, now: f64) -> bool {
        self.go_by(1, now)
    }

    pub fn prev(&mut self, now: f64) -> bool {
        self.go_by(-1, now)
    }

    /// Leave the cover; the panel view appears at page 0 after the exit delay
    pub fn open(&mut self, now: f64) -> bool {
        if self.view != ViewMode::Cover {
            return false;
        }
        self.view = ViewMode::Opening;
        self.effects.push(NavEffect::View(ViewMode::Opening));
        self.timeline.schedule(now + self.cfg.cover_exit_ms, NavEvent::Enter);
        true
    }

    /// Back to the cover: the panels hide now and the cover returns after
    /// `cover_return_ms`. Panel state is left as is.
    pub fn close(&mut self, now: f64) -> bool {
        if matches!(self.view, ViewMode::Cover | ViewMode::Closing) {
            return false;
        }
        self.timeline
            .cancel_where(|e| matches!(e, NavEvent::Enter | NavEvent::WheelSettle));
        self.wheel.accum = 0.0;
        self.swipe.reset();
        self.view = ViewMode::Closing;
        self.effects.push(NavEffect::View(ViewMode::Closing));
        self.timeline
            .schedule(now + self.cfg.cover_return_ms, NavEvent::CoverReturn);
        true
    }

    /// Fire every step due at or before `now`; returns how many fired
    pub fn advance(&mut self, now: f64) -> usize {
        let mut fired = 0;
        while let Some(step) = self.timeline.pop_due(now) {
            self.fire(step.at, step.event);
            fired += 1;
        }
        fired
    }

    /// When the adapter should call `advance` next
    pub fn next_deadline(&self) -> Option<f64> {
        self.timeline.next_deadline()
    }

    /// Drain pending presentation effects in application order
    pub fn take_effects(&mut self) -> Vec<NavEffect> {
        std::mem::take(&mut self.effects)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn phase(&self) -> NavPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, NavPhase::Transitioning { .. })
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn ui(&self) -> UiState {
        self.ui
    }

    pub fn panels(&self) -> &[PanelView] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn config(&self) -> &NavConfig {
        &self.cfg
    }

    pub fn wheel_accum(&self) -> f32 {
        self.wheel.accum
    }

    pub fn wheel_locked(&self) -> bool {
        self.wheel.locked
    }

    /// Instant layout: exactly one active panel, no overrides
    fn place(&mut self, target: usize) {
        let flip = self.cfg.style == TransitionStyle::Flip;
        for (i, p) in self.panels.iter_mut().enumerate() {
            *p = PanelView {
                active: i == target,
                leaf: match flip {
                    true if i < target => Some(Leaf::Turned),
                    true if i > target => Some(Leaf::Upcoming),
                    _ => None,
                },
                ..Default::default()
            };
        }
        for i in 0..self.panels.len() {
            self.emit(i);
        }
        self.commit_index(target);
    }

    fn slide(&mut self, target: usize, now: f64) {
        let from = self.current;
        let direction = Direction::between(from, target);
        let offset = self.cfg.slide_offset * direction.sign();
        let done_at = now + self.cfg.duration_ms;
        self.phase = NavPhase::Transitioning {
            from,
            to: target,
            direction,
        };

        self.panels[from].style = InlineStyle::offset(-offset, 0.0, TransitionHint::Inherit);
        self.emit(from);
        self.timeline.schedule(done_at, NavEvent::ExitDone { panel: from });

        // Park the entering panel on the far side without animating, force a
        // layout read, then release it so the move to rest is animated.
        let entering = &mut self.panels[target];
        entering.active = true;
        entering.style = InlineStyle::offset(offset, 0.0, TransitionHint::Disabled);
        self.emit(target);
        self.effects.push(NavEffect::Reflow { index: target });
        self.panels[target].style = InlineStyle::default();
        self.emit(target);

        self.commit_index(target);
        self.timeline.schedule(done_at, NavEvent::Release);
    }

    fn flip(&mut self, target: usize, now: f64) {
        let from = self.current;
        let direction = Direction::between(from, target);
        let steps = from.abs_diff(target);
        let stagger = self.cfg.flip_stagger_ms;
        let duration = self.cfg.duration_ms;
        self.phase = NavPhase::Transitioning {
            from,
            to: target,
            direction,
        };

        self.panels[from].active = false;
        if direction == Direction::Backward {
            self.panels[from].leaf = Some(Leaf::Upcoming);
        }
        self.emit(from);
        self.panels[target].active = true;
        if direction == Direction::Forward {
            self.panels[target].leaf = None;
        }
        self.emit(target);

        for s in 0..steps {
            let (panel, leaf) = match direction {
                Direction::Forward => (from + s, Some(Leaf::Turned)),
                Direction::Backward => {
                    let p = from - 1 - s;
                    (p, if p == target { None } else { Some(Leaf::Upcoming) })
                }
            };
            let start = now + s as f64 * stagger;
            if s == 0 {
                self.fire(now, NavEvent::FlipStart { panel, leaf });
            } else {
                self.timeline.schedule(start, NavEvent::FlipStart { panel, leaf });
            }
            self.timeline.schedule(start + duration, NavEvent::FlipDone { panel });
        }

        self.commit_index(target);
        let release_at = now + (steps.saturating_sub(1)) as f64 * stagger + duration;
        self.timeline.schedule(release_at, NavEvent::Release);
    }

    fn commit_index(&mut self, index: usize) {
        self.current = index;
        self.ui = UiState::for_index(index, self.panels.len());
        self.effects.push(NavEffect::Ui(self.ui));
    }

    pub(super) fn emit(&mut self, index: usize) {
        self.effects.push(NavEffect::Panel {
            index,
            view: self.panels[index],
        });
    }

    fn fire(&mut self, at: f64, event: NavEvent) {
        match event {
            NavEvent::ExitDone { panel } => {
                if panel != self.current {
                    self.panels[panel].active = false;
                }
                self.panels[panel].style = InlineStyle::default();
                self.emit(panel);
            }
            NavEvent::FlipStart { panel, leaf } => {
                let p = &mut self.panels[panel];
                p.flipping = true;
                p.leaf = leaf;
                self.emit(panel);
            }
            NavEvent::FlipDone { panel } => {
                self.panels[panel].flipping = false;
                self.emit(panel);
            }
            NavEvent::Release => {
                self.phase = NavPhase::Idle(self.current);
            }
            NavEvent::WheelSettle => self.settle_wheel(at),
            NavEvent::WheelUnlock => self.wheel.locked = false,
            NavEvent::SnapDone => {
                for i in 0..self.panels.len() {
                    if matches!(self.panels[i].style.transition, TransitionHint::Snap { .. }) {
                        self.panels[i].style.transition = TransitionHint::Inherit;
                        self.emit(i);
                    }
                }
            }
            NavEvent::Enter => {
                self.view = ViewMode::Panels;
                self.effects.push(NavEffect::View(ViewMode::Panels));
                self.go_to_page(0, false, at);
            }
            NavEvent::CoverReturn => {
                self.view = ViewMode::Cover;
                self.effects.push(NavEffect::View(ViewMode::Cover));
            }
        }
    }
}
