//! Panel presentation state
//!
//! The controller never touches the DOM. It keeps a `PanelView` per panel
//! and emits `NavEffect`s in the exact order an adapter must apply them.

/// Which side of the book a page rests on (flip mode only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leaf {
    /// Already turned, stacked on the left
    Turned,
    /// Not yet reached, stacked on the right
    Upcoming,
}

impl Leaf {
    pub fn class_name(&self) -> &'static str {
        match self {
            Leaf::Turned => "turned",
            Leaf::Upcoming => "upcoming",
        }
    }
}

/// Inline transition override
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TransitionHint {
    /// Use the stylesheet transition
    #[default]
    Inherit,
    /// Jump without animating (`transition: none`)
    Disabled,
    /// Short eased return after an abandoned drag
    Snap { ms: f64 },
}

/// Inline style overrides layered over the stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InlineStyle {
    pub translate_x: Option<f32>,
    pub opacity: Option<f32>,
    pub transition: TransitionHint,
}

impl InlineStyle {
    pub fn offset(translate_x: f32, opacity: f32, transition: TransitionHint) -> Self {
        Self {
            translate_x: Some(translate_x),
            opacity: Some(opacity),
            transition,
        }
    }

    /// True when no transform or opacity override remains
    pub fn is_at_rest(&self) -> bool {
        self.translate_x.is_none() && self.opacity.is_none()
    }

    /// True when nothing at all is overridden
    pub fn is_clear(&self) -> bool {
        *self == InlineStyle::default()
    }
}

/// Presentation state of a single panel
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelView {
    pub active: bool,
    pub leaf: Option<Leaf>,
    /// Mid page-turn (flip mode)
    pub flipping: bool,
    /// Shown beside the current panel during a live drag
    pub peek: bool,
    pub style: InlineStyle,
}

impl PanelView {
    /// Resting active panel with no overrides
    pub fn is_resting_active(&self) -> bool {
        self.active && !self.flipping && !self.peek && self.style.is_clear()
    }
}

/// Whether the cover or the panel view is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Cover,
    /// Cover exit animation running
    Opening,
    Panels,
    /// Panels hidden, cover about to return
    Closing,
}

/// Secondary UI derived from the current index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiState {
    pub active: usize,
    pub count: usize,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

impl UiState {
    pub fn for_index(active: usize, count: usize) -> Self {
        Self {
            active,
            count,
            prev_disabled: active == 0,
            next_disabled: active + 1 >= count,
        }
    }

    /// Dots and nav links share the same highlighting rule
    pub fn is_marker_active(&self, index: usize) -> bool {
        index == self.active
    }

    /// "X / N" page readout
    pub fn readout(&self) -> String {
        format!("{} / {}", self.active + 1, self.count)
    }
}

/// Ordered presentation changes for the adapter
#[derive(Debug, Clone, PartialEq)]
pub enum NavEffect {
    /// Apply this snapshot to panel `index`
    Panel { index: usize, view: PanelView },
    /// Force a synchronous layout read on panel `index` so the next style
    /// change animates from the state applied just before
    Reflow { index: usize },
    Ui(UiState),
    View(ViewMode),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_bounds() {
        let first = UiState::for_index(0, 4);
        assert!(first.prev_disabled && !first.next_disabled);
        let last = UiState::for_index(3, 4);
        assert!(!last.prev_disabled && last.next_disabled);
        assert_eq!(last.readout(), "4 / 4");
        assert!(last.is_marker_active(3) && !last.is_marker_active(0));
    }

    #[test]
    fn test_style_rest() {
        let snap = InlineStyle {
            transition: TransitionHint::Snap { ms: 180.0 },
            ..Default::default()
        };
        assert!(snap.is_at_rest());
        assert!(!snap.is_clear());
        assert!(!InlineStyle::offset(40.0, 0.0, TransitionHint::Disabled).is_at_rest());
    }
}
