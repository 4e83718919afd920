//! Ordered list of timed steps
//!
//! Replaces chains of one-shot timers: callers schedule `(time, event)` pairs
//! and a single driver pops whatever is due. Steps due at the same instant
//! fire in the order they were scheduled.

/// A scheduled event
#[derive(Debug, Clone, PartialEq)]
pub struct Step<E> {
    pub at: f64,
    seq: u64,
    pub event: E,
}

#[derive(Debug, Clone)]
pub struct Timeline<E> {
    steps: Vec<Step<E>>,
    next_seq: u64,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Timeline<E> {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn schedule(&mut self, at: f64, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.steps.push(Step { at, seq, event });
    }

    /// Drop every pending step matching `pred`; returns how many were dropped
    pub fn cancel_where(&mut self, pred: impl Fn(&E) -> bool) -> usize {
        let before = self.steps.len();
        self.steps.retain(|s| !pred(&s.event));
        before - self.steps.len()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<f64> {
        self.steps.iter().map(|s| s.at).min_by(|a, b| a.total_cmp(b))
    }

    /// Remove and return the earliest step due at or before `now`
    pub fn pop_due(&mut self, now: f64) -> Option<Step<E>> {
        let idx = self
            .steps
            .iter()
            .enumerate()
            .filter(|(_, s)| s.at <= now)
            .min_by(|(_, a), (_, b)| a.at.total_cmp(&b.at).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)?;
        Some(self.steps.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_time_then_schedule_order() {
        let mut t = Timeline::new();
        t.schedule(30.0, "c");
        t.schedule(10.0, "a");
        t.schedule(10.0, "b");
        assert_eq!(t.next_deadline(), Some(10.0));
        assert!(t.pop_due(5.0).is_none());

        let order: Vec<_> = std::iter::from_fn(|| t.pop_due(100.0)).map(|s| s.event).collect();
        assert_eq!(order, ["a", "b", "c"]);
        assert!(t.is_empty());
    }

    #[test]
    fn test_cancel_where() {
        let mut t = Timeline::new();
        t.schedule(1.0, 1);
        t.schedule(2.0, 2);
        t.schedule(3.0, 1);
        assert_eq!(t.cancel_where(|e| *e == 1), 2);
        assert_eq!(t.len(), 1);
        assert_eq!(t.pop_due(10.0).map(|s| s.event), Some(2));
    }
}
