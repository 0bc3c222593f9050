//! Half-open windows of absolute time.

use chrono::{DateTime, Utc};

/// The interval `[start, end)` between two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Inclusive start.
    pub start: DateTime<Utc>,
    /// Exclusive end.
    pub end: DateTime<Utc>,
}

impl Window {
    /// Creates a window. An `end` at or before `start` makes it empty.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// True when the window covers no time.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The overlap with `other`, or `None` if they do not overlap.
    pub fn clip(&self, other: &Window) -> Option<Window> {
        let clipped = Window::new(self.start.max(other.start), self.end.min(other.end));
        (!clipped.is_empty()).then_some(clipped)
    }

    /// Whole seconds covered, zero for an empty window.
    pub fn seconds(&self) -> i64 {
        (self.end - self.start).num_seconds().max(0)
    }
}

/// Total whole seconds covered by `windows`, counting overlapping time once.
pub fn covered_seconds(mut windows: Vec<Window>) -> i64 {
    windows.retain(|w| !w.is_empty());
    windows.sort_by_key(|w| w.start);

    let mut total = 0;
    let mut current: Option<Window> = None;
    for window in windows {
        current = match current {
            Some(open) if window.start <= open.end => {
                Some(Window::new(open.start, open.end.max(window.end)))
            }
            Some(open) => {
                total += open.seconds();
                Some(window)
            }
            None => Some(window),
        };
    }
    total + current.map(|w| w.seconds()).unwrap_or(0)
}

/// Truncates a duration in seconds to whole minutes; negatives become zero.
pub fn whole_minutes(seconds: i64) -> i64 {
    seconds.max(0) / 60
}
