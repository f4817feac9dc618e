//! Which full-height section sits under the middle of the scroll viewport.

use crate::config::ScrollConfig;

/// Vertical extent of a section relative to the scroll container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Scroll container measurements taken on a scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_top: f64,
    pub height: f64,
}

impl Viewport {
    pub fn midpoint(&self) -> f64 {
        self.scroll_top + self.height / 2.0
    }
}

/// First declared section containing the viewport midpoint.
///
/// Overlapping sections resolve to the earliest one; zero-height sections
/// never match.
pub fn section_at(sections: &[SectionBounds], viewport: Viewport) -> Option<usize> {
    let mid = viewport.midpoint();
    sections.iter().position(|s| s.contains(mid))
}

/// Result of feeding a scroll event to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollChange {
    pub section: bool,
    pub hint: bool,
}

impl ScrollChange {
    pub fn any(&self) -> bool {
        self.section || self.hint
    }
}

/// Active section index plus the scroll-hint flag.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionTracker {
    current: usize,
    total: usize,
    scrolled: bool,
    threshold: f64,
}

impl SectionTracker {
    pub fn new(config: &ScrollConfig) -> Self {
        Self {
            current: 0,
            total: config.sections.max(1),
            scrolled: false,
            threshold: config.hint_threshold,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// True once the container has scrolled past the hint threshold.
    pub fn has_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Re-evaluates state for a scroll position. When no section contains
    /// the midpoint the previous index is kept.
    pub fn update(&mut self, sections: &[SectionBounds], viewport: Viewport) -> ScrollChange {
        let mut change = ScrollChange::default();

        let scrolled = viewport.scroll_top > self.threshold;
        if scrolled != self.scrolled {
            self.scrolled = scrolled;
            change.hint = true;
        }

        let tracked = &sections[..sections.len().min(self.total)];
        if let Some(index) = section_at(tracked, viewport) {
            if index != self.current {
                self.current = index;
                change.section = true;
            }
        }
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stacked(n: usize, h: f64) -> Vec<SectionBounds> {
        (0..n)
            .map(|i| SectionBounds {
                top: i as f64 * h,
                height: h,
            })
            .collect()
    }

    #[test]
    fn midpoint_selects_section() {
        let sections = stacked(4, 800.0);
        let at = |scroll_top| section_at(&sections, Viewport { scroll_top, height: 800.0 });
        assert_eq!(at(0.0), Some(0));
        assert_eq!(at(399.0), Some(0));
        assert_eq!(at(400.0), Some(1));
        assert_eq!(at(2400.0), Some(3));
        assert_eq!(at(2800.0), None);
    }

    #[test]
    fn first_match_wins_on_overlap() {
        let sections = [
            SectionBounds { top: 0.0, height: 1000.0 },
            SectionBounds { top: 200.0, height: 300.0 },
        ];
        let vp = Viewport { scroll_top: 0.0, height: 600.0 };
        assert_eq!(section_at(&sections, vp), Some(0));
    }

    #[test]
    fn zero_height_sections_are_skipped() {
        let sections = [
            SectionBounds { top: 300.0, height: 0.0 },
            SectionBounds { top: 0.0, height: 600.0 },
        ];
        let vp = Viewport { scroll_top: 0.0, height: 600.0 };
        assert_eq!(section_at(&sections, vp), Some(1));
    }

    #[test]
    fn tracker_keeps_index_without_match() {
        let sections = stacked(4, 500.0);
        let mut tracker = SectionTracker::new(&ScrollConfig::default());
        let change = tracker.update(&sections, Viewport { scroll_top: 1000.0, height: 500.0 });
        assert!(change.section && change.hint);
        assert_eq!(tracker.current(), 2);

        let change = tracker.update(&sections, Viewport { scroll_top: 5000.0, height: 500.0 });
        assert!(!change.any());
        assert_eq!(tracker.current(), 2);
    }

    #[test]
    fn hint_flips_at_threshold() {
        let sections = stacked(4, 500.0);
        let mut tracker = SectionTracker::new(&ScrollConfig::default());
        let vp = |scroll_top| Viewport { scroll_top, height: 500.0 };

        assert!(!tracker.update(&sections, vp(10.0)).hint);
        assert!(!tracker.has_scrolled());
        assert!(tracker.update(&sections, vp(10.5)).hint);
        assert!(tracker.has_scrolled());
        assert!(tracker.update(&sections, vp(3.0)).hint);
        assert!(!tracker.has_scrolled());
    }

    #[test]
    fn extra_sections_are_ignored() {
        let sections = stacked(6, 100.0);
        let mut tracker = SectionTracker::new(&ScrollConfig::default());
        tracker.update(&sections, Viewport { scroll_top: 450.0, height: 100.0 });
        assert_eq!(tracker.current(), 0);
        assert!(tracker.current() < tracker.total());
    }
}
