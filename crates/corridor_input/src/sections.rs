//! Tab-style section navigation
//!
//! Sections are named stops along the corridor expressed as travel progress.
//! Selecting a tab yields the progress to scroll to; scrolling by hand
//! updates which tab is active.

/// Progress slack when matching stops
const EPSILON: f32 = 1e-3;

/// A named stop along the corridor
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub title: String,
    /// Travel progress in `[0, 1]`
    pub progress: f32,
}

impl Section {
    pub fn new(title: impl Into<String>, progress: f32) -> Self {
        Self {
            title: title.into(),
            progress: progress.clamp(0.0, 1.0),
        }
    }
}

/// Active-section tracking for a fixed set of stops
#[derive(Clone, Debug, Default)]
pub struct SectionNav {
    sections: Vec<Section>,
    active: usize,
}

impl SectionNav {
    /// Build from stops in any order; they are sorted by progress
    pub fn new(sections: impl IntoIterator<Item = Section>) -> Self {
        let mut sections: Vec<Section> = sections
            .into_iter()
            .filter(|s| s.progress.is_finite())
            .map(|s| Section::new(s.title, s.progress))
            .collect();
        sections.sort_by(|a, b| a.progress.total_cmp(&b.progress));
        Self { sections, active: 0 }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        (!self.sections.is_empty()).then_some(self.active)
    }

    pub fn active(&self) -> Option<&Section> {
        self.sections.get(self.active)
    }

    /// Make section `index` active and return it
    pub fn select(&mut self, index: usize) -> Option<&Section> {
        if index < self.sections.len() {
            self.active = index;
        }
        self.sections.get(index)
    }

    /// Advance to the following section (stays on the last one)
    pub fn next(&mut self) -> Option<&Section> {
        let index = (self.active + 1).min(self.sections.len().saturating_sub(1));
        self.select(index)
    }

    /// Go back to the preceding section (stays on the first one)
    pub fn prev(&mut self) -> Option<&Section> {
        self.select(self.active.saturating_sub(1))
    }

    pub fn first(&mut self) -> Option<&Section> {
        self.select(0)
    }

    pub fn last(&mut self) -> Option<&Section> {
        self.select(self.sections.len().saturating_sub(1))
    }

    /// Index of the last stop at or before `progress`
    pub fn index_for(&self, progress: f32) -> Option<usize> {
        if self.sections.is_empty() {
            return None;
        }
        let reached = self
            .sections
            .iter()
            .take_while(|s| s.progress <= progress + EPSILON)
            .count();
        Some(reached.saturating_sub(1))
    }

    /// Update the active section from scroll progress; true if it changed
    ///
    /// When several sections share the reached stop, the active one is kept.
    pub fn follow(&mut self, progress: f32) -> bool {
        match self.index_for(progress) {
            Some(index) if index != self.active && !self.same_stop(index, self.active) => {
                self.active = index;
                true
            }
            _ => false,
        }
    }

    fn same_stop(&self, a: usize, b: usize) -> bool {
        match (self.sections.get(a), self.sections.get(b)) {
            (Some(a), Some(b)) => (a.progress - b.progress).abs() <= EPSILON,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav() -> SectionNav {
        SectionNav::new([
            Section::new("Contact", 1.0),
            Section::new("About", 0.0),
            Section::new("Projects", 0.5),
        ])
    }

    #[test]
    fn test_sorted_by_progress() {
        let binding = nav();
        let titles: Vec<&str> = binding.sections().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["About", "Projects", "Contact"]);
    }

    #[test]
    fn test_next_prev_saturate() {
        let mut n = nav();
        assert_eq!(n.prev().unwrap().title, "About");
        assert_eq!(n.next().unwrap().title, "Projects");
        assert_eq!(n.next().unwrap().title, "Contact");
        assert_eq!(n.next().unwrap().title, "Contact");
    }

    #[test]
    fn test_select_out_of_range_keeps_active() {
        let mut n = nav();
        n.select(1);
        assert!(n.select(7).is_none());
        assert_eq!(n.active_index(), Some(1));
    }

    #[test]
    fn test_follow_progress() {
        let mut n = nav();
        assert!(!n.follow(0.2));
        assert!(n.follow(0.6));
        assert_eq!(n.active().unwrap().title, "Projects");
        assert!(n.follow(0.9995));
        assert_eq!(n.active().unwrap().title, "Contact");
    }

    #[test]
    fn test_empty_nav() {
        let mut n = SectionNav::default();
        assert!(n.next().is_none());
        assert!(n.active_index().is_none());
        assert!(!n.follow(0.5));
    }

    #[test]
    fn test_progress_is_clamped() {
        let n = SectionNav::new([Section::new("Far", 3.0)]);
        assert_eq!(n.sections()[0].progress, 1.0);
    }

    #[test]
    fn test_shared_stop_keeps_selection() {
        let mut n = SectionNav::new([
            Section::new("About", 0.0),
            Section::new("Work", 0.5),
            Section::new("Talks", 0.5),
            Section::new("Contact", 1.0),
        ]);

        assert_eq!(n.next().unwrap().title, "Work");
        assert!(!n.follow(0.5));
        assert_eq!(n.active().unwrap().title, "Work");

        assert_eq!(n.next().unwrap().title, "Talks");
        assert!(!n.follow(0.5));
        assert_eq!(n.active().unwrap().title, "Talks");

        // Arriving from elsewhere lands on the last section at that stop
        n.first();
        assert!(n.follow(0.5));
        assert_eq!(n.active().unwrap().title, "Talks");
    }
}
