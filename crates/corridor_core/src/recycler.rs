//! Windowed segment recycler
//!
//! The corridor is an endless run of fixed-length segments along Z. Only a
//! window of `2 * radius + 1` segments exists at any time, centred on the
//! segment containing the camera. The window is rebuilt from scratch when
//! the camera crosses into a different segment and left untouched otherwise,
//! so scene geometry is never rebuilt while the camera stays inside one
//! segment.
//!
//! The camera is never in an unrendered region as long as the segment length
//! exceeds the per-frame camera travel and the radius is at least 1.

use crate::RecyclerError;

/// Identity of a segment: `floor(coord / segment_length)`
///
/// Used as an opaque key by the scene graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentIndex(pub i64);

impl SegmentIndex {
    /// Index of the segment covering `coord`
    #[inline]
    pub fn containing(coord: f32, segment_length: f32) -> Self {
        SegmentIndex((coord / segment_length).floor() as i64)
    }

    /// Start coordinate of this segment along the travel axis
    #[inline]
    pub fn offset(self, segment_length: f32) -> f32 {
        self.0 as f32 * segment_length
    }
}

/// The set of segments instantiated around one base segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentWindow {
    base: SegmentIndex,
    radius: u32,
    segment_length: f32,
}

impl SegmentWindow {
    /// Window centred on the segment containing `coord`
    pub fn around(coord: f32, segment_length: f32, radius: u32) -> Self {
        Self {
            base: SegmentIndex::containing(coord, segment_length),
            radius,
            segment_length,
        }
    }

    /// Segment containing the camera
    pub fn base(&self) -> SegmentIndex {
        self.base
    }

    /// Start coordinate of the base segment: `floor(c / L) * L`
    pub fn base_offset(&self) -> f32 {
        self.base.offset(self.segment_length)
    }

    pub fn segment_length(&self) -> f32 {
        self.segment_length
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Number of segments in the window (`2 * radius + 1`)
    pub fn len(&self) -> usize {
        2 * self.radius as usize + 1
    }

    /// A window always holds at least one segment
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Segment indices in ascending order
    pub fn indices(&self) -> impl Iterator<Item = SegmentIndex> {
        let r = self.radius as i64;
        let base = self.base.0;
        (base - r..=base + r).map(SegmentIndex)
    }

    /// Segment start offsets in ascending order
    pub fn offsets(&self) -> Vec<f32> {
        self.indices().map(|i| i.offset(self.segment_length)).collect()
    }

    /// Whether `index` is part of this window
    pub fn contains(&self, index: SegmentIndex) -> bool {
        (index.0 - self.base.0).abs() <= self.radius as i64
    }
}

/// Difference between two consecutive windows
#[derive(Clone, Debug, PartialEq)]
pub struct WindowChange {
    /// The window now in effect
    pub window: SegmentWindow,
    /// Segments that entered the window
    pub added: Vec<SegmentIndex>,
    /// Segments that left the window
    pub removed: Vec<SegmentIndex>,
}

impl WindowChange {
    fn between(previous: Option<&SegmentWindow>, next: SegmentWindow) -> Self {
        let added = next
            .indices()
            .filter(|i| previous.map_or(true, |p| !p.contains(*i)))
            .collect();
        let removed = previous
            .map(|p| p.indices().filter(|i| !next.contains(*i)).collect())
            .unwrap_or_default();
        Self { window: next, added, removed }
    }
}

/// Recentres a fixed window of segments around the camera
#[derive(Clone, Debug)]
pub struct SegmentRecycler {
    segment_length: f32,
    radius: u32,
    window: Option<SegmentWindow>,
    recomputations: u64,
}

impl SegmentRecycler {
    /// Default segment length along the travel axis
    pub const DEFAULT_SEGMENT_LENGTH: f32 = 40.0;
    /// Default number of segments on each side of the camera's segment
    pub const DEFAULT_RADIUS: u32 = 2;

    /// Create a recycler; nothing is instantiated until the first update
    pub fn new(segment_length: f32, radius: u32) -> Result<Self, RecyclerError> {
        if !segment_length.is_finite() || segment_length <= 0.0 {
            return Err(RecyclerError::InvalidSegmentLength(segment_length));
        }
        if radius < 1 {
            return Err(RecyclerError::InvalidRadius(radius));
        }
        Ok(Self {
            segment_length,
            radius,
            window: None,
            recomputations: 0,
        })
    }

    pub fn segment_length(&self) -> f32 {
        self.segment_length
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Window for `coord` without touching recycler state
    pub fn window_for(&self, coord: f32) -> SegmentWindow {
        SegmentWindow::around(coord, self.segment_length, self.radius)
    }

    /// Currently instantiated window, `None` before the camera is known
    pub fn current(&self) -> Option<&SegmentWindow> {
        self.window.as_ref()
    }

    /// Number of times the window has been rebuilt
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Feed the camera's axial coordinate for this frame
    ///
    /// Returns the change when the camera entered a different segment.
    /// A missing camera (`None`) or a non-finite coordinate leaves the
    /// current window as it is.
    pub fn update(&mut self, camera_z: Option<f32>) -> Option<WindowChange> {
        let z = camera_z?;
        if !z.is_finite() {
            log::warn!("Ignoring non-finite camera coordinate {} for segment window", z);
            return None;
        }

        let base = SegmentIndex::containing(z, self.segment_length);
        if self.window.map(|w| w.base()) == Some(base) {
            return None;
        }

        let next = self.window_for(z);
        let change = WindowChange::between(self.window.as_ref(), next);
        self.window = Some(next);
        self.recomputations += 1;

        log::debug!(
            "Segment window recentred on {} (+{} / -{})",
            next.base_offset(),
            change.added.len(),
            change.removed.len()
        );
        Some(change)
    }

    /// Update and apply the resulting change to `sink`
    ///
    /// Returns true if the sink was modified.
    pub fn sync<S: crate::SegmentSink>(&mut self, camera_z: Option<f32>, sink: &mut S) -> bool {
        match self.update(camera_z) {
            Some(change) => {
                for index in &change.removed {
                    sink.remove_segment(*index);
                }
                for index in &change.added {
                    sink.insert_segment(*index, index.offset(self.segment_length), self.segment_length);
                }
                true
            }
            None => false,
        }
    }

    /// Drop the current window, returning the segments to remove
    pub fn reset(&mut self) -> Vec<SegmentIndex> {
        self.window
            .take()
            .map(|w| w.indices().collect())
            .unwrap_or_default()
    }
}

impl Default for SegmentRecycler {
    fn default() -> Self {
        Self {
            segment_length: Self::DEFAULT_SEGMENT_LENGTH,
            radius: Self::DEFAULT_RADIUS,
            window: None,
            recomputations: 0,
        }
    }
}
