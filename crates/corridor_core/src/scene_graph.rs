//! Scene graph of instantiated corridor segments
//!
//! The recycler decides *which* segments exist; the scene graph holds one
//! node per live segment, keyed by its [`SegmentIndex`]. The index is only an
//! identity key here and is never interpreted numerically.

use std::collections::HashMap;

use bitflags::bitflags;
use slotmap::{new_key_type, SlotMap};

use crate::SegmentIndex;

new_key_type! {
    /// Key to a segment node in the scene graph
    ///
    /// Generational, so a key to a recycled segment returns None instead of
    /// pointing at whatever segment reused the slot.
    pub struct SegmentKey;
}

bitflags! {
    /// What changed in the graph since the last `clear_changes`
    ///
    /// Renderers rebuild their buffers only when this is non-empty.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct GraphChanges: u8 {
        /// At least one segment was inserted
        const INSERTED = 1 << 0;
        /// At least one segment was removed
        const REMOVED = 1 << 1;
    }
}

/// Receives segment insertions and removals from the recycler
pub trait SegmentSink {
    /// Instantiate the segment starting at `offset`
    fn insert_segment(&mut self, index: SegmentIndex, offset: f32, length: f32);
    /// Tear down a previously inserted segment (unknown indices are ignored)
    fn remove_segment(&mut self, index: SegmentIndex);
}

/// One instantiated segment
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentNode {
    pub index: SegmentIndex,
    /// Start coordinate along the travel axis
    pub offset: f32,
    /// Extent along the travel axis
    pub length: f32,
}

/// Live segment nodes
#[derive(Default)]
pub struct SceneGraph {
    nodes: SlotMap<SegmentKey, SegmentNode>,
    by_index: HashMap<SegmentIndex, SegmentKey>,
    changes: GraphChanges,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live segments
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up the node for a segment index
    pub fn key_of(&self, index: SegmentIndex) -> Option<SegmentKey> {
        self.by_index.get(&index).copied()
    }

    /// Get a node by key
    pub fn get(&self, key: SegmentKey) -> Option<&SegmentNode> {
        self.nodes.get(key)
    }

    /// Nodes ordered by index, nearest-first ordering is left to the caller
    pub fn nodes_sorted(&self) -> Vec<&SegmentNode> {
        let mut nodes: Vec<&SegmentNode> = self.nodes.values().collect();
        nodes.sort_by_key(|n| n.index);
        nodes
    }

    /// Iterate over all nodes with their keys
    pub fn iter(&self) -> impl Iterator<Item = (SegmentKey, &SegmentNode)> {
        self.nodes.iter()
    }

    /// Changes since the last `clear_changes`
    pub fn changes(&self) -> GraphChanges {
        self.changes
    }

    /// Whether geometry built from this graph is out of date
    pub fn is_dirty(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Mark the current contents as consumed by the renderer
    pub fn clear_changes(&mut self) {
        self.changes = GraphChanges::empty();
    }
}

impl SegmentSink for SceneGraph {
    fn insert_segment(&mut self, index: SegmentIndex, offset: f32, length: f32) {
        if self.by_index.contains_key(&index) {
            return;
        }
        let key = self.nodes.insert(SegmentNode { index, offset, length });
        self.by_index.insert(index, key);
        self.changes |= GraphChanges::INSERTED;
    }

    fn remove_segment(&mut self, index: SegmentIndex) {
        if let Some(key) = self.by_index.remove(&index) {
            self.nodes.remove(key);
            self.changes |= GraphChanges::REMOVED;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut graph = SceneGraph::new();
        graph.insert_segment(SegmentIndex(2), 80.0, 40.0);
        let key = graph.key_of(SegmentIndex(2)).unwrap();
        assert_eq!(graph.get(key).unwrap().offset, 80.0);
        assert_eq!(graph.changes(), GraphChanges::INSERTED);
    }

    #[test]
    fn test_duplicate_insert_ignored() {
        let mut graph = SceneGraph::new();
        graph.insert_segment(SegmentIndex(0), 0.0, 40.0);
        graph.clear_changes();
        graph.insert_segment(SegmentIndex(0), 0.0, 40.0);
        assert_eq!(graph.len(), 1);
        assert!(!graph.is_dirty());
    }

    #[test]
    fn test_removed_key_goes_stale() {
        let mut graph = SceneGraph::new();
        graph.insert_segment(SegmentIndex(1), 40.0, 40.0);
        let key = graph.key_of(SegmentIndex(1)).unwrap();
        graph.remove_segment(SegmentIndex(1));
        assert!(graph.get(key).is_none());
        assert!(graph.changes().contains(GraphChanges::REMOVED));
    }

    #[test]
    fn test_remove_unknown_is_ignored() {
        let mut graph = SceneGraph::new();
        graph.remove_segment(SegmentIndex(9));
        assert!(!graph.is_dirty());
    }

    #[test]
    fn test_nodes_sorted_by_index() {
        let mut graph = SceneGraph::new();
        for i in [3, -1, 0] {
            graph.insert_segment(SegmentIndex(i), i as f32 * 40.0, 40.0);
        }
        let order: Vec<i64> = graph.nodes_sorted().iter().map(|n| n.index.0).collect();
        assert_eq!(order, vec![-1, 0, 3]);
    }
}
