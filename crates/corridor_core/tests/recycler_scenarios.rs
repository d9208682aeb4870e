//! Scenario tests for the segment recycler driving a scene graph

use corridor_core::{SceneGraph, SegmentIndex, SegmentRecycler};

#[test]
fn test_window_recomputes_once_when_crossing_boundary() {
    let mut recycler = SegmentRecycler::new(40.0, 2).unwrap();
    let mut graph = SceneGraph::new();

    // Walk from z=5 to z=45 in small steps
    let mut z = 5.0f32;
    let mut rebuilds = Vec::new();
    while z <= 45.0 {
        if recycler.sync(Some(z), &mut graph) {
            rebuilds.push(z);
        }
        z += 0.5;
    }

    // Initial instantiation plus exactly one rebuild at the 40 boundary
    assert_eq!(rebuilds.len(), 2);
    assert_eq!(rebuilds[0], 5.0);
    assert_eq!(rebuilds[1], 40.0);
    assert_eq!(recycler.recomputations(), 2);

    let window = recycler.current().unwrap();
    assert_eq!(window.base_offset(), 40.0);
    assert_eq!(window.offsets(), vec![-40.0, 0.0, 40.0, 80.0, 120.0]);
}

#[test]
fn test_scene_graph_tracks_window_while_travelling_backward() {
    let mut recycler = SegmentRecycler::default();
    let mut graph = SceneGraph::new();

    // Camera travels toward -Z, as the scroll controller drives it
    let mut z = 8.0f32;
    while z > -500.0 {
        recycler.sync(Some(z), &mut graph);
        assert_eq!(graph.len(), 5);
        let base = SegmentIndex::containing(z, 40.0);
        assert!(graph.key_of(base).is_some(), "camera segment missing at z = {}", z);
        z -= 1.7;
    }
}

#[test]
fn test_uninitialised_camera_renders_nothing() {
    let mut recycler = SegmentRecycler::default();
    let mut graph = SceneGraph::new();
    assert!(!recycler.sync(None, &mut graph));
    assert!(graph.is_empty());
}
