//! Renderable geometry - bridges the segment scene graph to GPU buffers
//!
//! Every live segment becomes a floor (checkerboard tiles), two walls, a
//! ceiling and a row of rib frames. Geometry is rebuilt from the scene graph
//! only when the recycler has changed it.

use corridor_core::{SceneGraph, SegmentNode};

use crate::pipeline::Vertex3D;

/// Utility struct for coloring floor tiles in a checkerboard
#[derive(Clone, Debug)]
pub struct CheckerboardPattern {
    pub color_a: [f32; 4],
    pub color_b: [f32; 4],
    /// Size of each checker cell
    pub cell_size: f32,
}

impl CheckerboardPattern {
    pub fn new(color_a: [f32; 4], color_b: [f32; 4], cell_size: f32) -> Self {
        Self { color_a, color_b, cell_size }
    }

    /// Color for the cell containing (x, z)
    pub fn color_for_position(&self, x: f32, z: f32) -> [f32; 4] {
        let cell_x = (x / self.cell_size).floor() as i64;
        let cell_z = (z / self.cell_size).floor() as i64;

        if (cell_x + cell_z).rem_euclid(2) == 0 {
            self.color_a
        } else {
            self.color_b
        }
    }
}

/// Dimensions and colors of the corridor
#[derive(Clone, Debug)]
pub struct CorridorStyle {
    /// Interior width (X)
    pub width: f32,
    /// Interior height (Y)
    pub height: f32,
    /// Distance between rib frames along Z
    pub rib_spacing: f32,
    /// Rib depth along Z
    pub rib_thickness: f32,
    /// How far ribs stand off the walls
    pub rib_inset: f32,
    pub floor: CheckerboardPattern,
    pub wall_color: [f32; 4],
    pub ceiling_color: [f32; 4],
    pub rib_color: [f32; 4],
}

impl Default for CorridorStyle {
    fn default() -> Self {
        Self {
            width: 6.0,
            height: 4.0,
            rib_spacing: 10.0,
            rib_thickness: 0.4,
            rib_inset: 0.15,
            floor: CheckerboardPattern::new([0.18, 0.18, 0.22, 1.0], [0.32, 0.32, 0.38, 1.0], 2.0),
            wall_color: [0.45, 0.47, 0.55, 1.0],
            ceiling_color: [0.25, 0.26, 0.32, 1.0],
            rib_color: [0.85, 0.55, 0.25, 1.0],
        }
    }
}

/// GPU-ready corridor vertices (triangle list)
#[derive(Default)]
pub struct CorridorGeometry {
    pub vertices: Vec<Vertex3D>,
}

impl CorridorGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build geometry for every segment in the graph
    pub fn from_scene(graph: &SceneGraph, style: &CorridorStyle) -> Self {
        let mut result = Self::new();
        for node in graph.nodes_sorted() {
            result.add_segment(node, style);
        }
        result
    }

    /// Append one segment's surfaces
    pub fn add_segment(&mut self, node: &SegmentNode, style: &CorridorStyle) {
        let z0 = node.offset;
        let z1 = node.offset + node.length;
        let hw = style.width / 2.0;
        let hh = style.height / 2.0;

        self.add_floor(z0, z1, hw, -hh, &style.floor);

        // Left wall, facing +X
        self.push_quad(
            [[-hw, -hh, z0], [-hw, -hh, z1], [-hw, hh, z1], [-hw, hh, z0]],
            [1.0, 0.0, 0.0],
            style.wall_color,
        );
        // Right wall, facing -X
        self.push_quad(
            [[hw, -hh, z1], [hw, -hh, z0], [hw, hh, z0], [hw, hh, z1]],
            [-1.0, 0.0, 0.0],
            style.wall_color,
        );
        // Ceiling, facing -Y
        self.push_quad(
            [[-hw, hh, z0], [-hw, hh, z1], [hw, hh, z1], [hw, hh, z0]],
            [0.0, -1.0, 0.0],
            style.ceiling_color,
        );

        if style.rib_spacing > 0.0 {
            let count = (node.length / style.rib_spacing).floor() as usize;
            for k in 0..count {
                let zr = z0 + k as f32 * style.rib_spacing;
                let zr1 = (zr + style.rib_thickness).min(z1);
                self.add_rib(zr, zr1, hw - style.rib_inset, hh - style.rib_inset, hh, style.rib_color);
            }
        }
    }

    /// Checkerboard floor tiles clipped to the segment
    fn add_floor(&mut self, z0: f32, z1: f32, hw: f32, y: f32, pattern: &CheckerboardPattern) {
        let cell = pattern.cell_size.max(0.01);
        let mut z = z0;
        while z < z1 {
            let zn = (z + cell).min(z1);
            let mut x = -hw;
            while x < hw {
                let xn = (x + cell).min(hw);
                let color = pattern.color_for_position((x + xn) * 0.5, (z + zn) * 0.5);
                self.push_quad(
                    [[x, y, z], [xn, y, z], [xn, y, zn], [x, y, zn]],
                    [0.0, 1.0, 0.0],
                    color,
                );
                x = xn;
            }
            z = zn;
        }
    }

    /// A rib frame: two posts standing off the walls and a lintel under the ceiling
    fn add_rib(&mut self, z0: f32, z1: f32, inner_x: f32, inner_y: f32, hh: f32, color: [f32; 4]) {
        self.push_quad(
            [[-inner_x, -hh, z0], [-inner_x, -hh, z1], [-inner_x, hh, z1], [-inner_x, hh, z0]],
            [1.0, 0.0, 0.0],
            color,
        );
        self.push_quad(
            [[inner_x, -hh, z1], [inner_x, -hh, z0], [inner_x, hh, z0], [inner_x, hh, z1]],
            [-1.0, 0.0, 0.0],
            color,
        );
        self.push_quad(
            [[-inner_x, inner_y, z0], [-inner_x, inner_y, z1], [inner_x, inner_y, z1], [inner_x, inner_y, z0]],
            [0.0, -1.0, 0.0],
            color,
        );
    }

    fn push_quad(&mut self, corners: [[f32; 3]; 4], normal: [f32; 3], color: [f32; 4]) {
        let [a, b, c, d] = corners;
        for p in [a, b, c, a, c, d] {
            self.vertices.push(Vertex3D::new(p, normal, color));
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corridor_core::{SegmentIndex, SegmentSink};

    fn style() -> CorridorStyle {
        CorridorStyle {
            width: 4.0,
            rib_spacing: 10.0,
            floor: CheckerboardPattern::new([0.0; 4], [1.0; 4], 2.0),
            ..Default::default()
        }
    }

    fn node(index: i64) -> SegmentNode {
        SegmentNode {
            index: SegmentIndex(index),
            offset: index as f32 * 40.0,
            length: 40.0,
        }
    }

    #[test]
    fn test_empty_scene_has_no_geometry() {
        let geometry = CorridorGeometry::from_scene(&SceneGraph::new(), &style());
        assert_eq!(geometry.vertex_count(), 0);
    }

    #[test]
    fn test_segment_vertex_count() {
        let mut geometry = CorridorGeometry::new();
        geometry.add_segment(&node(0), &style());
        // Floor: 2 x 20 tiles, walls + ceiling: 3 quads, ribs: 4 frames x 3 quads
        let quads = 2 * 20 + 3 + 4 * 3;
        assert_eq!(geometry.vertex_count(), quads * 6);
    }

    #[test]
    fn test_vertices_stay_inside_segment() {
        let mut geometry = CorridorGeometry::new();
        let n = node(-2);
        geometry.add_segment(&n, &style());
        for v in &geometry.vertices {
            assert!(v.position[2] >= n.offset && v.position[2] <= n.offset + n.length);
            assert!(v.position[0].abs() <= 2.0);
        }
    }

    #[test]
    fn test_scene_geometry_scales_with_segments() {
        let mut graph = SceneGraph::new();
        for i in -2..=2 {
            graph.insert_segment(SegmentIndex(i), i as f32 * 40.0, 40.0);
        }
        let mut single = CorridorGeometry::new();
        single.add_segment(&node(0), &style());
        let all = CorridorGeometry::from_scene(&graph, &style());
        assert_eq!(all.vertex_count(), single.vertex_count() * 5);
    }

    #[test]
    fn test_checkerboard_alternates() {
        let pattern = CheckerboardPattern::new([0.0; 4], [1.0; 4], 2.0);
        assert_eq!(pattern.color_for_position(0.5, 0.5), [0.0; 4]);
        assert_eq!(pattern.color_for_position(2.5, 0.5), [1.0; 4]);
        // Negative cells keep alternating
        assert_eq!(pattern.color_for_position(-0.5, 0.5), [1.0; 4]);
    }
}
