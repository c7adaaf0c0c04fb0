//! Torus mesh geometry with a triangle-edge wireframe.
//!
//! Vertex layout matches the common scene-graph convention: a
//! `(radial_segments + 1) × (tubular_segments + 1)` grid, seam vertices
//! duplicated, each grid quad split into two triangles.

use std::collections::HashSet;
use std::f32::consts::TAU;

#[derive(Debug, Clone)]
pub struct TorusGeometry {
    /// Distance from the torus centre to the tube centre
    pub radius: f32,
    /// Tube radius
    pub tube: f32,
    pub radial_segments: u32,
    pub tubular_segments: u32,
    pub vertices: Vec<[f32; 3]>,
    /// Unique triangle edges as vertex index pairs (low, high)
    pub edges: Vec<(u32, u32)>,
}

impl TorusGeometry {
    pub fn new(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let radial_segments = radial_segments.max(3);
        let tubular_segments = tubular_segments.max(3);
        let row = tubular_segments + 1;

        let mut vertices = Vec::with_capacity(((radial_segments + 1) * row) as usize);
        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let (sin_v, cos_v) = v.sin_cos();
            for i in 0..=tubular_segments {
                let u = i as f32 / tubular_segments as f32 * TAU;
                let (sin_u, cos_u) = u.sin_cos();
                let ring = radius + tube * cos_v;
                vertices.push([ring * cos_u, ring * sin_u, tube * sin_v]);
            }
        }

        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        let mut add = |a: u32, b: u32| {
            let key = (a.min(b), a.max(b));
            if seen.insert(key) {
                edges.push(key);
            }
        };
        for j in 1..=radial_segments {
            for i in 1..=tubular_segments {
                let a = row * j + i - 1;
                let b = row * (j - 1) + i - 1;
                let c = row * (j - 1) + i;
                let d = row * j + i;
                // triangles (a, b, d) and (b, c, d)
                add(a, b);
                add(b, d);
                add(d, a);
                add(b, c);
                add(c, d);
            }
        }

        Self {
            radius,
            tube,
            radial_segments,
            tubular_segments,
            vertices,
            edges,
        }
    }
}

impl Default for TorusGeometry {
    fn default() -> Self {
        Self::new(10.0, 3.0, 16, 100)
    }
}
