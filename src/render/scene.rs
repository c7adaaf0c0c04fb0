//! Background scene: one camera, one wireframe torus, per-frame rotation.
//!
//! All state lives in an explicit `SceneContext`. The render loop calls
//! `advance` once per frame and then paints `project()`; `shutdown` releases
//! the mesh and stops both.

use crate::render::camera::{ndc_to_viewport, PerspectiveCamera};
use crate::render::torus::TorusGeometry;

pub const DEFAULT_STEP_X: f32 = 0.01;
pub const DEFAULT_STEP_Y: f32 = 0.005;
pub const DEFAULT_COLOR: u32 = 0x00f2ff;

/// Geometry + material + transform.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: TorusGeometry,
    /// 0xRRGGBB
    pub color: u32,
    /// Euler angles in radians, applied in X, Y, Z order
    pub rotation: [f32; 3],
}

impl Mesh {
    pub fn new(geometry: TorusGeometry, color: u32) -> Self {
        Self {
            geometry,
            color,
            rotation: [0.0; 3],
        }
    }

    /// Rotation matrix Rx · Ry · Rz (row-major).
    fn rotation_matrix(&self) -> [[f32; 3]; 3] {
        let (sa, ca) = self.rotation[0].sin_cos();
        let (sb, cb) = self.rotation[1].sin_cos();
        let (sc, cc) = self.rotation[2].sin_cos();
        [
            [cb * cc, -cb * sc, sb],
            [ca * sc + sa * sb * cc, ca * cc - sa * sb * sc, -sa * cb],
            [sa * sc - ca * sb * cc, sa * cc + ca * sb * sc, ca * cb],
        ]
    }

    /// Vertex positions in world space.
    pub fn world_vertices(&self) -> Vec<[f32; 3]> {
        let m = self.rotation_matrix();
        self.geometry
            .vertices
            .iter()
            .map(|v| {
                [
                    m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
                    m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
                    m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
                ]
            })
            .collect()
    }
}

pub struct SceneContext {
    camera: PerspectiveCamera,
    mesh: Option<Mesh>,
    viewport: [f32; 2],
    step: [f32; 2],
    frames: u64,
}

impl SceneContext {
    /// Camera sized to the viewport, torus added to the scene.
    pub fn new(width: f32, height: f32) -> Self {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        camera.position = [0.0, 0.0, 30.0];
        camera.set_viewport(width, height);

        Self {
            camera,
            mesh: Some(Mesh::new(TorusGeometry::new(10.0, 3.0, 16, 100), DEFAULT_COLOR)),
            viewport: [width, height],
            step: [DEFAULT_STEP_X, DEFAULT_STEP_Y],
            frames: 0,
        }
    }

    pub fn with_rotation_step(mut self, x: f32, y: f32) -> Self {
        self.step = [x, y];
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        if let Some(mesh) = self.mesh.as_mut() {
            mesh.color = color;
        }
        self
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    pub fn viewport(&self) -> [f32; 2] {
        self.viewport
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_live(&self) -> bool {
        self.mesh.is_some()
    }

    /// Current mesh rotation, zero once shut down.
    pub fn rotation(&self) -> [f32; 3] {
        self.mesh.as_ref().map_or([0.0; 3], |m| m.rotation)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if self.viewport != [width, height] {
            log::debug!("Scene viewport {}x{}", width, height);
            self.viewport = [width, height];
            self.camera.set_viewport(width, height);
        }
    }

    /// One frame of animation. Angles accumulate without wrapping.
    /// Returns false once the scene is shut down.
    pub fn advance(&mut self) -> bool {
        match self.mesh.as_mut() {
            Some(mesh) => {
                mesh.rotation[0] += self.step[0];
                mesh.rotation[1] += self.step[1];
                self.frames += 1;
                true
            }
            None => false,
        }
    }

    /// Wireframe line segments in viewport pixels. Edges with an endpoint
    /// outside the camera's depth range are dropped.
    pub fn project(&self) -> Vec<[[f32; 2]; 2]> {
        let Some(mesh) = self.mesh.as_ref() else {
            return Vec::new();
        };
        let [w, h] = self.viewport;
        let screen: Vec<Option<[f32; 2]>> = mesh
            .world_vertices()
            .into_iter()
            .map(|p| self.camera.project(p).map(|ndc| ndc_to_viewport(ndc, w, h)))
            .collect();

        mesh.geometry
            .edges
            .iter()
            .filter_map(|&(a, b)| match (screen[a as usize], screen[b as usize]) {
                (Some(pa), Some(pb)) => Some([pa, pb]),
                _ => None,
            })
            .collect()
    }

    /// Release the mesh. Further `advance`/`project` calls are no-ops.
    pub fn shutdown(&mut self) {
        if self.mesh.take().is_some() {
            log::info!("Background scene shut down after {} frames", self.frames);
        }
    }
}
