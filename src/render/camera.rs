/// Fixed perspective camera looking down −Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov_deg: f32,
    /// Viewport width / height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 0.0, 30.0],
        }
    }
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_deg,
            aspect,
            near,
            far,
            ..Self::default()
        }
    }

    /// Aspect ratio for a viewport; degenerate sizes fall back to 1.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.aspect = if width > 0.0 && height > 0.0 {
            width / height
        } else {
            1.0
        };
    }

    /// World point → normalized device coordinates `[x, y, depth]`.
    ///
    /// `None` when the point lies outside the near/far range (including
    /// behind the camera).
    pub fn project(&self, p: [f32; 3]) -> Option<[f32; 3]> {
        let x = p[0] - self.position[0];
        let y = p[1] - self.position[1];
        let depth = self.position[2] - p[2];
        if depth < self.near || depth > self.far {
            return None;
        }
        let focal = 1.0 / (self.fov_deg.to_radians() * 0.5).tan();
        let inv_depth = 1.0 / depth;
        Some([
            focal / self.aspect * x * inv_depth,
            focal * y * inv_depth,
            depth,
        ])
    }
}

/// NDC → pixel coordinates inside a `width × height` viewport (origin top-left).
#[inline]
pub fn ndc_to_viewport(ndc: [f32; 3], width: f32, height: f32) -> [f32; 2] {
    [
        (ndc[0] + 1.0) * 0.5 * width,
        (1.0 - ndc[1]) * 0.5 * height,
    ]
}
