use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke};

use crate::render::scene::SceneContext;

const LINE_WIDTH: f32 = 1.0;

/// 0xRRGGBB → opaque colour
pub fn color32(rgb: u32) -> Color32 {
    Color32::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Paint the scene's wireframe into `rect`. The scene viewport is expected
/// to match the rect size (see `SceneContext::resize`).
pub fn paint_scene(painter: &Painter, rect: Rect, scene: &SceneContext) {
    let Some(mesh) = scene.mesh() else {
        return;
    };
    let stroke = Stroke::new(LINE_WIDTH, color32(mesh.color));
    let origin = rect.min;

    let shapes: Vec<Shape> = scene
        .project()
        .into_iter()
        .map(|[a, b]| Shape::line_segment([offset(origin, a), offset(origin, b)], stroke))
        .collect();
    painter.extend(shapes);
}

#[inline]
fn offset(origin: Pos2, p: [f32; 2]) -> Pos2 {
    Pos2::new(origin.x + p[0], origin.y + p[1])
}
