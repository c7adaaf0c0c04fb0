pub mod background;
pub mod camera;
pub mod scene;
pub mod torus;
