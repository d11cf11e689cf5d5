//! WebGPU rendering module
//!
//! The scene is rebuilt as one colored triangle list each frame; text (score,
//! titles, button labels) is drawn by the DOM overlay.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Backdrop, build_scene};
pub use vertex::Vertex;
