//! WebGPU rendering module
//!
//! The scene is rebuilt every frame as one flat-colored triangle list in
//! arena coordinates; the pipeline maps it into the viewport.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod text;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::Overlay;
pub use vertex::Vertex;
