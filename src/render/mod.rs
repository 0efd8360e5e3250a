//! Drawing: a pure scene description, and the terminal surface that paints it

pub mod renderer;
pub mod scene;

pub use renderer::Renderer;
pub use scene::{Overlay, Primitive, Scene, SceneBuilder};
