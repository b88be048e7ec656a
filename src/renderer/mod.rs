//! Rendering module
//!
//! Produces render-API-agnostic primitive lists; `vertex` turns them into a
//! triangle list for a GPU backend.

pub mod primitive;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use primitive::{DrawPrimitive, Stroke};
pub use scene::SceneRenderer;
pub use shapes::{ShapePose, render_shape};
pub use vertex::{Vertex, tessellate};
