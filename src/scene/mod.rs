// Assembled scene: node tree, resolved materials, draw traversal and the
// contract with the GPU backend.

mod draw;
mod material;
mod model;
mod node;

pub use draw::{GpuMesh, RenderState};
pub use material::SceneMaterial;
pub use model::Model;
pub use node::{DrawMesh, Node};
