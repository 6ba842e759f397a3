// Decoded-archive data model. These structures are produced by the archive
// decoder and consumed read-only by model assembly.

mod animation;
mod frame;
mod material;
mod mesh;

pub use animation::*;
pub use frame::*;
pub use material::*;
pub use mesh::*;

/// Find the mesh owned by the frame at `path`.
pub fn find_mesh<'a>(path: &str, meshes: &'a [Mesh]) -> Option<&'a Mesh> {
    meshes.iter().find(|m| m.path == path)
}

/// Find a material by name.
pub fn find_material<'a>(name: &str, materials: &'a [Material]) -> Option<&'a Material> {
    materials.iter().find(|m| m.name == name)
}

/// Find a texture by name, returning its index into the texture list.
pub fn find_texture(name: &str, textures: &[Texture]) -> Option<usize> {
    textures.iter().position(|t| t.name == name)
}
