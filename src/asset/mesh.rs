use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VertexWeight {
    /// Index into the owning mesh's local bone list.
    pub bone: usize,
    pub weight: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: Option<[f32; 4]>,
    /// UV channels; only channel 0 is used for preview.
    pub uv: Vec<[f32; 2]>,
    pub weights: Vec<VertexWeight>,
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            normal: [0.0; 3],
            color: None,
            uv: Vec::new(),
            weights: Vec::new(),
        }
    }
}

/// Mesh-local bone entry: a frame path plus the inverse bind matrix captured
/// at export time (column-major).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshBone {
    pub path: String,
    pub inverse_bind: [[f32; 4]; 4],
}

impl MeshBone {
    pub fn inverse_bind_matrix(&self) -> glm::Mat4 {
        let flat: [f32; 16] = bytemuck::cast(self.inverse_bind);
        glm::Mat4::from_column_slice(&flat)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Face {
    pub indices: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submesh {
    pub material: String,
    pub base_vertex: u32,
    pub faces: Vec<Face>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh {
    /// Path of the frame this mesh is attached to.
    pub path: String,
    pub vertices: Vec<Vertex>,
    pub bones: Vec<MeshBone>,
    pub submeshes: Vec<Submesh>,
}

impl Mesh {
    /// A mesh with an empty bone list is drawn rigid, without skinning.
    pub fn is_skinned(&self) -> bool {
        !self.bones.is_empty()
    }
}
