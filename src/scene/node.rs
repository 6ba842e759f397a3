use nalgebra_glm as glm;

use crate::skin::SkinBinding;

use super::draw::GpuMesh;

/// One bound submesh: the CPU-side binding plus an optional GPU handle the
/// backend attaches after upload.
pub struct DrawMesh {
    pub binding: SkinBinding,
    /// Index into the model's resolved material table.
    pub material: Option<usize>,
    pub skinned: bool,
    gpu: Option<Box<dyn GpuMesh>>,
}

impl DrawMesh {
    pub fn new(binding: SkinBinding, material: Option<usize>, skinned: bool) -> Self {
        Self {
            binding,
            material,
            skinned,
            gpu: None,
        }
    }

    pub fn attach_gpu(&mut self, gpu: Box<dyn GpuMesh>) {
        self.gpu = Some(gpu);
    }

    pub fn gpu(&self) -> Option<&dyn GpuMesh> {
        self.gpu.as_deref()
    }

    /// Releases the GPU handle. Calling this twice is a no-op.
    pub fn dispose(&mut self) {
        if let Some(mut gpu) = self.gpu.take() {
            gpu.dispose();
        }
    }
}

impl std::fmt::Debug for DrawMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawMesh")
            .field("material", &self.material)
            .field("skinned", &self.skinned)
            .field("gpu", &self.gpu.is_some())
            .finish()
    }
}

/// Node of the assembled scene tree. `rest_transform` is the frame's static
/// placement, distinct from the pose's mutable local transform.
#[derive(Debug)]
pub struct Node {
    pub bone_id: i32,
    pub name: String,
    pub rest_transform: glm::Mat4,
    pub meshes: Vec<DrawMesh>,
    pub children: Vec<Node>,
}

impl Node {
    pub(super) fn dispose(&mut self) {
        for mesh in &mut self.meshes {
            mesh.dispose();
        }
        for child in &mut self.children {
            child.dispose();
        }
    }
}
