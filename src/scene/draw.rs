use nalgebra_glm as glm;

/// Per-draw uniform state owned by the GPU backend.
pub trait RenderState {
    fn set_world_matrix(&mut self, world: &glm::Mat4);
    fn set_enable_diffuse(&mut self, enable: bool);
    /// `Some` enables skinning and uploads the matrices (at most
    /// [`crate::MAX_BONES`]); `None` draws rigid. Entries past the model's
    /// bone count are unspecified and must not be read.
    fn set_skinning_matrices(&mut self, matrices: Option<&[glm::Mat4]>);
}

/// GPU-side buffers for one submesh, created by the backend from a
/// [`crate::SkinBinding`]. `dispose` releases the buffers; the owning model
/// guarantees it is called at most once per handle.
pub trait GpuMesh {
    fn bind(&self);
    fn draw(&self);
    fn dispose(&mut self);
}
