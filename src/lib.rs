//! Skeletal pose and animation core for previewing models extracted from
//! game-asset archives.
//!
//! The archive decoder feeds this crate with `asset` structures (frame tree,
//! meshes, materials, textures, animation clips); `scene::Model::assemble`
//! turns them into a node tree plus a [`pose::Pose`], the keyframe
//! [`animation::Animator`] mutates a pose clone per playback frame, and the
//! GPU backend consumes world matrices and skinning matrices through the
//! traits in `scene`.

pub mod animation;
pub mod asset;
pub mod error;
pub mod pose;
pub mod scene;
pub mod skin;

pub use animation::{Animator, Boundary};
pub use error::VisError;
pub use pose::{MAX_BONES, Pose};
pub use scene::{GpuMesh, Model, RenderState};
pub use skin::SkinBinding;
