// Bone hierarchy and pose storage. Bone ids are dense and assigned in
// hierarchy-traversal order, so every bone's id is strictly greater than its
// parent's id; world transforms then fall out of a single forward pass.

use std::collections::HashMap;
use std::sync::Arc;

use nalgebra_glm as glm;

use crate::error::VisError;

/// Skinning matrix capacity of the GPU consumer's uniform buffer
/// (`mat4 u_bones[128]` in the vertex shader).
pub const MAX_BONES: usize = 128;

/// Structure shared by a pose and all of its clones: read-only after
/// assembly, so clones alias it behind `Arc`.
#[derive(Debug, Clone, Default)]
struct Hierarchy {
    parents: Vec<i32>,
    ids_by_path: HashMap<String, i32>,
}

/// Mutable assignment of local transforms to every bone of a model.
///
/// Created once during model assembly, cloned per independent playback
/// instance. Only the local-transform array is clone-private; the parent ids
/// and path map are structural and shared.
#[derive(Debug, Clone, Default)]
pub struct Pose {
    hierarchy: Arc<Hierarchy>,
    locals: Vec<glm::Mat4>,
}

impl Pose {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a bone as the next dense id. `parent` is `-1` for the root.
    ///
    /// Fails when the bone count would exceed [`MAX_BONES`] or when `path`
    /// was already registered.
    pub fn insert_node(&mut self, parent: i32, path: &str) -> Result<i32, VisError> {
        let id = self.locals.len() as i32;
        if id as usize >= MAX_BONES {
            return Err(VisError::new("bone-capacity")
                .with_arg("max", MAX_BONES)
                .with_arg("path", path));
        }
        debug_assert!(parent < id, "bone inserted before its parent");

        let hierarchy = Arc::make_mut(&mut self.hierarchy);
        if hierarchy.ids_by_path.contains_key(path) {
            return Err(VisError::new("bone-path-duplicate").with_arg("path", path));
        }
        hierarchy.parents.push(parent);
        hierarchy.ids_by_path.insert(path.to_string(), id);
        self.locals.push(glm::Mat4::identity());
        Ok(id)
    }

    /// Resets every local transform to identity (the rest pose).
    pub fn set_bind_pose(&mut self) {
        for local in &mut self.locals {
            *local = glm::Mat4::identity();
        }
    }

    /// Overwrites a bone's local transform. Silently ignored for the root
    /// (id 0 is never rebound) and for out-of-range ids.
    pub fn set_transform(&mut self, id: i32, transform: glm::Mat4) {
        if id <= 0 || id as usize >= self.locals.len() {
            return;
        }
        self.locals[id as usize] = transform;
    }

    /// A bone's current local transform; identity for out-of-range ids.
    pub fn transform(&self, id: i32) -> glm::Mat4 {
        if id < 0 || id as usize >= self.locals.len() {
            return glm::Mat4::identity();
        }
        self.locals[id as usize]
    }

    /// Resolves a frame path to a bone id. `None` is the absent-path marker
    /// and falls back to the root; an unknown path yields `-1`.
    pub fn id_from_path(&self, path: Option<&str>) -> i32 {
        match path {
            None => 0,
            Some(p) => self.hierarchy.ids_by_path.get(p).copied().unwrap_or(-1),
        }
    }

    /// Structural parent lookup; `-1` for the root or an invalid id.
    pub fn parent(&self, id: i32) -> i32 {
        if id < 0 || id as usize >= self.hierarchy.parents.len() {
            return -1;
        }
        self.hierarchy.parents[id as usize]
    }

    pub fn bone_count(&self) -> usize {
        self.locals.len()
    }

    /// World-space transform of every bone, computed in one forward pass.
    /// Well-defined because `parent(i) < i` holds for every inserted bone.
    pub fn world_pose(&self) -> Vec<glm::Mat4> {
        let mut world: Vec<glm::Mat4> = Vec::with_capacity(self.locals.len());
        for (i, local) in self.locals.iter().enumerate() {
            let parent = self.hierarchy.parents[i];
            let m = if parent < 0 {
                *local
            } else {
                world[parent as usize] * local
            };
            world.push(m);
        }
        world
    }
}
