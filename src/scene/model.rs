use log::{debug, warn};
use nalgebra_glm as glm;

use crate::animation::{Animator, compose_trs, quat_from_euler};
use crate::asset::{self, AnimationClip, Frame, Material, Mesh, Texture};
use crate::error::VisError;
use crate::pose::Pose;
use crate::skin::SkinBinding;

use super::draw::RenderState;
use super::material::SceneMaterial;
use super::node::{DrawMesh, Node};

// Arena slot used while the tree is under construction.
struct Slot {
    node: Node,
    parent: Option<usize>,
}

/// Assembled model: immutable node tree plus the bind pose.
pub struct Model {
    pub root: Node,
    pub pose: Pose,
    pub materials: Vec<SceneMaterial>,
}

impl Model {
    /// Walks the decoded frame tree once, depth-first with an explicit
    /// stack, assigning bone ids in traversal order (parent before all of
    /// its children). Mesh attachment is deferred to a second pass so a
    /// mesh may reference bones its owning frame has not seen yet.
    ///
    /// A submesh that fails to bind (skeleton mismatch, bad shape) is
    /// skipped with a warning; the rest of the model still assembles.
    pub fn assemble(
        root: &Frame,
        meshes: &[Mesh],
        materials: &[Material],
        textures: &[Texture],
    ) -> Result<Self, VisError> {
        let mut pose = Pose::new();
        let mut slots: Vec<Slot> = Vec::new();
        let mut pending: Vec<(usize, &Mesh)> = Vec::new();

        let mut frame_stack: Vec<&Frame> = vec![root];
        let mut parent_stack: Vec<(i32, usize)> = Vec::new();

        while let Some(frame) = frame_stack.pop() {
            let parent = parent_stack.pop();
            let parent_bone = parent.map_or(-1, |(bone, _)| bone);

            let bone_id = pose.insert_node(parent_bone, &frame.path)?;
            debug!("assembling frame {} (bone {bone_id})", frame.name);

            let rest = compose_trs(
                &glm::make_vec3(&frame.translation),
                &quat_from_euler(&frame.rotation),
                &glm::make_vec3(&frame.scale),
            );
            let slot_index = slots.len();
            slots.push(Slot {
                node: Node {
                    bone_id,
                    name: frame.name.clone(),
                    rest_transform: rest,
                    meshes: Vec::new(),
                    children: Vec::new(),
                },
                parent: parent.map(|(_, slot)| slot),
            });

            if let Some(mesh) = asset::find_mesh(&frame.path, meshes) {
                pending.push((slot_index, mesh));
            }

            for child in frame.children.iter().rev() {
                frame_stack.push(child);
                parent_stack.push((bone_id, slot_index));
            }
        }

        pose.set_bind_pose();

        // Second pass: the pose now holds every bone, so the mesh bone lists
        // can be resolved.
        let mut scene_materials: Vec<SceneMaterial> = Vec::new();
        for (slot_index, mesh) in pending {
            for submesh in &mesh.submeshes {
                match SkinBinding::build(&pose, mesh, submesh) {
                    Ok(binding) => {
                        let material = resolve_material(
                            &mut scene_materials,
                            &submesh.material,
                            materials,
                            textures,
                        );
                        slots[slot_index].node.meshes.push(DrawMesh::new(
                            binding,
                            material,
                            mesh.is_skinned(),
                        ));
                    }
                    Err(err) => {
                        warn!("skipping submesh of {}: {err}", mesh.path);
                    }
                }
            }
        }

        // Fold the arena back into a tree. Slots are in depth-first order,
        // so popping from the back reaches every child before its parent.
        let mut root_node = None;
        while let Some(slot) = slots.pop() {
            match slot.parent {
                Some(parent) => slots[parent].node.children.insert(0, slot.node),
                None => root_node = Some(slot.node),
            }
        }
        let root = root_node.ok_or_else(|| VisError::new("empty-frame-tree"))?;

        Ok(Self {
            root,
            pose,
            materials: scene_materials,
        })
    }

    /// Builds a keyframe animator for `clip` against this model's skeleton.
    pub fn animator(&self, clip: &AnimationClip) -> Result<Animator, VisError> {
        Animator::new(&self.pose, clip)
    }

    /// Draws the node tree: per node a world matrix composed from rest
    /// transforms, per skinned mesh the world-space skinning matrices
    /// derived from `pose` (usually an animated clone of [`Model::pose`]).
    pub fn draw(&self, state: &mut dyn RenderState, pose: &Pose, model_matrix: &glm::Mat4) {
        let bone_world = pose.world_pose();
        draw_node(&self.root, state, model_matrix, &bone_world, &self.materials);
    }

    /// Releases every GPU handle attached to the tree. Safe to call more
    /// than once.
    pub fn dispose(&mut self) {
        self.root.dispose();
    }
}

fn resolve_material(
    resolved: &mut Vec<SceneMaterial>,
    name: &str,
    materials: &[Material],
    textures: &[Texture],
) -> Option<usize> {
    if let Some(index) = resolved.iter().position(|m| m.name == name) {
        return Some(index);
    }
    let material = asset::find_material(name, materials)?;
    let diffuse = material
        .textures
        .first()
        .and_then(|texture| asset::find_texture(texture, textures));
    resolved.push(SceneMaterial {
        name: name.to_string(),
        diffuse,
    });
    Some(resolved.len() - 1)
}

fn draw_node(
    node: &Node,
    state: &mut dyn RenderState,
    parent_world: &glm::Mat4,
    bone_world: &[glm::Mat4],
    materials: &[SceneMaterial],
) {
    let world = parent_world * node.rest_transform;

    for mesh in &node.meshes {
        let Some(gpu) = mesh.gpu() else { continue };

        state.set_world_matrix(&world);
        let textured = mesh
            .material
            .and_then(|index| materials.get(index))
            .is_some_and(|material| material.diffuse.is_some());
        state.set_enable_diffuse(textured);

        if mesh.skinned {
            let skinning = mesh.binding.skinning_matrices(bone_world);
            state.set_skinning_matrices(Some(&skinning));
        } else {
            state.set_skinning_matrices(None);
        }

        gpu.bind();
        gpu.draw();
    }

    for child in &node.children {
        draw_node(child, state, &world, bone_world, materials);
    }
}
