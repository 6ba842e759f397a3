// Skin binding builder: converts a decoded mesh + submesh pair into the
// attribute buffers and inverse-bind offset table the GPU skinning pipeline
// consumes. Mesh-local bone indices are remapped to model bone ids by path.

use nalgebra_glm as glm;

use crate::asset::{Mesh, Submesh};
use crate::error::VisError;
use crate::pose::Pose;

/// Bone influence slots per vertex.
pub const MAX_INFLUENCES: usize = 4;

/// Vertex color used when the mesh carries none.
pub const DEFAULT_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

/// GPU-ready vertex attribute buffers plus the per-model-bone inverse-bind
/// offset table for one submesh.
#[derive(Debug, Clone)]
pub struct SkinBinding {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub uvs: Vec<[f32; 2]>,
    pub bone_weights: Vec<[f32; 4]>,
    pub bone_ids: Vec<[u32; 4]>,
    pub indices: Vec<u32>,
    /// Inverse-bind offsets indexed by model bone id; identity for bones the
    /// mesh does not reference.
    pub offsets: Vec<glm::Mat4>,
}

impl SkinBinding {
    /// Builds the binding against a fully populated pose.
    ///
    /// Fatal errors: a mesh bone path unknown to the pose (the mesh was
    /// exported for a different skeleton), a vertex with more than
    /// [`MAX_INFLUENCES`] bones, or a non-triangular face.
    pub fn build(pose: &Pose, mesh: &Mesh, submesh: &Submesh) -> Result<Self, VisError> {
        let mut offsets = vec![glm::Mat4::identity(); pose.bone_count()];
        let mut local_to_model = Vec::with_capacity(mesh.bones.len());
        for bone in &mesh.bones {
            let id = pose.id_from_path(Some(&bone.path));
            if id < 0 {
                return Err(VisError::new("bone-path-missing")
                    .with_arg("path", &bone.path)
                    .with_arg("mesh", &mesh.path));
            }
            offsets[id as usize] = bone.inverse_bind_matrix();
            local_to_model.push(id as u32);
        }

        let count = mesh.vertices.len();
        let mut positions = Vec::with_capacity(count);
        let mut normals = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        let mut uvs = Vec::with_capacity(count);
        let mut bone_weights = Vec::with_capacity(count);
        let mut bone_ids = Vec::with_capacity(count);

        for vertex in &mesh.vertices {
            positions.push(vertex.position);
            normals.push(vertex.normal);
            colors.push(vertex.color.unwrap_or(DEFAULT_COLOR));
            uvs.push(vertex.uv.first().copied().unwrap_or([0.0, 0.0]));

            if vertex.weights.len() > MAX_INFLUENCES {
                return Err(VisError::new("bone-influences")
                    .with_arg("count", vertex.weights.len())
                    .with_arg("max", MAX_INFLUENCES)
                    .with_arg("mesh", &mesh.path));
            }
            // Unused slots stay (0.0, bone 0); bone 0 is a safe default, not
            // a claim about weight sums.
            let mut weights = [0.0f32; 4];
            let mut ids = [0u32; 4];
            for (slot, influence) in vertex.weights.iter().enumerate() {
                let Some(&model_id) = local_to_model.get(influence.bone) else {
                    return Err(VisError::new("mesh-bone-range")
                        .with_arg("bone", influence.bone)
                        .with_arg("bones", mesh.bones.len())
                        .with_arg("mesh", &mesh.path));
                };
                weights[slot] = influence.weight;
                ids[slot] = model_id;
            }
            bone_weights.push(weights);
            bone_ids.push(ids);
        }

        let mut indices = Vec::with_capacity(submesh.faces.len() * 3);
        for face in &submesh.faces {
            if face.indices.len() != 3 {
                return Err(VisError::new("non-triangular-face")
                    .with_arg("vertices", face.indices.len())
                    .with_arg("mesh", &mesh.path));
            }
            for &index in &face.indices {
                indices.push(index + submesh.base_vertex);
            }
        }

        Ok(Self {
            positions,
            normals,
            colors,
            uvs,
            bone_weights,
            bone_ids,
            indices,
            offsets,
        })
    }

    /// World-space skinning matrices for the GPU uniform buffer:
    /// `world[i] * offset[i]` per model bone. `world` is the output of
    /// [`Pose::world_pose`] on the same model.
    pub fn skinning_matrices(&self, world: &[glm::Mat4]) -> Vec<glm::Mat4> {
        world
            .iter()
            .zip(&self.offsets)
            .map(|(w, offset)| w * offset)
            .collect()
    }

    // Zero-copy byte views for buffer upload.

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    pub fn bone_weight_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.bone_weights)
    }

    pub fn bone_id_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.bone_ids)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{Face, MeshBone, Vertex, VertexWeight};
    use approx::assert_relative_eq;

    const IDENTITY: [[f32; 4]; 4] = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];

    fn arm_pose() -> Pose {
        let mut pose = Pose::new();
        pose.insert_node(-1, "R").unwrap();
        pose.insert_node(0, "R/arm").unwrap();
        pose
    }

    fn skinned_mesh() -> Mesh {
        Mesh {
            path: "R".to_string(),
            vertices: vec![
                Vertex {
                    position: [0.0, 0.0, 0.0],
                    normal: [0.0, 1.0, 0.0],
                    weights: vec![VertexWeight { bone: 0, weight: 1.0 }],
                    ..Default::default()
                },
                Vertex {
                    position: [1.0, 0.0, 0.0],
                    normal: [0.0, 1.0, 0.0],
                    weights: vec![VertexWeight { bone: 0, weight: 1.0 }],
                    ..Default::default()
                },
                Vertex {
                    position: [0.0, 0.0, 1.0],
                    normal: [0.0, 1.0, 0.0],
                    weights: vec![VertexWeight { bone: 0, weight: 1.0 }],
                    ..Default::default()
                },
            ],
            bones: vec![MeshBone {
                path: "R/arm".to_string(),
                inverse_bind: IDENTITY,
            }],
            submeshes: vec![Submesh {
                material: "mat".to_string(),
                base_vertex: 0,
                faces: vec![Face {
                    indices: vec![0, 1, 2],
                }],
            }],
        }
    }

    #[test]
    fn resolvable_mesh_builds_cleanly() {
        let pose = arm_pose();
        let mesh = skinned_mesh();
        let binding = SkinBinding::build(&pose, &mesh, &mesh.submeshes[0]).unwrap();

        assert_eq!(binding.positions.len(), 3);
        assert_eq!(binding.indices, vec![0, 1, 2]);
        assert_eq!(binding.offsets.len(), pose.bone_count());
        // All influences remapped to model bone id 1 ("R/arm").
        assert_eq!(binding.bone_ids[0], [1, 0, 0, 0]);
        assert_eq!(binding.bone_weights[0], [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn unknown_bone_path_is_fatal() {
        let pose = arm_pose();
        let mut mesh = skinned_mesh();
        mesh.bones[0].path = "R/leg".to_string();

        let err = SkinBinding::build(&pose, &mesh, &mesh.submeshes[0]).unwrap_err();
        assert_eq!(err.key, "bone-path-missing");
        assert_eq!(err.args.get("path").map(String::as_str), Some("R/leg"));
    }

    #[test]
    fn too_many_influences_is_fatal() {
        let pose = arm_pose();
        let mut mesh = skinned_mesh();
        mesh.vertices[0].weights = vec![VertexWeight { bone: 0, weight: 0.2 }; 5];

        let err = SkinBinding::build(&pose, &mesh, &mesh.submeshes[0]).unwrap_err();
        assert_eq!(err.key, "bone-influences");
    }

    #[test]
    fn non_triangular_face_is_fatal() {
        let pose = arm_pose();
        let mut mesh = skinned_mesh();
        mesh.submeshes[0].faces[0].indices = vec![0, 1, 2, 0];

        let err = SkinBinding::build(&pose, &mesh, &mesh.submeshes[0]).unwrap_err();
        assert_eq!(err.key, "non-triangular-face");
    }

    #[test]
    fn missing_color_and_uv_get_defaults() {
        let pose = arm_pose();
        let mesh = skinned_mesh();
        let binding = SkinBinding::build(&pose, &mesh, &mesh.submeshes[0]).unwrap();

        assert_eq!(binding.colors[0], DEFAULT_COLOR);
        assert_eq!(binding.uvs[0], [0.0, 0.0]);
    }

    #[test]
    fn base_vertex_offsets_indices() {
        let pose = arm_pose();
        let mut mesh = skinned_mesh();
        mesh.submeshes[0].base_vertex = 10;

        let binding = SkinBinding::build(&pose, &mesh, &mesh.submeshes[0]).unwrap();
        assert_eq!(binding.indices, vec![10, 11, 12]);
    }

    #[test]
    fn skinning_matrices_compose_world_and_offset() {
        let pose = arm_pose();
        let mesh = skinned_mesh();
        let binding = SkinBinding::build(&pose, &mesh, &mesh.submeshes[0]).unwrap();

        let world = vec![
            glm::Mat4::identity(),
            glm::translation(&glm::vec3(0.0, 3.0, 0.0)),
        ];
        let mats = binding.skinning_matrices(&world);
        assert_eq!(mats.len(), 2);
        assert_relative_eq!(mats[1], world[1], epsilon = 1e-6);
    }
}
