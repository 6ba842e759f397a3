use serde::{Deserialize, Serialize};

/// One node of the decoded frame hierarchy. `path` is unique within the
/// model and is the key meshes and animation tracks use to reference it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub path: String,
    pub name: String,
    pub translation: [f32; 3],
    /// Euler angles in radians: x = yaw, y = pitch, z = roll.
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    pub children: Vec<Frame>,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            path: String::new(),
            name: String::new(),
            translation: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
            children: Vec::new(),
        }
    }
}
