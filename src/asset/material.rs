use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Texture names in slot order; slot 0 is the diffuse map.
    pub textures: Vec<String>,
}

/// Raw encoded image bytes. Decoding happens in the GPU layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Texture {
    pub name: String,
    pub data: Vec<u8>,
}
