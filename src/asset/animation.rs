use serde::{Deserialize, Serialize};

/// Keyframe tracks for one target frame path. Samples are `(time, value)`
/// pairs and are not assumed to be sorted; rotation samples are Euler angles
/// in radians with the same axis convention as [`super::Frame::rotation`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    pub path: String,
    pub translations: Vec<(f32, [f32; 3])>,
    pub rotations: Vec<(f32, [f32; 3])>,
    pub scales: Vec<(f32, [f32; 3])>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    pub tracks: Vec<Track>,
}
