// Keyframe animation: per-bone channels evaluated against a pose.

mod evaluator;
mod keyframe;
mod transform;

pub use evaluator::{Animator, Channel};
pub use keyframe::{Boundary, Keyframe};
pub use transform::{compose_trs, quat_from_euler};
