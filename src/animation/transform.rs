// Transform composition helpers shared by the keyframe evaluator and model
// assembly, so the animated pose and the rest pose use one convention.

use nalgebra_glm as glm;

/// Orientation from Euler angles `[x, y, z]` (yaw, pitch, roll in radians).
///
/// Fixed composition order: roll (Z), then pitch (Y), then yaw (X), applied
/// right-to-left. This matches the coordinate convention the meshes are
/// exported with.
pub fn quat_from_euler(rotation: &[f32; 3]) -> glm::Quat {
    let yaw = glm::quat_angle_axis(rotation[0], &glm::vec3(1.0, 0.0, 0.0));
    let pitch = glm::quat_angle_axis(rotation[1], &glm::vec3(0.0, 1.0, 0.0));
    let roll = glm::quat_angle_axis(rotation[2], &glm::vec3(0.0, 0.0, 1.0));
    yaw * pitch * roll
}

/// Local transform from translation, rotation and scale, scale applied
/// first: `T * R * S` in column-vector convention.
pub fn compose_trs(translation: &glm::Vec3, rotation: &glm::Quat, scale: &glm::Vec3) -> glm::Mat4 {
    glm::translation(translation) * glm::quat_to_mat4(rotation) * glm::scaling(scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn euler_applies_roll_before_pitch_and_yaw() {
        // Roll 90 deg about Z maps +X to +Y; a following pitch 90 deg about
        // Y must leave that +Y untouched.
        let q = quat_from_euler(&[0.0, FRAC_PI_2, FRAC_PI_2]);
        let m = glm::quat_to_mat4(&q);
        let v = m * glm::vec4(1.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(v, glm::vec4(0.0, 1.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn trs_applies_scale_first() {
        let m = compose_trs(
            &glm::vec3(1.0, 0.0, 0.0),
            &glm::quat_angle_axis(FRAC_PI_2, &glm::vec3(0.0, 0.0, 1.0)),
            &glm::vec3(2.0, 2.0, 2.0),
        );
        // (1,0,0) scaled to (2,0,0), rotated to (0,2,0), translated by (1,0,0).
        let v = m * glm::vec4(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(v, glm::vec4(1.0, 2.0, 0.0, 1.0), epsilon = 1e-5);
    }
}
