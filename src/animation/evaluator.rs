use nalgebra_glm as glm;

use crate::asset::AnimationClip;
use crate::error::VisError;
use crate::pose::Pose;

use super::keyframe::{Boundary, Keyframe, sample};
use super::transform::{compose_trs, quat_from_euler};

/// Keyframe tracks for one animated bone. Rotation samples are converted to
/// quaternions once, at load time; every track is sorted by ascending time.
#[derive(Debug, Clone)]
pub struct Channel {
    pub bone_id: i32,
    pub translations: Vec<Keyframe<glm::Vec3>>,
    pub rotations: Vec<Keyframe<glm::Quat>>,
    pub scales: Vec<Keyframe<glm::Vec3>>,
}

/// Evaluates an animation clip against a pose.
///
/// Built once per clip from the bind pose; `apply_to` is then called with a
/// pose clone and a playback time each frame.
#[derive(Debug, Clone)]
pub struct Animator {
    channels: Vec<Channel>,
    boundary: Boundary,
    duration: f32,
}

fn sort_track<T>(track: &mut [Keyframe<T>]) {
    track.sort_by(|a, b| a.time.total_cmp(&b.time));
}

fn track_end<T>(track: &[Keyframe<T>]) -> f32 {
    track.last().map_or(0.0, |k| k.time)
}

impl Animator {
    /// Resolves every track path through the pose and builds the channels.
    /// An unresolved path is fatal: the clip targets a different skeleton.
    pub fn new(pose: &Pose, clip: &AnimationClip) -> Result<Self, VisError> {
        let mut channels = Vec::with_capacity(clip.tracks.len());
        let mut duration: f32 = 0.0;

        for track in &clip.tracks {
            let bone_id = pose.id_from_path(Some(&track.path));
            if bone_id < 0 {
                return Err(VisError::new("anim-path-missing")
                    .with_arg("path", &track.path)
                    .with_arg("clip", &clip.name));
            }

            let mut translations: Vec<_> = track
                .translations
                .iter()
                .map(|&(time, v)| Keyframe {
                    time,
                    value: glm::make_vec3(&v),
                })
                .collect();
            let mut rotations: Vec<_> = track
                .rotations
                .iter()
                .map(|&(time, euler)| Keyframe {
                    time,
                    value: quat_from_euler(&euler),
                })
                .collect();
            let mut scales: Vec<_> = track
                .scales
                .iter()
                .map(|&(time, v)| Keyframe {
                    time,
                    value: glm::make_vec3(&v),
                })
                .collect();

            sort_track(&mut translations);
            sort_track(&mut rotations);
            sort_track(&mut scales);

            duration = duration
                .max(track_end(&translations))
                .max(track_end(&rotations))
                .max(track_end(&scales));

            channels.push(Channel {
                bone_id,
                translations,
                rotations,
                scales,
            });
        }

        Ok(Self {
            channels,
            boundary: Boundary::default(),
            duration,
        })
    }

    /// Out-of-range evaluation policy, [`Boundary::Wrap`] by default.
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Latest keyframe time across all tracks; drives the playback slider.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Evaluates every channel at `time` and writes the composed local
    /// transforms into `pose`. Empty tracks leave their component at the
    /// zero/identity default.
    pub fn apply_to(&self, pose: &mut Pose, time: f32) {
        for channel in &self.channels {
            let translation = sample(&channel.translations, time, self.boundary, |a, b, f| {
                glm::lerp(a, b, f)
            })
            .unwrap_or_else(glm::Vec3::zeros);

            let rotation = sample(&channel.rotations, time, self.boundary, |a, b, f| {
                glm::quat_slerp(a, b, f)
            })
            .unwrap_or_else(glm::quat_identity);

            let scale = sample(&channel.scales, time, self.boundary, |a, b, f| {
                glm::lerp(a, b, f)
            })
            .unwrap_or_else(|| glm::vec3(1.0, 1.0, 1.0));

            pose.set_transform(channel.bone_id, compose_trs(&translation, &rotation, &scale));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Track;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    fn arm_pose() -> Pose {
        let mut pose = Pose::new();
        pose.insert_node(-1, "R").unwrap();
        pose.insert_node(0, "R/arm").unwrap();
        pose
    }

    fn clip_with(track: Track) -> AnimationClip {
        AnimationClip {
            name: "walk".to_string(),
            tracks: vec![track],
        }
    }

    #[test]
    fn unresolved_track_path_is_fatal() {
        let pose = arm_pose();
        let clip = clip_with(Track {
            path: "R/tail".to_string(),
            ..Default::default()
        });

        let err = Animator::new(&pose, &clip).unwrap_err();
        assert_eq!(err.key, "anim-path-missing");
        assert_eq!(err.args.get("path").map(String::as_str), Some("R/tail"));
    }

    #[test]
    fn single_keyframe_holds_its_value() {
        let pose = arm_pose();
        let clip = clip_with(Track {
            path: "R/arm".to_string(),
            translations: vec![(0.0, [1.0, 0.0, 0.0])],
            ..Default::default()
        });
        let animator = Animator::new(&pose, &clip).unwrap();

        for t in [-3.0, 0.0, 0.5, 42.0] {
            let mut posed = pose.clone();
            animator.apply_to(&mut posed, t);
            assert_relative_eq!(
                posed.transform(1),
                glm::translation(&glm::vec3(1.0, 0.0, 0.0)),
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn translation_lerps_between_keys() {
        let pose = arm_pose();
        let clip = clip_with(Track {
            path: "R/arm".to_string(),
            translations: vec![(0.0, [0.0, 0.0, 0.0]), (10.0, [10.0, 0.0, 0.0])],
            ..Default::default()
        });
        let animator = Animator::new(&pose, &clip).unwrap();

        for (t, x) in [(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)] {
            let mut posed = pose.clone();
            animator.apply_to(&mut posed, t);
            assert_relative_eq!(
                posed.transform(1),
                glm::translation(&glm::vec3(x, 0.0, 0.0)),
                epsilon = 1e-5
            );
        }
    }

    #[test]
    fn rotation_slerps_between_keys() {
        let pose = arm_pose();
        let clip = clip_with(Track {
            path: "R/arm".to_string(),
            rotations: vec![(0.0, [0.0, 0.0, 0.0]), (1.0, [0.0, 0.0, PI])],
            ..Default::default()
        });
        let animator = Animator::new(&pose, &clip).unwrap();

        let mut posed = pose.clone();
        animator.apply_to(&mut posed, 0.5);
        // Halfway to a half-turn about Z: +X lands on +Y.
        let v = posed.transform(1) * glm::vec4(1.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(v, glm::vec4(0.0, 1.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn unsorted_input_keys_are_sorted() {
        let pose = arm_pose();
        let clip = clip_with(Track {
            path: "R/arm".to_string(),
            translations: vec![(10.0, [10.0, 0.0, 0.0]), (0.0, [0.0, 0.0, 0.0])],
            ..Default::default()
        });
        let animator = Animator::new(&pose, &clip).unwrap();
        assert_relative_eq!(animator.duration(), 10.0);

        let mut posed = pose.clone();
        animator.apply_to(&mut posed, 5.0);
        assert_relative_eq!(
            posed.transform(1),
            glm::translation(&glm::vec3(5.0, 0.0, 0.0)),
            epsilon = 1e-5
        );
    }

    #[test]
    fn empty_tracks_fall_back_to_identity_components() {
        let pose = arm_pose();
        let clip = clip_with(Track {
            path: "R/arm".to_string(),
            translations: vec![(0.0, [2.0, 0.0, 0.0])],
            ..Default::default()
        });
        let animator = Animator::new(&pose, &clip).unwrap();

        let mut posed = pose.clone();
        animator.apply_to(&mut posed, 0.0);
        // No rotation or scale keys: pure translation.
        assert_relative_eq!(
            posed.transform(1),
            glm::translation(&glm::vec3(2.0, 0.0, 0.0)),
            epsilon = 1e-6
        );
    }

    #[test]
    fn clamp_boundary_holds_last_key() {
        let pose = arm_pose();
        let clip = clip_with(Track {
            path: "R/arm".to_string(),
            translations: vec![(0.0, [0.0, 0.0, 0.0]), (1.0, [4.0, 0.0, 0.0])],
            ..Default::default()
        });
        let animator = Animator::new(&pose, &clip)
            .unwrap()
            .with_boundary(Boundary::Clamp);

        let mut posed = pose.clone();
        animator.apply_to(&mut posed, 9.0);
        assert_relative_eq!(
            posed.transform(1),
            glm::translation(&glm::vec3(4.0, 0.0, 0.0)),
            epsilon = 1e-6
        );
    }
}
