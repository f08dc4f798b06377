use crate::{
    config::WaveParams,
    roles::{BoneRole, RoleBindings},
    skeleton::Skeleton,
};
use log::{debug, info};
use nalgebra_glm as glm;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum AnimationState {
    #[default]
    Idle,
    Active,
}

/// Open loop arm wave. While active the lower arm pose is a pure function of
/// elapsed time, so calling `tick` twice with the same time writes the same
/// rotations. Going idle leaves the last written pose in place.
#[derive(Clone, Debug, Default)]
pub struct AnimationController {
    state: AnimationState,
    params: WaveParams,
}

impl AnimationController {
    #[must_use]
    pub fn new(params: WaveParams) -> Self {
        Self {
            state: AnimationState::Idle,
            params,
        }
    }

    #[must_use]
    pub const fn state(&self) -> AnimationState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == AnimationState::Active
    }

    #[must_use]
    pub const fn params(&self) -> &WaveParams {
        &self.params
    }

    pub fn toggle(&mut self) {
        self.state = match self.state {
            AnimationState::Idle => AnimationState::Active,
            AnimationState::Active => AnimationState::Idle,
        };
        info!("animation {:?}", self.state);
    }

    /// Bend and twist rotations for the lower arm at `elapsed` seconds
    #[must_use]
    pub fn lower_arm_pose(&self, elapsed: f32) -> (f32, f32) {
        let p = &self.params;
        let bend = (elapsed * p.bend_frequency).sin() * p.bend_amplitude;
        let twist =
            p.base_twist + (elapsed * p.twist_frequency).sin() * p.twist_amplitude;
        (bend, twist)
    }

    /// Writes the lower arm rotations. Does nothing while idle or when the
    /// rig has no lower arm.
    pub fn tick(
        &self,
        elapsed: f32,
        skeleton: &mut Skeleton,
        bindings: &RoleBindings,
    ) {
        if !self.is_active() {
            return;
        }
        let Some(lower_arm) = bindings.get(BoneRole::LowerArm) else {
            return;
        };
        let (bend, twist) = self.lower_arm_pose(elapsed);
        skeleton.set_rotation(lower_arm, self.params.bend_axis, bend);
        skeleton.set_rotation(lower_arm, self.params.twist_axis, twist);
    }

    /// One time offsets for the shoulder and upper arm, applied after load
    /// to lift the arm into a waving position
    pub fn pose_arm(&self, skeleton: &mut Skeleton, bindings: &RoleBindings) {
        let offsets = [
            (BoneRole::Shoulder, self.params.shoulder_offset),
            (BoneRole::UpperArm, self.params.upper_arm_offset),
        ];
        for (role, offset) in offsets {
            if let Some(id) = bindings.get(role) {
                debug!("posing {:?} offset={:?}", role, offset);
                skeleton.offset_rotation(id, &glm::Vec3::from(offset));
            }
        }
    }
}
