use crate::{
    config::RoleNames,
    skeleton::{BoneId, Skeleton},
};
use ahash::{HashMap, HashMapExt};
use log::{debug, info};

/// Bones the arm wave cares about
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BoneRole {
    Shoulder,
    UpperArm,
    LowerArm,
    Palm,
}

impl BoneRole {
    pub const ALL: [Self; 4] =
        [Self::Shoulder, Self::UpperArm, Self::LowerArm, Self::Palm];

    fn pattern(self, names: &RoleNames) -> &str {
        match self {
            Self::Shoulder => &names.shoulder,
            Self::UpperArm => &names.upper_arm,
            Self::LowerArm => &names.lower_arm,
            Self::Palm => &names.palm,
        }
    }
}

/// Lookup table from role to bone. A role is absent when the rig has no
/// matching bone, so every lookup returns an `Option`.
#[derive(Clone, Debug, Default)]
pub struct RoleBindings(HashMap<BoneRole, BoneId>);

impl RoleBindings {
    /// Walks the skeleton once and binds each role to the first bone whose
    /// name ends with the configured name for that role
    #[must_use]
    pub fn classify(skeleton: &Skeleton, names: &RoleNames) -> Self {
        let mut map = HashMap::new();
        for id in skeleton.traverse() {
            let Some(name) = skeleton.name(id) else {
                continue;
            };
            for role in BoneRole::ALL {
                let pattern = role.pattern(names);
                if pattern.is_empty() || map.contains_key(&role) {
                    continue;
                }
                if name.ends_with(pattern) {
                    debug!("role {:?} bound to bone {} {:?}", role, name, id);
                    map.insert(role, id);
                }
            }
        }
        info!("bound {} of {} bone roles", map.len(), BoneRole::ALL.len());
        Self(map)
    }

    #[must_use]
    pub fn get(&self, role: BoneRole) -> Option<BoneId> {
        self.0.get(&role).copied()
    }

    pub fn set(&mut self, role: BoneRole, id: BoneId) {
        self.0.insert(role, id);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{BoneRole, RoleBindings};
    use crate::{
        config::RoleNames,
        skeleton::{Bone, Skeleton},
    };
    use nalgebra_glm as glm;

    fn arm() -> Skeleton {
        let mut sk = Skeleton::new();
        let spine = sk.add_bone(None, Bone::new("mixamorigSpine", glm::Vec3::zeros()));
        let sh = sk.add_bone(
            Some(spine),
            Bone::new("mixamorigRightShoulder", glm::vec3(0.1, 0.0, 0.0)),
        );
        let up = sk.add_bone(
            Some(sh),
            Bone::new("mixamorigRightArm", glm::vec3(0.1, 0.0, 0.0)),
        );
        sk.add_bone(
            Some(up),
            Bone::new("mixamorigRightForeArm", glm::vec3(0.3, 0.0, 0.0)),
        );
        sk
    }

    #[test]
    fn suffix_match_does_not_confuse_arm_names() {
        let sk = arm();
        let roles = RoleBindings::classify(&sk, &RoleNames::default());
        let name = |r| roles.get(r).and_then(|id| sk.name(id));
        assert_eq!(name(BoneRole::Shoulder), Some("mixamorigRightShoulder"));
        assert_eq!(name(BoneRole::UpperArm), Some("mixamorigRightArm"));
        assert_eq!(name(BoneRole::LowerArm), Some("mixamorigRightForeArm"));
        assert_eq!(roles.get(BoneRole::Palm), None);
        assert_eq!(roles.len(), 3);
    }

    #[test]
    fn empty_pattern_never_binds() {
        let sk = arm();
        let names = RoleNames {
            shoulder: String::new(),
            ..RoleNames::default()
        };
        let roles = RoleBindings::classify(&sk, &names);
        assert_eq!(roles.get(BoneRole::Shoulder), None);
    }
}
