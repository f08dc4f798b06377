//! Shared helpers for the integration tests
#![allow(dead_code)]

use nalgebra_glm as glm;
use rigview::skeleton::{Bone, BoneId, Skeleton};
use std::sync::Once;

pub const EPSILON: f32 = 0.0001f32; // Small value for float comparisons
static INIT: Once = Once::new();

/// Initializes logging in a "once per test run" manner. Call at the start of
/// each test that needs logging.
pub fn init_tests() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

pub fn assert_vec3_eq(a: &glm::Vec3, b: &glm::Vec3) {
    let c = glm::equal_eps(a, b, EPSILON);
    assert!(c.x && c.y && c.z, "{a:?} != {b:?}");
}

/// A -> B -> C with C a leaf
pub fn abc() -> (Skeleton, [BoneId; 3]) {
    let mut sk = Skeleton::new();
    let a = sk.add_bone(None, Bone::new("A", glm::vec3(0.0, 0.0, 0.0)));
    let b = sk.add_bone(Some(a), Bone::new("B", glm::vec3(0.0, 1.0, 0.0)));
    let c = sk.add_bone(Some(b), Bone::new("C", glm::vec3(1.0, 0.0, 0.0)));
    (sk, [a, b, c])
}

/// Spine with a right arm using Mixamo names
pub fn arm_rig() -> Skeleton {
    let mut sk = Skeleton::new();
    let hips = sk.add_bone(None, Bone::new("mixamorigHips", glm::vec3(0.0, 1.0, 0.0)));
    let spine = sk.add_bone(
        Some(hips),
        Bone::new("mixamorigSpine", glm::vec3(0.0, 0.4, 0.0)),
    );
    let shoulder = sk.add_bone(
        Some(spine),
        Bone::new("mixamorigRightShoulder", glm::vec3(-0.1, 0.1, 0.0)),
    );
    let upper = sk.add_bone(
        Some(shoulder),
        Bone::new("mixamorigRightArm", glm::vec3(-0.1, 0.0, 0.0)),
    );
    let lower = sk.add_bone(
        Some(upper),
        Bone::new("mixamorigRightForeArm", glm::vec3(-0.25, 0.0, 0.0)),
    );
    let hand = sk.add_bone(
        Some(lower),
        Bone::new("mixamorigRightHand", glm::vec3(-0.25, 0.0, 0.0)),
    );
    sk.add_bone(
        Some(hand),
        Bone::new("mixamorigRightHandIndex1", glm::vec3(-0.08, 0.0, 0.0)),
    );
    sk
}
