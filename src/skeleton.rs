use crate::types::Axis;
use log::warn;
use nalgebra::UnitQuaternion;
use nalgebra_glm as glm;

/// Index of a bone in its `Skeleton`. Only meaningful for the skeleton that
/// created it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct BoneId(pub usize);

/// A node in the bone hierarchy.
///
/// `rotation` holds Euler angles in radians applied as Rx * Ry * Rz, so z
/// acts first on a child offset and x last. `origin` holds the combined
/// transform of any non-bone nodes between this bone and its bone parent
/// (or the scene root) and is the identity for most bones.
#[derive(Clone, Debug)]
pub struct Bone {
    pub name: String,
    pub parent: Option<BoneId>,
    pub children: Vec<BoneId>,
    pub translation: glm::Vec3,
    pub rotation: glm::Vec3,
    pub scale: glm::Vec3,
    pub origin: glm::Mat4,
}

impl Bone {
    #[must_use]
    pub fn new(name: &str, translation: glm::Vec3) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            translation,
            rotation: glm::Vec3::zeros(),
            scale: glm::vec3(1.0, 1.0, 1.0),
            origin: glm::Mat4::identity(),
        }
    }

    /// Local transform relative to the bone parent, including `origin`
    #[must_use]
    pub fn local_matrix(&self) -> glm::Mat4 {
        let rot = quat_from_euler(&self.rotation);
        self.origin
            * glm::translation(&self.translation)
            * rot.to_homogeneous()
            * glm::scaling(&self.scale)
    }
}

/// Rotation for Euler angles applied as Rx * Ry * Rz
#[must_use]
pub fn quat_from_euler(euler: &glm::Vec3) -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&glm::Vec3::x_axis(), euler.x)
        * UnitQuaternion::from_axis_angle(&glm::Vec3::y_axis(), euler.y)
        * UnitQuaternion::from_axis_angle(&glm::Vec3::z_axis(), euler.z)
}

/// Converts a quaternion to the Euler angles used by `Bone::rotation`.
/// At gimbal lock (y = ±pi/2) the whole remaining rotation goes into x.
#[must_use]
pub fn euler_from_quat(q: &glm::Quat) -> glm::Vec3 {
    let rot = UnitQuaternion::from_quaternion(*q).to_rotation_matrix();
    let m = rot.matrix();
    let sin_y = m[(0, 2)].clamp(-1.0, 1.0);
    let y = sin_y.asin();
    if sin_y.abs() < 0.999_999 {
        glm::vec3(
            (-m[(1, 2)]).atan2(m[(2, 2)]),
            y,
            (-m[(0, 1)]).atan2(m[(0, 0)]),
        )
    } else {
        glm::vec3(m[(2, 1)].atan2(m[(1, 1)]), y, 0.0)
    }
}

/// Bone hierarchy of a loaded character. Bones are stored in insertion
/// order and a bone's parent is always added before the bone itself.
#[derive(Clone, Debug)]
pub struct Skeleton {
    bones: Vec<Bone>,
    placement: glm::Mat4,
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::new()
    }
}

impl Skeleton {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bones: Vec::new(),
            placement: glm::Mat4::identity(),
        }
    }

    /// Adds a bone under `parent`. An unknown parent is treated as no parent.
    pub fn add_bone(&mut self, parent: Option<BoneId>, mut bone: Bone) -> BoneId {
        let id = BoneId(self.bones.len());
        bone.parent = match parent {
            Some(p) if p.0 >= self.bones.len() => {
                warn!("bone {} has unknown parent {:?}", bone.name, p);
                None
            }
            _ => parent,
        };
        bone.children.clear();
        if let Some(p) = bone.parent {
            self.bones[p.0].children.push(id);
        }
        self.bones.push(bone);
        id
    }

    /// Model transform applied on top of the whole hierarchy
    pub fn set_placement(&mut self, placement: glm::Mat4) {
        self.placement = placement;
    }

    #[must_use]
    pub const fn placement(&self) -> &glm::Mat4 {
        &self.placement
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    #[must_use]
    pub fn bone(&self, id: BoneId) -> Option<&Bone> {
        self.bones.get(id.0)
    }

    #[must_use]
    pub fn name(&self, id: BoneId) -> Option<&str> {
        self.bone(id).map(|b| b.name.as_str())
    }

    #[must_use]
    pub fn parent(&self, id: BoneId) -> Option<BoneId> {
        self.bone(id).and_then(|b| b.parent)
    }

    #[must_use]
    pub fn children(&self, id: BoneId) -> &[BoneId] {
        self.bone(id).map(|b| b.children.as_slice()).unwrap_or_default()
    }

    pub fn roots(&self) -> impl Iterator<Item = BoneId> + '_ {
        self.bones
            .iter()
            .enumerate()
            .filter(|(_, b)| b.parent.is_none())
            .map(|(i, _)| BoneId(i))
    }

    /// First bone with exactly this name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<BoneId> {
        self.bones.iter().position(|b| b.name == name).map(BoneId)
    }

    /// Depth first, pre-order walk of every root in turn. Children are
    /// visited in their stored order.
    #[must_use]
    pub fn traverse(&self) -> Vec<BoneId> {
        let mut order = Vec::with_capacity(self.bones.len());
        let mut stack: Vec<BoneId> = self.roots().collect();
        stack.reverse();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        order
    }

    /// Local transform for a bone
    #[must_use]
    pub fn local_matrix(&self, id: BoneId) -> Option<glm::Mat4> {
        self.bone(id).map(Bone::local_matrix)
    }

    /// World transform, computed by walking the parent chain
    #[must_use]
    pub fn world_matrix(&self, id: BoneId) -> Option<glm::Mat4> {
        let mut bone = self.bone(id)?;
        let mut m = bone.local_matrix();
        while let Some(parent) = bone.parent {
            let Some(p) = self.bone(parent) else {
                break;
            };
            bone = p;
            m = bone.local_matrix() * m;
        }
        Some(self.placement * m)
    }

    #[must_use]
    pub fn world_position(&self, id: BoneId) -> Option<glm::Vec3> {
        self.world_matrix(id)
            .map(|m| glm::vec3(m[(0, 3)], m[(1, 3)], m[(2, 3)]))
    }

    #[must_use]
    pub fn rotation(&self, id: BoneId) -> Option<glm::Vec3> {
        self.bone(id).map(|b| b.rotation)
    }

    /// Writes one Euler component of a bone's rotation
    pub fn set_rotation(&mut self, id: BoneId, axis: Axis, value: f32) {
        if let Some(bone) = self.bones.get_mut(id.0) {
            bone.rotation[axis.index()] = value;
        }
    }

    /// Adds to all three Euler components of a bone's rotation
    pub fn offset_rotation(&mut self, id: BoneId, offset: &glm::Vec3) {
        if let Some(bone) = self.bones.get_mut(id.0) {
            bone.rotation += offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Bone, BoneId, Skeleton};
    use nalgebra_glm as glm;

    const EPSILON: f32 = 0.0001;

    fn chain() -> Skeleton {
        let mut sk = Skeleton::new();
        let a = sk.add_bone(None, Bone::new("a", glm::vec3(0.0, 1.0, 0.0)));
        let b = sk.add_bone(Some(a), Bone::new("b", glm::vec3(0.0, 1.0, 0.0)));
        sk.add_bone(Some(b), Bone::new("c", glm::vec3(1.0, 0.0, 0.0)));
        sk.add_bone(Some(a), Bone::new("d", glm::vec3(0.0, 0.0, 1.0)));
        sk
    }

    #[test]
    fn traverse_is_pre_order() {
        let sk = chain();
        let names: Vec<&str> =
            sk.traverse().into_iter().filter_map(|id| sk.name(id)).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn world_position_follows_parent_rotation() {
        let mut sk = chain();
        // Quarter turn about Z at the root swings +Y children to -X
        sk.set_rotation(BoneId(0), crate::types::Axis::Z, std::f32::consts::FRAC_PI_2);
        let b = sk.world_position(BoneId(1)).unwrap();
        let c = glm::equal_eps(&b, &glm::vec3(-1.0, 1.0, 0.0), EPSILON);
        assert!(c.x && c.y && c.z);
        let c_pos = sk.world_position(BoneId(2)).unwrap();
        let c = glm::equal_eps(&c_pos, &glm::vec3(-1.0, 2.0, 0.0), EPSILON);
        assert!(c.x && c.y && c.z);
    }

    #[test]
    fn placement_scales_world() {
        let mut sk = chain();
        sk.set_placement(glm::scaling(&glm::vec3(0.01, 0.01, 0.01)));
        let p = sk.world_position(BoneId(2)).unwrap();
        let c = glm::equal_eps(&p, &glm::vec3(0.01, 0.02, 0.0), EPSILON);
        assert!(c.x && c.y && c.z);
    }

    #[test]
    fn euler_round_trip() {
        for e in [
            glm::vec3(0.3f32, -0.7f32, 1.1f32),
            glm::vec3(-2.0, 1.2, -0.4),
            glm::vec3(0.4, 0.0, std::f32::consts::FRAC_PI_2),
        ] {
            let q = super::quat_from_euler(&e);
            let back = super::euler_from_quat(&q.into_inner());
            let c = glm::equal_eps(&e, &back, EPSILON);
            assert!(c.x && c.y && c.z, "{e:?} != {back:?}");
        }
    }

    /// X is applied last, so a bend about X after a quarter twist about Z
    /// leaves a +Y child on -X
    #[test]
    fn rotation_order_is_x_then_y_then_z() {
        let mut sk = Skeleton::new();
        let a = sk.add_bone(None, Bone::new("a", glm::Vec3::zeros()));
        let b = sk.add_bone(Some(a), Bone::new("b", glm::vec3(0.0, 1.0, 0.0)));
        sk.set_rotation(a, crate::types::Axis::X, 0.4);
        sk.set_rotation(a, crate::types::Axis::Z, std::f32::consts::FRAC_PI_2);
        let p = sk.world_position(b).unwrap();
        let c = glm::equal_eps(&p, &glm::vec3(-1.0, 0.0, 0.0), EPSILON);
        assert!(c.x && c.y && c.z, "{p:?}");

        // A bend alone tips the child towards +Z
        sk.set_rotation(a, crate::types::Axis::Z, 0.0);
        let p = sk.world_position(b).unwrap();
        let tipped = glm::vec3(0.0, 0.4f32.cos(), 0.4f32.sin());
        let c = glm::equal_eps(&p, &tipped, EPSILON);
        assert!(c.x && c.y && c.z, "{p:?}");
    }

    #[test]
    fn unknown_parent_becomes_root() {
        let mut sk = Skeleton::new();
        let id = sk.add_bone(Some(BoneId(7)), Bone::new("x", glm::Vec3::zeros()));
        assert_eq!(sk.parent(id), None);
        assert_eq!(sk.roots().count(), 1);
    }
}
