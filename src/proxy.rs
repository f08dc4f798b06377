use crate::skeleton::{BoneId, Skeleton};
use log::{debug, info, trace};
use nalgebra::UnitQuaternion;
use nalgebra_glm as glm;

/// Anything with a dot product this close to -1 is treated as pointing
/// straight down the reference axis
const ANTI_PARALLEL_EPSILON: f32 = 1.0e-6;

/// Shorter segments have no usable direction
const LENGTH_EPSILON: f32 = 1.0e-6;

/// Axis that an unrotated proxy cylinder runs along
#[must_use]
pub fn reference_axis() -> glm::Vec3 {
    glm::Vec3::y()
}

/// Rotation taking the reference axis onto `direction`.
///
/// The shortest arc has no defined axis when `direction` points opposite
/// the reference axis, so that case is a half turn about +X. A zero length
/// direction gives the identity.
#[must_use]
pub fn orientation(direction: &glm::Vec3) -> glm::Quat {
    let length = direction.norm();
    if length < LENGTH_EPSILON {
        return glm::Quat::identity();
    }
    let dir = direction / length;
    let axis = reference_axis();
    if axis.dot(&dir) < -1.0 + ANTI_PARALLEL_EPSILON {
        return glm::quat_angle_axis(std::f32::consts::PI, &glm::Vec3::x());
    }
    UnitQuaternion::rotation_between(&axis, &dir)
        .map_or_else(glm::Quat::identity, UnitQuaternion::into_inner)
}

/// Hit test primitive. The cylinder is centred on the origin and runs from
/// `-height / 2` to `height / 2` along the reference axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cylinder {
    pub radius: f32,
    pub height: f32,
}

/// Invisible hit test volume spanning a bone and its first child.
/// `shape.height` is the segment length when the proxy was built (or first
/// became non-zero), and the current length is expressed through `scale.y`.
#[derive(Clone, Debug)]
pub struct Proxy {
    pub bone: BoneId,
    pub shape: Cylinder,
    pub position: glm::Vec3,
    pub orientation: glm::Quat,
    pub scale: glm::Vec3,
}

impl Proxy {
    /// Translate * rotate * scale
    #[must_use]
    pub fn model_matrix(&self) -> glm::Mat4 {
        glm::translation(&self.position)
            * glm::quat_to_mat4(&self.orientation)
            * glm::scaling(&self.scale)
    }
}

/// World space start and end of the segment from a bone to its first child
fn segment(skeleton: &Skeleton, bone: BoneId) -> Option<(glm::Vec3, glm::Vec3)> {
    let child = *skeleton.children(bone).first()?;
    Some((skeleton.world_position(bone)?, skeleton.world_position(child)?))
}

/// Owns the proxies for one skeleton and keeps them on the current pose
#[derive(Clone, Debug, Default)]
pub struct ProxyManager {
    proxies: Vec<Proxy>,
}

impl ProxyManager {
    /// Creates one proxy for every bone that has at least one child
    #[must_use]
    pub fn build(skeleton: &Skeleton, radius: f32) -> Self {
        let mut proxies = Vec::new();
        for bone in skeleton.traverse() {
            let Some((start, end)) = segment(skeleton, bone) else {
                continue;
            };
            let length = glm::distance(&start, &end);
            trace!("proxy for {:?} length={}", skeleton.name(bone), length);
            proxies.push(Proxy {
                bone,
                shape: Cylinder {
                    radius,
                    height: length,
                },
                position: (start + end) * 0.5,
                orientation: orientation(&(end - start)),
                scale: glm::vec3(1.0, 1.0, 1.0),
            });
        }
        info!(
            "built {} proxies for {} bones, radius={}",
            proxies.len(),
            skeleton.len(),
            radius
        );
        Self { proxies }
    }

    /// Recomputes every proxy transform from the current bone positions
    pub fn update(&mut self, skeleton: &Skeleton) {
        for proxy in &mut self.proxies {
            let Some((start, end)) = segment(skeleton, proxy.bone) else {
                debug!("no segment for proxy bone {:?}", proxy.bone);
                continue;
            };
            let length = glm::distance(&start, &end);
            proxy.position = (start + end) * 0.5;
            proxy.orientation = orientation(&(end - start));
            // A proxy built on a zero length segment takes its first usable
            // length as its height
            if proxy.shape.height <= LENGTH_EPSILON && length > LENGTH_EPSILON {
                debug!("proxy for {:?} now has length {}", proxy.bone, length);
                proxy.shape.height = length;
            }
            // Only the length axis is rescaled, the radius stays as built
            proxy.scale.y = if proxy.shape.height > LENGTH_EPSILON {
                length / proxy.shape.height
            } else {
                1.0
            };
        }
    }

    #[must_use]
    pub fn proxies(&self) -> &[Proxy] {
        &self.proxies
    }

    #[must_use]
    pub fn find(&self, bone: BoneId) -> Option<&Proxy> {
        self.proxies.iter().find(|p| p.bone == bone)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::orientation;
    use nalgebra_glm as glm;

    const EPSILON: f32 = 0.0001;

    fn maps_axis_to(dir: glm::Vec3) {
        let q = orientation(&dir);
        let v = glm::quat_rotate_vec3(&q, &glm::Vec3::y());
        let c = glm::equal_eps(&v, &dir.normalize(), EPSILON);
        assert!(c.x && c.y && c.z, "{v:?} != {dir:?}");
    }

    #[test]
    fn parallel_is_identity() {
        let q = orientation(&glm::vec3(0.0, 2.5, 0.0));
        let c = glm::quat_equal_eps(&q, &glm::Quat::identity(), EPSILON);
        assert!(c.x && c.y && c.z && c.w);
    }

    #[test]
    fn anti_parallel_is_half_turn() {
        let q = orientation(&glm::vec3(0.0, -1.0, 0.0));
        assert!(q.coords.iter().all(|x| x.is_finite()));
        assert!((q.norm() - 1.0).abs() < EPSILON);
        maps_axis_to(glm::vec3(0.0, -1.0, 0.0));
    }

    #[test]
    fn general_directions() {
        maps_axis_to(glm::vec3(1.0, 0.0, 0.0));
        maps_axis_to(glm::vec3(0.0, 0.0, -3.0));
        maps_axis_to(glm::vec3(0.3, -0.8, 0.2));
        maps_axis_to(glm::vec3(1.0e-2, -1.0, 0.0));
    }

    #[test]
    fn zero_direction_is_identity() {
        let q = orientation(&glm::Vec3::zeros());
        assert_eq!(q, glm::Quat::identity());
    }
}
