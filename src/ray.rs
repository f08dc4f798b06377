use crate::proxy::{Cylinder, Proxy};
use nalgebra::UnitQuaternion;
use nalgebra_glm as glm;

/// Below this a ray component or scale factor is treated as zero
const EPSILON: f32 = 1.0e-8;

/// A half line `origin + t * direction` for `t >= 0`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: glm::Vec3,
    pub direction: glm::Vec3,
}

impl Ray {
    /// Unprojects a point in normalized device coordinates at the near and
    /// far planes. The direction is normalized so ray parameters are world
    /// distances from the near plane.
    #[must_use]
    pub fn from_ndc(
        view: &glm::Mat4,
        proj: &glm::Mat4,
        ndc: &glm::Vec2,
    ) -> Option<Self> {
        let inverse = (proj * view).try_inverse()?;
        let unproject = |z: f32| {
            let p = inverse * glm::vec4(ndc.x, ndc.y, z, 1.0);
            if p.w.abs() < EPSILON {
                None
            } else {
                Some(glm::vec3(p.x / p.w, p.y / p.w, p.z / p.w))
            }
        };
        let near = unproject(-1.0)?;
        let far = unproject(1.0)?;
        let direction = (far - near).try_normalize(EPSILON)?;
        Some(Self {
            origin: near,
            direction,
        })
    }

    #[must_use]
    pub fn at(&self, t: f32) -> glm::Vec3 {
        self.origin + self.direction * t
    }

    /// Smallest non-negative ray parameter where the ray meets a closed
    /// cylinder centred on the origin along +Y. The direction does not need
    /// to be normalized.
    #[must_use]
    pub fn intersect_cylinder(&self, cylinder: &Cylinder) -> Option<f32> {
        let o = &self.origin;
        let d = &self.direction;
        let half = cylinder.height * 0.5;
        let r2 = cylinder.radius * cylinder.radius;
        let mut best: Option<f32> = None;
        let mut consider = |t: f32| {
            if t >= 0.0 && best.map_or(true, |b| t < b) {
                best = Some(t);
            }
        };

        // Side wall
        let a = d.x * d.x + d.z * d.z;
        if a > EPSILON {
            let b = 2.0 * (o.x * d.x + o.z * d.z);
            let c = o.x * o.x + o.z * o.z - r2;
            let disc = b * b - 4.0 * a * c;
            if disc >= 0.0 {
                let root = disc.sqrt();
                for t in [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)] {
                    let y = o.y + t * d.y;
                    if y.abs() <= half {
                        consider(t);
                    }
                }
            }
        }

        // End caps
        if d.y.abs() > EPSILON {
            for cap in [-half, half] {
                let t = (cap - o.y) / d.y;
                let x = o.x + t * d.x;
                let z = o.z + t * d.z;
                if x * x + z * z <= r2 {
                    consider(t);
                }
            }
        }
        best
    }

    /// Intersects with a proxy by moving the ray into the proxy's local
    /// space. The inverse transform is affine so the ray parameter is the
    /// same in both spaces.
    #[must_use]
    pub fn intersect_proxy(&self, proxy: &Proxy) -> Option<f32> {
        if proxy.shape.height <= 0.0
            || proxy.scale.iter().any(|s| s.abs() < EPSILON)
        {
            return None;
        }
        let inv_rot = UnitQuaternion::from_quaternion(proxy.orientation).inverse();
        let inv_scale = glm::vec3(
            1.0 / proxy.scale.x,
            1.0 / proxy.scale.y,
            1.0 / proxy.scale.z,
        );
        let local = Self {
            origin: (inv_rot * (self.origin - proxy.position))
                .component_mul(&inv_scale),
            direction: (inv_rot * self.direction).component_mul(&inv_scale),
        };
        local.intersect_cylinder(&proxy.shape)
    }
}
