use crate::types::CameraTrait;
use nalgebra_glm as glm;

const NEAR_CLIP_METERS: f32 = 0.1;
const FAR_CLIP_METERS: f32 = 1000.0;

/// Orbit pitch stops this far short of straight up or down
const PITCH_LIMIT: f32 = 0.01;

/// Orbit never gets closer to the target than this
const MIN_DISTANCE: f32 = 0.05;

#[derive(Debug, Copy, Clone)]
pub struct Properties {
    pub aspect_ratio: f32,
    pub fovy: f32,
    pub position: glm::Vec3,
    pub target: glm::Vec3,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0f32 / 9.0f32,
            fovy: 60.0f32.to_radians(),
            position: glm::vec3(2.0f32, 2.0f32, 5.0f32),
            target: glm::vec3(0.0f32, 1.0f32, 0.0f32),
        }
    }
}

/// Perspective camera, +Y up and right handed.
///
/// The projection matrix depends on both fovy and aspect ratio, so both are
/// stored so that a caller can change one without having to know the other.
/// The view matrix depends on both position and target, so both are stored
/// so that a caller can change one without having to know the other.
#[derive(Debug, Copy, Clone)]
pub struct Camera {
    aspect_ratio: f32,
    fovy: f32,
    position: glm::Vec3,
    target: glm::Vec3,
    view: glm::Mat4,
    proj: glm::Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Properties::default())
    }
}

impl CameraTrait for Camera {
    fn view_matrix(&self) -> glm::Mat4 {
        self.view
    }

    fn proj_matrix(&self) -> glm::Mat4 {
        self.proj
    }
}

impl Camera {
    #[must_use]
    pub fn new(properties: Properties) -> Self {
        Self {
            aspect_ratio: properties.aspect_ratio,
            fovy: properties.fovy,
            position: properties.position,
            target: properties.target,
            view: Self::build_view(&properties.position, &properties.target),
            proj: Self::build_proj(properties.aspect_ratio, properties.fovy),
        }
    }

    pub fn aspect_ratio(&mut self, aspect_ratio: f32) {
        self.proj = Self::build_proj(aspect_ratio, self.fovy);
        self.aspect_ratio = aspect_ratio;
    }

    pub fn zoom(&mut self, fovy: f32) {
        self.proj = Self::build_proj(self.aspect_ratio, fovy);
        self.fovy = fovy;
    }

    pub fn position(&mut self, position: &glm::Vec3) {
        self.view = Self::build_view(position, &self.target);
        self.position = *position;
    }

    pub fn target(&mut self, target: &glm::Vec3) {
        self.view = Self::build_view(&self.position, target);
        self.target = *target;
    }

    pub fn update_view(&mut self, position: glm::Vec3, target: glm::Vec3) {
        self.view = Self::build_view(&position, &target);
        self.position = position;
        self.target = target;
    }

    #[must_use]
    pub const fn eye(&self) -> &glm::Vec3 {
        &self.position
    }

    #[must_use]
    pub const fn look_target(&self) -> &glm::Vec3 {
        &self.target
    }

    /// Rotates the camera around its target. Yaw turns about +Y, pitch
    /// tilts towards the poles and is clamped just short of them.
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let offset = self.position - self.target;
        let radius = offset.norm();
        if radius < f32::EPSILON {
            return;
        }
        let current_yaw = offset.x.atan2(offset.z);
        let current_pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
        let limit = std::f32::consts::FRAC_PI_2 - PITCH_LIMIT;
        let new_yaw = current_yaw + yaw;
        let new_pitch = (current_pitch + pitch).clamp(-limit, limit);
        let offset = glm::vec3(
            radius * new_pitch.cos() * new_yaw.sin(),
            radius * new_pitch.sin(),
            radius * new_pitch.cos() * new_yaw.cos(),
        );
        self.position(&(self.target + offset));
    }

    /// Scales the distance to the target, `factor < 1` moves closer
    pub fn dolly(&mut self, factor: f32) {
        let offset = self.position - self.target;
        let radius = (offset.norm() * factor).max(MIN_DISTANCE);
        if let Some(dir) = offset.try_normalize(f32::EPSILON) {
            self.position(&(self.target + dir * radius));
        }
    }

    /// Projects a world point to normalized device coordinates. Returns
    /// `None` for points behind the camera.
    #[must_use]
    pub fn project(&self, point: &glm::Vec3) -> Option<glm::Vec2> {
        let clip = self.proj * self.view * glm::vec4(point.x, point.y, point.z, 1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(glm::vec2(clip.x / clip.w, clip.y / clip.w))
    }

    fn build_proj(aspect_ratio: f32, fovy: f32) -> glm::Mat4 {
        glm::perspective(aspect_ratio, fovy, NEAR_CLIP_METERS, FAR_CLIP_METERS)
    }

    fn build_view(position: &glm::Vec3, target: &glm::Vec3) -> glm::Mat4 {
        glm::look_at(position, target, &glm::vec3(0.0, 1.0, 0.0))
    }
}
