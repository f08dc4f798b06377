use crate::ray::Ray;
use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};
use winit::event::{ElementState, VirtualKeyCode};

/// Trait for something that handles keyboard input events
pub trait KeyboardHandler {
    fn input(&mut self, keycode: VirtualKeyCode, state: ElementState);
}

/// Trait for camera matrices, needed for rendering and for picking
pub trait CameraTrait {
    fn view_matrix(&self) -> glm::Mat4;
    fn proj_matrix(&self) -> glm::Mat4;

    /// World space ray through a point in normalized device coordinates.
    /// Returns `None` if the camera matrices can't be inverted.
    fn ray(&self, ndc: &glm::Vec2) -> Option<Ray> {
        Ray::from_ndc(&self.view_matrix(), &self.proj_matrix(), ndc)
    }
}

/// Local coordinate axis of a bone, used to select a rotation component
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Index into a `glm::Vec3`
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}
