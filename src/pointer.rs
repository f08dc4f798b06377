use log::trace;
use nalgebra_glm as glm;
use winit::dpi::{PhysicalPosition, PhysicalSize};

/// Latest pointer position in normalized device coordinates. Input events
/// overwrite it and the frame loop reads it once per frame. There is no
/// sample until the pointer first moves over the window.
#[derive(Copy, Clone, Debug, Default)]
pub struct Pointer {
    sample: Option<glm::Vec2>,
}

impl Pointer {
    #[must_use]
    pub const fn new() -> Self {
        Self { sample: None }
    }

    /// Stores a sample, clamped to [-1, 1] on both axes
    pub fn set(&mut self, ndc: glm::Vec2) {
        self.sample = Some(glm::vec2(
            ndc.x.clamp(-1.0, 1.0),
            ndc.y.clamp(-1.0, 1.0),
        ));
    }

    /// Converts a winit cursor position (pixels, +Y down) to NDC (+Y up)
    pub fn set_from_window(
        &mut self,
        position: PhysicalPosition<f64>,
        size: PhysicalSize<u32>,
    ) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        let x = (position.x / f64::from(size.width)) * 2.0 - 1.0;
        let y = -(position.y / f64::from(size.height)) * 2.0 + 1.0;
        #[allow(clippy::cast_possible_truncation)]
        self.set(glm::vec2(x as f32, y as f32));
        trace!("pointer {:?}", self.sample);
    }

    /// Forgets the sample, for when the cursor leaves the window
    pub fn clear(&mut self) {
        self.sample = None;
    }

    #[must_use]
    pub const fn latest(&self) -> Option<glm::Vec2> {
        self.sample
    }
}
