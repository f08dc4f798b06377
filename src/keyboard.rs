use crate::types::KeyboardHandler;
use ahash::HashSet;
use log::trace;
use winit::event::{ElementState, VirtualKeyCode};

/// Tracks press edges so a command fires once per key press. A press and
/// release between two ticks still counts, and auto repeat while a key is
/// held does not.
#[derive(Clone, Debug, Default)]
pub struct Keyboard {
    held: HashSet<VirtualKeyCode>,
    fresh: HashSet<VirtualKeyCode>,
}

impl KeyboardHandler for Keyboard {
    fn input(&mut self, keycode: VirtualKeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => self.pressed(keycode),
            ElementState::Released => self.released(keycode),
        }
    }
}

impl Keyboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the end of a frame once the edges have been read
    pub fn tick(&mut self) {
        self.fresh.clear();
    }

    pub fn pressed(&mut self, keycode: VirtualKeyCode) {
        if self.held.insert(keycode) {
            trace!("key down {:?}", keycode);
            self.fresh.insert(keycode);
        }
    }

    pub fn released(&mut self, keycode: VirtualKeyCode) {
        self.held.remove(&keycode);
    }

    /// Pressed since the last `tick`
    #[must_use]
    pub fn is_just_pressed(&self, keycode: VirtualKeyCode) -> bool {
        self.fresh.contains(&keycode)
    }
}
