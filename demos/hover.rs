//! Headless demo: loads a character in the background, sweeps the pointer
//! across the screen and logs which bone is under it.
//!
//! `RUST_LOG=info cargo run --example hover -- model.glb [config.yaml]`
use nalgebra_glm as glm;
use rigview::{camera::Camera, config::Config, frame_clock::FrameClock, viewer::Viewer};
use std::{path::PathBuf, thread, time::Duration};

const FILENAME: &str = "./model.glb";
const FRAME_DURATION: Duration = Duration::from_millis(16);
const FRAMES: usize = 240;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let file_path = args.get(1).map_or(FILENAME, String::as_str);
    let config = match args.get(2) {
        Some(path) => Config::load(path.as_ref()).unwrap_or_else(|e| {
            log::error!("config {path}: {e}, using defaults");
            Config::default()
        }),
        None => Config::default(),
    };

    let mut viewer = Viewer::new(config);
    let mut camera = Camera::default();
    let mut clock = FrameClock::new();
    viewer.spawn_load(PathBuf::from(file_path));
    viewer.toggle_animation();

    let mut last = String::new();
    for frame in 0..FRAMES {
        #[allow(clippy::cast_precision_loss)]
        let sweep = (frame as f32 / FRAMES as f32) * 2.0 - 1.0;
        viewer.pointer_mut().set(glm::vec2(sweep * 0.3, 0.1));
        camera.orbit(0.002, 0.0);

        let elapsed = clock.tick();
        let hovered = viewer.frame(elapsed, &camera);
        if hovered != last {
            log::info!("frame {frame}: hovering {hovered:?}");
            last = hovered.to_string();
        }
        thread::sleep(FRAME_DURATION);
    }
}
