//! Bone hover picking and a simple arm wave for a rigged character viewer.
//!
//! Each frame the `Viewer` advances the wave, moves one invisible cylinder
//! per bone segment onto the current pose and casts a ray from the pointer
//! to find the bone under it. Rendering is left to the host.

pub mod animation;
pub mod camera;
pub mod config;
pub mod frame_clock;
pub mod gltf_import;
pub mod keyboard;
pub mod loader;
pub mod pointer;
pub mod proxy;
pub mod ray;
pub mod roles;
pub mod rv_error;
pub mod skeleton;
pub mod types;
pub mod viewer;
