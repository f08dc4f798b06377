use crate::{rv_error::RvError, types::Axis};
use log::info;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};
use winit::event::VirtualKeyCode;

/// Bone names used to bind animation roles. A bone binds a role when its
/// name ends with the given string, so the defaults match Mixamo rigs with
/// or without a `mixamorig` prefix.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(default)]
pub struct RoleNames {
    pub shoulder: String,
    pub upper_arm: String,
    pub lower_arm: String,
    pub palm: String,
}

impl Default for RoleNames {
    fn default() -> Self {
        Self {
            shoulder: "RightShoulder".to_string(),
            upper_arm: "RightArm".to_string(),
            lower_arm: "RightForeArm".to_string(),
            palm: "RightHand".to_string(),
        }
    }
}

/// Constants for the arm wave. Offsets are Euler angles in radians added once
/// at load time.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(default)]
pub struct WaveParams {
    pub bend_axis: Axis,
    pub bend_frequency: f32,
    pub bend_amplitude: f32,
    pub twist_axis: Axis,
    pub twist_frequency: f32,
    pub twist_amplitude: f32,
    pub base_twist: f32,
    pub shoulder_offset: [f32; 3],
    pub upper_arm_offset: [f32; 3],
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            bend_axis: Axis::X,
            bend_frequency: 4.0,
            bend_amplitude: 0.4,
            twist_axis: Axis::Z,
            twist_frequency: 3.0,
            twist_amplitude: 0.2,
            base_twist: std::f32::consts::FRAC_PI_2,
            shoulder_offset: [0.0, 0.0, -0.3],
            upper_arm_offset: [0.0, 0.0, -1.2],
        }
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(default)]
pub struct ImportOptions {
    /// Uniform model scale. The reference character is authored in
    /// centimetres.
    pub scale: f32,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self { scale: 0.01 }
    }
}

/// Viewer configuration. Every field has a default so a partial YAML file
/// is fine.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(default)]
pub struct Config {
    pub proxy_radius: f32,
    pub import: ImportOptions,
    pub roles: RoleNames,
    pub wave: WaveParams,
    /// Key that toggles the wave
    pub toggle_key: VirtualKeyCode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy_radius: 0.03,
            import: ImportOptions::default(),
            roles: RoleNames::default(),
            wave: WaveParams::default(),
            toggle_key: VirtualKeyCode::Space,
        }
    }
}

impl Config {
    /// Reads a YAML config file
    ///
    /// # Errors
    /// May return `RvError`
    pub fn load(path: &Path) -> Result<Self, RvError> {
        let file = fs::File::open(path)?;
        let config = Self::from_reader(io::BufReader::new(file))?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// # Errors
    /// May return `RvError`
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, RvError> {
        Ok(serde_yaml::from_reader(reader)?)
    }
}
