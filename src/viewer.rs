use crate::{
    animation::AnimationController,
    config::Config,
    hit_test,
    keyboard::Keyboard,
    loader::AssetLoader,
    pointer::Pointer,
    proxy::{Proxy, ProxyManager},
    roles::RoleBindings,
    rv_error::RvError,
    skeleton::{BoneId, Skeleton},
    types::CameraTrait,
};
use log::{debug, error, info, warn};
use std::path::PathBuf;

/// Everything that only exists once the skeleton has loaded
struct Scene {
    skeleton: Skeleton,
    bindings: RoleBindings,
    proxies: ProxyManager,
}

/// Per frame driver for bone hovering and the arm wave.
///
/// The host calls `frame` once per display refresh before rendering. Until
/// a skeleton arrives, or forever if loading failed, frames skip animation
/// and picking and nothing is hovered.
pub struct Viewer {
    config: Config,
    animation: AnimationController,
    pointer: Pointer,
    loader: Option<AssetLoader>,
    scene: Option<Scene>,
    degraded: bool,
    hovered: Option<BoneId>,
    hovered_name: String,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Viewer {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            animation: AnimationController::new(config.wave.clone()),
            config,
            pointer: Pointer::new(),
            loader: None,
            scene: None,
            degraded: false,
            hovered: None,
            hovered_name: String::new(),
        }
    }

    /// Starts loading a glTF skeleton in the background. `frame` picks up
    /// the result.
    pub fn spawn_load(&mut self, path: PathBuf) {
        if self.loader.is_some() || self.scene.is_some() {
            warn!("load of {:?} ignored, already loading or loaded", path);
            return;
        }
        self.loader = Some(AssetLoader::spawn(path, self.config.import.clone()));
    }

    /// Hands over a finished load. A failed load is logged once and leaves
    /// the viewer in a static state with no proxies. Bone roles are bound
    /// and proxies are built exactly once.
    ///
    /// # Errors
    /// Returns `RvError::AlreadyLoaded` if a load was already handed over
    pub fn load(
        &mut self,
        result: Result<Skeleton, RvError>,
    ) -> Result<(), RvError> {
        if self.scene.is_some() || self.degraded {
            return Err(RvError::AlreadyLoaded);
        }
        let mut skeleton = match result {
            Ok(skeleton) => skeleton,
            Err(e) => {
                error!("Error loading model: {e}");
                self.degraded = true;
                return Ok(());
            }
        };
        let bindings = RoleBindings::classify(&skeleton, &self.config.roles);
        self.animation.pose_arm(&mut skeleton, &bindings);
        let proxies = ProxyManager::build(&skeleton, self.config.proxy_radius);
        info!(
            "model loaded, bones={} proxies={} roles={}",
            skeleton.len(),
            proxies.len(),
            bindings.len()
        );
        self.scene = Some(Scene {
            skeleton,
            bindings,
            proxies,
        });
        Ok(())
    }

    /// Runs one frame: pending load, animation, proxy sync, then picking.
    /// Returns the hovered bone name, empty when nothing is hovered.
    pub fn frame<C: CameraTrait>(&mut self, elapsed: f32, camera: &C) -> &str {
        if let Some(result) = self.loader.as_mut().and_then(AssetLoader::poll) {
            self.loader = None;
            if let Err(e) = self.load(result) {
                warn!("{e}");
            }
        }

        let hovered = self.scene.as_mut().and_then(|scene| {
            self.animation
                .tick(elapsed, &mut scene.skeleton, &scene.bindings);
            scene.proxies.update(&scene.skeleton);
            hit_test::pick(self.pointer.latest(), camera, scene.proxies.proxies())
        });

        if hovered != self.hovered {
            self.hovered = hovered;
            self.hovered_name = hovered
                .and_then(|id| self.skeleton().and_then(|s| s.name(id)))
                .map_or_else(String::new, ToString::to_string);
            debug!("hovered bone now {:?}", self.hovered_name);
        }
        &self.hovered_name
    }

    pub fn toggle_animation(&mut self) {
        self.animation.toggle();
    }

    /// Toggles the animation on the configured key's press edge
    pub fn handle_keys(&mut self, keyboard: &Keyboard) {
        if keyboard.is_just_pressed(self.config.toggle_key) {
            self.toggle_animation();
        }
    }

    #[must_use]
    pub const fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    pub fn pointer_mut(&mut self) -> &mut Pointer {
        &mut self.pointer
    }

    /// Name of the bone found by the last `frame`
    #[must_use]
    pub fn hovered(&self) -> &str {
        &self.hovered_name
    }

    #[must_use]
    pub const fn hovered_bone(&self) -> Option<BoneId> {
        self.hovered
    }

    #[must_use]
    pub const fn animation(&self) -> &AnimationController {
        &self.animation
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn skeleton(&self) -> Option<&Skeleton> {
        self.scene.as_ref().map(|s| &s.skeleton)
    }

    #[must_use]
    pub fn bindings(&self) -> Option<&RoleBindings> {
        self.scene.as_ref().map(|s| &s.bindings)
    }

    #[must_use]
    pub fn proxies(&self) -> &[Proxy] {
        self.scene
            .as_ref()
            .map(|s| s.proxies.proxies())
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.scene.is_some()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loader.is_some()
    }

    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.degraded
    }
}
