//! Applies viewer actions to the camera, scene and render configuration.

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::rng::SimpleRng;
use crate::scene::{MeshHandle, Scene};
use crate::types::{DVec3, ViewerAction, FOV_STEP, ORBIT_STEP, SPAWN_EXTENT, ZOOM_STEP};

/// Mutable state touched by input between frames.
pub struct Viewer {
    pub camera: Camera,
    pub config: RenderConfig,
    pub scene: Scene,
    /// Mesh used for newly added instances.
    pub spawn_mesh: MeshHandle,
    rng: SimpleRng,
}

impl Viewer {
    /// Camera starts at fov 60, distance 6, with clip planes from `config`.
    pub fn new(config: RenderConfig, scene: Scene, spawn_mesh: MeshHandle, seed: u32) -> Self {
        let camera = Camera::new(60.0, 6.0, config.near_clip, config.far_plane);
        Self {
            camera,
            config,
            scene,
            spawn_mesh,
            rng: SimpleRng::new(seed),
        }
    }

    pub fn apply_action(&mut self, action: ViewerAction) {
        match action {
            ViewerAction::PitchUp => self.camera.orbit(0.0, ORBIT_STEP),
            ViewerAction::PitchDown => self.camera.orbit(0.0, -ORBIT_STEP),
            ViewerAction::YawRight => self.camera.orbit(ORBIT_STEP, 0.0),
            ViewerAction::YawLeft => self.camera.orbit(-ORBIT_STEP, 0.0),
            ViewerAction::ZoomIn => self.camera.zoom(-ZOOM_STEP),
            ViewerAction::ZoomOut => self.camera.zoom(ZOOM_STEP),
            ViewerAction::FovNarrow => self.camera.adjust_fov(-FOV_STEP),
            ViewerAction::FovWiden => self.camera.adjust_fov(FOV_STEP),
            ViewerAction::FlipWinding => self.camera.toggle_flip(),
            ViewerAction::AddInstance => {
                let at = DVec3::new(
                    self.rng.uniform(-SPAWN_EXTENT, SPAWN_EXTENT),
                    self.rng.uniform(-SPAWN_EXTENT, SPAWN_EXTENT),
                    self.rng.uniform(-SPAWN_EXTENT, SPAWN_EXTENT),
                );
                self.scene.add(self.spawn_mesh, at);
            }
            ViewerAction::ToggleColor => self.config.use_color = !self.config.use_color,
            ViewerAction::ToggleBraille => self.config.use_braille = !self.config.use_braille,
            ViewerAction::ToggleZBuffer => self.config.use_zbuffer = !self.config.use_zbuffer,
            ViewerAction::ToggleFog => self.config.use_fog = !self.config.use_fog,
        }
    }
}
