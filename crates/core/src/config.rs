//! Render configuration and terminal auto-detection.

use crate::fog::FogModel;
use crate::types::{MAX_GRADIENT_STEPS, MIN_GRADIENT_STEPS};

/// Render pipeline switches and fog parameters.
///
/// `fog` is derived from the other fog fields; call
/// [`rebuild_fog`](RenderConfig::rebuild_fog) after changing them.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub use_color: bool,
    /// Braille glyphs when `true`, ASCII density ramp otherwise.
    pub use_braille: bool,
    /// Solid depth pre-pass so hidden edges are occluded.
    pub use_zbuffer: bool,
    /// Screen-space backface culling.
    pub use_culling: bool,
    pub use_fog: bool,
    pub fog_start: f64,
    pub fog_end: f64,
    pub fog_exp: f64,
    /// Initial near clip of the viewer camera.
    pub near_clip: f64,
    /// End of the second fog zone; also the viewer camera's far clip.
    pub far_plane: f64,
    gradient_steps: usize,
    fog: FogModel,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl RenderConfig {
    fn new(use_color: bool, use_braille: bool) -> Self {
        let mut cfg = Self {
            use_color,
            use_braille,
            use_zbuffer: true,
            use_culling: true,
            use_fog: true,
            fog_start: 3.0,
            fog_end: 80.0,
            fog_exp: 0.6,
            near_clip: 0.1,
            far_plane: 150.0,
            gradient_steps: 12,
            fog: FogModel::new(12, 3.0, 80.0, 150.0, 0.6),
        };
        cfg.rebuild_fog();
        cfg
    }

    /// Defaults adjusted for the current terminal (`TERM`, `LANG`).
    ///
    /// Color is off for `dumb`/`unknown` terminals. Braille needs a UTF-8
    /// locale and is off on the Linux console, whose fonts usually lack it.
    pub fn detect_terminal() -> Self {
        use std::env;

        let term = env::var("TERM").unwrap_or_default();
        let lang = env::var("LANG").unwrap_or_default();
        Self::for_terminal(&term, &lang)
    }

    /// Same as [`detect_terminal`](Self::detect_terminal) with explicit values.
    pub fn for_terminal(term: &str, lang: &str) -> Self {
        let term = term.to_lowercase();
        let lang = lang.to_lowercase();

        let is_dumb = term == "dumb" || term == "unknown";
        let is_linux_console = term == "linux";
        let supports_utf8 = lang.contains("utf-8") || lang.contains("utf8");

        Self::new(!is_dumb, supports_utf8 && !is_linux_console)
    }

    pub fn gradient_steps(&self) -> usize {
        self.gradient_steps
    }

    /// Set the gradient length, clamped to `[6, 30]`, and rebuild the fog model.
    pub fn set_gradient_steps(&mut self, steps: usize) {
        self.gradient_steps = steps.clamp(MIN_GRADIENT_STEPS, MAX_GRADIENT_STEPS);
        self.rebuild_fog();
    }

    /// Re-derive the fog model from the current fog fields.
    pub fn rebuild_fog(&mut self) {
        self.fog = FogModel::new(
            self.gradient_steps,
            self.fog_start,
            self.fog_end,
            self.far_plane,
            self.fog_exp,
        );
    }

    pub fn fog_model(&self) -> &FogModel {
        &self.fog
    }

    /// The fog model when fog is enabled.
    pub fn active_fog(&self) -> Option<&FogModel> {
        self.use_fog.then_some(&self.fog)
    }
}
