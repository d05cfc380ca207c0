//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the renderer.
//! All types are pure data structures, usable in any context (rasterizer core,
//! terminal output, input mapping). Vector and matrix math is glam's
//! double-precision `DVec3`/`DMat4`, re-exported here.
//!
//! # Canvas Geometry
//!
//! Each terminal glyph cell addresses a 2x4 block of binary sub-pixels:
//!
//! - **Cell width**: 2 sub-pixels (`CELL_W`)
//! - **Cell height**: 4 sub-pixels (`CELL_H`)
//! - **Reserved rows**: 2 (one HUD header row, one bottom margin)
//! - **Reserved columns**: 1 (right margin)
//!
//! # Depth Units
//!
//! Depth values are stored as integers scaled by 1000 so the inner raster
//! loops never compare floating point depth against the buffer:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEPTH_SCALE` | 1000 | View-space Z to depth-buffer units |
//! | `DEPTH_FAR` | 999999 | "Infinitely far" sentinel for cleared buffers |
//! | `POLYGON_OFFSET` | 50 | Bias added to solid-fill depth writes |
//!
//! # Gradient Steps
//!
//! The fog gradient has between `MIN_GRADIENT_STEPS` (6) and
//! `MAX_GRADIENT_STEPS` (30) colors.
//!
//! # Examples
//!
//! ```
//! use tui_wireframe_types::{parse_hex_color, Rgb, DVec3};
//!
//! let v = DVec3::new(1.0, 2.0, 3.0);
//! assert_eq!(v.dot(DVec3::new(1.0, 0.0, 0.0)), 1.0);
//!
//! assert_eq!(parse_hex_color("#D0DD14"), Some(Rgb::new(0xD0, 0xDD, 0x14)));
//! ```

pub mod color;

pub use color::{parse_hex_color, Rgb};
pub use glam::{DMat4, DVec3};

/// Sub-pixels per glyph cell horizontally.
pub const CELL_W: usize = 2;

/// Sub-pixels per glyph cell vertically.
pub const CELL_H: usize = 4;

/// Terminal rows not available to the canvas (HUD header + bottom margin).
pub const RESERVED_ROWS: u16 = 2;

/// Terminal columns not available to the canvas (right margin).
pub const RESERVED_COLS: u16 = 1;

/// View-space depth to integer depth-buffer scale.
pub const DEPTH_SCALE: f64 = 1000.0;

/// Depth-buffer clear value ("infinitely far").
pub const DEPTH_FAR: i32 = 999_999;

/// Depth bias applied to solid triangle fill so wireframe edges stay in front.
pub const POLYGON_OFFSET: i32 = 50;

/// Smallest supported gradient step count.
pub const MIN_GRADIENT_STEPS: usize = 6;

/// Largest supported gradient step count.
pub const MAX_GRADIENT_STEPS: usize = 30;

/// Minimum camera distance from the origin.
pub const MIN_CAMERA_DISTANCE: f64 = 0.5;

/// Field-of-view bounds in degrees.
pub const MIN_FOV_DEG: f64 = 10.0;
pub const MAX_FOV_DEG: f64 = 170.0;

/// Orbit step per key press (radians).
pub const ORBIT_STEP: f64 = 0.1;

/// Zoom step per key press (world units).
pub const ZOOM_STEP: f64 = 0.5;

/// Field-of-view step per key press (degrees).
pub const FOV_STEP: f64 = 5.0;

/// Half extent of the cube in which new instances are scattered.
pub const SPAWN_EXTENT: f64 = 25.0;

/// ASCII density ramp indexed by sub-pixel population count.
pub const ASCII_RAMP: &[u8; 10] = b" .:-=+*#%@";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_and_depth_defaults() {
        assert_eq!(CELL_W * CELL_H, 8);
        assert_eq!(DEPTH_SCALE, 1000.0);
        assert_eq!(DEPTH_FAR, 999_999);
        assert_eq!(POLYGON_OFFSET, 50);

        assert_eq!(MIN_GRADIENT_STEPS, 6);
        assert_eq!(MAX_GRADIENT_STEPS, 30);
        assert_eq!(ASCII_RAMP.len(), 10);
    }
}

/// Viewer actions that mutate the camera, scene, or render configuration
///
/// These actions are produced by the input layer and applied between frames.
/// Each action maps to one discrete key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    /// Tilt the camera up (pitch +)
    PitchUp,
    /// Tilt the camera down (pitch -)
    PitchDown,
    /// Orbit left (yaw -)
    YawLeft,
    /// Orbit right (yaw +)
    YawRight,
    /// Move the camera closer
    ZoomIn,
    /// Move the camera further away
    ZoomOut,
    /// Narrow the field of view
    FovNarrow,
    /// Widen the field of view
    FovWiden,
    /// Invert the backface-culling winding
    FlipWinding,
    /// Add another instance of the loaded mesh at a random position
    AddInstance,
    /// Toggle color output
    ToggleColor,
    /// Toggle Braille vs ASCII glyphs
    ToggleBraille,
    /// Toggle the solid depth pre-pass
    ToggleZBuffer,
    /// Toggle depth fog
    ToggleFog,
}
