//! Orbital camera: pose, projection parameters and the per-frame view transform.

use crate::types::{DMat4, DVec3, MAX_FOV_DEG, MIN_CAMERA_DISTANCE, MIN_FOV_DEG};

/// Camera state.
///
/// The camera sits on the view axis `distance` units from the origin and the
/// scene is rotated around it by `yaw` (Y axis) and `pitch` (X axis).
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Rotation around the X axis (radians, unbounded).
    pub pitch: f64,
    /// Rotation around the Y axis (radians, unbounded).
    pub yaw: f64,
    /// View-space Z offset of the origin.
    pub distance: f64,
    /// Vertical field of view in degrees.
    pub fov: f64,
    /// View-space Z a vertex must exceed to be projected.
    pub near: f64,
    /// Instances whose center lies beyond this view-space Z are skipped.
    pub far: f64,
    /// Inverts the backface-culling winding.
    pub flip: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(60.0, 6.0, 0.1, 150.0)
    }
}

impl Camera {
    pub fn new(fov: f64, distance: f64, near: f64, far: f64) -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            distance,
            fov,
            near,
            far,
            flip: false,
        }
    }

    /// Add to the orbital angles. No wrapping or clamping.
    pub fn orbit(&mut self, dyaw: f64, dpitch: f64) {
        self.yaw += dyaw;
        self.pitch += dpitch;
    }

    /// Positive moves away from the origin; never closer than 0.5.
    pub fn zoom(&mut self, delta: f64) {
        self.distance = (self.distance + delta).max(MIN_CAMERA_DISTANCE);
    }

    pub fn adjust_fov(&mut self, delta: f64) {
        self.fov = (self.fov + delta).clamp(MIN_FOV_DEG, MAX_FOV_DEG);
    }

    pub fn toggle_flip(&mut self) {
        self.flip = !self.flip;
    }

    /// World → view transform: `T(0, 0, distance) · Ry(yaw) · Rx(pitch)`.
    ///
    /// Rows of the rotation part are
    /// `(cy, sx·sy, cx·sy)`, `(0, cx, -sx)`, `(-sy, sx·cy, cx·cy)`.
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::from_translation(DVec3::new(0.0, 0.0, self.distance))
            * DMat4::from_rotation_y(self.yaw)
            * DMat4::from_rotation_x(self.pitch)
    }

    /// Focal scale `1 / tan(fov / 2)`.
    pub fn focal(&self) -> f64 {
        1.0 / (self.fov.to_radians() / 2.0).tan()
    }

    /// Perspective projection onto a `width x height` sub-pixel screen.
    pub fn projection(&self, width: usize, height: usize) -> Projection {
        let w = width as f64;
        let h = height as f64;
        Projection {
            focal: self.focal(),
            aspect: w / h,
            half_w: w * 0.5,
            half_h: h * 0.5,
        }
    }
}

/// Screen projection constants for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub focal: f64,
    pub aspect: f64,
    pub half_w: f64,
    pub half_h: f64,
}

impl Projection {
    /// Project a view-space point (`z` must be positive) to screen `(x, y)`.
    /// Screen Y grows downward.
    #[inline]
    pub fn to_screen(&self, v: DVec3) -> (f64, f64) {
        let sx = (v.x * self.focal / self.aspect / v.z) * self.half_w + self.half_w;
        let sy = (1.0 - (v.y * self.focal / v.z)) * self.half_h;
        (sx, sy)
    }
}
