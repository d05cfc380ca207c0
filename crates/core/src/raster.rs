//! Rasterizer: solid triangle depth fill and DDA wireframe lines.
//!
//! Screen coordinates are truncated toward zero before stepping, and view Z is
//! scaled by `DEPTH_SCALE` into integer depth-buffer units.

use crate::canvas::Canvas;
use crate::fog::FogModel;
use crate::types::{DEPTH_SCALE, POLYGON_OFFSET};

/// A projected vertex: screen position in sub-pixels plus view-space Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ScreenVertex {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Truncated screen position and integer depth, kept as `f64` so that
    /// differences between far-apart vertices cannot overflow.
    #[inline]
    fn to_fixed(self) -> (f64, f64, f64) {
        (
            (self.x as i64) as f64,
            (self.y as i64) as f64,
            ((self.z * DEPTH_SCALE) as i32) as f64,
        )
    }
}

/// Edge walker state for one side of a scanline span.
#[derive(Debug, Clone, Copy)]
struct Edge {
    x: f64,
    z: f64,
    dx: f64,
    dz: f64,
}

impl Edge {
    #[inline]
    fn step(&mut self) {
        self.x += self.dx;
        self.z += self.dz;
    }

    /// Jump `rows` scanlines ahead.
    #[inline]
    fn advance(&mut self, rows: f64) {
        if rows > 0.0 {
            self.x += self.dx * rows;
            self.z += self.dz * rows;
        }
    }
}

/// Write the interior of a triangle into the depth buffer only.
///
/// Depths are pushed back by `POLYGON_OFFSET` so the face's own wireframe is
/// never occluded by its fill. Occupancy masks and colors are untouched.
pub fn fill_triangle_depth(
    canvas: &mut Canvas,
    a: ScreenVertex,
    b: ScreenVertex,
    c: ScreenVertex,
) {
    let (mut p1, mut p2, mut p3) = (a, b, c);
    if p1.y > p2.y {
        std::mem::swap(&mut p1, &mut p2);
    }
    if p1.y > p3.y {
        std::mem::swap(&mut p1, &mut p3);
    }
    if p2.y > p3.y {
        std::mem::swap(&mut p2, &mut p3);
    }

    let offset = f64::from(POLYGON_OFFSET);
    let (x1, y1, z1) = p1.to_fixed();
    let (x2, y2, z2) = p2.to_fixed();
    let (x3, y3, z3) = p3.to_fixed();
    let (z1, z2, z3) = (z1 + offset, z2 + offset, z3 + offset);

    let inv = |d: f64| if d != 0.0 { 1.0 / d } else { 0.0 };
    let inv_dy1 = inv(y2 - y1);
    let inv_dy2 = inv(y3 - y2);
    let inv_dy_long = inv(y3 - y1);

    let x_step_long = (x3 - x1) * inv_dy_long;
    let z_step_long = (z3 - z1) * inv_dy_long;

    // Top half: long edge against v1 -> v2.
    if y2 > y1 {
        let long = Edge {
            x: x1,
            z: z1,
            dx: x_step_long,
            dz: z_step_long,
        };
        let short = Edge {
            x: x1,
            z: z1,
            dx: (x2 - x1) * inv_dy1,
            dz: (z2 - z1) * inv_dy1,
        };
        fill_scanlines(canvas, y1, y2, long, short);
    }

    // Bottom half: long edge (continued) against v2 -> v3.
    if y3 > y2 {
        let y_diff = y2 - y1;
        let long = Edge {
            x: x1 + x_step_long * y_diff,
            z: z1 + z_step_long * y_diff,
            dx: x_step_long,
            dz: z_step_long,
        };
        let short = Edge {
            x: x2,
            z: z2,
            dx: (x3 - x2) * inv_dy2,
            dz: (z3 - z2) * inv_dy2,
        };
        fill_scanlines(canvas, y2, y3, long, short);
    }
}

/// Fill rows `y_start..y_end` (clipped to the canvas) between two edges
/// that are positioned at `y_start`.
fn fill_scanlines(canvas: &mut Canvas, y_start: f64, y_end: f64, mut a: Edge, mut b: Edge) {
    let w = canvas.width() as i64;
    let first = y_start.max(0.0);
    let last = y_end.min(canvas.height() as f64);
    if first >= last {
        return;
    }
    a.advance(first - y_start);
    b.advance(first - y_start);

    for y in first as usize..last as usize {
        let (mut sx, mut ex) = (a.x as i64, b.x as i64);
        let (mut sz, mut ez) = (a.z, b.z);
        if sx > ex {
            std::mem::swap(&mut sx, &mut ex);
            std::mem::swap(&mut sz, &mut ez);
        }

        let denom = ex as f64 - sx as f64;
        let z_slope = if denom != 0.0 { (ez - sz) / denom } else { 0.0 };

        let start_x = sx.max(0);
        let end_x = ex.min(w);
        let mut z = sz;
        if start_x > sx {
            z += z_slope * (start_x as f64 - sx as f64);
        }

        if start_x < end_x {
            if let Some(row) = canvas.depth_row_mut(y) {
                for cell in &mut row[start_x as usize..end_x as usize] {
                    if z < *cell as f64 {
                        *cell = z as i32;
                    }
                    z += z_slope;
                }
            }
        }

        a.step();
        b.step();
    }
}

/// Draw a depth-tested line with a DDA walk.
///
/// Each of the `max(|dx|, |dy|) + 1` samples is colored by the fog model at
/// its depth, or with index 0 when `fog` is `None`. Zero-length lines are
/// skipped. Samples that cannot land on the canvas are never visited.
pub fn draw_line(canvas: &mut Canvas, a: ScreenVertex, b: ScreenVertex, fog: Option<&FogModel>) {
    let (x1, y1, z1) = a.to_fixed();
    let (x2, y2, z2) = b.to_fixed();

    let dx = x2 - x1;
    let dy = y2 - y1;
    if dx == 0.0 && dy == 0.0 {
        return;
    }

    let steps = dx.abs().max(dy.abs());
    let x_inc = dx / steps;
    let y_inc = dy / steps;
    let z_inc = (z2 - z1) / steps;

    let x_range = sample_range(x1, x_inc, canvas.width() as f64, steps);
    let y_range = sample_range(y1, y_inc, canvas.height() as f64, steps);
    let (Some((x_lo, x_hi)), Some((y_lo, y_hi))) = (x_range, y_range) else {
        return;
    };
    let (lo, hi) = (x_lo.max(y_lo), x_hi.min(y_hi));
    if lo > hi {
        return;
    }

    let k = lo as f64;
    let (mut cx, mut cy, mut cz) = (x1 + x_inc * k, y1 + y_inc * k, z1 + z_inc * k);
    for _ in lo..=hi {
        let color = fog.map(|f| f.color_index(cz)).unwrap_or(0);
        canvas.set_pixel(cx as i32, cy as i32, cz as i32, color);
        cx += x_inc;
        cy += y_inc;
        cz += z_inc;
    }
}

/// Sample indices in `0..=steps` whose coordinate `start + k * inc` can
/// truncate into `0..len`, padded by one sample on each side.
fn sample_range(start: f64, inc: f64, len: f64, steps: f64) -> Option<(u64, u64)> {
    let (lo, hi) = if inc == 0.0 {
        if start <= -1.0 || start >= len {
            return None;
        }
        (0.0, steps)
    } else {
        let a = (-1.0 - start) / inc;
        let b = (len - start) / inc;
        (a.min(b).floor() - 1.0, a.max(b).ceil() + 1.0)
    };
    let (lo, hi) = (lo.max(0.0), hi.min(steps));
    (lo <= hi).then_some((lo as u64, hi as u64))
}
