//! Per-frame pipeline: sort instances → transform → cull → rasterize.
//!
//! The renderer only fills a [`Canvas`]. Turning cells into glyphs and colors
//! is the terminal layer's job.

use arrayvec::ArrayVec;

use crate::camera::{Camera, Projection};
use crate::canvas::Canvas;
use crate::config::RenderConfig;
use crate::mesh::{Mesh, MAX_FACE_VERTICES};
use crate::raster::{draw_line, fill_triangle_depth, ScreenVertex};
use crate::scene::{Instance, MeshArena, Scene};
use crate::types::{DMat4, DVec3};

/// Why a face was or was not drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceVisibility {
    Visible,
    /// Every vertex lies beyond the same screen edge.
    Offscreen,
    /// Rejected by the screen-space winding test.
    BackFacing,
}

/// Counters for one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Instances whose center passed the near/far test.
    pub instances: usize,
    pub faces_drawn: usize,
    /// Faces with a vertex at or behind the near plane.
    pub faces_clipped: usize,
    pub faces_offscreen: usize,
    pub faces_backfacing: usize,
}

/// Classify a projected face on a `width x height` screen.
///
/// Needs at least 3 points. The winding test uses the first three:
/// a face is front-facing when `(cross < 0) XOR flip`.
pub fn classify_face(
    pts: &[ScreenVertex],
    width: f64,
    height: f64,
    use_culling: bool,
    flip: bool,
) -> FaceVisibility {
    let all_left = pts.iter().all(|p| p.x < 0.0);
    let all_right = pts.iter().all(|p| p.x > width);
    let all_top = pts.iter().all(|p| p.y < 0.0);
    let all_bottom = pts.iter().all(|p| p.y > height);
    if all_left || all_right || all_top || all_bottom {
        return FaceVisibility::Offscreen;
    }

    if use_culling && !((screen_cross(pts) < 0.0) ^ flip) {
        return FaceVisibility::BackFacing;
    }
    FaceVisibility::Visible
}

/// `(p1 - p0) x (p2 - p0)` in screen space.
#[inline]
pub fn screen_cross(pts: &[ScreenVertex]) -> f64 {
    let (p0, p1, p2) = (pts[0], pts[1], pts[2]);
    (p1.x - p0.x) * (p2.y - p0.y) - (p1.y - p0.y) * (p2.x - p0.x)
}

/// Reusable frame renderer. Holds scratch buffers only; no scene state.
#[derive(Debug, Default)]
pub struct Renderer {
    queue: Vec<(f64, Instance)>,
    projected: Vec<Option<ScreenVertex>>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render into a canvas sized for a `cols x rows` terminal.
    ///
    /// Returns `None` when the terminal has no room for a canvas.
    pub fn render(
        &mut self,
        cols: u16,
        rows: u16,
        scene: &Scene,
        arena: &MeshArena,
        camera: &Camera,
        config: &RenderConfig,
    ) -> Option<(Canvas, FrameStats)> {
        let mut canvas = Canvas::for_terminal(cols, rows)?;
        let stats = self.render_into(&mut canvas, scene, arena, camera, config);
        Some((canvas, stats))
    }

    /// Clear `canvas` and draw one frame into it.
    pub fn render_into(
        &mut self,
        canvas: &mut Canvas,
        scene: &Scene,
        arena: &MeshArena,
        camera: &Camera,
        config: &RenderConfig,
    ) -> FrameStats {
        let (w, h) = (canvas.width(), canvas.height());
        canvas.reset(w, h);

        let mut stats = FrameStats::default();
        if w == 0 || h == 0 {
            return stats;
        }

        let view = camera.view_matrix();
        let proj = camera.projection(w, h);
        let depth_row = view.row(2).truncate();

        // Far-to-near by view-space center depth; out-of-range centers skipped.
        self.queue.clear();
        for inst in scene.instances() {
            let center_z = inst.translation.dot(depth_row) + camera.distance;
            if center_z < camera.near || center_z > camera.far {
                continue;
            }
            self.queue.push((center_z, *inst));
        }
        self.queue.sort_by(|a, b| b.0.total_cmp(&a.0));
        stats.instances = self.queue.len();

        let queue = std::mem::take(&mut self.queue);
        for (_, inst) in &queue {
            let Some(mesh) = arena.get(inst.mesh) else {
                continue;
            };
            self.draw_instance(canvas, mesh, inst.translation, &view, &proj, camera, config, &mut stats);
        }
        self.queue = queue;

        stats
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_instance(
        &mut self,
        canvas: &mut Canvas,
        mesh: &Mesh,
        offset: DVec3,
        view: &DMat4,
        proj: &Projection,
        camera: &Camera,
        config: &RenderConfig,
        stats: &mut FrameStats,
    ) {
        let near = camera.near;
        self.projected.clear();
        self.projected.extend(mesh.vertices().iter().map(|&v| {
            let p = view.transform_point3(v + offset);
            (p.z > near).then(|| {
                let (sx, sy) = proj.to_screen(p);
                ScreenVertex::new(sx, sy, p.z)
            })
        }));

        let (w, h) = (canvas.width() as f64, canvas.height() as f64);
        let fog = config.active_fog();

        for face in mesh.faces() {
            let pts: Option<ArrayVec<ScreenVertex, MAX_FACE_VERTICES>> = face
                .iter()
                .map(|&i| self.projected.get(i).copied().flatten())
                .collect();
            let Some(pts) = pts else {
                stats.faces_clipped += 1;
                continue;
            };
            if pts.len() < 3 {
                continue;
            }

            match classify_face(&pts, w, h, config.use_culling, camera.flip) {
                FaceVisibility::Offscreen => {
                    stats.faces_offscreen += 1;
                    continue;
                }
                FaceVisibility::BackFacing => {
                    stats.faces_backfacing += 1;
                    continue;
                }
                FaceVisibility::Visible => {}
            }
            stats.faces_drawn += 1;

            if config.use_zbuffer {
                fill_triangle_depth(canvas, pts[0], pts[1], pts[2]);
                if pts.len() > 3 {
                    fill_triangle_depth(canvas, pts[0], pts[2], pts[3]);
                }
            }

            let n = pts.len();
            for i in 0..n {
                draw_line(canvas, pts[i], pts[(i + 1) % n], fog);
            }
        }
    }
}
