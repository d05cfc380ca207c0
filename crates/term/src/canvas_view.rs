//! CanvasView: maps a rendered `Canvas` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::backend::TermPalette;
use crate::core::{cell_glyph, Canvas, RenderConfig};
use crate::fb::{CellStyle, FrameBuffer};
use crate::palette::ColorPairs;
use crate::types::{RESERVED_COLS, RESERVED_ROWS};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Figures shown in the header row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HudStats {
    pub instances: usize,
    pub vertices: usize,
    pub faces: usize,
    pub fps: u32,
    pub frame_ms: f64,
}

/// Header line text, before centering.
pub fn hud_text(stats: &HudStats, config: &RenderConfig) -> String {
    let fog = if config.use_fog {
        format!("FOG:{:?}", config.fog_exp)
    } else {
        "---".to_string()
    };
    let mode = format!(
        "{} {} {} {}",
        if config.use_color { "COL" } else { "MON" },
        if config.use_braille { "BRA" } else { "ASC" },
        if config.use_zbuffer { "Z+" } else { "Z-" },
        fog,
    );
    format!(
        " OBJ:{} | V:{} F:{} | FPS:{} | {:.1}ms | [{}] ",
        stats.instances, stats.vertices, stats.faces, stats.fps, stats.frame_ms, mode
    )
}

/// Center `s` in `width` columns using `fill`. Longer text is returned as is.
///
/// An odd margin puts the extra fill on the left only when `width` is odd.
pub fn center_text(s: &str, width: usize, fill: char) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    let right = margin - left;

    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat(fill).take(left));
    out.push_str(s);
    out.extend(std::iter::repeat(fill).take(right));
    out
}

/// Composes canvas cells, the background fill and the header.
#[derive(Debug, Default)]
pub struct CanvasView;

impl CanvasView {
    pub fn new() -> Self {
        Self
    }

    /// Render a frame into an existing framebuffer.
    ///
    /// Row 0 is the header; canvas row `y` lands on terminal row `y + 1`.
    /// Cells using pair 0 take the background pair's style when one is active.
    #[allow(clippy::too_many_arguments)]
    pub fn render_into(
        &self,
        canvas: &Canvas,
        config: &RenderConfig,
        pairs: &ColorPairs,
        palette: &TermPalette,
        stats: &HudStats,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);

        let base = if config.use_color && pairs.background != 0 {
            palette.pair_style(pairs.background)
        } else {
            CellStyle::default()
        };
        let style_for = |pair: u16| {
            if pair == 0 {
                base
            } else {
                palette.pair_style(pair)
            }
        };

        fb.clear(base.into_cell(' '));

        let usable_cols = viewport.width.saturating_sub(RESERVED_COLS);
        let usable_rows = viewport.height.saturating_sub(RESERVED_ROWS);

        let header = center_text(&hud_text(stats, config), usable_cols as usize, '=');
        let header: String = header.chars().take(usable_cols as usize).collect();
        fb.put_str(0, 0, &header, style_for(0).bold());

        let rows = (usable_rows as usize).min(canvas.rows());
        let cols = (usable_cols as usize).min(canvas.cols());
        for cy in 0..rows {
            for cx in 0..cols {
                let mask = canvas.mask(cx, cy);
                if mask == 0 {
                    continue;
                }
                let ch = cell_glyph(mask, config.use_braille);
                let pair = if config.use_color {
                    pairs.pair_for(canvas.color_index(cx, cy))
                } else {
                    0
                };
                fb.put_char(cx as u16, cy as u16 + 1, ch, style_for(pair));
            }
        }
    }

    /// Allocate and return a new framebuffer for the given frame.
    pub fn render(
        &self,
        canvas: &Canvas,
        config: &RenderConfig,
        pairs: &ColorPairs,
        palette: &TermPalette,
        stats: &HudStats,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(canvas, config, pairs, palette, stats, viewport, &mut fb);
        fb
    }
}
