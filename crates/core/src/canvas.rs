//! Sub-character canvas: per-pixel depth buffer plus per-cell occupancy masks.
//!
//! A glyph cell covers a 2x4 block of sub-pixels. Bit `(y % 4) + (x % 2) * 4`
//! of the cell mask marks the sub-pixel at `(x, y)`; bits 0-3 are the left
//! column top to bottom, bits 4-7 the right column.

use crate::types::{CELL_H, CELL_W, DEPTH_FAR, RESERVED_COLS, RESERVED_ROWS};

/// Depth-buffered sub-pixel canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cols: usize,
    rows: usize,
    depth: Vec<i32>,
    masks: Vec<u8>,
    cell_depth: Vec<i32>,
    cell_color: Vec<u8>,
}

impl Canvas {
    /// A `width x height` sub-pixel canvas. Partial trailing cells are dropped.
    pub fn new(width: usize, height: usize) -> Self {
        let mut canvas = Self {
            width: 0,
            height: 0,
            cols: 0,
            rows: 0,
            depth: Vec::new(),
            masks: Vec::new(),
            cell_depth: Vec::new(),
            cell_color: Vec::new(),
        };
        canvas.reset(width, height);
        canvas
    }

    /// Canvas covering the usable area of a `cols x rows` terminal, or `None`
    /// when the terminal is too small to hold a single cell.
    pub fn for_terminal(cols: u16, rows: u16) -> Option<Self> {
        let (w, h) = terminal_canvas_size(cols, rows)?;
        Some(Self::new(w, h))
    }

    /// Resize and clear to "nothing drawn".
    ///
    /// Keeps the underlying allocations when possible.
    pub fn reset(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cols = width / CELL_W;
        self.rows = height / CELL_H;

        let px = width * height;
        let cells = self.cols * self.rows;

        self.depth.clear();
        self.depth.resize(px, DEPTH_FAR);
        self.masks.clear();
        self.masks.resize(cells, 0);
        self.cell_depth.clear();
        self.cell_depth.resize(cells, DEPTH_FAR);
        self.cell_color.clear();
        self.cell_color.resize(cells, 0);
    }

    /// Width in sub-pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in sub-pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width in glyph cells.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Height in glyph cells.
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    fn px_idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    #[inline(always)]
    fn cell_idx(&self, cx: usize, cy: usize) -> Option<usize> {
        if cx >= self.cols || cy >= self.rows {
            return None;
        }
        Some(cy * self.cols + cx)
    }

    /// Depth stored at sub-pixel `(x, y)`.
    pub fn depth_at(&self, x: i32, y: i32) -> Option<i32> {
        self.px_idx(x, y).map(|i| self.depth[i])
    }

    /// Full depth buffer, row-major.
    pub fn depth_buffer(&self) -> &[i32] {
        &self.depth
    }

    /// Row `y` of the depth buffer; `None` below the last row.
    pub(crate) fn depth_row_mut(&mut self, y: usize) -> Option<&mut [i32]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.depth.get_mut(start..start + self.width)
    }

    /// Occupancy mask of glyph cell `(cx, cy)`; 0 outside the grid.
    pub fn mask(&self, cx: usize, cy: usize) -> u8 {
        self.cell_idx(cx, cy).map(|i| self.masks[i]).unwrap_or(0)
    }

    /// Palette index of the nearest sample in glyph cell `(cx, cy)`.
    pub fn color_index(&self, cx: usize, cy: usize) -> usize {
        self.cell_idx(cx, cy)
            .map(|i| self.cell_color[i] as usize)
            .unwrap_or(0)
    }

    /// Depth of the nearest sample in glyph cell `(cx, cy)`.
    pub fn cell_depth(&self, cx: usize, cy: usize) -> i32 {
        self.cell_idx(cx, cy)
            .map(|i| self.cell_depth[i])
            .unwrap_or(DEPTH_FAR)
    }

    pub fn masks(&self) -> &[u8] {
        &self.masks
    }

    /// `true` when no sub-pixel has been plotted.
    pub fn is_blank(&self) -> bool {
        self.masks.iter().all(|&m| m == 0)
    }

    /// Plot a visible sub-pixel.
    ///
    /// Only takes effect when `depth` is strictly nearer than what the depth
    /// buffer holds. The cell color follows whichever of its 8 sub-pixels is
    /// nearest. Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, depth: i32, color_idx: usize) {
        let Some(i) = self.px_idx(x, y) else {
            return;
        };
        if depth >= self.depth[i] {
            return;
        }
        self.depth[i] = depth;

        let (x, y) = (x as usize, y as usize);
        let Some(c) = self.cell_idx(x / CELL_W, y / CELL_H) else {
            return;
        };
        self.masks[c] |= 1 << ((y % CELL_H) + (x % CELL_W) * CELL_H);

        if depth < self.cell_depth[c] {
            self.cell_depth[c] = depth;
            self.cell_color[c] = color_idx.min(u8::MAX as usize) as u8;
        }
    }
}

/// Sub-pixel canvas size `((cols - 1) * 2, (rows - 2) * 4)` for a terminal, or
/// `None` when either dimension is empty.
pub fn terminal_canvas_size(cols: u16, rows: u16) -> Option<(usize, usize)> {
    let usable_cols = cols.checked_sub(RESERVED_COLS)? as usize;
    let usable_rows = rows.checked_sub(RESERVED_ROWS)? as usize;
    if usable_cols == 0 || usable_rows == 0 {
        return None;
    }
    Some((usable_cols * CELL_W, usable_rows * CELL_H))
}
