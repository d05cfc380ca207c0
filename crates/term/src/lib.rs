//! Terminal display layer.
//!
//! Turns a rendered [`core::Canvas`] into styled terminal cells and flushes
//! them with crossterm. Everything except [`TerminalRenderer`] is pure and
//! unit-tested without a terminal.
//!
//! - [`palette`]: depth gradient and the ranked color-tier cascade
//! - [`backend`]: terminal capabilities and the in-memory color pair table
//! - [`canvas_view`]: canvas + header → framebuffer
//! - [`renderer`]: full/diff flush to the real terminal

pub mod backend;
pub mod canvas_view;
pub mod fb;
pub mod palette;
pub mod renderer;

pub use tui_wireframe_core as core;
pub use tui_wireframe_types as types;

pub use backend::{TermCaps, TermPalette};
pub use canvas_view::{center_text, hud_text, CanvasView, HudStats, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, TermColor};
pub use palette::{
    build_gradient, build_three_zone_gradient, init_color_pairs, nearest_ansi8, nearest_xterm256,
    ColorBackend, ColorContext, ColorPairs, ColorSlot, ColorSources, ColorTier,
};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
