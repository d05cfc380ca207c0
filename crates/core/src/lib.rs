//! Rendering core - pure, deterministic, and testable
//!
//! This module contains the whole software rasterization pipeline. It has
//! **no dependencies** on terminal I/O, making it:
//!
//! - **Deterministic**: Same scene and camera produce an identical canvas
//! - **Testable**: Every stage can be driven with hand-built inputs
//! - **Portable**: The canvas can be consumed by any display layer
//!
//! # Module Structure
//!
//! - [`camera`]: Orbital camera, view matrix and perspective projection
//! - [`canvas`]: Integer depth buffer plus 2x4 sub-pixel cell masks
//! - [`config`]: Render switches, fog parameters and terminal detection
//! - [`controls`]: Viewer actions applied between frames
//! - [`fog`]: Depth to palette-index mapping across three fog zones
//! - [`glyph`]: Braille / ASCII glyphs for cell masks
//! - [`mesh`]: Polygon meshes and OBJ parsing with cube fallback
//! - [`raster`]: Scanline depth fill and DDA wireframe lines
//! - [`renderer`]: Per-frame sort → transform → cull → rasterize
//! - [`rng`]: Deterministic LCG for instance placement
//! - [`scene`]: Mesh arena and instance list
//!
//! # Pipeline
//!
//! 1. Instances are ordered far-to-near by view-space center depth
//! 2. Vertices are rotated, offset by the camera distance and projected;
//!    vertices at or behind the near plane are dropped with their faces
//! 3. Faces fully beyond one screen edge, or failing the winding test, are culled
//! 4. Visible faces fill the depth buffer (with a small polygon offset)
//! 5. Edges are drawn with per-sample depth test and fog color
//!
//! # Example
//!
//! ```
//! use tui_wireframe_core::{Camera, Mesh, MeshArena, RenderConfig, Renderer, Scene};
//! use tui_wireframe_types::DVec3;
//!
//! let mut arena = MeshArena::new();
//! let cube = arena.insert(Mesh::cube());
//! let mut scene = Scene::new();
//! scene.add(cube, DVec3::ZERO);
//!
//! let mut renderer = Renderer::new();
//! let (canvas, stats) = renderer
//!     .render(81, 24, &scene, &arena, &Camera::default(), &RenderConfig::default())
//!     .unwrap();
//!
//! assert!(!canvas.is_blank());
//! assert_eq!(stats.faces_drawn, 1); // looking straight at the front face
//! ```

pub mod camera;
pub mod canvas;
pub mod config;
pub mod controls;
pub mod fog;
pub mod glyph;
pub mod mesh;
pub mod raster;
pub mod renderer;
pub mod rng;
pub mod scene;

pub use tui_wireframe_types as types;

// Re-export commonly used types for convenience
pub use camera::{Camera, Projection};
pub use canvas::{terminal_canvas_size, Canvas};
pub use config::RenderConfig;
pub use controls::Viewer;
pub use fog::{FogModel, ZoneCounts};
pub use glyph::{ascii, braille, cell_glyph};
pub use mesh::{Face, Mesh, MAX_FACE_VERTICES};
pub use raster::{draw_line, fill_triangle_depth, ScreenVertex};
pub use renderer::{classify_face, screen_cross, FaceVisibility, FrameStats, Renderer};
pub use rng::SimpleRng;
pub use scene::{Instance, MeshArena, MeshHandle, Scene};
