//! TUI Wireframe (workspace facade crate).
//!
//! Re-exports the member crates as `tui_wireframe::{core, input, term, types}`
//! while the implementation lives in dedicated crates under `crates/`.

pub use tui_wireframe_core as core;
pub use tui_wireframe_input as input;
pub use tui_wireframe_term as term;
pub use tui_wireframe_types as types;
