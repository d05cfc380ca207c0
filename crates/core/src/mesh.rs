//! Polygon meshes and the line-oriented OBJ subset they load from.
//!
//! Only `v x y z` and `f a b c ...` records are read. Face references may be
//! `v`, `v/vt`, `v//vn` or `v/vt/vn`; only the 1-based position index is used.

use std::path::Path;

use anyhow::{bail, Context, Result};
use arrayvec::ArrayVec;

use crate::types::DVec3;

/// Largest polygon a face may have.
pub const MAX_FACE_VERTICES: usize = 16;

/// Indices (0-based) into `Mesh::vertices`.
pub type Face = ArrayVec<usize, MAX_FACE_VERTICES>;

/// Immutable polygon mesh. Every face index is in range and every face has at
/// least 3 vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<DVec3>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Build a mesh, dropping faces that reference missing vertices or have
    /// fewer than 3 corners. Fails when nothing renderable remains.
    pub fn from_parts(vertices: Vec<DVec3>, faces: Vec<Face>) -> Result<Self> {
        let total = faces.len();
        let faces: Vec<Face> = faces
            .into_iter()
            .filter(|f| f.len() >= 3 && f.iter().all(|&i| i < vertices.len()))
            .collect();

        let dropped = total - faces.len();
        if dropped > 0 {
            log::warn!("dropped {dropped} of {total} faces with invalid vertex references");
        }
        if vertices.is_empty() || faces.is_empty() {
            bail!(
                "mesh has no renderable geometry ({} vertices, {} faces)",
                vertices.len(),
                faces.len()
            );
        }
        Ok(Self { vertices, faces })
    }

    /// Cube spanning -1..1 on every axis: 8 vertices, 6 quads.
    pub fn cube() -> Self {
        let vertices = [
            [-1.0, -1.0, -1.0],
            [1.0, -1.0, -1.0],
            [1.0, 1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0],
            [1.0, -1.0, 1.0],
            [1.0, 1.0, 1.0],
            [-1.0, 1.0, 1.0],
        ]
        .into_iter()
        .map(DVec3::from)
        .collect();

        let faces = [
            [0, 1, 2, 3], // front
            [5, 4, 7, 6], // back
            [4, 0, 3, 7], // left
            [1, 5, 6, 2], // right
            [3, 2, 6, 7], // top
            [4, 5, 1, 0], // bottom
        ]
        .into_iter()
        .map(|f| f.into_iter().collect())
        .collect();

        Self { vertices, faces }
    }

    /// Parse OBJ text.
    pub fn parse_obj(src: &str) -> Result<Self> {
        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        let mut oversized = 0usize;

        for (n, line) in src.lines().enumerate() {
            let lineno = n + 1;
            if let Some(rest) = line.strip_prefix("v ") {
                vertices.push(parse_vertex(rest).with_context(|| format!("line {lineno}"))?);
            } else if let Some(rest) = line.strip_prefix("f ") {
                match parse_face(rest).with_context(|| format!("line {lineno}"))? {
                    Some(face) => faces.push(face),
                    None => oversized += 1,
                }
            }
        }

        if oversized > 0 {
            log::warn!("skipped {oversized} faces with more than {MAX_FACE_VERTICES} vertices");
        }
        Self::from_parts(vertices, faces)
    }

    /// Read and parse an OBJ file.
    pub fn load_obj(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("read OBJ: {}", path.display()))?;
        Self::parse_obj(&src).with_context(|| format!("parse OBJ: {}", path.display()))
    }

    /// Load `path`, or fall back to the cube when there is no path or loading
    /// fails for any reason.
    pub fn load_or_cube(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::cube();
        };
        match Self::load_obj(path) {
            Ok(mesh) => {
                log::info!(
                    "loaded {}: {} vertices, {} faces",
                    path.display(),
                    mesh.vertices.len(),
                    mesh.faces.len()
                );
                mesh
            }
            Err(e) => {
                log::warn!("could not load '{}': {e:#}; using cube", path.display());
                Self::cube()
            }
        }
    }

    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }
}

fn parse_vertex(rest: &str) -> Result<DVec3> {
    let mut it = rest.split_whitespace();
    let mut coord = |axis: &str| -> Result<f64> {
        let tok = it
            .next()
            .with_context(|| format!("vertex is missing its {axis} coordinate"))?;
        tok.parse::<f64>()
            .with_context(|| format!("bad {axis} coordinate {tok:?}"))
    };
    Ok(DVec3::new(coord("x")?, coord("y")?, coord("z")?))
}

/// `None` when the face has more than `MAX_FACE_VERTICES` corners.
///
/// Indices that are zero or negative (OBJ relative references) become
/// `usize::MAX` so the face is rejected as out of range.
fn parse_face(rest: &str) -> Result<Option<Face>> {
    let mut face = Face::new();
    for tok in rest.split_whitespace() {
        let head = tok.split('/').next().unwrap_or(tok);
        let idx: i64 = head
            .parse()
            .with_context(|| format!("bad face reference {tok:?}"))?;
        let idx = if idx >= 1 {
            (idx - 1) as usize
        } else {
            usize::MAX
        };
        if face.try_push(idx).is_err() {
            return Ok(None);
        }
    }
    Ok(Some(face))
}
