//! Scene graph: an arena that owns meshes plus a flat list of placed instances.
//!
//! Instances refer to meshes through `MeshHandle`, so any number of them can
//! share one loaded mesh without copying it.

use crate::mesh::Mesh;
use crate::types::DVec3;

/// Index of a mesh inside a `MeshArena`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(usize);

/// Owns every mesh loaded for the session. Meshes are never removed.
#[derive(Debug, Default, Clone)]
pub struct MeshArena {
    meshes: Vec<Mesh>,
}

impl MeshArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mesh: Mesh) -> MeshHandle {
        self.meshes.push(mesh);
        MeshHandle(self.meshes.len() - 1)
    }

    pub fn get(&self, handle: MeshHandle) -> Option<&Mesh> {
        self.meshes.get(handle.0)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

/// A mesh placed at a world-space offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    pub mesh: MeshHandle,
    pub translation: DVec3,
}

/// Ordered list of instances to draw.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    instances: Vec<Instance>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mesh: MeshHandle, translation: DVec3) {
        self.instances.push(Instance { mesh, translation });
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instances_share_one_mesh() {
        let mut arena = MeshArena::new();
        let cube = arena.insert(Mesh::cube());

        let mut scene = Scene::new();
        scene.add(cube, DVec3::ZERO);
        scene.add(cube, DVec3::new(3.0, 0.0, 0.0));

        assert_eq!(arena.len(), 1);
        assert_eq!(scene.len(), 2);
        assert!(scene.instances().iter().all(|i| i.mesh == cube));
        assert!(arena.get(cube).is_some());
    }

    #[test]
    fn clear_keeps_arena() {
        let mut arena = MeshArena::new();
        let h = arena.insert(Mesh::cube());
        let mut scene = Scene::new();
        scene.add(h, DVec3::ZERO);
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn foreign_handle_is_none() {
        let arena = MeshArena::new();
        assert!(arena.get(MeshHandle(3)).is_none());
    }
}
