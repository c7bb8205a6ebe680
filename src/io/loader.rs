// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh loaders

use super::document::load_document;
use crate::config::TweakConfig;
use crate::geometry::Mesh;
use crate::texture::TextureLibrary;
use crate::utils::standardize;
use anyhow::{bail, Result};
use std::collections::HashMap;
use std::path::PathBuf;

/// Produces meshes from asset paths
pub trait MeshLoader {
    /// Load the mesh stored at `path`
    fn load(&mut self, path: &str) -> Result<Mesh>;

    /// Library that texture names are bound through
    fn textures(&mut self) -> &mut TextureLibrary;
}

/// Loads mesh documents from an asset directory
#[derive(Debug)]
pub struct FileMeshLoader {
    root: PathBuf,
    game_dir: String,
    extension: String,
    library: TextureLibrary,
}

impl FileMeshLoader {
    pub fn new(config: &TweakConfig) -> Self {
        Self {
            root: config.asset_root.clone(),
            game_dir: config.game_dir.clone(),
            extension: config.mesh_extension.clone(),
            library: TextureLibrary::new(),
        }
    }

    /// Files tried for `path`, in order
    pub fn candidates(&self, path: &str) -> Vec<PathBuf> {
        let path = standardize(path);
        if path.is_empty() {
            return Vec::new();
        }

        let mut preferred = self.root.join(&self.game_dir).join(&path);
        preferred.set_extension(&self.extension);

        vec![preferred, self.root.join(&path)]
    }

    /// First existing file for `path`
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        self.candidates(path).into_iter().find(|p| p.is_file())
    }
}

impl MeshLoader for FileMeshLoader {
    fn load(&mut self, path: &str) -> Result<Mesh> {
        let Some(file) = self.resolve(path) else {
            bail!("Mesh not found: {}", path);
        };
        log::debug!("Loading mesh {} from {}", path, file.display());
        let document = load_document(&file)?;
        Ok(document.into_mesh(&mut self.library))
    }

    fn textures(&mut self) -> &mut TextureLibrary {
        &mut self.library
    }
}

/// Serves preloaded meshes, keyed by standardized path
#[derive(Debug, Default)]
pub struct MemoryMeshLoader {
    meshes: HashMap<String, Mesh>,
    library: TextureLibrary,
}

impl MemoryMeshLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build on an existing texture library so preloaded meshes can share its handles
    pub fn with_library(library: TextureLibrary) -> Self {
        Self {
            meshes: HashMap::new(),
            library,
        }
    }

    pub fn insert(&mut self, path: &str, mesh: Mesh) {
        self.meshes.insert(standardize(path), mesh);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.meshes.contains_key(&standardize(path))
    }
}

impl MeshLoader for MemoryMeshLoader {
    fn load(&mut self, path: &str) -> Result<Mesh> {
        match self.meshes.get(&standardize(path)) {
            Some(mesh) => Ok(mesh.clone()),
            None => bail!("Mesh not found: {}", path),
        }
    }

    fn textures(&mut self) -> &mut TextureLibrary {
        &mut self.library
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vertex;
    use crate::io::save_mesh;
    use tempfile::tempdir;

    fn point_mesh() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(&Vertex::at(1.0, 2.0, 3.0));
        mesh
    }

    #[test]
    fn test_candidates() {
        let config = TweakConfig {
            asset_root: PathBuf::from("/assets"),
            ..Default::default()
        };
        let loader = FileMeshLoader::new(&config);

        assert_eq!(
            loader.candidates("Graph\\Obj3D\\Human.teo"),
            vec![
                PathBuf::from("/assets/game/graph/obj3d/human.json"),
                PathBuf::from("/assets/graph/obj3d/human.teo"),
            ]
        );
        assert!(loader.candidates("").is_empty());
    }

    #[test]
    fn test_load_prefers_game_dir() -> Result<()> {
        let dir = tempdir()?;
        let config = TweakConfig {
            asset_root: dir.path().to_path_buf(),
            ..Default::default()
        };

        std::fs::create_dir_all(dir.path().join("game/npc"))?;
        save_mesh(&point_mesh(), dir.path().join("game/npc/guard.json"))?;

        let mut loader = FileMeshLoader::new(&config);
        let mesh = loader.load("NPC\\Guard.teo")?;
        assert_eq!(mesh.vertex_count(), 1);
        assert!(loader.load("npc/missing").is_err());
        Ok(())
    }

    #[test]
    fn test_load_falls_back_to_root() -> Result<()> {
        let dir = tempdir()?;
        let config = TweakConfig {
            asset_root: dir.path().to_path_buf(),
            ..Default::default()
        };
        save_mesh(&point_mesh(), dir.path().join("head.json"))?;

        let mut loader = FileMeshLoader::new(&config);
        assert_eq!(loader.load("head.json")?.vertex_count(), 1);
        Ok(())
    }

    #[test]
    fn test_memory_loader() {
        let mut loader = MemoryMeshLoader::new();
        loader.insert("Graph\\Head.teo", point_mesh());

        assert!(loader.contains("graph/head.teo"));
        assert!(loader.load("GRAPH/HEAD.TEO").is_ok());
        assert!(loader.load("graph/legs.teo").is_err());
    }
}
