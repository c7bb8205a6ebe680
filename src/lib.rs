// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Meshtweak
//!
//! Splices body regions (head, chest, leggings) between segmented character
//! meshes. Two meshes go in, one consistent mesh comes out: vertices and faces
//! are deduplicated by position, and selections, action points, animation
//! groups and texture bindings are re-indexed against the merged vertex list.

pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod texture;
pub mod tweak;
pub mod utils;

pub use config::TweakConfig;
pub use error::{MeshSide, TweakError, TweakResult};
pub use geometry::{BodyRegion, Mesh, Vertex};
pub use io::{FileMeshLoader, MemoryMeshLoader, MeshLoader};
pub use texture::{Texture, TextureHandle, TextureLibrary};
pub use tweak::{build_intermediary_mesh, InteractiveObject, MeshTweaker, TweakKind, TweakOutcome};

/// Tweaker over asset files, configured from `meshtweak.toml` and the environment
pub fn file_tweaker() -> anyhow::Result<MeshTweaker<FileMeshLoader>> {
    let config = TweakConfig::load()?;
    let loader = FileMeshLoader::new(&config);
    Ok(MeshTweaker::new(config, loader))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tweaker_is_enabled() {
        let config = TweakConfig::default();
        let tweaker = MeshTweaker::new(config.clone(), FileMeshLoader::new(&config));
        assert!(tweaker.config().allow_mesh_tweaking);
    }
}
