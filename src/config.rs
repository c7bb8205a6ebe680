// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Tweak configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up by [`TweakConfig::load`]
pub const CONFIG_FILE: &str = "meshtweak.toml";

/// Mesh tweaking configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweakConfig {
    /// Master switch; when off every tweak request is ignored
    pub allow_mesh_tweaking: bool,
    /// Directory all asset paths are relative to
    pub asset_root: PathBuf,
    /// Directory under the root searched first for meshes
    pub game_dir: String,
    /// Extension of mesh documents
    pub mesh_extension: String,
    /// Directory holding skin textures
    pub texture_dir: String,
    /// Extension of skin textures
    pub texture_extension: String,
}

impl Default for TweakConfig {
    fn default() -> Self {
        Self {
            allow_mesh_tweaking: true,
            asset_root: PathBuf::from("."),
            game_dir: "game".to_string(),
            mesh_extension: "json".to_string(),
            texture_dir: "graph/obj3d/textures".to_string(),
            texture_extension: "bmp".to_string(),
        }
    }
}

impl TweakConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: TweakConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `meshtweak.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if Path::new(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(allow) = std::env::var("MESHTWEAK_ALLOW") {
            self.allow_mesh_tweaking = matches!(
                allow.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        if let Ok(root) = std::env::var("MESHTWEAK_ASSET_ROOT") {
            self.asset_root = PathBuf::from(root);
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Full texture name for a skin, e.g. `graph/obj3d/textures/npc_human_chest.bmp`
    pub fn texture_path(&self, skin: &str) -> String {
        format!(
            "{}/{}.{}",
            self.texture_dir.trim_end_matches('/'),
            skin,
            self.texture_extension
        )
    }
}
