// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Tweak requests against live objects

use super::intermediary::build_intermediary_mesh;
use super::skin::tweak_skin;
use crate::config::TweakConfig;
use crate::error::{TweakError, TweakResult};
use crate::geometry::{BodyRegion, Mesh};
use crate::io::MeshLoader;
use crate::utils::standardize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// What part of an object's mesh a tweak replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TweakKind {
    None,
    Head,
    Torso,
    Legs,
    /// Head then torso
    Upper,
    /// Torso then legs
    Lower,
    /// Torso of the live mesh onto head and legs of the loaded one
    UpperFromLower,
    /// Whole mesh, no merge
    All,
    /// Go back to the mesh saved before the first tweak
    Remove,
}

impl TweakKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TweakKind::None => "none",
            TweakKind::Head => "head",
            TweakKind::Torso => "torso",
            TweakKind::Legs => "legs",
            TweakKind::Upper => "upper",
            TweakKind::Lower => "lower",
            TweakKind::UpperFromLower => "upper_from_lower",
            TweakKind::All => "all",
            TweakKind::Remove => "remove",
        }
    }

    /// Region replaced by a single-region tweak
    pub fn region(&self) -> Option<BodyRegion> {
        match self {
            TweakKind::Head => Some(BodyRegion::Head),
            TweakKind::Torso => Some(BodyRegion::Chest),
            TweakKind::Legs => Some(BodyRegion::Leggings),
            _ => None,
        }
    }
}

impl fmt::Display for TweakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TweakKind {
    type Err = TweakError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "none" => Ok(TweakKind::None),
            "head" => Ok(TweakKind::Head),
            "torso" | "chest" => Ok(TweakKind::Torso),
            "legs" | "leggings" => Ok(TweakKind::Legs),
            "upper" => Ok(TweakKind::Upper),
            "lower" => Ok(TweakKind::Lower),
            "upper_from_lower" | "up_lo" => Ok(TweakKind::UpperFromLower),
            "all" => Ok(TweakKind::All),
            "remove" => Ok(TweakKind::Remove),
            _ => Err(TweakError::InvalidTweakKind(s.to_string())),
        }
    }
}

/// Result of a tweak request that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweakOutcome {
    /// A new mesh is live
    Replaced,
    /// The saved original is live again
    Restored,
    /// Nothing to do
    Unchanged,
    /// Tweaking is switched off
    Disabled,
}

/// Ownership of an object's meshes.
///
/// `Pristine` holds only the live mesh. The first install moves it into the
/// `original` slot of `Tweaked`; later installs replace only `live`, releasing
/// the previous live mesh while `original` stays put until a restore.
#[derive(Debug, Clone)]
pub enum MeshSlot {
    Pristine(Arc<Mesh>),
    Tweaked { live: Arc<Mesh>, original: Arc<Mesh> },
}

impl MeshSlot {
    pub fn live(&self) -> &Arc<Mesh> {
        match self {
            MeshSlot::Pristine(live) | MeshSlot::Tweaked { live, .. } => live,
        }
    }

    pub fn original(&self) -> Option<&Arc<Mesh>> {
        match self {
            MeshSlot::Pristine(_) => None,
            MeshSlot::Tweaked { original, .. } => Some(original),
        }
    }

    pub fn is_tweaked(&self) -> bool {
        matches!(self, MeshSlot::Tweaked { .. })
    }

    /// Make `mesh` live
    pub fn install(&mut self, mesh: Arc<Mesh>) {
        let original = match self {
            MeshSlot::Pristine(live) => Arc::clone(live),
            MeshSlot::Tweaked { original, .. } => Arc::clone(original),
        };
        *self = MeshSlot::Tweaked {
            live: mesh,
            original,
        };
    }

    /// Make the saved original live again; false when there is none
    pub fn restore(&mut self) -> bool {
        let MeshSlot::Tweaked { original, .. } = self else {
            return false;
        };
        let original = Arc::clone(original);
        *self = MeshSlot::Pristine(original);
        true
    }
}

/// Game object carrying a tweakable mesh
#[derive(Debug, Clone)]
pub struct InteractiveObject {
    pub name: String,
    slot: MeshSlot,
    pub last_anim_time: u64,
    pub last_anim_vertex_count: usize,
}

impl InteractiveObject {
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        Self::with_shared(name, Arc::new(mesh))
    }

    pub fn with_shared(name: impl Into<String>, mesh: Arc<Mesh>) -> Self {
        Self {
            name: name.into(),
            slot: MeshSlot::Pristine(mesh),
            last_anim_time: 0,
            last_anim_vertex_count: 0,
        }
    }

    /// The live mesh; clone the `Arc` to keep it past a later tweak
    pub fn mesh(&self) -> &Arc<Mesh> {
        self.slot.live()
    }

    /// Mutable access to the live mesh, copied first if someone else holds it
    pub fn mesh_mut(&mut self) -> &mut Mesh {
        match &mut self.slot {
            MeshSlot::Pristine(live) | MeshSlot::Tweaked { live, .. } => Arc::make_mut(live),
        }
    }

    pub fn original_mesh(&self) -> Option<&Arc<Mesh>> {
        self.slot.original()
    }

    pub fn is_tweaked(&self) -> bool {
        self.slot.is_tweaked()
    }

    fn install(&mut self, mesh: Mesh) {
        self.slot.install(Arc::new(mesh));
        self.reset_animation_cache();
    }

    fn restore_original(&mut self) -> bool {
        let restored = self.slot.restore();
        if restored {
            self.reset_animation_cache();
        }
        restored
    }

    fn reset_animation_cache(&mut self) {
        self.last_anim_time = 0;
        self.last_anim_vertex_count = 0;
    }
}

/// Applies tweak requests, loading source meshes through `L`
#[derive(Debug)]
pub struct MeshTweaker<L> {
    config: TweakConfig,
    loader: L,
}

impl<L: MeshLoader> MeshTweaker<L> {
    pub fn new(config: TweakConfig, loader: L) -> Self {
        Self { config, loader }
    }

    pub fn config(&self) -> &TweakConfig {
        &self.config
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    /// Apply `kind` to `object` using the mesh at `path`.
    ///
    /// On error the object keeps its current mesh.
    pub fn apply(
        &mut self,
        object: &mut InteractiveObject,
        kind: TweakKind,
        path: &str,
    ) -> TweakResult<TweakOutcome> {
        if !self.config.allow_mesh_tweaking {
            log::debug!("Mesh tweaking disabled, ignoring {} on {}", kind, object.name);
            return Ok(TweakOutcome::Disabled);
        }

        let path = standardize(path);
        let outcome = self.apply_inner(object, kind, &path);

        match &outcome {
            Ok(TweakOutcome::Replaced) => {
                log::info!(
                    "Tweaked {} ({}) with {}: {} vertices, {} faces",
                    object.name,
                    kind,
                    path,
                    object.mesh().vertex_count(),
                    object.mesh().face_count()
                );
            }
            Ok(TweakOutcome::Restored) => log::info!("Restored original mesh of {}", object.name),
            Ok(_) => {}
            Err(e) => log::warn!("Tweak {} of {} with {} failed: {}", kind, object.name, path, e),
        }

        outcome
    }

    fn apply_inner(
        &mut self,
        object: &mut InteractiveObject,
        kind: TweakKind,
        path: &str,
    ) -> TweakResult<TweakOutcome> {
        match kind {
            TweakKind::None => return Ok(TweakOutcome::Unchanged),
            TweakKind::Remove if path.is_empty() => {
                return Ok(if object.restore_original() {
                    TweakOutcome::Restored
                } else {
                    TweakOutcome::Unchanged
                });
            }
            TweakKind::Remove => return Ok(TweakOutcome::Unchanged),
            _ => {}
        }

        let loaded = self
            .loader
            .load(path)
            .map_err(|e| TweakError::LoadFailure {
                path: path.to_string(),
                source: e.into(),
            })?;

        let live = object.mesh();
        let result = match kind {
            TweakKind::All => {
                for face in &loaded.faces {
                    if let Some(texture) = face.texture.and_then(|slot| loaded.textures.get(slot)) {
                        if !texture.is_resident() {
                            texture.restore();
                        }
                    }
                }
                loaded
            }
            TweakKind::Upper => {
                let head = build_intermediary_mesh(live, &loaded, BodyRegion::Head)?;
                build_intermediary_mesh(&head, &loaded, BodyRegion::Chest)?
            }
            TweakKind::Lower => {
                let torso = build_intermediary_mesh(live, &loaded, BodyRegion::Chest)?;
                build_intermediary_mesh(&torso, &loaded, BodyRegion::Leggings)?
            }
            TweakKind::UpperFromLower => build_intermediary_mesh(&loaded, live, BodyRegion::Chest)?,
            TweakKind::Head | TweakKind::Torso | TweakKind::Legs => {
                let region = kind
                    .region()
                    .ok_or_else(|| TweakError::InvalidTweakKind(kind.to_string()))?;
                build_intermediary_mesh(live, &loaded, region)?
            }
            TweakKind::None | TweakKind::Remove => return Ok(TweakOutcome::Unchanged),
        };

        object.install(result);
        Ok(TweakOutcome::Replaced)
    }

    /// Swap skin `from` for skin `to` on the object's live mesh.
    ///
    /// Skin names are short texture names resolved under the configured texture directory.
    pub fn tweak_skin(&mut self, object: &mut InteractiveObject, from: &str, to: &str) -> bool {
        if from.trim().is_empty() || to.trim().is_empty() {
            log::error!("Skin tweak on {} got an empty skin name", object.name);
            return false;
        }
        let from = self.config.texture_path(from);
        let to = self.config.texture_path(to);
        tweak_skin(object.mesh_mut(), &from, &to, self.loader.textures())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("HEAD".parse::<TweakKind>().unwrap(), TweakKind::Head);
        assert_eq!("up-lo".parse::<TweakKind>().unwrap(), TweakKind::UpperFromLower);
        assert_eq!("leggings".parse::<TweakKind>().unwrap(), TweakKind::Legs);
        assert!(matches!(
            "arms".parse::<TweakKind>(),
            Err(TweakError::InvalidTweakKind(s)) if s == "arms"
        ));
        for kind in [TweakKind::Upper, TweakKind::Remove, TweakKind::All] {
            assert_eq!(kind.as_str().parse::<TweakKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_slot_transitions() {
        let first = Arc::new(Mesh::new());
        let second = Arc::new(Mesh::new());
        let third = Arc::new(Mesh::new());

        let mut slot = MeshSlot::Pristine(first.clone());
        assert!(!slot.restore());

        slot.install(second.clone());
        assert!(Arc::ptr_eq(slot.live(), &second));
        assert!(Arc::ptr_eq(slot.original().unwrap(), &first));

        slot.install(third.clone());
        assert!(Arc::ptr_eq(slot.live(), &third));
        assert!(Arc::ptr_eq(slot.original().unwrap(), &first));
        // The second mesh is no longer held by the slot
        assert_eq!(Arc::strong_count(&second), 1);

        assert!(slot.restore());
        assert!(Arc::ptr_eq(slot.live(), &first));
        assert!(slot.original().is_none());
    }
}
