// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Skin swapping: retexture a mesh without touching its geometry

use crate::geometry::Mesh;
use crate::texture::{same_texture, TextureLibrary};

fn same_name(a: &str, b: &str) -> bool {
    a.replace('\\', "/").eq_ignore_ascii_case(&b.replace('\\', "/"))
}

/// Replace the texture originally named `from` with texture `to`.
///
/// The names the mesh carried before its first swap are remembered, so `from`
/// keeps referring to the original skin after later swaps. Every slot sharing
/// the replaced handle is rebound. Returns whether anything changed.
pub fn tweak_skin(mesh: &mut Mesh, from: &str, to: &str, library: &mut TextureLibrary) -> bool {
    if from.trim().is_empty() || to.trim().is_empty() {
        log::error!("Skin tweak needs both a texture to replace and a replacement");
        return false;
    }
    log::debug!("Tweak skin {} -> {}", from, to);

    let textures = &mesh.textures;
    let originals = mesh
        .original_textures
        .get_or_insert_with(|| textures.iter().map(|t| t.name().to_string()).collect());

    let current = originals
        .iter()
        .position(|name| same_name(name, from))
        .and_then(|slot| mesh.textures.get(slot).cloned())
        .or_else(|| library.find(from));

    let Some(current) = current else {
        log::warn!("Skin {} is not used by this mesh", from);
        return false;
    };

    let replacement = library.acquire(to);
    replacement.restore();

    let mut changed = false;
    for slot in mesh.textures.iter_mut() {
        if same_texture(slot, &current) && !same_texture(slot, &replacement) {
            *slot = replacement.clone();
            changed = true;
        }
    }
    changed
}
