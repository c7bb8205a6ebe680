// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Tweaks driven from mesh documents on disk

mod common;

use anyhow::Result;
use common::{has_vertex, humanoid, selection_positions};
use meshtweak::geometry::validate_mesh;
use meshtweak::io::{load_document, save_mesh};
use meshtweak::{
    FileMeshLoader, InteractiveObject, MeshLoader, MeshTweaker, TextureLibrary, TweakConfig, TweakKind,
    TweakOutcome,
};
use tempfile::tempdir;

#[test]
fn test_head_tweak_from_asset_tree() -> Result<()> {
    let dir = tempdir()?;
    let config = TweakConfig {
        asset_root: dir.path().to_path_buf(),
        ..Default::default()
    };

    let mut library = TextureLibrary::new();
    let base = humanoid(1.0, "base", &mut library);
    let variant = humanoid(2.0, "variant", &mut library);

    std::fs::create_dir_all(dir.path().join("game/npc"))?;
    save_mesh(&variant, dir.path().join("game/npc/variant.json"))?;

    let mut tweaker = MeshTweaker::new(config.clone(), FileMeshLoader::new(&config));
    let mut object = InteractiveObject::new("human_base_0002", base);

    let outcome = tweaker.apply(&mut object, TweakKind::Head, "NPC\\Variant.teo")?;
    assert_eq!(outcome, TweakOutcome::Replaced);
    assert_eq!(object.mesh().vertex_count(), 15);
    assert_eq!(object.mesh().face_count(), 13);

    let out = dir.path().join("tweaked.json");
    save_mesh(object.mesh(), &out)?;
    let reloaded = load_document(&out)?.into_mesh(tweaker.loader_mut().textures());

    assert!(validate_mesh(&reloaded).is_valid());
    assert_eq!(reloaded.vertices, object.mesh().vertices);
    assert_eq!(reloaded.faces, object.mesh().faces);
    assert_eq!(reloaded.bounds, object.mesh().bounds);
    assert!(has_vertex(&reloaded, [2.0, 6.0, 0.0]));
    assert_eq!(
        selection_positions(&reloaded, "head"),
        selection_positions(object.mesh(), "head")
    );

    let names: Vec<&str> = reloaded.textures.iter().map(|t| t.name()).collect();
    assert_eq!(
        names,
        vec![
            "graph/obj3d/textures/base_legs.bmp",
            "graph/obj3d/textures/base_chest.bmp",
            "graph/obj3d/textures/variant_chest.bmp",
            "graph/obj3d/textures/variant_head.bmp",
        ]
    );
    Ok(())
}

#[test]
fn test_missing_asset_leaves_object_alone() -> Result<()> {
    let dir = tempdir()?;
    let config = TweakConfig {
        asset_root: dir.path().to_path_buf(),
        ..Default::default()
    };

    let mut library = TextureLibrary::new();
    let mut tweaker = MeshTweaker::new(config.clone(), FileMeshLoader::new(&config));
    let mut object = InteractiveObject::new("human_base_0003", humanoid(1.0, "base", &mut library));

    assert!(tweaker.apply(&mut object, TweakKind::Torso, "npc/ghost.teo").is_err());
    assert!(!object.is_tweaked());
    Ok(())
}
