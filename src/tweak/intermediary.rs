// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Pairwise region splicing
//!
//! [`build_intermediary_mesh`] keeps two body regions of a base mesh and takes
//! the third from a source mesh. The result is a fresh mesh with its own vertex
//! numbering; every face, selection, action point and animation group of the
//! inputs is re-resolved into that numbering by vertex position.

use crate::error::{MeshSide, TweakError, TweakResult};
use crate::geometry::classification::{is_joint, require_joints};
use crate::geometry::{
    validate_mesh, AnimationGroup, BodyRegion, CanonicalRegions, Face, Mesh, RegionClassifier,
    RegionPlan,
};
use crate::texture::{same_texture, TextureHandle};

fn require_well_formed(mesh: &Mesh, side: MeshSide) -> TweakResult<()> {
    let report = validate_mesh(mesh);
    if report.indices_valid() {
        Ok(())
    } else {
        Err(TweakError::MalformedMesh {
            side,
            issues: report.index_issue_count(),
        })
    }
}

/// Register the face's texture in `work` when it differs from the last one seen
fn register_face_texture<'a>(
    work: &mut Mesh,
    mesh: &'a Mesh,
    face: &Face,
    last: &mut Option<&'a TextureHandle>,
) {
    let Some(handle) = face.texture.and_then(|slot| mesh.textures.get(slot)) else {
        return;
    };

    if last.map_or(true, |previous| !same_texture(previous, handle)) {
        *last = Some(handle);
        work.add_texture(handle);
    }
}

/// Add members of `mesh` to selection `selection` of `work`, dropping those with no vertex in `work`
fn resolve_members(work: &mut Mesh, selection: usize, mesh: &Mesh, members: &[usize]) {
    for &member in members {
        if let Some(index) = work.find_equivalent_vertex(&mesh.vertices[member]) {
            work.add_to_selection(selection, index);
        }
    }
}

/// Splice `target` from `source` onto the two remaining regions of `base`.
///
/// Both meshes need the `head`, `chest` and `leggings` selections (empty is
/// fine) and the `head2chest` and `chest2leggings` action points. Neither input
/// is modified, whatever the outcome.
pub fn build_intermediary_mesh(base: &Mesh, source: &Mesh, target: BodyRegion) -> TweakResult<Mesh> {
    let base_regions = CanonicalRegions::resolve(base, MeshSide::Base)?;
    let source_regions = CanonicalRegions::resolve(source, MeshSide::Source)?;
    require_joints(base, MeshSide::Base)?;
    require_joints(source, MeshSide::Source)?;
    require_well_formed(base, MeshSide::Base)?;
    require_well_formed(source, MeshSide::Source)?;

    let plan = RegionPlan::for_target(target);
    let base_zones = RegionClassifier::new(base, &base_regions, &plan);
    let source_zones = RegionClassifier::new(source, &source_regions, &plan);

    let mut work = Mesh::new();
    work.ident = base.ident;
    work.position = base.position;
    work.angle = base.angle;
    work.orientation = base.orientation;
    work.bounds = base.bounds;

    work.linked = if base.linked.len() >= source.linked.len() {
        base.linked.clone()
    } else {
        source.linked.clone()
    };

    // Pivot follows whichever mesh owns the region it sits in
    let pivot_mesh = if base_zones.in_target(base.origin) {
        source
    } else {
        base
    };
    work.pivot = pivot_mesh.pivot;
    work.origin = work.add_vertex(&pivot_mesh.vertices[pivot_mesh.origin]);

    // Joints are copied from both sides unconditionally; name dedup keeps the base's
    for point in &base.action_points {
        if base_zones.in_retained(point.vertex) || is_joint(&point.name) {
            work.add_action_point(&point.name, point.action, point.effect, &base.vertices[point.vertex]);
        }
    }
    for point in &source.action_points {
        if source_zones.in_target(point.vertex) || is_joint(&point.name) {
            work.add_action_point(
                &point.name,
                point.action,
                point.effect,
                &source.vertices[point.vertex],
            );
        }
    }

    for (i, vertex) in base.vertices.iter().enumerate() {
        if base_zones.in_retained(i) {
            work.add_vertex(vertex);
        }
    }
    for (i, vertex) in source.vertices.iter().enumerate() {
        if source_zones.in_target(i) {
            work.add_vertex(vertex);
        }
    }

    // Base faces must lie wholly inside the kept regions, source faces only
    // need to touch the target so the seam stays covered.
    let mut last_texture: Option<&TextureHandle> = None;
    let mut duplicate_faces = 0usize;

    for face in &base.faces {
        if face.indices.iter().all(|&i| base_zones.in_retained(i)) {
            register_face_texture(&mut work, base, face, &mut last_texture);
            if work.add_face(face, base).is_none() {
                duplicate_faces += 1;
            }
        }
    }
    for face in &source.faces {
        if face.indices.iter().any(|&i| source_zones.in_target(i)) {
            register_face_texture(&mut work, source, face, &mut last_texture);
            if work.add_face(face, source).is_none() {
                duplicate_faces += 1;
            }
        }
    }

    rebuild_group_frames(&mut work, base, source, &base_zones, &source_zones);

    for region in BodyRegion::ALL {
        let selection = work.add_selection(region.selection_name());
        let (mesh, regions) = if region == target {
            (source, &source_regions)
        } else {
            (base, &base_regions)
        };
        resolve_members(
            &mut work,
            selection,
            mesh,
            &mesh.selections[regions.index(region)].vertices,
        );
    }

    for named in &base.selections {
        if work.selection_index(&named.name).is_some() {
            continue;
        }
        let selection = work.add_selection(named.name.clone());
        resolve_members(&mut work, selection, base, &named.vertices);
        if let Some(twin) = source.selection(&named.name) {
            resolve_members(&mut work, selection, source, &twin.vertices);
        }
    }
    for named in &source.selections {
        if work.selection_index(&named.name).is_some() {
            continue;
        }
        let selection = work.add_selection(named.name.clone());
        resolve_members(&mut work, selection, source, &named.vertices);
    }

    for (k, group) in base.groups.iter().enumerate() {
        for &member in &group.vertices {
            work.add_vertex_to_group(k, &base.vertices[member]);
        }
    }
    for (k, group) in source.groups.iter().enumerate() {
        for &member in &group.vertices {
            work.add_vertex_to_group(k, &source.vertices[member]);
        }
    }

    for texture in &work.textures {
        texture.restore();
    }

    log::debug!(
        "Built intermediary mesh for {}: {} vertices, {} faces ({} duplicates skipped), {} textures, {} selections",
        target,
        work.vertex_count(),
        work.face_count(),
        duplicate_faces,
        work.textures.len(),
        work.selections.len()
    );

    Ok(work)
}

/// Allocate the animation groups of `work` and set their origin and size.
///
/// A group origin moves to the merged vertex only when the side providing it
/// owns that vertex; size follows the last side whose origin resolved.
fn rebuild_group_frames(
    work: &mut Mesh,
    base: &Mesh,
    source: &Mesh,
    base_zones: &RegionClassifier<'_>,
    source_zones: &RegionClassifier<'_>,
) {
    let group_count = base.groups.len().max(source.groups.len());
    let origin = work.origin;
    work.groups = (0..group_count)
        .map(|k| {
            let name = base
                .groups
                .get(k)
                .or_else(|| source.groups.get(k))
                .map_or_else(String::new, |g| g.name.clone());
            AnimationGroup::new(name, origin)
        })
        .collect();

    for (k, group) in base.groups.iter().enumerate() {
        if let Some(v) = work.find_equivalent_vertex(&base.vertices[group.origin]) {
            work.groups[k].size = group.size;
            if base_zones.in_retained(group.origin) {
                work.groups[k].origin = v;
            }
        }
    }
    for (k, group) in source.groups.iter().enumerate() {
        if let Some(v) = work.find_equivalent_vertex(&source.vertices[group.origin]) {
            work.groups[k].size = group.size;
            if source_zones.in_target(group.origin) {
                work.groups[k].origin = v;
            }
        }
    }
}
