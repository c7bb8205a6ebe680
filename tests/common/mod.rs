// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shared fixtures: a segmented humanoid strip
//!
//! Seven rows of two vertices, row `r` at height `r`. Rows 0-2 are leggings,
//! 2-4 chest and 4-6 head; the seam rows 2 and 4 belong to two zones each and
//! never move, every other row is stretched sideways by `width`.

#![allow(dead_code)]

use meshtweak::geometry::{
    ActionPoint, AnimationGroup, Face, LinkedAttachment, Mesh, Selection, Vertex,
};
use meshtweak::TextureLibrary;
use nalgebra::Point3;

pub const ROWS: usize = 7;

pub fn index(row: usize, col: usize) -> usize {
    row * 2 + col
}

pub fn row_width(row: usize, width: f32) -> f32 {
    if row == 2 || row == 4 {
        1.0
    } else {
        width
    }
}

pub fn humanoid(width: f32, skin: &str, library: &mut TextureLibrary) -> Mesh {
    let mut mesh = Mesh::new();
    mesh.ident = 7;

    for row in 0..ROWS {
        for col in 0..2 {
            mesh.vertices
                .push(Vertex::at(col as f32 * row_width(row, width), row as f32, 0.0));
        }
    }

    for part in ["legs", "chest", "head"] {
        mesh.textures.push(library.acquire(&format!(
            "graph/obj3d/textures/{}_{}.bmp",
            skin, part
        )));
    }

    for r in 0..ROWS - 1 {
        let texture = match r {
            0 | 1 => 0,
            2 | 3 => 1,
            _ => 2,
        };
        let (a, b, c, d) = (index(r, 0), index(r, 1), index(r + 1, 1), index(r + 1, 0));
        mesh.faces.push(Face::new([a, b, c], Some(texture)));
        mesh.faces.push(Face::new([a, c, d], Some(texture)));
    }

    mesh.selections = vec![
        Selection::with_vertices("leggings", (index(0, 0)..=index(2, 1)).collect()),
        Selection::with_vertices("chest", (index(2, 0)..=index(4, 1)).collect()),
        Selection::with_vertices("head", (index(4, 0)..=index(6, 1)).collect()),
        Selection::with_vertices(
            "seam",
            vec![index(2, 0), index(2, 1), index(4, 0), index(4, 1)],
        ),
    ];

    let point = |name: &str, vertex: usize, action: i32| ActionPoint {
        name: name.to_string(),
        vertex,
        action,
        effect: 0,
    };
    mesh.action_points = vec![
        point("head2chest", index(4, 0), 1),
        point("chest2leggings", index(2, 0), 2),
        point("weapon", index(3, 1), 3),
        point("head_fx", index(6, 1), 4),
    ];

    let group = |name: &str, origin: usize, rows: std::ops::Range<usize>, size: f32| AnimationGroup {
        name: name.to_string(),
        vertices: (index(rows.start, 0)..index(rows.end, 0)).collect(),
        origin,
        size,
    };
    mesh.groups = vec![
        group("root", index(0, 0), 0..2, width),
        group("spine", index(3, 0), 2..4, 2.0 * width),
        group("skull", index(6, 0), 4..7, 3.0 * width),
    ];

    mesh.linked = vec![LinkedAttachment {
        object: format!("{}_sword", skin),
        action_point: "weapon".to_string(),
    }];

    mesh.origin = 0;
    mesh.bounds = mesh.bounding_box();
    mesh
}

pub fn position(mesh: &Mesh, vertex: usize) -> [f32; 3] {
    let p = mesh.vertices[vertex].position;
    [p.x, p.y, p.z]
}

pub fn selection_positions(mesh: &Mesh, name: &str) -> Vec<[f32; 3]> {
    mesh.selection(name)
        .map(|s| s.vertices.iter().map(|&v| position(mesh, v)).collect())
        .unwrap_or_default()
}

pub fn has_vertex(mesh: &Mesh, p: [f32; 3]) -> bool {
    mesh.find_equivalent_vertex(&Vertex::at(p[0], p[1], p[2])).is_some()
}

pub fn has_face(mesh: &Mesh, corners: [[f32; 3]; 3]) -> bool {
    mesh.faces.iter().any(|face| {
        face.indices
            .iter()
            .zip(corners.iter())
            .all(|(&i, c)| mesh.vertices[i].position == Point3::new(c[0], c[1], c[2]))
    })
}

/// Owned copy of the comparable parts of a mesh
pub fn snapshot(
    mesh: &Mesh,
) -> (
    Vec<Vertex>,
    Vec<Face>,
    Vec<Selection>,
    Vec<ActionPoint>,
    Vec<AnimationGroup>,
) {
    (
        mesh.vertices.clone(),
        mesh.faces.clone(),
        mesh.selections.clone(),
        mesh.action_points.clone(),
        mesh.groups.clone(),
    )
}
