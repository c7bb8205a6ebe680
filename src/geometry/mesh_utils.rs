// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh validation utilities

use super::Mesh;
use serde::{Deserialize, Serialize};

/// Dangling-reference report for a mesh
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshValidation {
    pub vertex_count: usize,
    pub face_count: usize,
    /// Faces with a vertex index past the vertex list
    pub dangling_faces: Vec<usize>,
    /// Faces with a texture slot past the texture list
    pub dangling_textures: Vec<usize>,
    /// Selections (by name) holding an out-of-range vertex
    pub dangling_selections: Vec<String>,
    /// Action points (by name) on an out-of-range vertex
    pub dangling_action_points: Vec<String>,
    /// Animation groups with an out-of-range member or origin
    pub dangling_groups: Vec<usize>,
    /// Linked attachments naming an action point the mesh lacks
    pub unresolved_links: Vec<String>,
    pub origin_valid: bool,
}

impl MeshValidation {
    pub fn is_valid(&self) -> bool {
        self.indices_valid() && self.unresolved_links.is_empty()
    }

    /// Every numeric index is in bounds; named links are not considered
    pub fn indices_valid(&self) -> bool {
        self.index_issue_count() == 0
    }

    pub fn index_issue_count(&self) -> usize {
        usize::from(!self.origin_valid)
            + self.dangling_faces.len()
            + self.dangling_textures.len()
            + self.dangling_selections.len()
            + self.dangling_action_points.len()
            + self.dangling_groups.len()
    }

    /// Count of individual problems found
    pub fn issue_count(&self) -> usize {
        self.index_issue_count() + self.unresolved_links.len()
    }
}

/// Check every index a mesh holds against the arrays it points into
pub fn validate_mesh(mesh: &Mesh) -> MeshValidation {
    let vertex_count = mesh.vertices.len();
    let in_range = |index: &usize| *index < vertex_count;

    let mut report = MeshValidation {
        vertex_count,
        face_count: mesh.faces.len(),
        origin_valid: in_range(&mesh.origin),
        ..Default::default()
    };

    for (i, face) in mesh.faces.iter().enumerate() {
        if !face.indices.iter().all(in_range) {
            report.dangling_faces.push(i);
        }
        if face.texture.is_some_and(|slot| slot >= mesh.textures.len()) {
            report.dangling_textures.push(i);
        }
    }

    report.dangling_selections = mesh
        .selections
        .iter()
        .filter(|s| !s.vertices.iter().all(in_range))
        .map(|s| s.name.clone())
        .collect();

    report.dangling_action_points = mesh
        .action_points
        .iter()
        .filter(|p| !in_range(&p.vertex))
        .map(|p| p.name.clone())
        .collect();

    report.dangling_groups = mesh
        .groups
        .iter()
        .enumerate()
        .filter(|(_, g)| !in_range(&g.origin) || !g.vertices.iter().all(in_range))
        .map(|(i, _)| i)
        .collect();

    report.unresolved_links = mesh
        .linked
        .iter()
        .filter(|link| mesh.action_point_vertex(&link.action_point).is_none())
        .map(|link| link.object.clone())
        .collect();

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{AnimationGroup, Face, LinkedAttachment, Selection, Vertex};

    #[test]
    fn test_valid_mesh() {
        let mut mesh = Mesh::new();
        for x in 0..3 {
            mesh.add_vertex(&Vertex::at(x as f32, 0.0, 0.0));
        }
        mesh.faces.push(Face::new([0, 1, 2], None));
        mesh.selections.push(Selection::with_vertices("head", vec![0, 2]));

        let report = validate_mesh(&mesh);
        assert!(report.is_valid());
        assert_eq!(report.issue_count(), 0);
    }

    #[test]
    fn test_dangling_references() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(&Vertex::at(0.0, 0.0, 0.0));
        mesh.origin = 3;
        mesh.faces.push(Face::new([0, 0, 5], Some(1)));
        mesh.selections.push(Selection::with_vertices("chest", vec![9]));
        mesh.groups.push(AnimationGroup::new("arm", 4));
        mesh.linked.push(LinkedAttachment {
            object: "sword".into(),
            action_point: "primary_attach".into(),
        });

        let report = validate_mesh(&mesh);
        assert!(!report.is_valid());
        assert!(!report.origin_valid);
        assert_eq!(report.dangling_faces, vec![0]);
        assert_eq!(report.dangling_textures, vec![0]);
        assert_eq!(report.dangling_selections, vec!["chest".to_string()]);
        assert_eq!(report.dangling_groups, vec![0]);
        assert_eq!(report.unresolved_links, vec!["sword".to_string()]);
        assert_eq!(report.index_issue_count(), 5);
        assert_eq!(report.issue_count(), 6);
    }
}
