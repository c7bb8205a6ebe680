// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Character mesh representation and dedup-aware editing
//!
//! Every `add_*` operation on [`Mesh`] reuses an existing entry when an
//! equivalent one is already present. Vertex equivalence is decided by
//! [`coincident`] alone, so all dedup paths change together.

use super::BoundingBox;
use crate::texture::{same_texture, TextureHandle};
use nalgebra::{Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

fn zero_normal() -> Vector3<f32> {
    Vector3::zeros()
}

/// Vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3<f32>,
    #[serde(default = "zero_normal")]
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }

    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self::new(Point3::new(x, y, z), Vector3::zeros())
    }
}

/// Vertex equivalence used by every dedup path.
///
/// Exact equality of the three position components. Normals are ignored, so
/// two vertices at the same spot with different normals collapse into one.
#[inline]
pub fn coincident(a: &Vertex, b: &Vertex) -> bool {
    a.position.x == b.position.x && a.position.y == b.position.y && a.position.z == b.position.z
}

/// Triangle referencing three vertices and an optional texture slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub indices: [usize; 3],
    #[serde(default)]
    pub texture: Option<usize>,
    #[serde(default)]
    pub uv: [[f32; 2]; 3],
}

impl Face {
    pub fn new(indices: [usize; 3], texture: Option<usize>) -> Self {
        Self {
            indices,
            texture,
            uv: [[0.0; 2]; 3],
        }
    }
}

/// Named set of vertex indices, e.g. a body zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub name: String,
    #[serde(default)]
    pub vertices: Vec<usize>,
}

impl Selection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
        }
    }

    pub fn with_vertices(name: impl Into<String>, vertices: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            vertices,
        }
    }

    /// Position of `vertex` inside this selection
    pub fn position_of(&self, vertex: usize) -> Option<usize> {
        self.vertices.iter().position(|&v| v == vertex)
    }
}

/// Named pivot vertex with gameplay codes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPoint {
    pub name: String,
    pub vertex: usize,
    #[serde(default)]
    pub action: i32,
    #[serde(default)]
    pub effect: i32,
}

/// Vertices moved together by the animation system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationGroup {
    pub name: String,
    #[serde(default)]
    pub vertices: Vec<usize>,
    pub origin: usize,
    #[serde(default)]
    pub size: f32,
}

impl AnimationGroup {
    pub fn new(name: impl Into<String>, origin: usize) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            origin,
            size: 0.0,
        }
    }
}

/// Another object attached to this mesh at a named action point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedAttachment {
    pub object: String,
    pub action_point: String,
}

/// Segmented character mesh
#[derive(Debug, Clone)]
pub struct Mesh {
    pub ident: i64,
    pub position: Point3<f32>,
    pub angle: Vector3<f32>,
    pub orientation: UnitQuaternion<f32>,
    pub bounds: BoundingBox,
    /// Pivot position in object space
    pub pivot: Point3<f32>,
    /// Index of the pivot vertex
    pub origin: usize,
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
    pub textures: Vec<TextureHandle>,
    pub selections: Vec<Selection>,
    pub action_points: Vec<ActionPoint>,
    pub groups: Vec<AnimationGroup>,
    pub linked: Vec<LinkedAttachment>,
    /// Texture names recorded before the first skin swap
    pub original_textures: Option<Vec<String>>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            ident: 0,
            position: Point3::origin(),
            angle: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            bounds: BoundingBox::empty(),
            pivot: Point3::origin(),
            origin: 0,
            vertices: Vec::new(),
            faces: Vec::new(),
            textures: Vec::new(),
            selections: Vec::new(),
            action_points: Vec::new(),
            groups: Vec::new(),
            linked: Vec::new(),
            original_textures: None,
        }
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get face count
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Compute bounds from the current vertices
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_vertices(&self.vertices)
    }

    /// Index of a vertex coincident with `vertex`
    pub fn find_equivalent_vertex(&self, vertex: &Vertex) -> Option<usize> {
        self.vertices.iter().position(|v| coincident(v, vertex))
    }

    /// Add a vertex unless a coincident one exists; returns its index either way
    pub fn add_vertex(&mut self, vertex: &Vertex) -> usize {
        if let Some(index) = self.find_equivalent_vertex(vertex) {
            return index;
        }
        self.vertices.push(*vertex);
        self.vertices.len() - 1
    }

    /// Slot holding this exact texture handle
    pub fn texture_slot(&self, texture: &TextureHandle) -> Option<usize> {
        self.textures.iter().position(|t| same_texture(t, texture))
    }

    /// Register a texture handle; returns the existing slot if already present
    pub fn add_texture(&mut self, texture: &TextureHandle) -> usize {
        if let Some(slot) = self.texture_slot(texture) {
            return slot;
        }
        self.textures.push(texture.clone());
        self.textures.len() - 1
    }

    /// Copy a face of `source` into this mesh.
    ///
    /// Returns `None` when a face with the same corner positions, in the same
    /// order, already exists here. Corner vertices are inserted through
    /// [`Mesh::add_vertex`], so shared edges end up sharing vertices. The
    /// texture slot is remapped to this mesh's slot for the same handle; the
    /// handle must already be registered with [`Mesh::add_texture`] or the
    /// copied face ends up untextured.
    pub fn add_face(&mut self, face: &Face, source: &Mesh) -> Option<usize> {
        let corners = [
            source.vertices.get(face.indices[0])?,
            source.vertices.get(face.indices[1])?,
            source.vertices.get(face.indices[2])?,
        ];

        if self.contains_face(&corners) {
            return None;
        }

        let indices = corners.map(|corner| self.add_vertex(corner));
        let texture = face
            .texture
            .and_then(|slot| source.textures.get(slot))
            .and_then(|handle| self.texture_slot(handle));

        self.faces.push(Face {
            indices,
            texture,
            ..*face
        });
        Some(self.faces.len() - 1)
    }

    fn contains_face(&self, corners: &[&Vertex; 3]) -> bool {
        self.faces.iter().any(|existing| {
            existing
                .indices
                .iter()
                .zip(corners.iter())
                .all(|(&index, corner)| {
                    self.vertices
                        .get(index)
                        .is_some_and(|vertex| coincident(vertex, corner))
                })
        })
    }

    /// Index of the first selection named `name`, ignoring case
    pub fn selection_index(&self, name: &str) -> Option<usize> {
        self.selections
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn selection(&self, name: &str) -> Option<&Selection> {
        self.selection_index(name).map(|i| &self.selections[i])
    }

    /// Position of `vertex` inside selection `selection`.
    ///
    /// An absent or out-of-range selection simply contains nothing, which lets
    /// callers test optional regions without branching.
    pub fn position_in_selection(&self, vertex: usize, selection: Option<usize>) -> Option<usize> {
        self.selections.get(selection?)?.position_of(vertex)
    }

    pub fn is_in_selection(&self, vertex: usize, selection: Option<usize>) -> bool {
        self.position_in_selection(vertex, selection).is_some()
    }

    /// Append an empty selection and return its index
    pub fn add_selection(&mut self, name: impl Into<String>) -> usize {
        self.selections.push(Selection::new(name));
        self.selections.len() - 1
    }

    /// Add a vertex index to a selection unless it is already a member
    pub fn add_to_selection(&mut self, selection: usize, vertex: usize) {
        if let Some(selection) = self.selections.get_mut(selection) {
            if selection.position_of(vertex).is_none() {
                selection.vertices.push(vertex);
            }
        }
    }

    /// Vertex index of the first action point named `name`, ignoring case
    pub fn action_point_vertex(&self, name: &str) -> Option<usize> {
        self.action_points
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.vertex)
    }

    /// Insert `vertex`, then register an action point on it.
    ///
    /// If an action point with the same name already exists its index is
    /// returned and nothing else changes, but the vertex stays inserted.
    pub fn add_action_point(&mut self, name: &str, action: i32, effect: i32, vertex: &Vertex) -> usize {
        let index = self.add_vertex(vertex);

        if let Some(existing) = self
            .action_points
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
        {
            return existing;
        }

        self.action_points.push(ActionPoint {
            name: name.to_string(),
            vertex: index,
            action,
            effect,
        });
        self.action_points.len() - 1
    }

    /// Add a vertex index to an animation group unless already a member
    pub fn add_to_group(&mut self, group: usize, vertex: usize) {
        if let Some(group) = self.groups.get_mut(group) {
            if !group.vertices.contains(&vertex) {
                group.vertices.push(vertex);
            }
        }
    }

    /// Add every vertex coincident with `vertex` to an animation group
    pub fn add_vertex_to_group(&mut self, group: usize, vertex: &Vertex) {
        let matches: Vec<usize> = self
            .vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| coincident(v, vertex))
            .map(|(i, _)| i)
            .collect();

        for index in matches {
            self.add_to_group(group, index);
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
