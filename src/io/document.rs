// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! On-disk mesh document
//!
//! Same content as [`Mesh`] except that textures are stored by name and bound
//! to shared handles when the document is turned back into a mesh.

use crate::geometry::{
    ActionPoint, AnimationGroup, BoundingBox, Face, LinkedAttachment, Mesh, Selection, Vertex,
};
use crate::texture::TextureLibrary;
use anyhow::{Context, Result};
use nalgebra::{Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_point() -> Point3<f32> {
    Point3::origin()
}

fn default_vector() -> Vector3<f32> {
    Vector3::zeros()
}

fn default_orientation() -> UnitQuaternion<f32> {
    UnitQuaternion::identity()
}

/// Serializable mesh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshDocument {
    #[serde(default)]
    pub ident: i64,
    #[serde(default = "default_point")]
    pub position: Point3<f32>,
    #[serde(default = "default_vector")]
    pub angle: Vector3<f32>,
    #[serde(default = "default_orientation")]
    pub orientation: UnitQuaternion<f32>,
    #[serde(default)]
    pub bounds: Option<BoundingBox>,
    #[serde(default = "default_point")]
    pub pivot: Point3<f32>,
    #[serde(default)]
    pub origin: usize,
    pub vertices: Vec<Vertex>,
    #[serde(default)]
    pub faces: Vec<Face>,
    #[serde(default)]
    pub textures: Vec<String>,
    #[serde(default)]
    pub selections: Vec<Selection>,
    #[serde(default)]
    pub action_points: Vec<ActionPoint>,
    #[serde(default)]
    pub groups: Vec<AnimationGroup>,
    #[serde(default)]
    pub linked: Vec<LinkedAttachment>,
}

impl MeshDocument {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            ident: mesh.ident,
            position: mesh.position,
            angle: mesh.angle,
            orientation: mesh.orientation,
            bounds: (!mesh.bounds.is_empty()).then_some(mesh.bounds),
            pivot: mesh.pivot,
            origin: mesh.origin,
            vertices: mesh.vertices.clone(),
            faces: mesh.faces.clone(),
            textures: mesh.textures.iter().map(|t| t.name().to_string()).collect(),
            selections: mesh.selections.clone(),
            action_points: mesh.action_points.clone(),
            groups: mesh.groups.clone(),
            linked: mesh.linked.clone(),
        }
    }

    /// Build a mesh, binding texture names through `library`.
    ///
    /// Missing bounds are computed from the vertices.
    pub fn into_mesh(self, library: &mut TextureLibrary) -> Mesh {
        let mut mesh = Mesh::new();
        mesh.ident = self.ident;
        mesh.position = self.position;
        mesh.angle = self.angle;
        mesh.orientation = self.orientation;
        mesh.pivot = self.pivot;
        mesh.origin = self.origin;
        mesh.vertices = self.vertices;
        mesh.faces = self.faces;
        mesh.textures = self.textures.iter().map(|name| library.acquire(name)).collect();
        mesh.selections = self.selections;
        mesh.action_points = self.action_points;
        mesh.groups = self.groups;
        mesh.linked = self.linked;
        mesh.bounds = self.bounds.unwrap_or_else(|| mesh.bounding_box());
        mesh
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse mesh document")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize mesh document")
    }
}

/// Read a mesh document from disk
pub fn load_document(path: impl AsRef<Path>) -> Result<MeshDocument> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read mesh file: {}", path.display()))?;
    MeshDocument::from_json(&json).with_context(|| format!("Invalid mesh file: {}", path.display()))
}

/// Write a mesh to disk as a JSON document
pub fn save_mesh(mesh: &Mesh, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = MeshDocument::from_mesh(mesh).to_json()?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write mesh file: {}", path.display()))
}
