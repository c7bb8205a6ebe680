// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation, region classification and validation

mod bbox;
pub mod classification;
mod mesh;
mod mesh_utils;

pub use bbox::BoundingBox;
pub use classification::{BodyRegion, CanonicalRegions, RegionClassifier, RegionPlan};
pub use mesh::{
    coincident, ActionPoint, AnimationGroup, Face, LinkedAttachment, Mesh, Selection, Vertex,
};
pub use mesh_utils::{validate_mesh, MeshValidation};
