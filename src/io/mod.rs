// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - mesh documents and loaders

mod document;
mod loader;

pub use document::{load_document, save_mesh, MeshDocument};
pub use loader::{FileMeshLoader, MemoryMeshLoader, MeshLoader};
