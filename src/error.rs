// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Tweak error taxonomy

use std::fmt;
use thiserror::Error;

/// Which input of a pairwise merge a failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshSide {
    /// The mesh supplying the retained regions
    Base,
    /// The mesh supplying the target region
    Source,
}

impl fmt::Display for MeshSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshSide::Base => write!(f, "base"),
            MeshSide::Source => write!(f, "source"),
        }
    }
}

/// Errors raised while tweaking a mesh
#[derive(Debug, Error)]
pub enum TweakError {
    #[error("{side} mesh has no \"{region}\" selection")]
    MissingRegion { side: MeshSide, region: &'static str },

    #[error("{side} mesh has no \"{name}\" action point")]
    MissingActionPoint { side: MeshSide, name: &'static str },

    #[error("{side} mesh has {issues} dangling index reference(s)")]
    MalformedMesh { side: MeshSide, issues: usize },

    #[error("Failed to load mesh {path}")]
    LoadFailure {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Invalid tweak kind: {0}")]
    InvalidTweakKind(String),
}

pub type TweakResult<T> = std::result::Result<T, TweakError>;
