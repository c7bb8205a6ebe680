// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Body-region classification of vertices
//! Decides which canonical zone (head, chest, leggings) a vertex of a mesh belongs to

use super::Mesh;
use crate::error::{MeshSide, TweakError, TweakResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Action point joining the head to the chest
pub const HEAD_TO_CHEST: &str = "head2chest";
/// Action point joining the chest to the leggings
pub const CHEST_TO_LEGGINGS: &str = "chest2leggings";

/// Canonical body zone of a tweakable mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyRegion {
    Head,
    Chest,
    Leggings,
}

impl BodyRegion {
    pub const ALL: [BodyRegion; 3] = [BodyRegion::Head, BodyRegion::Chest, BodyRegion::Leggings];

    /// Selection name carrying this zone
    pub fn selection_name(&self) -> &'static str {
        match self {
            BodyRegion::Head => "head",
            BodyRegion::Chest => "chest",
            BodyRegion::Leggings => "leggings",
        }
    }

    pub fn from_selection_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|region| region.selection_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for BodyRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selection_name())
    }
}

/// Indices of the three canonical selections of one mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalRegions {
    head: usize,
    chest: usize,
    leggings: usize,
}

impl CanonicalRegions {
    /// Locate all three canonical selections; an empty selection is fine, a missing one is not
    pub fn resolve(mesh: &Mesh, side: MeshSide) -> TweakResult<Self> {
        let find = |region: BodyRegion| {
            mesh.selection_index(region.selection_name())
                .ok_or(TweakError::MissingRegion {
                    side,
                    region: region.selection_name(),
                })
        };

        Ok(Self {
            head: find(BodyRegion::Head)?,
            chest: find(BodyRegion::Chest)?,
            leggings: find(BodyRegion::Leggings)?,
        })
    }

    pub fn index(&self, region: BodyRegion) -> usize {
        match region {
            BodyRegion::Head => self.head,
            BodyRegion::Chest => self.chest,
            BodyRegion::Leggings => self.leggings,
        }
    }
}

/// Both joint action points must be present on a tweakable mesh
pub fn require_joints(mesh: &Mesh, side: MeshSide) -> TweakResult<()> {
    for name in [HEAD_TO_CHEST, CHEST_TO_LEGGINGS] {
        if mesh.action_point_vertex(name).is_none() {
            return Err(TweakError::MissingActionPoint { side, name });
        }
    }
    Ok(())
}

pub fn is_joint(name: &str) -> bool {
    name.eq_ignore_ascii_case(HEAD_TO_CHEST) || name.eq_ignore_ascii_case(CHEST_TO_LEGGINGS)
}

/// The zone being replaced and the two zones being kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionPlan {
    pub target: BodyRegion,
    pub retained: [BodyRegion; 2],
}

impl RegionPlan {
    pub fn for_target(target: BodyRegion) -> Self {
        let retained = match target {
            BodyRegion::Head => [BodyRegion::Chest, BodyRegion::Leggings],
            BodyRegion::Chest => [BodyRegion::Head, BodyRegion::Leggings],
            BodyRegion::Leggings => [BodyRegion::Chest, BodyRegion::Head],
        };
        Self { target, retained }
    }
}

/// Region membership tests for one mesh under a plan
#[derive(Debug, Clone, Copy)]
pub struct RegionClassifier<'a> {
    mesh: &'a Mesh,
    target: Option<usize>,
    retained: [Option<usize>; 2],
}

impl<'a> RegionClassifier<'a> {
    pub fn new(mesh: &'a Mesh, regions: &CanonicalRegions, plan: &RegionPlan) -> Self {
        Self {
            mesh,
            target: Some(regions.index(plan.target)),
            retained: plan.retained.map(|region| Some(regions.index(region))),
        }
    }

    pub fn in_target(&self, vertex: usize) -> bool {
        self.mesh.is_in_selection(vertex, self.target)
    }

    pub fn in_retained(&self, vertex: usize) -> bool {
        self.retained
            .iter()
            .any(|&selection| self.mesh.is_in_selection(vertex, selection))
    }
}
