// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh tweaking - region splicing, skin swaps and the live/original mesh handover

mod intermediary;
mod orchestrator;
mod skin;

pub use intermediary::build_intermediary_mesh;
pub use orchestrator::{InteractiveObject, MeshSlot, MeshTweaker, TweakKind, TweakOutcome};
pub use skin::tweak_skin;
