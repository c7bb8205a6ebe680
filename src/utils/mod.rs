// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Utility functions

pub mod path;

pub use path::standardize;
