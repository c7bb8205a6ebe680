// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Asset path normalization

/// Normalize an asset path: lowercase, forward slashes, no leading `./` or `/`,
/// no repeated separators
pub fn standardize(path: &str) -> String {
    let lowered = path.trim().replace('\\', "/").to_lowercase();
    let mut out = String::with_capacity(lowered.len());

    for segment in lowered.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(segment);
    }

    out
}
