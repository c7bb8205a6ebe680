// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shared texture handles
//!
//! Meshes never own texture data. They hold [`TextureHandle`]s handed out by a
//! [`TextureLibrary`], and two meshes referencing the same texture hold the
//! same handle. Equality between handles is identity, never content.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared, non-owning reference to a texture
pub type TextureHandle = Arc<Texture>;

/// A named texture with a residency flag
#[derive(Debug)]
pub struct Texture {
    name: String,
    resident: AtomicBool,
}

impl Texture {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resident: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Make sure the texture is ready for use by the renderer
    pub fn restore(&self) {
        if !self.resident.swap(true, Ordering::AcqRel) {
            log::debug!("Restored texture {}", self.name);
        }
    }

    /// Drop residency, e.g. after a device loss
    pub fn evict(&self) {
        self.resident.store(false, Ordering::Release);
    }

    pub fn is_resident(&self) -> bool {
        self.resident.load(Ordering::Acquire)
    }
}

/// Handle identity comparison
pub fn same_texture(a: &TextureHandle, b: &TextureHandle) -> bool {
    Arc::ptr_eq(a, b)
}

/// Owns texture lifetime and hands out shared handles by name.
///
/// Names are matched case-insensitively with `\` and `/` treated alike.
#[derive(Debug, Default)]
pub struct TextureLibrary {
    textures: HashMap<String, TextureHandle>,
}

impl TextureLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str) -> String {
        name.replace('\\', "/").to_uppercase()
    }

    /// Return the handle registered under `name`, creating it on first use
    pub fn acquire(&mut self, name: &str) -> TextureHandle {
        self.textures
            .entry(Self::key(name))
            .or_insert_with(|| Arc::new(Texture::new(name)))
            .clone()
    }

    /// Look up an already registered texture
    pub fn find(&self, name: &str) -> Option<TextureHandle> {
        self.textures.get(&Self::key(name)).cloned()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
