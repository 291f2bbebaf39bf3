// Copyright (C) 2025 The Android Open Source Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Config
//!
//! Values the create sequence uses: which native libraries to load and in which order, the
//! bridge symbol handed to the manager, and how the window is set up.

use anyhow::{bail, ensure, Result};
use log::LevelFilter;

use crate::window::ScreenOrientation;

/// Native physics library loaded first.
pub const BOX2D_LIBRARY: &str = "gdx-cpp-box2d";
/// Native bridge layer loaded on top of `BOX2D_LIBRARY`.
pub const BOX2D_LAYER_LIBRARY: &str = "gdx-cpp-box2d-layer";
/// Symbol naming the native bridge for `initializeWithSharedLib`.
pub const DEFAULT_BRIDGE_NAME: &str = "Bridge";

/// Settings for one activity.
///
/// The default reproduces the gdx-cpp Box2D test activity: no title, fullscreen, landscape,
/// `gdx-cpp-box2d` then `gdx-cpp-box2d-layer`, bridge `Bridge`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityConfig {
    /// Logical library names, loaded in this order.
    pub native_libraries: Vec<String>,
    /// Name passed to `ApplicationManager::initialize_with_shared_lib`.
    pub bridge_name: String,
    /// Orientation the activity pins itself to.
    pub orientation: ScreenOrientation,
    /// Request `WindowFeature::NoTitle`.
    pub no_title: bool,
    /// Set `FULLSCREEN` and clear `FORCE_NOT_FULLSCREEN`.
    pub fullscreen: bool,
    /// Maximum level for the device logger.
    pub max_log_level: LevelFilter,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            native_libraries: vec![BOX2D_LIBRARY.to_string(), BOX2D_LAYER_LIBRARY.to_string()],
            bridge_name: DEFAULT_BRIDGE_NAME.to_string(),
            orientation: ScreenOrientation::Landscape,
            no_title: true,
            fullscreen: true,
            max_log_level: LevelFilter::Trace,
        }
    }
}

impl ActivityConfig {
    pub fn with_native_libraries<I, S>(mut self, libraries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.native_libraries = libraries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_bridge_name(mut self, bridge_name: impl Into<String>) -> Self {
        self.bridge_name = bridge_name.into();
        self
    }

    pub fn with_orientation(mut self, orientation: ScreenOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_no_title(mut self, no_title: bool) -> Self {
        self.no_title = no_title;
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn with_max_log_level(mut self, level: LevelFilter) -> Self {
        self.max_log_level = level;
        self
    }

    /// Checks that every name can be handed to the dynamic loader and the manager.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.bridge_name.is_empty(), "bridge name is empty");
        ensure!(!self.bridge_name.contains('\0'), "bridge name contains a NUL byte");
        for (i, library) in self.native_libraries.iter().enumerate() {
            if library.is_empty() {
                bail!("native library #{} has an empty name", i);
            }
            if library.contains(|c: char| c == '/' || c == '\0') {
                bail!("native library name {:?} must be a logical name, not a path", library);
            }
            if self.native_libraries[..i].contains(library) {
                bail!("native library {:?} is listed twice", library);
            }
        }
        Ok(())
    }
}
