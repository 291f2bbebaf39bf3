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

//! # gdx-cpp activity shim
//!
//! This crate drives a gdx-cpp `ApplicationManager` through the lifecycle of a single Android
//! activity: it configures the window, constructs and initializes the manager, loads the native
//! physics libraries and installs the manager's view as content on create, and unloads the
//! manager on destroy.
//!
//! The platform is reached only through the `ActivityHost` trait, the manager through
//! `ApplicationManager` and the dynamic loader through `NativeLibraryLoader`, so the whole
//! sequence can run without an Android runtime.
//!
//! The primary entry point for this library is the `ActivityShim` struct.

/// The lifecycle state machine and the create/destroy sequences.
pub mod activity;
/// Tunables for the create sequence.
pub mod config;
/// Errors reported by the lifecycle operations.
pub mod error;
/// Traits implemented by the platform host and the application manager.
pub mod host;
/// Loading of native shared libraries.
pub mod library_loader;
/// Window features, window flags and screen orientations.
pub mod window;

pub use activity::{ActivityShim, LifecycleState};
pub use config::ActivityConfig;
pub use error::{ActivityError, LifecycleStep};
pub use host::{ActivityHost, ApplicationManager};
pub use library_loader::{map_library_name, DlopenLoader, LoadedLibrary, NativeLibraryLoader};
pub use window::{ScreenOrientation, WindowFeature, WindowFlags};
