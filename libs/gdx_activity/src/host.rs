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

//! The seams between the shim and the outside world.
//!
//! `ActivityHost` is the platform side of one activity: its base lifecycle implementation and its
//! window. `ApplicationManager` is the gdx-cpp application manager the shim drives. Both are
//! called only from the thread delivering lifecycle callbacks.

use anyhow::Result;

use crate::window::{ScreenOrientation, WindowFeature, WindowFlags};

/// The platform activity the shim runs inside.
pub trait ActivityHost {
    /// Opaque state handed to the base create callback. Absent on a fresh start.
    type SavedState: ?Sized;
    /// A displayable view produced by the manager.
    type View;

    /// Runs the platform's own create logic. Must be called before anything else.
    fn on_create_base(&mut self, saved_state: Option<&Self::SavedState>) -> Result<()>;

    /// Runs the platform's own destroy logic. Must be called last.
    fn on_destroy_base(&mut self) -> Result<()>;

    /// Requests an extended window feature. Returns whether the feature is now enabled.
    fn request_window_feature(&mut self, feature: WindowFeature) -> Result<bool>;

    /// Sets the window flags selected by `mask` to their values in `flags`.
    fn set_window_flags(&mut self, flags: WindowFlags, mask: WindowFlags) -> Result<()>;

    /// Clears `flags` on the window.
    fn clear_window_flags(&mut self, flags: WindowFlags) -> Result<()>;

    fn set_requested_orientation(&mut self, orientation: ScreenOrientation) -> Result<()>;

    /// Installs `view` as the activity content.
    fn set_content_view(&mut self, view: Self::View) -> Result<()>;
}

/// The gdx-cpp application manager, as seen from the activity.
///
/// Every call receives the host so implementations can reach the platform context.
pub trait ApplicationManager<H: ActivityHost + ?Sized> {
    /// Binds the manager to the activity context.
    fn initialize(&mut self, host: &mut H) -> Result<()>;

    /// Connects the manager to the native bridge named `bridge_name`. The libraries exporting
    /// the bridge are loaded before this is called.
    fn initialize_with_shared_lib(&mut self, host: &mut H, bridge_name: &str) -> Result<()>;

    /// Produces the view that renders the application.
    fn create_view(&mut self, host: &mut H) -> Result<H::View>;

    /// Releases native and graphics resources held by the manager.
    fn unload(&mut self, host: &mut H) -> Result<()>;
}
