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

//! Window features, window flags and screen orientations, carrying the numeric values the Android
//! framework uses for them.

use bitflags::bitflags;

/// A feature requested from the activity window before content is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowFeature {
    /// `Window.FEATURE_NO_TITLE`: hide the title bar.
    NoTitle,
}

impl WindowFeature {
    /// Returns the framework constant for this feature.
    pub fn as_raw(self) -> i32 {
        match self {
            WindowFeature::NoTitle => 1,
        }
    }
}

bitflags! {
    /// A subset of `WindowManager.LayoutParams` flags.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        const FULLSCREEN = 0x0000_0400;
        const FORCE_NOT_FULLSCREEN = 0x0000_0800;
    }
}

impl WindowFlags {
    /// Returns the flags as the signed integer taken by `Window.setFlags`.
    pub fn as_raw(self) -> i32 {
        self.bits() as i32
    }
}

/// `ActivityInfo.SCREEN_ORIENTATION_*` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenOrientation {
    Unspecified,
    #[default]
    Landscape,
    Portrait,
    User,
    Behind,
    Sensor,
    NoSensor,
    SensorLandscape,
    SensorPortrait,
    ReverseLandscape,
    ReversePortrait,
}

impl ScreenOrientation {
    /// Returns the framework constant for this orientation.
    pub fn as_raw(self) -> i32 {
        match self {
            ScreenOrientation::Unspecified => -1,
            ScreenOrientation::Landscape => 0,
            ScreenOrientation::Portrait => 1,
            ScreenOrientation::User => 2,
            ScreenOrientation::Behind => 3,
            ScreenOrientation::Sensor => 4,
            ScreenOrientation::NoSensor => 5,
            ScreenOrientation::SensorLandscape => 6,
            ScreenOrientation::SensorPortrait => 7,
            ScreenOrientation::ReverseLandscape => 8,
            ScreenOrientation::ReversePortrait => 9,
        }
    }
}
