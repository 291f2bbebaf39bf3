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

use std::fmt;

use thiserror::Error;

use crate::activity::LifecycleState;

/// One step of the create or destroy sequence, in the order the steps run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleStep {
    BaseCreate,
    RequestNoTitle,
    SetFullscreen,
    SetOrientation,
    CreateManager,
    InitializeManager,
    LoadNativeLibrary(String),
    InitializeBridge(String),
    CreateView,
    SetContentView,
    UnloadManager,
    BaseDestroy,
}

impl fmt::Display for LifecycleStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleStep::BaseCreate => write!(f, "base onCreate"),
            LifecycleStep::RequestNoTitle => write!(f, "requesting the no-title window feature"),
            LifecycleStep::SetFullscreen => write!(f, "switching the window to fullscreen"),
            LifecycleStep::SetOrientation => write!(f, "setting the requested orientation"),
            LifecycleStep::CreateManager => write!(f, "constructing the application manager"),
            LifecycleStep::InitializeManager => write!(f, "initializing the application manager"),
            LifecycleStep::LoadNativeLibrary(name) => write!(f, "loading native library {}", name),
            LifecycleStep::InitializeBridge(name) => write!(f, "initializing shared lib {}", name),
            LifecycleStep::CreateView => write!(f, "creating the manager view"),
            LifecycleStep::SetContentView => write!(f, "installing the content view"),
            LifecycleStep::UnloadManager => write!(f, "unloading the application manager"),
            LifecycleStep::BaseDestroy => write!(f, "base onDestroy"),
        }
    }
}

/// Failure of a lifecycle operation.
#[derive(Debug, Error)]
pub enum ActivityError {
    /// The operation is not allowed in the current state. Nothing was called.
    #[error("{operation} is not allowed in state {state:?}")]
    InvalidState { operation: &'static str, state: LifecycleState },
    /// A step failed; later steps were not run.
    #[error("{step} failed")]
    Step {
        step: LifecycleStep,
        #[source]
        source: anyhow::Error,
    },
}

impl ActivityError {
    /// Returns the failed step, if the error came from one.
    pub fn step(&self) -> Option<&LifecycleStep> {
        match self {
            ActivityError::Step { step, .. } => Some(step),
            ActivityError::InvalidState { .. } => None,
        }
    }
}

pub(crate) trait StepContext<T> {
    /// Attributes a collaborator failure to `step`.
    fn step(self, step: LifecycleStep) -> Result<T, ActivityError>;
}

impl<T> StepContext<T> for anyhow::Result<T> {
    fn step(self, step: LifecycleStep) -> Result<T, ActivityError> {
        self.map_err(|source| ActivityError::Step { step, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn step_error_keeps_source_chain() {
        let result: anyhow::Result<()> = Err(anyhow!("dlopen failed: not found"));
        let step = LifecycleStep::LoadNativeLibrary("gdx-cpp-box2d".into());
        let err = result.step(step.clone()).unwrap_err();
        assert_eq!(err.step(), Some(&step));
        assert_eq!(err.to_string(), "loading native library gdx-cpp-box2d failed");
        let chained = format!("{:#}", anyhow::Error::from(err));
        assert!(chained.contains("dlopen failed: not found"), "{}", chained);
    }

    #[test]
    fn invalid_state_has_no_step() {
        let err = ActivityError::InvalidState {
            operation: "on_destroy",
            state: LifecycleState::NotStarted,
        };
        assert_eq!(err.step(), None);
        assert_eq!(err.to_string(), "on_destroy is not allowed in state NotStarted");
    }
}
