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

use anyhow::{Context, Result};
use std::collections::BTreeMap;

/// Keeps the state of every live activity between its create and destroy callbacks, keyed by
/// the handle returned to Java.
pub struct ActivityRegistry<T> {
    activities: BTreeMap<i64, T>,
    // Handles are never reused. 0 is left for "no activity".
    next_handle: i64,
}

impl<T> ActivityRegistry<T> {
    pub fn new() -> Self {
        Self { activities: BTreeMap::new(), next_handle: 1 }
    }

    /// Stores `activity` and returns its handle.
    pub fn insert(&mut self, activity: T) -> Result<i64> {
        let handle = self.next_handle;
        self.next_handle = handle.checked_add(1).context("too many activities were created")?;
        self.activities.insert(handle, activity);
        Ok(handle)
    }

    pub fn remove(&mut self, handle: i64) -> Option<T> {
        self.activities.remove(&handle)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

impl<T> Default for ActivityRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_and_non_zero() {
        let mut registry = ActivityRegistry::new();
        let first = registry.insert("first").unwrap();
        let second = registry.insert("second").unwrap();
        assert_ne!(first, 0);
        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);

        assert_eq!(registry.remove(first), Some("first"));
        let third = registry.insert("third").unwrap();
        assert_ne!(third, first);
        assert_eq!(registry.remove(second), Some("second"));
        assert_eq!(registry.remove(third), Some("third"));
        assert!(registry.is_empty());
    }

    #[test]
    fn unknown_handle_is_absent() {
        let mut registry: ActivityRegistry<u8> = ActivityRegistry::default();
        assert_eq!(registry.remove(0), None);
        assert_eq!(registry.remove(42), None);
    }

    #[test]
    fn exhausted_handles_are_reported() {
        let mut registry = ActivityRegistry { activities: BTreeMap::new(), next_handle: i64::MAX };
        assert!(registry.insert(()).is_err());
        assert!(registry.is_empty());
    }
}
