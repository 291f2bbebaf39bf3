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
use gdx_activity::NativeLibraryLoader;
use log::info;

use crate::activity_host::JniActivity;

/// Loads native libraries with `java.lang.System.loadLibrary`, so the Java runtime can resolve
/// the native methods they export.
#[derive(Default)]
pub struct SystemLibraryLoader {
    loaded: Vec<String>,
}

impl SystemLibraryLoader {
    /// Logical names loaded through this loader, in load order.
    pub fn loaded_libraries(&self) -> &[String] {
        &self.loaded
    }
}

impl<'local> NativeLibraryLoader<JniActivity<'local>> for SystemLibraryLoader {
    fn load_library(&mut self, host: &mut JniActivity<'local>, name: &str) -> Result<()> {
        if self.loaded.iter().any(|loaded| loaded == name) {
            return Ok(());
        }
        let env = host.env();
        let library = env.new_string(name).context("Invalid library name")?;
        env.call_static_method(
            "java/lang/System",
            "loadLibrary",
            "(Ljava/lang/String;)V",
            &[(&library).into()],
        )
        .with_context(|| format!("System.loadLibrary({}) failed", name))?;
        info!("Loaded native library {}", name);
        self.loaded.push(name.to_string());
        Ok(())
    }
}
