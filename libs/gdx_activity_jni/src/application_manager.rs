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

//! Proxy for the Java `com.aevumlab.gdxcpp.ApplicationManager`.

use anyhow::{bail, Context, Result};
use gdx_activity::ApplicationManager;
use jni::objects::{GlobalRef, JObject, JValue};
use log::info;

use crate::activity_host::JniActivity;

pub const APPLICATION_MANAGER_CLASS: &str = "com/aevumlab/gdxcpp/ApplicationManager";

/// Holds the Java manager object across lifecycle callbacks.
pub struct JniApplicationManager {
    manager: GlobalRef,
}

impl JniApplicationManager {
    /// Constructs a manager with its no-argument constructor.
    pub fn create(host: &mut JniActivity<'_>) -> Result<Self> {
        let env = host.env();
        let manager = env
            .new_object(APPLICATION_MANAGER_CLASS, "()V", &[])
            .context("Failed to construct ApplicationManager")?;
        let manager =
            env.new_global_ref(manager).context("Failed to pin the ApplicationManager")?;
        info!("Constructed {}", APPLICATION_MANAGER_CLASS);
        Ok(Self { manager })
    }
}

impl<'local> ApplicationManager<JniActivity<'local>> for JniApplicationManager {
    fn initialize(&mut self, host: &mut JniActivity<'local>) -> Result<()> {
        let (env, activity) = host.env_and_activity();
        env.call_method(
                &self.manager,
                "initialize",
                "(Landroid/app/Activity;)V",
                &[JValue::Object(activity)],
            )
            .context("ApplicationManager.initialize failed")?;
        Ok(())
    }

    fn initialize_with_shared_lib(
        &mut self,
        host: &mut JniActivity<'local>,
        bridge_name: &str,
    ) -> Result<()> {
        let env = host.env();
        let name = env.new_string(bridge_name).context("Invalid bridge name")?;
        env.call_method(
                &self.manager,
                "initializeWithSharedLib",
                "(Ljava/lang/String;)V",
                &[(&name).into()],
            )
            .with_context(|| {
                format!("ApplicationManager.initializeWithSharedLib({}) failed", bridge_name)
            })?;
        Ok(())
    }

    fn create_view(&mut self, host: &mut JniActivity<'local>) -> Result<JObject<'local>> {
        let (env, activity) = host.env_and_activity();
        let view = env
            .call_method(
                &self.manager,
                "createView",
                "(Landroid/app/Activity;)Landroid/view/View;",
                &[JValue::Object(activity)],
            )
            .and_then(|view| view.l())
            .context("ApplicationManager.createView failed")?;
        if view.is_null() {
            bail!("ApplicationManager.createView returned null");
        }
        Ok(view)
    }

    fn unload(&mut self, host: &mut JniActivity<'local>) -> Result<()> {
        host.env()
            .call_method(&self.manager, "unload", "()V", &[])
            .context("ApplicationManager.unload failed")?;
        Ok(())
    }
}
