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

//! The host side of the shim: the Java `Activity` reached through JNI.

use anyhow::{Context, Result};
use gdx_activity::{ActivityHost, ScreenOrientation, WindowFeature, WindowFlags};
use jni::objects::{JObject, JValue};
use jni::JNIEnv;
use log::trace;

const ACTIVITY_CLASS: &str = "android/app/Activity";

/// A Java activity for the duration of one native callback.
pub struct JniActivity<'local> {
    env: JNIEnv<'local>,
    activity: JObject<'local>,
}

impl<'local> JniActivity<'local> {
    pub fn new(env: JNIEnv<'local>, activity: JObject<'local>) -> Self {
        Self { env, activity }
    }

    pub fn env(&mut self) -> &mut JNIEnv<'local> {
        &mut self.env
    }

    /// The environment together with the activity object, for calls that pass the activity as an
    /// argument.
    pub fn env_and_activity(&mut self) -> (&mut JNIEnv<'local>, &JObject<'local>) {
        (&mut self.env, &self.activity)
    }

    /// Runs `f` on the activity's `android.view.Window`.
    fn with_window<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut JNIEnv<'local>, &JObject<'local>) -> Result<()>,
    {
        let window = self
            .env
            .call_method(&self.activity, "getWindow", "()Landroid/view/Window;", &[])
            .and_then(|window| window.l())
            .context("Activity.getWindow failed")?;
        let result = f(&mut self.env, &window);
        self.env.delete_local_ref(window).context("Failed to delete the window reference")?;
        result
    }
}

impl<'local> ActivityHost for JniActivity<'local> {
    type SavedState = JObject<'local>;
    type View = JObject<'local>;

    fn on_create_base(&mut self, saved_state: Option<&JObject<'local>>) -> Result<()> {
        let null = JObject::null();
        let bundle = saved_state.unwrap_or(&null);
        // Call the superclass implementation; a virtual call would dispatch back to the stub.
        self.env
            .call_nonvirtual_method(
                &self.activity,
                ACTIVITY_CLASS,
                "onCreate",
                "(Landroid/os/Bundle;)V",
                &[JValue::Object(bundle)],
            )
            .context("Activity.onCreate failed")?;
        Ok(())
    }

    fn on_destroy_base(&mut self) -> Result<()> {
        self.env
            .call_nonvirtual_method(&self.activity, ACTIVITY_CLASS, "onDestroy", "()V", &[])
            .context("Activity.onDestroy failed")?;
        Ok(())
    }

    fn request_window_feature(&mut self, feature: WindowFeature) -> Result<bool> {
        let enabled = self
            .env
            .call_method(
                &self.activity,
                "requestWindowFeature",
                "(I)Z",
                &[JValue::Int(feature.as_raw())],
            )
            .and_then(|enabled| enabled.z())
            .with_context(|| format!("Activity.requestWindowFeature({:?}) failed", feature))?;
        Ok(enabled)
    }

    fn set_window_flags(&mut self, flags: WindowFlags, mask: WindowFlags) -> Result<()> {
        trace!("Window.setFlags({:?}, {:?})", flags, mask);
        self.with_window(|env, window| {
            env.call_method(
                window,
                "setFlags",
                "(II)V",
                &[JValue::Int(flags.as_raw()), JValue::Int(mask.as_raw())],
            )
            .context("Window.setFlags failed")?;
            Ok(())
        })
    }

    fn clear_window_flags(&mut self, flags: WindowFlags) -> Result<()> {
        trace!("Window.clearFlags({:?})", flags);
        self.with_window(|env, window| {
            env.call_method(window, "clearFlags", "(I)V", &[JValue::Int(flags.as_raw())])
                .context("Window.clearFlags failed")?;
            Ok(())
        })
    }

    fn set_requested_orientation(&mut self, orientation: ScreenOrientation) -> Result<()> {
        self.env
            .call_method(
                &self.activity,
                "setRequestedOrientation",
                "(I)V",
                &[JValue::Int(orientation.as_raw())],
            )
            .with_context(|| {
                format!("Activity.setRequestedOrientation({:?}) failed", orientation)
            })?;
        Ok(())
    }

    fn set_content_view(&mut self, view: JObject<'local>) -> Result<()> {
        self.env
            .call_method(
                &self.activity,
                "setContentView",
                "(Landroid/view/View;)V",
                &[JValue::Object(&view)],
            )
            .context("Activity.setContentView failed")?;
        Ok(())
    }
}
