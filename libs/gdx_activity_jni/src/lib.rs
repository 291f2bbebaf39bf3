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

//! # gdx-cpp activity JNI bindings
//!
//! Native methods of `com.aevumlab.gdxcpp.tests.LibGdxCppTestActivity`. The Java stub forwards
//! `onCreate` and `onDestroy` here; the shim state lives in a process-wide registry between the
//! two calls and is addressed by the handle `nativeOnCreate` returns.

use anyhow::{anyhow, Context, Result};
use gdx_activity::{ActivityConfig, ActivityShim};
use jni::objects::JObject;
use jni::sys::jlong;
use jni::JNIEnv;
use log::{error, info};
use std::sync::{LazyLock, Mutex};

pub mod activity_host;
pub mod application_manager;
pub mod registry;
pub mod system_loader;

use activity_host::JniActivity;
use application_manager::JniApplicationManager;
use registry::ActivityRegistry;
use system_loader::SystemLibraryLoader;

const RUNTIME_EXCEPTION_CLASS: &str = "java/lang/RuntimeException";

type GdxActivity = ActivityShim<JniApplicationManager, SystemLibraryLoader>;

// Activities between nativeOnCreate and nativeOnDestroy. The lock is never held while calling
// into Java.
static ACTIVITIES: LazyLock<Mutex<ActivityRegistry<GdxActivity>>> =
    LazyLock::new(|| Mutex::new(ActivityRegistry::new()));

#[cfg(target_os = "android")]
fn init_logger(config: &ActivityConfig) {
    android_logger::init_once(
        android_logger::Config::default()
            .with_tag("GdxCppActivity")
            .with_max_level(config.max_log_level),
    );
}

#[cfg(not(target_os = "android"))]
fn init_logger(_config: &ActivityConfig) {}

fn create_activity<'local>(
    host: &mut JniActivity<'local>,
    saved_state: &JObject<'local>,
    config: ActivityConfig,
) -> Result<jlong> {
    let mut activity = GdxActivity::new(config, SystemLibraryLoader::default())?;
    let saved_state = (!saved_state.is_null()).then_some(saved_state);
    activity.on_create(host, saved_state, JniApplicationManager::create)?;
    ACTIVITIES.lock().map_err(|_| anyhow!("activity registry is poisoned"))?.insert(activity)
}

fn destroy_activity(host: &mut JniActivity<'_>, handle: jlong) -> Result<()> {
    let mut activity = ACTIVITIES
        .lock()
        .map_err(|_| anyhow!("activity registry is poisoned"))?
        .remove(handle)
        .with_context(|| format!("no activity with handle {}", handle))?;
    activity.on_destroy(host)?;
    Ok(())
}

/// Reports `error` to Java. An exception already raised by the failing Java call is left to
/// propagate as is.
fn throw_unless_pending(env: &mut JNIEnv<'_>, error: anyhow::Error) {
    error!("{:#}", error);
    if env.exception_check().unwrap_or(false) {
        return;
    }
    if let Err(e) = env.throw_new(RUNTIME_EXCEPTION_CLASS, format!("{:#}", error)) {
        error!("Failed to throw {}: {}", RUNTIME_EXCEPTION_CLASS, e);
    }
}

/// Runs the create sequence for `activity`. Returns the handle to pass to `nativeOnDestroy`, or
/// 0 with a pending exception.
#[no_mangle]
pub extern "system" fn Java_com_aevumlab_gdxcpp_tests_LibGdxCppTestActivity_nativeOnCreate<
    'local,
>(
    env: JNIEnv<'local>,
    activity: JObject<'local>,
    saved_state: JObject<'local>,
) -> jlong {
    let config = ActivityConfig::default();
    init_logger(&config);

    let mut host = JniActivity::new(env, activity);
    match create_activity(&mut host, &saved_state, config) {
        Ok(handle) => {
            info!("Activity {} created", handle);
            handle
        }
        Err(e) => {
            throw_unless_pending(host.env(), e);
            0
        }
    }
}

/// Runs the destroy sequence for the activity registered under `handle`.
#[no_mangle]
pub extern "system" fn Java_com_aevumlab_gdxcpp_tests_LibGdxCppTestActivity_nativeOnDestroy<
    'local,
>(
    env: JNIEnv<'local>,
    activity: JObject<'local>,
    handle: jlong,
) {
    let mut host = JniActivity::new(env, activity);
    match destroy_activity(&mut host, handle) {
        Ok(()) => info!("Activity {} destroyed", handle),
        Err(e) => throw_unless_pending(host.env(), e),
    }
}
