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

use anyhow::Result;
use log::{error, info, trace};

use crate::config::ActivityConfig;
use crate::error::{ActivityError, LifecycleStep, StepContext};
use crate::host::{ActivityHost, ApplicationManager};
use crate::library_loader::NativeLibraryLoader;
use crate::window::{WindowFeature, WindowFlags};

/// Where an activity is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// `on_create` has not run yet.
    NotStarted,
    /// The create sequence completed and the content view is installed.
    Running,
    /// The manager was unloaded and the base destroy logic ran.
    Stopped,
    /// A create or destroy step failed. No further lifecycle calls are accepted.
    Failed,
}

/// ActivityShim forwards the create and destroy callbacks of one activity to the application
/// manager it owns.
///
/// The manager is constructed by `on_create` and dropped by `on_destroy` right after it is
/// unloaded, so at most one manager exists per shim.
pub struct ActivityShim<M, L> {
    config: ActivityConfig,
    loader: L,
    manager: Option<M>,
    state: LifecycleState,
}

impl<M, L> ActivityShim<M, L> {
    pub fn new(config: ActivityConfig, loader: L) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, loader, manager: None, state: LifecycleState::NotStarted })
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn config(&self) -> &ActivityConfig {
        &self.config
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// The manager, while the activity holds one.
    pub fn manager(&self) -> Option<&M> {
        self.manager.as_ref()
    }

    /// Handles the create callback.
    ///
    /// Runs the base create logic, configures the window, constructs the manager with
    /// `create_manager`, initializes it, loads the configured native libraries in order,
    /// connects the bridge and installs the manager's view as content. The first failing step
    /// stops the sequence and moves the shim to `LifecycleState::Failed`.
    pub fn on_create<H, F>(
        &mut self,
        host: &mut H,
        saved_state: Option<&H::SavedState>,
        create_manager: F,
    ) -> Result<(), ActivityError>
    where
        H: ActivityHost + ?Sized,
        M: ApplicationManager<H>,
        L: NativeLibraryLoader<H>,
        F: FnOnce(&mut H) -> Result<M>,
    {
        if self.state != LifecycleState::NotStarted {
            return Err(ActivityError::InvalidState { operation: "on_create", state: self.state });
        }
        info!("Creating activity (saved state: {})", saved_state.is_some());

        match self.run_create_sequence(host, saved_state, create_manager) {
            Ok(()) => {
                self.state = LifecycleState::Running;
                info!("Activity is running");
                Ok(())
            }
            Err(e) => {
                log_failure("create", &e);
                self.state = LifecycleState::Failed;
                Err(e)
            }
        }
    }

    fn run_create_sequence<H, F>(
        &mut self,
        host: &mut H,
        saved_state: Option<&H::SavedState>,
        create_manager: F,
    ) -> Result<(), ActivityError>
    where
        H: ActivityHost + ?Sized,
        M: ApplicationManager<H>,
        L: NativeLibraryLoader<H>,
        F: FnOnce(&mut H) -> Result<M>,
    {
        host.on_create_base(saved_state).step(LifecycleStep::BaseCreate)?;

        if self.config.no_title {
            let enabled = host
                .request_window_feature(WindowFeature::NoTitle)
                .step(LifecycleStep::RequestNoTitle)?;
            trace!("No-title window feature enabled: {}", enabled);
        }
        if self.config.fullscreen {
            host.set_window_flags(WindowFlags::FULLSCREEN, WindowFlags::FULLSCREEN)
                .and_then(|()| host.clear_window_flags(WindowFlags::FORCE_NOT_FULLSCREEN))
                .step(LifecycleStep::SetFullscreen)?;
        }
        host.set_requested_orientation(self.config.orientation)
            .step(LifecycleStep::SetOrientation)?;

        let manager = self.manager.insert(create_manager(host).step(LifecycleStep::CreateManager)?);
        manager.initialize(host).step(LifecycleStep::InitializeManager)?;

        for library in &self.config.native_libraries {
            self.loader
                .load_library(host, library)
                .step(LifecycleStep::LoadNativeLibrary(library.clone()))?;
        }

        let bridge_name = &self.config.bridge_name;
        manager
            .initialize_with_shared_lib(host, bridge_name)
            .step(LifecycleStep::InitializeBridge(bridge_name.clone()))?;

        let view = manager.create_view(host).step(LifecycleStep::CreateView)?;
        host.set_content_view(view).step(LifecycleStep::SetContentView)
    }

    /// Handles the destroy callback: unloads the manager, then runs the base destroy logic.
    ///
    /// Only a running activity can be destroyed. If unloading fails the base destroy logic is
    /// not run.
    pub fn on_destroy<H>(&mut self, host: &mut H) -> Result<(), ActivityError>
    where
        H: ActivityHost + ?Sized,
        M: ApplicationManager<H>,
    {
        let manager = match (self.state, self.manager.take()) {
            (LifecycleState::Running, Some(manager)) => manager,
            (state, manager) => {
                self.manager = manager;
                return Err(ActivityError::InvalidState { operation: "on_destroy", state });
            }
        };
        info!("Destroying activity");

        let result = Self::run_destroy_sequence(manager, host);
        match result {
            Ok(()) => {
                self.state = LifecycleState::Stopped;
                info!("Activity stopped");
                Ok(())
            }
            Err(e) => {
                log_failure("destroy", &e);
                self.state = LifecycleState::Failed;
                Err(e)
            }
        }
    }

    fn run_destroy_sequence<H>(mut manager: M, host: &mut H) -> Result<(), ActivityError>
    where
        H: ActivityHost + ?Sized,
        M: ApplicationManager<H>,
    {
        manager.unload(host).step(LifecycleStep::UnloadManager)?;
        // No manager calls may follow unload.
        drop(manager);
        host.on_destroy_base().step(LifecycleStep::BaseDestroy)
    }
}

fn log_failure(operation: &str, e: &ActivityError) {
    match e {
        ActivityError::Step { step, source } => {
            error!("Failed to {} the activity while {}: {:#}", operation, step, source)
        }
        ActivityError::InvalidState { .. } => error!("Failed to {} the activity: {}", operation, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::ScreenOrientation;
    use anyhow::anyhow;
    use mockall::mock;

    #[derive(Default)]
    struct TestHost {
        base_created: bool,
        base_destroyed: bool,
        features: Vec<WindowFeature>,
        flags: WindowFlags,
        orientation: Option<ScreenOrientation>,
        content: Option<u32>,
    }

    impl ActivityHost for TestHost {
        type SavedState = [u8];
        type View = u32;

        fn on_create_base(&mut self, _saved_state: Option<&[u8]>) -> Result<()> {
            self.base_created = true;
            Ok(())
        }

        fn on_destroy_base(&mut self) -> Result<()> {
            self.base_destroyed = true;
            Ok(())
        }

        fn request_window_feature(&mut self, feature: WindowFeature) -> Result<bool> {
            self.features.push(feature);
            Ok(true)
        }

        fn set_window_flags(&mut self, flags: WindowFlags, mask: WindowFlags) -> Result<()> {
            self.flags = (self.flags & !mask) | (flags & mask);
            Ok(())
        }

        fn clear_window_flags(&mut self, flags: WindowFlags) -> Result<()> {
            self.flags.remove(flags);
            Ok(())
        }

        fn set_requested_orientation(&mut self, orientation: ScreenOrientation) -> Result<()> {
            self.orientation = Some(orientation);
            Ok(())
        }

        fn set_content_view(&mut self, view: u32) -> Result<()> {
            self.content = Some(view);
            Ok(())
        }
    }

    mock! {
        Manager {}
        impl ApplicationManager<TestHost> for Manager {
            fn initialize(&mut self, host: &mut TestHost) -> Result<()>;
            fn initialize_with_shared_lib(
                &mut self,
                host: &mut TestHost,
                bridge_name: &str,
            ) -> Result<()>;
            fn create_view(&mut self, host: &mut TestHost) -> Result<u32>;
            fn unload(&mut self, host: &mut TestHost) -> Result<()>;
        }
    }

    #[derive(Default)]
    struct TestLoader {
        loaded: Vec<String>,
        fail_on: Option<&'static str>,
    }

    impl NativeLibraryLoader<TestHost> for TestLoader {
        fn load_library(&mut self, _host: &mut TestHost, name: &str) -> Result<()> {
            if self.fail_on == Some(name) {
                return Err(anyhow!("dlopen failed: lib{}.so not found", name));
            }
            self.loaded.push(name.to_string());
            Ok(())
        }
    }

    fn new_shim(loader: TestLoader) -> ActivityShim<MockManager, TestLoader> {
        ActivityShim::new(ActivityConfig::default(), loader).unwrap()
    }

    fn running_manager() -> MockManager {
        let mut manager = MockManager::new();
        manager.expect_initialize().times(1).returning(|_| Ok(()));
        manager.expect_initialize_with_shared_lib().times(1).returning(|_, _| Ok(()));
        manager.expect_create_view().times(1).returning(|_| Ok(7));
        manager
    }

    #[test]
    fn create_then_destroy() {
        let _ = env_logger::try_init();
        let mut host = TestHost::default();
        let mut shim = new_shim(TestLoader::default());
        let mut manager = running_manager();
        manager.expect_unload().times(1).returning(|_| Ok(()));

        shim.on_create(&mut host, None, move |_| Ok(manager)).unwrap();
        assert_eq!(shim.state(), LifecycleState::Running);
        assert!(host.base_created);
        assert_eq!(host.features, vec![WindowFeature::NoTitle]);
        assert_eq!(host.flags, WindowFlags::FULLSCREEN);
        assert_eq!(host.orientation, Some(ScreenOrientation::Landscape));
        assert_eq!(host.content, Some(7));
        assert_eq!(shim.loader().loaded, vec!["gdx-cpp-box2d", "gdx-cpp-box2d-layer"]);

        shim.on_destroy(&mut host).unwrap();
        assert_eq!(shim.state(), LifecycleState::Stopped);
        assert!(host.base_destroyed);
        assert!(shim.manager().is_none());
    }

    #[test]
    fn initialize_failure_stops_the_sequence() {
        let _ = env_logger::try_init();
        let mut host = TestHost::default();
        let mut shim = new_shim(TestLoader::default());
        let mut manager = MockManager::new();
        manager.expect_initialize().times(1).returning(|_| Err(anyhow!("no context")));
        manager.expect_initialize_with_shared_lib().never();
        manager.expect_create_view().never();
        manager.expect_unload().never();

        let err = shim.on_create(&mut host, None, move |_| Ok(manager)).unwrap_err();
        assert_eq!(err.step(), Some(&LifecycleStep::InitializeManager));
        assert_eq!(shim.state(), LifecycleState::Failed);
        assert!(shim.loader().loaded.is_empty());
        assert_eq!(host.content, None);
    }

    #[test]
    fn library_failure_skips_bridge_and_view() {
        let _ = env_logger::try_init();
        let mut host = TestHost::default();
        let mut shim =
            new_shim(TestLoader { fail_on: Some("gdx-cpp-box2d-layer"), ..Default::default() });
        let mut manager = MockManager::new();
        manager.expect_initialize().times(1).returning(|_| Ok(()));
        manager.expect_initialize_with_shared_lib().never();
        manager.expect_create_view().never();
        manager.expect_unload().never();

        let err = shim.on_create(&mut host, None, move |_| Ok(manager)).unwrap_err();
        assert_eq!(
            err.step(),
            Some(&LifecycleStep::LoadNativeLibrary("gdx-cpp-box2d-layer".to_string()))
        );
        assert_eq!(shim.loader().loaded, vec!["gdx-cpp-box2d"]);
        assert_eq!(host.content, None);
    }

    #[test]
    fn view_failure_leaves_content_unset_and_blocks_destroy() {
        let _ = env_logger::try_init();
        let mut host = TestHost::default();
        let mut shim = new_shim(TestLoader::default());
        let mut manager = MockManager::new();
        manager.expect_initialize().times(1).returning(|_| Ok(()));
        manager.expect_initialize_with_shared_lib().times(1).returning(|_, _| Ok(()));
        manager.expect_create_view().times(1).returning(|_| Err(anyhow!("no GL context")));
        manager.expect_unload().never();

        let err = shim.on_create(&mut host, None, move |_| Ok(manager)).unwrap_err();
        assert_eq!(err.step(), Some(&LifecycleStep::CreateView));
        assert_eq!(host.content, None);

        let err = shim.on_destroy(&mut host).unwrap_err();
        assert!(matches!(
            err,
            ActivityError::InvalidState { operation: "on_destroy", state: LifecycleState::Failed }
        ));
        assert!(!host.base_destroyed);
    }

    #[test]
    fn factory_failure_is_reported() {
        let mut host = TestHost::default();
        let mut shim = new_shim(TestLoader::default());

        let err = shim
            .on_create(&mut host, None, |_| Err(anyhow!("ClassNotFoundException")))
            .unwrap_err();
        assert_eq!(err.step(), Some(&LifecycleStep::CreateManager));
        assert!(shim.manager().is_none());
        assert!(shim.loader().loaded.is_empty());
    }

    #[test]
    fn unload_failure_skips_base_destroy() {
        let _ = env_logger::try_init();
        let mut host = TestHost::default();
        let mut shim = new_shim(TestLoader::default());
        let mut manager = running_manager();
        manager.expect_unload().times(1).returning(|_| Err(anyhow!("GL context lost")));

        shim.on_create(&mut host, None, move |_| Ok(manager)).unwrap();
        let err = shim.on_destroy(&mut host).unwrap_err();
        assert_eq!(err.step(), Some(&LifecycleStep::UnloadManager));
        assert_eq!(shim.state(), LifecycleState::Failed);
        assert!(!host.base_destroyed);
    }

    #[test]
    fn second_create_is_rejected() {
        let mut host = TestHost::default();
        let mut shim = new_shim(TestLoader::default());
        let mut manager = running_manager();
        manager.expect_unload().never();
        shim.on_create(&mut host, None, move |_| Ok(manager)).unwrap();

        let err = shim
            .on_create(&mut host, None, |_| -> Result<MockManager> {
                panic!("a second manager must not be constructed")
            })
            .unwrap_err();
        assert!(matches!(
            err,
            ActivityError::InvalidState { operation: "on_create", state: LifecycleState::Running }
        ));
        assert_eq!(shim.state(), LifecycleState::Running);
        assert_eq!(shim.loader().loaded.len(), 2);
    }

    #[test]
    fn destroy_before_create_is_rejected() {
        let mut host = TestHost::default();
        let mut shim = new_shim(TestLoader::default());

        let err = shim.on_destroy(&mut host).unwrap_err();
        assert!(matches!(
            err,
            ActivityError::InvalidState { state: LifecycleState::NotStarted, .. }
        ));
        assert_eq!(shim.state(), LifecycleState::NotStarted);
        assert!(!host.base_destroyed);
    }

    #[test]
    fn window_setup_follows_config() {
        let mut host = TestHost::default();
        let config = ActivityConfig::default()
            .with_no_title(false)
            .with_fullscreen(false)
            .with_orientation(ScreenOrientation::ReverseLandscape);
        let mut shim = ActivityShim::new(config, TestLoader::default()).unwrap();
        let mut manager = running_manager();
        manager.expect_unload().never();

        shim.on_create(&mut host, None, move |_| Ok(manager)).unwrap();
        assert!(host.features.is_empty());
        assert_eq!(host.flags, WindowFlags::empty());
        assert_eq!(host.orientation, Some(ScreenOrientation::ReverseLandscape));
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = ActivityConfig::default().with_bridge_name("");
        assert!(ActivityShim::<MockManager, TestLoader>::new(config, TestLoader::default())
            .is_err());
    }
}
