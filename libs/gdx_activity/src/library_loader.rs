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
use log::{info, trace};
use std::{
    ffi::{c_void, CString},
    os::unix::ffi::OsStrExt,
    path::{Path, PathBuf},
    ptr::NonNull,
};

macro_rules! bail_with_dlerror {
    ($fmt:literal $(, $($arg:tt)+)?) => {
        {
            // SAFETY: trivially safe.
            let error = unsafe { libc::dlerror() };
            if !error.is_null() {
                // SAFETY: `error` is a pointer to a valid C string returned by `dlerror()`.
                let error_cstr = unsafe { std::ffi::CStr::from_ptr(error) };
                let dl_error_msg = error_cstr.to_string_lossy();

                anyhow::bail!(
                    concat!($fmt, ": {}"),
                    $($($arg)+,)?
                    dl_error_msg
                );
            } else {
                anyhow::bail!($fmt $(, $($arg)+)?);
            }
        }
    };
}

/// Loads native libraries by logical name, the way `System.loadLibrary` does.
pub trait NativeLibraryLoader<H: ?Sized> {
    /// Makes the library named `name` available to the process. Loading a library that is
    /// already loaded does nothing.
    fn load_library(&mut self, host: &mut H, name: &str) -> Result<()>;
}

/// Maps a logical library name to its file name: `gdx-cpp-box2d` becomes `libgdx-cpp-box2d.so`.
pub fn map_library_name(name: &str) -> String {
    format!("lib{}.so", name)
}

/// LoadedLibrary represents a library loaded to the memory space of the process.
pub struct LoadedLibrary {
    name: String,
    library_handle: NonNull<c_void>,
}

impl LoadedLibrary {
    /// Load a library to the process memory space. `path` is either a path or a file name
    /// resolved by the dynamic linker.
    ///
    /// # Safety
    ///
    /// Users must ensure that the initialization and termination routines of the library are safe.
    pub unsafe fn open(name: &str, path: &Path) -> Result<Self> {
        let library = CString::new(path.as_os_str().as_bytes()).context("Invalid library path")?;

        // SAFETY: `library` is a valid C string. The caller ensured that the library is safe to
        // be loaded. RTLD_GLOBAL lets libraries loaded later resolve symbols from this one.
        let handle = unsafe { libc::dlopen(library.as_ptr(), libc::RTLD_NOW | libc::RTLD_GLOBAL) };
        match NonNull::new(handle) {
            Some(library_handle) => Ok(Self { name: name.to_string(), library_handle }),
            None => bail_with_dlerror!("Failed to open the library {}", path.display()),
        }
    }

    /// The logical name the library was loaded under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn find_symbol(&self, symbol_name: &str) -> Result<NonNull<c_void>> {
        let symbol = CString::new(symbol_name).context("Invalid symbol name")?;
        // SAFETY: `self.library_handle` is a valid library handle and `symbol` is a valid C
        // string.
        let symbol_handle = unsafe { libc::dlsym(self.library_handle.as_ptr(), symbol.as_ptr()) };
        match NonNull::new(symbol_handle) {
            Some(symbol_handle) => Ok(symbol_handle),
            None => bail_with_dlerror!("Failed to find the symbol {}", symbol_name),
        }
    }
}

impl Drop for LoadedLibrary {
    fn drop(&mut self) {
        trace!("Closing native library {}", self.name);
        // SAFETY: the instance owns a valid handle to the opened library. The termination routine
        // is ensured to be safe.
        unsafe { libc::dlclose(self.library_handle.as_ptr()) };
    }
}

/// Loads libraries with `dlopen`, searching `search_paths` before the linker's default path.
///
/// Libraries stay loaded while the loader is alive and are closed in reverse load order when it
/// is dropped.
pub struct DlopenLoader {
    search_paths: Vec<PathBuf>,
    libraries: Vec<LoadedLibrary>,
}

impl DlopenLoader {
    /// # Safety
    ///
    /// Every library this loader is asked to load must have safe initialization and termination
    /// routines.
    pub unsafe fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths, libraries: Vec::new() }
    }

    /// Loads `name` unless it is already loaded and returns it.
    pub fn load(&mut self, name: &str) -> Result<&LoadedLibrary> {
        if let Some(i) = self.libraries.iter().position(|library| library.name == name) {
            trace!("Native library {} is already loaded", name);
            return Ok(&self.libraries[i]);
        }

        let file_name = map_library_name(name);
        let mut candidates: Vec<PathBuf> = self
            .search_paths
            .iter()
            .map(|dir| dir.join(&file_name))
            .filter(|path| path.exists())
            .collect();
        // Fall back to the dynamic linker's own search path.
        candidates.push(PathBuf::from(&file_name));

        // A file found in a search directory explains the failure better than the linker's
        // "not found" for the bare name, so keep the first error.
        let mut first_error = None;
        for path in candidates {
            // SAFETY: the creator of the loader vouched for every library it loads.
            match unsafe { LoadedLibrary::open(name, &path) } {
                Ok(library) => {
                    info!("Loaded native library {} from {}", name, path.display());
                    self.libraries.push(library);
                    return Ok(&self.libraries[self.libraries.len() - 1]);
                }
                Err(e) => {
                    trace!("Could not load {}: {:#}", path.display(), e);
                    first_error.get_or_insert(e);
                }
            }
        }
        Err(first_error
            .unwrap_or_else(|| anyhow::anyhow!("no candidate path"))
            .context(format!("Failed to load native library {}", name)))
    }

    /// Returns the loaded library named `name`.
    pub fn library(&self, name: &str) -> Option<&LoadedLibrary> {
        self.libraries.iter().find(|library| library.name == name)
    }

    /// Logical names of the loaded libraries, in load order.
    pub fn loaded_libraries(&self) -> impl Iterator<Item = &str> {
        self.libraries.iter().map(LoadedLibrary::name)
    }
}

impl<H: ?Sized> NativeLibraryLoader<H> for DlopenLoader {
    fn load_library(&mut self, _host: &mut H, name: &str) -> Result<()> {
        self.load(name).map(|_| ())
    }
}

impl DlopenLoader {
    /// Closes every loaded library, most recently loaded first. Returns the closed names in
    /// closing order.
    pub fn close_all(&mut self) -> Vec<String> {
        let mut closed = Vec::with_capacity(self.libraries.len());
        while let Some(library) = self.libraries.pop() {
            closed.push(library.name.clone());
            drop(library);
        }
        closed
    }
}

impl Drop for DlopenLoader {
    fn drop(&mut self) {
        self.close_all();
    }
}
