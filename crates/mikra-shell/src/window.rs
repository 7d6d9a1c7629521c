// Copyright 2025 eraflo
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

//! Winit-backed window creation and handle management.
//!
//! The rest of the shell never touches `winit::window::Window` directly; it
//! goes through [`ShellWindow`], which hands out raw handles for surface
//! creation and a hashed id for event routing.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle,
};
use winit::dpi::LogicalSize;
use winit::error::OsError;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use mikra_core::ShellConfig;

/// A shared, clonable handle to the underlying platform window.
pub type ShellWindowHandle = Arc<Window>;

/// Wrapper around a `winit` window.
#[derive(Debug)]
pub struct ShellWindow {
    inner: Arc<Window>,
}

impl ShellWindow {
    /// Returns a stable numeric identifier for this window.
    ///
    /// Winit's `WindowId` is opaque; hashing it gives a plain `u64` that can
    /// be compared against incoming events without leaking the winit type.
    pub fn id(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.inner.id().hash(&mut hasher);
        hasher.finish()
    }

    /// Returns the physical size of the window's client area in pixels.
    pub fn inner_size(&self) -> (u32, u32) {
        let size = self.inner.inner_size();
        (size.width, size.height)
    }

    /// Returns the display scale factor (physical pixels per logical pixel).
    pub fn scale_factor(&self) -> f64 {
        self.inner.scale_factor()
    }

    /// Asks the platform to schedule a redraw.
    pub fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    /// Clones the shared handle for subsystems that outlive a borrow of
    /// `self`, such as the GPU surface.
    pub fn clone_handle_arc(&self) -> ShellWindowHandle {
        Arc::clone(&self.inner)
    }
}

impl HasWindowHandle for ShellWindow {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        self.inner.window_handle()
    }
}

impl HasDisplayHandle for ShellWindow {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        self.inner.display_handle()
    }
}

/// Builder translating window parameters into a platform window.
#[derive(Debug, Clone)]
pub struct ShellWindowBuilder {
    title: String,
    width: u32,
    height: u32,
    resizable: bool,
}

impl ShellWindowBuilder {
    /// Creates a builder with the shell's default window parameters.
    pub fn new() -> Self {
        Self {
            title: "mikra".to_string(),
            width: 800,
            height: 600,
            resizable: false,
        }
    }

    /// Creates a builder pre-filled from a [`ShellConfig`].
    pub fn from_config(config: &ShellConfig) -> Self {
        Self {
            title: config.title.clone(),
            width: config.width,
            height: config.height,
            resizable: config.resizable,
        }
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Sets the logical window dimensions.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets whether the user may resize the window.
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Builds the window on the given event loop.
    pub fn build(self, event_loop: &ActiveEventLoop) -> Result<ShellWindow, OsError> {
        log::info!(
            "Creating window '{}' ({}x{} logical)...",
            self.title,
            self.width,
            self.height
        );

        let attributes = Window::default_attributes()
            .with_title(self.title)
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_resizable(self.resizable)
            .with_visible(true);

        let window = event_loop.create_window(attributes)?;

        Ok(ShellWindow {
            inner: Arc::new(window),
        })
    }
}

impl Default for ShellWindowBuilder {
    fn default() -> Self {
        Self::new()
    }
}
