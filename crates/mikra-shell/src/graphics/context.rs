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

use anyhow::anyhow;
use anyhow::Result;
use wgpu::SurfaceTargetUnsafe;
use wgpu::{Features, Instance};

use super::error::GraphicsError;
use crate::window::ShellWindowHandle;

/// Holds the core WGPU state objects required for rendering.
/// This structure manages the connection to the graphics API for a specific
/// window surface, from adapter selection through swapchain configuration.
#[derive(Debug)]
pub struct GpuContext {
    pub surface: wgpu::Surface<'static>,
    #[allow(dead_code)]
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,

    // Configuration for the surface's swapchain behavior
    pub surface_config: wgpu::SurfaceConfiguration,

    // Store info for easy access
    pub adapter_name: String,
    pub adapter_backend: wgpu::Backend,
}

impl GpuContext {
    /// Asynchronously initializes the graphics context for a given window surface.
    ///
    /// ## Arguments
    /// * `instance` - A reference to the shared `wgpu::Instance`.
    /// * `window_handle` - A shared handle to the window to draw into. The
    ///   caller must keep the window alive for as long as this context exists.
    /// * `window_size` - The initial physical size of the window surface.
    /// * `vsync` - When true, present with Fifo; otherwise prefer Mailbox.
    ///
    /// ## Returns
    /// * `Result<Self>` - A result containing the initialized `GpuContext` or an error.
    pub async fn new(
        instance: &Instance,
        window_handle: ShellWindowHandle,
        window_size: (u32, u32),
        vsync: bool,
    ) -> Result<Self> {
        log::info!("Initializing WGPU graphics context...");

        // --- 1. Create Surface ---
        let surface_target = unsafe {
            SurfaceTargetUnsafe::from_window(&window_handle)
                .map_err(|e| anyhow!("Failed to create surface target: {}", e))?
        };

        let surface = unsafe { instance.create_surface_unsafe(surface_target)? };
        log::debug!("WGPU surface created for the window.");

        // --- 2. Select an Adapter compatible with the surface ---
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("Failed to find a suitable graphics adapter: {}", e))?;

        let adapter_info = adapter.get_info();
        log::info!(
            "Using graphics adapter: \"{}\" (Backend: {:?})",
            adapter_info.name,
            adapter_info.backend
        );

        // --- 3. Create Logical Device and Command Queue from Adapter ---
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Mikra Shell Logical Device"),
                required_features: Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
            })
            .await
            .map_err(|e| anyhow!("Failed to create logical device: {}", e))?;
        log::info!("Logical device and command queue created.");

        device.on_uncaptured_error(std::sync::Arc::new(|e| {
            log::error!("WGPU Uncaptured Error: {e:?}");
        }));

        // --- 4. Configure Surface ---
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let present_mode = if vsync {
            wgpu::PresentMode::Fifo
        } else {
            surface_caps
                .present_modes
                .iter()
                .copied()
                .find(|m| *m == wgpu::PresentMode::Mailbox)
                .unwrap_or(wgpu::PresentMode::Fifo) // Fifo is guaranteed to be supported
        };

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: window_size.0.max(1),
            height: window_size.1.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);
        log::debug!(
            "Surface configured: {:?}, {:?}, {}x{}",
            surface_format,
            present_mode,
            surface_config.width,
            surface_config.height
        );

        Ok(GpuContext {
            surface,
            adapter,
            device,
            queue,
            surface_config,
            adapter_name: adapter_info.name,
            adapter_backend: adapter_info.backend,
        })
    }

    /// Reconfigures the underlying surface (swapchain) when the window is resized.
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            log::info!("GpuContext: Resizing surface configuration to {new_width}x{new_height}");
            self.surface_config.width = new_width;
            self.surface_config.height = new_height;
            self.surface.configure(&self.device, &self.surface_config);
        } else {
            log::warn!(
                "GpuContext: Ignoring resize request to zero dimensions: {new_width}x{new_height}"
            );
        }
    }

    /// Acquires the next surface texture to render into.
    ///
    /// A `Lost` or `Outdated` surface is reconfigured with the current
    /// dimensions and the acquisition retried; `Timeout` and any unexpected
    /// surface error are reported to the caller.
    pub fn acquire_frame(&mut self) -> Result<wgpu::SurfaceTexture, GraphicsError> {
        loop {
            match self.surface.get_current_texture() {
                wgpu::CurrentSurfaceTexture::Success(texture)
                | wgpu::CurrentSurfaceTexture::Suboptimal(texture) => break Ok(texture),
                e @ (wgpu::CurrentSurfaceTexture::Lost
                | wgpu::CurrentSurfaceTexture::Outdated) => {
                    let (width, height) = self.size();
                    if width > 0 && height > 0 {
                        log::warn!(
                            "GpuContext: Surface lost or outdated ({e:?}). Reconfiguring with current dimensions: W={width}, H={height}"
                        );
                        self.surface.configure(&self.device, &self.surface_config);
                    } else {
                        log::error!(
                            "GpuContext: Surface lost/outdated ({e:?}), but current stored size is zero. Cannot reconfigure."
                        );
                        return Err(GraphicsError::SurfaceAcquisitionFailed(format!(
                            "Surface Lost/Outdated ({e:?}) and current size is zero"
                        )));
                    }
                }
                e @ wgpu::CurrentSurfaceTexture::Timeout => {
                    log::warn!("GpuContext: Timeout acquiring frame. ({e:?})");
                    return Err(GraphicsError::SurfaceAcquisitionFailed(format!(
                        "Timeout: {e:?}"
                    )));
                }
                e => {
                    log::error!("GpuContext: Unexpected SurfaceError: {e:?}");
                    return Err(GraphicsError::SurfaceAcquisitionFailed(format!(
                        "Unexpected SurfaceError: {e:?}"
                    )));
                }
            }
        }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the format the surface was configured with.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    /// Returns the size of the surface configuration.
    /// This is the size of the swapchain surface used for rendering.
    ///
    /// ## Returns
    /// * `(u32, u32)` - A tuple containing the width and height of the surface configuration.
    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }
}
