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

//! The application runner: owns the winit event loop and drives the
//! window, GPU context, painter and user application through it.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use anyhow::Result;
use mikra_core::input::{InputEvent, Modifiers};
use mikra_core::{EventBus, FrameClock, ShellConfig, ShellEvent, Stopwatch};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::ModifiersState;
use winit::window::WindowId;

use crate::graphics::{FontAtlas, GpuContext, Painter};
use crate::input::translate_winit_input;
use crate::window::{ShellWindow, ShellWindowBuilder};

/// What the shell hands an application while constructing it.
pub struct ShellContext<'a> {
    /// The configuration the shell was started with.
    pub config: &'a ShellConfig,
    /// The loaded glyph atlas, usable for pre-measuring text.
    pub atlas: &'a FontAtlas,
    /// Initial window size in logical pixels.
    pub window_size: (f32, f32),
    /// The window's DPI scale factor.
    pub scale_factor: f64,
}

/// The contract an application fulfils to run inside the shell.
pub trait Application: Sized + 'static {
    /// Called once after the window and GPU are up, to create the initial
    /// application state.
    fn new(context: &mut ShellContext) -> Result<Self>;

    /// Called for every input event drained from the bus, before `update`.
    fn handle_event(&mut self, event: &InputEvent);

    /// Called every frame with the clamped seconds elapsed since the
    /// previous frame.
    fn update(&mut self, dt: f32);

    /// Called every frame to queue draw commands. Implementations start by
    /// calling [`Painter::begin_frame`] with their clear color.
    fn draw(&mut self, painter: &mut Painter);
}

/// The internal state of the running shell, managed by the winit event loop.
/// It holds the user's application state (`app: A`) alongside the systems
/// that exist only once a window does.
struct ShellState<A: Application> {
    config: ShellConfig,
    app: Option<A>,
    window: Option<ShellWindow>,
    gpu: Option<GpuContext>,
    painter: Option<Painter>,
    bus: EventBus,
    clock: FrameClock,
    modifiers: Modifiers,
    init_error: Option<anyhow::Error>,
}

impl<A: Application> ShellState<A> {
    /// Brings up every window-dependent system, in dependency order.
    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        // 1. Create the window from the config.
        let window = ShellWindowBuilder::from_config(&self.config).build(event_loop)?;
        let scale_factor = window.scale_factor();
        let physical = window.inner_size();
        let logical = (
            physical.0 as f32 / scale_factor as f32,
            physical.1 as f32 / scale_factor as f32,
        );

        // 2. Bring up the GPU context on the window's surface.
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::new_without_display_handle());
        let gpu = pollster::block_on(GpuContext::new(
            &instance,
            window.clone_handle_arc(),
            physical,
            self.config.vsync,
        ))?;

        // 3. Load the font and create the glyph atlas.
        let atlas = FontAtlas::new(
            gpu.device(),
            self.config.font_path.as_deref(),
            self.config.font_px,
        )?;

        // 4. Create the application instance.
        let mut context = ShellContext {
            config: &self.config,
            atlas: &atlas,
            window_size: logical,
            scale_factor,
        };
        let app = Some(A::new(&mut context)?);

        // 5. The painter takes ownership of the atlas.
        let painter = Painter::new(&gpu, atlas, logical);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.painter = Some(painter);
        self.app = app;
        Ok(())
    }
}

/// Implementing `Drop` is the idiomatic Rust way to handle cleanup.
/// When `ShellState` goes out of scope (after the event loop exits), this
/// `drop` runs automatically, ensuring a controlled shutdown.
impl<A: Application> Drop for ShellState<A> {
    fn drop(&mut self) {
        log::info!("ShellState is being dropped. Performing controlled shutdown...");

        // Tear down in reverse dependency order: the application first, then
        // the painter, then the GPU context, and last the window whose
        // surface they were built on.
        self.app = None;
        self.painter = None;
        self.gpu = None;
        self.window = None;

        log::info!("Shell systems shutdown complete.");
    }
}

impl<A: Application> ApplicationHandler for ShellState<A> {
    /// Called when the event loop is ready to start processing events.
    /// This is the ideal place to initialize systems that require a window.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Avoid re-initializing if the app is resumed multiple times.
        }

        log::info!("Application resumed. Initializing window and shell systems...");
        let init_timer = Stopwatch::new();

        match self.initialize(event_loop) {
            Ok(()) => log::info!(
                "Shell initialized in {} ms.",
                init_timer.elapsed_ms().unwrap_or(0)
            ),
            Err(error) => {
                log::error!("Shell initialization failed: {error:#}");
                self.init_error = Some(error);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        if window.id() != hasher.finish() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Shutdown requested, exiting event loop...");
                self.bus.publish(ShellEvent::CloseRequested);
                event_loop.exit();
            }
            WindowEvent::ModifiersChanged(state) => {
                self.modifiers = convert_modifiers(state.state());
            }
            WindowEvent::Resized(size) => {
                log::info!("Window resized to: {}x{}", size.width, size.height);
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(size.width, size.height);
                }

                let scale = window.scale_factor() as f32;
                let logical_w = size.width as f32 / scale;
                let logical_h = size.height as f32 / scale;
                if let Some(painter) = self.painter.as_mut() {
                    painter.set_screen_size(logical_w, logical_h);
                }
                self.bus.publish(ShellEvent::WindowResized {
                    width: logical_w as u32,
                    height: logical_h as u32,
                });
            }
            WindowEvent::RedrawRequested => {
                let dt = self.clock.tick();

                if let (Some(app), Some(gpu), Some(painter)) = (
                    self.app.as_mut(),
                    self.gpu.as_mut(),
                    self.painter.as_mut(),
                ) {
                    // Feed the frame's queued input to the application
                    // before advancing it.
                    for shell_event in self.bus.drain() {
                        if let ShellEvent::Input(input) = shell_event {
                            app.handle_event(&input);
                        }
                    }

                    app.update(dt);
                    app.draw(painter);

                    if let Err(e) = painter.flush(gpu) {
                        log::error!("Rendering error: {e}");
                    }
                }
            }
            _ => {
                // Translate winit events into the shell's event type for the
                // application to consume. Cursor positions arrive in physical
                // pixels and are published in logical ones.
                let scale = window.scale_factor() as f32;
                for mut input in translate_winit_input(&event, self.modifiers) {
                    if let InputEvent::MouseMoved { x, y } = &mut input {
                        *x /= scale;
                        *y /= scale;
                    }
                    log::debug!("Input event: {input:?}");
                    self.bus.publish(ShellEvent::Input(input));
                }
            }
        }
    }

    /// Called when the event loop has processed all pending events and is
    /// about to wait. Requesting a redraw here keeps the frame loop running.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn convert_modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        control: state.control_key(),
        shift: state.shift_key(),
        alt: state.alt_key(),
    }
}

/// Creates the event loop and runs the application `A` inside it.
///
/// This is the primary function for a demo binary to call. It creates the
/// window, initializes the GPU and font systems, and blocks the current
/// thread until the application is closed. An error during initialization
/// is returned after the loop winds down.
pub fn run<A: Application>(config: ShellConfig) -> Result<()> {
    log::info!("Mikra shell: starting '{}'...", config.title);
    let event_loop = EventLoop::new()?;

    // The initial state is empty; it is populated in the `resumed` event.
    let mut state = ShellState::<A> {
        config,
        app: None,
        window: None,
        gpu: None,
        painter: None,
        bus: EventBus::new(),
        clock: FrameClock::new(),
        modifiers: Modifiers::NONE,
        init_error: None,
    };

    event_loop.run_app(&mut state)?;

    match state.init_error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_conversion_maps_each_key() {
        let state = ModifiersState::CONTROL | ModifiersState::SHIFT;
        let converted = convert_modifiers(state);
        assert!(converted.control);
        assert!(converted.shift);
        assert!(!converted.alt);
    }

    #[test]
    fn empty_modifier_state_is_none() {
        assert_eq!(convert_modifiers(ModifiersState::empty()), Modifiers::NONE);
    }
}
