//! Window, event loop and per-frame driver.
//!
//! The viewer is the thinnest possible host for a [`Scene`]: it opens a
//! window, owns the GPU state and camera, maps a few keys onto the scene's
//! mode, and calls [`Scene::frame`] once per redraw.
//!
//! | Input | Action |
//! |-------|--------|
//! | `Space` | toggle chaos / formed |
//! | `P` | pause the clock |
//! | left drag | orbit |
//! | wheel | zoom |
//! | `Escape` | quit |

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::SceneConfig;
use crate::error::ViewerError;
use crate::gpu::GpuState;
use crate::scene::Scene;
use crate::time::FrameClock;

/// Viewer builder.
///
/// ```ignore
/// Viewer::new()
///     .with_config(SceneConfig::load("tree.json")?)
///     .run()?;
/// ```
pub struct Viewer {
    config: SceneConfig,
    title: String,
}

impl Viewer {
    pub fn new() -> Self {
        Self {
            config: SceneConfig::default(),
            title: "Tinsel".to_string(),
        }
    }

    pub fn with_config(mut self, config: SceneConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Generate the scene and run until the window closes.
    pub fn run(self) -> Result<(), ViewerError> {
        let scene = Scene::new(&self.config);

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(scene, self.config, self.title);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    scene: Scene,
    config: SceneConfig,
    title: String,
    clock: FrameClock,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    /// First fatal error; returned from [`Viewer::run`] after the loop exits.
    error: Option<ViewerError>,
}

impl App {
    fn new(scene: Scene, config: SceneConfig, title: String) -> Self {
        let mut clock = FrameClock::new();
        clock.set_time_scale(config.time_scale);

        Self {
            window: None,
            gpu_state: None,
            scene,
            config,
            title,
            clock,
            mouse_pressed: false,
            last_mouse_pos: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: ViewerError) {
        log::error!("{}", error);
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    fn mount(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu_state = pollster::block_on(GpuState::new(window.clone(), &self.scene, &self.config))?;

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.physical_key {
            PhysicalKey::Code(KeyCode::Space) => self.scene.toggle_mode(),
            PhysicalKey::Code(KeyCode::KeyP) => {
                self.clock.toggle_pause();
                log::info!("clock {}", if self.clock.is_paused() { "paused" } else { "running" });
            }
            PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
            _ => {}
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (elapsed, delta) = self.clock.tick();
        self.scene.frame(elapsed, delta);

        if let Some(gpu_state) = &mut self.gpu_state {
            if !self.mouse_pressed {
                gpu_state.camera.spin(delta);
            }
            match gpu_state.render(&mut self.scene) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("surface lost, reconfiguring");
                    gpu_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("out of GPU memory");
                    event_loop.exit();
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
        }

        if let Some(window) = &self.window {
            if self.clock.frame() % 60 == 0 {
                window.set_title(&format!(
                    "{} - {:.0} fps - {:?}",
                    self.title,
                    self.clock.fps(),
                    self.scene.mode()
                ));
            }
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.mount(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, event),
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        if let Some(gpu_state) = &mut self.gpu_state {
                            gpu_state
                                .camera
                                .drag((position.x - last_x) as f32, (position.y - last_y) as f32);
                        }
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.camera.zoom(scroll);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
