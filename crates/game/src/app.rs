//! Windowed driver: winit events go through `InputState` into the scene controller.

use std::time::Instant;

use input::InputState;
use renderer::FrameStats;
use winit::{
    application::ApplicationHandler,
    event::{KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::config::SceneConfig;
use crate::scene::SceneController;

/// Application handler for winit.
pub struct App {
    config: SceneConfig,
    window: Option<Window>,
    scene: SceneController,
    input: InputState,
    backend: FrameStats,
    started: Instant,
}

impl App {
    pub fn new(config: SceneConfig) -> Self {
        let scene = SceneController::new(&config);
        let backend = FrameStats::new(config.stats_every);
        Self {
            config,
            window: None,
            scene,
            input: InputState::new(),
            backend,
            started: Instant::now(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        for command in self.input.drain() {
            self.scene.handle(command);
        }
        if !self.scene.is_running() {
            event_loop.exit();
            return;
        }

        let timestamp = self.started.elapsed().as_secs_f64();
        self.scene.on_frame(timestamp, &mut self.backend);

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window_attrs = Window::default_attributes()
            .with_title("Rotor City")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        match event_loop.create_window(window_attrs) {
            Ok(window) => {
                let size = window.inner_size();
                self.scene.on_resize(size.width, size.height);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => self.input.process_resize(size.width, size.height),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => self.input.process_keyboard(key, state, repeat),
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.process_mouse_button(button, state)
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.process_cursor_position((position.x, position.y))
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32,
                };
                self.input.process_scroll(dy);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
