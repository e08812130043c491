use std::sync::Arc;

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::app_state::State;
use crate::config::Config;
use crate::error::RenderError;

struct App {
    config: Config,
    state: Option<State>,
    init_error: Option<RenderError>,
}

impl App {
    fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
            init_error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: RenderError) {
        log::error!("Renderer initialization failed: {}", err);
        self.init_error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let session = self.config.new_session();
        let size = session.canvas_size();
        let window_attributes = Window::default_attributes()
            .with_title("wshapes")
            .with_inner_size(PhysicalSize::new(size, size))
            .with_resizable(false);

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, RenderError::UnsupportedContext(e.to_string()));
                return;
            }
        };

        match pollster::block_on(State::new(window, session)) {
            Ok(state) => {
                state.window().request_redraw();
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };
        if window_id != state.window().id() {
            return;
        }

        if state.input(&event) {
            state.window().request_redraw();
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(physical_size) => {
                state.resize(physical_size);
                state.window().request_redraw();
            }
            WindowEvent::RedrawRequested => match state.render() {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = state.window().inner_size();
                    state.resize(size);
                    state.window().request_redraw();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of GPU memory, exiting");
                    event_loop.exit();
                }
                Err(e) => log::warn!("Skipping frame: {:?}", e),
            },
            _ => {}
        }
    }
}

/// Opens the drawing window and runs until it is closed.
pub fn run() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::load().unwrap_or_else(|err| {
        log::warn!("{:#}, using default settings", err);
        Config::default()
    });

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .context("Event loop terminated with an error")?;

    match app.init_error {
        Some(err) => Err(anyhow::Error::new(err).context("Could not start the renderer")),
        None => Ok(()),
    }
}
