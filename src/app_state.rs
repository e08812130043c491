use std::sync::Arc;

use winit::window::Window;

use crate::error::RenderError;
use crate::renderer::Renderer;
use crate::session::Session;

pub struct State {
    pub window: Arc<Window>,
    pub renderer: Renderer,
    pub session: Session,
    title: String,
}

impl State {
    pub async fn new(window: Arc<Window>, session: Session) -> Result<State, RenderError> {
        let renderer = Renderer::new(window.clone(), session.canvas_size()).await?;

        let mut state = Self {
            window,
            renderer,
            session,
            title: String::new(),
        };
        state.refresh_title();
        Ok(state)
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.renderer.render(
            self.session.shapes(),
            self.session.provisional(),
            self.session.background(),
            self.session.selected_id(),
        )
    }

    /// Mirrors the session's HUD data into the window title.
    pub fn refresh_title(&mut self) {
        let title = hud_title(&self.session);
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }
    }
}

pub fn hud_title(session: &Session) -> String {
    let count = session.shapes().len();
    let mut title = format!(
        "wshapes | {} tool | {} shape{}",
        session.tool().name(),
        count,
        if count == 1 { "" } else { "s" }
    );

    if let Some([x, y]) = session.pointer() {
        title.push_str(&format!(" | ({}, {})", x.round(), y.round()));
    }
    if let Some(shape) = session.provisional() {
        title.push_str(&format!(" | drawing {}", shape));
    } else if let Some(shape) = session.selection() {
        title.push_str(&format!(" | selected {}", shape));
    }

    title
}
