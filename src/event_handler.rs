use winit::dpi::PhysicalSize;
use winit::event::*;
use winit::keyboard::{Key, NamedKey};

use crate::app_state::State;

impl State {
    /// Follows the window size. The canvas takes the shorter side, clamped to
    /// its supported range; shapes keep their pixel positions.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.session
            .set_canvas_size(new_size.width.min(new_size.height));
        self.renderer.resize(
            new_size.width,
            new_size.height,
            self.session.canvas_size(),
        );

        let (width, height) = self.renderer.surface_size();
        log::info!(
            "Surface resized to {}x{}, canvas {}px",
            width,
            height,
            self.session.canvas_size()
        );
    }

    /// Feeds a window event to the session. Returns true when a redraw is needed.
    pub fn input(&mut self, event: &WindowEvent) -> bool {
        let changed = match event {
            WindowEvent::CursorMoved { position, .. } => self
                .session
                .on_pointer_move(position.x as f32, position.y as f32),
            WindowEvent::CursorLeft { .. } => self.session.on_pointer_leave(),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => self.session.on_button_press(),
                ElementState::Released => self.session.on_pointer_up(),
            },
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if key_event.state != ElementState::Pressed {
                    return false;
                }
                match key_name(&key_event.logical_key) {
                    Some(name) => self.session.on_key(name),
                    None => false,
                }
            }
            _ => return false,
        };

        self.refresh_title();
        changed
    }
}

fn key_name(key: &Key) -> Option<&str> {
    match key {
        Key::Named(NamedKey::Escape) => Some("Escape"),
        Key::Named(NamedKey::Delete) => Some("Delete"),
        Key::Named(NamedKey::Backspace) => Some("Backspace"),
        Key::Character(text) => Some(text.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(&Key::Named(NamedKey::Escape)), Some("Escape"));
        assert_eq!(key_name(&Key::Named(NamedKey::Backspace)), Some("Backspace"));
        assert_eq!(key_name(&Key::Character("B".into())), Some("B"));
        assert_eq!(key_name(&Key::Named(NamedKey::Enter)), None);
    }
}
