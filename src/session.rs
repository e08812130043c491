//! The drawing session: shape collection, active tool and pointer interaction.
//!
//! Every entry point mutates the session in one step and reports whether
//! anything visible changed, so the host knows when to redraw. Nothing here
//! touches the GPU.

use crate::color::{DEFAULT_BACKGROUND, DEFAULT_DRAW_COLOR};
use crate::drawing::{Shape, ShapeId, Tool};
use crate::hit_test::find_shape_at;
use crate::state::InteractionState;

pub const MIN_CANVAS_SIZE: u32 = 400;
pub const MAX_CANVAS_SIZE: u32 = 1200;
pub const DEFAULT_CANVAS_SIZE: u32 = 800;

/// Authoritative drawing state.
///
/// The `set_*` and `clear_all` commands are the host-facing surface for
/// toolbar-style controls; the bundled window host only applies them from
/// config at startup and on resize.
#[derive(Debug, Clone)]
pub struct Session {
    shapes: Vec<Shape>,
    tool: Tool,
    state: InteractionState,
    provisional: Option<Shape>,
    selected: Option<ShapeId>,
    pointer: Option<[f32; 2]>,
    draw_color: String,
    background: String,
    canvas_size: u32,
    next_id: ShapeId,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            tool: Tool::Select,
            state: InteractionState::Idle,
            provisional: None,
            selected: None,
            pointer: None,
            draw_color: DEFAULT_DRAW_COLOR.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
            canvas_size: DEFAULT_CANVAS_SIZE,
            next_id: 1,
        }
    }

    // Commands

    pub fn set_tool(&mut self, tool: Tool) -> bool {
        if self.tool == tool {
            return false;
        }
        log::debug!("Tool changed: {} -> {}", self.tool.name(), tool.name());
        self.tool = tool;
        true
    }

    /// Color for shapes created from now on. Expects `#rrggbb`.
    pub fn set_draw_color(&mut self, hex: &str) {
        self.draw_color = hex.to_string();
    }

    pub fn set_background(&mut self, hex: &str) -> bool {
        if self.background == hex {
            return false;
        }
        self.background = hex.to_string();
        true
    }

    /// Clamps to the supported range. Existing shapes keep their pixel positions.
    pub fn set_canvas_size(&mut self, px: u32) -> bool {
        let px = px.clamp(MIN_CANVAS_SIZE, MAX_CANVAS_SIZE);
        if self.canvas_size == px {
            return false;
        }
        log::info!("Canvas size changed to {}px", px);
        self.canvas_size = px;
        true
    }

    pub fn clear_all(&mut self) {
        log::debug!("Clearing {} shapes", self.shapes.len());
        self.shapes.clear();
        self.provisional = None;
        self.selected = None;
        self.state = InteractionState::Idle;
    }

    // Events

    pub fn on_pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.pointer = Some([x, y]);

        match self.tool.shape_kind() {
            None => {
                match find_shape_at(&self.shapes, x, y) {
                    Some(shape) => {
                        log::debug!("Selected {} (id {})", shape, shape.id);
                        self.selected = Some(shape.id);
                        self.state = InteractionState::Moving {
                            offset: [x - shape.x, y - shape.y],
                        };
                    }
                    None => {
                        self.selected = None;
                        self.state = InteractionState::Idle;
                    }
                }
                true
            }
            Some(kind) => {
                let id = self.allocate_id();
                self.provisional = Some(Shape::new(id, kind, [x, y], self.draw_color.clone()));
                self.state = InteractionState::Drawing { start: [x, y] };
                true
            }
        }
    }

    /// Pointer-down at the last known pointer position, for hosts whose
    /// button events carry no coordinates.
    pub fn on_button_press(&mut self) -> bool {
        match self.pointer {
            Some([x, y]) => self.on_pointer_down(x, y),
            None => {
                log::debug!("Ignoring press before any pointer position is known");
                false
            }
        }
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.pointer = Some([x, y]);

        match self.state {
            InteractionState::Idle => false,
            InteractionState::Moving { offset } => {
                let Some(shape) = self.selected_mut() else {
                    return false;
                };
                shape.x = x - offset[0];
                shape.y = y - offset[1];
                true
            }
            InteractionState::Drawing { start } => match self.provisional.as_mut() {
                Some(shape) => {
                    shape.drag_to(start, [x, y]);
                    true
                }
                None => false,
            },
        }
    }

    pub fn on_pointer_up(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            InteractionState::Idle => false,
            InteractionState::Moving { .. } => true,
            InteractionState::Drawing { .. } => {
                if let Some(shape) = self.provisional.take() {
                    if shape.meets_min_extent() {
                        log::debug!("Committed {} (id {})", shape, shape.id);
                        self.shapes.push(shape);
                    } else {
                        log::debug!("Discarded {}: below minimum size", shape);
                    }
                }
                true
            }
        }
    }

    /// Leaving the surface ends any drag in progress, same as releasing.
    pub fn on_pointer_leave(&mut self) -> bool {
        self.on_pointer_up()
    }

    /// Handles a keyboard shortcut by key name, case-insensitively.
    pub fn on_key(&mut self, key: &str) -> bool {
        match key.to_ascii_lowercase().as_str() {
            "v" => self.set_tool(Tool::Select),
            "b" => self.set_tool(Tool::Box),
            "a" => self.set_tool(Tool::Arrow),
            "l" => self.set_tool(Tool::Vector),
            "escape" => {
                let tool_changed = self.set_tool(Tool::Select);
                let cancelled = self.cancel_drawing();
                tool_changed || cancelled
            }
            "delete" | "backspace" => self.delete_selected(),
            _ => false,
        }
    }

    fn cancel_drawing(&mut self) -> bool {
        let had_shape = self.provisional.take().is_some();
        if matches!(self.state, InteractionState::Drawing { .. }) {
            self.state = InteractionState::Idle;
        }
        had_shape
    }

    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selected.take() else {
            return false;
        };
        self.shapes.retain(|shape| shape.id != id);
        if matches!(self.state, InteractionState::Moving { .. }) {
            self.state = InteractionState::Idle;
        }
        log::debug!("Deleted shape {}", id);
        true
    }

    fn allocate_id(&mut self) -> ShapeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn selected_mut(&mut self) -> Option<&mut Shape> {
        let id = self.selected?;
        self.shapes.iter_mut().find(|shape| shape.id == id)
    }

    // Queries

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn selection(&self) -> Option<&Shape> {
        let id = self.selected?;
        self.shapes.iter().find(|shape| shape.id == id)
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn provisional(&self) -> Option<&Shape> {
        self.provisional.as_ref()
    }

    pub fn pointer(&self) -> Option<[f32; 2]> {
        self.pointer
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn draw_color(&self) -> &str {
        &self.draw_color
    }

    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn canvas_size(&self) -> u32 {
        self.canvas_size
    }
}
