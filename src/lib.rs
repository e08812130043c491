mod app;
mod app_state;
mod canvas;
mod event_handler;
mod renderer;
mod state;
mod vertex;

pub mod color;
pub mod config;
pub mod drawing;
pub mod error;
pub mod geometry;
pub mod hit_test;
pub mod session;

// Re-export the main public interface
pub use app::run;
pub use config::Config;
pub use drawing::{Shape, ShapeId, ShapeKind, Tool};
pub use error::RenderError;
pub use renderer::{DrawCommand, Renderer, plan_frame};
pub use session::Session;
pub use state::InteractionState;
pub use vertex::Vertex;
