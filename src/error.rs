use thiserror::Error;

/// Failures that prevent the renderer from starting.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("graphics context unavailable: {0}")]
    UnsupportedContext(String),

    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),

    #[error("render pipeline link failed: {0}")]
    ShaderLink(String),
}
