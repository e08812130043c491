mod uniform;

pub use uniform::{ColorUniform, ResolutionUniform};
