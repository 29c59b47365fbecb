//! Terminal-facing UI: rendering contract, default renderer, and settings.

pub mod render;
pub mod renderer;
pub mod settings;
