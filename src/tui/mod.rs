//! Terminal interface: spinner, renderer, and the multi-line editor.

pub mod editor;
pub mod progress;
pub mod renderer;
pub mod settings;
