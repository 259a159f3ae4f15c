//! Core trait definitions

mod launcher;

pub use launcher::{ExternalRenderer, RendererLauncher};
