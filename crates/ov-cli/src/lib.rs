//! ov-cli: Command-line interface for overlay-bridge
//!
//! Provides the `overlayctl` CLI for supervising the overlay renderer and
//! sending it draw commands by hand.

pub mod commands;
pub mod output;
