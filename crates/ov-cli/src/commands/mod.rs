//! CLI command implementations

mod config;
mod run;
mod send;

pub use config::{config_init, config_path, config_show};
pub use run::{run_command, PlacementArgs};
pub use send::{clear_command, parse_color, shape_command, text_command, ShapeArgs, TextArgs};
