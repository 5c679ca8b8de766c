//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, value parsers, and subcommand handlers.

mod args;
mod commands;
mod parsers;

pub use args::{Args, Command, ConfigAction};
pub use commands::{handle_config_action, run_ping, run_send, SendOptions};
pub use parsers::{parse_crop, parse_rotation, parse_viewport, parse_zoom};
