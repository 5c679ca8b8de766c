//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::parsers::{parse_crop, parse_rotation, parse_viewport, parse_zoom};
use crate::editor::Rotation;
use crate::geometry::{Rect, Size};

/// Snap a photo, rotate/crop it, and paste it on your desktop
#[derive(Parser, Debug)]
#[command(name = "snappaste")]
#[command(version, about = "Send photos to the desktop clipboard receiver", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Receiver URL (overrides config and SNAPPASTE_SERVER_URL)
    #[arg(long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Capture a photo from an image file and send it
    Send {
        /// Image file standing in for the camera frame
        input: PathBuf,

        /// Zoom factor applied before capture
        #[arg(long, short, value_parser = parse_zoom)]
        zoom: Option<f64>,

        /// Clockwise rotation in degrees (0, 90, 180, 270)
        #[arg(long, short, default_value = "0", value_parser = parse_rotation)]
        rotate: Rotation,

        /// Crop rectangle in preview coordinates: X,Y,WIDTH,HEIGHT
        #[arg(long, value_parser = parse_crop)]
        crop: Option<Rect>,

        /// Preview viewport the crop is drawn in (WIDTHxHEIGHT)
        #[arg(long, value_parser = parse_viewport)]
        viewport: Option<Size>,

        /// Send immediately without rotate/crop
        #[arg(long, short)]
        quick: bool,

        /// Write the JPEG to this path instead of uploading
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Check that the receiver is reachable
    Ping,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
