//! snappaste library crate.
//!
//! Take a photo, zoom/rotate/crop it on the device, and send it to the
//! desktop receiver. This module exposes the pipeline stages for the
//! binary and for integration testing.

pub mod camera;
pub mod cli;
pub mod compositor;
pub mod config;
pub mod controller;
pub mod editor;
pub mod geometry;
pub mod mapper;
pub mod transport;
pub mod zoom;
