//! Value parsers for CLI options.

use crate::editor::Rotation;
use crate::geometry::{Rect, Size};

/// Parse a zoom factor (must be a positive number).
pub fn parse_zoom(s: &str) -> Result<f64, String> {
    let factor: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid zoom factor", s))?;
    if !factor.is_finite() || factor <= 0.0 {
        return Err(format!("Zoom factor must be positive, got {}", factor));
    }
    Ok(factor)
}

/// Parse a rotation in degrees (0, 90, 180 or 270; negative values wrap).
pub fn parse_rotation(s: &str) -> Result<Rotation, String> {
    let degrees: i32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid rotation", s))?;
    Rotation::from_degrees(degrees)
        .ok_or_else(|| format!("Rotation must be a multiple of 90 degrees, got {}", degrees))
}

/// Parse a crop rectangle in canvas coordinates (X,Y,W,H format).
pub fn parse_crop(s: &str) -> Result<Rect, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(format!(
            "Invalid crop format '{}'. Use X,Y,WIDTH,HEIGHT (e.g., 40,40,320,220)",
            s
        ));
    }
    let mut values = [0.0f64; 4];
    for (value, part) in values.iter_mut().zip(&parts) {
        let parsed: f64 = part
            .parse()
            .map_err(|_| format!("Invalid number '{}' in crop", part))?;
        if !parsed.is_finite() {
            return Err(format!("Crop values must be finite, got '{}'", part));
        }
        *value = parsed;
    }
    let [x, y, width, height] = values;
    if width <= 0.0 || height <= 0.0 {
        return Err("Crop width and height must be greater than 0".to_string());
    }
    Ok(Rect::new(x, y, width, height))
}

/// Parse and validate a viewport size (WIDTHxHEIGHT format).
pub fn parse_viewport(s: &str) -> Result<Size, String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!(
            "Invalid viewport format '{}'. Use WIDTHxHEIGHT (e.g., 400x300)",
            s
        ));
    }
    let width: u32 = parts[0]
        .parse()
        .map_err(|_| format!("Invalid width '{}' in viewport", parts[0]))?;
    let height: u32 = parts[1]
        .parse()
        .map_err(|_| format!("Invalid height '{}' in viewport", parts[1]))?;
    if width == 0 || height == 0 {
        return Err("Viewport width and height must be greater than 0".to_string());
    }
    Ok(Size::new(width as f64, height as f64))
}
