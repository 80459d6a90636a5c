//! 256-entry RGB palette
//!
//! The rasterizer only ever sees index bytes; the palette is applied once
//! per frame at present time to expand indices into RGBA texture bytes.
//! Palettes load and save as JSON so a setup can ship its own color set.

use crate::util::hsv_to_rgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const PALETTE_SIZE: usize = 256;

// Classic 16-color VGA base row, always occupying indices 0-15
const BASE_COLORS: [[u8; 3]; 16] = [
    [0, 0, 0],       // black
    [0, 0, 170],     // blue
    [0, 170, 0],     // green
    [0, 170, 170],   // cyan
    [170, 0, 0],     // red
    [170, 0, 170],   // magenta
    [170, 85, 0],    // brown
    [170, 170, 170], // light gray
    [85, 85, 85],    // dark gray
    [85, 85, 255],   // bright blue
    [85, 255, 85],   // bright green
    [85, 255, 255],  // bright cyan
    [255, 85, 85],   // bright red
    [255, 85, 255],  // bright magenta
    [255, 255, 85],  // yellow
    [255, 255, 255], // white
];

/// Index-to-RGB lookup consumed by the present step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
}

impl Palette {
    /// Build a palette from exactly 256 colors
    pub fn from_colors(colors: Vec<[u8; 3]>) -> Result<Self, String> {
        if colors.len() != PALETTE_SIZE {
            return Err(format!(
                "palette needs {} colors, got {}",
                PALETTE_SIZE,
                colors.len()
            ));
        }
        Ok(Self { colors })
    }

    #[inline]
    pub fn get(&self, index: u8) -> [u8; 3] {
        self.colors[index as usize]
    }

    pub fn set(&mut self, index: u8, color: [u8; 3]) {
        self.colors[index as usize] = color;
    }

    /// Save palette to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Load palette from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let palette: Palette = serde_json::from_str(&json).map_err(|e| e.to_string())?;
        Self::from_colors(palette.colors)
    }
}

impl Default for Palette {
    /// VGA base colors, a 216-entry hue ramp, then a 24-step grayscale
    fn default() -> Self {
        let mut colors = Vec::with_capacity(PALETTE_SIZE);
        colors.extend_from_slice(&BASE_COLORS);

        for i in 0..216 {
            let hue = i as f32 / 216.0 * 360.0;
            let (r, g, b) = hsv_to_rgb(hue, 0.8, 0.9);
            colors.push([r, g, b]);
        }

        for i in 0..24 {
            let v = (i as f32 / 23.0 * 255.0) as u8;
            colors.push([v, v, v]);
        }

        Self { colors }
    }
}
