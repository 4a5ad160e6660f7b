//! Solid RGBA colors passed to the `u_Color` uniform.

use serde::{Deserialize, Serialize};

/// A linear RGBA color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::opaque(1.0, 1.0, 1.0);
    pub const RED: Rgba = Rgba::opaque(1.0, 0.0, 0.0);
    pub const GREEN: Rgba = Rgba::opaque(0.0, 1.0, 0.0);
    pub const BLUE: Rgba = Rgba::opaque(0.0, 0.0, 1.0);
    pub const YELLOW: Rgba = Rgba::opaque(1.0, 1.0, 0.0);
    pub const CYAN: Rgba = Rgba::opaque(0.0, 1.0, 1.0);
    pub const MAGENTA: Rgba = Rgba::opaque(1.0, 0.0, 1.0);
    pub const ORANGE: Rgba = Rgba::opaque(1.0, 0.5, 0.0);

    /// Creates a color with the given components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque color.
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Components in uniform order.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Quantizes to RGBA8, clamping each component to [0, 1].
    pub fn to_rgba8(self) -> [u8; 4] {
        self.to_array()
            .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}
