//! Area - Rectangular Tablet Regions
//!
//! Rectangles in tablet or screen coordinate space, used for the device's
//! digitizer bounds, the active mapping, and the target screen.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Area {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Area {
    /// Create an area from offset and size
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge, widened to avoid overflow
    pub fn right(&self) -> u32 {
        u32::from(self.x) + u32::from(self.width)
    }

    /// Bottom edge, widened to avoid overflow
    pub fn bottom(&self) -> u32 {
        u32::from(self.y) + u32::from(self.height)
    }

    /// Clamp this area so it lies entirely inside `bounds`.
    ///
    /// The offset is clamped first, then the size shrinks to whatever room
    /// remains. Used before submitting an edited mapping to the driver.
    pub fn clamp_within(&self, bounds: &Area) -> Area {
        let max_x = bounds.x.saturating_add(bounds.width);
        let max_y = bounds.y.saturating_add(bounds.height);

        let x = self.x.clamp(bounds.x, max_x);
        let y = self.y.clamp(bounds.y, max_y);

        Area {
            x,
            y,
            width: self.width.min(max_x - x),
            height: self.height.min(max_y - y),
        }
    }

    /// Width-to-height ratio, `0.0` for a degenerate area
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        f32::from(self.width) / f32::from(self.height)
    }

    /// Ratio label shown next to the mapping preview, e.g. `1 : 1.6000`
    pub fn aspect_label(&self) -> String {
        format!("1 : {:.4}", self.aspect_ratio())
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}
