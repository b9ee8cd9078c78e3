//! Minimal UI layout primitives.
//!
//! Deliberately small: a `Rect` plus the couple of helpers the game's
//! layout code actually needs for grid placement and hit-testing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x
            && px < self.x.saturating_add(self.w)
            && py >= self.y
            && py < self.y.saturating_add(self.h)
    }

    pub fn center(&self) -> (u32, u32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Shrinks the rect by `margin` on every side, saturating to zero size.
    pub fn shrunk(&self, margin: u32) -> Self {
        Self {
            x: self.x.saturating_add(margin),
            y: self.y.saturating_add(margin),
            w: self.w.saturating_sub(margin.saturating_mul(2)),
            h: self.h.saturating_sub(margin.saturating_mul(2)),
        }
    }
}
