//! Render projection
//!
//! Pure mapping from particle state to a visual placement. No side effects
//! and no DOM access here; the host applies the result to element styles.

use crate::field::Particle;

/// Visual placement for one sprite
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Horizontal offset, percent of viewport width
    pub left_pct: f32,
    /// Vertical offset, percent of viewport height
    pub top_pct: f32,
    /// Rotation in degrees
    pub rotation_deg: f32,
    /// Rendered size in pixels (base size times particle scale)
    pub size_px: f32,
}

impl Sprite {
    /// CSS transform for this placement
    pub fn transform(&self) -> String {
        format!("rotate({:.2}deg)", self.rotation_deg)
    }
}

/// Project a particle onto its visual placement
pub fn project(particle: &Particle, base_px: f32) -> Sprite {
    Sprite {
        left_pct: particle.x,
        top_pct: particle.y,
        rotation_deg: particle.rotation,
        size_px: base_px * particle.scale,
    }
}
