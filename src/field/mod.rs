//! Deterministic particle field
//!
//! All animation state lives here. This module must be pure and deterministic:
//! - One update per display frame
//! - Seeded RNG only
//! - Stable iteration order (by particle index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod step;

pub use collision::{collision_threshold, pixel_distance, reflect_velocity};
pub use state::{Field, FieldConfig, Particle, Viewport};
