//! Sandwich Unwrapped - ambient particle field
//!
//! The decorative layer of floating sandwich icons behind the login and
//! report views. Core modules:
//! - `field`: Deterministic simulation (placement, kinematics, collisions)
//! - `render`: Pure projection from particle state to visual placement
//! - `sched`: Frame-loop handle with guaranteed cancellation

pub mod field;
pub mod render;
pub mod sched;

pub use field::{Field, FieldConfig, Particle, Viewport};
pub use render::{Sprite, project};
pub use sched::CancelToken;

use glam::Vec2;

/// Animation policy constants
pub mod consts {
    /// Target number of floating sandwiches
    pub const FIELD_COUNT: usize = 30;
    /// Placement attempts per particle before it is dropped
    pub const PLACEMENT_ATTEMPTS: u32 = 50;
    /// Soft boundary: positions live in [POS_MIN, POS_MAX] percent
    pub const POS_MIN: f32 = 5.0;
    pub const POS_MAX: f32 = 95.0;

    /// Hard speed cap (holds after every collision response)
    pub const MAX_SPEED: f32 = 3.0;
    /// Spawn speed range
    pub const SPAWN_SPEED_MIN: f32 = 0.5;
    pub const SPAWN_SPEED_MAX: f32 = 1.5;
    /// Spawn scale range (fixed per particle at creation)
    pub const SCALE_MIN: f32 = 0.8;
    pub const SCALE_MAX: f32 = 1.2;

    /// Fraction of speed applied to position each frame (percent units)
    pub const MOVE_FACTOR: f32 = 0.05;
    /// Speed multiplier applied to both partners of a collision
    pub const COLLISION_BOOST: f32 = 1.1;
    /// Maximum post-collision angular jitter (radians, either sign)
    pub const COLLISION_JITTER: f32 = 0.1;
    /// Rotation advance per frame, degrees per unit of speed
    pub const ROTATION_FACTOR: f32 = 2.0;
    /// Pairs closer than this many pixels have no usable normal and are
    /// skipped by collision resolution
    pub const COINCIDENT_EPSILON: f32 = 1e-3;

    /// Default buffer distance as a fraction of the smaller viewport axis
    pub const BUFFER_VIEWPORT_FRACTION: f32 = 0.1;
    /// Sprite size in pixels at scale 1.0
    pub const BASE_SPRITE_PX: f32 = 40.0;
}

/// Unit vector for a heading angle
#[inline]
pub fn unit_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Heading angle of a velocity vector
#[inline]
pub fn angle_from_vec(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}
