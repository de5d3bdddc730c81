//! Pairwise collision math for the particle field
//!
//! Positions are stored as viewport percentages, so distance checks scale
//! them by the actual viewport dimensions first. Reflection mirrors the
//! velocity vector about the contact normal (elastic-bounce approximation).

use glam::Vec2;

use super::state::Viewport;

/// Euclidean distance between two percentage positions, in pixels
#[inline]
pub fn pixel_distance(a: Vec2, b: Vec2, viewport: &Viewport) -> f32 {
    (viewport.to_pixels(a) - viewport.to_pixels(b)).length()
}

/// Collision threshold for a pair, scaled by the mean of the two sizes
#[inline]
pub fn collision_threshold(buffer_px: f32, scale_a: f32, scale_b: f32) -> f32 {
    buffer_px / 100.0 * (scale_a + scale_b) / 2.0
}

/// Unit normal from `a` toward `b` in pixel space, or `None` when the
/// centers are too close to define one
pub fn contact_normal(a: Vec2, b: Vec2, viewport: &Viewport, epsilon: f32) -> Option<Vec2> {
    let delta = viewport.to_pixels(b) - viewport.to_pixels(a);
    let dist = delta.length();
    if dist < epsilon {
        return None;
    }
    Some(delta / dist)
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1000.0,
        height: 500.0,
    };

    #[test]
    fn test_pixel_distance_scales_each_axis() {
        // 10% horizontally is 100px, 10% vertically is 50px
        let d = pixel_distance(Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0), &VIEWPORT);
        assert!((d - 100.0).abs() < 1e-3);

        let d = pixel_distance(Vec2::new(10.0, 10.0), Vec2::new(10.0, 20.0), &VIEWPORT);
        assert!((d - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_threshold_scales_with_particle_sizes() {
        let base = collision_threshold(150.0, 1.0, 1.0);
        assert!((base - 1.5).abs() < 1e-5);

        // Two large particles collide at a wider threshold
        assert!(collision_threshold(150.0, 1.2, 1.2) > base);
        assert!(collision_threshold(150.0, 0.8, 0.8) < base);
    }

    #[test]
    fn test_contact_normal_is_unit_length() {
        let n = contact_normal(Vec2::new(40.0, 50.0), Vec2::new(60.0, 50.0), &VIEWPORT, 1e-3)
            .expect("normal for separated centers");
        assert!((n.length() - 1.0).abs() < 1e-5);
        assert!((n.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_contact_normal_rejects_coincident_centers() {
        let p = Vec2::new(50.0, 50.0);
        assert!(contact_normal(p, p, &VIEWPORT, 1e-3).is_none());
    }

    #[test]
    fn test_reflect_velocity() {
        // Moving right into a wall whose normal points left
        let velocity = Vec2::new(3.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-3.0)).abs() < 1e-4);
        assert!(reflected.y.abs() < 1e-4);
    }

    #[test]
    fn test_reflect_velocity_preserves_tangential_component() {
        let velocity = Vec2::new(1.0, 2.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-1.0)).abs() < 1e-4);
        assert!((reflected.y - 2.0).abs() < 1e-4);
        // Speed is unchanged by a pure reflection
        assert!((reflected.length() - velocity.length()).abs() < 1e-4);
    }
}
