//! Per-frame update step
//!
//! Three ordered passes over the particle set:
//! 1. Kinematic integration with boundary reflection
//! 2. Pairwise collision resolution
//! 3. Rotation advance
//!
//! Pass 2 mutates particles in place, so later pairs in the same frame see
//! positions and headings already updated by earlier pairs. That sequential
//! visibility is the shipped behavior for three-or-more-way pileups and is
//! kept as-is rather than redesigned to snapshot-then-commit.

use std::f32::consts::PI;

use rand::Rng;

use super::collision::{collision_threshold, contact_normal, pixel_distance, reflect_velocity};
use super::state::Field;
use crate::consts::{COINCIDENT_EPSILON, POS_MAX, POS_MIN};
use crate::{angle_from_vec, unit_from_angle};

impl Field {
    /// Advance the field by one display frame
    pub fn step(&mut self) {
        self.integrate();
        self.resolve_collisions();
        self.spin();
    }

    /// Pass 1: move each particle along its heading. A coordinate that would
    /// exit [POS_MIN, POS_MAX] stays at its pre-update value for this tick
    /// and the heading reflects off that wall instead.
    fn integrate(&mut self) {
        let move_factor = self.config.move_factor;
        for p in &mut self.particles {
            let nx = p.x + p.direction.cos() * p.speed * move_factor;
            let ny = p.y + p.direction.sin() * p.speed * move_factor;

            if (POS_MIN..=POS_MAX).contains(&ny) {
                p.y = ny;
            } else {
                p.direction = -p.direction;
            }
            if (POS_MIN..=POS_MAX).contains(&nx) {
                p.x = nx;
            } else {
                p.direction = PI - p.direction;
            }
        }
    }

    /// Pass 2: resolve each unordered pair at most once. Overlapping pairs
    /// mirror their velocities about the contact normal, pick up a small
    /// random heading jitter, separate by half the overlap, and gain the
    /// collision speed boost (capped).
    fn resolve_collisions(&mut self) {
        let viewport = self.viewport;
        let buffer = self.config.buffer_px;
        let boost = self.config.collision_boost;
        let jitter = self.config.collision_jitter;
        let max_speed = self.config.max_speed;

        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let (a, b) = (self.particles[i], self.particles[j]);

                let threshold = collision_threshold(buffer, a.scale, b.scale);
                let dist = pixel_distance(a.position(), b.position(), &viewport);
                if dist >= threshold {
                    continue;
                }
                let Some(normal) =
                    contact_normal(a.position(), b.position(), &viewport, COINCIDENT_EPSILON)
                else {
                    // Coincident centers: no usable normal, leave the pair alone
                    continue;
                };

                let va = unit_from_angle(a.direction) * a.speed;
                let vb = unit_from_angle(b.direction) * b.speed;
                let reflected_a = reflect_velocity(va, normal);
                let reflected_b = reflect_velocity(vb, normal);
                let jitter_a = self.rng.random_range(-jitter..jitter);
                let jitter_b = self.rng.random_range(-jitter..jitter);

                // Push both particles apart along the normal by half the
                // overlap, converted back to percentage units and clamped to
                // the soft boundary.
                let half_overlap = (threshold - dist) / 2.0;
                let push = viewport.to_percent(normal * half_overlap);

                {
                    let p = &mut self.particles[i];
                    p.direction = angle_from_vec(reflected_a) + jitter_a;
                    p.speed = (p.speed * boost).min(max_speed);
                    p.x = (p.x - push.x).clamp(POS_MIN, POS_MAX);
                    p.y = (p.y - push.y).clamp(POS_MIN, POS_MAX);
                }
                {
                    let p = &mut self.particles[j];
                    p.direction = angle_from_vec(reflected_b) + jitter_b;
                    p.speed = (p.speed * boost).min(max_speed);
                    p.x = (p.x + push.x).clamp(POS_MIN, POS_MAX);
                    p.y = (p.y + push.y).clamp(POS_MIN, POS_MAX);
                }
            }
        }
    }

    /// Pass 3: spin each sprite proportionally to how fast it is drifting
    fn spin(&mut self) {
        let rotation_factor = self.config.rotation_factor;
        for p in &mut self.particles {
            p.rotation += rotation_factor * p.speed;
        }
    }
}
