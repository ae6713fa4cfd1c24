//! The per-frame particle update.
//!
//! [`ParticleCloud`] owns the particle buffer (positions and velocities), the
//! explosion mask, and the cloud's rigid rotation. One [`ParticleCloud::step`]
//! per rendered frame advances everything:
//!
//! 1. interaction motion rotates the whole cloud (or an idle spin when there
//!    is no input) and kicks a fixed random subset of particles,
//! 2. positions integrate their velocity, velocities decay exponentially,
//! 3. every particle eases toward its slot in the current target shape.
//!
//! Pass order matters: impulses are injected before integration, damping runs
//! before target easing. The constants are empirically tuned and are part of
//! the contract, not derived from anything.

use crate::shape::{self, ShapeKind};
use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Per-frame velocity retention (exponential decay toward rest).
const DAMPING: f32 = 0.90;
/// Per-frame fraction of the remaining distance to the target.
const ATTRACTION: f32 = 0.08;
/// Scale of the planar velocity kick per unit of interaction motion.
const IMPULSE_SCALE: f32 = 0.02;
/// Depth kick range (±0.1) applied alongside the planar impulse.
const DEPTH_KICK: f32 = 0.2;
/// Motion magnitude below which no impulses fire.
const MOVE_THRESHOLD: f32 = 0.2;
/// Cloud rotation per unit of interaction motion, radians.
const ROTATION_GAIN: f32 = 0.005;
/// Idle rotation around the vertical axis, radians per frame.
const IDLE_SPIN: f32 = 0.001;

/// The simulated particle cloud.
///
/// Fixed size after construction. The explosion mask is drawn once here and
/// never regenerated, so the same subset of particles reacts to interaction
/// for the lifetime of the instance, across all shapes.
pub struct ParticleCloud {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    explode_mask: Vec<bool>,
    /// Rigid rotation of the whole cloud: `x` is pitch, `y` is yaw.
    rotation: Vec2,
    dirty: bool,
    rng: SmallRng,
}

impl ParticleCloud {
    /// Create a cloud of `count` particles with OS-seeded randomness.
    ///
    /// Particles start on the Earth sphere, matching the initial shape the
    /// shell selects.
    pub fn new(count: usize) -> Self {
        Self::with_rng(count, SmallRng::from_entropy())
    }

    /// Create a cloud with an injected generator.
    ///
    /// The generator seeds the explosion mask and supplies all per-frame
    /// noise, so a fixed seed makes the whole simulation deterministic.
    pub fn with_rng(count: usize, mut rng: SmallRng) -> Self {
        let positions = shape::generate(ShapeKind::Earth, count, &[], &mut rng);
        let explode_mask = (0..count).map(|_| rng.gen_bool(0.5)).collect();
        Self {
            positions,
            velocities: vec![Vec3::ZERO; count],
            explode_mask,
            rotation: Vec2::ZERO,
            dirty: true,
            rng,
        }
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Current particle positions, one `Vec3` per particle.
    ///
    /// With glam's `bytemuck` feature this slice casts directly to the packed
    /// `3N` float buffer a render backend uploads.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Current velocities. Mainly useful for inspection and tests.
    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    /// Rigid rotation of the whole cloud (pitch, yaw) in radians.
    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    /// True when positions changed since the flag was last taken. The render
    /// backend uses this to decide whether to re-upload the buffer.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Advance the simulation by one frame.
    ///
    /// `target` must hold one coordinate per particle; extra entries are
    /// ignored and missing ones leave the tail particles coasting. `motion`
    /// is the fused interaction delta for this frame, `None` when there was
    /// no input at all.
    pub fn step(&mut self, target: &[Vec3], motion: Option<Vec2>) {
        match motion {
            Some(m) => {
                self.rotation.y += m.x * ROTATION_GAIN;
                self.rotation.x += m.y * ROTATION_GAIN;
                if m.x.abs() > MOVE_THRESHOLD || m.y.abs() > MOVE_THRESHOLD {
                    self.inject_impulses(m);
                }
            }
            None => self.rotation.y += IDLE_SPIN,
        }

        self.integrate_and_damp();
        self.ease_toward(target);
        self.dirty = true;
    }

    /// Kick every masked particle against the motion direction.
    ///
    /// The noise factor is drawn fresh per particle per frame; only the mask
    /// is fixed at construction.
    fn inject_impulses(&mut self, m: Vec2) {
        for (i, v) in self.velocities.iter_mut().enumerate() {
            if !self.explode_mask[i] {
                continue;
            }
            let noise = self.rng.gen::<f32>();
            v.x -= m.x * noise * IMPULSE_SCALE;
            v.y -= m.y * noise * IMPULSE_SCALE;
            v.z += (self.rng.gen::<f32>() - 0.5) * DEPTH_KICK;
        }
    }

    /// Explicit Euler step with a unit timestep, then exponential decay.
    ///
    /// No delta-time scaling: the feel is tied to the frame rate on purpose.
    fn integrate_and_damp(&mut self) {
        for (p, v) in self.positions.iter_mut().zip(self.velocities.iter_mut()) {
            *p += *v;
            *v *= DAMPING;
        }
    }

    /// First-order ease toward the current target shape. Converges without
    /// overshoot; the error shrinks by `1 - ATTRACTION` every frame.
    fn ease_toward(&mut self, target: &[Vec3]) {
        for (p, t) in self.positions.iter_mut().zip(target.iter()) {
            *p += (*t - *p) * ATTRACTION;
        }
    }
}
