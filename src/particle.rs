//! Verlet particles: the point masses of the cloth lattice.

use crate::float::Float;
use crate::vec::Vec;

/// A Verlet point mass with implicit velocity.
///
/// Particles are never removed from their container. Tearing a particle
/// away clears `active`; its slot (and therefore every spring index that
/// refers to it) stays valid until the grid is rebuilt.
#[derive(Clone, Debug)]
pub struct Particle<V: Vec> {
    pub pos: V,
    pub prev_pos: V,
    /// Force accumulated for the current step; cleared by the force stage.
    pub force: V,
    pub mass: V::Scalar,
    pub inv_mass: V::Scalar,
    pub pinned: bool,
    pub active: bool,
}

impl<V: Vec> Particle<V> {
    /// Create an active particle at rest. `mass` must be positive.
    pub fn new(pos: V, mass: V::Scalar) -> Self {
        let inv_mass = if mass.is_near_zero(V::Scalar::from_f32(1e-10)) {
            V::Scalar::zero()
        } else {
            V::Scalar::one() / mass
        };
        Particle {
            pos,
            prev_pos: pos,
            force: V::zero(),
            mass,
            inv_mass,
            pinned: false,
            active: true,
        }
    }

    /// True if the particle takes part in force accumulation and integration.
    pub fn is_free(&self) -> bool {
        self.active && !self.pinned
    }

    pub fn clear_force(&mut self) {
        self.force = V::zero();
    }

    pub fn apply_force(&mut self, force: V) {
        if self.is_free() {
            self.force = self.force + force;
        }
    }

    /// Damped position Verlet step. Pinned and inactive particles are frozen.
    pub fn integrate(&mut self, dt: V::Scalar, damping: V::Scalar) {
        if !self.is_free() {
            return;
        }
        let velocity = (self.pos - self.prev_pos).scale(damping);
        let accel = self.force.scale(self.inv_mass);
        let new_pos = self.pos + velocity + accel.scale(dt * dt);
        self.prev_pos = self.pos;
        self.pos = new_pos;
    }

    /// Velocity implied by the last step, in units per second.
    pub fn velocity(&self, dt: V::Scalar) -> V {
        if dt.is_near_zero(V::Scalar::from_f32(1e-30)) {
            return V::zero();
        }
        (self.pos - self.prev_pos).scale(V::Scalar::one() / dt)
    }

    /// Per-step displacement (`pos - prev_pos`).
    pub fn velocity_raw(&self) -> V {
        self.pos - self.prev_pos
    }

    /// Rewrite `prev_pos` so the next step sees `displacement` as velocity.
    pub fn set_velocity_raw(&mut self, displacement: V) {
        self.prev_pos = self.pos - displacement;
    }

    pub fn pin(&mut self) {
        self.pinned = true;
        self.prev_pos = self.pos;
    }

    pub fn unpin(&mut self) {
        self.pinned = false;
    }

    /// Remove the particle from the simulation. Irreversible until rebuild.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.force = V::zero();
    }
}
