//! Collision response against spheres and a ground plane.
//!
//! Every free particle is tested against every sphere; there is no
//! broad phase, so cost grows with `particles * spheres`.

use crate::float::Float;
use crate::vec::{Vec, Vec3};
use crate::particle::Particle;

/// Fraction of normal velocity reflected off a sphere.
pub const SPHERE_BOUNCE: f32 = 0.2;
/// Fraction of tangential velocity kept while sliding on a sphere.
pub const SPHERE_FRICTION: f32 = 0.9;
/// Height of the ground plane.
pub const GROUND_LEVEL: f32 = -5.0;
/// Fraction of velocity kept after touching the ground.
pub const GROUND_DAMPING: f32 = 0.4;
/// Below this distance from a sphere centre the outward normal is undefined.
const CENTER_EPSILON: f32 = 1e-6;

/// A solid sphere the cloth cannot enter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollisionSphere<F: Float> {
    pub center: Vec3<F>,
    pub radius: F,
}

impl<F: Float> CollisionSphere<F> {
    pub fn new(center: Vec3<F>, radius: F) -> Self {
        CollisionSphere { center, radius }
    }

    /// Strictly inside (on the surface counts as outside).
    pub fn contains(&self, point: Vec3<F>) -> bool {
        point.distance_sq(self.center) < self.radius * self.radius
    }

    /// Push a penetrating particle to the surface and rewrite its velocity.
    ///
    /// The normal part of the Verlet velocity is reflected and scaled by
    /// [`SPHERE_BOUNCE`]; the tangential part is scaled by
    /// [`SPHERE_FRICTION`]. Returns true on contact.
    pub fn resolve(&self, particle: &mut Particle<Vec3<F>>) -> bool {
        let diff = particle.pos - self.center;
        let dist = diff.length();
        if dist >= self.radius {
            return false;
        }

        let normal = if dist > F::from_f32(CENTER_EPSILON) {
            diff.scale(F::one() / dist)
        } else {
            Vec3::new(F::zero(), F::one(), F::zero())
        };
        particle.pos = self.center + normal.scale(self.radius);

        let velocity = particle.velocity_raw();
        let v_normal = normal.scale(velocity.dot(normal));
        let v_tangent = velocity - v_normal;
        let new_velocity = v_tangent.scale(F::from_f32(SPHERE_FRICTION)) - v_normal.scale(F::from_f32(SPHERE_BOUNCE));
        particle.set_velocity_raw(new_velocity);
        true
    }
}

/// Horizontal floor at `height`; particles below are clamped onto it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GroundPlane<F: Float> {
    pub height: F,
    pub damping: F,
}

impl<F: Float> Default for GroundPlane<F> {
    fn default() -> Self {
        GroundPlane {
            height: F::from_f32(GROUND_LEVEL),
            damping: F::from_f32(GROUND_DAMPING),
        }
    }
}

impl<F: Float> GroundPlane<F> {
    pub fn resolve(&self, particle: &mut Particle<Vec3<F>>) -> bool {
        if particle.pos.y >= self.height {
            return false;
        }
        particle.pos.y = self.height;
        let velocity = particle.velocity_raw();
        particle.set_velocity_raw(velocity.scale(self.damping));
        true
    }
}

/// Resolve every free particle against each sphere in order, then the ground.
///
/// Spheres are applied one after another, so with overlapping spheres a
/// later one may push a particle back into an earlier one. Returns the
/// number of contacts.
pub fn resolve_collisions<F: Float>(
    particles: &mut [Particle<Vec3<F>>],
    spheres: &[CollisionSphere<F>],
    ground: &GroundPlane<F>,
) -> usize {
    let mut contacts = 0;
    for p in particles.iter_mut() {
        if !p.is_free() {
            continue;
        }
        for sphere in spheres {
            if sphere.resolve(p) {
                contacts += 1;
            }
        }
        if ground.resolve(p) {
            contacts += 1;
        }
    }
    contacts
}
