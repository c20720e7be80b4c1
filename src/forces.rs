//! External forces (gravity, turbulent wind drag) and the Verlet
//! integration pass.

use crate::float::Float;
use crate::vec::{Vec, Vec3};
use crate::particle::Particle;
use crate::config::SimParams;
use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Drag coefficient of the quadratic wind model.
pub const DRAG_COEFFICIENT: f32 = 0.1;

/// Per-axis scale of the random gust added to the base wind.
pub const TURBULENCE_SCALE: [f32; 3] = [0.3, 0.2, 0.3];

/// Accumulates gravity and wind into particle force buffers.
///
/// Owns the turbulence generator. It is seeded once, when the field is
/// created, and never reseeded; rebuilding the cloth keeps the stream.
#[derive(Clone, Debug)]
pub struct ForceField {
    rng: ChaCha8Rng,
    turbulence: Uniform<f32>,
}

impl ForceField {
    pub fn new(seed: u64) -> Self {
        ForceField {
            rng: ChaCha8Rng::seed_from_u64(seed),
            turbulence: Uniform::new_inclusive(-1.0, 1.0),
        }
    }

    /// Reset and refill the force of every free particle.
    ///
    /// `dt` is the fixed step, used to recover particle velocity from
    /// Verlet state for the drag law.
    pub fn apply<F: Float>(&mut self, particles: &mut [Particle<Vec3<F>>], params: &SimParams<F>, dt: F) {
        let wind_on = params.wind_strength > F::zero();
        for p in particles.iter_mut() {
            if !p.is_free() {
                continue;
            }
            p.clear_force();
            p.force.y = p.force.y + params.gravity * p.mass;
            if wind_on {
                let wind = self.wind_force(p, params, dt);
                p.apply_force(wind);
            }
        }
    }

    /// Quadratic drag toward a turbulent wind velocity, scaled by mass.
    pub fn wind_force<F: Float>(&mut self, particle: &Particle<Vec3<F>>, params: &SimParams<F>, dt: F) -> Vec3<F> {
        let strength = params.wind_strength;
        let gust: Vec3<F> = self.turbulence();
        let wind = params.wind_direction.scale(strength) + gust.scale(strength);

        let relative = wind - particle.velocity(dt);
        let speed = relative.length();
        if speed <= F::zero() {
            return Vec3::zero();
        }
        let drag = speed * speed * F::from_f32(DRAG_COEFFICIENT);
        relative.scale(drag / speed * particle.mass)
    }

    /// Random gust vector, each axis uniform in `[-scale, scale]`.
    pub fn turbulence<F: Float>(&mut self) -> Vec3<F> {
        let x = self.rng.sample(self.turbulence) * TURBULENCE_SCALE[0];
        let y = self.rng.sample(self.turbulence) * TURBULENCE_SCALE[1];
        let z = self.rng.sample(self.turbulence) * TURBULENCE_SCALE[2];
        Vec3::from_f32([x, y, z])
    }
}

/// Advance every free particle by one damped Verlet step.
pub fn integrate<F: Float>(particles: &mut [Particle<Vec3<F>>], dt: F, damping: F) {
    for p in particles.iter_mut() {
        p.integrate(dt, damping);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn still_particle() -> Particle<Vec3<f32>> {
        Particle::new(Vec3::new(0.0, 0.0, 0.0), 2.0)
    }

    #[test]
    fn gravity_scales_with_mass() {
        let mut field = ForceField::new(1);
        let mut particles = [still_particle()];
        let params = SimParams::<f32>::default();
        field.apply(&mut particles, &params, DT);
        assert!((particles[0].force.y + 9.81 * 2.0).abs() < 1e-5);
        assert_eq!(particles[0].force.x, 0.0);
    }

    #[test]
    fn pinned_and_removed_particles_get_no_force() {
        let mut field = ForceField::new(1);
        let mut particles = [still_particle(), still_particle()];
        particles[0].pin();
        particles[1].deactivate();
        let params = SimParams::<f32> { wind_strength: 5.0, ..SimParams::default() };
        field.apply(&mut particles, &params, DT);
        assert_eq!(particles[0].force, Vec3::zero());
        assert_eq!(particles[1].force, Vec3::zero());
    }

    #[test]
    fn wind_force_stays_within_turbulence_envelope() {
        let mut field = ForceField::new(42);
        let p = still_particle();
        let params = SimParams::<f32> {
            wind_strength: 4.0,
            wind_direction: Vec3::new(0.0, 0.0, -1.0),
            ..SimParams::default()
        };
        for _ in 0..200 {
            let f = field.wind_force(&p, &params, DT);
            // Drag pushes along the (mostly -Z) wind.
            assert!(f.z < 0.0);
            // |wind| <= 4 * (1 + |turbulence|), turbulence <= sqrt(0.3^2 + 0.2^2 + 0.3^2)
            let max_speed = 4.0 * (1.0 + 0.47);
            let max_force = max_speed * max_speed * DRAG_COEFFICIENT * p.mass;
            assert!(f.length() <= max_force + 1e-4, "force {} above envelope", f.length());
        }
    }

    #[test]
    fn same_seed_same_turbulence() {
        let mut a = ForceField::new(9);
        let mut b = ForceField::new(9);
        for _ in 0..10 {
            let ta: Vec3<f32> = a.turbulence();
            let tb: Vec3<f32> = b.turbulence();
            assert_eq!(ta, tb);
            assert!(ta.x.abs() <= 0.3 && ta.y.abs() <= 0.2 && ta.z.abs() <= 0.3);
        }
    }

    #[test]
    fn integrate_moves_only_free_particles() {
        let mut particles = [still_particle(), still_particle()];
        particles[1].pin();
        for p in particles.iter_mut() {
            p.force = Vec3::new(0.0, -19.62, 0.0);
        }
        integrate(&mut particles, DT, 0.99);
        assert!(particles[0].pos.y < 0.0);
        assert_eq!(particles[1].pos, Vec3::zero());
    }
}
