//! Distance springs between cloth particles, with tearing.

use crate::float::Float;
use crate::vec::Vec;
use crate::particle::Particle;

/// Separation below which a spring is considered degenerate and skipped.
pub const DEGENERATE_DISTANCE: f32 = 1e-6;

/// Spring classes of the cloth lattice.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpringKind {
    /// Horizontal or vertical neighbour.
    Structural,
    /// Diagonal neighbour.
    Shear,
    /// Neighbour two cells away along a row or column.
    Bend,
}

impl SpringKind {
    /// Tuning stiffness used by the grid builder for this class.
    pub const fn stiffness(self) -> f32 {
        match self {
            SpringKind::Structural => 0.7,
            SpringKind::Shear => 0.3,
            SpringKind::Bend => 0.15,
        }
    }
}

/// What a single relaxation of one spring did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Relaxation {
    /// Spring already torn, or an endpoint was removed.
    Inactive,
    /// Endpoints coincide; no usable direction.
    Degenerate,
    /// Stretched past the tear threshold during this call.
    Torn,
    /// Positions were projected toward the rest length.
    Corrected,
}

/// A distance constraint between two particles.
///
/// A torn spring cannot be reactivated; only rebuilding the grid
/// produces fresh, active springs.
#[derive(Clone, Debug)]
pub struct Spring<V: Vec> {
    pub a: usize,
    pub b: usize,
    pub rest_length: V::Scalar,
    pub stiffness: V::Scalar,
    pub kind: SpringKind,
    active: bool,
}

impl<V: Vec> Spring<V> {
    pub fn new(a: usize, b: usize, rest_length: V::Scalar, stiffness: V::Scalar, kind: SpringKind) -> Self {
        debug_assert!(rest_length > V::Scalar::zero(), "spring rest length must be positive");
        Spring { a, b, rest_length, stiffness, kind, active: true }
    }

    /// Spring whose rest length is the current endpoint separation.
    pub fn from_particles(a: usize, b: usize, particles: &[Particle<V>], kind: SpringKind) -> Self {
        let rest_length = particles[a].pos.distance(particles[b].pos);
        Self::new(a, b, rest_length, V::Scalar::from_f32(kind.stiffness()), kind)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn connects(&self, index: usize) -> bool {
        self.a == index || self.b == index
    }

    /// Permanently deactivate. Returns true if the spring was active.
    pub fn tear(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        was_active
    }

    /// Current length divided by rest length.
    pub fn stretch(&self, particles: &[Particle<V>]) -> V::Scalar {
        particles[self.a].pos.distance(particles[self.b].pos) / self.rest_length
    }

    /// One Gauss-Seidel projection of this spring.
    ///
    /// Tears the spring instead of correcting it when its length exceeds
    /// `rest_length * tear_threshold`. The correction is split by the
    /// *other* endpoint's share of the total mass, and pinned endpoints
    /// never move.
    pub fn relax(&mut self, particles: &mut [Particle<V>], tear_threshold: V::Scalar) -> Relaxation {
        if !self.active {
            return Relaxation::Inactive;
        }
        let (pa, pb) = (&particles[self.a], &particles[self.b]);
        if !pa.active || !pb.active {
            return Relaxation::Inactive;
        }

        let delta = pb.pos - pa.pos;
        let dist = delta.length();
        if dist < V::Scalar::from_f32(DEGENERATE_DISTANCE) {
            return Relaxation::Degenerate;
        }

        if dist > self.rest_length * tear_threshold {
            self.active = false;
            return Relaxation::Torn;
        }

        let difference = (self.rest_length - dist) / dist;
        let translate = delta.scale(difference * self.stiffness);

        let total_mass = pa.mass + pb.mass;
        let ratio_a = pb.mass / total_mass;
        let ratio_b = pa.mass / total_mass;

        if !particles[self.a].pinned {
            particles[self.a].pos = particles[self.a].pos - translate.scale(ratio_a);
        }
        if !particles[self.b].pinned {
            particles[self.b].pos = particles[self.b].pos + translate.scale(ratio_b);
        }
        Relaxation::Corrected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec3;

    fn pair(distance: f32) -> [Particle<Vec3<f32>>; 2] {
        [
            Particle::new(Vec3::new(0.0, 0.0, 0.0), 1.0),
            Particle::new(Vec3::new(distance, 0.0, 0.0), 1.0),
        ]
    }

    #[test]
    fn rest_length_captured_from_geometry() {
        let particles = pair(2.5);
        let spring = Spring::from_particles(0, 1, &particles, SpringKind::Shear);
        assert!((spring.rest_length - 2.5).abs() < 1e-6);
        assert!((spring.stiffness - 0.3).abs() < 1e-6);
        assert!(spring.is_active());
    }

    #[test]
    fn stretched_spring_pulls_endpoints_together() {
        let mut particles = pair(1.5);
        let mut spring = Spring::new(0, 1, 1.0, 1.0, SpringKind::Structural);
        assert_eq!(spring.relax(&mut particles, 2.0), Relaxation::Corrected);
        let d = particles[0].pos.distance(particles[1].pos);
        assert!((d - 1.0).abs() < 1e-5, "full-stiffness spring should snap to rest, got {}", d);
    }

    #[test]
    fn pinned_endpoint_does_not_move() {
        let mut particles = pair(1.5);
        particles[0].pin();
        let mut spring = Spring::new(0, 1, 1.0, 1.0, SpringKind::Structural);
        spring.relax(&mut particles, 2.0);
        assert_eq!(particles[0].pos, Vec3::new(0.0, 0.0, 0.0));
        // The free endpoint only moves by its own mass share.
        assert!((particles[1].pos.x - 1.25).abs() < 1e-5);
    }

    #[test]
    fn heavier_endpoint_moves_less() {
        let mut particles = [
            Particle::new(Vec3::new(0.0f32, 0.0, 0.0), 10.0),
            Particle::new(Vec3::new(1.8, 0.0, 0.0), 1.0),
        ];
        let mut spring = Spring::new(0, 1, 1.0, 0.7, SpringKind::Structural);
        spring.relax(&mut particles, 2.0);
        let heavy = particles[0].pos.x.abs();
        let light = (particles[1].pos.x - 1.8).abs();
        assert!(heavy > 0.0 && heavy < light);
    }

    #[test]
    fn overstretched_spring_tears_without_correction() {
        let mut particles = pair(2.5);
        let mut spring = Spring::new(0, 1, 1.0, 0.7, SpringKind::Structural);
        assert_eq!(spring.relax(&mut particles, 2.0), Relaxation::Torn);
        assert!(!spring.is_active());
        assert_eq!(particles[1].pos.x, 2.5);
        // Coming back within range does not revive it.
        particles[1].pos.x = 1.0;
        assert_eq!(spring.relax(&mut particles, 2.0), Relaxation::Inactive);
    }

    #[test]
    fn coincident_endpoints_are_skipped() {
        let mut particles = pair(0.0);
        let mut spring = Spring::new(0, 1, 1.0, 0.7, SpringKind::Bend);
        assert_eq!(spring.relax(&mut particles, 2.0), Relaxation::Degenerate);
        assert!(spring.is_active());
    }

    #[test]
    fn removed_endpoint_disables_relaxation() {
        let mut particles = pair(1.5);
        particles[1].deactivate();
        let mut spring = Spring::new(0, 1, 1.0, 0.7, SpringKind::Structural);
        assert_eq!(spring.relax(&mut particles, 2.0), Relaxation::Inactive);
        assert!(spring.is_active());
    }
}
