//! Cloth lattice: particles on a planar grid joined by structural, shear
//! and bend springs.

use crate::float::Float;
use crate::vec::{Vec, Vec3};
use crate::particle::Particle;
use crate::spring::{Spring, SpringKind};
use crate::error::ClothError;
use alloc::vec::Vec as AllocVec;

/// Dimensions and physical layout of a cloth grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig<F: Float> {
    /// Particles per row (`W`, at least 2).
    pub width: usize,
    /// Particles per column (`H`, at least 2).
    pub height: usize,
    /// Physical extent along X; the cloth is centred on the Y axis.
    pub cloth_width: F,
    /// Physical extent along Y, from y = 0 up to the pinned top row.
    pub cloth_height: F,
    pub particle_mass: F,
}

impl<F: Float> GridConfig<F> {
    pub fn validate(&self) -> Result<(), ClothError> {
        if self.width < 2 || self.height < 2 {
            return Err(ClothError::InvalidGridDimensions { width: self.width, height: self.height });
        }
        let extent_ok = |v: F| v.is_finite() && v > F::zero();
        if !extent_ok(self.cloth_width) || !extent_ok(self.cloth_height) {
            return Err(ClothError::InvalidExtent);
        }
        if !extent_ok(self.particle_mass) {
            return Err(ClothError::InvalidMass);
        }
        Ok(())
    }
}

impl<F: Float> Default for GridConfig<F> {
    fn default() -> Self {
        GridConfig {
            width: 25,
            height: 25,
            cloth_width: F::from_f32(4.0),
            cloth_height: F::from_f32(4.0),
            particle_mass: F::one(),
        }
    }
}

/// Closed-form spring counts for a `W x H` grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpringCounts {
    pub structural: usize,
    pub shear: usize,
    pub bend: usize,
}

impl SpringCounts {
    pub fn for_grid(width: usize, height: usize) -> Self {
        let (w, h) = (width, height);
        SpringCounts {
            structural: (w - 1) * h + w * (h - 1),
            shear: 2 * (w - 1) * (h - 1),
            bend: w.saturating_sub(2) * h + w * h.saturating_sub(2),
        }
    }

    pub fn total(&self) -> usize {
        self.structural + self.shear + self.bend
    }
}

/// A cloth built from a grid of Verlet particles.
///
/// Particle `(x, y)` has index `y * width + x`; row `y = height - 1` is the
/// top edge. Both containers keep a fixed length for the lifetime of a
/// build: removal is expressed through `active` flags only.
pub struct ClothGrid<F: Float> {
    particles: AllocVec<Particle<Vec3<F>>>,
    springs: AllocVec<Spring<Vec3<F>>>,
    config: GridConfig<F>,
}

impl<F: Float> ClothGrid<F> {
    /// Build a pristine grid. Fails on dimensions below 2x2 or
    /// non-positive extents and mass.
    pub fn new(config: GridConfig<F>) -> Result<Self, ClothError> {
        config.validate()?;
        let mut grid = ClothGrid {
            particles: AllocVec::with_capacity(config.width * config.height),
            springs: AllocVec::with_capacity(SpringCounts::for_grid(config.width, config.height).total()),
            config,
        };
        grid.rebuild();
        Ok(grid)
    }

    /// Discard all state and rebuild particles and springs from scratch.
    ///
    /// The top row is pinned; every spring is active and at rest length.
    pub fn rebuild(&mut self) {
        let w = self.config.width;
        let h = self.config.height;
        self.particles.clear();
        self.springs.clear();

        let cw = self.config.cloth_width;
        let ch = self.config.cloth_height;
        for y in 0..h {
            for x in 0..w {
                let px = F::from_f32(x as f32) / F::from_f32((w - 1) as f32) * cw - cw * F::half();
                let py = F::from_f32(y as f32) / F::from_f32((h - 1) as f32) * ch;
                let mut p = Particle::new(Vec3::new(px, py, F::zero()), self.config.particle_mass);
                if y == h - 1 {
                    p.pin();
                }
                self.particles.push(p);
            }
        }

        for y in 0..h {
            for x in 0..w {
                let current = y * w + x;

                // Structural: right, below
                if x + 1 < w {
                    self.link(current, y * w + x + 1, SpringKind::Structural);
                }
                if y + 1 < h {
                    self.link(current, (y + 1) * w + x, SpringKind::Structural);
                }

                // Shear: both diagonals
                if x + 1 < w && y + 1 < h {
                    self.link(current, (y + 1) * w + x + 1, SpringKind::Shear);
                }
                if x > 0 && y + 1 < h {
                    self.link(current, (y + 1) * w + x - 1, SpringKind::Shear);
                }

                // Bend: skip-one right, skip-one below
                if x + 2 < w {
                    self.link(current, y * w + x + 2, SpringKind::Bend);
                }
                if y + 2 < h {
                    self.link(current, (y + 2) * w + x, SpringKind::Bend);
                }
            }
        }
    }

    fn link(&mut self, a: usize, b: usize, kind: SpringKind) {
        let spring = Spring::from_particles(a, b, &self.particles, kind);
        self.springs.push(spring);
    }

    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.config.width + x
    }

    /// Grid coordinates `(x, y)` of a particle index.
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.config.width, index / self.config.width)
    }

    pub fn pin(&mut self, x: usize, y: usize) {
        let idx = self.index(x, y);
        self.particles[idx].pin();
    }

    pub fn pin_top_row(&mut self) {
        let top = self.config.height - 1;
        for x in 0..self.config.width {
            self.pin(x, top);
        }
    }

    /// Remove a particle and every spring touching it.
    ///
    /// Returns the number of springs that were still active. Already
    /// removed particles are left alone and report zero.
    pub fn tear_particle(&mut self, index: usize) -> usize {
        if !self.particles[index].active {
            return 0;
        }
        self.particles[index].deactivate();
        self.springs
            .iter_mut()
            .filter(|s| s.connects(index))
            .map(|s| s.tear())
            .filter(|&was_active| was_active)
            .count()
    }

    /// Simultaneous mutable access for the solver stages.
    pub fn parts_mut(&mut self) -> (&mut [Particle<Vec3<F>>], &mut [Spring<Vec3<F>>]) {
        (&mut self.particles, &mut self.springs)
    }

    pub fn particles(&self) -> &[Particle<Vec3<F>>] { &self.particles }
    pub fn particles_mut(&mut self) -> &mut [Particle<Vec3<F>>] { &mut self.particles }
    pub fn springs(&self) -> &[Spring<Vec3<F>>] { &self.springs }
    pub fn width(&self) -> usize { self.config.width }
    pub fn height(&self) -> usize { self.config.height }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn spring_count(&self) -> usize { self.springs.len() }

    pub fn position_at(&self, x: usize, y: usize) -> Vec3<F> {
        self.particles[self.index(x, y)].pos
    }

    pub fn active_particle_count(&self) -> usize {
        self.particles.iter().filter(|p| p.active).count()
    }

    pub fn active_spring_count(&self) -> usize {
        self.springs.iter().filter(|s| s.is_active()).count()
    }
}
