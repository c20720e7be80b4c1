//! The cloth simulation: fixed-step physics, scenario control, interaction
//! and render exports behind one owner.

use crate::float::Float;
use crate::vec::{Vec, Vec3};
use crate::particle::Particle;
use crate::spring::Spring;
use crate::grid::ClothGrid;
use crate::forces::{self, ForceField};
use crate::solver;
use crate::collision::{self, CollisionSphere, GroundPlane};
use crate::mesh::ClothMesh;
use crate::scenario::{ObstaclePatrol, PinPattern, SimulationMode, WindGust};
use crate::timestep::FixedTimestep;
use crate::config::{ClothConfig, SimParams};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::error::ClothError;
use alloc::vec::Vec as AllocVec;

/// Pointer tears remove particles closer than this to the pointer.
pub const TEAR_RADIUS: f32 = 0.08;

/// Snapshot counters for UI and diagnostics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ClothStats {
    pub active_particles: usize,
    pub active_springs: usize,
    pub torn_springs: usize,
    /// Fixed steps run by the most recent `update`.
    pub last_substeps: usize,
}

/// A tearable cloth sheet with its obstacles and derived mesh.
///
/// All mutation goes through `&mut self`, so pointer tears and parameter
/// changes are always applied strictly between updates.
pub struct ClothSystem<F: Float> {
    grid: ClothGrid<F>,
    spheres: AllocVec<CollisionSphere<F>>,
    ground: GroundPlane<F>,
    params: SimParams<F>,
    forces: ForceField,
    timestep: FixedTimestep<F>,
    patrol: Option<ObstaclePatrol<F>>,
    gust: WindGust<F>,
    mesh: ClothMesh<F>,
    mode: SimulationMode,
    max_frame_delta: Option<F>,
    paused: bool,
    last_substeps: usize,
}

impl<F: Float> ClothSystem<F> {
    /// Build a cloth from `config`. Fails fast on invalid configuration.
    pub fn new(config: ClothConfig<F>) -> Result<Self, ClothError> {
        config.validate()?;
        let grid = ClothGrid::new(config.grid)?;
        let mut cloth = ClothSystem {
            grid,
            spheres: AllocVec::new(),
            ground: GroundPlane::default(),
            params: config.params,
            forces: ForceField::new(config.seed),
            timestep: FixedTimestep::default(),
            patrol: None,
            gust: WindGust::new(),
            mesh: ClothMesh::new(),
            mode: SimulationMode::default(),
            max_frame_delta: config.max_frame_delta,
            paused: false,
            last_substeps: 0,
        };
        cloth.rebuild_mesh();
        log::debug!(
            "cloth created: {}x{} particles, {} springs, seed {}",
            cloth.grid.width(),
            cloth.grid.height(),
            cloth.grid.spring_count(),
            config.seed
        );
        Ok(cloth)
    }

    /// Advance the simulation by a frame of `dt` seconds.
    pub fn update(&mut self, dt: F) {
        self.update_observed(dt, &mut NoOpStepObserver);
    }

    /// [`update`](Self::update) reporting every fixed step to `observer`.
    ///
    /// Frame-rate animations (obstacle patrol, wind gusts) run first, then
    /// the accumulator drains zero or more fixed steps, then the mesh is
    /// rebuilt.
    pub fn update_observed<O: StepObserver>(&mut self, dt: F, observer: &mut O) {
        if self.paused {
            self.last_substeps = 0;
            self.rebuild_mesh();
            return;
        }
        let dt = match self.max_frame_delta {
            Some(max) => dt.min(max),
            None => dt,
        };

        self.animate(dt);

        let steps = self.timestep.advance(dt);
        for _ in 0..steps {
            self.step(observer);
        }
        self.last_substeps = steps;

        self.rebuild_mesh();
    }

    fn animate(&mut self, dt: F) {
        if !(dt > F::zero()) {
            return;
        }
        if let (Some(patrol), Some(sphere)) = (self.patrol.as_mut(), self.spheres.first_mut()) {
            patrol.advance(dt, &mut sphere.center);
        }
        self.gust.advance(dt, self.params.wind_strength, &mut self.params.wind_direction);
    }

    /// One fixed step: forces, integration, relaxation, collisions.
    fn step<O: StepObserver>(&mut self, observer: &mut O) {
        let dt = self.timestep.step();
        let (particles, springs) = self.grid.parts_mut();

        self.forces.apply(particles, &self.params, dt);
        observer.on_forces();

        forces::integrate(particles, dt, self.params.damping);
        observer.on_integrate();

        let report = solver::solve(particles, springs, self.params.tear_threshold, observer);
        if report.torn > 0 {
            log::trace!("{} springs torn this step", report.torn);
        }

        let contacts = collision::resolve_collisions(particles, &self.spheres, &self.ground);
        observer.on_collisions(contacts);

        observer.on_step_complete();
    }

    /// Apply a scenario preset. Always starts from a freshly rebuilt grid,
    /// so the top row is pinned before the preset adds its own pins.
    pub fn set_mode(&mut self, mode: SimulationMode) {
        let preset = mode.preset();
        self.grid.rebuild();
        self.spheres.clear();
        self.patrol = None;

        match preset.pins {
            PinPattern::TopRow => self.grid.pin_top_row(),
            PinPattern::TopCorners => {
                let top = self.grid.height() - 1;
                let right = self.grid.width() - 1;
                self.grid.pin(0, top);
                self.grid.pin(right, top);
            }
        }

        self.params.wind_strength = F::from_f32(preset.wind_strength);
        if let Some(dir) = preset.wind_direction {
            self.params.wind_direction = Vec3::from_f32(dir).normalize();
        }
        if let Some(obstacle) = preset.obstacle {
            let center = Vec3::from_f32(obstacle.center);
            self.spheres.push(CollisionSphere::new(center, F::from_f32(obstacle.radius)));
            self.patrol = Some(ObstaclePatrol::new(center));
        }

        self.mode = mode;
        self.rebuild_mesh();
        log::debug!("scenario '{}' applied", mode.name());
    }

    /// Rebuild particles and springs to their pristine state.
    ///
    /// Spheres, parameters and the current mode are kept.
    pub fn reset(&mut self) {
        self.grid.rebuild();
        self.rebuild_mesh();
        log::debug!("cloth reset: {} springs restored", self.grid.spring_count());
    }

    /// Pointer tear: remove every active particle within [`TEAR_RADIUS`] of
    /// `world_pos`, together with all springs touching it.
    ///
    /// Returns the number of particles removed; zero when `tearing` is false.
    pub fn handle_interaction(&mut self, world_pos: Vec3<F>, tearing: bool) -> usize {
        if !tearing {
            return 0;
        }
        let radius = F::from_f32(TEAR_RADIUS);
        let hits: AllocVec<usize> = self
            .grid
            .particles()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.active && p.pos.distance(world_pos) < radius)
            .map(|(i, _)| i)
            .collect();
        for &i in &hits {
            let springs = self.grid.tear_particle(i);
            log::trace!("particle {} torn away with {} springs", i, springs);
        }
        if !hits.is_empty() {
            self.rebuild_mesh();
        }
        hits.len()
    }

    pub fn add_sphere(&mut self, center: Vec3<F>, radius: F) {
        if !(radius.is_finite() && radius > F::zero()) {
            log::warn!("ignoring sphere with radius {}", radius.to_f32());
            return;
        }
        self.spheres.push(CollisionSphere::new(center, radius));
        log::debug!("sphere added ({} total)", self.spheres.len());
    }

    pub fn clear_collision_objects(&mut self) {
        self.spheres.clear();
        self.patrol = None;
    }

    /// Pin or release one particle by grid index. Unknown indices are ignored.
    pub fn set_pinned(&mut self, index: usize, pinned: bool) {
        match self.grid.particles_mut().get_mut(index) {
            Some(p) if pinned => p.pin(),
            Some(p) => p.unpin(),
            None => log::warn!("ignoring pin change for unknown particle {}", index),
        }
    }

    // --- live parameters ---

    pub fn gravity(&self) -> F { self.params.gravity }
    pub fn damping(&self) -> F { self.params.damping }
    pub fn wind_strength(&self) -> F { self.params.wind_strength }
    pub fn wind_direction(&self) -> Vec3<F> { self.params.wind_direction }
    pub fn tear_threshold(&self) -> F { self.params.tear_threshold }

    pub fn set_gravity(&mut self, gravity: F) {
        if gravity.is_finite() {
            self.params.gravity = gravity;
        } else {
            log::warn!("ignoring non-finite gravity");
        }
    }

    pub fn set_damping(&mut self, damping: F) {
        if damping >= F::zero() && damping <= F::one() {
            self.params.damping = damping;
        } else {
            log::warn!("ignoring damping {} outside [0, 1]", damping.to_f32());
        }
    }

    pub fn set_wind_strength(&mut self, strength: F) {
        if strength.is_finite() {
            self.params.wind_strength = strength;
        } else {
            log::warn!("ignoring non-finite wind strength");
        }
    }

    /// Set the wind direction; it is normalized. A zero vector is ignored.
    pub fn set_wind_direction(&mut self, direction: Vec3<F>) {
        let unit = direction.normalize();
        if unit == Vec3::zero() {
            log::warn!("ignoring zero wind direction");
            return;
        }
        self.params.wind_direction = unit;
    }

    pub fn set_tear_threshold(&mut self, threshold: F) {
        if threshold.is_finite() && threshold > F::one() {
            self.params.tear_threshold = threshold;
        } else {
            log::warn!("ignoring tear threshold {}", threshold.to_f32());
        }
    }

    pub fn set_paused(&mut self, paused: bool) { self.paused = paused; }
    pub fn is_paused(&self) -> bool { self.paused }

    // --- exports ---

    /// Interleaved `[px, py, pz, nx, ny, nz, u, v]` vertices of the active cloth.
    pub fn vertices(&self) -> &[F] { self.mesh.vertices() }
    pub fn indices(&self) -> &[u32] { self.mesh.indices() }
    pub fn spheres(&self) -> &[CollisionSphere<F>] { &self.spheres }
    pub fn mesh(&self) -> &ClothMesh<F> { &self.mesh }
    pub fn particles(&self) -> &[Particle<Vec3<F>>] { self.grid.particles() }
    pub fn springs(&self) -> &[Spring<Vec3<F>>] { self.grid.springs() }
    pub fn grid_width(&self) -> usize { self.grid.width() }
    pub fn grid_height(&self) -> usize { self.grid.height() }
    pub fn mode(&self) -> SimulationMode { self.mode }

    pub fn stats(&self) -> ClothStats {
        let active_springs = self.grid.active_spring_count();
        ClothStats {
            active_particles: self.grid.active_particle_count(),
            active_springs,
            torn_springs: self.grid.spring_count() - active_springs,
            last_substeps: self.last_substeps,
        }
    }

    fn rebuild_mesh(&mut self) {
        self.mesh.rebuild(self.grid.particles(), self.grid.width(), self.grid.height());
    }
}
