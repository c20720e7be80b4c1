//! Real-time tearable cloth simulation.
//!
//! `tearcloth` simulates a rectangular sheet as a grid of Verlet particles
//! joined by structural, shear and bend springs. Springs snap when stretched
//! past a configurable ratio of their rest length, the sheet collides with
//! spheres and a ground plane, and every frame yields a render-ready mesh.
//!
//! # Features
//!
//! - **Verlet integration**: Position-based dynamics with implicit velocity
//! - **Fixed timestep**: Frame-rate independent stepping with an accumulator
//! - **Tearing**: Overstretched springs snap; the pointer can rip particles out
//! - **Wind**: Relative-velocity drag with seeded turbulence
//! - **Scenarios**: Tear, collision and flag presets with scripted animation
//! - **Mesh export**: Interleaved position/normal/uv vertices plus indices
//! - **Observable**: Monitor physics steps via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! ```
//! use tearcloth::{ClothConfig, ClothSystem, SimulationMode};
//!
//! let mut cloth: ClothSystem<f32> = ClothSystem::new(ClothConfig::new().with_grid(10, 10)).unwrap();
//! cloth.set_mode(SimulationMode::Flag);
//! cloth.update(1.0 / 60.0);
//! assert_eq!(cloth.vertices().len(), 10 * 10 * 8);
//! ```

#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod float;
pub mod vec;
pub mod particle;
pub mod spring;
pub mod grid;
pub mod forces;
pub mod solver;
pub mod collision;
pub mod mesh;
pub mod timestep;
pub mod scenario;
pub mod cloth;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec3};
pub use particle::Particle;
pub use spring::{Spring, SpringKind, Relaxation};
pub use grid::{ClothGrid, GridConfig, SpringCounts};
pub use forces::ForceField;
pub use solver::SolveReport;
pub use collision::{CollisionSphere, GroundPlane};
pub use mesh::{ClothMesh, VERTEX_STRIDE};
pub use timestep::{FixedTimestep, FIXED_TIMESTEP};
pub use scenario::{SimulationMode, ObstaclePatrol, WindGust};
pub use cloth::{ClothSystem, ClothStats};
pub use config::{ClothConfig, SimParams};
pub use observer::{StepObserver, NoOpStepObserver, TearCounter};
pub use error::ClothError;
