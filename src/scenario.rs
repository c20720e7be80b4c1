//! Named scenario presets and the per-frame scenario animations.

use crate::float::Float;
use crate::vec::{Vec, Vec3};

/// Which particles a preset pins after the grid is rebuilt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PinPattern {
    /// Every particle of the top row.
    TopRow,
    /// The two top corners, on top of the top row kept from the rebuild.
    TopCorners,
}

/// An obstacle sphere spawned by a preset.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ObstacleSpawn {
    pub center: [f32; 3],
    pub radius: f32,
}

/// Initial conditions of a scenario.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Preset {
    pub pins: PinPattern,
    pub wind_strength: f32,
    /// `None` keeps the current wind direction.
    pub wind_direction: Option<[f32; 3]>,
    /// Spawned obstacles patrol; see [`ObstaclePatrol`].
    pub obstacle: Option<ObstacleSpawn>,
}

/// Scenario selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SimulationMode {
    /// Hanging sheet for pointer tearing.
    Tear,
    /// Hanging sheet swept by a patrolling sphere.
    Collision,
    /// Top-pinned sheet in gusting wind.
    Flag,
}

static PRESETS: [Preset; 3] = [
    // Tear
    Preset {
        pins: PinPattern::TopRow,
        wind_strength: 0.0,
        wind_direction: None,
        obstacle: None,
    },
    // Collision
    Preset {
        pins: PinPattern::TopCorners,
        wind_strength: 0.0,
        wind_direction: None,
        obstacle: Some(ObstacleSpawn { center: [0.0, 1.0, 6.0], radius: 0.8 }),
    },
    // Flag
    Preset {
        pins: PinPattern::TopRow,
        wind_strength: 6.0,
        wind_direction: Some(FLAG_WIND),
        obstacle: None,
    },
];

/// Resting wind direction of the flag scenario; gusts vary around it.
pub const FLAG_WIND: [f32; 3] = [0.0, 0.0, -1.0];

impl SimulationMode {
    pub const ALL: [SimulationMode; 3] = [SimulationMode::Tear, SimulationMode::Collision, SimulationMode::Flag];

    pub fn preset(self) -> &'static Preset {
        &PRESETS[self as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            SimulationMode::Tear => "tear",
            SimulationMode::Collision => "collision",
            SimulationMode::Flag => "flag",
        }
    }
}

impl Default for SimulationMode {
    fn default() -> Self {
        SimulationMode::Tear
    }
}

/// Forward-then-semicircle path for the collision obstacle.
///
/// The sphere first travels toward -Z by `range`, then swings back along a
/// half circle of radius `range / 2` in the XZ plane to where it started.
/// It never leaves `x in [start.x - range/2, start.x + range/2]`,
/// `z in [start.z - range, start.z]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ObstaclePatrol<F: Float> {
    start: Vec3<F>,
    time: F,
    angle: F,
    going_forward: bool,
    speed: F,
    range: F,
}

impl<F: Float> ObstaclePatrol<F> {
    pub const SPEED: f32 = 0.8;
    pub const RANGE: f32 = 8.0;
    /// The first forward leg starts this far along (in path time units).
    pub const INITIAL_TIME: f32 = 4.0;

    pub fn new(start: Vec3<F>) -> Self {
        ObstaclePatrol {
            start,
            time: F::from_f32(Self::INITIAL_TIME),
            angle: F::zero(),
            going_forward: true,
            speed: F::from_f32(Self::SPEED),
            range: F::from_f32(Self::RANGE),
        }
    }

    /// Advance by one rendered frame and write the new centre.
    ///
    /// The forward leg stops exactly at `start.z - range`, however long the
    /// frame.
    pub fn advance(&mut self, dt: F, center: &mut Vec3<F>) {
        let radius = self.range * F::half();
        if self.going_forward {
            self.time = self.time + dt * self.speed;
            center.z = self.start.z - self.time;
            if center.z <= self.start.z - self.range {
                center.z = self.start.z - self.range;
                self.going_forward = false;
                self.angle = F::zero();
            }
        } else {
            self.angle = self.angle + dt * self.speed;
            *center = Vec3::new(
                self.start.x + radius * self.angle.sin(),
                self.start.y,
                self.start.z - self.range + radius * (F::one() - self.angle.cos()),
            );
            if self.angle >= F::pi() {
                self.going_forward = true;
                self.time = F::zero();
                *center = self.start;
            }
        }
    }
}

/// Multi-frequency sinusoidal jitter of the wind direction.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WindGust<F: Float> {
    time: F,
}

impl<F: Float> WindGust<F> {
    /// Wind below this strength is left alone.
    pub const MIN_STRENGTH: f32 = 1.0;
    pub const VARIATION: f32 = 0.3;

    pub fn new() -> Self {
        WindGust { time: F::zero() }
    }

    /// Returns true if the direction was rewritten.
    pub fn advance(&mut self, dt: F, strength: F, direction: &mut Vec3<F>) -> bool {
        if strength < F::from_f32(Self::MIN_STRENGTH) {
            return false;
        }
        self.time = self.time + dt * F::from_f32(3.0);
        let t = self.time;
        let amp = F::from_f32(Self::VARIATION);
        let variation = Vec3::new(
            (t * F::from_f32(1.5)).sin() * amp,
            (t * F::from_f32(2.3)).sin() * amp * F::half(),
            (t * F::from_f32(1.8)).cos() * amp * F::from_f32(0.3),
        );
        let base = Vec3::from_f32(FLAG_WIND);
        *direction = (base + variation).normalize_or(base);
        true
    }
}
