use tearcloth::{ClothConfig, ClothSystem, SimulationMode, Vec3};
use wasm_bindgen::prelude::*;

/// Longest frame the demo will simulate; a stalled tab resumes calmly.
const MAX_FRAME_DELTA: f32 = 0.016;

fn mode_from_index(index: u32) -> SimulationMode {
    SimulationMode::ALL
        .get(index as usize)
        .copied()
        .unwrap_or_default()
}

// ---- Cloth Demo ----

#[wasm_bindgen]
pub struct ClothDemo {
    cloth: ClothSystem<f32>,
}

#[wasm_bindgen]
impl ClothDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(width: usize, height: usize, seed: u32) -> Result<ClothDemo, JsValue> {
        let config = ClothConfig::new()
            .with_grid(width, height)
            .with_seed(seed as u64)
            .with_max_frame_delta(Some(MAX_FRAME_DELTA));
        let cloth = ClothSystem::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(ClothDemo { cloth })
    }

    pub fn update(&mut self, dt: f32) {
        self.cloth.update(dt);
    }

    /// 0 = tear, 1 = collision, 2 = flag.
    pub fn set_mode(&mut self, mode: u32) {
        self.cloth.set_mode(mode_from_index(mode));
    }

    pub fn mode(&self) -> u32 {
        SimulationMode::ALL
            .iter()
            .position(|&m| m == self.cloth.mode())
            .unwrap_or(0) as u32
    }

    pub fn reset(&mut self) {
        self.cloth.reset();
    }

    /// Returns the number of particles torn out.
    pub fn handle_interaction(&mut self, x: f32, y: f32, z: f32, tearing: bool) -> usize {
        self.cloth.handle_interaction(Vec3::new(x, y, z), tearing)
    }

    pub fn add_sphere(&mut self, x: f32, y: f32, z: f32, radius: f32) {
        self.cloth.add_sphere(Vec3::new(x, y, z), radius);
    }

    pub fn clear_collision_objects(&mut self) {
        self.cloth.clear_collision_objects();
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.cloth.set_paused(paused);
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.cloth.set_gravity(gravity);
    }

    pub fn set_damping(&mut self, damping: f32) {
        self.cloth.set_damping(damping);
    }

    pub fn set_wind_strength(&mut self, strength: f32) {
        self.cloth.set_wind_strength(strength);
    }

    pub fn set_wind_direction(&mut self, x: f32, y: f32, z: f32) {
        self.cloth.set_wind_direction(Vec3::new(x, y, z));
    }

    pub fn set_tear_threshold(&mut self, threshold: f32) {
        self.cloth.set_tear_threshold(threshold);
    }

    /// Returns [gravity, damping, wind_strength, wx, wy, wz, tear_threshold]
    pub fn params(&self) -> Vec<f32> {
        let w = self.cloth.wind_direction();
        vec![
            self.cloth.gravity(),
            self.cloth.damping(),
            self.cloth.wind_strength(),
            w.x,
            w.y,
            w.z,
            self.cloth.tear_threshold(),
        ]
    }

    /// Interleaved [px, py, pz, nx, ny, nz, u, v] per vertex
    pub fn vertices(&self) -> Vec<f32> {
        self.cloth.vertices().to_vec()
    }

    pub fn indices(&self) -> Vec<u32> {
        self.cloth.indices().to_vec()
    }

    /// Returns flat [cx, cy, cz, r, ...] per sphere
    pub fn spheres(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.cloth.spheres().len() * 4);
        for s in self.cloth.spheres() {
            out.extend_from_slice(&[s.center.x, s.center.y, s.center.z, s.radius]);
        }
        out
    }

    /// Returns [active_particles, active_springs, torn_springs, last_substeps]
    pub fn stats(&self) -> Vec<u32> {
        let s = self.cloth.stats();
        vec![
            s.active_particles as u32,
            s.active_springs as u32,
            s.torn_springs as u32,
            s.last_substeps as u32,
        ]
    }

    pub fn grid_width(&self) -> usize {
        self.cloth.grid_width()
    }

    pub fn grid_height(&self) -> usize {
        self.cloth.grid_height()
    }
}
