//! Renderable surface derived from live particle state.
//!
//! The mesh is a pure projection: it is regenerated from the particles on
//! every rebuild and never patched in place.

use crate::float::Float;
use crate::vec::{Vec, Vec3};
use crate::particle::Particle;
use alloc::vec::Vec as AllocVec;

/// Floats per vertex: position (3), normal (3), uv (2).
pub const VERTEX_STRIDE: usize = 8;

/// Neighbour offsets sampled for smoothed normals; consecutive entries form
/// the edge pairs whose cross products are summed.
const NORMAL_FAN: [(isize, isize); 8] = [
    (1, 0), (-1, 0), (0, 1), (0, -1),
    (1, 1), (-1, -1), (1, -1), (-1, 1),
];

/// Interleaved vertex buffer and triangle list for the active cloth.
#[derive(Clone, Debug, Default)]
pub struct ClothMesh<F: Float> {
    vertices: AllocVec<F>,
    indices: AllocVec<u32>,
    remap: AllocVec<Option<u32>>,
}

impl<F: Float> ClothMesh<F> {
    pub fn new() -> Self {
        ClothMesh {
            vertices: AllocVec::new(),
            indices: AllocVec::new(),
            remap: AllocVec::new(),
        }
    }

    /// Regenerate all buffers from a `width x height` row-major particle grid.
    ///
    /// Only active particles become vertices. A quad is emitted as two
    /// triangles only if all four corners are active.
    pub fn rebuild(&mut self, particles: &[Particle<Vec3<F>>], width: usize, height: usize) {
        debug_assert_eq!(particles.len(), width * height);
        self.vertices.clear();
        self.indices.clear();
        self.remap.clear();
        self.remap.resize(particles.len(), None);

        let u_span = F::from_f32((width - 1) as f32);
        let v_span = F::from_f32((height - 1) as f32);
        let mut next = 0u32;
        for y in 0..height {
            for x in 0..width {
                let idx = y * width + x;
                let p = &particles[idx];
                if !p.active {
                    continue;
                }
                self.remap[idx] = Some(next);
                next += 1;

                let n = vertex_normal(particles, width, height, x, y);
                self.vertices.extend_from_slice(&[
                    p.pos.x, p.pos.y, p.pos.z,
                    n.x, n.y, n.z,
                    F::from_f32(x as f32) / u_span,
                    F::from_f32(y as f32) / v_span,
                ]);
            }
        }

        for y in 0..height - 1 {
            for x in 0..width - 1 {
                let corners = (
                    self.remap[y * width + x],
                    self.remap[y * width + x + 1],
                    self.remap[(y + 1) * width + x],
                    self.remap[(y + 1) * width + x + 1],
                );
                if let (Some(tl), Some(tr), Some(bl), Some(br)) = corners {
                    self.indices.extend_from_slice(&[tl, bl, tr, tr, bl, br]);
                }
            }
        }
    }

    /// Interleaved `[px, py, pz, nx, ny, nz, u, v]` per vertex.
    pub fn vertices(&self) -> &[F] { &self.vertices }
    pub fn indices(&self) -> &[u32] { &self.indices }
    /// Grid index to vertex index; `None` for removed particles.
    pub fn remap(&self) -> &[Option<u32>] { &self.remap }
    pub fn vertex_count(&self) -> usize { self.vertices.len() / VERTEX_STRIDE }
    pub fn triangle_count(&self) -> usize { self.indices.len() / 3 }

    /// Normal of vertex `vertex` as stored in the buffer.
    pub fn normal(&self, vertex: usize) -> Vec3<F> {
        let base = vertex * VERTEX_STRIDE + 3;
        Vec3::new(self.vertices[base], self.vertices[base + 1], self.vertices[base + 2])
    }
}

/// Smoothed normal at grid cell `(x, y)`, falling back to +Z.
pub fn vertex_normal<F: Float>(
    particles: &[Particle<Vec3<F>>],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
) -> Vec3<F> {
    let fallback = Vec3::new(F::zero(), F::zero(), F::one());
    let center = &particles[y * width + x];
    if !center.active {
        return fallback;
    }

    let neighbour = |(dx, dy): (isize, isize)| -> Option<Vec3<F>> {
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
            return None;
        }
        let p = &particles[ny as usize * width + nx as usize];
        if p.active { Some(p.pos - center.pos) } else { None }
    };

    let mut sum: Vec3<F> = Vec3::zero();
    let mut pairs = 0;
    for w in NORMAL_FAN.windows(2) {
        if let (Some(a), Some(b)) = (neighbour(w[0]), neighbour(w[1])) {
            sum = sum + a.cross(b);
            pairs += 1;
        }
    }
    if pairs == 0 {
        return fallback;
    }
    sum.normalize_or(fallback)
}
