//! Indexed triangle meshes and the rest/live vertex pair driven each frame.

use glam::{Mat4, Vec3};

use crate::config::{MeshTransform, NoiseConfig};
use crate::error::{HeartError, Result};
use crate::noise::NoiseField;

/// A decoded triangle mesh: vertex positions plus three indices per face.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriMesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl TriMesh {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Self> {
        let mesh = Self { positions, indices };
        mesh.validate()?;
        Ok(mesh)
    }

    pub fn validate(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            return Err(HeartError::MalformedMesh(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        let n = self.positions.len();
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= n) {
            return Err(HeartError::MalformedMesh(format!(
                "index {bad} out of range for {n} vertices"
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn triangle(&self, t: usize) -> [Vec3; 3] {
        let base = t * 3;
        [
            self.positions[self.indices[base] as usize],
            self.positions[self.indices[base + 1] as usize],
            self.positions[self.indices[base + 2] as usize],
        ]
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        (0..self.triangle_count()).map(move |t| self.triangle(t))
    }

    pub fn transformed(&self, transform: &MeshTransform) -> Self {
        self.transformed_by(transform.matrix())
    }

    pub fn transformed_by(&self, m: Mat4) -> Self {
        Self {
            positions: self.positions.iter().map(|&p| m.transform_point3(p)).collect(),
            indices: self.indices.clone(),
        }
    }
}

/// The heart's rest shape and the per-frame displaced copy handed to the renderer.
pub struct HeartMesh {
    rest: Vec<Vec3>,
    live: Vec<Vec3>,
    indices: Vec<u32>,
    dirty: bool,
}

impl HeartMesh {
    /// Capture `mesh` as the rest shape. The live buffer starts equal to it.
    pub fn from_world(mesh: TriMesh) -> Self {
        let live = mesh.positions.clone();
        Self {
            rest: mesh.positions,
            live,
            indices: mesh.indices,
            dirty: true,
        }
    }

    /// Rewrite every live vertex as `rest * (1 + (N(rest * S, time * T) + 1) * S * A * beat)`.
    pub fn displace<N: NoiseField + ?Sized>(
        &mut self,
        noise: &N,
        params: &NoiseConfig,
        time_sec: f32,
        beat: f32,
    ) {
        let s = params.spatial_scale;
        let gain = params.gain() * beat;
        let w = time_sec * params.time_scale;
        for (live, &rest) in self.live.iter_mut().zip(&self.rest) {
            let n = noise.sample_vec(rest * s, w) + 1.0;
            *live = rest * (1.0 + n * gain);
        }
        self.dirty = true;
    }

    #[inline]
    pub fn rest(&self) -> &[Vec3] {
        &self.rest
    }

    #[inline]
    pub fn live(&self) -> &[Vec3] {
        &self.live
    }

    #[inline]
    pub fn live_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.live)
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether the live buffer changed since the last call, clearing the flag.
    #[inline]
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
