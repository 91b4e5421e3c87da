//! Area-weighted uniform sampling of points on a triangle mesh surface.

use glam::Vec3;
use rand::Rng;

use crate::error::{HeartError, Result};
use crate::mesh::TriMesh;

pub struct SurfaceSampler {
    triangles: Vec<[Vec3; 3]>,
    // cumulative[t] = total area of triangles 0..=t
    cumulative: Vec<f64>,
    total_area: f64,
    last_positive: usize,
}

impl SurfaceSampler {
    /// Build the cumulative-area table. Fails on meshes without usable area.
    pub fn new(mesh: &TriMesh) -> Result<Self> {
        mesh.validate()?;
        if mesh.triangle_count() == 0 {
            return Err(HeartError::EmptyMesh);
        }
        let triangles: Vec<[Vec3; 3]> = mesh.triangles().collect();
        let mut cumulative = Vec::with_capacity(triangles.len());
        let mut total = 0.0f64;
        let mut last_positive = 0;
        for (t, tri) in triangles.iter().enumerate() {
            let area = triangle_area(tri);
            if area > 0.0 {
                last_positive = t;
            }
            total += area;
            cumulative.push(total);
        }
        if !(total.is_finite() && total > 0.0) {
            return Err(HeartError::DegenerateMesh { area: total });
        }
        log::debug!(
            "[sampler] triangles={} area={:.4}",
            triangles.len(),
            total
        );
        Ok(Self {
            triangles,
            cumulative,
            total_area: total,
            last_positive,
        })
    }

    #[inline]
    pub fn total_area(&self) -> f64 {
        self.total_area
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Index of the triangle owning the point `r` in [0, total_area).
    fn pick(&self, r: f64) -> usize {
        // first triangle whose running total exceeds r; zero-area triangles never qualify
        self.cumulative
            .partition_point(|&c| c <= r)
            .min(self.last_positive)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let t = self.pick(rng.gen::<f64>() * self.total_area);
        let [a, b, c] = self.triangles[t];
        let mut u: f32 = rng.gen();
        let mut v: f32 = rng.gen();
        if u + v > 1.0 {
            u = 1.0 - u;
            v = 1.0 - v;
        }
        a + (b - a) * u + (c - a) * v
    }
}

fn triangle_area([a, b, c]: &[Vec3; 3]) -> f64 {
    let ab = (*b - *a).as_dvec3();
    let ac = (*c - *a).as_dvec3();
    0.5 * ab.cross(ac).length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn two_triangles(first: f32, second: f32) -> TriMesh {
        TriMesh::new(
            vec![
                Vec3::ZERO,
                Vec3::new(first, 0.0, 0.0),
                Vec3::new(0.0, first, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(second, 0.0, 1.0),
                Vec3::new(0.0, second, 1.0),
            ],
            vec![0, 1, 2, 3, 4, 5],
        )
        .unwrap()
    }

    #[test]
    fn empty_mesh_fails_fast() {
        let mesh = TriMesh::new(vec![Vec3::ZERO], vec![]).unwrap();
        assert!(matches!(SurfaceSampler::new(&mesh), Err(HeartError::EmptyMesh)));
    }

    #[test]
    fn zero_area_mesh_fails_at_build() {
        let mesh = TriMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0], vec![0, 1, 2]).unwrap();
        assert!(matches!(
            SurfaceSampler::new(&mesh),
            Err(HeartError::DegenerateMesh { .. })
        ));
    }

    #[test]
    fn pick_respects_area_weights() {
        // areas 0.5 and 2.0
        let sampler = SurfaceSampler::new(&two_triangles(1.0, 2.0)).unwrap();
        assert!((sampler.total_area() - 2.5).abs() < 1e-9);
        assert_eq!(sampler.pick(0.0), 0);
        assert_eq!(sampler.pick(0.49), 0);
        assert_eq!(sampler.pick(0.5), 1);
        assert_eq!(sampler.pick(2.4999), 1);
    }

    #[test]
    fn larger_triangle_gets_proportional_share() {
        let sampler = SurfaceSampler::new(&two_triangles(1.0, 2.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let n = 20_000;
        let on_second = (0..n).filter(|_| sampler.sample(&mut rng).z > 0.5).count();
        let share = on_second as f64 / n as f64;
        assert!((share - 0.8).abs() < 0.02, "share={share}");
    }

    #[test]
    fn samples_stay_inside_triangle() {
        let sampler = SurfaceSampler::new(&two_triangles(1.0, 1.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1000 {
            let p = sampler.sample(&mut rng);
            assert!(p.x >= -1e-6 && p.y >= -1e-6 && p.x + p.y <= 1.0 + 1e-5);
        }
    }
}
