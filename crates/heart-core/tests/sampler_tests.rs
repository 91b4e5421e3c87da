// Surface sampler behaviour on degenerate and mixed meshes.

use glam::Vec3;
use heart_core::{HeartError, SurfaceSampler, TriMesh};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn zero_area_triangle_is_never_sampled() {
    // first triangle collapsed onto a line, second a proper right triangle at z = 2
    let mesh = TriMesh::new(
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(1.0, 0.0, 2.0),
            Vec3::new(0.0, 1.0, 2.0),
        ],
        vec![0, 1, 2, 3, 4, 5],
    )
    .unwrap();
    let sampler = SurfaceSampler::new(&mesh).unwrap();
    let mut rng = StdRng::seed_from_u64(10_000);
    for _ in 0..10_000 {
        let p = sampler.sample(&mut rng);
        assert_eq!(p.z, 2.0, "sample left the positive-area triangle: {p}");
        assert!(p.x >= 0.0 && p.y >= 0.0 && p.x + p.y <= 1.0 + 1e-6);
    }
}

#[test]
fn zero_area_triangle_last_is_never_sampled() {
    let mesh = TriMesh::new(
        vec![
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(1.0, 0.0, 2.0),
            Vec3::new(0.0, 1.0, 2.0),
            Vec3::new(5.0, 5.0, 5.0),
        ],
        vec![0, 1, 2, 3, 3, 3],
    )
    .unwrap();
    let sampler = SurfaceSampler::new(&mesh).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..10_000 {
        assert_eq!(sampler.sample(&mut rng).z, 2.0);
    }
}

#[test]
fn all_degenerate_mesh_is_rejected() {
    let mesh = TriMesh::new(vec![Vec3::ONE; 3], vec![0, 1, 2, 2, 1, 0]).unwrap();
    match SurfaceSampler::new(&mesh) {
        Err(HeartError::DegenerateMesh { area }) => assert_eq!(area, 0.0),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("degenerate mesh accepted"),
    }
}

#[test]
fn same_seed_reproduces_samples() {
    let mesh = TriMesh::new(
        vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
        vec![0, 1, 2, 0, 1, 3, 1, 2, 3, 2, 0, 3],
    )
    .unwrap();
    let sampler = SurfaceSampler::new(&mesh).unwrap();
    let mut a = StdRng::seed_from_u64(42);
    let mut b = StdRng::seed_from_u64(42);
    for _ in 0..100 {
        assert_eq!(sampler.sample(&mut a), sampler.sample(&mut b));
    }
}
