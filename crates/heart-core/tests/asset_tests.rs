// Decode the bundled heart model and run a short animation on it.

use glam::Vec3;
use heart_core::{parse_obj, HeartConfig, HeartScene, SurfaceSampler};
use rand::rngs::StdRng;
use rand::SeedableRng;

const HEART_OBJ: &str = include_str!("../../../assets/heart.obj");

#[test]
fn bundled_heart_parses() {
    let mesh = parse_obj(HEART_OBJ).unwrap();
    assert_eq!(mesh.positions.len(), 21 * 40);
    // quads are fan-split into two triangles
    assert_eq!(mesh.triangle_count(), 20 * 40 * 2);
}

#[test]
fn bundled_heart_has_surface_area() {
    let config = HeartConfig::default();
    let world = parse_obj(HEART_OBJ).unwrap().transformed(&config.mesh);
    let sampler = SurfaceSampler::new(&world).unwrap();
    assert!(sampler.total_area() > 0.1);
}

#[test]
fn bundled_heart_animates() {
    let mut rng = StdRng::seed_from_u64(11);
    let config = HeartConfig::default().with_spark_count(2_000);
    let mut scene = HeartScene::from_obj(config, HEART_OBJ, &mut rng).unwrap();
    scene.start().unwrap();
    for i in 0..120 {
        scene.frame(i as f64 / 60.0);
    }
    let points = scene.spark_point_count();
    assert!(points <= 2 * 2_000);
    assert_eq!(scene.spark_positions().len(), points * 3);
    assert!(scene
        .live_vertices()
        .iter()
        .all(|v| v.is_finite()));
}

#[test]
fn bundled_heart_sparks_stay_in_view_slab_mid_turn() {
    let mut rng = StdRng::seed_from_u64(12);
    let config = HeartConfig::default().with_spark_count(4_000);
    let limit = config.depth.half_width() + 2.0 * config.sparks.jitter_max;
    let mut scene = HeartScene::from_obj(config, HEART_OBJ, &mut rng).unwrap();
    let quarter = scene.config().spin.period_sec / 4.0;
    scene.step(quarter);
    let model = scene.model_matrix();
    assert!(scene.spark_point_count() > 0);
    for p in scene.spark_positions().chunks_exact(3) {
        let view = model.transform_point3(Vec3::new(p[0], p[1], p[2]));
        assert!(view.z.abs() < limit, "view z {} outside slab", view.z);
    }
}

/// Smallest useful GLB: one indexed triangle in an embedded BIN chunk.
fn triangle_glb() -> Vec<u8> {
    let mut bin: Vec<u8> = Vec::new();
    for p in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
        for c in p {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    for i in [0u16, 1, 2] {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    let byte_length = bin.len();
    while bin.len() % 4 != 0 {
        bin.push(0);
    }

    let mut json = format!(
        concat!(
            r#"{{"asset":{{"version":"2.0"}},"buffers":[{{"byteLength":{}}}],"#,
            r#""bufferViews":[{{"buffer":0,"byteOffset":0,"byteLength":36}},"#,
            r#"{{"buffer":0,"byteOffset":36,"byteLength":6}}],"#,
            r#""accessors":[{{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0,0,0],"max":[1,1,0]}},"#,
            r#"{{"bufferView":1,"componentType":5123,"count":3,"type":"SCALAR"}}],"#,
            r#""meshes":[{{"primitives":[{{"attributes":{{"POSITION":0}},"indices":1}}]}}]}}"#
        ),
        byte_length
    )
    .into_bytes();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }

    let total = 12 + 8 + json.len() + 8 + bin.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(&json);
    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(b"BIN\0");
    out.extend_from_slice(&bin);
    out
}

#[test]
fn glb_triangle_decodes() {
    let mesh = heart_core::decode_mesh("tri.glb", &triangle_glb()).unwrap();
    assert_eq!(mesh.positions.len(), 3);
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    assert_eq!(mesh.positions[1], glam::Vec3::X);
}

#[test]
fn obj_and_glb_agree_on_area() {
    let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
    let a = heart_core::decode_mesh("tri.obj", obj.as_bytes()).unwrap();
    let b = heart_core::decode_mesh("tri.glb", &triangle_glb()).unwrap();
    let sa = SurfaceSampler::new(&a).unwrap().total_area();
    let sb = SurfaceSampler::new(&b).unwrap().total_area();
    assert!((sa - 0.5).abs() < 1e-9);
    assert!((sa - sb).abs() < 1e-9);
}
