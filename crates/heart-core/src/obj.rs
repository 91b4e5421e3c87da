//! Minimal Wavefront OBJ decoding: positions and faces only.
//!
//! Faces accept `v`, `v/vt`, `v//vn` and `v/vt/vn` references, negative
//! (relative) indices, and polygons with more than three corners, which are
//! fan-triangulated. Every other record (normals, texture coords, groups,
//! materials) is ignored.

use glam::Vec3;

use crate::error::{HeartError, Result};
use crate::mesh::TriMesh;

pub fn parse_obj(src: &str) -> Result<TriMesh> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut face: Vec<u32> = Vec::with_capacity(8);

    for (n, raw) in src.lines().enumerate() {
        let line_no = n + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                let mut xyz = [0.0f32; 3];
                for c in xyz.iter_mut() {
                    let tok = parts.next().ok_or_else(|| HeartError::Parse {
                        line: line_no,
                        message: "vertex needs three coordinates".into(),
                    })?;
                    *c = tok.parse().map_err(|_| HeartError::Parse {
                        line: line_no,
                        message: format!("bad coordinate '{tok}'"),
                    })?;
                }
                positions.push(Vec3::from_array(xyz));
            }
            Some("f") => {
                face.clear();
                for tok in parts {
                    face.push(resolve_index(tok, positions.len(), line_no)?);
                }
                if face.len() < 3 {
                    return Err(HeartError::Parse {
                        line: line_no,
                        message: format!("face has {} corners, need at least 3", face.len()),
                    });
                }
                for k in 1..face.len() - 1 {
                    indices.extend_from_slice(&[face[0], face[k], face[k + 1]]);
                }
            }
            _ => {}
        }
    }

    log::debug!(
        "[asset] parsed obj: vertices={} triangles={}",
        positions.len(),
        indices.len() / 3
    );
    TriMesh::new(positions, indices)
}

fn resolve_index(tok: &str, vertex_count: usize, line: usize) -> Result<u32> {
    let head = tok.split('/').next().unwrap_or("");
    let raw: i64 = head.parse().map_err(|_| HeartError::Parse {
        line,
        message: format!("bad face reference '{tok}'"),
    })?;
    let resolved = match raw {
        0 => None,
        r if r > 0 => Some(r - 1),
        r => Some(vertex_count as i64 + r),
    };
    match resolved {
        Some(i) if i >= 0 && (i as usize) < vertex_count => Ok(i as u32),
        _ => Err(HeartError::Parse {
            line,
            message: format!("face reference '{tok}' out of range ({vertex_count} vertices so far)"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quad_into_two_triangles() {
        let src = "# quad\nv 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1 4//1\n";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.positions.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn negative_indices_are_relative() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3/1/1 -2/2/1 -1/3/1\n";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn reports_line_of_bad_coordinate() {
        let err = parse_obj("v 0 0 0\nv 1 nope 0\n").unwrap_err();
        assert!(matches!(err, HeartError::Parse { line: 2, .. }));
    }

    #[test]
    fn rejects_forward_reference() {
        let err = parse_obj("v 0 0 0\nf 1 2 3\n").unwrap_err();
        assert!(matches!(err, HeartError::Parse { line: 2, .. }));
    }

    #[test]
    fn rejects_degenerate_face_record() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert!(matches!(err, HeartError::Parse { line: 3, .. }));
    }

    #[test]
    fn ignores_unknown_records_and_comments() {
        let src = "mtllib heart.mtl\no Heart\nv 0 0 0 # origin\nv 1 0 0\nv 0 1 0\nvt 0 0\ns off\nusemtl red\nf 1 2 3\n";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }
}
