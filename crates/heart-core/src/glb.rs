//! Binary glTF (GLB) decoding: every triangle primitive merged into one mesh.
//!
//! Only the embedded BIN chunk is read; external buffer URIs and node
//! transforms are ignored.

use glam::Vec3;

use crate::error::{HeartError, Result};
use crate::mesh::TriMesh;

pub fn parse_glb(bytes: &[u8]) -> Result<TriMesh> {
    let gltf = gltf::Gltf::from_slice(bytes)
        .map_err(|e| HeartError::AssetLoad(format!("Failed to read glTF: {}", e)))?;
    let blob = gltf.blob.as_deref();

    let mut positions: Vec<Vec3> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for mesh in gltf.document.meshes() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!(
                    "[asset] skipping mesh {} primitive {}: mode {:?}",
                    mesh.index(),
                    primitive.index(),
                    primitive.mode()
                );
                continue;
            }
            let reader = primitive.reader(|buffer| match buffer.source() {
                gltf::buffer::Source::Bin => blob,
                gltf::buffer::Source::Uri(_) => None,
            });
            let Some(read) = reader.read_positions() else {
                return Err(HeartError::AssetLoad(format!(
                    "mesh {} primitive {} has no readable POSITION",
                    mesh.index(),
                    primitive.index()
                )));
            };
            let base = positions.len() as u32;
            positions.extend(read.map(Vec3::from_array));
            let added = positions.len() as u32 - base;
            match reader.read_indices() {
                Some(read) => indices.extend(read.into_u32().map(|i| base + i)),
                None => indices.extend(base..base + added),
            }
        }
    }

    log::debug!(
        "[asset] parsed glb: vertices={} triangles={}",
        positions.len(),
        indices.len() / 3
    );
    TriMesh::new(positions, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_glb(b"definitely not a glb"),
            Err(HeartError::AssetLoad(_))
        ));
    }
}
