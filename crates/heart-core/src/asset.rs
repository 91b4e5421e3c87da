//! Pick a decoder from the asset name.

use crate::error::{HeartError, Result};
use crate::glb::parse_glb;
use crate::mesh::TriMesh;
use crate::obj::parse_obj;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshFormat {
    Obj,
    Glb,
}

impl MeshFormat {
    /// Guess from the file extension (query strings are ignored).
    pub fn from_name(name: &str) -> Option<Self> {
        let path = name.split(['?', '#']).next().unwrap_or(name);
        let ext = path.rsplit_once('.')?.1.to_ascii_lowercase();
        match ext.as_str() {
            "obj" => Some(MeshFormat::Obj),
            "glb" => Some(MeshFormat::Glb),
            _ => None,
        }
    }
}

pub fn decode_mesh(name: &str, bytes: &[u8]) -> Result<TriMesh> {
    let format = MeshFormat::from_name(name)
        .ok_or_else(|| HeartError::AssetLoad(format!("{name}: unsupported mesh format")))?;
    match format {
        MeshFormat::Obj => {
            let src = std::str::from_utf8(bytes)
                .map_err(|e| HeartError::AssetLoad(format!("{name}: {e}")))?;
            parse_obj(src)
        }
        MeshFormat::Glb => parse_glb(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(MeshFormat::from_name("assets/heart.obj"), Some(MeshFormat::Obj));
        assert_eq!(MeshFormat::from_name("Heart.GLB"), Some(MeshFormat::Glb));
        assert_eq!(MeshFormat::from_name("heart.glb?v=3"), Some(MeshFormat::Glb));
        assert_eq!(MeshFormat::from_name("heart.fbx"), None);
        assert_eq!(MeshFormat::from_name("heart"), None);
    }

    #[test]
    fn obj_must_be_utf8() {
        assert!(matches!(
            decode_mesh("x.obj", &[0xff, 0xfe, 0x00]),
            Err(HeartError::AssetLoad(_))
        ));
    }

    #[test]
    fn unknown_format_is_an_asset_error() {
        assert!(matches!(
            decode_mesh("x.stl", b""),
            Err(HeartError::AssetLoad(_))
        ));
    }
}
