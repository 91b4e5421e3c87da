pub mod asset;
pub mod beat;
pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod glb;
pub mod lifecycle;
pub mod mesh;
pub mod noise;
pub mod obj;
pub mod packer;
pub mod sampler;
pub mod scene;
pub mod spark;

pub use asset::{decode_mesh, MeshFormat};
pub use beat::{BeatOscillator, BeatPhase, Ease};
pub use camera::Camera;
pub use clock::FrameClock;
pub use config::*;
pub use error::{HeartError, Result};
pub use glb::parse_glb;
pub use lifecycle::{LifecycleEvent, LifecycleState};
pub use mesh::{HeartMesh, TriMesh};
pub use noise::{ConstantNoise, NoiseField, SimplexNoise};
pub use obj::parse_obj;
pub use packer::{in_depth_band, pack_sparks, PackParams, SparkBuffers};
pub use sampler::SurfaceSampler;
pub use scene::{FrameOutcome, HeartScene};
pub use spark::{spawn_sparks, Spark};
