//! Immutable scene configuration.
//!
//! A `HeartConfig` is built once (usually via `Default`) and handed to
//! `HeartScene::new`; components receive the sub-config they need by
//! reference and never look anything up globally.

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::constants::*;
use crate::error::{HeartError, Result};

#[derive(Clone, Debug)]
pub struct SparkConfig {
    pub count: usize,
    pub jitter_max: f32,
    pub near_base: f32,
    pub near_noise_offset: f32,
    pub near_noise_w: f32,
    pub far_frequency: f32,
    pub far_noise_w: f32,
    pub far_noise_gain: f32,
    pub far_beat_bias: f32,
    pub far_beat_pull: f32,
}

impl Default for SparkConfig {
    fn default() -> Self {
        Self {
            count: SPARK_COUNT,
            jitter_max: SPARK_JITTER_MAX,
            near_base: SPARK_NEAR_BASE,
            near_noise_offset: SPARK_NEAR_NOISE_OFFSET,
            near_noise_w: SPARK_NEAR_NOISE_W,
            far_frequency: SPARK_FAR_FREQUENCY,
            far_noise_w: SPARK_FAR_NOISE_W,
            far_noise_gain: SPARK_FAR_NOISE_GAIN,
            far_beat_bias: SPARK_FAR_BEAT_BIAS,
            far_beat_pull: SPARK_FAR_BEAT_PULL,
        }
    }
}

#[derive(Clone, Debug)]
pub struct NoiseConfig {
    pub spatial_scale: f32,
    pub amplitude: f32,
    pub time_scale: f32,
    pub seed: u64,
}

impl NoiseConfig {
    /// Combined gain `K` applied to the near candidate and to mesh displacement.
    #[inline]
    pub fn gain(&self) -> f32 {
        self.spatial_scale * self.amplitude
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            spatial_scale: NOISE_SPATIAL_SCALE,
            amplitude: NOISE_AMPLITUDE,
            time_scale: NOISE_TIME_SCALE,
            seed: NOISE_SEED,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BeatConfig {
    pub peak: f32,
    pub rise_sec: f32,
    pub fall_sec: f32,
    pub repeat_delay_sec: f32,
    pub reduced_motion_fraction: f32,
}

impl BeatConfig {
    #[inline]
    pub fn cycle_sec(&self) -> f32 {
        self.rise_sec + self.fall_sec + self.repeat_delay_sec
    }
}

impl Default for BeatConfig {
    fn default() -> Self {
        Self {
            peak: BEAT_PEAK,
            rise_sec: BEAT_RISE_SEC,
            fall_sec: BEAT_FALL_SEC,
            repeat_delay_sec: BEAT_REPEAT_DELAY_SEC,
            reduced_motion_fraction: BEAT_REDUCED_MOTION_FRACTION,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DepthBandConfig {
    pub max_z: f32,
    pub rate: f32,
}

impl DepthBandConfig {
    /// Half-width `D` of the slab around z = 0.
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.max_z * self.rate
    }
}

impl Default for DepthBandConfig {
    fn default() -> Self {
        Self {
            max_z: DEPTH_MAX_Z,
            rate: DEPTH_RATE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FrameConfig {
    pub min_interval_sec: f64,
    pub max_step_sec: f64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            min_interval_sec: FRAME_MIN_INTERVAL_SEC,
            max_step_sec: FRAME_MAX_STEP_SEC,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SpinConfig {
    /// Seconds per full turn; zero disables spinning.
    pub period_sec: f32,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            period_sec: SPIN_PERIOD_SEC,
        }
    }
}

/// Placement of the source mesh in world space (Euler XYZ rotation, uniform scale, translation).
#[derive(Clone, Debug)]
pub struct MeshTransform {
    pub rotation: Vec3,
    pub scale: f32,
    pub translation: Vec3,
}

impl MeshTransform {
    pub fn identity() -> Self {
        Self {
            rotation: Vec3::ZERO,
            scale: 1.0,
            translation: Vec3::ZERO,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rot, self.translation)
    }
}

impl Default for MeshTransform {
    fn default() -> Self {
        Self {
            rotation: Vec3::new(MESH_ROTATION_X, 0.0, 0.0),
            scale: MESH_SCALE,
            translation: Vec3::from_array(MESH_TRANSLATION),
        }
    }
}

/// Ordered list of linear RGB colors sparks pick from.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette(pub Vec<[f32; 3]>);

impl Palette {
    pub fn from_hex(colors: &[u32]) -> Self {
        Palette(colors.iter().map(|&c| rgb_from_hex(c)).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Color for `index`, wrapping past the end; white for an empty palette.
    #[inline]
    pub fn color(&self, index: usize) -> [f32; 3] {
        if self.0.is_empty() {
            return [1.0; 3];
        }
        self.0[index % self.0.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::from_hex(&DEFAULT_PALETTE_HEX)
    }
}

/// Convert `0xRRGGBB` to floats in [0, 1].
pub fn rgb_from_hex(hex: u32) -> [f32; 3] {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    [r, g, b]
}

#[derive(Clone, Debug, Default)]
pub struct HeartConfig {
    pub sparks: SparkConfig,
    pub noise: NoiseConfig,
    pub beat: BeatConfig,
    pub depth: DepthBandConfig,
    pub frame: FrameConfig,
    pub spin: SpinConfig,
    pub mesh: MeshTransform,
    pub palette: Palette,
    pub reduced_motion: bool,
}

impl HeartConfig {
    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    pub fn with_spark_count(mut self, count: usize) -> Self {
        self.sparks.count = count;
        self
    }

    /// Reject values that would make the per-frame math meaningless.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("sparks.jitter_max", self.sparks.jitter_max),
            ("sparks.near_base", self.sparks.near_base),
            ("sparks.near_noise_offset", self.sparks.near_noise_offset),
            ("sparks.near_noise_w", self.sparks.near_noise_w),
            ("sparks.far_frequency", self.sparks.far_frequency),
            ("sparks.far_noise_w", self.sparks.far_noise_w),
            ("sparks.far_noise_gain", self.sparks.far_noise_gain),
            ("sparks.far_beat_bias", self.sparks.far_beat_bias),
            ("sparks.far_beat_pull", self.sparks.far_beat_pull),
            ("noise.spatial_scale", self.noise.spatial_scale),
            ("noise.amplitude", self.noise.amplitude),
            ("noise.time_scale", self.noise.time_scale),
            ("beat.peak", self.beat.peak),
            ("depth.max_z", self.depth.max_z),
            ("depth.rate", self.depth.rate),
            ("spin.period_sec", self.spin.period_sec),
            ("mesh.scale", self.mesh.scale),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(HeartError::InvalidConfig(format!("{name} must be finite, got {value}")));
            }
        }
        if self.sparks.jitter_max < 0.0 {
            return Err(HeartError::InvalidConfig("sparks.jitter_max must be >= 0".into()));
        }
        if self.sparks.count > 0 && self.palette.is_empty() {
            return Err(HeartError::InvalidConfig("palette must not be empty".into()));
        }
        if self.beat.peak <= 0.0 {
            return Err(HeartError::InvalidConfig("beat.peak must be > 0".into()));
        }
        if !(self.beat.rise_sec > 0.0 && self.beat.fall_sec > 0.0) {
            return Err(HeartError::InvalidConfig(
                "beat rise and fall durations must be > 0".into(),
            ));
        }
        if !(self.beat.repeat_delay_sec >= 0.0) {
            return Err(HeartError::InvalidConfig("beat.repeat_delay_sec must be >= 0".into()));
        }
        if !(0.0..=1.0).contains(&self.beat.reduced_motion_fraction) {
            return Err(HeartError::InvalidConfig(
                "beat.reduced_motion_fraction must be within [0, 1]".into(),
            ));
        }
        if self.depth.half_width() < 0.0 {
            return Err(HeartError::InvalidConfig("depth band must be >= 0".into()));
        }
        if !(self.frame.min_interval_sec >= 0.0) || !(self.frame.max_step_sec > 0.0) {
            return Err(HeartError::InvalidConfig(
                "frame.min_interval_sec must be >= 0 and frame.max_step_sec > 0".into(),
            ));
        }
        if self.spin.period_sec < 0.0 {
            return Err(HeartError::InvalidConfig("spin.period_sec must be >= 0".into()));
        }
        if self.mesh.scale == 0.0 {
            return Err(HeartError::InvalidConfig("mesh.scale must not be zero".into()));
        }
        Ok(())
    }
}
