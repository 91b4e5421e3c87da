// Default tuning for the heart scene. `HeartConfig::default()` is built from these.

// Sparks
pub const SPARK_COUNT: usize = 10_000;
pub const SPARK_JITTER_MAX: f32 = 0.03;
pub const SPARK_NEAR_BASE: f32 = 1.01;
pub const SPARK_NEAR_NOISE_OFFSET: f32 = 1.5;
pub const SPARK_NEAR_NOISE_W: f32 = 0.1; // fixed 4th noise coordinate for the near candidate
pub const SPARK_FAR_FREQUENCY: f32 = 500.0;
pub const SPARK_FAR_NOISE_W: f32 = 1.0;
pub const SPARK_FAR_NOISE_GAIN: f32 = 0.5;
pub const SPARK_FAR_BEAT_BIAS: f32 = 0.3;
pub const SPARK_FAR_BEAT_PULL: f32 = 1.2;

// Displacement noise
pub const NOISE_SPATIAL_SCALE: f32 = 1.5;
pub const NOISE_AMPLITUDE: f32 = 0.1;
pub const NOISE_TIME_SCALE: f32 = 0.5; // per second of animation time
pub const NOISE_SEED: u64 = 0x4845_4152_54; // "HEART"

// Beat timeline (seconds)
pub const BEAT_PEAK: f32 = 0.5;
pub const BEAT_RISE_SEC: f32 = 0.6;
pub const BEAT_FALL_SEC: f32 = 0.6;
pub const BEAT_REPEAT_DELAY_SEC: f32 = 0.3;
pub const BEAT_REDUCED_MOTION_FRACTION: f32 = 0.3;

// Depth band: candidates are drawn only inside |z| < MAX_Z * RATE (+ jitter)
pub const DEPTH_MAX_Z: f32 = 0.23;
pub const DEPTH_RATE: f32 = 0.5;

// Frame pacing
pub const FRAME_MIN_INTERVAL_SEC: f64 = 0.0;
pub const FRAME_MAX_STEP_SEC: f64 = 0.1;

// Group spin about Y
pub const SPIN_PERIOD_SEC: f32 = 12.0;

// Source mesh placement
pub const MESH_ROTATION_X: f32 = -std::f32::consts::FRAC_PI_2;
pub const MESH_SCALE: f32 = 0.04;
pub const MESH_TRANSLATION: [f32; 3] = [0.0, -0.4, 0.0];

// Spark palette
pub const DEFAULT_PALETTE_HEX: [u32; 4] = [
    0xffd4ee, // blush
    0xff77fc, // orchid
    0xff77ae, // rose
    0xff1775, // crimson pink
];
