// Front-end tuning: DOM ids, asset location, camera, colors and audio levels.
// Simulation tuning lives in `heart_core::constants`.

// DOM
pub const CANVAS_ID: &str = "app-canvas";
pub const QUESTION_OVERLAY_ID: &str = "question-overlay";
pub const YES_BUTTON_ID: &str = "answer-yes";
pub const NO_BUTTON_ID: &str = "answer-no";
pub const LOADING_ID: &str = "loading";

// Asset
pub const HEART_MESH_URL: &str = "assets/heart.obj";
pub const LOADING_TEXT: &str = "Loading…";
pub const LOAD_FAILED_TEXT: &str = "The heart could not be loaded. Please reload the page.";

// Media queries
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Camera
pub const CAMERA_Z: f32 = 1.0;
pub const CAMERA_FOVY_DEG: f32 = 75.0;

// Colors
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.0, 0.0];
pub const HEART_TINT: [f32; 4] = [1.0, 0.33, 0.47, 0.35];

// Heartbeat thump (WebAudio)
pub const MASTER_GAIN: f32 = 0.6;
pub const THUMP_START_HZ: f32 = 62.0;
pub const THUMP_END_HZ: f32 = 38.0;
pub const THUMP_ATTACK_SEC: f64 = 0.012;
pub const THUMP_DECAY_SEC: f64 = 0.32;
pub const THUMP_LOWPASS_HZ: f32 = 240.0;
pub const THUMP_VELOCITY: f32 = 0.8;

// "No" button dodge: keep the button this far (fraction of viewport) from the edges
pub const DODGE_MARGIN: f64 = 0.1;
