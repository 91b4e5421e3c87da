// WGSL sources. `FRAME_WGSL` declares the shared uniform block and is prepended
// to each pass shader.
pub static FRAME_WGSL: &str = include_str!("shaders/frame.wgsl");
pub static HEART_WGSL: &str = include_str!("shaders/heart.wgsl");
pub static SPARKS_WGSL: &str = include_str!("shaders/sparks.wgsl");

pub fn with_frame_block(pass_src: &str) -> String {
    let mut src = String::with_capacity(FRAME_WGSL.len() + pass_src.len() + 1);
    src.push_str(FRAME_WGSL);
    src.push('\n');
    src.push_str(pass_src);
    src
}
