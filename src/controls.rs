// Pure input mappings, kept free of web-sys so they can be tested on the host.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    TogglePause,
    ToggleMute,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        " " | "Spacebar" => Some(KeyAction::TogglePause),
        "m" | "M" => Some(KeyAction::ToggleMute),
        _ => None,
    }
}

/// Map two uniform randoms in [0, 1) to a position (percent of the viewport)
/// that keeps `margin` clear of every edge.
#[inline]
pub fn dodge_position(rand_x: f64, rand_y: f64, margin: f64) -> (f64, f64) {
    let margin = margin.clamp(0.0, 0.5);
    let span = 1.0 - 2.0 * margin;
    let x = (margin + rand_x.clamp(0.0, 1.0) * span) * 100.0;
    let y = (margin + rand_y.clamp(0.0, 1.0) * span) * 100.0;
    (x, y)
}
