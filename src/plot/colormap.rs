// plot/colormap.rs
// Sequential "Blues" ramp (ColorBrewer, 9 classes), linearly interpolated.

use plotters::style::RGBColor;

const BLUES: [(u8, u8, u8); 9] = [
    (247, 251, 255),
    (222, 235, 247),
    (198, 219, 239),
    (158, 202, 225),
    (107, 174, 214),
    (66, 146, 198),
    (33, 113, 181),
    (8, 81, 156),
    (8, 48, 107),
];

/// Colour at `t` in [0, 1]; out-of-range values clamp, NaN maps to the light end.
pub fn blues(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let pos = t * (BLUES.len() - 1) as f64;
    let lo = (pos.floor() as usize).min(BLUES.len() - 2);
    let frac = pos - lo as f64;
    let (a, b) = (BLUES[lo], BLUES[lo + 1]);
    RGBColor(lerp(a.0, b.0, frac), lerp(a.1, b.1, frac), lerp(a.2, b.2, frac))
}

#[inline]
fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}
