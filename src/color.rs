use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| hsl_to_color32(((i as f32 / n as f32) * 360.0 + 210.0) % 360.0, 0.65, 0.55))
        .collect()
}

// ---------------------------------------------------------------------------
// Diverging scale: red → yellow → green
// ---------------------------------------------------------------------------

/// Map `value` within `[min, max]` onto a red-yellow-green scale.
/// A degenerate range maps to the midpoint (yellow).
pub fn red_yellow_green(value: f64, min: f64, max: f64) -> Color32 {
    let t = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.5
    };
    hsl_to_color32(t as f32 * 120.0, 0.75, 0.5)
}
