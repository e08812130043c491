//! Hex color strings to normalized channel values.
//!
//! Colors travel through the crate in their canonical `#rrggbb` form and are
//! only converted to floats at draw time. Conversion assumes a well-formed
//! input; use [`is_hex_color`] at the boundary where strings come in.

/// Fill used for the selected shape instead of its stored color.
pub const HIGHLIGHT_COLOR: &str = "#ffff00";

pub const DEFAULT_BACKGROUND: &str = "#ffffff";
pub const DEFAULT_DRAW_COLOR: &str = "#ff0000";

/// Converts `#rrggbb` into `[r, g, b]`, each in `0.0..=1.0`.
///
/// Malformed input yields an unspecified color rather than an error.
pub fn hex_to_rgb(hex: &str) -> [f32; 3] {
    let digits = hex.trim_start_matches('#');
    let value = u32::from_str_radix(digits, 16).unwrap_or_else(|_| {
        log::debug!("Malformed color {:?}, drawing black", hex);
        0
    });

    [
        ((value >> 16) & 255) as f32 / 255.0,
        ((value >> 8) & 255) as f32 / 255.0,
        (value & 255) as f32 / 255.0,
    ]
}

/// Same as [`hex_to_rgb`] with a fixed, fully opaque alpha.
pub fn hex_to_rgba(hex: &str) -> [f32; 4] {
    let [r, g, b] = hex_to_rgb(hex);
    [r, g, b, 1.0]
}

pub fn is_hex_color(s: &str) -> bool {
    s.strip_prefix('#')
        .is_some_and(|digits| digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()))
}

pub fn to_wgpu_color(hex: &str) -> wgpu::Color {
    let [r, g, b, a] = hex_to_rgba(hex);
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: a as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_colors() {
        assert_eq!(hex_to_rgb("#ff0000"), [1.0, 0.0, 0.0]);
        assert_eq!(hex_to_rgb("#00ff00"), [0.0, 1.0, 0.0]);
        assert_eq!(hex_to_rgb("#0000ff"), [0.0, 0.0, 1.0]);
        assert_eq!(hex_to_rgb("#000000"), [0.0, 0.0, 0.0]);
        assert_eq!(hex_to_rgb("#ffffff"), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_mid_channel() {
        let [r, g, b] = hex_to_rgb("#336699");
        assert!((r - 0x33 as f32 / 255.0).abs() < 1e-6);
        assert!((g - 0x66 as f32 / 255.0).abs() < 1e-6);
        assert!((b - 0x99 as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_alpha_is_always_opaque() {
        assert_eq!(hex_to_rgba("#ffff00"), [1.0, 1.0, 0.0, 1.0]);
        assert_eq!(hex_to_rgba("#000000")[3], 1.0);
        assert_eq!(hex_to_rgba("not a color")[3], 1.0);
    }

    #[test]
    fn test_hex_validation() {
        assert!(is_hex_color("#a0B1c2"));
        assert!(!is_hex_color("a0b1c2"));
        assert!(!is_hex_color("#fff"));
        assert!(!is_hex_color("#gg0000"));
        assert!(!is_hex_color("#ff00000"));
    }
}
