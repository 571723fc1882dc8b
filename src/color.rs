// ============================================================================
// COLOR CONVERSIONS — HSV ↔ RGB, shared by the CPU rasterizer and the tests
// ============================================================================
//
// Hue is normalized to [0,1) everywhere inside the crate (1.0 wraps to red).
// Callers working in degrees convert at the boundary via `hue_from_degrees`.
// The WGSL compute shader in gpu/shaders.rs mirrors `hsv_to_rgb_f32` exactly;
// keep the two in sync when touching the sector math.

/// Wrap a normalized hue into [0,1). Handles negatives and h == 1.0.
#[inline]
pub fn wrap_hue(h: f32) -> f32 {
    let w = h - h.floor();
    if w.is_nan() { 0.0 } else { w }
}

/// Convert a hue in degrees (any real value, cyclic) to the crate's
/// normalized [0,1) domain.
#[inline]
pub fn hue_from_degrees(deg: f32) -> f32 {
    wrap_hue(deg / 360.0)
}

/// Standard HSV sector conversion, float output in [0,1].
///
/// `h` is wrapped, `s`/`v`/`a` are clamped. s = 0 yields R = G = B = v for
/// every hue; v = 0 yields black.
pub fn hsv_to_rgb_f32(h: f32, s: f32, v: f32, a: f32) -> [f32; 4] {
    let h6 = wrap_hue(h) * 6.0;
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);
    let c = v * s;
    let x = c * (1.0 - ((h6 % 2.0) - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h6 as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m, a.clamp(0.0, 1.0)]
}

/// HSV to 8-bit RGBA, rounding to nearest — matches what an rgba8unorm
/// storage write produces on the GPU path.
pub fn hsv_to_rgba8(h: f32, s: f32, v: f32, a: f32) -> [u8; 4] {
    let [r, g, b, a] = hsv_to_rgb_f32(h, s, v, a);
    [quantize8(r), quantize8(g), quantize8(b), quantize8(a)]
}

#[inline]
pub fn quantize8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// RGB (0..1 floats) to normalized HSV, the inverse of [`hsv_to_rgb_f32`].
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> [f32; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;

    let h = if d == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / d % 6.0) / 6.0
    } else if max == g {
        (((b - r) / d) + 2.0) / 6.0
    } else {
        (((r - g) / d) + 4.0) / 6.0
    };
    let h = if h < 0.0 { h + 1.0 } else { h };
    let s = if max == 0.0 { 0.0 } else { d / max };
    [h, s, max]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn primary_hues() {
        assert_eq!(hsv_to_rgba8(0.0, 1.0, 1.0, 1.0), [255, 0, 0, 255]);
        assert_eq!(hsv_to_rgba8(1.0 / 3.0, 1.0, 1.0, 1.0), [0, 255, 0, 255]);
        assert_eq!(hsv_to_rgba8(2.0 / 3.0, 1.0, 1.0, 1.0), [0, 0, 255, 255]);
    }

    #[test]
    fn hue_boundary_wraps_to_red() {
        assert_eq!(hsv_to_rgba8(1.0, 1.0, 1.0, 1.0), [255, 0, 0, 255]);
        assert_eq!(hsv_to_rgba8(-1.0, 1.0, 1.0, 1.0), [255, 0, 0, 255]);
        assert_relative_eq!(hue_from_degrees(360.0), 0.0);
        assert_relative_eq!(hue_from_degrees(180.0), 0.5);
        assert_relative_eq!(hue_from_degrees(-90.0), 0.75);
    }

    #[test]
    fn zero_saturation_is_grayscale() {
        for hue in [0.0, 0.13, 0.5, 0.72, 0.999] {
            let [r, g, b, _] = hsv_to_rgb_f32(hue, 0.0, 0.6, 1.0);
            assert_relative_eq!(r, 0.6, epsilon = 1e-6);
            assert_relative_eq!(g, 0.6, epsilon = 1e-6);
            assert_relative_eq!(b, 0.6, epsilon = 1e-6);
        }
    }

    #[test]
    fn zero_value_is_black() {
        for hue in [0.0, 0.25, 0.8] {
            assert_eq!(hsv_to_rgba8(hue, 1.0, 0.0, 1.0), [0, 0, 0, 255]);
        }
    }

    #[test]
    fn mid_red_scenario() {
        // hue 0, S = V = 0.5 → mid-intensity red-toned gray-red
        assert_eq!(hsv_to_rgba8(0.0, 0.5, 0.5, 1.0), [128, 64, 64, 255]);
    }

    #[test]
    fn out_of_range_inputs_clamp() {
        assert_eq!(hsv_to_rgba8(0.0, 2.0, 2.0, 3.0), [255, 0, 0, 255]);
        assert_eq!(hsv_to_rgba8(0.0, -1.0, -1.0, 1.0), [0, 0, 0, 255]);
    }

    #[test]
    fn hsv_rgb_roundtrip() {
        for &(h, s, v) in &[(0.1, 0.7, 0.9), (0.45, 0.2, 0.5), (0.83, 1.0, 0.3)] {
            let [r, g, b, _] = hsv_to_rgb_f32(h, s, v, 1.0);
            let [h2, s2, v2] = rgb_to_hsv(r, g, b);
            assert_relative_eq!(h, h2, epsilon = 1e-5);
            assert_relative_eq!(s, s2, epsilon = 1e-5);
            assert_relative_eq!(v, v2, epsilon = 1e-5);
        }
    }
}
