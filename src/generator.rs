// ============================================================================
// SV GRID GENERATION — strategy trait + CPU rasterizer
// ============================================================================
//
// The GPU strategy lives in gpu/sv_texture.rs. Both strategies fill the same
// surface with the same semantics: sample (s, v) is
// `hsv_to_rgba8(hue, s / W, v / H, 1)` for integer (s, v) in [0,W)×[0,H).

use crate::color::hsv_to_rgba8;
use crate::error::SvError;
use crate::surface::SvSurface;

/// One of the two interchangeable generation strategies, selected once at
/// slider setup by the GPU capability check and never switched mid-session.
pub trait SvGridGenerator {
    /// Fill `surface` with the SV map for `hue` (normalized [0,1]).
    fn regenerate(&mut self, surface: &mut SvSurface, hue: f32) -> Result<(), SvError>;

    fn backend_name(&self) -> &'static str;
}

/// Sequential fallback: rasterizes one saturation column at a time into a
/// freshly allocated buffer. The previous frame's buffer is dropped when the
/// fresh one is installed, before any column is written.
pub struct CpuSvGenerator;

impl SvGridGenerator for CpuSvGenerator {
    fn regenerate(&mut self, surface: &mut SvSurface, hue: f32) -> Result<(), SvError> {
        let size = surface.size();
        let (w, h) = (size.width(), size.height());

        surface.install_pixels(vec![0; size.pixel_bytes()]);

        let mut column = vec![0u8; h as usize * 4];
        for s in 0..w {
            for v in 0..h {
                let rgba = hsv_to_rgba8(hue, s as f32 / w as f32, v as f32 / h as f32, 1.0);
                column[v as usize * 4..v as usize * 4 + 4].copy_from_slice(&rgba);
            }
            surface.write_column(s, &column);
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "cpu"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::GridSize;

    fn sample(surface: &SvSurface, s: u32, v: u32) -> [u8; 4] {
        let w = surface.size().width() as usize;
        let px = surface.pixels().unwrap();
        let i = (v as usize * w + s as usize) * 4;
        [px[i], px[i + 1], px[i + 2], px[i + 3]]
    }

    #[test]
    fn every_sample_matches_the_converter() {
        let size = GridSize::new(10, 7).unwrap();
        let mut surface = SvSurface::new(size);
        let hue = 0.3;
        CpuSvGenerator.regenerate(&mut surface, hue).unwrap();

        for s in 0..10 {
            for v in 0..7 {
                let expected = hsv_to_rgba8(hue, s as f32 / 10.0, v as f32 / 7.0, 1.0);
                assert_eq!(sample(&surface, s, v), expected, "at ({s}, {v})");
            }
        }
    }

    #[test]
    fn default_grid_center_is_mid_red() {
        let mut surface = SvSurface::new(GridSize::DEFAULT);
        CpuSvGenerator.regenerate(&mut surface, 0.0).unwrap();
        assert_eq!(sample(&surface, 50, 50), [128, 64, 64, 255]);
    }

    #[test]
    fn regeneration_replaces_the_whole_grid() {
        let mut surface = SvSurface::new(GridSize::new(8, 8).unwrap());
        CpuSvGenerator.regenerate(&mut surface, 0.0).unwrap();
        let red = sample(&surface, 7, 7);
        CpuSvGenerator.regenerate(&mut surface, 2.0 / 3.0).unwrap();
        let blue = sample(&surface, 7, 7);
        assert_ne!(red, blue);
        assert!(blue[2] > blue[0]); // blue-dominant after the hue change
    }

    #[test]
    fn one_by_one_grid() {
        let mut surface = SvSurface::new(GridSize::new(1, 1).unwrap());
        CpuSvGenerator.regenerate(&mut surface, 0.5).unwrap();
        // s = v = 0 → black regardless of hue
        assert_eq!(sample(&surface, 0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn zero_value_row_is_black_and_zero_saturation_column_is_gray() {
        let mut surface = SvSurface::new(GridSize::new(16, 16).unwrap());
        CpuSvGenerator.regenerate(&mut surface, 0.77).unwrap();
        for s in 0..16 {
            assert_eq!(&sample(&surface, s, 0)[..3], &[0, 0, 0]);
        }
        for v in 0..16 {
            let [r, g, b, _] = sample(&surface, 0, v);
            assert_eq!(r, g);
            assert_eq!(g, b);
        }
    }
}
