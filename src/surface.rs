// ============================================================================
// SV SURFACE — destination pixel buffer / GPU storage texture lifecycle
// ============================================================================

use crate::error::SvError;
use crate::gpu::context::GpuContext;

/// WGPU requires `bytes_per_row` to be a multiple of 256 for texture→buffer
/// copies; readback rows are padded up to this.
pub const COPY_BYTES_PER_ROW_ALIGNMENT: u32 = 256;

/// Pad a row of `width` RGBA pixels up to the copy alignment.
pub fn aligned_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    unpadded.div_ceil(COPY_BYTES_PER_ROW_ALIGNMENT) * COPY_BYTES_PER_ROW_ALIGNMENT
}

/// Validated SV grid dimensions. Zero dimensions are rejected at
/// construction; everything downstream can assume `width, height >= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// The classic 100×100 SV map.
    pub const DEFAULT: GridSize = GridSize {
        width: 100,
        height: 100,
    };

    pub fn new(width: u32, height: u32) -> Result<Self, SvError> {
        if width == 0 || height == 0 {
            return Err(SvError::InvalidGridSize { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size of the RGBA8 pixel buffer for this grid.
    pub fn pixel_bytes(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// GPU-resident half of the surface: a persistent rgba8unorm storage texture
/// that the compute pass rewrites in place, plus the staging buffer used to
/// read it back for presentation.
pub struct GpuBacking {
    pub texture: wgpu::Texture,
    pub staging: wgpu::Buffer,
    pub padded_bytes_per_row: u32,
}

/// Owns the destination the SV map is generated into.
///
/// Both paths end in `pixels` (the presentable RGBA8 image, row-major with
/// saturation along x and value along y). The GPU path additionally keeps a
/// [`GpuBacking`] alive across regenerations; the CPU path replaces `pixels`
/// wholesale each regeneration.
pub struct SvSurface {
    size: GridSize,
    pixels: Option<Vec<u8>>,
    gpu: Option<GpuBacking>,
}

impl SvSurface {
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            pixels: None,
            gpu: None,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Idempotent: allocates the CPU pixel buffer only if absent.
    pub fn acquire_cpu(&mut self) {
        let bytes = self.size.pixel_bytes();
        self.pixels.get_or_insert_with(|| vec![0; bytes]);
    }

    /// Idempotent: creates the storage texture and staging buffer only if
    /// absent. The texture persists across regenerations.
    pub fn acquire_gpu(&mut self, ctx: &GpuContext) {
        let (w, h) = (self.size.width, self.size.height);
        self.gpu.get_or_insert_with(|| {
            let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("sv_surface"),
                size: wgpu::Extent3d {
                    width: w,
                    height: h,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::COPY_SRC,
                view_formats: &[],
            });
            let padded = aligned_bytes_per_row(w);
            let staging = ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("sv_surface_staging"),
                size: (padded * h) as u64,
                usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            GpuBacking {
                texture,
                staging,
                padded_bytes_per_row: padded,
            }
        });
        self.acquire_cpu(); // readback destination
    }

    /// Replace the pixel buffer with a freshly generated one. The previous
    /// buffer is dropped here, not leaked into the next frame.
    pub fn install_pixels(&mut self, pixels: Vec<u8>) {
        debug_assert_eq!(pixels.len(), self.size.pixel_bytes());
        self.pixels = Some(pixels);
    }

    /// Write one saturation column (`height * 4` RGBA bytes, value running
    /// along the column) into the live pixel buffer.
    pub fn write_column(&mut self, x: u32, rgba: &[u8]) {
        let (w, h) = (self.size.width as usize, self.size.height as usize);
        debug_assert!(x < self.size.width);
        debug_assert_eq!(rgba.len(), h * 4);
        let pixels = self.pixels.get_or_insert_with(|| vec![0; w * h * 4]);
        for v in 0..h {
            let dst = (v * w + x as usize) * 4;
            pixels[dst..dst + 4].copy_from_slice(&rgba[v * 4..v * 4 + 4]);
        }
    }

    pub fn pixels(&self) -> Option<&[u8]> {
        self.pixels.as_deref()
    }

    /// Split borrow for the GPU regeneration path: the backing to dispatch
    /// into and the pixel buffer to read back into.
    pub fn gpu_and_pixels_mut(&mut self) -> Option<(&GpuBacking, &mut Vec<u8>)> {
        match (&self.gpu, &mut self.pixels) {
            (Some(gpu), Some(pixels)) => Some((gpu, pixels)),
            _ => None,
        }
    }

    /// Expose the current map to the display host.
    pub fn present(&self) -> Option<egui::ColorImage> {
        let pixels = self.pixels.as_deref()?;
        let size = [self.size.width as usize, self.size.height as usize];
        Some(egui::ColorImage::from_rgba_unmultiplied(size, pixels))
    }

    /// Free the underlying storage. Safe to call any number of times; the
    /// GPU texture is destroyed explicitly, the CPU buffer is dropped.
    pub fn release(&mut self) {
        if let Some(gpu) = self.gpu.take() {
            gpu.texture.destroy();
        }
        self.pixels = None;
    }
}

impl Drop for SvSurface {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_size_rejects_zero() {
        assert!(GridSize::new(0, 100).is_err());
        assert!(GridSize::new(100, 0).is_err());
        assert!(GridSize::new(1, 1).is_ok());
        assert_eq!(GridSize::DEFAULT.pixel_bytes(), 100 * 100 * 4);
    }

    #[test]
    fn acquire_cpu_is_idempotent() {
        let mut surf = SvSurface::new(GridSize::new(4, 3).unwrap());
        surf.acquire_cpu();
        let ptr = surf.pixels().unwrap().as_ptr();
        surf.acquire_cpu();
        assert_eq!(surf.pixels().unwrap().as_ptr(), ptr);
    }

    #[test]
    fn install_replaces_previous_buffer() {
        let mut surf = SvSurface::new(GridSize::new(2, 2).unwrap());
        surf.install_pixels(vec![1; 16]);
        surf.install_pixels(vec![2; 16]);
        assert!(surf.pixels().unwrap().iter().all(|&b| b == 2));
    }

    #[test]
    fn write_column_targets_the_right_pixels() {
        let mut surf = SvSurface::new(GridSize::new(3, 2).unwrap());
        surf.acquire_cpu();
        surf.write_column(1, &[9, 9, 9, 9, 7, 7, 7, 7]);
        let px = surf.pixels().unwrap();
        assert_eq!(&px[4..8], &[9, 9, 9, 9]); // row 0, col 1
        assert_eq!(&px[16..20], &[7, 7, 7, 7]); // row 1, col 1
        assert_eq!(&px[0..4], &[0, 0, 0, 0]);
    }

    #[test]
    fn double_release_is_a_noop() {
        let mut surf = SvSurface::new(GridSize::DEFAULT);
        surf.acquire_cpu();
        surf.release();
        surf.release();
        assert!(surf.pixels().is_none());
    }

    #[test]
    fn row_alignment() {
        assert_eq!(aligned_bytes_per_row(100), 512); // 400 → 512
        assert_eq!(aligned_bytes_per_row(64), 256);
        assert_eq!(aligned_bytes_per_row(1), 256);
    }
}
