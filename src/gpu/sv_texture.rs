// ============================================================================
// GPU SV GENERATOR — compute dispatch over the SV grid + staging readback
// ============================================================================

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::color::wrap_hue;
use crate::error::SvError;
use crate::generator::SvGridGenerator;
use crate::surface::{GridSize, SvSurface};

use super::context::GpuContext;
use super::WORKGROUP_SIZE;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct SvParams {
    width: u32,
    height: u32,
    hue: f32,
    _pad: u32,
}

/// GPU strategy: a single compute dispatch writes the whole grid into the
/// surface's persistent storage texture, which is then copied through the
/// surface's staging buffer into the presentable pixel buffer.
///
/// Construction is fatal when the pipeline cannot be built even though the
/// capability query said compute was available — no CPU fallback happens
/// past that point.
pub struct GpuSvGenerator {
    ctx: GpuContext,
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    /// Uniform buffer reused across regenerations.
    params_buf: wgpu::Buffer,
    size: GridSize,
}

impl GpuSvGenerator {
    pub fn new(ctx: GpuContext, size: GridSize) -> Result<Self, SvError> {
        if !ctx.supports_sv_compute(size) {
            return Err(SvError::GpuUnsupported(format!(
                "adapter '{}' cannot run a {}x{} workgroup over a {}x{} grid",
                ctx.adapter_name,
                WORKGROUP_SIZE,
                WORKGROUP_SIZE,
                size.width(),
                size.height()
            )));
        }

        let device = &ctx.device;
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sv_texture_shader"),
            source: wgpu::ShaderSource::Wgsl(super::shaders::SV_TEXTURE_SHADER.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sv_texture_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: wgpu::TextureFormat::Rgba8Unorm,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sv_texture_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("sv_texture_pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: "cs_sv_texture",
            compilation_options: Default::default(),
        });

        let params = SvParams {
            width: size.width(),
            height: size.height(),
            hue: 0.0,
            _pad: 0,
        };
        let params_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sv_texture_params"),
            contents: bytemuck::bytes_of(&params),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Ok(Self {
            ctx,
            pipeline,
            bind_group_layout,
            params_buf,
            size,
        })
    }

    pub fn adapter_name(&self) -> &str {
        &self.ctx.adapter_name
    }
}

impl SvGridGenerator for GpuSvGenerator {
    fn regenerate(&mut self, surface: &mut SvSurface, hue: f32) -> Result<(), SvError> {
        debug_assert_eq!(surface.size(), self.size);
        let (w, h) = (self.size.width(), self.size.height());
        let device = &self.ctx.device;
        let queue = &self.ctx.queue;

        surface.acquire_gpu(&self.ctx);

        let params = SvParams {
            width: w,
            height: h,
            hue: wrap_hue(hue),
            _pad: 0,
        };
        queue.write_buffer(&self.params_buf, 0, bytemuck::bytes_of(&params));

        let (backing, pixels) = surface
            .gpu_and_pixels_mut()
            .ok_or_else(|| SvError::GpuUnsupported("surface has no GPU backing".into()))?;

        let view = backing
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sv_texture_bg"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: self.params_buf.as_entire_binding(),
                },
            ],
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("sv_texture_encoder"),
        });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("sv_texture_pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(w.div_ceil(WORKGROUP_SIZE), h.div_ceil(WORKGROUP_SIZE), 1);
        }

        // Copy the storage texture into the staging buffer for presentation.
        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &backing.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &backing.staging,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(backing.padded_bytes_per_row),
                    rows_per_image: Some(h),
                },
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );
        self.ctx.submit_one(encoder);

        // Map and read back into the surface's pixel buffer, stripping the
        // 256-byte row padding.
        let slice = backing.staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        device.poll(wgpu::Maintain::Wait);
        match rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(SvError::Readback(format!("map error: {e:?}"))),
            Err(e) => return Err(SvError::Readback(format!("channel error: {e:?}"))),
        }

        let mapped = slice.get_mapped_range();
        let row = w as usize * 4;
        let padded = backing.padded_bytes_per_row as usize;
        pixels.clear();
        pixels.resize(row * h as usize, 0);
        for y in 0..h as usize {
            pixels[y * row..(y + 1) * row]
                .copy_from_slice(&mapped[y * padded..y * padded + row]);
        }
        drop(mapped);
        backing.staging.unmap();

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "gpu"
    }
}
