// ============================================================================
// GPU CONTEXT — wgpu Device, Queue, and adapter initialization
// ============================================================================

use std::sync::Arc;

use crate::surface::GridSize;

use super::WORKGROUP_SIZE;

/// Holds the wgpu resources for the compute path.
/// Created once at startup; if creation fails the slider runs on the CPU
/// rasterizer instead.
pub struct GpuContext {
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
    pub adapter_name: String,
    /// Maximum 2D texture dimension supported by this device.
    pub max_texture_dim: u32,
    /// Maximum invocations per compute workgroup (32×32 needs 1024).
    pub max_workgroup_invocations: u32,
}

impl GpuContext {
    /// Attempt to create a GPU context. Tries hardware first, then falls
    /// back to a software rasterizer (`force_fallback_adapter`) so the
    /// compute path still works without a real GPU.
    ///
    /// `pollster::block_on` because eframe doesn't expose its device to
    /// application code and the SV compute pass needs its own.
    pub fn new(preferred_gpu: &str) -> Option<Self> {
        if let Some(ctx) = pollster::block_on(Self::new_async(preferred_gpu, false)) {
            return Some(ctx);
        }
        eprintln!("[GPU] Hardware adapter unavailable — trying software fallback");
        pollster::block_on(Self::new_async(preferred_gpu, true))
    }

    async fn new_async(preferred_gpu: &str, force_fallback: bool) -> Option<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let power = match preferred_gpu.to_lowercase().as_str() {
            "low power" | "integrated" => wgpu::PowerPreference::LowPower,
            "high performance" | "discrete" => wgpu::PowerPreference::HighPerformance,
            _ => wgpu::PowerPreference::HighPerformance,
        };

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: power,
                compatible_surface: None, // headless — compute only
                force_fallback_adapter: force_fallback,
            })
            .await?;

        let adapter_name = adapter.get_info().name.clone();
        let limits = adapter.limits();

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("svbox GPU"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits {
                        max_texture_dimension_2d: limits.max_texture_dimension_2d,
                        max_compute_workgroup_size_x: limits.max_compute_workgroup_size_x,
                        max_compute_workgroup_size_y: limits.max_compute_workgroup_size_y,
                        max_compute_invocations_per_workgroup: limits
                            .max_compute_invocations_per_workgroup,
                        max_compute_workgroups_per_dimension: limits
                            .max_compute_workgroups_per_dimension,
                        ..wgpu::Limits::downlevel_defaults()
                    },
                },
                None,
            )
            .await
            .ok()?;

        Some(Self {
            device: Arc::new(device),
            queue: Arc::new(queue),
            adapter_name,
            max_texture_dim: limits.max_texture_dimension_2d,
            max_workgroup_invocations: limits.max_compute_invocations_per_workgroup,
        })
    }

    /// Capability query, checked once at slider setup: can this device run
    /// the 32×32 SV compute pass over a grid of the given size?
    pub fn supports_sv_compute(&self, size: GridSize) -> bool {
        self.max_workgroup_invocations >= WORKGROUP_SIZE * WORKGROUP_SIZE
            && size.width() <= self.max_texture_dim
            && size.height() <= self.max_texture_dim
    }

    /// Submit a single encoder's commands.
    pub fn submit_one(&self, encoder: wgpu::CommandEncoder) {
        self.queue.submit(std::iter::once(encoder.finish()));
    }
}
