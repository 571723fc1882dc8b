// ============================================================================
// GPU MODULE — compute-accelerated SV texture generation
// ============================================================================
//
// Architecture:
//   context.rs    — wgpu Device, Queue, adapter init + capability query
//   shaders.rs    — WGSL compute shader source (inline string)
//   sv_texture.rs — GpuSvGenerator: dispatch + staging readback
// ============================================================================

pub mod context;
pub mod shaders;
pub mod sv_texture;

pub use context::GpuContext;
pub use sv_texture::GpuSvGenerator;

/// Compute workgroup edge. Dispatches cover the grid with
/// `ceil(W/32) × ceil(H/32)` groups; the shader bound-checks each invocation
/// against the real grid size, so non-multiple-of-32 grids still produce
/// exactly W×H writes.
pub const WORKGROUP_SIZE: u32 = 32;
