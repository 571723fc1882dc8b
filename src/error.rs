//! Error types for SV texture generation and widget setup.

use thiserror::Error;

/// Failure modes of the SV box slider core.
///
/// Out-of-range color inputs are never errors — hue wraps and the other
/// channels clamp, since color values are inherently cyclic/bounded.
#[derive(Debug, Error)]
pub enum SvError {
    /// Grid dimensions must both be at least 1.
    #[error("invalid grid size {width}x{height}: both dimensions must be at least 1")]
    InvalidGridSize { width: u32, height: u32 },

    /// GPU compute was reported available, but device or pipeline setup
    /// failed. Fatal at setup — once the GPU path is selected no CPU
    /// fallback is attempted.
    #[error("GPU compute setup failed: {0}")]
    GpuUnsupported(String),

    /// Mapping the staging buffer for readback failed.
    #[error("GPU readback failed: {0}")]
    Readback(String),
}
