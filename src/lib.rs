//! svbox — interactive saturation/value color-map widget core.
//!
//! Generates the classic SV color-picker texture for a given hue on either a
//! GPU compute path (wgpu) or a CPU fallback with identical semantics, and
//! keeps a normalized 2D slider position synchronized bidirectionally with a
//! shared HSV color model — including hue-driven regeneration and one-shot
//! echo suppression so model and slider never chase each other.

pub mod app;
pub mod cli;
pub mod color;
pub mod error;
pub mod generator;
pub mod gpu;
pub mod logger;
pub mod model;
pub mod surface;
pub mod sv_slider;

pub use error::SvError;
pub use generator::{CpuSvGenerator, SvGridGenerator};
pub use gpu::{GpuContext, GpuSvGenerator};
pub use model::{ColorChannel, ColorModel, Hsv};
pub use surface::{GridSize, SvSurface};
pub use sv_slider::SvBoxSlider;
