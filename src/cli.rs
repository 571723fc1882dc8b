// ============================================================================
// svbox CLI — demo binary configuration
// ============================================================================
//
// Usage examples:
//   svbox                          (100×100 grid, GPU compute when available)
//   svbox --grid 256x256
//   svbox --force-cpu --verbose
//   svbox --gpu "low power"

use clap::Parser;

use crate::surface::GridSize;

/// Interactive saturation/value color-map demo.
#[derive(Parser, Debug)]
#[command(
    name = "svbox",
    about = "SV color-map widget demo (GPU compute with CPU fallback)",
    long_about = "Hosts the SV box slider in a small egui window. The SV texture is\n\
                  generated on a GPU compute pass when one is available, and on a\n\
                  CPU rasterizer otherwise; both paths produce identical maps."
)]
pub struct CliArgs {
    /// SV grid size as WIDTHxHEIGHT. Both dimensions must be at least 1.
    #[arg(long, default_value = "100x100", value_name = "WxH", value_parser = parse_grid)]
    pub grid: GridSize,

    /// Skip GPU detection and use the CPU rasterizer.
    #[arg(long)]
    pub force_cpu: bool,

    /// GPU power preference: "high performance" / "discrete" or
    /// "low power" / "integrated".
    #[arg(long, default_value = "high performance", value_name = "PREF")]
    pub gpu: String,

    /// Print the selected backend and regeneration events to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_grid(s: &str) -> Result<GridSize, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("'{s}': expected WIDTHxHEIGHT, e.g. 100x100"))?;
    let w: u32 = w.trim().parse().map_err(|e| format!("width '{w}': {e}"))?;
    let h: u32 = h.trim().parse().map_err(|e| format!("height '{h}': {e}"))?;
    GridSize::new(w, h).map_err(|e| e.to_string())
}
