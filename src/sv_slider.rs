// ============================================================================
// SV BOX SLIDER — two-way binding between the 2D slider and the color model
// ============================================================================
//
// Two triggers drive this component:
//   1. A model change (h, s, v) arrives → regenerate the SV texture when the
//      hue moved, and push s/v into the slider position. Pushing the position
//      fires the slider's own value-changed path; the one-shot `listen` flag
//      swallows that echo so it never loops back into the model.
//   2. A user drag produces a new normalized position → write saturation and
//      value back into the model, exactly once each.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::SvError;
use crate::generator::{CpuSvGenerator, SvGridGenerator};
use crate::gpu::{GpuContext, GpuSvGenerator};
use crate::model::{ColorChannel, ColorModel, Hsv};
use crate::surface::{GridSize, SvSurface};
use crate::{log_err, log_info};

/// Sentinel outside [0,1] so the first model notification always regenerates.
const NO_HUE: f32 = -1.0;

pub struct SvBoxSlider {
    surface: SvSurface,
    generator: Box<dyn SvGridGenerator>,
    /// Normalized slider position: x is saturation, y is value.
    slider_x: f32,
    slider_y: f32,
    /// Hue of the last generated texture.
    last_hue: f32,
    /// One-shot echo suppression. `false` means the next value-changed event
    /// is a model-driven echo and must be dropped; consuming it re-arms.
    listen: bool,
    /// Set after each regeneration; the host consumes it to re-upload the
    /// display texture.
    dirty: bool,
}

impl SvBoxSlider {
    /// Build the slider, choosing the generation strategy once: the GPU
    /// compute path when `gpu` is present and capable, the CPU rasterizer
    /// otherwise. A capable-but-broken GPU setup is a hard error (no
    /// silent fallback). The initial texture is generated immediately.
    pub fn new(size: GridSize, gpu: Option<GpuContext>) -> Result<Self, SvError> {
        let generator: Box<dyn SvGridGenerator> = match gpu {
            Some(ctx) if ctx.supports_sv_compute(size) => {
                let g = GpuSvGenerator::new(ctx, size)?;
                log_info!(
                    "SV texture: GPU compute path on '{}' ({}x{})",
                    g.adapter_name(),
                    size.width(),
                    size.height()
                );
                Box::new(g)
            }
            _ => {
                log_info!(
                    "SV texture: CPU fallback path ({}x{})",
                    size.width(),
                    size.height()
                );
                Box::new(CpuSvGenerator)
            }
        };

        let mut slider = Self {
            surface: SvSurface::new(size),
            generator,
            slider_x: 0.0,
            slider_y: 0.0,
            last_hue: NO_HUE,
            listen: true,
            dirty: false,
        };
        slider.regenerate(0.0)?;
        slider.last_hue = NO_HUE; // first model update still regenerates
        Ok(slider)
    }

    /// Subscribe `slider` to the model's change notifications.
    pub fn attach(slider: &Rc<RefCell<SvBoxSlider>>, model: &mut ColorModel) {
        let slider = Rc::clone(slider);
        model.subscribe(move |model, hsv| slider.borrow_mut().hsv_changed(model, hsv));
    }

    /// Trigger 1: the color model changed.
    pub fn hsv_changed(&mut self, model: &mut ColorModel, hsv: Hsv) {
        if hsv.h != self.last_hue {
            self.last_hue = hsv.h;
            if let Err(e) = self.regenerate(hsv.h) {
                log_err!("SV texture regeneration failed: {e}");
            }
        }

        if hsv.s != self.slider_x {
            self.listen = false;
            self.slider_x = hsv.s;
            // the position write fires the slider's value-changed path; the
            // armed flag swallows it
            self.slider_changed(model, self.slider_x, self.slider_y);
        }

        if hsv.v != self.slider_y {
            self.listen = false;
            self.slider_y = hsv.v;
            self.slider_changed(model, self.slider_x, self.slider_y);
        }
    }

    /// Trigger 2: the slider produced a new normalized position. Echoes of
    /// model-driven position writes consume the suppression flag and stop
    /// here; genuine user input is written back into the model.
    pub fn slider_changed(&mut self, model: &mut ColorModel, x: f32, y: f32) {
        if self.consume_suppression() {
            return;
        }
        self.slider_x = x;
        self.slider_y = y;
        model.assign_color(ColorChannel::Saturation, x);
        model.assign_color(ColorChannel::Value, y);
    }

    /// RefCell-safe drag entry point for the host UI. The slider borrow is
    /// released before the model is mutated, so the synchronous change
    /// notification can re-enter [`Self::hsv_changed`].
    pub fn drag(slider: &Rc<RefCell<SvBoxSlider>>, model: &Rc<RefCell<ColorModel>>, x: f32, y: f32) {
        {
            let mut s = slider.borrow_mut();
            if s.consume_suppression() {
                return;
            }
            s.slider_x = x;
            s.slider_y = y;
        }
        let mut m = model.borrow_mut();
        m.assign_color(ColorChannel::Saturation, x);
        m.assign_color(ColorChannel::Value, y);
    }

    fn consume_suppression(&mut self) -> bool {
        if !self.listen {
            self.listen = true;
            return true;
        }
        false
    }

    /// Regenerate the SV texture for `hue` on the selected strategy.
    pub fn regenerate(&mut self, hue: f32) -> Result<(), SvError> {
        self.generator.regenerate(&mut self.surface, hue)?;
        self.dirty = true;
        Ok(())
    }

    pub fn position(&self) -> (f32, f32) {
        (self.slider_x, self.slider_y)
    }

    pub fn surface(&self) -> &SvSurface {
        &self.surface
    }

    pub fn backend_name(&self) -> &'static str {
        self.generator.backend_name()
    }

    /// True once per regeneration; consuming resets it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Free the surface. Also runs on drop; calling it twice is a no-op.
    pub fn release(&mut self) {
        self.surface.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu_slider() -> SvBoxSlider {
        SvBoxSlider::new(GridSize::new(8, 8).unwrap(), None).unwrap()
    }

    #[test]
    fn first_model_update_regenerates() {
        let mut slider = cpu_slider();
        let mut model = ColorModel::default();
        slider.take_dirty(); // drop the construction-time fill
        slider.hsv_changed(&mut model, Hsv { h: 0.0, s: 0.0, v: 1.0 });
        assert!(slider.take_dirty(), "sentinel hue must trigger generation");
    }

    #[test]
    fn regeneration_iff_hue_changed() {
        let mut slider = cpu_slider();
        let mut model = ColorModel::default();
        slider.hsv_changed(&mut model, Hsv { h: 0.1, s: 0.2, v: 0.9 });
        slider.take_dirty();

        // S/V move, hue does not → no regeneration
        slider.hsv_changed(&mut model, Hsv { h: 0.1, s: 0.6, v: 0.3 });
        assert!(!slider.take_dirty());

        // hue moves → regeneration
        slider.hsv_changed(&mut model, Hsv { h: 0.3, s: 0.6, v: 0.3 });
        assert!(slider.take_dirty());
        assert_eq!(slider.position(), (0.6, 0.3));
    }

    #[test]
    fn model_update_moves_slider_without_writing_back() {
        let mut slider = cpu_slider();
        let mut model = ColorModel::new(0.5, 0.0, 0.0, 1.0);
        slider.hsv_changed(&mut model, Hsv { h: 0.5, s: 0.7, v: 0.4 });
        assert_eq!(slider.position(), (0.7, 0.4));
        // the echoes were swallowed: the model was never assigned to
        assert_eq!(model.s(), 0.0);
        assert_eq!(model.v(), 0.0);
        // and both suppressions were consumed, so the flag is re-armed
        slider.slider_changed(&mut model, 0.2, 0.3);
        assert_eq!(model.s(), 0.2);
        assert_eq!(model.v(), 0.3);
    }

    #[test]
    fn user_drag_writes_both_channels_once() {
        let mut slider = cpu_slider();
        let mut model = ColorModel::new(0.0, 0.2, 0.9, 1.0);
        slider.slider_changed(&mut model, 0.7, 0.3);
        assert_eq!(model.s(), 0.7);
        assert_eq!(model.v(), 0.3);
        assert_eq!(slider.position(), (0.7, 0.3));
    }
}
