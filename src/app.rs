// ============================================================================
// DEMO APP — hosts the SV box slider in a small egui window
// ============================================================================
//
// UI glue only: presents the surface through an egui texture, routes pointer
// drags into the slider core, and drives the model's hue from a strip. All
// synchronization semantics live in sv_slider.rs.

use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui;
use egui::{Color32, Pos2, Stroke, Vec2};

use crate::cli::CliArgs;
use crate::color::hsv_to_rgba8;
use crate::error::SvError;
use crate::gpu::GpuContext;
use crate::log_info;
use crate::model::{ColorChannel, ColorModel};
use crate::sv_slider::SvBoxSlider;

pub struct SvBoxApp {
    model: Rc<RefCell<ColorModel>>,
    slider: Rc<RefCell<SvBoxSlider>>,
    texture: Option<egui::TextureHandle>,
    verbose: bool,
}

impl SvBoxApp {
    pub fn new(args: &CliArgs) -> Result<Self, SvError> {
        let gpu = if args.force_cpu {
            None
        } else {
            GpuContext::new(&args.gpu)
        };

        let slider = Rc::new(RefCell::new(SvBoxSlider::new(args.grid, gpu)?));
        let model = Rc::new(RefCell::new(ColorModel::new(0.0, 0.8, 0.9, 1.0)));
        SvBoxSlider::attach(&slider, &mut model.borrow_mut());

        // Prime the slider from the model's initial state. The position
        // echoes are suppressed, so this never writes back into the model.
        {
            let mut m = model.borrow_mut();
            let hsv = m.hsv();
            slider.borrow_mut().hsv_changed(&mut m, hsv);
        }

        let backend = slider.borrow().backend_name();
        log_info!("svbox demo up — backend: {backend}");
        if args.verbose {
            eprintln!("[svbox] backend: {backend}");
        }

        Ok(Self {
            model,
            slider,
            texture: None,
            verbose: args.verbose,
        })
    }

    /// Upload the surface into the egui texture when a regeneration happened.
    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let dirty = self.slider.borrow_mut().take_dirty();
        if !dirty && self.texture.is_some() {
            return;
        }
        if let Some(image) = self.slider.borrow().surface().present() {
            if self.verbose && dirty {
                eprintln!("[svbox] SV texture regenerated");
            }
            let opts = egui::TextureOptions::LINEAR;
            match &mut self.texture {
                Some(handle) => handle.set(image, opts),
                None => self.texture = Some(ctx.load_texture("sv_map", image, opts)),
            }
        }
    }

    /// The SV box: texture + thumb + drag handling. Value runs upward, so
    /// the texture's v axis is flipped via the uv rect.
    fn draw_sv_box(&mut self, ui: &mut egui::Ui) {
        let (rect, resp) =
            ui.allocate_exact_size(Vec2::splat(220.0), egui::Sense::click_and_drag());

        if ui.is_rect_visible(rect) {
            let p = ui.painter();
            if let Some(texture) = &self.texture {
                p.image(
                    texture.id(),
                    rect,
                    egui::Rect::from_min_max(Pos2::new(0.0, 1.0), Pos2::new(1.0, 0.0)),
                    Color32::WHITE,
                );
            }
            p.rect_stroke(rect, 2.0, Stroke::new(1.0, Color32::from_black_alpha(60)));

            let (x, y) = self.slider.borrow().position();
            let thumb = Pos2::new(
                rect.min.x + x * rect.width(),
                rect.min.y + (1.0 - y) * rect.height(),
            );
            let hsv = self.model.borrow().hsv();
            let [r, g, b, _] = hsv_to_rgba8(hsv.h, hsv.s, hsv.v, 1.0);
            p.circle_filled(thumb, 6.0, Color32::from_rgb(r, g, b));
            p.circle_stroke(thumb, 6.0, Stroke::new(2.0, Color32::WHITE));
        }

        if (resp.dragged() || resp.clicked())
            && let Some(mp) = resp.interact_pointer_pos()
        {
            let x = ((mp.x - rect.min.x) / rect.width()).clamp(0.0, 1.0);
            let y = (1.0 - (mp.y - rect.min.y) / rect.height()).clamp(0.0, 1.0);
            SvBoxSlider::drag(&self.slider, &self.model, x, y);
        }
    }

    /// Horizontal hue strip driving the model's hue channel.
    fn draw_hue_strip(&mut self, ui: &mut egui::Ui) {
        let (rect, resp) =
            ui.allocate_exact_size(Vec2::new(220.0, 16.0), egui::Sense::click_and_drag());

        if ui.is_rect_visible(rect) {
            let p = ui.painter();
            let steps = 48;
            for i in 0..steps {
                let t0 = i as f32 / steps as f32;
                let t1 = (i + 1) as f32 / steps as f32;
                let [r, g, b, _] = hsv_to_rgba8(t0, 1.0, 1.0, 1.0);
                p.rect_filled(
                    egui::Rect::from_min_max(
                        Pos2::new(rect.min.x + t0 * rect.width(), rect.min.y),
                        Pos2::new(rect.min.x + t1 * rect.width() + 0.5, rect.max.y),
                    ),
                    0.0,
                    Color32::from_rgb(r, g, b),
                );
            }
            p.rect_stroke(rect, 2.0, Stroke::new(1.0, Color32::from_black_alpha(60)));

            let h = self.model.borrow().h();
            let tx = rect.min.x + h * rect.width();
            p.circle_filled(Pos2::new(tx, rect.center().y), 9.0, Color32::WHITE);
            p.circle_stroke(
                Pos2::new(tx, rect.center().y),
                9.0,
                Stroke::new(1.0, Color32::from_black_alpha(70)),
            );
        }

        if (resp.dragged() || resp.clicked())
            && let Some(mp) = resp.interact_pointer_pos()
        {
            let h = ((mp.x - rect.min.x) / rect.width()).clamp(0.0, 1.0);
            self.model.borrow_mut().assign_color(ColorChannel::Hue, h);
        }
    }
}

impl eframe::App for SvBoxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh_texture(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("SV box slider");
            ui.add_space(6.0);
            self.draw_sv_box(ui);
            ui.add_space(6.0);
            self.draw_hue_strip(ui);
            ui.add_space(8.0);

            let hsv = self.model.borrow().hsv();
            let [r, g, b, _] = hsv_to_rgba8(hsv.h, hsv.s, hsv.v, 1.0);
            ui.horizontal(|ui| {
                let (swatch, _) =
                    ui.allocate_exact_size(Vec2::new(28.0, 28.0), egui::Sense::hover());
                ui.painter()
                    .rect_filled(swatch, 3.0, Color32::from_rgb(r, g, b));
                ui.monospace(format!(
                    "H {:>3.0}°  S {:>3.0}%  V {:>3.0}%   #{:02X}{:02X}{:02X}",
                    hsv.h * 360.0,
                    hsv.s * 100.0,
                    hsv.v * 100.0,
                    r,
                    g,
                    b
                ));
            });
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(format!(
                    "generation backend: {}",
                    self.slider.borrow().backend_name()
                ))
                .small(),
            );
        });
    }
}
