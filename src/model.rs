// ============================================================================
// COLOR MODEL — shared HSV(A) state with synchronous change notification
// ============================================================================

use crate::color::wrap_hue;

/// Channel selector for [`ColorModel::assign_color`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorChannel {
    Hue,
    Saturation,
    Value,
    Alpha,
}

/// Hue/saturation/value snapshot delivered to subscribers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

type Subscriber = Box<dyn FnMut(&mut ColorModel, Hsv)>;

/// Shared color state. All channels live in [0,1]; hue is cyclic (wraps),
/// the others clamp.
///
/// Change notification is synchronous and single-threaded: `assign_color`
/// invokes every subscriber, in registration order, before it returns.
/// Subscribers receive `&mut ColorModel` and may assign back into it — the
/// suppression protocol in [`crate::sv_slider`] keeps that from looping.
pub struct ColorModel {
    h: f32,
    s: f32,
    v: f32,
    a: f32,
    subscribers: Vec<Subscriber>,
}

impl Default for ColorModel {
    fn default() -> Self {
        Self {
            h: 0.0,
            s: 0.0,
            v: 1.0,
            a: 1.0,
            subscribers: Vec::new(),
        }
    }
}

impl ColorModel {
    pub fn new(h: f32, s: f32, v: f32, a: f32) -> Self {
        Self {
            h: wrap_hue(h),
            s: s.clamp(0.0, 1.0),
            v: v.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    pub fn h(&self) -> f32 {
        self.h
    }
    pub fn s(&self) -> f32 {
        self.s
    }
    pub fn v(&self) -> f32 {
        self.v
    }
    pub fn a(&self) -> f32 {
        self.a
    }

    pub fn hsv(&self) -> Hsv {
        Hsv {
            h: self.h,
            s: self.s,
            v: self.v,
        }
    }

    /// Register a change subscriber. Delivery order is registration order.
    pub fn subscribe(&mut self, f: impl FnMut(&mut ColorModel, Hsv) + 'static) {
        self.subscribers.push(Box::new(f));
    }

    /// Assign one channel. Hue wraps, the other channels clamp. Subscribers
    /// are notified only when the stored value actually changed.
    pub fn assign_color(&mut self, channel: ColorChannel, value: f32) {
        let changed = match channel {
            ColorChannel::Hue => {
                let v = wrap_hue(value);
                let c = v != self.h;
                self.h = v;
                c
            }
            ColorChannel::Saturation => {
                let v = value.clamp(0.0, 1.0);
                let c = v != self.s;
                self.s = v;
                c
            }
            ColorChannel::Value => {
                let v = value.clamp(0.0, 1.0);
                let c = v != self.v;
                self.v = v;
                c
            }
            ColorChannel::Alpha => {
                let v = value.clamp(0.0, 1.0);
                let c = v != self.a;
                self.a = v;
                c
            }
        };
        if changed {
            self.notify();
        }
    }

    /// Set hue, saturation and value in one step with a single notification,
    /// for hosts that load a whole color at once.
    pub fn set_hsv(&mut self, h: f32, s: f32, v: f32) {
        let (h, s, v) = (wrap_hue(h), s.clamp(0.0, 1.0), v.clamp(0.0, 1.0));
        if (h, s, v) != (self.h, self.s, self.v) {
            self.h = h;
            self.s = s;
            self.v = v;
            self.notify();
        }
    }

    // The subscriber list is taken out for the duration of the walk so a
    // subscriber can mutate the model it was handed. Subscribers added
    // during delivery are kept; nested notifications are not re-entered.
    fn notify(&mut self) {
        let event = self.hsv();
        let mut subs = std::mem::take(&mut self.subscribers);
        for f in subs.iter_mut() {
            f(self, event);
        }
        subs.append(&mut self.subscribers);
        self.subscribers = subs;
    }
}
