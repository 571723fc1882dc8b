//! End-to-end synchronization tests over the same Rc/RefCell wiring the demo
//! app uses: a shared ColorModel with the SvBoxSlider subscribed to it.

use std::cell::RefCell;
use std::rc::Rc;

use svbox::{ColorChannel, ColorModel, GridSize, Hsv, SvBoxSlider};

type Wired = (Rc<RefCell<ColorModel>>, Rc<RefCell<SvBoxSlider>>);

/// Build a CPU-path slider attached to a model, primed from the model's
/// initial state (what the demo app does at startup).
fn wire(h: f32, s: f32, v: f32) -> Wired {
    let slider = Rc::new(RefCell::new(
        SvBoxSlider::new(GridSize::new(16, 16).unwrap(), None).unwrap(),
    ));
    let model = Rc::new(RefCell::new(ColorModel::new(h, s, v, 1.0)));
    SvBoxSlider::attach(&slider, &mut model.borrow_mut());
    {
        let mut m = model.borrow_mut();
        let hsv = m.hsv();
        slider.borrow_mut().hsv_changed(&mut m, hsv);
    }
    slider.borrow_mut().take_dirty();
    (model, slider)
}

#[test]
fn priming_aligns_slider_with_model() {
    let (model, slider) = wire(0.1, 0.2, 0.9);
    assert_eq!(slider.borrow().position(), (0.2, 0.9));
    // priming must not have written back into the model
    assert_eq!(model.borrow().s(), 0.2);
    assert_eq!(model.borrow().v(), 0.9);
}

#[test]
fn hue_change_regenerates_without_moving_slider() {
    let (model, slider) = wire(0.1, 0.2, 0.9);

    // H 0.1 → 0.3 with S/V unchanged: regeneration, position untouched
    model.borrow_mut().assign_color(ColorChannel::Hue, 0.3);
    assert!(slider.borrow_mut().take_dirty());
    assert_eq!(slider.borrow().position(), (0.2, 0.9));
}

#[test]
fn sv_change_moves_slider_without_regenerating() {
    let (model, slider) = wire(0.1, 0.2, 0.9);

    model.borrow_mut().assign_color(ColorChannel::Saturation, 0.5);
    model.borrow_mut().assign_color(ColorChannel::Value, 0.4);
    assert!(!slider.borrow_mut().take_dirty(), "hue did not change");
    assert_eq!(slider.borrow().position(), (0.5, 0.4));
    // the suppressed echoes never looped back into the model
    assert_eq!(model.borrow().s(), 0.5);
    assert_eq!(model.borrow().v(), 0.4);
}

#[test]
fn drag_writes_each_channel_once_and_settles() {
    let (model, slider) = wire(0.0, 0.2, 0.9);

    // record every notification the drag produces
    let events: Rc<RefCell<Vec<Hsv>>> = Rc::new(RefCell::new(Vec::new()));
    {
        let e = Rc::clone(&events);
        model.borrow_mut().subscribe(move |_, hsv| e.borrow_mut().push(hsv));
    }

    SvBoxSlider::drag(&slider, &model, 0.7, 0.3);

    assert_eq!(model.borrow().s(), 0.7);
    assert_eq!(model.borrow().v(), 0.3);
    assert_eq!(slider.borrow().position(), (0.7, 0.3));

    // exactly one notification per assigned channel — no echo loop
    let events = events.borrow();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], Hsv { h: 0.0, s: 0.7, v: 0.9 });
    assert_eq!(events[1], Hsv { h: 0.0, s: 0.7, v: 0.3 });
}

#[test]
fn suppression_does_not_leak_into_the_next_drag() {
    let (model, slider) = wire(0.2, 0.1, 0.1);

    // model-driven move arms and consumes the suppression twice (s and v)
    model.borrow_mut().assign_color(ColorChannel::Saturation, 0.6);
    model.borrow_mut().assign_color(ColorChannel::Value, 0.7);
    assert_eq!(slider.borrow().position(), (0.6, 0.7));

    // a genuine drag right after must still reach the model
    SvBoxSlider::drag(&slider, &model, 0.25, 0.75);
    assert_eq!(model.borrow().s(), 0.25);
    assert_eq!(model.borrow().v(), 0.75);
}

#[test]
fn drag_to_current_position_is_quiet() {
    let (model, slider) = wire(0.2, 0.5, 0.5);
    let count = Rc::new(RefCell::new(0usize));
    {
        let c = Rc::clone(&count);
        model.borrow_mut().subscribe(move |_, _| *c.borrow_mut() += 1);
    }
    SvBoxSlider::drag(&slider, &model, 0.5, 0.5);
    assert_eq!(*count.borrow(), 0, "unchanged values must not notify");
}

#[test]
fn out_of_range_model_values_reach_the_slider_clamped() {
    let (model, slider) = wire(0.2, 0.5, 0.5);
    model.borrow_mut().assign_color(ColorChannel::Saturation, 3.0);
    assert_eq!(slider.borrow().position(), (1.0, 0.5));
}
