use super::*;

use eframe::egui::{pos2, vec2};

#[test]
fn wide_image_fits_the_width() {
    let bounds = Rect::from_min_size(pos2(0.0, 0.0), vec2(160.0, 120.0));
    let fitted = fit_inside(bounds, vec2(320.0, 80.0));
    assert_eq!(fitted.width(), 160.0);
    assert_eq!(fitted.height(), 40.0);
    assert_eq!(fitted.center(), bounds.center());
}

#[test]
fn tall_image_fits_the_height() {
    let bounds = Rect::from_min_size(pos2(10.0, 10.0), vec2(160.0, 120.0));
    let fitted = fit_inside(bounds, vec2(50.0, 200.0));
    assert_eq!(fitted.height(), 120.0);
    assert_eq!(fitted.width(), 30.0);
}

#[test]
fn empty_image_uses_the_bounds() {
    let bounds = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
    assert_eq!(fit_inside(bounds, vec2(0.0, 10.0)), bounds);
}
