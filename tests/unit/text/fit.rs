use super::*;
use crate::text::measure::MonospaceMeasurer;

fn never_fits(_: &str, _: &str, _: f64, _: f64) -> Size {
    Size::new(1.0e9, 1.0e9)
}

#[test]
fn never_fitting_frame_stops_exactly_at_floor() {
    let frame = Rect::new(0.0, 0.0, 10.0, 10.0);
    let (result, tried) = FontFitter::trace(&mut never_fits, "x", frame, 25.0, "Any");
    assert_eq!(result.font_size, MIN_FONT_SIZE);
    assert!(!result.fits);

    assert_eq!(tried.first(), Some(&25.0));
    assert_eq!(tried.last(), Some(&6.0));
    // 25.0 down to 6.0 in 0.5 steps, both ends included.
    assert_eq!(tried.len(), 39);
    assert!(tried.windows(2).all(|w| w[1] <= w[0]));
    assert!(tried.iter().all(|s| *s >= MIN_FONT_SIZE));
}

#[test]
fn fitting_frame_returns_starting_size_untouched() {
    let mut calls = 0usize;
    let mut m = |_: &str, _: &str, _: f64, _: f64| {
        calls += 1;
        Size::new(1.0, 1.0)
    };
    let result = FontFitter::fit(&mut m, "x", Rect::new(0.0, 0.0, 100.0, 100.0), 25.0, "Any");
    assert_eq!(
        result,
        FitResult {
            font_size: 25.0,
            fits: true
        }
    );
    assert_eq!(calls, 1);
}

#[test]
fn shrinks_until_text_fits() {
    // Height tracks size exactly; a 20pt-tall frame fits at 20.
    let mut m = |_: &str, _: &str, size: f64, _: f64| Size::new(1.0, size);
    let result = FontFitter::fit(&mut m, "x", Rect::new(0.0, 0.0, 50.0, 20.0), 25.0, "Any");
    assert_eq!(result.font_size, 20.0);
    assert!(result.fits);
}

#[test]
fn step_is_clamped_to_floor() {
    let (result, tried) = FontFitter::trace(
        &mut never_fits,
        "x",
        Rect::new(0.0, 0.0, 1.0, 1.0),
        6.3,
        "Any",
    );
    assert_eq!(tried, vec![6.3, 6.0]);
    assert_eq!(result.font_size, 6.0);
}

#[test]
fn starting_below_floor_is_measured_once() {
    let (result, tried) = FontFitter::trace(
        &mut never_fits,
        "x",
        Rect::new(0.0, 0.0, 1.0, 1.0),
        4.0,
        "Any",
    );
    assert_eq!(tried, vec![4.0]);
    assert_eq!(result.font_size, 4.0);
    assert!(!result.fits);
}

#[test]
fn measurement_is_width_constrained_to_frame() {
    let mut widths = Vec::new();
    let mut m = |_: &str, _: &str, _: f64, max_width: f64| {
        widths.push(max_width);
        Size::new(0.0, 0.0)
    };
    FontFitter::fit(&mut m, "x", Rect::new(10.0, 10.0, 130.0, 50.0), 25.0, "Any");
    assert_eq!(widths, vec![120.0]);
}

#[test]
fn fitting_is_deterministic_with_monospace() {
    let frame = Rect::new(0.0, 0.0, 200.0, 40.0);
    let text = "A rather long headline that needs to wrap";
    let a = FontFitter::fit(&mut MonospaceMeasurer::default(), text, frame, 25.0, "Any");
    let b = FontFitter::fit(&mut MonospaceMeasurer::default(), text, frame, 25.0, "Any");
    assert_eq!(a, b);
    assert!(a.font_size < 25.0);
}

#[test]
fn huge_starting_size_is_capped_and_terminates() {
    let mut calls = 0usize;
    let mut m = |_: &str, _: &str, _: f64, _: f64| {
        calls += 1;
        Size::new(1.0e300, 1.0e300)
    };
    let result = FontFitter::fit(&mut m, "x", Rect::new(0.0, 0.0, 1.0, 1.0), 1.0e17, "Any");
    assert_eq!(result.font_size, MIN_FONT_SIZE);
    assert!(!result.fits);
    // MAX_FONT_SIZE down to the floor in half-point steps, both ends included.
    assert_eq!(calls, 8181);
}

#[test]
fn huge_starting_size_that_fits_starts_at_cap() {
    let mut m = |_: &str, _: &str, _: f64, _: f64| Size::new(0.0, 0.0);
    let result = FontFitter::fit(&mut m, "x", Rect::new(0.0, 0.0, 1.0, 1.0), 1.0e17, "Any");
    assert_eq!(
        result,
        FitResult {
            font_size: MAX_FONT_SIZE,
            fits: true
        }
    );
}
