use super::*;

#[test]
fn monospace_single_line() {
    let mut m = MonospaceMeasurer::default();
    let s = m.measure("abcd", "Any", 10.0, 1000.0);
    assert_eq!(s, Size::new(24.0, 12.0));
}

#[test]
fn monospace_wraps_on_word_boundaries() {
    let mut m = MonospaceMeasurer {
        advance_ratio: 1.0,
        line_height_ratio: 1.0,
    };
    // "aaa bbb" is 7 advances wide; a 5-wide frame forces a second line.
    let s = m.measure("aaa bbb", "Any", 1.0, 5.0);
    assert_eq!(s, Size::new(3.0, 2.0));
    let s = m.measure("aaa bbb", "Any", 1.0, 7.0);
    assert_eq!(s, Size::new(7.0, 1.0));
}

#[test]
fn monospace_honors_newlines_and_overflowing_words() {
    let mut m = MonospaceMeasurer {
        advance_ratio: 1.0,
        line_height_ratio: 1.0,
    };
    let s = m.measure("ab\nabcdefgh", "Any", 1.0, 4.0);
    assert_eq!(s, Size::new(8.0, 2.0));
}

#[test]
fn monospace_empty_text_is_one_empty_line() {
    let mut m = MonospaceMeasurer::default();
    assert_eq!(m.measure("", "Any", 10.0, 100.0), Size::new(0.0, 12.0));
}

#[test]
fn closures_are_measurers() {
    let mut calls = 0;
    let mut m = |_: &str, _: &str, size: f64, _: f64| {
        calls += 1;
        Size::new(size, size)
    };
    assert_eq!(m.measure("x", "y", 3.0, 10.0), Size::new(3.0, 3.0));
    drop(m);
    assert_eq!(calls, 1);
}

#[test]
fn parley_measurer_requires_fonts() {
    let err = ParleyMeasurer::from_font_bytes(Vec::<Vec<u8>>::new()).unwrap_err();
    assert!(err.to_string().contains("validation error:"));

    let err = ParleyMeasurer::from_font_dirs(&[Path::new("/no/such/fonts")]).unwrap_err();
    assert!(matches!(err, ShotframeError::Validation(_)));
}
