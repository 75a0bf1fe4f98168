use crate::{
    foundation::core::{Rect, Size, size_fits},
    text::measure::TextMeasurer,
};

/// Smallest size the fitter will shrink text to.
pub const MIN_FONT_SIZE: f64 = 6.0;
/// Step between sizes tried by the fitter.
pub const FONT_SIZE_STEP: f64 = 0.5;
/// Largest starting size the fitter accepts; larger requests start here.
pub const MAX_FONT_SIZE: f64 = 4096.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Outcome of shrink-to-fit.
pub struct FitResult {
    /// Last size measured.
    pub font_size: f64,
    /// Whether the text fits the frame at `font_size`.
    pub fits: bool,
}

/// Shrink-to-fit search: lower the size by [`FONT_SIZE_STEP`] until the measured text fits
/// the frame or [`MIN_FONT_SIZE`] is reached. Never backtracks, never goes below the floor.
#[derive(Clone, Copy, Debug, Default)]
pub struct FontFitter;

impl FontFitter {
    pub fn fit<M: TextMeasurer + ?Sized>(
        measurer: &mut M,
        text: &str,
        frame: Rect,
        starting_size: f64,
        font_family: &str,
    ) -> FitResult {
        Self::fit_with(measurer, text, frame, starting_size, font_family, |_| {})
    }

    /// Like [`FontFitter::fit`], also returning every size that was measured, in order.
    pub fn trace<M: TextMeasurer + ?Sized>(
        measurer: &mut M,
        text: &str,
        frame: Rect,
        starting_size: f64,
        font_family: &str,
    ) -> (FitResult, Vec<f64>) {
        let mut tried = Vec::new();
        let result = Self::fit_with(measurer, text, frame, starting_size, font_family, |s| {
            tried.push(s)
        });
        (result, tried)
    }

    fn fit_with<M: TextMeasurer + ?Sized>(
        measurer: &mut M,
        text: &str,
        frame: Rect,
        starting_size: f64,
        font_family: &str,
        mut on_measure: impl FnMut(f64),
    ) -> FitResult {
        let target = frame.size();
        let start = starting_size.min(MAX_FONT_SIZE);
        let mut size = start;
        let mut measured = measure_at(measurer, text, font_family, size, target, &mut on_measure);

        // Sizes are derived from the step count, so the search always terminates.
        let max_steps = ((start - MIN_FONT_SIZE) / FONT_SIZE_STEP).ceil().max(0.0) as u32;
        for step in 1..=max_steps {
            if size_fits(measured, target) {
                break;
            }
            size = (start - f64::from(step) * FONT_SIZE_STEP).max(MIN_FONT_SIZE);
            measured = measure_at(measurer, text, font_family, size, target, &mut on_measure);
        }

        let fits = size_fits(measured, target);
        if size != starting_size {
            tracing::debug!(
                font_family,
                from = starting_size,
                to = size,
                fits,
                "shrunk font to fit frame"
            );
        }
        FitResult {
            font_size: size,
            fits,
        }
    }
}

fn measure_at<M: TextMeasurer + ?Sized>(
    measurer: &mut M,
    text: &str,
    font_family: &str,
    size: f64,
    target: Size,
    on_measure: &mut impl FnMut(f64),
) -> Size {
    on_measure(size);
    measurer.measure(text, font_family, size, target.width)
}

#[cfg(test)]
#[path = "../../tests/unit/text/fit.rs"]
mod tests;
