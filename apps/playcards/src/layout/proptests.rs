use proptest::prelude::*;

use crate::layout::centerer::{fit_single_line, LineStyle};
use crate::layout::fitter::{fit_wrapped, WrapStyle};
use crate::layout::font_metrics::{StandardFont, StandardMetrics, TextMeasure};
use crate::layout::instructions::{FitResult, Region};

// Words mixing ASCII with wide WinAnsi glyphs and one character WinAnsi lacks.
const TEXT: &str = "[A-Za-z0-9ÖÜÅé—’坂]{1,14}( [A-Za-z0-9ÖÜÅé—’坂]{1,14}){0,6}";

fn widest_run(result: &FitResult) -> f32 {
    result
        .runs
        .iter()
        .map(|run| StandardMetrics.text_width(&run.text, run.font, run.font_size))
        .fold(0.0, f32::max)
}

fn any_font() -> impl Strategy<Value = StandardFont> {
    prop_oneof![
        Just(StandardFont::Helvetica),
        Just(StandardFont::HelveticaBold),
        Just(StandardFont::Courier),
    ]
}

// Property: non-blank text always produces lines, and no line is wider than
// the region (every glyph used here is narrower than 20pt at 16pt).
proptest! {
    #[test]
    fn prop_wrapped_lines_stay_within_width(
        text in TEXT,
        font in any_font(),
        width in 20.0f32..220.0,
        height in 1.0f32..120.0,
        spacing in 1.0f32..1.6,
    ) {
        let style = WrapStyle {
            font,
            min_size: 6,
            max_size: 16,
            line_spacing: spacing,
            center_horizontally: true,
        };
        let region = Region::new(10.0, 200.0, width, height);
        let result = fit_wrapped(&StandardMetrics, Some(&text), &style, &region);

        prop_assert!(!result.is_empty());
        prop_assert!(widest_run(&result) <= width);
        for run in &result.runs {
            prop_assert!(run.x >= region.x - 1e-3);
        }
    }
}

// Property: a fitted single line is inside the region on both axes.
proptest! {
    #[test]
    fn prop_fitted_single_line_is_inside_region(
        text in TEXT,
        font in any_font(),
        width in 20.0f32..220.0,
        height in 8.0f32..60.0,
    ) {
        let style = LineStyle { font, min_size: 8, max_size: 50 };
        let region = Region::new(0.0, 0.0, width, height);
        let result = fit_single_line(&StandardMetrics, Some(&text), &style, &region);

        prop_assert_eq!(result.runs.len(), 1);
        if result.fitted() {
            let run = &result.runs[0];
            prop_assert!(widest_run(&result) <= width);
            prop_assert!(run.font_size <= height);
            prop_assert!(run.x >= -1e-3);
            prop_assert!(run.y >= -1e-3);
        }
    }
}
