// Page surfaces: the drawing API the deck generator writes to.
// Every surface also measures text, so the fitters see exactly the metrics
// the output will be drawn with.

pub mod pdf;
pub mod recording;

pub use pdf::PdfSurface;
pub use recording::{SurfaceOp, TeeSurface};

use crate::codes::CodeImage;
use crate::errors::AppError;
use crate::layout::{DrawInstruction, Region, TextMeasure};

/// A fixed-size-page drawing target.
pub trait PageSurface: TextMeasure {
    fn draw_text(&mut self, run: &DrawInstruction);

    /// Scales `image` to fill `rect`.
    fn draw_image(&mut self, image: &CodeImage, rect: &Region) -> Result<(), AppError>;

    fn stroke_rect(&mut self, rect: &Region, line_width: f32);

    /// Ends the current page; later drawing goes to a new one.
    fn show_page(&mut self);
}
