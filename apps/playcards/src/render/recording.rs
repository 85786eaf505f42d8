//! A surface that records what would be drawn. Backs the JSON layout dump.

use serde::{Deserialize, Serialize};

use crate::codes::CodeImage;
use crate::errors::AppError;
use crate::layout::{DrawInstruction, Region, StandardFont, StandardMetrics, TextMeasure};
use crate::render::PageSurface;

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceOp {
    Text(DrawInstruction),
    Image { payload: String, rect: Region },
    Rect { rect: Region, line_width: f32 },
    ShowPage,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_ops(self) -> Vec<SurfaceOp> {
        self.ops
    }
}

impl TextMeasure for RecordingSurface {
    fn text_width(&self, text: &str, font: StandardFont, size: f32) -> f32 {
        StandardMetrics.text_width(text, font, size)
    }
}

impl PageSurface for RecordingSurface {
    fn draw_text(&mut self, run: &DrawInstruction) {
        self.ops.push(SurfaceOp::Text(run.clone()));
    }

    fn draw_image(&mut self, image: &CodeImage, rect: &Region) -> Result<(), AppError> {
        self.ops.push(SurfaceOp::Image {
            payload: image.payload.clone(),
            rect: *rect,
        });
        Ok(())
    }

    fn stroke_rect(&mut self, rect: &Region, line_width: f32) {
        self.ops.push(SurfaceOp::Rect {
            rect: *rect,
            line_width,
        });
    }

    fn show_page(&mut self) {
        self.ops.push(SurfaceOp::ShowPage);
    }
}

/// Forwards every operation to `inner`, recording it on the way when asked to.
/// Measurement comes from `inner`.
pub struct TeeSurface<S> {
    inner: S,
    recorder: Option<RecordingSurface>,
}

impl<S: PageSurface> TeeSurface<S> {
    pub fn new(inner: S, record: bool) -> Self {
        Self {
            inner,
            recorder: record.then(RecordingSurface::new),
        }
    }

    pub fn into_parts(self) -> (S, Option<Vec<SurfaceOp>>) {
        (self.inner, self.recorder.map(RecordingSurface::into_ops))
    }
}

impl<S: PageSurface> TextMeasure for TeeSurface<S> {
    fn text_width(&self, text: &str, font: StandardFont, size: f32) -> f32 {
        self.inner.text_width(text, font, size)
    }

    fn line_height(&self, font: StandardFont, size: f32) -> f32 {
        self.inner.line_height(font, size)
    }
}

impl<S: PageSurface> PageSurface for TeeSurface<S> {
    fn draw_text(&mut self, run: &DrawInstruction) {
        self.inner.draw_text(run);
        if let Some(recorder) = &mut self.recorder {
            recorder.draw_text(run);
        }
    }

    fn draw_image(&mut self, image: &CodeImage, rect: &Region) -> Result<(), AppError> {
        self.inner.draw_image(image, rect)?;
        if let Some(recorder) = &mut self.recorder {
            recorder.draw_image(image, rect)?;
        }
        Ok(())
    }

    fn stroke_rect(&mut self, rect: &Region, line_width: f32) {
        self.inner.stroke_rect(rect, line_width);
        if let Some(recorder) = &mut self.recorder {
            recorder.stroke_rect(rect, line_width);
        }
    }

    fn show_page(&mut self) {
        self.inner.show_page();
        if let Some(recorder) = &mut self.recorder {
            recorder.show_page();
        }
    }
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, GrayImage};

    use super::*;

    #[test]
    fn test_ops_serialize_with_tag() {
        let mut surface = RecordingSurface::new();
        surface.draw_text(&DrawInstruction {
            text: "Queen".to_string(),
            x: 1.0,
            y: 2.0,
            font: StandardFont::HelveticaBold,
            font_size: 16.0,
        });
        let image = CodeImage {
            payload: "spotify:track:abc".to_string(),
            pixels: DynamicImage::ImageLuma8(GrayImage::new(1, 1)),
        };
        surface
            .draw_image(&image, &Region::new(0.0, 0.0, 10.0, 10.0))
            .unwrap();
        surface.show_page();

        let json = serde_json::to_value(surface.into_ops()).unwrap();
        assert_eq!(json[0]["op"], "text");
        assert_eq!(json[0]["text"], "Queen");
        assert_eq!(json[0]["font"], "HelveticaBold");
        assert_eq!(json[1]["op"], "image");
        assert_eq!(json[1]["payload"], "spotify:track:abc");
        assert_eq!(json[2]["op"], "show_page");
    }

    #[test]
    fn test_tee_forwards_and_records() {
        let mut tee = TeeSurface::new(RecordingSurface::new(), true);
        tee.stroke_rect(&Region::new(0.0, 0.0, 5.0, 5.0), 3.0);
        tee.show_page();

        let (inner, recorded) = tee.into_parts();
        let recorded = recorded.unwrap();
        assert_eq!(inner.into_ops(), recorded);
        assert_eq!(recorded.len(), 2);
    }

    #[test]
    fn test_tee_without_recording() {
        let mut tee = TeeSurface::new(RecordingSurface::new(), false);
        tee.show_page();
        let (inner, recorded) = tee.into_parts();
        assert!(recorded.is_none());
        assert_eq!(inner.into_ops(), vec![SurfaceOp::ShowPage]);
    }
}
