//! PDF output. Text uses the non-embedded standard Type1 fonts in WinAnsi
//! encoding; code images become Flate-compressed image XObjects.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::DynamicImage;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str};
use tracing::debug;

use crate::codes::CodeImage;
use crate::errors::AppError;
use crate::layout::font_metrics::win_ansi_code;
use crate::layout::grid::PageSize;
use crate::layout::{DrawInstruction, Region, StandardFont, StandardMetrics, TextMeasure};
use crate::render::PageSurface;

/// Builds a PDF document page by page.
pub struct PdfSurface {
    pdf: Pdf,
    page_size: PageSize,
    next_id: i32,
    catalog_id: Ref,
    page_tree_id: Ref,
    font_ids: [Ref; 3],
    pages: Vec<Ref>,
    content: Content,
    images: Vec<(String, Ref)>,
    page_has_content: bool,
}

impl PdfSurface {
    pub fn new(page_size: PageSize) -> Self {
        let mut surface = Self {
            pdf: Pdf::new(),
            page_size,
            next_id: 1,
            catalog_id: Ref::new(1),
            page_tree_id: Ref::new(1),
            font_ids: [Ref::new(1); 3],
            pages: Vec::new(),
            content: Content::new(),
            images: Vec::new(),
            page_has_content: false,
        };
        surface.catalog_id = surface.alloc();
        surface.page_tree_id = surface.alloc();
        for slot in 0..surface.font_ids.len() {
            surface.font_ids[slot] = surface.alloc();
        }
        surface
    }

    fn alloc(&mut self) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Writes the font dictionaries, the page tree and the catalog and returns
    /// the serialized document. A page with pending content is closed first;
    /// a document with no pages gets one blank page.
    pub fn finish(mut self) -> Vec<u8> {
        if self.page_has_content || self.pages.is_empty() {
            self.show_page();
        }

        for font in StandardFont::all() {
            self.pdf
                .type1_font(self.font_ids[font_slot(font)])
                .base_font(Name(font.postscript_name().as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        self.pdf
            .pages(self.page_tree_id)
            .kids(self.pages.iter().copied())
            .count(self.pages.len() as i32);
        self.pdf.catalog(self.catalog_id).pages(self.page_tree_id);

        debug!(
            pages = self.page_count(),
            objects = self.next_id - 1,
            "Serializing PDF"
        );
        self.pdf.finish()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl TextMeasure for PdfSurface {
    fn text_width(&self, text: &str, font: StandardFont, size: f32) -> f32 {
        StandardMetrics.text_width(text, font, size)
    }
}

impl PageSurface for PdfSurface {
    fn draw_text(&mut self, run: &DrawInstruction) {
        let encoded = encode_win_ansi(&run.text);
        self.content
            .begin_text()
            .set_font(Name(font_resource_name(run.font)), run.font_size)
            .next_line(run.x, run.y)
            .show(Str(&encoded))
            .end_text();
        self.page_has_content = true;
    }

    fn draw_image(&mut self, image: &CodeImage, rect: &Region) -> Result<(), AppError> {
        let (raw, gray) = match &image.pixels {
            DynamicImage::ImageLuma8(gray) => (gray.as_raw().clone(), true),
            other => (other.to_rgb8().into_raw(), false),
        };
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&raw)?;
        let compressed = encoder.finish()?;

        let image_id = self.alloc();
        let mut xobject = self.pdf.image_xobject(image_id, &compressed);
        xobject.filter(Filter::FlateDecode);
        xobject.width(image.pixels.width() as i32);
        xobject.height(image.pixels.height() as i32);
        if gray {
            xobject.color_space().device_gray();
        } else {
            xobject.color_space().device_rgb();
        }
        xobject.bits_per_component(8);
        xobject.finish();

        let name = format!("Im{}", self.images.len() + 1);
        self.content
            .save_state()
            .transform([rect.width, 0.0, 0.0, rect.height, rect.x, rect.y])
            .x_object(Name(name.as_bytes()))
            .restore_state();
        self.images.push((name, image_id));
        self.page_has_content = true;
        Ok(())
    }

    fn stroke_rect(&mut self, rect: &Region, line_width: f32) {
        self.content
            .set_line_width(line_width)
            .rect(rect.x, rect.y, rect.width, rect.height)
            .stroke();
        self.page_has_content = true;
    }

    fn show_page(&mut self) {
        let content = std::mem::replace(&mut self.content, Content::new());
        let images = std::mem::take(&mut self.images);
        let page_id = self.alloc();
        let content_id = self.alloc();

        self.pdf.stream(content_id, &content.finish());

        let font_ids = self.font_ids;
        let mut page = self.pdf.page(page_id);
        page.media_box(Rect::new(
            0.0,
            0.0,
            self.page_size.width,
            self.page_size.height,
        ));
        page.parent(self.page_tree_id);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        for font in StandardFont::all() {
            fonts.pair(Name(font_resource_name(font)), font_ids[font_slot(font)]);
        }
        fonts.finish();
        if !images.is_empty() {
            let mut x_objects = resources.x_objects();
            for (name, id) in &images {
                x_objects.pair(Name(name.as_bytes()), *id);
            }
            x_objects.finish();
        }
        resources.finish();
        page.finish();

        self.pages.push(page_id);
        self.page_has_content = false;
    }
}

fn font_slot(font: StandardFont) -> usize {
    match font {
        StandardFont::Helvetica => 0,
        StandardFont::HelveticaBold => 1,
        StandardFont::Courier => 2,
    }
}

fn font_resource_name(font: StandardFont) -> &'static [u8] {
    match font {
        StandardFont::Helvetica => b"F1",
        StandardFont::HelveticaBold => b"F2",
        StandardFont::Courier => b"F3",
    }
}

/// Encodes `text` for a WinAnsiEncoding font. Characters outside the
/// encoding become `?`, which is also how they are measured.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_code(c).unwrap_or(b'?'))
        .collect()
}
