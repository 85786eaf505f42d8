//! QR rendering for the code side of the cards.

use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, RgbaImage};
use qrcode::{Color, EcLevel, QrCode};

use crate::errors::AppError;

/// Pixels per QR module.
const MODULE_PIXELS: u32 = 10;
/// Light modules around the symbol, as ISO 18004 requires.
const QUIET_ZONE_MODULES: u32 = 4;
/// Icon side as a percentage of the image side.
const ICON_PERCENT: u32 = 25;

pub const DEFAULT_SCHEME: &str = "spotify:track";

/// A rendered code plus the payload it encodes.
#[derive(Debug, Clone)]
pub struct CodeImage {
    pub payload: String,
    pub pixels: DynamicImage,
}

/// Turns track identifiers into QR images, optionally with an icon in the middle.
#[derive(Debug, Clone)]
pub struct CodeImageGenerator {
    scheme: String,
    icon: Option<Arc<RgbaImage>>,
}

impl CodeImageGenerator {
    pub fn new(scheme: impl Into<String>, icon: Option<Arc<RgbaImage>>) -> Self {
        Self {
            scheme: scheme.into(),
            icon,
        }
    }

    /// `"{scheme}:{id}"`. An absent id encodes as an empty id.
    pub fn payload(&self, track_id: Option<&str>) -> String {
        format!("{}:{}", self.scheme, track_id.unwrap_or_default())
    }

    /// Encodes `payload` at error-correction level Q, the smallest version that
    /// holds it.
    pub fn render(&self, payload: &str) -> Result<CodeImage, AppError> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::Q).map_err(
            |source| AppError::QrEncode {
                payload: payload.to_string(),
                source,
            },
        )?;
        let symbol = rasterize(&code);

        let pixels = match &self.icon {
            None => DynamicImage::ImageLuma8(symbol),
            Some(icon) => {
                let mut canvas = DynamicImage::ImageLuma8(symbol).into_rgba8();
                embed_icon(&mut canvas, icon);
                DynamicImage::ImageRgba8(canvas)
            }
        };

        Ok(CodeImage {
            payload: payload.to_string(),
            pixels,
        })
    }
}

/// Draws the module matrix with a quiet zone, black on white.
fn rasterize(code: &QrCode) -> GrayImage {
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let side = (modules + 2 * QUIET_ZONE_MODULES) * MODULE_PIXELS;

    GrayImage::from_fn(side, side, |px, py| {
        let mx = (px / MODULE_PIXELS).checked_sub(QUIET_ZONE_MODULES);
        let my = (py / MODULE_PIXELS).checked_sub(QUIET_ZONE_MODULES);
        let dark = match (mx, my) {
            (Some(mx), Some(my)) if mx < modules && my < modules => {
                colors[(my * modules + mx) as usize] == Color::Dark
            }
            _ => false,
        };
        if dark {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

/// Pastes `icon`, scaled to a square of `ICON_PERCENT` of the canvas, at the center.
fn embed_icon(canvas: &mut RgbaImage, icon: &RgbaImage) {
    let side = (canvas.width() * ICON_PERCENT / 100).max(1);
    let scaled = imageops::resize(icon, side, side, FilterType::Lanczos3);
    let offset = i64::from((canvas.width() - side) / 2);
    imageops::overlay(canvas, &scaled, offset, offset);
}
