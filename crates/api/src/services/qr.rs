//! QR code rendering.
//!
//! Encodes a verify URL as a QR symbol and rasterizes it to an 8-bit
//! grayscale image, with a PNG encoder on top for email attachments.

use image::{DynamicImage, ImageBuffer, Luma};
use qrcode::{types::Color, QrCode};
use std::io::Cursor;
use thiserror::Error;

/// Pixels per QR module.
const DEFAULT_SCALE: u32 = 8;
/// Quiet zone in modules.
const DEFAULT_MARGIN: u32 = 4;

/// Errors that can occur while rendering a QR code.
#[derive(Debug, Error)]
pub enum QrRenderError {
    #[error("Failed to encode QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("Failed to encode PNG: {0}")]
    Png(#[from] image::ImageError),
}

/// Rasterizes `data` as a grayscale QR image with the default scale and
/// quiet zone.
pub fn render_luma(data: &str) -> Result<ImageBuffer<Luma<u8>, Vec<u8>>, QrRenderError> {
    render_luma_scaled(data, DEFAULT_SCALE, DEFAULT_MARGIN)
}

/// Rasterizes `data` with explicit module scale and margin.
pub fn render_luma_scaled(
    data: &str,
    scale: u32,
    margin: u32,
) -> Result<ImageBuffer<Luma<u8>, Vec<u8>>, QrRenderError> {
    let scale = scale.max(1);

    let code = QrCode::new(data.as_bytes())?;
    let module_count = code.width() as u32;
    let image_size = (module_count + margin * 2) * scale;
    let mut img = ImageBuffer::from_pixel(image_size, image_size, Luma([255u8]));
    let colors = code.to_colors();

    for y in 0..module_count {
        for x in 0..module_count {
            let index = (y * module_count + x) as usize;
            if colors[index] == Color::Dark {
                let x0 = (x + margin) * scale;
                let y0 = (y + margin) * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        img.put_pixel(x0 + dx, y0 + dy, Luma([0u8]));
                    }
                }
            }
        }
    }

    Ok(img)
}

/// Renders `data` as a PNG, suitable for attaching to email.
pub fn render_png(data: &str) -> Result<Vec<u8>, QrRenderError> {
    let img = render_luma(data)?;
    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(img).write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}
