//! Shared helpers for embedding provider implementations.

use image::{DynamicImage, ImageFormat as ImgFormat};
use photolib_domain::error::{Error, Result};

/// L2-normalises a vector in place when `normalize` is set; no-op otherwise.
pub fn maybe_normalize(vector: &mut [f32], normalize: bool) {
    if !normalize {
        return;
    }
    let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

/// Decodes arbitrary image bytes and flattens transparency onto a white
/// background, re-encoding as JPEG. Required before handing an image to a
/// model or API that expects opaque RGB input.
pub fn flatten_to_rgb_jpeg(bytes: &[u8]) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| Error::invalid_input(format!("unreadable image: {e}")))?;

    let rgb = match decoded {
        DynamicImage::ImageRgb8(_) => decoded,
        other => composite_onto_white(&other),
    };

    let mut out = Vec::new();
    rgb.write_to(&mut std::io::Cursor::new(&mut out), ImgFormat::Jpeg)
        .map_err(|e| Error::internal(format!("failed to re-encode image as jpeg: {e}")))?;
    Ok(out)
}

fn composite_onto_white(image: &DynamicImage) -> DynamicImage {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut canvas = image::RgbImage::from_pixel(width, height, image::Rgb([255, 255, 255]));
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        if a == 255 {
            canvas.put_pixel(x, y, image::Rgb([r, g, b]));
        } else if a > 0 {
            let alpha = f32::from(a) / 255.0;
            let blend = |channel: u8| (f32::from(channel) * alpha + 255.0 * (1.0 - alpha)) as u8;
            canvas.put_pixel(x, y, image::Rgb([blend(r), blend(g), blend(b)]));
        }
    }
    DynamicImage::ImageRgb8(canvas)
}
