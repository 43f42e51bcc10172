//! Image resource preloading.
//!
//! A generated image URL is never shown to the user until the resource
//! behind it has been fully fetched and decoded. The preload runs as a
//! fire-and-forget background task; its completion posts an `Action` back
//! to the event loop rather than being awaited by the submission path.

use log::{debug, info};

use super::types::Preview;

/// Longest edge of the preview kept in memory. Terminal grids are far
/// smaller than this, so resampling down from here loses nothing visible.
const PREVIEW_MAX_DIM: u32 = 256;

#[derive(Debug)]
pub enum PreloadError {
    /// Network-level failure while fetching the resource.
    Network(String),
    /// The resource server answered with a non-success status.
    Status(u16),
    /// The fetched bytes are not a decodable image.
    Decode(String),
}

impl std::fmt::Display for PreloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreloadError::Network(msg) => write!(f, "network error: {msg}"),
            PreloadError::Status(status) => write!(f, "HTTP {status}"),
            PreloadError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for PreloadError {}

/// Fetch the resource at `url` completely, then decode it into a preview.
pub async fn preload(client: &reqwest::Client, url: &str) -> Result<Preview, PreloadError> {
    debug!("Preloading image resource: {url}");

    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(|e| PreloadError::Network(e.to_string()))?;

    if !response.status().is_success() {
        return Err(PreloadError::Status(response.status().as_u16()));
    }

    let mut bytes: Vec<u8> = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| PreloadError::Network(e.to_string()))?
    {
        bytes.extend_from_slice(&chunk);
    }

    info!("Image resource fetched: {} bytes", bytes.len());
    decode_preview(&bytes)
}

/// Decode raw image bytes and downscale them to preview size.
pub fn decode_preview(bytes: &[u8]) -> Result<Preview, PreloadError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| PreloadError::Decode(e.to_string()))?;
    let (full_w, full_h) = (decoded.width(), decoded.height());
    // thumbnail() also upscales; only shrink oversized images
    let scaled = if full_w > PREVIEW_MAX_DIM || full_h > PREVIEW_MAX_DIM {
        decoded.thumbnail(PREVIEW_MAX_DIM, PREVIEW_MAX_DIM)
    } else {
        decoded
    };
    let thumb = scaled.to_rgb8();
    debug!(
        "Decoded {}x{} image into {}x{} preview",
        full_w,
        full_h,
        thumb.width(),
        thumb.height()
    );
    Ok(Preview::from_rgb(thumb.width(), thumb.height(), thumb.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_preview_small_image_keeps_dimensions() {
        let preview = decode_preview(&png_bytes(4, 2)).unwrap();
        assert_eq!(preview.width(), 4);
        assert_eq!(preview.height(), 2);
        assert_eq!(preview.pixel(0, 0), (200, 40, 40));
    }

    #[test]
    fn test_decode_preview_downscales_large_images() {
        let preview = decode_preview(&png_bytes(1024, 512)).unwrap();
        assert!(preview.width() <= PREVIEW_MAX_DIM);
        assert!(preview.height() <= PREVIEW_MAX_DIM);
    }

    #[test]
    fn test_decode_preview_rejects_garbage() {
        let result = decode_preview(b"definitely not an image");
        assert!(matches!(result, Err(PreloadError::Decode(_))));
    }
}
