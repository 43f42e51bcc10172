//! Domain types shared between providers, the preloader and the UI.

/// A successful provider response: where the image lives, plus the
/// rewritten prompt some services return alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub url: String,
    pub revised_prompt: Option<String>,
}

/// Decoded, downscaled pixel data produced by the preload step.
///
/// Row-major RGB, 3 bytes per pixel. Small enough to keep in app state
/// and cheap to resample every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl Preview {
    /// Panics if `rgb` is not exactly `width * height * 3` bytes.
    pub fn from_rgb(width: u32, height: u32, rgb: Vec<u8>) -> Self {
        assert_eq!(
            rgb.len(),
            (width * height * 3) as usize,
            "pixel buffer does not match dimensions"
        );
        Self { width, height, rgb }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at (x, y). Out-of-range coordinates are clamped to the edge.
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        let idx = ((y * self.width + x) * 3) as usize;
        (self.rgb[idx], self.rgb[idx + 1], self.rgb[idx + 2])
    }
}

/// An image whose resource finished preloading. Only `PreparedImage`
/// values ever reach the display layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedImage {
    pub url: String,
    pub revised_prompt: Option<String>,
    pub preview: Preview,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_pixel_lookup() {
        // 2x1: red then blue
        let preview = Preview::from_rgb(2, 1, vec![255, 0, 0, 0, 0, 255]);
        assert_eq!(preview.pixel(0, 0), (255, 0, 0));
        assert_eq!(preview.pixel(1, 0), (0, 0, 255));
    }

    #[test]
    fn test_preview_pixel_clamps_out_of_range() {
        let preview = Preview::from_rgb(1, 1, vec![10, 20, 30]);
        assert_eq!(preview.pixel(5, 7), (10, 20, 30));
    }

    #[test]
    #[should_panic(expected = "pixel buffer does not match dimensions")]
    fn test_preview_rejects_mismatched_buffer() {
        Preview::from_rgb(2, 2, vec![0, 0, 0]);
    }
}
