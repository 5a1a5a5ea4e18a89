use super::error::{Result, ThumbnailError};
use crate::config::BrowserConfig;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbaImage};
use std::fmt;
use std::sync::Arc;

/// Shared, immutable RGBA image
///
/// Cloning is cheap; records handed out to callers share pixel data with the
/// cache.
#[derive(Clone)]
pub struct Bitmap(Arc<RgbaImage>);

impl Bitmap {
    #[must_use]
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// Borrow the pixel buffer
    #[must_use]
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.0
    }
}

impl From<RgbaImage> for Bitmap {
    fn from(image: RgbaImage) -> Self {
        Self(Arc::new(image))
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitmap({}x{})", self.width(), self.height())
    }
}

/// Output of the pipeline, tagged with the slot it belongs in
#[derive(Debug, Clone)]
pub enum ProcessedImage {
    Preview(Bitmap),
    Thumbnail(Bitmap),
}

impl ProcessedImage {
    #[must_use]
    pub const fn bitmap(&self) -> &Bitmap {
        match self {
            Self::Preview(bitmap) | Self::Thumbnail(bitmap) => bitmap,
        }
    }

    #[must_use]
    pub const fn is_preview(&self) -> bool {
        matches!(self, Self::Preview(_))
    }
}

/// Decode, crop and resize downloaded thumbnails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailPipeline {
    thumbnail_size: u32,
    preview_width: u32,
    preview_height: u32,
    preview_threshold: u32,
}

impl Default for ThumbnailPipeline {
    fn default() -> Self {
        Self::new(&BrowserConfig::default())
    }
}

impl ThumbnailPipeline {
    #[must_use]
    pub fn new(config: &BrowserConfig) -> Self {
        Self {
            thumbnail_size: config.thumbnail_size,
            preview_width: config.preview_width,
            preview_height: config.preview_height(),
            preview_threshold: config.preview_threshold,
        }
    }

    /// Dimensions of produced list thumbnails
    #[must_use]
    pub const fn thumbnail_dimensions(&self) -> (u32, u32) {
        (self.thumbnail_size, self.thumbnail_size)
    }

    /// Dimensions of produced previews
    #[must_use]
    pub const fn preview_dimensions(&self) -> (u32, u32) {
        (self.preview_width, self.preview_height)
    }

    /// Turn downloaded bytes into a preview or a list thumbnail
    ///
    /// Images at least `preview_threshold` wide become previews; anything
    /// narrower becomes a list thumbnail. Both are centre-cropped to a square
    /// first and then bilinearly resampled to their fixed size.
    ///
    /// # Errors
    ///
    /// Returns `ThumbnailError::Decode` for undecodable bytes and
    /// `ThumbnailError::EmptyImage` for zero-sized images.
    pub fn process(&self, bytes: &[u8]) -> Result<ProcessedImage> {
        let decoded = image::load_from_memory(bytes)?;
        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(ThumbnailError::EmptyImage(width, height));
        }

        let square = center_square(&decoded);

        if width >= self.preview_threshold {
            let resized = square.resize_exact(
                self.preview_width,
                self.preview_height,
                FilterType::Triangle,
            );
            Ok(ProcessedImage::Preview(resized.to_rgba8().into()))
        } else {
            let resized = square.resize_exact(
                self.thumbnail_size,
                self.thumbnail_size,
                FilterType::Triangle,
            );
            Ok(ProcessedImage::Thumbnail(resized.to_rgba8().into()))
        }
    }
}

/// Largest centred square inside the image
///
/// Landscape images lose equal strips on the left and right; portrait images
/// lose them top and bottom.
fn center_square(image: &DynamicImage) -> DynamicImage {
    let (width, height) = image.dimensions();
    let side = width.min(height);
    image.crop_imm((width - side) / 2, (height - side) / 2, side, side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::png_bytes;
    use image::Rgba;

    #[test]
    fn test_wide_image_becomes_preview() {
        let pipeline = ThumbnailPipeline::default();
        let processed = pipeline.process(&png_bytes(720, 405)).unwrap();

        assert!(processed.is_preview());
        let bitmap = processed.bitmap();
        assert_eq!((bitmap.width(), bitmap.height()), (512, 288));
    }

    #[test]
    fn test_threshold_width_is_preview() {
        let pipeline = ThumbnailPipeline::default();
        let processed = pipeline.process(&png_bytes(512, 300)).unwrap();
        assert!(processed.is_preview());
    }

    #[test]
    fn test_narrow_image_becomes_thumbnail() {
        let pipeline = ThumbnailPipeline::default();
        let processed = pipeline.process(&png_bytes(256, 144)).unwrap();

        assert!(!processed.is_preview());
        let bitmap = processed.bitmap();
        assert_eq!((bitmap.width(), bitmap.height()), (128, 128));
    }

    #[test]
    fn test_portrait_image_thumbnail() {
        let pipeline = ThumbnailPipeline::default();
        let processed = pipeline.process(&png_bytes(100, 300)).unwrap();
        assert_eq!(pipeline.thumbnail_dimensions(), (128, 128));
        assert_eq!(processed.bitmap().width(), 128);
        assert_eq!(processed.bitmap().height(), 128);
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let pipeline = ThumbnailPipeline::default();
        let result = pipeline.process(b"definitely not an image");
        assert!(matches!(result, Err(ThumbnailError::Decode(_))));
    }

    #[test]
    fn test_center_square_crops_sides() {
        // Left and right thirds red, middle third green
        let mut image = RgbaImage::from_pixel(30, 10, Rgba([255, 0, 0, 255]));
        for x in 10..20 {
            for y in 0..10 {
                image.put_pixel(x, y, Rgba([0, 255, 0, 255]));
            }
        }

        let square = center_square(&DynamicImage::ImageRgba8(image)).to_rgba8();
        assert_eq!(square.dimensions(), (10, 10));
        assert!(square.pixels().all(|p| *p == Rgba([0, 255, 0, 255])));
    }

    #[test]
    fn test_preview_height_from_ratio() {
        let pipeline = ThumbnailPipeline::default();
        assert_eq!(pipeline.preview_dimensions(), (512, 288));
    }
}
