use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

/// A camera frame with capture metadata.
///
/// Owned by the loop iteration that captured it; nothing about a frame
/// outlives that iteration.
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: RgbImage,
    pub captured_at_ms: i64,
    pub seq: u64,
}

/// A JPEG-compressed frame, ready to ship to the recognition service.
///
/// Carries the source dimensions so normalized coordinates in the
/// response can be mapped back to frame pixels.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub fn new(image: RgbImage, captured_at_ms: i64, seq: u64) -> Self {
        Self {
            image,
            captured_at_ms,
            seq,
        }
    }

    /// Stamp an image with the current wall-clock time.
    pub fn captured_now(image: RgbImage, seq: u64) -> Self {
        Self::new(image, chrono::Utc::now().timestamp_millis(), seq)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_empty(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }

    /// Encode to JPEG at the given quality (1-100, clamped).
    pub fn encode_jpeg(&self, quality: u8) -> Result<EncodedImage, FrameError> {
        if self.is_empty() {
            return Err(FrameError::Empty);
        }
        let mut buf = Vec::with_capacity(jpeg_capacity_hint(self.width(), self.height()));
        JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100))
            .encode_image(&self.image)
            .map_err(|e| FrameError::Encode(e.to_string()))?;
        Ok(EncodedImage {
            data: Bytes::from(buf),
            width: self.width(),
            height: self.height(),
        })
    }
}

/// Rough JPEG output size: a quarter of the pixel count.
fn jpeg_capacity_hint(width: u32, height: u32) -> usize {
    (width as usize).saturating_mul(height as usize) / 4
}

impl EncodedImage {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("frame has no pixels")]
    Empty,
    #[error("JPEG encoding failed: {0}")]
    Encode(String),
}
