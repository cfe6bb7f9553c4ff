use tracing::debug;
use trash_cam_common::detection::{trash_boxes, BoundingBox};
use trash_cam_common::frame::{Frame, FrameError};
use trash_cam_vision::{VisionClient, VisionError};

/// Finds trash in a frame by asking a [`VisionClient`] and keeping only
/// the objects it labels `Trash`.
pub struct TrashDetector<C> {
    client: C,
    jpeg_quality: u8,
}

#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("failed to encode frame: {0}")]
    Encode(#[from] FrameError),
    #[error("recognition request failed: {0}")]
    Vision(#[from] VisionError),
}

impl<C: VisionClient> TrashDetector<C> {
    pub fn new(client: C, jpeg_quality: u8) -> Self {
        Self {
            client,
            jpeg_quality,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Boxes of trash found in `frame`, in the order the service listed them.
    pub async fn detect_trash(&self, frame: &Frame) -> Result<Vec<BoundingBox>, DetectError> {
        let encoded = frame.encode_jpeg(self.jpeg_quality)?;
        let objects = self.client.detect(&encoded).await?;
        let boxes = trash_boxes(&objects);
        debug!(
            client = self.client.name(),
            seq = frame.seq,
            jpeg_bytes = encoded.len(),
            objects = objects.len(),
            trash = boxes.len(),
            "detection complete"
        );
        Ok(boxes)
    }
}
