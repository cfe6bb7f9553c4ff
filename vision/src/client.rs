use async_trait::async_trait;
use trash_cam_common::detection::DetectedObject;
use trash_cam_common::frame::EncodedImage;

/// Remote object recognition, reduced to the one call the detector needs.
///
/// Implementations receive a JPEG and return every labelled object found
/// in it, with boxes already in frame-pixel coordinates.
#[async_trait]
pub trait VisionClient: Send + Sync {
    async fn detect(&self, image: &EncodedImage) -> Result<Vec<DetectedObject>, VisionError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str {
        "unnamed"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("failed to build HTTP client: {0}")]
    Build(reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("HTTP request failed: {0}")]
    Transport(reqwest::Error),
    #[error("HTTP status {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("recognition service error {code}: {message}")]
    Api { code: i32, message: String },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response contained no image results")]
    EmptyResponse,
}

impl VisionError {
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            VisionError::Timeout
        } else {
            VisionError::Transport(e)
        }
    }
}
