use trash_cam_common::frame::Frame;

/// Something that produces camera frames on demand.
pub trait FrameSource {
    /// Grab the next frame. An empty read is an error, not a skipped frame.
    fn capture(&mut self) -> Result<Frame, CaptureError>;

    /// Give the device back. Called once when the loop exits.
    fn release(&mut self) {}
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("could not open camera {device}: {reason}")]
    Open { device: i32, reason: String },
    #[error("camera returned an empty frame")]
    EmptyFrame,
    #[error("camera read failed: {0}")]
    Read(String),
    #[error("frame conversion failed: {0}")]
    Convert(String),
}
