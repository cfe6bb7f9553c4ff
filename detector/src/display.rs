use trash_cam_common::frame::Frame;

/// Key code that ends the detection loop.
pub const ESCAPE_KEY: i32 = 27;

/// Where annotated frames go, and where key presses come from.
pub trait DisplaySurface {
    fn show(&mut self, frame: &Frame) -> Result<(), DisplayError>;

    /// Wait briefly for a key. `None` means nothing was pressed.
    fn poll_key(&mut self) -> Result<Option<i32>, DisplayError>;
}

pub fn is_exit_key(key: Option<i32>) -> bool {
    key == Some(ESCAPE_KEY)
}

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("window error: {0}")]
    Window(String),
}
