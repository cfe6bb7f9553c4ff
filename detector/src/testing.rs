//! Scripted stand-ins for the camera, recognition service and window.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use image::{Rgb, RgbImage};
use trash_cam_common::detection::DetectedObject;
use trash_cam_common::frame::{EncodedImage, Frame};
use trash_cam_vision::{VisionClient, VisionError};

use crate::display::{DisplayError, DisplaySurface};
use crate::source::{CaptureError, FrameSource};
use crate::stop::StopSignal;

pub(crate) const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Yields black 16x16 frames; fails on capture number `fail_at` (0-based).
pub(crate) struct ScriptedSource {
    pub(crate) captured: u64,
    pub(crate) fail_at: Option<u64>,
    pub(crate) released: bool,
}

impl ScriptedSource {
    pub(crate) fn new() -> Self {
        Self {
            captured: 0,
            fail_at: None,
            released: false,
        }
    }

    pub(crate) fn failing_at(n: u64) -> Self {
        Self {
            fail_at: Some(n),
            ..Self::new()
        }
    }
}

impl FrameSource for ScriptedSource {
    fn capture(&mut self) -> Result<Frame, CaptureError> {
        if self.fail_at == Some(self.captured) {
            return Err(CaptureError::EmptyFrame);
        }
        let seq = self.captured;
        self.captured += 1;
        Ok(Frame::new(RgbImage::from_pixel(16, 16, BLACK), 0, seq))
    }

    fn release(&mut self) {
        self.released = true;
    }
}

pub(crate) enum Reply {
    Objects(Vec<DetectedObject>),
    Fail,
}

/// Plays back one reply per call, then reports no objects.
pub(crate) struct ScriptedClient {
    pub(crate) replies: Mutex<VecDeque<Reply>>,
}

impl ScriptedClient {
    pub(crate) fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
        }
    }

    pub(crate) fn empty() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl VisionClient for ScriptedClient {
    async fn detect(&self, _image: &EncodedImage) -> Result<Vec<DetectedObject>, VisionError> {
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Objects(objects)) => Ok(objects),
            Some(Reply::Fail) => Err(VisionError::Timeout),
            None => Ok(Vec::new()),
        }
    }
}

/// Records shown frames and hands out scripted key polls.
pub(crate) struct ScriptedDisplay {
    pub(crate) keys: VecDeque<Option<i32>>,
    pub(crate) shown: Vec<Frame>,
    pub(crate) stop_after: Option<(usize, StopSignal)>,
}

impl ScriptedDisplay {
    pub(crate) fn with_keys(keys: Vec<Option<i32>>) -> Self {
        Self {
            keys: keys.into(),
            shown: Vec::new(),
            stop_after: None,
        }
    }
}

impl DisplaySurface for ScriptedDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.shown.push(frame.clone());
        if let Some((n, signal)) = &self.stop_after {
            if self.shown.len() >= *n {
                signal.stop();
            }
        }
        Ok(())
    }

    fn poll_key(&mut self) -> Result<Option<i32>, DisplayError> {
        if self.stop_after.is_some() {
            return Ok(None);
        }
        match self.keys.pop_front() {
            Some(key) => Ok(key),
            None => panic!("display polled more often than scripted"),
        }
    }
}
