//! OpenCV-backed camera capture.

use image::RgbImage;
use opencv::{
    core::Mat,
    imgproc,
    prelude::*,
    videoio::{self, VideoCapture},
};
use tracing::{info, warn};
use trash_cam_common::config::CameraConfig;
use trash_cam_common::frame::Frame;

use crate::source::{CaptureError, FrameSource};

pub struct OpenCvCamera {
    capture: VideoCapture,
    device_index: i32,
    seq: u64,
}

impl OpenCvCamera {
    pub fn open(config: &CameraConfig) -> Result<Self, CaptureError> {
        let device = config.device_index;
        let open_err = |reason: String| CaptureError::Open { device, reason };

        let mut capture =
            VideoCapture::new(device, videoio::CAP_ANY).map_err(|e| open_err(e.to_string()))?;
        if !capture.is_opened().map_err(|e| open_err(e.to_string()))? {
            return Err(open_err("device not opened".into()));
        }

        if let Some(width) = config.frame_width {
            request_property(&mut capture, videoio::CAP_PROP_FRAME_WIDTH, width, "frame_width");
        }
        if let Some(height) = config.frame_height {
            request_property(&mut capture, videoio::CAP_PROP_FRAME_HEIGHT, height, "frame_height");
        }

        info!(
            device,
            width = capture.get(videoio::CAP_PROP_FRAME_WIDTH).unwrap_or_default(),
            height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT).unwrap_or_default(),
            "camera opened"
        );

        Ok(Self {
            capture,
            device_index: device,
            seq: 0,
        })
    }
}

fn request_property(capture: &mut VideoCapture, prop: i32, value: u32, name: &str) {
    match capture.set(prop, f64::from(value)) {
        Ok(true) => {}
        Ok(false) => warn!(property = name, value, "camera ignored requested property"),
        Err(e) => warn!(error = %e, property = name, value, "failed to set camera property"),
    }
}

impl FrameSource for OpenCvCamera {
    fn capture(&mut self) -> Result<Frame, CaptureError> {
        let mut bgr = Mat::default();
        let grabbed = self
            .capture
            .read(&mut bgr)
            .map_err(|e| CaptureError::Read(e.to_string()))?;
        if !grabbed || bgr.empty() {
            return Err(CaptureError::EmptyFrame);
        }

        let frame = Frame::captured_now(bgr_to_rgb(&bgr)?, self.seq);
        self.seq += 1;
        Ok(frame)
    }

    fn release(&mut self) {
        match self.capture.release() {
            Ok(()) => info!(device = self.device_index, frames = self.seq, "camera released"),
            Err(e) => warn!(error = %e, device = self.device_index, "failed to release camera"),
        }
    }
}

fn bgr_to_rgb(bgr: &Mat) -> Result<RgbImage, CaptureError> {
    let convert = |e: opencv::Error| CaptureError::Convert(e.to_string());

    let mut rgb = Mat::default();
    imgproc::cvt_color(bgr, &mut rgb, imgproc::COLOR_BGR2RGB, 0).map_err(convert)?;
    let size = rgb.size().map_err(convert)?;
    let data = rgb.data_bytes().map_err(convert)?.to_vec();

    RgbImage::from_raw(size.width as u32, size.height as u32, data)
        .ok_or_else(|| CaptureError::Convert("pixel buffer does not match frame size".into()))
}
