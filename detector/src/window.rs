//! HighGUI window for the live annotated feed.

use image::RgbImage;
use opencv::{
    core::{self, Mat, Scalar},
    highgui, imgproc,
    prelude::*,
};
use tracing::{debug, info};
use trash_cam_common::config::DisplayConfig;
use trash_cam_common::frame::Frame;

use crate::display::{DisplayError, DisplaySurface};

pub struct HighGuiWindow {
    title: String,
    poll_ms: i32,
}

impl HighGuiWindow {
    pub fn open(config: &DisplayConfig) -> Result<Self, DisplayError> {
        highgui::named_window(&config.window_title, highgui::WINDOW_AUTOSIZE)
            .map_err(window_err)?;
        info!(title = %config.window_title, poll_ms = config.poll_ms, "window opened");
        Ok(Self {
            title: config.window_title.clone(),
            poll_ms: config.poll_ms.max(1),
        })
    }
}

impl DisplaySurface for HighGuiWindow {
    fn show(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        let bgr = rgb_to_bgr(&frame.image)?;
        highgui::imshow(&self.title, &bgr).map_err(window_err)
    }

    fn poll_key(&mut self) -> Result<Option<i32>, DisplayError> {
        let key = highgui::wait_key(self.poll_ms).map_err(window_err)?;
        if key >= 0 {
            debug!(key, "key pressed");
            Ok(Some(key))
        } else {
            Ok(None)
        }
    }
}

impl Drop for HighGuiWindow {
    fn drop(&mut self) {
        let _ = highgui::destroy_window(&self.title);
    }
}

fn rgb_to_bgr(image: &RgbImage) -> Result<Mat, DisplayError> {
    let size = core::Size::new(image.width() as i32, image.height() as i32);
    let mut rgb =
        Mat::new_size_with_default(size, core::CV_8UC3, Scalar::all(0.0)).map_err(window_err)?;
    rgb.data_bytes_mut()
        .map_err(window_err)?
        .copy_from_slice(image.as_raw());

    let mut bgr = Mat::default();
    imgproc::cvt_color(&rgb, &mut bgr, imgproc::COLOR_RGB2BGR, 0).map_err(window_err)?;
    Ok(bgr)
}

fn window_err(e: opencv::Error) -> DisplayError {
    DisplayError::Window(e.to_string())
}
