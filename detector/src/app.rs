//! Process startup: open the camera, build the client, open the window,
//! run the loop, and turn the outcome into an exit code.

use tracing::{error, info};
use trash_cam_common::config::{CameraConfig, Config, DisplayConfig, VisionConfig};
use trash_cam_vision::{VisionClient, VisionError};

use crate::display::{DisplayError, DisplaySurface};
use crate::runner::run;
use crate::source::{CaptureError, FrameSource};
use crate::stop::StopSignal;
use crate::trash::TrashDetector;

pub const EXIT_OK: i32 = 0;
pub const EXIT_CAMERA_OPEN_FAILED: i32 = -1;
pub const EXIT_FAILURE: i32 = 1;

/// Bring everything up in order and run until stopped.
///
/// A camera that will not open ends startup before anything else is built,
/// with [`EXIT_CAMERA_OPEN_FAILED`].
pub async fn start<S, C, D, OpenCamera, BuildClient, OpenDisplay>(
    config: &Config,
    open_camera: OpenCamera,
    build_client: BuildClient,
    open_display: OpenDisplay,
    stop: &StopSignal,
) -> i32
where
    S: FrameSource,
    C: VisionClient,
    D: DisplaySurface,
    OpenCamera: FnOnce(&CameraConfig) -> Result<S, CaptureError>,
    BuildClient: FnOnce(&VisionConfig) -> Result<C, VisionError>,
    OpenDisplay: FnOnce(&DisplayConfig) -> Result<D, DisplayError>,
{
    let mut camera = match open_camera(&config.camera) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Could not open camera.");
            error!(error = %e, "could not open camera");
            return EXIT_CAMERA_OPEN_FAILED;
        }
    };

    let client = match build_client(&config.vision) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "failed to create vision client");
            camera.release();
            return EXIT_FAILURE;
        }
    };
    let detector = TrashDetector::new(client, config.vision.jpeg_quality);
    info!(client = detector.client().name(), "vision client ready");

    let mut display = match open_display(&config.display) {
        Ok(d) => d,
        Err(e) => {
            error!(error = %e, "failed to open window");
            camera.release();
            return EXIT_FAILURE;
        }
    };

    match run(&mut camera, &detector, &mut display, stop).await {
        Ok(_) => EXIT_OK,
        Err(_) => EXIT_FAILURE,
    }
}
