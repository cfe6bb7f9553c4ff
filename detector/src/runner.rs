use tracing::{debug, error, info, warn};
use trash_cam_vision::VisionClient;

use crate::annotate::draw_boxes;
use crate::display::{is_exit_key, DisplayError, DisplaySurface};
use crate::source::{CaptureError, FrameSource};
use crate::stop::StopSignal;
use crate::trash::TrashDetector;

/// Counters for one run of the detection loop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub boxes_drawn: u64,
    pub vision_failures: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("frame capture failed: {0}")]
    Capture(#[from] CaptureError),
    #[error("display failed: {0}")]
    Display(#[from] DisplayError),
}

/// Capture, detect, annotate, show, poll; repeat until `stop` is set.
///
/// Escape on the display sets `stop`. Capture and display failures end the
/// loop with an error; a failed detection only leaves that frame
/// unannotated. The source is released on every exit path.
pub async fn run<S, C, D>(
    source: &mut S,
    detector: &TrashDetector<C>,
    display: &mut D,
    stop: &StopSignal,
) -> Result<RunSummary, RunError>
where
    S: FrameSource,
    C: VisionClient,
    D: DisplaySurface,
{
    info!("entering detection loop");
    let result = run_until_stopped(source, detector, display, stop).await;
    source.release();

    match &result {
        Ok(summary) => info!(
            frames = summary.frames,
            boxes_drawn = summary.boxes_drawn,
            vision_failures = summary.vision_failures,
            "detection loop stopped"
        ),
        Err(e) => error!(error = %e, "detection loop aborted"),
    }
    result
}

async fn run_until_stopped<S, C, D>(
    source: &mut S,
    detector: &TrashDetector<C>,
    display: &mut D,
    stop: &StopSignal,
) -> Result<RunSummary, RunError>
where
    S: FrameSource,
    C: VisionClient,
    D: DisplaySurface,
{
    let mut summary = RunSummary::default();

    while !stop.is_stopped() {
        let mut frame = source.capture()?;
        summary.frames += 1;

        match detector.detect_trash(&frame).await {
            Ok(boxes) => {
                draw_boxes(&mut frame.image, &boxes);
                summary.boxes_drawn += boxes.len() as u64;
                debug!(seq = frame.seq, boxes = boxes.len(), "frame annotated");
            }
            Err(e) => {
                summary.vision_failures += 1;
                warn!(error = %e, seq = frame.seq, "trash detection failed, showing frame unannotated");
            }
        }

        display.show(&frame)?;

        let key = display.poll_key()?;
        if is_exit_key(key) {
            info!(seq = frame.seq, "escape pressed");
            stop.stop();
        }
    }

    Ok(summary)
}
