//! Camera-to-window trash detection: capture a frame, ask the recognition
//! service what is in it, outline the trash, show it.

pub mod annotate;
pub mod app;
pub mod display;
pub mod runner;
pub mod source;
pub mod stop;
pub mod trash;

#[cfg(test)]
mod testing;

#[cfg(feature = "opencv")]
pub mod camera;
#[cfg(feature = "opencv")]
pub mod window;

pub use app::{start, EXIT_CAMERA_OPEN_FAILED, EXIT_FAILURE, EXIT_OK};
pub use runner::{run, RunError, RunSummary};
pub use stop::StopSignal;
pub use trash::{DetectError, TrashDetector};
