//! Recognition service boundary: the [`VisionClient`] capability and its
//! Google Cloud Vision implementation.

pub mod client;
pub mod google;
pub mod wire;

pub use client::{VisionClient, VisionError};
pub use google::GoogleVisionClient;
