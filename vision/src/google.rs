use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use trash_cam_common::config::{Credentials, VisionConfig};
use trash_cam_common::detection::DetectedObject;
use trash_cam_common::frame::EncodedImage;

use crate::client::{VisionClient, VisionError};
use crate::wire::{self, AnnotateRequest, AnnotateResponse, ErrorEnvelope};

const USER_PROJECT_HEADER: &str = "x-goog-user-project";

/// Google Cloud Vision object localization over the REST API.
///
/// The API key travels as the `key` query parameter. A non-empty project
/// id is sent as the quota project header.
pub struct GoogleVisionClient {
    http: reqwest::Client,
    endpoint: String,
    credentials: Credentials,
    max_results: u32,
}

impl GoogleVisionClient {
    pub fn new(config: &VisionConfig, credentials: Credentials) -> Result<Self, VisionError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.request_timeout_secs.min(10)))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(VisionError::Build)?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            credentials,
            max_results: config.max_results,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl VisionClient for GoogleVisionClient {
    async fn detect(&self, image: &EncodedImage) -> Result<Vec<DetectedObject>, VisionError> {
        let body = AnnotateRequest::object_localization(&image.data, self.max_results);

        let mut request = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.credentials.api_key.as_str())])
            .json(&body);
        if !self.credentials.project_id.is_empty() {
            request = request.header(USER_PROJECT_HEADER, self.credentials.project_id.as_str());
        }

        let response = request.send().await.map_err(VisionError::from_transport)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(VisionError::from_transport)?;

        if !status.is_success() {
            let message = match serde_json::from_slice::<ErrorEnvelope>(&bytes) {
                Ok(envelope) => envelope.error.message,
                Err(_) => String::from_utf8_lossy(&bytes).into_owned(),
            };
            return Err(VisionError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: AnnotateResponse = serde_json::from_slice(&bytes)?;
        let objects = wire::into_objects(parsed, image.width, image.height)?;
        debug!(
            jpeg_bytes = image.len(),
            objects = objects.len(),
            "object localization complete"
        );
        Ok(objects)
    }

    fn name(&self) -> &str {
        "google-cloud-vision"
    }
}
