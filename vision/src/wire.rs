//! JSON shapes for the `images:annotate` REST endpoint.
//!
//! Only the fields the detector reads are modelled. The service omits
//! zero-valued fields, so everything on the response side defaults.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::debug;
use trash_cam_common::detection::{BoundingBox, DetectedObject};

use crate::client::VisionError;

pub const OBJECT_LOCALIZATION: &str = "OBJECT_LOCALIZATION";

#[derive(Debug, Serialize)]
pub struct AnnotateRequest {
    pub requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
pub struct AnnotateImageRequest {
    pub image: ImageContent,
    pub features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
pub struct ImageContent {
    /// Base64 of the encoded image bytes.
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub max_results: u32,
}

impl AnnotateRequest {
    /// Single-image object localization request.
    pub fn object_localization(jpeg: &[u8], max_results: u32) -> Self {
        Self {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(jpeg),
                },
                features: vec![Feature {
                    kind: OBJECT_LOCALIZATION,
                    max_results,
                }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AnnotateResponse {
    #[serde(default)]
    pub responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    #[serde(default)]
    pub localized_object_annotations: Vec<LocalizedObjectAnnotation>,
    #[serde(default)]
    pub error: Option<Status>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedObjectAnnotation {
    #[serde(default)]
    pub mid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub bounding_poly: BoundingPoly,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingPoly {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
    #[serde(default)]
    pub normalized_vertices: Vec<NormalizedVertex>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct Vertex {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct NormalizedVertex {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

/// `google.rpc.Status`, used both per image and as the HTTP error body.
#[derive(Debug, Default, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: Status,
}

impl BoundingPoly {
    /// Pixel-space hull of the polygon. Normalized vertices win when both
    /// are present.
    pub fn to_pixels(&self, width: u32, height: u32) -> Option<BoundingBox> {
        if !self.normalized_vertices.is_empty() {
            let (w, h) = (width as f32, height as f32);
            BoundingBox::enclosing(self.normalized_vertices.iter().map(|v| {
                (
                    (v.x.clamp(0.0, 1.0) * w).round() as i32,
                    (v.y.clamp(0.0, 1.0) * h).round() as i32,
                )
            }))
        } else {
            BoundingBox::enclosing(self.vertices.iter().map(|v| (v.x, v.y)))
        }
    }
}

/// Turn the first image result into detected objects for a `width`x`height` frame.
pub fn into_objects(
    response: AnnotateResponse,
    width: u32,
    height: u32,
) -> Result<Vec<DetectedObject>, VisionError> {
    let image = response
        .responses
        .into_iter()
        .next()
        .ok_or(VisionError::EmptyResponse)?;

    if let Some(status) = image.error {
        if status.code != 0 {
            return Err(VisionError::Api {
                code: status.code,
                message: status.message,
            });
        }
    }

    let objects = image
        .localized_object_annotations
        .into_iter()
        .filter_map(|ann| match ann.bounding_poly.to_pixels(width, height) {
            Some(bbox) => Some(DetectedObject::new(ann.name, bbox).with_score(ann.score)),
            None => {
                debug!(label = %ann.name, mid = %ann.mid, "annotation without vertices, dropping");
                None
            }
        })
        .collect();
    Ok(objects)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AnnotateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn request_shape() {
        let req = AnnotateRequest::object_localization(&[0xFF, 0xD8, 0xFF], 5);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["requests"][0]["image"]["content"], "/9j/");
        assert_eq!(value["requests"][0]["features"][0]["type"], "OBJECT_LOCALIZATION");
        assert_eq!(value["requests"][0]["features"][0]["maxResults"], 5);
    }

    #[test]
    fn normalized_vertices_scale_to_pixels() {
        let response = parse(
            r#"{"responses":[{"localizedObjectAnnotations":[
                {"mid":"/m/0","name":"Trash","score":0.87,
                 "boundingPoly":{"normalizedVertices":[
                    {"x":0.25,"y":0.1},{"x":0.75,"y":0.1},{"x":0.75,"y":0.6},{"x":0.25,"y":0.6}]}}
            ]}]}"#,
        );
        let objects = into_objects(response, 640, 480).unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].name, "Trash");
        assert!((objects[0].score - 0.87).abs() < 1e-6);
        assert_eq!(objects[0].bounding_box, BoundingBox::new(160, 48, 320, 240));
    }

    #[test]
    fn omitted_zero_coordinates_default() {
        // The service drops x/y when they are zero.
        let response = parse(
            r#"{"responses":[{"localizedObjectAnnotations":[
                {"name":"Tree","boundingPoly":{"normalizedVertices":[
                    {},{"x":0.5},{"x":0.5,"y":0.5},{"y":0.5}]}}
            ]}]}"#,
        );
        let objects = into_objects(response, 100, 200).unwrap();
        assert_eq!(objects[0].bounding_box, BoundingBox::new(0, 0, 50, 100));
        assert_eq!(objects[0].score, 0.0);
    }

    #[test]
    fn out_of_range_normalized_values_are_clamped() {
        let response = parse(
            r#"{"responses":[{"localizedObjectAnnotations":[
                {"name":"Trash","boundingPoly":{"normalizedVertices":[
                    {"x":-0.1,"y":0.9},{"x":1.2,"y":1.05}]}}
            ]}]}"#,
        );
        let objects = into_objects(response, 100, 100).unwrap();
        assert_eq!(objects[0].bounding_box, BoundingBox::new(0, 90, 100, 10));
    }

    #[test]
    fn absolute_vertices_used_when_not_normalized() {
        let response = parse(
            r#"{"responses":[{"localizedObjectAnnotations":[
                {"name":"Trash","boundingPoly":{"vertices":[
                    {"x":12,"y":30},{"x":40,"y":30},{"x":40,"y":70},{"x":12,"y":70}]}}
            ]}]}"#,
        );
        let objects = into_objects(response, 640, 480).unwrap();
        assert_eq!(objects[0].bounding_box, BoundingBox::new(12, 30, 28, 40));
    }

    #[test]
    fn annotation_without_vertices_is_dropped() {
        let response = parse(
            r#"{"responses":[{"localizedObjectAnnotations":[
                {"name":"Trash"},
                {"name":"Trash","boundingPoly":{"vertices":[{"x":1,"y":1},{"x":3,"y":4}]}}
            ]}]}"#,
        );
        let objects = into_objects(response, 10, 10).unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].bounding_box, BoundingBox::new(1, 1, 2, 3));
    }

    #[test]
    fn no_objects_is_empty_list() {
        let objects = into_objects(parse(r#"{"responses":[{}]}"#), 10, 10).unwrap();
        assert!(objects.is_empty());
    }

    #[test]
    fn per_image_error_is_surfaced() {
        let response = parse(
            r#"{"responses":[{"error":{"code":3,"message":"Bad image data."}}]}"#,
        );
        match into_objects(response, 10, 10) {
            Err(VisionError::Api { code, message }) => {
                assert_eq!(code, 3);
                assert_eq!(message, "Bad image data.");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn missing_responses_is_error() {
        assert!(matches!(
            into_objects(parse("{}"), 10, 10),
            Err(VisionError::EmptyResponse)
        ));
    }
}
