//! SCRFD face detector via ONNX Runtime.
//!
//! Letterboxes the RGB photo to 640×640, decodes the three anchor strides
//! and suppresses overlapping boxes. Only boxes are decoded; landmark outputs
//! are ignored.

use super::{DetectorError, FacePresence, FaceRegion};
use image::DynamicImage;
use image::imageops::FilterType;
use ndarray::Array4;
use ort::session::Session;
use ort::value::TensorRef;
use std::path::Path;

const SCRFD_INPUT_SIZE: usize = 640;
const SCRFD_MEAN: f32 = 127.5;
const SCRFD_STD: f32 = 128.0;
const SCRFD_CONFIDENCE_THRESHOLD: f32 = 0.5;
const SCRFD_NMS_THRESHOLD: f32 = 0.4;
const SCRFD_STRIDES: [usize; 3] = [8, 16, 32];
const SCRFD_ANCHORS_PER_CELL: usize = 2;

/// Metadata for coordinate de-mapping after letterbox resize.
struct LetterboxInfo {
    scale: f32,
    pad_x: f32,
    pad_y: f32,
}

/// Output tensor indices for one stride: (score_idx, bbox_idx).
type StrideOutputIndices = (usize, usize);

pub struct ScrfdDetector {
    session: Session,
    stride_indices: [StrideOutputIndices; 3],
}

impl ScrfdDetector {
    /// Load the SCRFD ONNX model from the given path.
    pub fn load(model_path: &str) -> Result<Self, DetectorError> {
        if !Path::new(model_path).exists() {
            return Err(DetectorError::ModelNotFound(model_path.to_string()));
        }

        let session = Session::builder()?
            .with_intra_threads(2)?
            .commit_from_file(model_path)?;

        let output_names: Vec<String> = session
            .outputs()
            .iter()
            .map(|o| o.name().to_string())
            .collect();

        // with or without the landmark branch: 3 strides × score/bbox at minimum
        if output_names.len() < 6 {
            return Err(DetectorError::InferenceFailed(format!(
                "SCRFD model requires at least 6 outputs (3 strides × score/bbox), got {}",
                output_names.len()
            )));
        }

        let stride_indices = discover_output_indices(&output_names);

        Ok(Self {
            session,
            stride_indices,
        })
    }

    fn preprocess(&self, image: &DynamicImage) -> Result<(Array4<f32>, LetterboxInfo), DetectorError> {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(DetectorError::InferenceFailed("empty image".into()));
        }

        let side = SCRFD_INPUT_SIZE as f32;
        let scale = (side / width as f32).min(side / height as f32);

        let new_w = ((width as f32 * scale).round() as u32).clamp(1, SCRFD_INPUT_SIZE as u32);
        let new_h = ((height as f32 * scale).round() as u32).clamp(1, SCRFD_INPUT_SIZE as u32);
        let pad_x = (SCRFD_INPUT_SIZE - new_w as usize) as f32 / 2.0;
        let pad_y = (SCRFD_INPUT_SIZE - new_h as usize) as f32 / 2.0;

        let resized = image::imageops::resize(&rgb, new_w, new_h, FilterType::Triangle);

        // padding stays at 0.0, i.e. SCRFD_MEAN after normalization
        let mut tensor = Array4::<f32>::zeros((1, 3, SCRFD_INPUT_SIZE, SCRFD_INPUT_SIZE));
        let off_x = pad_x.floor() as usize;
        let off_y = pad_y.floor() as usize;

        for (x, y, px) in resized.enumerate_pixels() {
            let tx = off_x + x as usize;
            let ty = off_y + y as usize;
            for c in 0..3 {
                tensor[[0, c, ty, tx]] = (px[c] as f32 - SCRFD_MEAN) / SCRFD_STD;
            }
        }

        Ok((tensor, LetterboxInfo { scale, pad_x, pad_y }))
    }
}

impl FacePresence for ScrfdDetector {
    fn detect_faces(&mut self, image: &DynamicImage) -> Result<Vec<FaceRegion>, DetectorError> {
        let (input, letterbox) = self.preprocess(image)?;

        let outputs = self
            .session
            .run(ort::inputs![TensorRef::from_array_view(input.view())?])?;

        let mut all = Vec::new();

        for (pos, &stride) in SCRFD_STRIDES.iter().enumerate() {
            let (score_idx, bbox_idx) = self.stride_indices[pos];

            let (_, scores) = outputs[score_idx]
                .try_extract_tensor::<f32>()
                .map_err(|e| DetectorError::InferenceFailed(format!("scores stride {stride}: {e}")))?;
            let (_, bboxes) = outputs[bbox_idx]
                .try_extract_tensor::<f32>()
                .map_err(|e| DetectorError::InferenceFailed(format!("bboxes stride {stride}: {e}")))?;

            all.extend(decode_stride(
                scores,
                bboxes,
                stride,
                &letterbox,
                SCRFD_CONFIDENCE_THRESHOLD,
            ));
        }

        Ok(nms(all, SCRFD_NMS_THRESHOLD))
    }
}

/// Map output tensors to stride slots.
///
/// Named exports use "score_8", "bbox_16", ...; anything else falls back to
/// the standard positional layout [0-2] scores, [3-5] boxes.
fn discover_output_indices(names: &[String]) -> [StrideOutputIndices; 3] {
    let find = |prefix: &str, stride: usize| -> Option<usize> {
        let target = format!("{prefix}_{stride}");
        names.iter().position(|n| n == &target)
    };

    let mut indices = [(0, 3), (1, 4), (2, 5)];
    for (slot, &stride) in SCRFD_STRIDES.iter().enumerate() {
        match (find("score", stride), find("bbox", stride)) {
            (Some(s), Some(b)) => indices[slot] = (s, b),
            _ => return [(0, 3), (1, 4), (2, 5)],
        }
    }
    indices
}

/// Decode detections for a single stride level.
fn decode_stride(
    scores: &[f32],
    bboxes: &[f32],
    stride: usize,
    letterbox: &LetterboxInfo,
    threshold: f32,
) -> Vec<FaceRegion> {
    let grid = SCRFD_INPUT_SIZE / stride;
    let num_anchors = grid * grid * SCRFD_ANCHORS_PER_CELL;
    let s = stride as f32;

    let mut out = Vec::new();

    for idx in 0..num_anchors {
        let score = scores.get(idx).copied().unwrap_or(0.0);
        if score <= threshold {
            continue;
        }

        let off = idx * 4;
        if off + 3 >= bboxes.len() {
            continue;
        }

        let cell = idx / SCRFD_ANCHORS_PER_CELL;
        let ax = (cell % grid) as f32 * s;
        let ay = (cell / grid) as f32 * s;

        let x1 = (ax - bboxes[off] * s - letterbox.pad_x) / letterbox.scale;
        let y1 = (ay - bboxes[off + 1] * s - letterbox.pad_y) / letterbox.scale;
        let x2 = (ax + bboxes[off + 2] * s - letterbox.pad_x) / letterbox.scale;
        let y2 = (ay + bboxes[off + 3] * s - letterbox.pad_y) / letterbox.scale;

        out.push(FaceRegion {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
            confidence: score,
        });
    }

    out
}

/// Non-Maximum Suppression, highest confidence first.
fn nms(mut detections: Vec<FaceRegion>, iou_threshold: f32) -> Vec<FaceRegion> {
    detections.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep: Vec<FaceRegion> = Vec::new();
    for det in detections {
        if keep.iter().all(|k| iou(k, &det) <= iou_threshold) {
            keep.push(det);
        }
    }
    keep
}

fn iou(a: &FaceRegion, b: &FaceRegion) -> f32 {
    let x1 = a.x.max(b.x);
    let y1 = a.y.max(b.y);
    let x2 = (a.x + a.width).min(b.x + b.width);
    let y2 = (a.y + a.height).min(b.y + b.height);

    let inter = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    let union = a.width * a.height + b.width * b.height - inter;

    if union > 0.0 { inter / union } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(x: f32, y: f32, w: f32, h: f32, conf: f32) -> FaceRegion {
        FaceRegion {
            x,
            y,
            width: w,
            height: h,
            confidence: conf,
        }
    }

    fn identity_letterbox() -> LetterboxInfo {
        LetterboxInfo {
            scale: 1.0,
            pad_x: 0.0,
            pad_y: 0.0,
        }
    }

    #[test]
    fn test_iou_identical_and_disjoint() {
        let a = region(0.0, 0.0, 100.0, 100.0, 1.0);
        let b = region(200.0, 200.0, 10.0, 10.0, 1.0);
        assert!((iou(&a, &a) - 1.0).abs() < 1e-6);
        assert!(iou(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_iou_partial() {
        let a = region(0.0, 0.0, 10.0, 10.0, 1.0);
        let b = region(5.0, 0.0, 10.0, 10.0, 1.0);
        assert!((iou(&a, &b) - 50.0 / 150.0).abs() < 1e-6);
    }

    #[test]
    fn test_nms_keeps_best_of_overlapping() {
        let kept = nms(
            vec![
                region(5.0, 5.0, 100.0, 100.0, 0.8),
                region(0.0, 0.0, 100.0, 100.0, 0.9),
                region(300.0, 300.0, 50.0, 50.0, 0.7),
            ],
            0.4,
        );
        assert_eq!(kept.len(), 2);
        assert!((kept[0].confidence - 0.9).abs() < 1e-6);
        assert!((kept[1].confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_decode_stride_skips_low_scores() {
        let grid = SCRFD_INPUT_SIZE / 32;
        let anchors = grid * grid * SCRFD_ANCHORS_PER_CELL;
        let mut scores = vec![0.1f32; anchors];
        let bboxes = vec![1.0f32; anchors * 4];

        assert!(decode_stride(&scores, &bboxes, 32, &identity_letterbox(), 0.5).is_empty());

        // second cell of the first row, first anchor
        scores[2] = 0.95;
        let dets = decode_stride(&scores, &bboxes, 32, &identity_letterbox(), 0.5);
        assert_eq!(dets.len(), 1);
        let d = &dets[0];
        assert!((d.x - 0.0).abs() < 1e-4);
        assert!((d.y + 32.0).abs() < 1e-4);
        assert!((d.width - 64.0).abs() < 1e-4);
        assert!((d.height - 64.0).abs() < 1e-4);
    }

    #[test]
    fn test_decode_stride_undoes_letterbox() {
        let grid = SCRFD_INPUT_SIZE / 32;
        let anchors = grid * grid * SCRFD_ANCHORS_PER_CELL;
        let mut scores = vec![0.0f32; anchors];
        scores[0] = 0.9;
        let bboxes = vec![0.0, 0.0, 2.0, 2.0]
            .into_iter()
            .chain(std::iter::repeat_n(0.0, (anchors - 1) * 4))
            .collect::<Vec<f32>>();

        let lb = LetterboxInfo {
            scale: 2.0,
            pad_x: 0.0,
            pad_y: 80.0,
        };
        let dets = decode_stride(&scores, &bboxes, 32, &lb, 0.5);
        assert_eq!(dets.len(), 1);
        assert!((dets[0].y + 40.0).abs() < 1e-4);
        assert!((dets[0].width - 32.0).abs() < 1e-4);
    }

    #[test]
    fn test_discover_output_indices_named() {
        let names: Vec<String> = [
            "bbox_8", "kps_8", "score_8", "bbox_16", "kps_16", "score_16", "bbox_32", "kps_32",
            "score_32",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        assert_eq!(discover_output_indices(&names), [(2, 0), (5, 3), (8, 6)]);
    }

    #[test]
    fn test_discover_output_indices_positional_fallback() {
        let names: Vec<String> = (0..9).map(|i: usize| (428 + i).to_string()).collect();
        assert_eq!(discover_output_indices(&names), [(0, 3), (1, 4), (2, 5)]);
    }

    #[test]
    fn test_load_missing_model() {
        let err = ScrfdDetector::load("/nonexistent/scrfd.onnx").err().unwrap();
        assert!(matches!(err, DetectorError::ModelNotFound(_)));
    }
}
