use std::ops::Range;

use steering_core::config::SceneConfig;
use steering_core::error::{SpecError, ensure_finite, ensure_non_negative};
use steering_core::geometry::Point;
use steering_core::spec::{SegmentVariation, SequentialSpec};

use crate::sampling::sample_range;

/// Segment containing path sample `index`: `floor(index / (len / count))`,
/// clamped to the last segment.
///
/// A sample exactly on a seam belongs to the later segment. This matches how
/// recorded sessions were scored, so it is kept even where the narrower
/// neighbour would be stricter.
pub fn segment_index(index: usize, path_len: usize, segment_count: usize) -> usize {
    if segment_count == 0 || path_len == 0 {
        return 0;
    }
    let segment_len = path_len as f64 / segment_count as f64;
    ((index as f64 / segment_len).floor() as usize).min(segment_count - 1)
}

/// Sample index ranges per segment, consistent with [`segment_index`].
/// Renderers use these to draw each segment's walls.
pub fn segment_ranges(path_len: usize, segment_count: usize) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = (0..segment_count).map(|_| 0..0).collect();
    if segment_count == 0 {
        return ranges;
    }
    let mut start = 0;
    for seg in 0..segment_count {
        let end = (start..path_len)
            .find(|&i| segment_index(i, path_len, segment_count) > seg)
            .unwrap_or(path_len);
        ranges[seg] = start..end;
        start = end;
    }
    ranges
}

/// Flat tunnel split into equal x-ranges. With
/// [`SegmentVariation::Curvature`] the first segment stays flat and each later
/// segment is one quadratic bump `amplitude * (1 - (2t - 1)^2)`.
pub fn sequential_path(spec: &SequentialSpec, scene: &SceneConfig) -> Result<Vec<Point>, SpecError> {
    if spec.segment_widths.is_empty() {
        return Err(SpecError::EmptySegments);
    }
    for &w in &spec.segment_widths {
        ensure_non_negative("segment_width", w)?;
    }
    let amplitude = match spec.variation {
        SegmentVariation::Width => None,
        SegmentVariation::Curvature { amplitude } => Some(ensure_finite("amplitude", amplitude)?),
    };

    let count = spec.segment_widths.len();
    let xs = sample_range(scene.start_x, scene.end_x, scene.sequential_step)?;
    let segment_span = (scene.end_x - scene.start_x) / count as f64;

    Ok(xs
        .into_iter()
        .map(|x| {
            let local = x - scene.start_x;
            let seg = ((local / segment_span).floor() as usize).min(count - 1);
            let y = match amplitude {
                Some(a) if seg > 0 => {
                    let t = (local - seg as f64 * segment_span) / segment_span;
                    scene.y_base + a * (1.0 - (2.0 * t - 1.0).powi(2))
                },
                _ => scene.y_base,
            };
            Point::new(x, y)
        })
        .collect())
}
