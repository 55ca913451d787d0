//! Arc-length geometry over SVG path data.
//!
//! Animations only need two queries from a curve: its total length and the
//! point at a given distance from the start. `SvgPath` answers both from a
//! kurbo `BezPath`, measuring every segment once up front.

use kurbo::{BezPath, ParamCurve, ParamCurveArclen, PathSeg, Point};

/// Accuracy (in user units) for arc-length measurement and inversion.
const ARCLEN_ACCURACY: f64 = 1e-3;

/// Read-only curve queried by arc length.
pub trait PathGeometry {
    /// Total arc length.
    fn length(&self) -> f64;

    /// Point at `length` from the start. Out-of-range input clamps to the ends.
    fn point_at(&self, length: f64) -> Point;
}

/// A parsed SVG path with cached segment lengths.
#[derive(Debug, Clone)]
pub struct SvgPath {
    segments: Vec<PathSeg>,
    /// Cumulative arc length at the end of each segment.
    ends: Vec<f64>,
    start: Point,
}

impl SvgPath {
    /// Parse path data in SVG `d` attribute syntax.
    pub fn parse(data: &str) -> Result<Self, String> {
        let bez = BezPath::from_svg(data).map_err(|e| e.to_string())?;
        Ok(Self::from_bez(&bez))
    }

    pub fn from_bez(bez: &BezPath) -> Self {
        let segments: Vec<PathSeg> = bez.segments().collect();
        let mut total = 0.0;
        let ends = segments
            .iter()
            .map(|seg| {
                total += seg.arclen(ARCLEN_ACCURACY);
                total
            })
            .collect();
        let start = segments.first().map(|s| s.start()).unwrap_or(Point::ZERO);
        Self { segments, ends, start }
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

impl PathGeometry for SvgPath {
    fn length(&self) -> f64 {
        self.ends.last().copied().unwrap_or(0.0)
    }

    fn point_at(&self, length: f64) -> Point {
        let Some(last) = self.segments.last() else {
            return self.start;
        };
        if !length.is_finite() || length <= 0.0 {
            return self.start;
        }
        if length >= self.length() {
            return last.end();
        }

        // First segment whose cumulative end reaches `length`.
        let idx = self.ends.partition_point(|&end| end < length);
        let seg = &self.segments[idx.min(self.segments.len() - 1)];
        let seg_start = if idx == 0 { 0.0 } else { self.ends[idx - 1] };
        let local = length - seg_start;
        let t = seg.inv_arclen(local, ARCLEN_ACCURACY);
        seg.eval(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 0.01
    }

    #[test]
    fn polyline_length_and_points() {
        let path = SvgPath::parse("M0 0 L100 0 L100 50").unwrap();
        assert_eq!(path.segment_count(), 2);
        assert!((path.length() - 150.0).abs() < 1e-6);
        assert!(close(path.point_at(0.0), Point::new(0.0, 0.0)));
        assert!(close(path.point_at(50.0), Point::new(50.0, 0.0)));
        assert!(close(path.point_at(100.0), Point::new(100.0, 0.0)));
        assert!(close(path.point_at(125.0), Point::new(100.0, 25.0)));
        assert!(close(path.point_at(150.0), Point::new(100.0, 50.0)));
    }

    #[test]
    fn out_of_range_clamps() {
        let path = SvgPath::parse("M10 10 L20 10").unwrap();
        assert!(close(path.point_at(-5.0), Point::new(10.0, 10.0)));
        assert!(close(path.point_at(f64::NAN), Point::new(10.0, 10.0)));
        assert!(close(path.point_at(99.0), Point::new(20.0, 10.0)));
    }

    #[test]
    fn cubic_length_is_measured() {
        // Quarter-circle approximation of radius 100.
        let path = SvgPath::parse("M100 0 C100 55.228 55.228 100 0 100").unwrap();
        let quarter = std::f64::consts::PI * 100.0 / 2.0;
        assert!((path.length() - quarter).abs() < 0.1);
        let mid = path.point_at(path.length() / 2.0);
        assert!((mid.to_vec2().hypot() - 100.0).abs() < 0.1);
    }

    #[test]
    fn empty_path_has_zero_length() {
        let path = SvgPath::parse("").unwrap();
        assert_eq!(path.length(), 0.0);
        assert_eq!(path.point_at(10.0), Point::ZERO);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(SvgPath::parse("M 0 0 Q").is_err());
    }
}
