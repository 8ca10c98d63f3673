use serde::{Deserialize, Serialize};

use super::position::TaskPosition;

/// A connector from a predecessor's right edge to a successor's left edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyLine {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub from_task_id: String,
    pub to_task_id: String,
}

/// Connect the vertical centres of two placed tasks.
pub fn dependency_line(
    from_task_id: &str,
    from: &TaskPosition,
    to_task_id: &str,
    to: &TaskPosition,
) -> DependencyLine {
    DependencyLine {
        x1: from.right(),
        y1: from.center_y(),
        x2: to.left,
        y2: to.center_y(),
        from_task_id: from_task_id.to_string(),
        to_task_id: to_task_id.to_string(),
    }
}

impl DependencyLine {
    pub fn involves(&self, task_id: &str) -> bool {
        self.from_task_id == task_id || self.to_task_id == task_id
    }

    /// Sample the S-curve as a polyline of `segments + 1` points.
    ///
    /// The curve is two quadratic Béziers meeting at the midpoint of the
    /// line: the first bends horizontally out of the predecessor, the second
    /// mirrors it into the successor.
    pub fn curve_points(&self, segments: usize) -> Vec<(f32, f32)> {
        let segments = segments.max(2);
        let mid_x = (self.x1 + self.x2) / 2.0;
        let mid_y = (self.y1 + self.y2) / 2.0;
        let first = [(self.x1, self.y1), (mid_x, self.y1), (mid_x, mid_y)];
        let second = [(mid_x, mid_y), (mid_x, self.y2), (self.x2, self.y2)];

        let half = segments / 2;
        let mut points = Vec::with_capacity(segments + 1);
        for i in 0..=half {
            points.push(quadratic(first, i as f32 / half as f32));
        }
        let rest = segments - half;
        for i in 1..=rest {
            points.push(quadratic(second, i as f32 / rest as f32));
        }
        points
    }
}

fn quadratic(p: [(f32, f32); 3], t: f32) -> (f32, f32) {
    let u = 1.0 - t;
    let x = u * u * p[0].0 + 2.0 * u * t * p[1].0 + t * t * p[2].0;
    let y = u * u * p[0].1 + 2.0 * u * t * p[1].1 + t * t * p[2].1;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(left: f32, width: f32, top: f32) -> TaskPosition {
        TaskPosition { left, width, top, height: 40.0 }
    }

    #[test]
    fn connects_right_centre_to_left_centre() {
        let line = dependency_line("a", &pos(0.0, 160.0, 8.0), "b", &pos(200.0, 80.0, 68.0));
        assert_eq!((line.x1, line.y1, line.x2, line.y2), (160.0, 28.0, 200.0, 88.0));
        assert_eq!(line.from_task_id, "a");
        assert_eq!(line.to_task_id, "b");
        assert!(line.involves("b"));
        assert!(!line.involves("c"));
    }

    #[test]
    fn curve_starts_and_ends_on_the_line_endpoints() {
        let line = dependency_line("a", &pos(0.0, 100.0, 8.0), "b", &pos(200.0, 40.0, 68.0));
        let pts = line.curve_points(16);
        assert_eq!(pts.len(), 17);
        assert_eq!(pts[0], (100.0, 28.0));
        assert_eq!(pts[8], (150.0, 58.0));
        let last = pts[16];
        assert!((last.0 - 200.0).abs() < 1e-4 && (last.1 - 88.0).abs() < 1e-4);
    }
}
