//! Arc-length parameterisation of the enemy path.

use frontier_defence_core::Vec2;

/// Ordered waypoint polyline measured by cumulative arc length.
#[derive(Clone, Debug, Default)]
pub(crate) struct PathGeometry {
    waypoints: Vec<Vec2>,
    cumulative: Vec<f32>,
}

impl PathGeometry {
    /// Measures the provided waypoints; returns `None` when the path is unusable.
    pub(crate) fn measure(waypoints: Vec<Vec2>) -> Option<Self> {
        if waypoints.len() < 2 {
            return None;
        }

        let mut cumulative = Vec::with_capacity(waypoints.len());
        let mut travelled = 0.0;
        cumulative.push(travelled);
        for pair in waypoints.windows(2) {
            travelled += pair[0].distance(pair[1]);
            cumulative.push(travelled);
        }

        if travelled <= 0.0 {
            return None;
        }

        Some(Self {
            waypoints,
            cumulative,
        })
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub(crate) fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Total arc length from spawn to base.
    pub(crate) fn length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Position reached after travelling `progress` units from the spawn.
    ///
    /// Progress is clamped to the path so callers may overshoot either end.
    pub(crate) fn point_at(&self, progress: f32) -> Vec2 {
        let progress = progress.clamp(0.0, self.length());
        let segment = self
            .cumulative
            .partition_point(|distance| *distance <= progress)
            .saturating_sub(1);

        match (
            self.waypoints.get(segment),
            self.waypoints.get(segment + 1),
            self.cumulative.get(segment),
            self.cumulative.get(segment + 1),
        ) {
            (Some(start), Some(end), Some(from), Some(to)) if to > from => {
                start.lerp(*end, (progress - from) / (to - from))
            }
            (Some(start), ..) => *start,
            _ => Vec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shape() -> PathGeometry {
        PathGeometry::measure(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(30.0, 0.0),
            Vec2::new(30.0, 40.0),
        ])
        .expect("valid path")
    }

    #[test]
    fn degenerate_paths_are_rejected() {
        assert!(PathGeometry::measure(Vec::new()).is_none());
        assert!(PathGeometry::measure(vec![Vec2::ONE]).is_none());
        assert!(PathGeometry::measure(vec![Vec2::ONE, Vec2::ONE]).is_none());
    }

    #[test]
    fn length_sums_segments() {
        assert!((l_shape().length() - 70.0).abs() < 1e-4);
    }

    #[test]
    fn point_at_interpolates_within_segments() {
        let path = l_shape();
        assert_eq!(path.point_at(15.0), Vec2::new(15.0, 0.0));
        assert_eq!(path.point_at(30.0), Vec2::new(30.0, 0.0));
        assert_eq!(path.point_at(50.0), Vec2::new(30.0, 20.0));
    }

    #[test]
    fn point_at_clamps_to_endpoints() {
        let path = l_shape();
        assert_eq!(path.point_at(-5.0), Vec2::new(0.0, 0.0));
        assert_eq!(path.point_at(500.0), Vec2::new(30.0, 40.0));
    }
}
