//! Lane geometry
//!
//! Maps lane indices to horizontal screen coordinates. Pure configuration,
//! immutable after construction.

/// Evenly divided vertical lanes across the play area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneGrid {
    lane_count: usize,
    width: f32,
    height: f32,
    lane_width: f32,
}

impl LaneGrid {
    /// `lane_count` must be at least 1
    pub fn new(lane_count: usize, width: f32, height: f32) -> Self {
        let lane_count = lane_count.max(1);
        Self {
            lane_count,
            width,
            height,
            lane_width: width / lane_count as f32,
        }
    }

    #[inline]
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    #[inline]
    pub fn lane_width(&self) -> f32 {
        self.lane_width
    }

    /// Play area width
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Play area height (bottom boundary)
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Clamp a (possibly out of range) lane index into [0, lane_count)
    pub fn clamp_lane(&self, lane: i64) -> usize {
        lane.clamp(0, self.lane_count as i64 - 1) as usize
    }

    /// Horizontal center of a lane, snapped to whole pixels
    pub fn lane_center_x(&self, lane: i64) -> f32 {
        let lane = self.clamp_lane(lane) as f32;
        (self.lane_width * lane + self.lane_width / 2.0).floor()
    }

    /// X positions of the separators between lanes
    pub fn separators(&self) -> impl Iterator<Item = f32> + '_ {
        (1..self.lane_count).map(|i| (self.lane_width * i as f32).floor())
    }
}

impl Default for LaneGrid {
    fn default() -> Self {
        use crate::consts::{LANE_COUNT, WINDOW_HEIGHT, WINDOW_WIDTH};
        Self::new(LANE_COUNT, WINDOW_WIDTH, WINDOW_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lane_centers() {
        let lanes = LaneGrid::default();
        assert_eq!(lanes.lane_center_x(0), 80.0);
        assert_eq!(lanes.lane_center_x(1), 240.0);
        assert_eq!(lanes.lane_center_x(2), 400.0);
    }

    #[test]
    fn test_out_of_range_lanes_clamp() {
        let lanes = LaneGrid::default();
        assert_eq!(lanes.clamp_lane(-3), 0);
        assert_eq!(lanes.clamp_lane(7), 2);
        assert_eq!(lanes.lane_center_x(-1), lanes.lane_center_x(0));
        assert_eq!(lanes.lane_center_x(9), lanes.lane_center_x(2));
    }

    #[test]
    fn test_separators() {
        let lanes = LaneGrid::default();
        let xs: Vec<f32> = lanes.separators().collect();
        assert_eq!(xs, vec![160.0, 320.0]);
    }

    proptest! {
        #[test]
        fn clamp_always_in_range(count in 1usize..8, lane in -100i64..100) {
            let lanes = LaneGrid::new(count, 480.0, 720.0);
            let clamped = lanes.clamp_lane(lane);
            prop_assert!(clamped < count);
            let x = lanes.lane_center_x(lane);
            prop_assert!(x >= 0.0 && x < 480.0);
        }
    }
}
