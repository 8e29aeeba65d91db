use hullguard_core::{
    GeoExtent, PositionRecord, RawPositionRecord, RouteStatistics, Trajectory, TrajectorySegment,
    VesselId, distance_km,
};
use serde::Serialize;
use tracing::instrument;

use crate::TrajectorySettings;

/// Cleans one vessel's raw position trace into a trajectory and its
/// renderable segments.
#[derive(Debug, Clone, Default)]
pub struct TrajectoryBuilder {
    settings: TrajectorySettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuiltRoute {
    pub trajectory: Trajectory,
    pub segments: Vec<TrajectorySegment>,
    pub statistics: RouteStatistics,
}

impl TrajectoryBuilder {
    pub fn new(settings: TrajectorySettings) -> Self {
        Self { settings }
    }

    /// Discards malformed rows, sorts by timestamp, decimates to the
    /// configured point limit and splits the result at data gaps. Garbage or
    /// empty input yields an empty trajectory, not an error.
    #[instrument(skip_all, fields(vessel_id = %vessel_id, raw = raw.len()))]
    pub fn build(&self, vessel_id: VesselId, raw: Vec<RawPositionRecord>) -> BuiltRoute {
        let raw_count = raw.len();

        let mut positions: Vec<PositionRecord> = raw
            .into_iter()
            .filter_map(RawPositionRecord::sanitize)
            .collect();
        positions.sort_by_key(|p| p.timestamp);

        let positions = decimate(positions, self.settings.point_limit);

        let statistics = RouteStatistics {
            raw_count,
            retained_count: positions.len(),
            extent: GeoExtent::of(positions.iter().map(PositionRecord::coordinates)),
        };

        let segments = split_at_gaps(&positions, self.settings.segment_split_km);

        BuiltRoute {
            trajectory: Trajectory::new(vessel_id, positions),
            segments,
            statistics,
        }
    }
}

/// Uniform-stride reduction to at most `limit` points (plus the final point
/// when the stride does not land on it). Lossy simplification, not
/// shape-preserving.
fn decimate(positions: Vec<PositionRecord>, limit: usize) -> Vec<PositionRecord> {
    if limit == 0 || positions.len() <= limit {
        return positions;
    }

    let stride = positions.len().div_ceil(limit);
    let last = positions.len() - 1;

    positions
        .into_iter()
        .enumerate()
        .filter(|(i, _)| i % stride == 0 || *i == last)
        .map(|(_, p)| p)
        .collect()
}

/// Splits a cleaned trace into contiguous segments, starting a new one
/// whenever consecutive positions are further apart than `split_km`. Such a
/// jump signals a reporting gap and must not be rendered as a straight line.
/// Segments shorter than two points are dropped.
fn split_at_gaps(positions: &[PositionRecord], split_km: f64) -> Vec<TrajectorySegment> {
    let Some(first) = positions.first() else {
        return Vec::new();
    };

    let mut segments = Vec::new();
    let mut current = vec![first.clone()];

    for pair in positions.windows(2) {
        if distance_km(&pair[0].coordinates(), &pair[1].coordinates()) <= split_km {
            current.push(pair[1].clone());
        } else {
            segments.extend(TrajectorySegment::new(std::mem::take(&mut current)));
            current.push(pair[1].clone());
        }
    }
    segments.extend(TrajectorySegment::new(current));

    segments
}
