use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Coordinates, VesselId};

/// One row of a raw AIS export before cleaning. Parsers map unparseable
/// fields to `None` rather than failing the whole file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPositionRecord {
    pub timestamp: Option<DateTime<Utc>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
}

impl RawPositionRecord {
    /// Converts the row into a validated position, discarding it when the
    /// timestamp is missing or the coordinates are absent, non-finite or
    /// outside |lat| <= 90 / |lon| <= 180.
    pub fn sanitize(self) -> Option<PositionRecord> {
        let timestamp = self.timestamp?;
        let coordinates = Coordinates {
            latitude: self.latitude?,
            longitude: self.longitude?,
        };

        if !coordinates.is_valid() {
            return None;
        }

        Some(PositionRecord {
            timestamp,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            speed: self.speed.filter(|v| v.is_finite()),
            heading: self.heading.filter(|v| v.is_finite()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionRecord {
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    /// Reported speed over ground in knots.
    pub speed: Option<f64>,
    /// Reported heading in degrees.
    pub heading: Option<f64>,
}

impl PositionRecord {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Cleaned, timestamp-ordered position trace of one vessel.
#[derive(Debug, Clone, Serialize)]
pub struct Trajectory {
    vessel_id: VesselId,
    positions: Vec<PositionRecord>,
}

impl Trajectory {
    /// `positions` must already be sorted non-decreasing by timestamp.
    pub fn new(vessel_id: VesselId, positions: Vec<PositionRecord>) -> Self {
        debug_assert!(positions.is_sorted_by_key(|p| p.timestamp));
        Self {
            vessel_id,
            positions,
        }
    }

    pub fn vessel_id(&self) -> &VesselId {
        &self.vessel_id
    }

    pub fn positions(&self) -> &[PositionRecord] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Contiguous run of trajectory positions without data gaps, suitable for
/// rendering as a single polyline. Always contains at least two positions.
#[derive(Debug, Clone, Serialize)]
pub struct TrajectorySegment {
    positions: Vec<PositionRecord>,
}

impl TrajectorySegment {
    pub fn new(positions: Vec<PositionRecord>) -> Option<Self> {
        (positions.len() >= 2).then_some(Self { positions })
    }

    pub fn positions(&self) -> &[PositionRecord] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoExtent {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl GeoExtent {
    pub fn of(points: impl IntoIterator<Item = Coordinates>) -> Option<Self> {
        points.into_iter().fold(None, |extent, p| {
            Some(match extent {
                None => GeoExtent {
                    min_latitude: p.latitude,
                    max_latitude: p.latitude,
                    min_longitude: p.longitude,
                    max_longitude: p.longitude,
                },
                Some(e) => GeoExtent {
                    min_latitude: e.min_latitude.min(p.latitude),
                    max_latitude: e.max_latitude.max(p.latitude),
                    min_longitude: e.min_longitude.min(p.longitude),
                    max_longitude: e.max_longitude.max(p.longitude),
                },
            })
        })
    }
}

/// Cleaning statistics for one vessel's raw trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteStatistics {
    pub raw_count: usize,
    pub retained_count: usize,
    pub extent: Option<GeoExtent>,
}
