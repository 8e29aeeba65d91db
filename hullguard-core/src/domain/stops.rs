use serde::Serialize;

use crate::{Coordinates, DateRange};

/// A dwell episode: an interval during which a vessel's movement was
/// effectively zero. Episodes of one trajectory are disjoint and ordered by
/// start time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopEpisode {
    /// Arithmetic mean of the latitudes/longitudes of the episode's points.
    pub centroid: Coordinates,
    pub period: DateRange,
}

impl StopEpisode {
    pub fn duration_minutes(&self) -> f64 {
        self.period.duration_minutes()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StopSummary {
    pub count: usize,
    pub total_minutes: f64,
}

impl StopSummary {
    pub fn from_episodes(episodes: &[StopEpisode]) -> Self {
        Self {
            count: episodes.len(),
            total_minutes: episodes.iter().map(StopEpisode::duration_minutes).sum(),
        }
    }
}
