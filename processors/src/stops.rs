use hullguard_core::{
    Coordinates, DateRange, Mean, PositionRecord, StopEpisode, Trajectory, distance_km,
};
use tracing::instrument;

use crate::StopSettings;

/// Detects dwell episodes in a cleaned trajectory.
#[derive(Debug, Clone, Default)]
pub struct StopDetector {
    settings: StopSettings,
}

impl StopDetector {
    pub fn new(settings: StopSettings) -> Self {
        Self { settings }
    }

    /// Flags each consecutive pair as low-movement or not, run-length
    /// encodes the flags and keeps runs lasting at least the configured
    /// minimum. Episodes come out disjoint and ordered by start time; a
    /// trajectory with fewer than two positions has none.
    #[instrument(skip_all, fields(vessel_id = %trajectory.vessel_id()))]
    pub fn detect(&self, trajectory: &Trajectory) -> Vec<StopEpisode> {
        let positions = trajectory.positions();
        if positions.len() < 2 {
            return Vec::new();
        }

        let flags: Vec<bool> = positions
            .windows(2)
            .map(|pair| self.is_low_movement(&pair[0], &pair[1]))
            .collect();

        let mut episodes = Vec::new();
        let mut i = 0;
        while i < flags.len() {
            if !flags[i] {
                i += 1;
                continue;
            }

            let start = i;
            while i + 1 < flags.len() && flags[i + 1] {
                i += 1;
            }
            // `i` is the last low-movement pair, so the run covers the
            // points `start..=i + 1`.
            episodes.extend(self.episode(&positions[start..=i + 1]));
            i += 1;
        }

        episodes
    }

    fn is_low_movement(&self, a: &PositionRecord, b: &PositionRecord) -> bool {
        let reported_slow = a.speed.is_some_and(|s| s <= self.settings.speed_threshold);

        let dt_minutes = (b.timestamp - a.timestamp).num_seconds() as f64 / 60.;
        if dt_minutes <= 0. {
            // Duplicate or unordered timestamps make the derived speed
            // meaningless; fall back to the reported speed alone.
            return reported_slow;
        }

        let d = distance_km(&a.coordinates(), &b.coordinates());
        if dt_minutes >= self.settings.min_stop_minutes && d <= self.settings.max_jump_km {
            return true;
        }

        let derived_speed = d / (dt_minutes / 60.);
        derived_speed <= self.settings.speed_threshold || reported_slow
    }

    fn episode(&self, run: &[PositionRecord]) -> Option<StopEpisode> {
        let period = DateRange::new(run.first()?.timestamp, run.last()?.timestamp).ok()?;
        if period.duration_minutes() < self.settings.min_stop_minutes {
            return None;
        }

        Some(StopEpisode {
            centroid: Coordinates {
                latitude: run.iter().map(|p| p.latitude).mean()?,
                longitude: run.iter().map(|p| p.longitude).mean()?,
            },
            period,
        })
    }
}
