use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub num_workers: Option<u32>,
    pub trajectory: TrajectorySettings,
    pub stops: StopSettings,
    pub trend: TrendSettings,
}

impl Settings {
    /// Loads `config/hullguard.yml` (when present) with `HULLGUARD__`
    /// prefixed environment variables layered on top. Absent keys fall back
    /// to the documented defaults.
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/hullguard").required(false))
            .add_source(config::Environment::with_prefix("HULLGUARD").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct TrajectorySettings {
    /// Target maximum number of retained positions per vessel.
    pub point_limit: usize,
    /// Consecutive positions further apart than this are treated as a data
    /// gap and start a new segment.
    pub segment_split_km: f64,
}

impl Default for TrajectorySettings {
    fn default() -> Self {
        Self {
            point_limit: 2000,
            segment_split_km: 100.,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct StopSettings {
    /// Maximum displacement for a long-dwell pair to count as stopped.
    pub max_jump_km: f64,
    /// Minimum episode duration, also the dwell time of the displacement
    /// test.
    pub min_stop_minutes: f64,
    /// Low-movement bound applied to both derived and reported speeds.
    pub speed_threshold: f64,
}

impl Default for StopSettings {
    fn default() -> Self {
        Self {
            max_jump_km: 0.5,
            min_stop_minutes: 30.,
            speed_threshold: 2.,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct TrendSettings {
    /// Number of months in the baseline and current windows.
    pub window_months: usize,
    /// Baseline speed in knots for vessels without navigation history.
    pub default_service_speed: f64,
    /// Cleaning is predicted for the month current speed would reach this
    /// share of the baseline.
    pub cleaning_speed_ratio: f64,
    /// Minimum navigation sessions before trend labels are derived.
    pub min_trend_sessions: usize,
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self {
            window_months: 3,
            default_service_speed: 12.,
            cleaning_speed_ratio: 0.75,
            min_trend_sessions: 10,
        }
    }
}
