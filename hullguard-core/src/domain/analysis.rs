use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString, IntoStaticStr};

use crate::{RiskLevel, VesselClass, VesselId};

/// Tonnes of CO2 emitted per tonne of heavy marine fuel burned. Exported for
/// callers deriving fleet CO2 impact figures; the engine itself only carries
/// the derived figure through to the fleet summary.
pub const MARINE_FUEL_CO2_FACTOR: f64 = 3.114;

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    AsRefStr,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TrendLabel {
    Degrading,
    Improving,
    Stable,
}

/// Result of one analysis run for one vessel. Computed once per run and
/// replaced wholesale on the next; never mutated in between.
#[derive(Debug, Clone, Serialize)]
pub struct VesselAnalysis {
    pub vessel_id: VesselId,
    pub class: VesselClass,
    /// 0-100, already rounded.
    pub biofouling_score: f64,
    pub risk_level: RiskLevel,
    pub speed_degradation_pct: f64,
    /// Unlike speed degradation this may be negative, meaning improvement.
    pub efficiency_degradation_pct: f64,
    pub speed_trend: TrendLabel,
    pub efficiency_trend: TrendLabel,
    pub predicted_cleaning: Option<DateTime<Utc>>,
    pub months_with_data: usize,
    pub port_days: f64,
    pub total_fuel_consumed_kg: f64,
    /// Externally derived CO2 impact figure, summed into the fleet total.
    pub co2_impact_tonnes: f64,
    pub analyzed_at: DateTime<Utc>,
}

impl VesselAnalysis {
    /// Neutral result for a vessel without enough data to analyze.
    pub fn neutral(vessel_id: VesselId, class: VesselClass, analyzed_at: DateTime<Utc>) -> Self {
        Self {
            vessel_id,
            class,
            biofouling_score: 0.,
            risk_level: RiskLevel::Low,
            speed_degradation_pct: 0.,
            efficiency_degradation_pct: 0.,
            speed_trend: TrendLabel::Stable,
            efficiency_trend: TrendLabel::Stable,
            predicted_cleaning: None,
            months_with_data: 0,
            port_days: 0.,
            total_fuel_consumed_kg: 0.,
            co2_impact_tonnes: 0.,
            analyzed_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskLevelCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl RiskLevelCounts {
    pub fn increment(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
            RiskLevel::Critical => self.critical += 1,
        }
    }
}

/// Pure reduction over the vessel analyses of one run. All averages are 0
/// for an empty fleet, never NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FleetSummary {
    pub vessels: usize,
    pub risk_counts: RiskLevelCounts,
    pub avg_biofouling_score: f64,
    pub avg_speed_degradation_pct: f64,
    pub avg_efficiency_degradation_pct: f64,
    pub total_co2_impact_tonnes: f64,
}
