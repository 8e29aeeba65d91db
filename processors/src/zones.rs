use std::sync::Arc;

use hullguard_core::{Coordinates, RiskLevel, StopEpisode, Zone, ZoneTable};
use serde::Serialize;

/// Assigns coordinates to the zones of an injected reference table. The
/// table is shared read-only across concurrent vessel pipelines.
#[derive(Debug, Clone)]
pub struct ZoneClassifier {
    table: Arc<ZoneTable>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoneClassification {
    pub zone: Zone,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
}

/// A dwell episode annotated with the environmental risk of where it
/// happened.
#[derive(Debug, Clone, Serialize)]
pub struct StopZoneAssessment {
    pub episode: StopEpisode,
    pub zone_name: String,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
}

impl ZoneClassifier {
    pub fn new(table: Arc<ZoneTable>) -> Self {
        Self { table }
    }

    pub fn classify(&self, point: Coordinates) -> ZoneClassification {
        let zone = self.table.locate(&point);

        ZoneClassification {
            risk_score: zone.risk_score,
            risk_level: zone.risk_level,
            zone: zone.clone(),
        }
    }

    pub fn classify_stops(&self, episodes: &[StopEpisode]) -> Vec<StopZoneAssessment> {
        episodes
            .iter()
            .map(|episode| {
                let zone = self.table.locate(&episode.centroid);

                StopZoneAssessment {
                    episode: episode.clone(),
                    zone_name: zone.name.clone(),
                    risk_score: zone.risk_score,
                    risk_level: zone.risk_level,
                }
            })
            .collect()
    }
}
