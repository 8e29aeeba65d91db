use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::{
    FuelRecord, PositionRecord, RawPositionRecord, SessionId, SessionKind, SessionRecord, VesselId,
};

impl RawPositionRecord {
    pub fn test_default(timestamp: DateTime<Utc>) -> Self {
        let mut rng = rand::rng();

        Self {
            timestamp: Some(timestamp),
            latitude: Some(-8.0 - rng.random_range(0.0..0.5)),
            longitude: Some(-34.8 - rng.random_range(0.0..0.5)),
            speed: Some(rng.random_range(8.0..14.0)),
            heading: Some(rng.random_range(0.0..360.0)),
        }
    }
}

impl PositionRecord {
    pub fn test_default(timestamp: DateTime<Utc>) -> Self {
        let mut rng = rand::rng();

        Self {
            timestamp,
            latitude: -8.0 - rng.random_range(0.0..0.5),
            longitude: -34.8 - rng.random_range(0.0..0.5),
            speed: Some(rng.random_range(8.0..14.0)),
            heading: Some(rng.random_range(0.0..360.0)),
        }
    }
}

impl SessionRecord {
    pub fn test_default(vessel_id: &VesselId, session_id: &str, start: DateTime<Utc>) -> Self {
        let mut rng = rand::rng();
        let duration_hours = rng.random_range(10.0..48.0);
        let speed = rng.random_range(10.0..14.0);

        Self {
            vessel_id: vessel_id.clone(),
            session_id: SessionId::new(session_id),
            kind: SessionKind::Navigation,
            start,
            end: start + Duration::minutes((duration_hours * 60.0) as i64),
            duration_hours,
            distance_nm: duration_hours * speed,
            speed,
        }
    }
}

impl FuelRecord {
    pub fn test_default(session_id: &str) -> Self {
        let mut rng = rand::rng();

        Self {
            session_id: SessionId::new(session_id),
            consumed_kg: rng.random_range(5_000.0..20_000.0),
            fuel_type: "VLSFO".into(),
        }
    }
}
