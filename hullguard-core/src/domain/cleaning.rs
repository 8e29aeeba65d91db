use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Coordinates, VesselId};

/// A recorded hull-cleaning event. Position and port name are both optional;
/// geolocation falls back through a resolver chain when the exact position
/// is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningEvent {
    pub vessel_id: VesselId,
    pub timestamp: DateTime<Utc>,
    pub position: Option<Coordinates>,
    pub port_name: Option<String>,
}
