use chrono::{DateTime, Utc};
use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use strum::{AsRefStr, EnumString, IntoStaticStr};

use crate::VesselId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    FromPrimitive,
    Serialize_repr,
    Deserialize_repr,
    strum::Display,
    AsRefStr,
    EnumString,
    IntoStaticStr,
)]
#[repr(i32)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SessionKind {
    Navigation = 1,
    Port = 2,
    Anchorage = 3,
    Maneuver = 4,
}

/// One operational session of a vessel, as logged by the voyage recorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub vessel_id: VesselId,
    pub session_id: SessionId,
    pub kind: SessionKind,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_hours: f64,
    /// Distance covered in nautical miles.
    pub distance_nm: f64,
    /// Mean reported speed over the session in knots.
    pub speed: f64,
}

/// Fuel consumption booked against a session. Multiple rows may share a
/// session id and are summed on join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelRecord {
    pub session_id: SessionId,
    /// Consumed quantity in kilograms.
    pub consumed_kg: f64,
    pub fuel_type: String,
}
