use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use strum::{AsRefStr, EnumString, IntoStaticStr};

use crate::Coordinates;

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
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
pub enum RiskLevel {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl RiskLevel {
    /// Discretization shared by zone risk and vessel biofouling scores.
    pub fn from_score(score: f64) -> RiskLevel {
        if score >= 70. {
            RiskLevel::Critical
        } else if score >= 50. {
            RiskLevel::High
        } else if score >= 30. {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Representative water conditions of a coastal zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalConditions {
    /// Sea surface temperature in degrees Celsius.
    pub temperature: f64,
    /// Chlorophyll-a concentration in mg/m3.
    pub chlorophyll: f64,
    /// Salinity in PSU.
    pub salinity: f64,
}

/// Fouling-growth risk of a set of water conditions on a 0-100 scale.
///
/// Warm water contributes up to 40 points, nutrient load (chlorophyll) up to
/// 35 and salinity up to 25 when inside the 30-36 PSU optimum for fouling
/// organisms. Deterministic and side-effect free; distinct from the vessel
/// biofouling score, which weighs operational history instead.
pub fn environmental_risk_score(conditions: &EnvironmentalConditions) -> f64 {
    let temperature: f64 = match conditions.temperature {
        t if t >= 28. => 40.,
        t if t >= 24. => 30.,
        t if t >= 21. => 20.,
        t if t >= 18. => 10.,
        _ => 0.,
    };

    let chlorophyll = match conditions.chlorophyll {
        c if c >= 3. => 35.,
        c if c >= 2. => 25.,
        c if c >= 1. => 15.,
        c if c >= 0.5 => 5.,
        _ => 0.,
    };

    let salinity = match conditions.salinity {
        s if (30.0..=36.0).contains(&s) => 25.,
        s if (28.0..=38.0).contains(&s) => 15.,
        _ => 5.,
    };

    (temperature + chlorophyll + salinity).clamp(0., 100.)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneBounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl ZoneBounds {
    pub fn contains(&self, point: &Coordinates) -> bool {
        point.latitude >= self.min_latitude
            && point.latitude <= self.max_latitude
            && point.longitude >= self.min_longitude
            && point.longitude <= self.max_longitude
    }
}

/// Named coastal zone with its representative conditions and the risk
/// derived from them at construction time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Zone {
    pub name: String,
    pub bounds: ZoneBounds,
    pub conditions: EnvironmentalConditions,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
}

impl Zone {
    pub fn new(
        name: impl Into<String>,
        bounds: ZoneBounds,
        conditions: EnvironmentalConditions,
    ) -> Self {
        let risk_score = environmental_risk_score(&conditions);
        Self {
            name: name.into(),
            bounds,
            conditions,
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
        }
    }

    /// Medium-risk placeholder returned for points outside every zone.
    pub fn open_water() -> Self {
        Self::new(
            "Open Water",
            ZoneBounds {
                min_latitude: -90.,
                max_latitude: 90.,
                min_longitude: -180.,
                max_longitude: 180.,
            },
            EnvironmentalConditions {
                temperature: 22.,
                chlorophyll: 0.3,
                salinity: 35.,
            },
        )
    }
}

/// Ordered, immutable zone reference table. Lookup is first match wins, so
/// overlapping boxes resolve to the earlier entry.
#[derive(Debug, Clone)]
pub struct ZoneTable {
    zones: Vec<Zone>,
    fallback: Zone,
}

impl ZoneTable {
    pub fn new(zones: Vec<Zone>, fallback: Zone) -> Self {
        Self { zones, fallback }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn fallback(&self) -> &Zone {
        &self.fallback
    }

    pub fn locate(&self, point: &Coordinates) -> &Zone {
        self.zones
            .iter()
            .find(|z| z.bounds.contains(point))
            .unwrap_or(&self.fallback)
    }

    /// Built-in reference table for the Brazilian coast, north to south.
    pub fn brazil_coast() -> Self {
        let zone = |name: &str, bounds: [f64; 4], conditions: [f64; 3]| {
            Zone::new(
                name,
                ZoneBounds {
                    min_latitude: bounds[0],
                    max_latitude: bounds[1],
                    min_longitude: bounds[2],
                    max_longitude: bounds[3],
                },
                EnvironmentalConditions {
                    temperature: conditions[0],
                    chlorophyll: conditions[1],
                    salinity: conditions[2],
                },
            )
        };

        Self::new(
            vec![
                zone("Costa Amazônica", [-1.5, 5.0, -52.0, -46.0], [28.5, 4.5, 28.0]),
                zone("São Luís", [-3.0, -1.5, -46.0, -42.0], [28.2, 2.6, 33.0]),
                zone("Fortaleza", [-5.0, -2.5, -42.0, -37.0], [28.0, 1.2, 36.5]),
                zone("Pernambuco", [-9.0, -6.0, -38.0, -34.5], [27.8, 2.4, 36.0]),
                zone("Baía de Todos os Santos", [-14.0, -11.5, -39.5, -37.0], [26.5, 3.2, 35.0]),
                zone("Espírito Santo", [-21.5, -17.5, -41.5, -38.0], [25.0, 1.8, 36.0]),
                zone("Baía de Guanabara", [-23.2, -21.5, -44.5, -41.5], [24.0, 5.0, 32.0]),
                zone("Santos", [-25.5, -23.2, -47.5, -44.5], [23.0, 3.5, 33.5]),
                zone("Paranaguá", [-27.0, -25.5, -49.0, -47.5], [21.5, 2.8, 30.0]),
                zone("Rio Grande", [-34.0, -28.0, -54.0, -49.0], [19.0, 2.0, 29.0]),
            ],
            Zone::open_water(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(temperature: f64, chlorophyll: f64, salinity: f64) -> EnvironmentalConditions {
        EnvironmentalConditions {
            temperature,
            chlorophyll,
            salinity,
        }
    }

    #[test]
    fn warm_eutrophic_optimum_salinity_scores_full_marks() {
        assert_eq!(environmental_risk_score(&conditions(29., 4., 33.)), 100.);
    }

    #[test]
    fn cold_clear_brackish_water_scores_low() {
        let score = environmental_risk_score(&conditions(12., 0.1, 10.));
        assert_eq!(score, 5.);
        assert_eq!(RiskLevel::from_score(score), RiskLevel::Low);
    }

    #[test]
    fn score_is_monotone_in_temperature() {
        let mut prev = 0.;
        for temperature in [10., 18., 20., 21., 24., 27., 28., 31.] {
            let score = environmental_risk_score(&conditions(temperature, 1.5, 33.));
            assert!(score >= prev, "score decreased at {temperature}");
            prev = score;
        }
    }

    #[test]
    fn risk_level_thresholds() {
        assert_eq!(RiskLevel::from_score(0.), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30.), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(50.), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(70.), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(100.), RiskLevel::Critical);
    }

    #[test]
    fn suape_anchorage_is_in_the_pernambuco_zone() {
        let table = ZoneTable::brazil_coast();

        let zone = table.locate(&Coordinates {
            latitude: -8.38,
            longitude: -34.95,
        });

        assert_eq!(zone.name, "Pernambuco");
    }

    #[test]
    fn mid_atlantic_point_falls_back_to_open_water() {
        let table = ZoneTable::brazil_coast();

        let zone = table.locate(&Coordinates {
            latitude: -15.0,
            longitude: -20.0,
        });

        assert_eq!(zone.name, "Open Water");
        assert_eq!(zone.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn first_matching_zone_wins_on_overlap() {
        let bounds = ZoneBounds {
            min_latitude: -10.,
            max_latitude: 0.,
            min_longitude: -40.,
            max_longitude: -30.,
        };
        let table = ZoneTable::new(
            vec![
                Zone::new("first", bounds, conditions(25., 1., 33.)),
                Zone::new("second", bounds, conditions(18., 1., 33.)),
            ],
            Zone::open_water(),
        );

        let zone = table.locate(&Coordinates {
            latitude: -5.,
            longitude: -35.,
        });
        assert_eq!(zone.name, "first");
    }
}
