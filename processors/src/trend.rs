use std::collections::HashMap;

use chrono::{DateTime, Datelike, Months, Utc};
use hullguard_core::{
    FuelRecord, Mean, RiskLevel, SessionId, SessionKind, SessionRecord, TrendLabel, VesselAnalysis,
    VesselClass, VesselId,
};
use itertools::Itertools;
use serde::Serialize;
use tracing::instrument;

use crate::TrendSettings;

/// Sessions slower than this are excluded from the navigation series; they
/// are drifting or maneuvering, not sailing.
static NAVIGATION_SPEED_FLOOR: f64 = 5.;

static SPEED_TREND_BAND: f64 = 0.05;
static EFFICIENCY_TREND_BAND: f64 = 0.10;

/// Derives speed/fuel degradation, a biofouling score and a cleaning
/// prediction from one vessel's operational history.
#[derive(Debug, Clone)]
pub struct VesselTrendAnalyzer {
    settings: TrendSettings,
    reference_time: DateTime<Utc>,
}

/// Aggregated navigation metrics of one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyMetrics {
    pub year: i32,
    pub month: u32,
    pub mean_speed: f64,
    pub consumption_kg: f64,
    pub distance_nm: f64,
    /// Fuel per distance; higher is worse. 0 when the month has no distance.
    pub efficiency: f64,
}

impl VesselTrendAnalyzer {
    pub fn new(settings: TrendSettings) -> Self {
        Self::with_reference_time(settings, Utc::now())
    }

    /// Pins the "now" used for elapsed-time terms and the cleaning
    /// prediction, keeping analyses reproducible.
    pub fn with_reference_time(settings: TrendSettings, reference_time: DateTime<Utc>) -> Self {
        Self {
            settings,
            reference_time,
        }
    }

    #[instrument(skip_all, fields(vessel_id = %vessel_id, sessions = sessions.len()))]
    pub fn analyze(
        &self,
        vessel_id: VesselId,
        class: VesselClass,
        sessions: &[SessionRecord],
        fuel_records: &[FuelRecord],
    ) -> VesselAnalysis {
        let mut analysis = VesselAnalysis::neutral(vessel_id, class, self.reference_time);

        let Some(first_session) = sessions.iter().map(|s| s.start).min() else {
            return analysis;
        };

        let fuel_by_session = sum_fuel_by_session(fuel_records);
        let navigation = navigation_sessions(sessions, &fuel_by_session);

        // Fuel rows without a matching session are dropped silently.
        analysis.total_fuel_consumed_kg = sessions
            .iter()
            .filter_map(|s| fuel_by_session.get(&s.session_id))
            .sum();
        analysis.port_days = sessions
            .iter()
            .filter(|s| s.kind == SessionKind::Port)
            .map(|s| s.duration_hours)
            .sum::<f64>()
            / 24.;

        let days_since_first = ((self.reference_time - first_session).num_seconds() as f64
            / 86_400.)
            .max(0.);

        let months = monthly_metrics(&navigation);
        analysis.months_with_data = months.len();

        if !months.is_empty() {
            let window = self.settings.window_months.min(months.len());
            let baseline = &months[..window];
            // The current window never overlaps the baseline; a vessel whose
            // whole history fits the baseline has no degradation yet.
            let tail = &months[window..];
            let current = if tail.is_empty() {
                baseline
            } else {
                &tail[tail.len() - window.min(tail.len())..]
            };

            let baseline_speed = baseline
                .iter()
                .map(|m| m.mean_speed)
                .mean()
                .unwrap_or(self.settings.default_service_speed);
            let current_speed = current.iter().map(|m| m.mean_speed).mean().unwrap_or(0.);

            if baseline_speed > 0. {
                analysis.speed_degradation_pct =
                    ((baseline_speed - current_speed) / baseline_speed * 100.).max(0.);
            }

            let baseline_efficiency = baseline.iter().map(|m| m.efficiency).mean().unwrap_or(0.);
            let current_efficiency = current.iter().map(|m| m.efficiency).mean().unwrap_or(0.);

            if baseline_efficiency > 0. {
                // Deliberately unfloored: a negative value means the vessel
                // burns less fuel per mile than in its baseline period.
                analysis.efficiency_degradation_pct =
                    (current_efficiency - baseline_efficiency) / baseline_efficiency * 100.;
            }

            analysis.predicted_cleaning =
                self.predict_cleaning(&months, baseline_speed, current_speed);
        }

        if navigation.len() >= self.settings.min_trend_sessions {
            let (first_half, second_half) = navigation.split_at(navigation.len() / 2);
            analysis.speed_trend = speed_trend(
                first_half.iter().map(|(s, _)| s.speed).mean().unwrap_or(0.),
                second_half
                    .iter()
                    .map(|(s, _)| s.speed)
                    .mean()
                    .unwrap_or(0.),
            );
            analysis.efficiency_trend =
                efficiency_trend(half_efficiency(first_half), half_efficiency(second_half));
        }

        analysis.biofouling_score = biofouling_score(
            analysis.speed_degradation_pct,
            analysis.port_days,
            days_since_first,
        );
        analysis.risk_level = RiskLevel::from_score(analysis.biofouling_score);

        analysis
    }

    /// Monthly navigation metrics, exposed for chart rendering.
    pub fn monthly_series(
        &self,
        sessions: &[SessionRecord],
        fuel_records: &[FuelRecord],
    ) -> Vec<MonthlyMetrics> {
        let fuel_by_session = sum_fuel_by_session(fuel_records);
        monthly_metrics(&navigation_sessions(sessions, &fuel_by_session))
    }

    /// Extrapolates the trailing per-month speed delta. Only a negative
    /// trend yields a date: the month current speed would cross the
    /// configured share of the baseline, at least one month out.
    fn predict_cleaning(
        &self,
        months: &[MonthlyMetrics],
        baseline_speed: f64,
        current_speed: f64,
    ) -> Option<DateTime<Utc>> {
        if months.len() < 2 || baseline_speed <= 0. {
            return None;
        }

        let deltas: Vec<f64> = months
            .windows(2)
            .map(|pair| pair[1].mean_speed - pair[0].mean_speed)
            .collect();
        let window = self.settings.window_months.min(deltas.len());
        let delta = deltas[deltas.len() - window..].iter().copied().mean()?;

        if delta >= 0. {
            return None;
        }

        let target = baseline_speed * self.settings.cleaning_speed_ratio;
        let months_left = ((current_speed - target) / -delta).ceil().max(1.);

        self.reference_time
            .checked_add_months(Months::new(months_left as u32))
    }
}

/// Weighs hull-drag symptoms (speed loss), exposure in port and time since
/// the observation period began into a 0-100 fouling score. Independent of
/// the environmental zone risk score, whose inputs are water conditions.
pub fn biofouling_score(speed_degradation_pct: f64, port_days: f64, days_since_first: f64) -> f64 {
    let drag = (speed_degradation_pct * 3.).min(100.);
    let exposure = (port_days / 30. * 100.).min(100.);
    let age = (days_since_first / 365. * 100.).min(100.);

    (0.5 * drag + 0.2 * exposure + 0.3 * age).round().clamp(0., 100.)
}

fn sum_fuel_by_session(fuel_records: &[FuelRecord]) -> HashMap<&SessionId, f64> {
    let mut sums: HashMap<&SessionId, f64> = HashMap::with_capacity(fuel_records.len());
    for record in fuel_records {
        *sums.entry(&record.session_id).or_default() += record.consumed_kg;
    }
    sums
}

/// Navigation sessions with their summed fuel attached, ordered by start
/// time. Sessions without fuel rows join against 0.
fn navigation_sessions<'a>(
    sessions: &'a [SessionRecord],
    fuel_by_session: &HashMap<&SessionId, f64>,
) -> Vec<(&'a SessionRecord, f64)> {
    sessions
        .iter()
        .filter(|s| s.kind == SessionKind::Navigation && s.speed > NAVIGATION_SPEED_FLOOR)
        .sorted_by_key(|s| s.start)
        .map(|s| (s, fuel_by_session.get(&s.session_id).copied().unwrap_or(0.)))
        .collect()
}

fn monthly_metrics(navigation: &[(&SessionRecord, f64)]) -> Vec<MonthlyMetrics> {
    navigation
        .iter()
        .chunk_by(|(s, _)| (s.start.year(), s.start.month()))
        .into_iter()
        .map(|((year, month), group)| {
            let group: Vec<_> = group.collect();

            let mean_speed = group.iter().map(|(s, _)| s.speed).mean().unwrap_or(0.);
            let consumption_kg: f64 = group.iter().map(|(_, fuel)| fuel).sum();
            let distance_nm: f64 = group.iter().map(|(s, _)| s.distance_nm).sum();
            let efficiency = if distance_nm > 0. {
                consumption_kg / distance_nm
            } else {
                0.
            };

            MonthlyMetrics {
                year,
                month,
                mean_speed,
                consumption_kg,
                distance_nm,
                efficiency,
            }
        })
        .collect()
}

fn half_efficiency(half: &[(&SessionRecord, f64)]) -> f64 {
    let distance: f64 = half.iter().map(|(s, _)| s.distance_nm).sum();
    if distance > 0. {
        half.iter().map(|(_, fuel)| fuel).sum::<f64>() / distance
    } else {
        0.
    }
}

fn speed_trend(first_half: f64, second_half: f64) -> TrendLabel {
    if first_half <= 0. {
        TrendLabel::Stable
    } else if second_half < first_half * (1. - SPEED_TREND_BAND) {
        TrendLabel::Degrading
    } else if second_half > first_half * (1. + SPEED_TREND_BAND) {
        TrendLabel::Improving
    } else {
        TrendLabel::Stable
    }
}

fn efficiency_trend(first_half: f64, second_half: f64) -> TrendLabel {
    if first_half <= 0. {
        TrendLabel::Stable
    } else if second_half > first_half * (1. + EFFICIENCY_TREND_BAND) {
        TrendLabel::Degrading
    } else if second_half < first_half * (1. - EFFICIENCY_TREND_BAND) {
        TrendLabel::Improving
    } else {
        TrendLabel::Stable
    }
}
