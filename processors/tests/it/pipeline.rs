use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use hullguard_core::{
    FuelRecord, RawPositionRecord, RiskLevel, SessionKind, SessionRecord, TrendLabel, VesselClass,
    VesselId, ZoneTable,
};
use processors::{FleetRunner, Settings, VesselInput};

use crate::init_tracing;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 20, 0, 0, 0).unwrap()
}

fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap()
}

fn runner() -> FleetRunner {
    FleetRunner::with_reference_time(
        Settings::default(),
        Arc::new(ZoneTable::brazil_coast()),
        reference_time(),
    )
}

fn position(
    timestamp: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
    speed: f64,
) -> RawPositionRecord {
    RawPositionRecord {
        timestamp: Some(timestamp),
        latitude: Some(latitude),
        longitude: Some(longitude),
        speed: Some(speed),
        heading: None,
    }
}

/// Five hours at the Suape anchorage, a transit south, then a reporting gap
/// followed by two more positions.
fn tanker_positions() -> Vec<RawPositionRecord> {
    let mut positions = Vec::new();

    for i in 0..5 {
        positions.push(position(
            t0() + Duration::hours(i),
            -8.38,
            -34.95,
            0.5,
        ));
    }
    for i in 5..9 {
        positions.push(position(
            t0() + Duration::hours(i),
            -8.38 - (i - 4) as f64 * 0.2,
            -34.95,
            12.,
        ));
    }
    positions.push(position(t0() + Duration::hours(9), -17.0, -39.0, 12.));
    positions.push(position(t0() + Duration::hours(10), -17.1, -39.0, 12.));

    positions
}

/// One navigation session per month, speeds 14/14/14/10, burning 10 kg/nm in
/// the baseline months and 12.5 in the degraded one.
fn tanker_history() -> (Vec<SessionRecord>, Vec<FuelRecord>) {
    let speeds = [14., 14., 14., 10.];
    let mut sessions = Vec::new();
    let mut fuel_records = Vec::new();

    for (i, speed) in speeds.into_iter().enumerate() {
        let start = Utc
            .with_ymd_and_hms(2025, i as u32 + 1, 15, 0, 0, 0)
            .unwrap();
        let session_id = format!("s{i}");

        sessions.push(SessionRecord {
            vessel_id: "NT Itaperuna".into(),
            session_id: session_id.as_str().into(),
            kind: SessionKind::Navigation,
            start,
            end: start + Duration::hours(24),
            duration_hours: 24.,
            distance_nm: 24. * speed,
            speed,
        });

        let per_nm = if i < 3 { 10. } else { 12.5 };
        fuel_records.push(FuelRecord {
            session_id: session_id.as_str().into(),
            consumed_kg: 24. * speed * per_nm,
            fuel_type: "VLSFO".into(),
        });
    }

    (sessions, fuel_records)
}

#[tokio::test]
async fn fleet_run_produces_reports_and_summary() {
    init_tracing();

    let (sessions, fuel_records) = tanker_history();
    let tanker = VesselInput {
        vessel_id: "NT Itaperuna".into(),
        class: VesselClass::Suezmax,
        positions: tanker_positions(),
        sessions,
        fuel_records,
    };

    let drifting_start = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
    let drifter = VesselInput {
        vessel_id: "NT Ataulfo".into(),
        class: VesselClass::Aframax,
        positions: (0..10)
            .map(|i| RawPositionRecord::test_default(drifting_start + Duration::hours(i)))
            .collect(),
        sessions: vec![
            SessionRecord::test_default(&"NT Ataulfo".into(), "d0", drifting_start),
            SessionRecord::test_default(
                &"NT Ataulfo".into(),
                "d1",
                drifting_start + Duration::days(3),
            ),
        ],
        fuel_records: vec![FuelRecord::test_default("d0")],
    };

    let ghost = VesselInput {
        vessel_id: "NT Fantasma".into(),
        class: VesselClass::Unknown,
        positions: Vec::new(),
        sessions: Vec::new(),
        fuel_records: Vec::new(),
    };

    let report = runner().run(vec![tanker, drifter, ghost]).await;

    assert_eq!(report.vessels.len(), 2);
    assert_eq!(report.skipped, vec![VesselId::from("NT Fantasma")]);
    assert_eq!(report.summary.vessels, 2);

    // Reports come back sorted by vessel id regardless of worker order.
    assert_eq!(report.vessels[0].vessel_id.as_ref(), "NT Ataulfo");
    assert_eq!(report.vessels[1].vessel_id.as_ref(), "NT Itaperuna");
}

#[tokio::test]
async fn tanker_pipeline_end_to_end() {
    init_tracing();

    let (sessions, fuel_records) = tanker_history();
    let report = runner()
        .run(vec![VesselInput {
            vessel_id: "NT Itaperuna".into(),
            class: VesselClass::Suezmax,
            positions: tanker_positions(),
            sessions,
            fuel_records,
        }])
        .await;

    let vessel = &report.vessels[0];

    // The reporting gap splits the route while the trajectory keeps all
    // retained points.
    assert_eq!(vessel.route.trajectory.len(), 11);
    assert_eq!(vessel.route.segments.len(), 2);
    assert!(vessel.route.segments.iter().all(|s| s.len() >= 2));

    // The anchorage dwell becomes one episode inside the Pernambuco zone.
    assert_eq!(vessel.stops.len(), 1);
    assert_eq!(vessel.stop_summary.count, 1);
    assert_eq!(vessel.stop_summary.total_minutes, 300.);
    assert_eq!(vessel.stop_zones[0].zone_name, "Pernambuco");

    // Speed dropped from 14 to 10 knots between baseline and current.
    let analysis = &vessel.analysis;
    assert!((analysis.speed_degradation_pct - 28.5714).abs() < 1e-3);
    assert!((analysis.efficiency_degradation_pct - 25.).abs() < 1e-9);
    assert_eq!(analysis.risk_level, RiskLevel::High);
    assert!(analysis.predicted_cleaning.is_some());

    assert_eq!(report.summary.risk_counts.high, 1);
    assert!((report.summary.avg_speed_degradation_pct - 28.5714).abs() < 1e-3);
}

#[tokio::test]
async fn drifting_vessel_without_history_stays_low_risk() {
    init_tracing();

    let start = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
    let report = runner()
        .run(vec![VesselInput {
            vessel_id: "NT Ataulfo".into(),
            class: VesselClass::Aframax,
            positions: (0..10)
                .map(|i| RawPositionRecord::test_default(start + Duration::hours(i)))
                .collect(),
            sessions: vec![SessionRecord::test_default(
                &"NT Ataulfo".into(),
                "d0",
                start,
            )],
            fuel_records: Vec::new(),
        }])
        .await;

    let analysis = &report.vessels[0].analysis;

    assert_eq!(analysis.speed_degradation_pct, 0.);
    assert_eq!(analysis.speed_trend, TrendLabel::Stable);
    assert_eq!(analysis.risk_level, RiskLevel::Low);
    assert_eq!(analysis.predicted_cleaning, None);
}

#[tokio::test]
async fn reports_serialize_for_the_monitoring_app() {
    init_tracing();

    let (sessions, fuel_records) = tanker_history();
    let report = runner()
        .run(vec![VesselInput {
            vessel_id: "NT Itaperuna".into(),
            class: VesselClass::Suezmax,
            positions: tanker_positions(),
            sessions,
            fuel_records,
        }])
        .await;

    let route = serde_json::to_value(&report.vessels[0].route).unwrap();
    assert_eq!(route["statistics"]["retained_count"], 11);

    let summary = serde_json::to_value(report.summary).unwrap();
    assert_eq!(summary["vessels"], 1);
    assert_eq!(summary["risk_counts"]["high"], 1);
}
