use std::sync::Arc;

use chrono::{DateTime, Utc};
use hullguard_core::{
    FleetSummary, FuelRecord, RawPositionRecord, SessionRecord, StopEpisode, StopSummary,
    VesselAnalysis, VesselClass, VesselId, ZoneTable,
};
use tokio::task::JoinSet;
use tracing::{error, instrument};

use crate::{
    BuiltRoute, Error, Result, Settings, StopDetector, StopZoneAssessment, TrajectoryBuilder,
    VesselTrendAnalyzer, ZoneClassifier, error::error::MissingVesselDataSnafu, summarize,
};

static DEFAULT_NUM_WORKERS: u32 = 8;

/// Everything the engine needs for one vessel.
#[derive(Debug, Clone)]
pub struct VesselInput {
    pub vessel_id: VesselId,
    pub class: VesselClass,
    pub positions: Vec<RawPositionRecord>,
    pub sessions: Vec<SessionRecord>,
    pub fuel_records: Vec<FuelRecord>,
}

impl VesselInput {
    fn has_records(&self) -> bool {
        !self.positions.is_empty() || !self.sessions.is_empty()
    }
}

/// All per-vessel outputs of one pipeline run.
#[derive(Debug, Clone)]
pub struct VesselReport {
    pub vessel_id: VesselId,
    pub route: BuiltRoute,
    pub stops: Vec<StopEpisode>,
    pub stop_summary: StopSummary,
    pub stop_zones: Vec<StopZoneAssessment>,
    pub analysis: VesselAnalysis,
}

#[derive(Debug)]
pub struct FleetReport {
    pub vessels: Vec<VesselReport>,
    /// Vessels for which no analysis was possible (no records at all).
    pub skipped: Vec<VesselId>,
    pub summary: FleetSummary,
}

/// Fans per-vessel pipelines out over a pool of workers. Pipelines only
/// touch their own vessel's records, so no ordering is needed between them;
/// within one vessel the stages run strictly in sequence.
pub struct FleetRunner {
    settings: Settings,
    zones: Arc<ZoneTable>,
    reference_time: DateTime<Utc>,
}

impl FleetRunner {
    pub fn new(settings: Settings, zones: Arc<ZoneTable>) -> Self {
        Self::with_reference_time(settings, zones, Utc::now())
    }

    pub fn with_reference_time(
        settings: Settings,
        zones: Arc<ZoneTable>,
        reference_time: DateTime<Utc>,
    ) -> Self {
        Self {
            settings,
            zones,
            reference_time,
        }
    }

    #[instrument(skip_all, fields(vessels = inputs.len()))]
    pub async fn run(&self, inputs: Vec<VesselInput>) -> FleetReport {
        let num_workers = self.settings.num_workers.unwrap_or(DEFAULT_NUM_WORKERS);

        let (input_tx, input_rx) = async_channel::unbounded();
        let (report_tx, report_rx) = async_channel::unbounded();

        let mut set = JoinSet::new();

        for _ in 0..num_workers {
            let input_rx = input_rx.clone();
            let report_tx = report_tx.clone();
            let pipeline =
                VesselPipeline::new(&self.settings, self.zones.clone(), self.reference_time);

            set.spawn(async move {
                while let Ok(input) = input_rx.recv().await {
                    // Only errors when all receivers are dropped, which
                    // cannot happen while the orchestrator still drains them.
                    report_tx.send(pipeline.process(input)).await.unwrap();
                }
            });
        }

        for input in inputs {
            // The receiver is still in scope, so the channel cannot be
            // closed yet.
            input_tx.send(input).await.unwrap();
        }

        // Workers exit once the input channel is drained and closed.
        drop(input_tx);
        drop(report_tx);

        let mut vessels = Vec::new();
        let mut skipped = Vec::new();

        while let Ok(outcome) = report_rx.recv().await {
            match outcome {
                Ok(report) => vessels.push(report),
                Err(Error::MissingVesselData { vessel_id, .. }) => {
                    error!("no analysis possible for vessel '{vessel_id}'");
                    skipped.push(vessel_id);
                }
            }
        }

        while let Some(res) = set.join_next().await {
            if let Err(e) = res {
                error!("vessel pipeline worker failed: {e:?}");
            }
        }

        vessels.sort_by(|a, b| a.vessel_id.cmp(&b.vessel_id));
        skipped.sort();

        let analyses: Vec<_> = vessels.iter().map(|v| v.analysis.clone()).collect();
        let summary = summarize(&analyses);

        FleetReport {
            vessels,
            skipped,
            summary,
        }
    }
}

/// The strictly sequential stages of one vessel's analysis.
struct VesselPipeline {
    builder: TrajectoryBuilder,
    detector: StopDetector,
    classifier: ZoneClassifier,
    analyzer: VesselTrendAnalyzer,
}

impl VesselPipeline {
    fn new(settings: &Settings, zones: Arc<ZoneTable>, reference_time: DateTime<Utc>) -> Self {
        Self {
            builder: TrajectoryBuilder::new(settings.trajectory),
            detector: StopDetector::new(settings.stops),
            classifier: ZoneClassifier::new(zones),
            analyzer: VesselTrendAnalyzer::with_reference_time(settings.trend, reference_time),
        }
    }

    fn process(&self, input: VesselInput) -> Result<VesselReport> {
        if !input.has_records() {
            return MissingVesselDataSnafu {
                vessel_id: input.vessel_id,
            }
            .fail();
        }

        let route = self.builder.build(input.vessel_id.clone(), input.positions);
        let stops = self.detector.detect(&route.trajectory);
        let stop_summary = StopSummary::from_episodes(&stops);
        let stop_zones = self.classifier.classify_stops(&stops);
        let analysis = self.analyzer.analyze(
            input.vessel_id.clone(),
            input.class,
            &input.sessions,
            &input.fuel_records,
        );

        Ok(VesselReport {
            vessel_id: input.vessel_id,
            route,
            stops,
            stop_summary,
            stop_zones,
            analysis,
        })
    }
}
