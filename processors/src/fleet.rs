use hullguard_core::{FleetSummary, Mean, VesselAnalysis};

/// Reduces the vessel analyses of one run into the fleet summary. An empty
/// fleet produces zeroed counts and averages, never NaN.
pub fn summarize(analyses: &[VesselAnalysis]) -> FleetSummary {
    let mut summary = FleetSummary {
        vessels: analyses.len(),
        ..Default::default()
    };

    for analysis in analyses {
        summary.risk_counts.increment(analysis.risk_level);
        summary.total_co2_impact_tonnes += analysis.co2_impact_tonnes;
    }

    summary.avg_biofouling_score = analyses
        .iter()
        .map(|a| a.biofouling_score)
        .mean()
        .unwrap_or(0.);
    summary.avg_speed_degradation_pct = analyses
        .iter()
        .map(|a| a.speed_degradation_pct)
        .mean()
        .unwrap_or(0.);
    summary.avg_efficiency_degradation_pct = analyses
        .iter()
        .map(|a| a.efficiency_degradation_pct)
        .mean()
        .unwrap_or(0.);

    summary
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use hullguard_core::{RiskLevel, VesselClass};

    use super::*;

    #[test]
    fn empty_fleet_summarizes_to_zero() {
        let summary = summarize(&[]);

        assert_eq!(summary, FleetSummary::default());
        assert!(summary.avg_biofouling_score.is_finite());
    }

    #[test]
    fn counts_and_averages() {
        let now = Utc::now();
        let mut low = VesselAnalysis::neutral("a".into(), VesselClass::Aframax, now);
        low.biofouling_score = 20.;
        low.speed_degradation_pct = 2.;
        low.co2_impact_tonnes = 100.;

        let mut critical = VesselAnalysis::neutral("b".into(), VesselClass::Suezmax, now);
        critical.biofouling_score = 80.;
        critical.risk_level = RiskLevel::Critical;
        critical.speed_degradation_pct = 30.;
        critical.efficiency_degradation_pct = -5.;
        critical.co2_impact_tonnes = 250.;

        let summary = summarize(&[low, critical]);

        assert_eq!(summary.vessels, 2);
        assert_eq!(summary.risk_counts.low, 1);
        assert_eq!(summary.risk_counts.critical, 1);
        assert_eq!(summary.risk_counts.high, 0);
        assert_eq!(summary.avg_biofouling_score, 50.);
        assert_eq!(summary.avg_speed_degradation_pct, 16.);
        assert_eq!(summary.avg_efficiency_degradation_pct, -2.5);
        assert_eq!(summary.total_co2_impact_tonnes, 350.);
    }
}
