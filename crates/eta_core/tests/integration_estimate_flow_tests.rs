mod support;

use std::sync::Arc;

use eta_core::{
    match_location, Day, EstimateOutcome, EstimatorConfig, EtaError, EtaEstimator, EtaRequest,
    FailureKind, HourMultiplierTable, MatchResult, RawRouteResult, RouteLookup, RouteLookupError,
};
use support::fixtures::{estimator, reference_table, DataDir};

#[test]
fn weekday_peak_estimate() {
    let outcome = estimator().estimate(&EtaRequest::new(
        "Koramangala",
        "Indiranagar",
        Day::Mon,
        Some("08"),
    ));
    let estimate = match outcome {
        EstimateOutcome::Complete(estimate) => estimate,
        other => panic!("expected complete outcome, got {other:?}"),
    };
    assert_eq!(estimate.factor.average_tti, 1.3);
    assert_eq!(estimate.factor.hour_multiplier, 2.3);
    assert_eq!(estimate.factor.final_factor, 2.99);
    assert_eq!(estimate.adjusted_eta_minutes, Some(30));
    assert_eq!(estimate.raw_eta_text, "10 min");
    assert_eq!(estimate.distance_text, "5.1 km");
    assert_eq!(estimate.matched_pickup.road.as_deref(), Some("Sony World Junction"));
    assert_eq!(estimate.matched_drop.area.as_deref(), Some("Indiranagar"));
}

#[test]
fn weekend_unmatched_estimate() {
    let outcome = estimator().estimate(&EtaRequest::new(
        "Hebbal",
        "Yelahanka",
        Day::Sat,
        Some("14"),
    ));
    let estimate = match outcome {
        EstimateOutcome::Complete(estimate) => estimate,
        other => panic!("expected complete outcome, got {other:?}"),
    };
    assert_eq!(estimate.factor.average_tti, 1.0);
    assert_eq!(estimate.factor.final_factor, 1.9);
    assert_eq!(estimate.adjusted_eta_minutes, Some(38));
    assert_eq!(estimate.route_description_text, "(11 km) via Bellary Rd");
    assert_eq!(estimate.matched_pickup.area, None);
    assert_eq!(estimate.matched_drop.road, None);
}

#[test]
fn unparsable_raw_eta_is_partial_success() {
    let outcome = estimator().estimate(&EtaRequest::new(
        "Whitefield",
        "MG Road",
        Day::Sat,
        Some("10"),
    ));
    match &outcome {
        EstimateOutcome::Partial { estimate, reason } => {
            assert_eq!(reason.kind, FailureKind::EtaParse);
            assert_eq!(estimate.raw_eta_text, "about an hour");
            assert_eq!(estimate.distance_text, "18 km");
            assert_eq!(estimate.adjusted_eta_minutes, None);
            // Whitefield 1.6 on Sat, MG Road has only a Sunday row.
            assert_eq!(estimate.factor.average_tti, 1.3);
        }
        other => panic!("expected partial outcome, got {other:?}"),
    }
    assert_eq!(
        outcome.reason().map(|r| r.user_message()),
        Some("Traffic adjustment unavailable for this ETA.")
    );
}

#[test]
fn unknown_route_is_total_failure() {
    let outcome = estimator().estimate(&EtaRequest::new(
        "Jayanagar",
        "Hebbal",
        Day::Wed,
        Some("09"),
    ));
    let reason = outcome.reason().expect("failure reason");
    assert!(outcome.estimate().is_none());
    assert_eq!(reason.kind, FailureKind::RouteLookup);
    assert_eq!(
        reason.user_message(),
        "Could not fetch data. Please check the input or try again."
    );
}

struct TimingOut;

impl RouteLookup for TimingOut {
    fn lookup(&self, _pickup: &str, _drop: &str) -> Result<RawRouteResult, RouteLookupError> {
        Err(RouteLookupError::Timeout)
    }
}

#[test]
fn provider_timeout_is_reported_not_raised() {
    let estimator = EtaEstimator::with_table(reference_table(), Some(Box::new(TimingOut)));
    let outcome = estimator.estimate(&EtaRequest::new(
        "Koramangala",
        "Indiranagar",
        Day::Mon,
        Some("08"),
    ));
    match outcome {
        EstimateOutcome::Failed { reason } => {
            assert_eq!(reason.kind, FailureKind::RouteLookup);
            assert!(reason.message.contains("timed out"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn empty_drop_is_rejected_before_matching() {
    let outcome = estimator().estimate(&EtaRequest::new("Koramangala", "", Day::Mon, Some("08")));
    assert_eq!(outcome.reason().map(|r| r.kind), Some(FailureKind::InvalidRequest));
    assert!(matches!(
        estimator().factor(&EtaRequest::new("", "Hebbal", Day::Mon, None)),
        Err(EtaError::InvalidRequest(_))
    ));
}

#[test]
fn pipeline_matches_untrimmed_text() {
    let estimator = estimator();
    let table = reference_table();
    let request = EtaRequest::new("Road ", "Nowhere", Day::Sat, Some("14"));

    let breakdown = estimator.factor(&request).expect("factor");
    assert_eq!(match_location(&table, "Road ", Day::Sat), MatchResult::NoMatch);
    assert_eq!(breakdown.pickup, MatchResult::NoMatch);
    assert_eq!(breakdown.factor.average_tti, 1.0);
    assert_eq!(breakdown.factor.final_factor, 1.9);

    // Without the trailing space the Saturday Whitefield row matches.
    let trimmed = estimator
        .factor(&EtaRequest::new("Road", "Nowhere", Day::Sat, Some("14")))
        .expect("factor");
    assert_eq!(trimmed.pickup.travel_time_index(), 1.6);
}

#[test]
fn outcome_serializes_with_status_tag() {
    let outcome = estimator().estimate(&EtaRequest::new(
        "Koramangala",
        "Indiranagar",
        Day::Mon,
        Some("08"),
    ));
    let json = serde_json::to_value(&outcome).expect("serialize");
    assert_eq!(json["status"], "complete");
    assert_eq!(json["adjusted_eta_minutes"], 30);
    assert_eq!(json["matched_pickup"]["area"], "Koramangala");
    let back: EstimateOutcome = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, outcome);
}

#[test]
fn estimator_from_config_file() {
    let data = DataDir::new();
    let config = EstimatorConfig::from_file(&data.path("config.json")).expect("config");
    let estimator = EtaEstimator::from_config(&config).expect("estimator");
    let outcome = estimator.estimate(&EtaRequest::new(
        "koramangala",
        "INDIRANAGAR",
        Day::Mon,
        Some("18"),
    ));
    // 1.3 * 2.4 = 3.12; 10 min -> 31.2 -> 31
    assert_eq!(outcome.estimate().and_then(|e| e.adjusted_eta_minutes), Some(31));
}

#[test]
fn missing_reference_file_is_fatal() {
    let data = DataDir::new();
    let config = EstimatorConfig {
        reference_path: Some(data.path("absent.csv").display().to_string()),
        ..EstimatorConfig::default()
    };
    assert!(matches!(
        EtaEstimator::from_config(&config),
        Err(EtaError::DataLoad { .. })
    ));
    assert!(matches!(
        EtaEstimator::from_config(&EstimatorConfig::default()),
        Err(EtaError::DataLoad { .. })
    ));
}

#[test]
fn reloaded_table_applies_to_later_requests() {
    let data = DataDir::new();
    let estimator = estimator();
    let handle = estimator.table_handle();
    let before = handle.snapshot();

    let replacement = data.write(
        "reference_v2.csv",
        "day,Area Name,Road/Intersection Name,Travel Time Index\nMon,Hebbal,Flyover,2.0\n",
    );
    handle.reload_from_path(&replacement).expect("reload");

    assert_eq!(before.len(), 6);
    assert_eq!(estimator.match_text("hebbal", Day::Mon).travel_time_index(), 2.0);
    assert!(!estimator.match_text("koramangala", Day::Mon).is_match());

    let bad = data.write("broken.csv", "day,Area Name\nMon,Hebbal\n");
    assert!(handle.reload_from_path(&bad).is_err());
    assert_eq!(handle.snapshot().len(), 1);
}

#[test]
fn estimator_is_shareable_across_threads() {
    let estimator = Arc::new(estimator());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let estimator = Arc::clone(&estimator);
            std::thread::spawn(move || {
                estimator
                    .estimate(&EtaRequest::new("Koramangala", "Indiranagar", Day::Mon, Some("08")))
                    .estimate()
                    .and_then(|e| e.adjusted_eta_minutes)
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().expect("thread"), Some(30));
    }
    assert_eq!(estimator.multipliers(), &HourMultiplierTable::standard());
}
