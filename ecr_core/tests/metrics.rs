use ecr_core::{
    AnalysisCfg, EcrReading, EcrStream, Measurement, MechReading, MetricError, MetricOutcome,
    SkipReason,
};
use rstest::rstest;

/// Build a dataset with a 1 um particle (strain = displacement / 1000)
/// from `(strain, resistance)` rows; `None` leaves that sample without
/// electrical data.
fn dataset(rows: &[(f64, Option<f64>)]) -> Measurement {
    let mechs: Vec<MechReading> = rows
        .iter()
        .enumerate()
        .map(|(i, (strain, _))| MechReading {
            time: i as f64,
            force: 1.0,
            displacement: strain * 1000.0,
        })
        .collect();
    let readings: Vec<EcrReading> = rows
        .iter()
        .enumerate()
        .filter_map(|(i, (_, r))| {
            r.map(|ohm| EcrReading {
                time: i as f64,
                current: 1.0,
                voltage: ohm,
            })
        })
        .collect();
    let stream = EcrStream {
        sweep: None,
        readings,
    };
    Measurement::build("t", &mechs, Some(stream), 1.0, AnalysisCfg::default())
}

#[rstest]
fn threshold_strain_finds_first_crossing() {
    let mut m = dataset(&[
        (0.1, Some(20.0)),
        (0.2, Some(18.0)),
        (0.3, Some(12.0)),
        (0.4, Some(8.0)),
    ]);
    let out = m.threshold_strain(15.0);
    assert_eq!(out, MetricOutcome::Recorded(0.3));
    assert_eq!(
        m.statistics().get("Strain under 15 Ohm threshold"),
        Some(0.3)
    );
}

#[rstest]
fn threshold_strain_not_found_leaves_statistics_untouched() {
    let mut m = dataset(&[(0.1, Some(20.0)), (0.2, Some(18.0))]);
    let out = m.threshold_strain(5.0);
    assert_eq!(
        out,
        MetricOutcome::NotFound(SkipReason::ThresholdNeverCrossed)
    );
    assert!(m.statistics().is_empty());
}

#[rstest]
fn strain_metrics_not_applicable_without_particle_size() {
    let mechs = [MechReading {
        time: 0.0,
        force: 1.0,
        displacement: 100.0,
    }];
    let mut m = Measurement::build("t", &mechs, None, 0.0, AnalysisCfg::default());
    assert_eq!(m.threshold_strain(10.0), MetricOutcome::NotApplicable);
    assert_eq!(m.resistance_at_strain(0.2), MetricOutcome::NotApplicable);
    assert!(m.statistics().is_empty());
}

#[rstest]
fn resistance_at_strain_interpolates_midpoint_exactly() {
    let mut m = dataset(&[(0.1, Some(10.0)), (0.3, Some(30.0))]);
    let out = m.resistance_at_strain(0.2);
    let MetricOutcome::Recorded(v) = out else {
        panic!("expected recorded value, got {out:?}");
    };
    assert!((v - 20.0).abs() < 1e-9);
    let stored = m.statistics().get("Resistance at 0.2 strain").unwrap();
    assert!((stored - 20.0).abs() < 1e-9);
}

#[rstest]
fn resistance_at_strain_skips_gaps_to_nearest_neighbors() {
    // The crossing sample (0.25) and its immediate predecessor lack
    // resistance; interpolation must reach out to 0.18 and 0.28.
    let mut m = dataset(&[
        (0.1, Some(10.0)),
        (0.18, Some(18.0)),
        (0.22, None),
        (0.25, None),
        (0.28, Some(28.0)),
    ]);
    let out = m.resistance_at_strain(0.2);
    // Line through (0.18, 18) and (0.28, 28): R(s) = 100*s.
    let MetricOutcome::Recorded(v) = out else {
        panic!("expected recorded value, got {out:?}");
    };
    assert!((v - 20.0).abs() < 1e-9);
}

#[rstest]
fn resistance_at_strain_strain_never_reached() {
    let mut m = dataset(&[(0.1, Some(10.0)), (0.3, Some(30.0))]);
    assert_eq!(
        m.resistance_at_strain(0.5),
        MetricOutcome::NotFound(SkipReason::StrainNeverReached)
    );
    assert!(m.statistics().is_empty());
}

#[rstest]
fn resistance_at_strain_abandons_at_end_of_dataset() {
    // Strain crosses at index 1 but nothing at or after it carries a
    // resistance value.
    let mut m = dataset(&[(0.1, Some(10.0)), (0.3, None), (0.4, None)]);
    assert_eq!(
        m.resistance_at_strain(0.2),
        MetricOutcome::NotFound(SkipReason::EndOfDataset)
    );
}

#[rstest]
fn resistance_at_strain_rejects_distant_neighbors() {
    // Preceding neighbor at strain 0.05 is 0.35 away from the target,
    // beyond the 0.1 tolerance.
    let mut m = dataset(&[(0.05, Some(5.0)), (0.45, Some(45.0))]);
    assert_eq!(
        m.resistance_at_strain(0.4),
        MetricOutcome::NotFound(SkipReason::NeighborsTooFar)
    );
    assert!(m.statistics().is_empty());
}

#[rstest]
fn min_resistance_records_dataset_minimum() {
    let mut m = dataset(&[
        (0.1, Some(20.0)),
        (0.2, Some(8.0)),
        (0.3, None),
        (0.4, Some(12.0)),
    ]);
    assert_eq!(m.min_resistance(), MetricOutcome::Recorded(8.0));
    assert_eq!(m.statistics().get("Min R"), Some(8.0));
}

#[rstest]
fn min_resistance_without_data_records_nothing() {
    let mut m = dataset(&[(0.1, None), (0.2, None)]);
    assert_eq!(
        m.min_resistance(),
        MetricOutcome::NotFound(SkipReason::NoResistanceData)
    );
    assert!(m.statistics().is_empty());
}

fn mech_fd(time: f64, force: f64, displacement: f64) -> MechReading {
    MechReading {
        time,
        force,
        displacement,
    }
}

#[rstest]
fn recovery_ratio_from_peak_force_displacement() {
    let mechs = [
        mech_fd(0.0, 1.0, 10.0),
        mech_fd(1.0, 5.0, 100.0), // peak force
        mech_fd(2.0, 2.0, 60.0),
        mech_fd(3.0, 0.1, 20.0),
    ];
    let mut m = Measurement::build("t", &mechs, None, 0.0, AnalysisCfg::default());
    assert_eq!(m.max_force_index(), Some(1));
    let ratio = m.recovery_ratio().unwrap();
    assert!((ratio - 0.8).abs() < 1e-12);
    assert_eq!(m.statistics().get("Recovery ratio"), Some(ratio));
}

#[rstest]
fn max_force_ties_resolve_to_first_occurrence() {
    let mechs = [
        mech_fd(0.0, 5.0, 30.0),
        mech_fd(1.0, 5.0, 80.0),
        mech_fd(2.0, 1.0, 10.0),
    ];
    let m = Measurement::build("t", &mechs, None, 0.0, AnalysisCfg::default());
    assert_eq!(m.max_force_index(), Some(0));
}

#[rstest]
fn recovery_ratio_zero_peak_displacement_is_fatal() {
    let mechs = [mech_fd(0.0, 5.0, 0.0), mech_fd(1.0, 1.0, 3.0)];
    let mut m = Measurement::build("t", &mechs, None, 0.0, AnalysisCfg::default());
    assert_eq!(m.recovery_ratio(), Err(MetricError::ZeroPeakDisplacement));
    assert!(m.statistics().is_empty());
}

#[rstest]
fn recovery_ratio_on_empty_dataset_is_fatal() {
    let mut m = Measurement::build("t", &[], None, 0.0, AnalysisCfg::default());
    assert_eq!(m.recovery_ratio(), Err(MetricError::EmptyDataset));
}

#[rstest]
fn clean_keeps_only_samples_with_resistance_in_order() {
    let mut m = dataset(&[
        (0.1, Some(10.0)),
        (0.2, None),
        (0.3, Some(30.0)),
        (0.4, None),
        (0.5, Some(50.0)),
    ]);
    assert_eq!(m.len(), 5);
    m.clean();
    assert_eq!(m.len(), 3);
    let resistances: Vec<f64> = m
        .samples()
        .iter()
        .map(|s| s.resistance.unwrap())
        .collect();
    assert_eq!(resistances, vec![10.0, 30.0, 50.0]);
}
