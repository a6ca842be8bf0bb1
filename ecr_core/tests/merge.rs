use ecr_core::{AnalysisCfg, EcrReading, EcrStream, Measurement, MechReading, SweepDecl};
use rstest::rstest;

fn mech(time: f64) -> MechReading {
    MechReading {
        time,
        force: 0.0,
        displacement: 0.0,
    }
}

fn ecr(time: f64, current: f64, voltage: f64) -> EcrReading {
    EcrReading {
        time,
        current,
        voltage,
    }
}

fn build(mech: &[MechReading], readings: Vec<EcrReading>) -> Measurement {
    let stream = EcrStream {
        sweep: None,
        readings,
    };
    Measurement::build("t", mech, Some(stream), 0.0, AnalysisCfg::default())
}

#[rstest]
fn electrical_reading_lands_on_closest_mechanical_sample() {
    let mechs: Vec<_> = [0.00, 0.05, 0.10, 0.15].map(mech).into();
    let m = build(&mechs, vec![ecr(0.052, 2.0, 10.0)]);

    let s = &m.samples()[1];
    assert_eq!(s.current, Some(2.0));
    assert_eq!(s.voltage, Some(10.0));
    assert_eq!(s.resistance, Some(5.0));
    // Neighbors untouched
    assert!(m.samples()[0].current.is_none());
    assert!(m.samples()[2].current.is_none());
}

#[rstest]
fn reading_outside_tolerance_is_dropped() {
    let mechs: Vec<_> = [0.0, 1.0].map(mech).into();
    let m = build(&mechs, vec![ecr(0.5, 1.0, 5.0)]);
    assert!(m.samples().iter().all(|s| s.current.is_none()));
}

#[rstest]
fn zero_current_leaves_resistance_absent() {
    let mechs = [mech(0.0)];
    let m = build(&mechs, vec![ecr(0.0, 0.0, 3.3)]);
    let s = &m.samples()[0];
    assert_eq!(s.current, Some(0.0));
    assert_eq!(s.voltage, Some(3.3));
    assert!(s.resistance.is_none());
}

#[rstest]
#[case(1e-6, 1.0)] // 1 MOhm: overflow noise
#[case(-1.0, 5.0)] // negative: noise
#[case(1.0, 1000.0)] // band edge is exclusive
fn implausible_resistance_is_never_stored(#[case] current: f64, #[case] voltage: f64) {
    let mechs = [mech(0.0)];
    let m = build(&mechs, vec![ecr(0.0, current, voltage)]);
    let s = &m.samples()[0];
    assert_eq!(s.current, Some(current));
    assert!(s.resistance.is_none());
}

#[rstest]
fn successive_readings_match_non_decreasing_indices() {
    // Mechanical sampled at 100 Hz, electrical at ~37 Hz.
    let mechs: Vec<_> = (0..100).map(|i| mech(i as f64 * 0.01)).collect();
    let readings: Vec<_> = (0..37)
        .map(|i| ecr(i as f64 * 0.027, 1.0, 1.0))
        .collect();
    let m = build(&mechs, readings);

    let matched: Vec<usize> = m
        .samples()
        .iter()
        .enumerate()
        .filter(|(_, s)| s.current.is_some())
        .map(|(i, _)| i)
        .collect();
    assert!(!matched.is_empty());
    assert!(matched.windows(2).all(|w| w[0] < w[1]));
}

#[rstest]
fn missing_electrical_stream_yields_mechanical_only_dataset() {
    let mechs: Vec<_> = [0.0, 0.01].map(mech).into();
    let m = Measurement::build("t", &mechs, None, 0.0, AnalysisCfg::default());
    assert_eq!(m.len(), 2);
    assert!(m.samples().iter().all(|s| s.current.is_none()));
    assert!(!m.sweep_found());
}

#[rstest]
fn sweep_boundary_toggles_recording_even_without_a_match() {
    let mechs: Vec<_> = [0.0, 0.01].map(mech).into();
    let stream = EcrStream {
        sweep: Some(SweepDecl {
            start_time: 5.0,
            end_time: 5.5,
        }),
        // All far outside the mechanical window; none can match.
        readings: vec![
            ecr(5.0, 0.001, 0.1),
            ecr(5.2, 0.002, 0.2),
            ecr(5.4, 0.0, 0.3), // zero current: not recorded
            ecr(5.6, 0.004, 0.4), // past end: recording already off
        ],
    };
    let m = Measurement::build("t", &mechs, Some(stream), 0.0, AnalysisCfg::default());
    assert!(m.sweep_found());
    assert_eq!(m.sweep_pairs(), &[(0.001, 0.1), (0.002, 0.2)]);
}
