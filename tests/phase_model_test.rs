use coax_phase_sim::core::routing::RoutingGeometry;
use coax_phase_sim::core::phase::StrainCoefficients;
use coax_phase_sim::domain::model::SweepRequest;
use coax_phase_sim::{
    compute_phase_deg, routed_phase_deg, strain_phase_deg, sweep_phase_vs_frequency, CableCatalog,
    PhaseSetup, SimError,
};

fn setup(cable: &str) -> PhaseSetup {
    PhaseSetup {
        cable_type: cable.to_string(),
        ..PhaseSetup::default()
    }
}

#[test]
fn test_reference_state_has_no_phase_shift() -> anyhow::Result<()> {
    let catalog = CableCatalog::builtin();
    let mut s = setup("RG-58");
    s.spans = 0;

    for freq in [0.1, 1.0, 2.45, 10.0] {
        assert_eq!(compute_phase_deg(&catalog, freq, &s)?, 0.0);
    }

    // sag at 1 G is part of both branches
    s.spans = 10;
    assert_eq!(compute_phase_deg(&catalog, 1.0, &s)?, 0.0);
    Ok(())
}

#[test]
fn test_thermal_drift_matches_closed_form() -> anyhow::Result<()> {
    let catalog = CableCatalog::builtin();
    let mut s = setup("RG-58");
    s.spans = 0;
    s.delta_t_c = 10.0;

    let wavelength = 299_792_458.0 * 0.66 / 1e9;
    let expected = 360.0 * (5.0 * 50e-6 * 10.0) / wavelength;
    let got = compute_phase_deg(&catalog, 1.0, &s)?;
    assert!((got - expected).abs() < 1e-9, "got {}, expected {}", got, expected);
    Ok(())
}

#[test]
fn test_phase_is_wrapped_for_large_drifts() -> anyhow::Result<()> {
    let catalog = CableCatalog::builtin();
    let mut s = setup("RG-213");
    s.g_load = 9.0;

    for delta_t in [-55.0, -10.0, 0.0, 40.0, 125.0] {
        s.delta_t_c = delta_t;
        for freq in [0.5, 3.0, 18.0] {
            let dphi = compute_phase_deg(&catalog, freq, &s)?;
            assert!(dphi > -180.0 && dphi <= 180.0, "{} out of range", dphi);
        }
    }
    Ok(())
}

#[test]
fn test_non_positive_frequency_yields_zero() -> anyhow::Result<()> {
    let catalog = CableCatalog::builtin();
    let mut s = setup("LMR-400");
    s.delta_t_c = 30.0;
    assert_eq!(compute_phase_deg(&catalog, 0.0, &s)?, 0.0);
    assert_eq!(compute_phase_deg(&catalog, -2.0, &s)?, 0.0);
    Ok(())
}

#[test]
fn test_unknown_cable_is_an_error() {
    let catalog = CableCatalog::builtin();
    let err = compute_phase_deg(&catalog, 1.0, &setup("RG-6")).unwrap_err();
    match err {
        SimError::UnknownCable { name, available } => {
            assert_eq!(name, "RG-6");
            assert!(available.contains("RG-58"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_sweep_runs_low_to_high() -> anyhow::Result<()> {
    let catalog = CableCatalog::builtin();
    let mut s = setup("RG-400");
    s.delta_t_c = 20.0;

    let request = SweepRequest::new(3.0, 0.1, 50);
    let (freqs, phases) = sweep_phase_vs_frequency(&catalog, &request, &s)?;
    assert_eq!(freqs.len(), 50);
    assert_eq!(phases.len(), 50);
    assert_eq!(freqs[0], 0.1);
    assert!((freqs[49] - 3.0).abs() < 1e-12);
    assert!(freqs.windows(2).all(|w| w[0] <= w[1]));

    for (f, p) in freqs.iter().zip(&phases) {
        assert_eq!(*p, compute_phase_deg(&catalog, *f, &s)?);
    }
    Ok(())
}

#[test]
fn test_sweep_clamps_point_count() -> anyhow::Result<()> {
    let catalog = CableCatalog::builtin();
    let request = SweepRequest::new(1.0, 1.0, 0);
    let (freqs, _) = sweep_phase_vs_frequency(&catalog, &request, &setup("RG-58"))?;
    assert_eq!(freqs, vec![1.0, 1.0]);
    Ok(())
}

#[test]
fn test_sweep_with_unknown_cable_fails() {
    let catalog = CableCatalog::builtin();
    let request = SweepRequest::new(0.1, 3.0, 10);
    let result = sweep_phase_vs_frequency(&catalog, &request, &setup("nope"));
    assert!(result.is_err());
}

#[test]
fn test_strain_model_is_unwrapped() {
    // 10 m at 10 GHz with a big thermal swing exceeds one turn
    let coeffs = StrainCoefficients::thermal_only(17e-6);
    let dphi = strain_phase_deg(10e9, 10.0, 2.1, 100.0, 1.0, &coeffs);
    let beta = 2.0 * std::f64::consts::PI * 10e9 * 2.1f64.sqrt() / 299_792_458.0;
    let expected = (beta * 10.0 * 17e-6 * 100.0).to_degrees();
    assert!(dphi > 180.0);
    assert!((dphi - expected).abs() < 1e-6);
}

#[test]
fn test_strain_model_degenerate_inputs() {
    let coeffs = StrainCoefficients::default();
    assert_eq!(strain_phase_deg(0.0, 5.0, 2.1, 10.0, 1.0, &coeffs), 0.0);
    assert_eq!(strain_phase_deg(1e9, 0.0, 2.1, 10.0, 1.0, &coeffs), 0.0);
    assert_eq!(strain_phase_deg(1e9, 5.0, 0.0, 10.0, 1.0, &coeffs), 0.0);
    assert_eq!(strain_phase_deg(1e9, 5.0, 2.1, 0.0, 1.0, &coeffs), 0.0);
}

#[test]
fn test_routed_model_adds_route_and_thermal_terms() {
    let route = RoutingGeometry {
        g_load: 3.0,
        spans: 10,
        clamp_spacing_m: 0.5,
        sag_at_1g_m: 0.002,
    };
    let still = RoutingGeometry { g_load: 1.0, ..route };

    let thermal_only = routed_phase_deg(1e9, 5.0, 2.29, 25.0, 17e-6, &still);
    let route_only = routed_phase_deg(1e9, 5.0, 2.29, 0.0, 17e-6, &route);
    let both = routed_phase_deg(1e9, 5.0, 2.29, 25.0, 17e-6, &route);

    assert!(thermal_only > 0.0);
    assert!(route_only > 0.0);
    assert!((both - (thermal_only + route_only)).abs() < 1e-9);
}
