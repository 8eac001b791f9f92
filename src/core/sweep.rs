use crate::core::line::skin_loss_factor;
use crate::core::phase::{phase_for_cable, PhaseSetup};
use crate::domain::model::{Series, SweepRequest};
use crate::domain::ports::CableLookup;
use crate::utils::error::Result;

/// Velocity-factor phase model evaluated across a frequency sweep.
///
/// Returns index-aligned `(frequencies_ghz, phases_deg)`, low to high.
pub fn sweep_phase_vs_frequency<C>(
    catalog: &C,
    request: &SweepRequest,
    setup: &PhaseSetup,
) -> Result<(Vec<f64>, Vec<f64>)>
where
    C: CableLookup + ?Sized,
{
    let cable = catalog.resolve(&setup.cable_type)?;
    if request.point_count < SweepRequest::MIN_POINTS {
        tracing::debug!(
            "sweep point count {} raised to {}",
            request.point_count,
            SweepRequest::MIN_POINTS
        );
    }

    let freqs = request.frequencies_ghz()?;
    let phases = freqs
        .iter()
        .map(|&f| phase_for_cable(cable, f, setup).value())
        .collect();

    tracing::debug!(
        "phase sweep of {} over {} points",
        cable.name,
        freqs.len()
    );
    Ok((freqs, phases))
}

pub fn phase_sweep_series<C>(
    catalog: &C,
    request: &SweepRequest,
    setup: &PhaseSetup,
) -> Result<Series>
where
    C: CableLookup + ?Sized,
{
    let (freqs, phases) = sweep_phase_vs_frequency(catalog, request, setup)?;
    Ok(Series::phase_vs_frequency(setup.title(), freqs, phases))
}

/// Conductor loss factor of one cable across a frequency sweep.
pub fn sweep_skin_loss_vs_frequency<C>(
    catalog: &C,
    request: &SweepRequest,
    cable_type: &str,
) -> Result<Series>
where
    C: CableLookup + ?Sized,
{
    let cable = catalog.resolve(cable_type)?;
    let freqs = request.frequencies_ghz()?;
    let losses = freqs
        .iter()
        .map(|&f| skin_loss_factor(cable, f * 1e9))
        .collect();

    Ok(Series::new(
        format!("{} | skin loss", cable.name),
        Series::FREQUENCY_AXIS,
        Series::SKIN_LOSS_AXIS,
        freqs,
        losses,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::CableCatalog;
    use crate::core::phase::compute_phase_deg;
    use crate::utils::error::SimError;

    #[test]
    fn test_sweep_matches_point_queries() {
        let catalog = CableCatalog::builtin();
        let setup = PhaseSetup {
            delta_t_c: 35.0,
            g_load: 4.0,
            ..PhaseSetup::default()
        };
        let (freqs, phases) =
            sweep_phase_vs_frequency(&catalog, &SweepRequest::new(0.1, 3.0, 30), &setup).unwrap();
        assert_eq!(freqs.len(), 30);
        assert_eq!(phases.len(), 30);
        for (f, p) in freqs.iter().zip(&phases) {
            assert_eq!(*p, compute_phase_deg(&catalog, *f, &setup).unwrap());
        }
    }

    #[test]
    fn test_sweep_reversed_bounds() {
        let catalog = CableCatalog::builtin();
        let (freqs, _) = sweep_phase_vs_frequency(
            &catalog,
            &SweepRequest::new(5.0, 1.0, 9),
            &PhaseSetup::default(),
        )
        .unwrap();
        assert_eq!(freqs[0], 1.0);
        assert!((freqs[8] - 5.0).abs() < 1e-12);
        assert!(freqs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_sweep_clamps_point_count() {
        let catalog = CableCatalog::builtin();
        for n in [0, 1, 2] {
            let (freqs, phases) = sweep_phase_vs_frequency(
                &catalog,
                &SweepRequest::new(1.0, 2.0, n),
                &PhaseSetup::default(),
            )
            .unwrap();
            assert_eq!(freqs, vec![1.0, 2.0]);
            assert_eq!(phases.len(), 2);
        }
    }

    #[test]
    fn test_sweep_through_zero_stays_finite() {
        let catalog = CableCatalog::builtin();
        let setup = PhaseSetup {
            delta_t_c: 20.0,
            ..PhaseSetup::default()
        };
        let (freqs, phases) =
            sweep_phase_vs_frequency(&catalog, &SweepRequest::new(-1.0, 1.0, 3), &setup).unwrap();
        assert_eq!(freqs, vec![-1.0, 0.0, 1.0]);
        assert_eq!(phases[0], 0.0);
        assert_eq!(phases[1], 0.0);
        assert!(phases.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_sweep_unknown_cable() {
        let catalog = CableCatalog::builtin();
        let setup = PhaseSetup {
            cable_type: "missing".to_string(),
            ..PhaseSetup::default()
        };
        let request = SweepRequest::new(1.0, 2.0, 5);
        assert!(sweep_phase_vs_frequency(&catalog, &request, &setup).is_err());
    }

    #[test]
    fn test_oversized_sweep_is_rejected() {
        let catalog = CableCatalog::builtin();
        let request = SweepRequest::new(0.1, 3.0, 50_000_000);
        let result = sweep_phase_vs_frequency(&catalog, &request, &PhaseSetup::default());
        assert!(matches!(result, Err(SimError::ValidationError { .. })));

        let loss = sweep_skin_loss_vs_frequency(&catalog, &request, "RG-58");
        assert!(matches!(loss, Err(SimError::ValidationError { .. })));
    }

    #[test]
    fn test_series_carries_title_and_axes() {
        let catalog = CableCatalog::builtin();
        let series =
            phase_sweep_series(&catalog, &SweepRequest::new(0.1, 3.0, 10), &PhaseSetup::default())
                .unwrap();
        assert_eq!(series.title, "RG-58 | L=5.00m | ΔT=0.0°C | G=1.0");
        assert_eq!(series.x_label, Series::FREQUENCY_AXIS);
        assert_eq!(series.len(), 10);
    }

    #[test]
    fn test_skin_loss_sweep_increases() {
        let catalog = CableCatalog::builtin();
        let series =
            sweep_skin_loss_vs_frequency(&catalog, &SweepRequest::new(0.1, 3.0, 20), "LMR-400")
                .unwrap();
        assert!(series.y.windows(2).all(|w| w[0] < w[1]));
    }
}
