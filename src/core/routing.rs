//! Extra cable length pulled out of clamp spans when sag grows under g-load.

use crate::core::constants::REFERENCE_G_LOAD;
use crate::domain::model::{Computed, GuardReason};
use serde::{Deserialize, Serialize};

/// Clamped cable run between fixed supports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingGeometry {
    pub g_load: f64,
    pub spans: u32,
    pub clamp_spacing_m: f64,
    /// Mid-span sag at 1 G (m).
    pub sag_at_1g_m: f64,
}

impl RoutingGeometry {
    pub fn delta_length_m(&self) -> f64 {
        routing_delta_length(self.g_load, self.spans, self.clamp_spacing_m, self.sag_at_1g_m)
    }
}

/// Shallow-parabola arc length excess of one span with sag `sag_m`.
pub fn span_excess_length(sag_m: f64, span_m: f64) -> f64 {
    (8.0 * sag_m * sag_m) / (3.0 * span_m)
}

pub fn routing_delta_length_checked(
    g_load: f64,
    spans: u32,
    clamp_spacing_m: f64,
    sag_at_1g_m: f64,
) -> Computed {
    if spans == 0 || !(clamp_spacing_m > 0.0) || !(sag_at_1g_m >= 0.0) {
        return Computed::Guarded(GuardReason::InvalidGeometry);
    }

    // no relief modelled below the reference load
    let g = g_load.max(REFERENCE_G_LOAD);
    let per_span = span_excess_length(sag_at_1g_m, clamp_spacing_m) * (g * g - 1.0);
    Computed::Value(spans as f64 * per_span)
}

/// Extra length (m) between 1 G sag and `g_load` sag over `spans` spans.
pub fn routing_delta_length(
    g_load: f64,
    spans: u32,
    clamp_spacing_m: f64,
    sag_at_1g_m: f64,
) -> f64 {
    let result = routing_delta_length_checked(g_load, spans, clamp_spacing_m, sag_at_1g_m);
    if let Some(reason) = result.guard_reason() {
        tracing::trace!("routing delta length guarded: {}", reason);
    }
    result.value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_load_adds_no_length() {
        for &(n, d, s1) in &[(1u32, 0.5, 0.002), (10, 0.05, 0.0), (50, 5.0, 0.05)] {
            assert_eq!(routing_delta_length(1.0, n, d, s1), 0.0);
        }
    }

    #[test]
    fn test_sub_one_g_is_clamped() {
        assert_eq!(routing_delta_length(0.2, 10, 0.5, 0.002), 0.0);
        assert_eq!(routing_delta_length(-3.0, 10, 0.5, 0.002), 0.0);
    }

    #[test]
    fn test_known_value() {
        // 8 * 0.002^2 / (3 * 0.5) = 2.1333e-5 per span, times (3^2 - 1) = 8, times 10 spans
        let dl = routing_delta_length(3.0, 10, 0.5, 0.002);
        assert!((dl - 1.706_666_666e-3).abs() < 1e-9, "got {}", dl);
    }

    #[test]
    fn test_monotonic_in_g() {
        let mut previous = routing_delta_length(1.0, 12, 0.4, 0.003);
        let mut g = 1.0;
        while g <= 15.0 {
            let current = routing_delta_length(g, 12, 0.4, 0.003);
            assert!(current >= previous);
            previous = current;
            g += 0.25;
        }
    }

    #[test]
    fn test_invalid_geometry_is_guarded() {
        assert!(routing_delta_length_checked(2.0, 0, 0.5, 0.002).is_guarded());
        assert!(routing_delta_length_checked(2.0, 5, 0.0, 0.002).is_guarded());
        assert!(routing_delta_length_checked(2.0, 5, 0.5, -0.001).is_guarded());
        assert_eq!(routing_delta_length(2.0, 5, -1.0, 0.002), 0.0);
    }

    #[test]
    fn test_geometry_struct_delegates() {
        let route = RoutingGeometry {
            g_load: 3.0,
            spans: 10,
            clamp_spacing_m: 0.5,
            sag_at_1g_m: 0.002,
        };
        assert_eq!(route.delta_length_m(), routing_delta_length(3.0, 10, 0.5, 0.002));
    }
}
