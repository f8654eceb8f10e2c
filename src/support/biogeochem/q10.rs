use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

use crate::support::constraint::{Constrained, StrictlyPositive};

/// Multiplier applied to a biological rate at temperature `t`, relative to `t_ref`.
///
/// The rate changes by a factor of `q10` for every 10 K of warming:
/// `q10^(0.1 * (t - t_ref))`.
///
/// ```
/// use twine_reactive_transport::support::{biogeochem::q10_effect, constraint::StrictlyPositive};
/// use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};
///
/// let q10 = StrictlyPositive::new(2.0).unwrap();
/// let t_ref = ThermodynamicTemperature::new::<kelvin>(283.15);
/// let t = ThermodynamicTemperature::new::<kelvin>(293.15);
/// assert!((q10_effect(q10, t, t_ref) - 2.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn q10_effect(
    q10: Constrained<f64, StrictlyPositive>,
    t: ThermodynamicTemperature,
    t_ref: ThermodynamicTemperature,
) -> f64 {
    let delta = t.get::<kelvin>() - t_ref.get::<kelvin>();
    q10.into_inner().powf(0.1 * delta)
}
