use thiserror::Error;
use uom::si::{
    f64::{Length, ThermodynamicTemperature},
    thermodynamic_temperature::kelvin,
};

/// Errors from permafrost depth searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PermafrostError {
    /// The temperature and depth profiles describe different numbers of layers.
    #[error("profile length mismatch: {temperatures} temperatures, {depths} depths")]
    LengthMismatch { temperatures: usize, depths: usize },
}

/// Freezing point of soil water used when no other threshold is given (273.15 K).
#[must_use]
pub fn freezing_point() -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<kelvin>(273.15)
}

/// Index of the shallowest layer colder than `freeze_temp`.
///
/// Layers are ordered from the surface downward. Returns `None` when no
/// layer is below `freeze_temp`.
#[must_use]
pub fn permafrost_depth_index(
    temperatures: &[ThermodynamicTemperature],
    freeze_temp: ThermodynamicTemperature,
) -> Option<usize> {
    temperatures.iter().position(|&t| t < freeze_temp)
}

/// Depth of the shallowest layer colder than `freeze_temp`.
///
/// `depths[i]` is the depth of layer `i`. Returns `Ok(None)` when the whole
/// column is thawed.
///
/// # Errors
///
/// Returns [`PermafrostError::LengthMismatch`] if the profiles differ in length.
pub fn permafrost_depth(
    temperatures: &[ThermodynamicTemperature],
    depths: &[Length],
    freeze_temp: ThermodynamicTemperature,
) -> Result<Option<Length>, PermafrostError> {
    if temperatures.len() != depths.len() {
        return Err(PermafrostError::LengthMismatch {
            temperatures: temperatures.len(),
            depths: depths.len(),
        });
    }

    Ok(permafrost_depth_index(temperatures, freeze_temp).map(|i| depths[i]))
}
