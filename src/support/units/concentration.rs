use uom::si::{
    f64::{MolarConcentration, Ratio},
    molar_concentration::{mole_per_cubic_meter, mole_per_liter},
    ratio::ratio,
};

/// Liters in one cubic meter.
pub const LITERS_PER_CUBIC_METER: f64 = 1000.0;

/// Converts a mole fraction to molarity given the liquid molar density in mol/m³.
#[inline]
#[must_use]
pub fn mole_fraction_to_molarity(mole_fraction: f64, molar_density: f64) -> f64 {
    mole_fraction * molar_density / LITERS_PER_CUBIC_METER
}

/// Converts molarity back to a mole fraction given the liquid molar density in mol/m³.
///
/// A zero molar density yields an infinite or `NaN` result.
#[inline]
#[must_use]
pub fn molarity_to_mole_fraction(molarity: f64, molar_density: f64) -> f64 {
    molarity / (molar_density / LITERS_PER_CUBIC_METER)
}

/// Typed counterparts of the raw conversions for code that holds [`uom`] quantities.
///
/// ```
/// use twine_reactive_transport::support::units::MolarConcentrationExt;
/// use uom::si::{
///     f64::{MolarConcentration, Ratio},
///     molar_concentration::{mole_per_cubic_meter, mole_per_liter},
///     ratio::ratio,
/// };
///
/// let density = MolarConcentration::new::<mole_per_cubic_meter>(55_000.0);
/// let c = density.solute_molarity(Ratio::new::<ratio>(1e-4));
/// assert!((c.get::<mole_per_liter>() - 5.5e-3).abs() < 1e-15);
/// ```
pub trait MolarConcentrationExt {
    /// Molarity of a solute present at `mole_fraction` in a liquid of this molar density.
    fn solute_molarity(self, mole_fraction: Ratio) -> MolarConcentration;

    /// Mole fraction of a solute at `molarity` in a liquid of this molar density.
    fn solute_mole_fraction(self, molarity: MolarConcentration) -> Ratio;
}

impl MolarConcentrationExt for MolarConcentration {
    fn solute_molarity(self, mole_fraction: Ratio) -> MolarConcentration {
        MolarConcentration::new::<mole_per_liter>(mole_fraction_to_molarity(
            mole_fraction.get::<ratio>(),
            self.get::<mole_per_cubic_meter>(),
        ))
    }

    fn solute_mole_fraction(self, molarity: MolarConcentration) -> Ratio {
        Ratio::new::<ratio>(molarity_to_mole_fraction(
            molarity.get::<mole_per_liter>(),
            self.get::<mole_per_cubic_meter>(),
        ))
    }
}
