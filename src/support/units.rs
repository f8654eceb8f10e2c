//! Concentration unit conversions between transport and chemistry.
//!
//! Transport carries solutes as a mole fraction (mol solute per mol liquid,
//! dimensionless). Chemistry works in molarity (mol solute per liter of
//! liquid). Liquid molar density, stored in mol/m³, links the two:
//!
//! ```text
//! molarity [mol/L] = mole_fraction [-] * molar_density [mol/m³] / 1000 [L/m³]
//! ```
//!
//! The scalar functions here are the per-cell kernels used by the
//! concentration bridge. They perform exactly the arithmetic above, in that
//! order, with no clamping and no guard against a zero molar density.
//!
//! ```
//! use twine_reactive_transport::support::units::{mole_fraction_to_molarity, molarity_to_mole_fraction};
//!
//! let c = mole_fraction_to_molarity(0.002, 1000.0);
//! assert_eq!(c, 0.002);
//! assert_eq!(molarity_to_mole_fraction(c, 1000.0), 0.002);
//! ```

mod concentration;

pub use concentration::{
    LITERS_PER_CUBIC_METER, MolarConcentrationExt, mole_fraction_to_molarity,
    molarity_to_mole_fraction,
};
