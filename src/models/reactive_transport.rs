//! Reactive transport coupling.
//!
//! [`CoupledReactiveTransport`] advances a transport composite and a chemistry
//! composite over a subsurface and an overland domain in sequence, converting
//! the exchanged concentration between mole fraction and molarity.
//!
//! The computational core is in the internal `core` module. [`JointTimestep`]
//! exposes the coupled timestep rule as a [`twine_core::Model`].

pub(crate) mod core;

use std::convert::Infallible;

use twine_core::Model;

#[cfg(feature = "alquimia")]
pub use self::core::{EngineHandle, EngineLink, ReactionEngine};
pub use self::core::{
    BACKOFF_RATIO, BridgeError, ChemistrySubKernel, Child, ChildKind, CoupledReactiveTransport,
    CouplerConfig, CouplerError, Domain, DomainKeys, DomainPair, DualDomainChemistry,
    DualDomainTransport, JointDt, KernelError, MOLAR_DENSITY_LIQUID, PairingError, ProcessKernel,
    SUBCYCLING_TAG, StepOutcome, TOTAL_COMPONENT_CONCENTRATION, TimestepProposal,
    TransportSubKernel,
};

/// Model adapter for the coupled timestep rule.
///
/// Produces the same step as [`CoupledReactiveTransport::get_dt`] without
/// needing the kernels themselves.
///
/// # Example
///
/// ```
/// use twine_core::Model;
/// use twine_reactive_transport::models::reactive_transport::{
///     JointTimestep, JointTimestepInput, TimestepProposal,
/// };
/// use uom::si::{f64::Time, time::second};
///
/// let proposal =
///     TimestepProposal::new(Time::new::<second>(10.0), Time::new::<second>(5.0)).unwrap();
/// let dt = JointTimestep { subcycling: false }
///     .call(&JointTimestepInput {
///         proposal,
///         last_chemistry_succeeded: true,
///     })
///     .unwrap();
///
/// assert_eq!(dt.step.get::<second>(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JointTimestep {
    /// Whether transport subcycles within the chemistry step.
    pub subcycling: bool,
}

/// Input to [`JointTimestep`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointTimestepInput {
    /// Timesteps preferred by transport and chemistry.
    pub proposal: TimestepProposal,

    /// Whether chemistry completed the previous step.
    pub last_chemistry_succeeded: bool,
}

impl Model for JointTimestep {
    type Input = JointTimestepInput;
    type Output = JointDt;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self::core::joint_dt(
            input.proposal,
            input.last_chemistry_succeeded,
            self.subcycling,
        ))
    }
}
