//! Operator-split coupling of transport and chemistry.
//!
//! Each step advances transport over both domains, converts the transported
//! mole fractions to molarities, lets chemistry react them in place, and
//! converts the reacted molarities back into the authoritative field.
//!
//! A transport failure is fatal. A chemistry failure leaves the authoritative
//! field at its post-transport values and is reported as a failed step so the
//! caller can cut the timestep and retry.

mod bridge;
mod config;
mod domain;
#[cfg(feature = "alquimia")]
mod engine;
mod error;
mod outcome;
mod pairing;
mod timestep;
mod traits;

#[cfg(test)]
mod test_support;

pub use config::CouplerConfig;
pub use domain::{Domain, DomainPair};
#[cfg(feature = "alquimia")]
pub use engine::{EngineHandle, EngineLink, ReactionEngine};
pub use error::{BridgeError, ChildKind, CouplerError, KernelError, PairingError};
pub use outcome::StepOutcome;
pub use pairing::{
    Child, DomainKeys, MOLAR_DENSITY_LIQUID, SUBCYCLING_TAG, TOTAL_COMPONENT_CONCENTRATION,
};
pub use timestep::{BACKOFF_RATIO, JointDt, TimestepProposal};
pub use traits::{
    ChemistrySubKernel, DualDomainChemistry, DualDomainTransport, ProcessKernel,
    TransportSubKernel,
};

pub(crate) use timestep::joint_dt;

use tracing::{debug, error, warn};
use uom::si::{f64::Time, time::second};

use crate::support::state::{State, StateRoles};

use bridge::ConcentrationBridge;

/// Couples a two-domain transport composite with a two-domain chemistry composite.
///
/// The coupler owns both composites. Field data is never held between calls;
/// every operation that reads or writes fields takes the [`State`] to act on.
pub struct CoupledReactiveTransport<T, C> {
    name: String,
    transport: T,
    chemistry: C,
    subcycling: bool,
    bridge: ConcentrationBridge,
    chemistry_succeeded: bool,
    states: Option<StateRoles>,
}

impl<T, C> CoupledReactiveTransport<T, C>
where
    T: DualDomainTransport,
    C: DualDomainChemistry,
{
    /// Creates a coupler from its two children, selected by the configured indices.
    ///
    /// # Errors
    ///
    /// Returns a [`PairingError`] if the children do not match the
    /// configuration or either composite lacks a domain.
    pub fn new(
        name: impl Into<String>,
        config: CouplerConfig,
        children: Vec<Child<T, C>>,
    ) -> Result<Self, PairingError> {
        let (transport, chemistry) = pairing::split_children(&config, children)?;
        Self::from_parts(name, config, transport, chemistry)
    }

    /// Creates a coupler from already separated composites.
    ///
    /// The configured child indices are not consulted.
    ///
    /// # Errors
    ///
    /// Returns a [`PairingError`] if either composite lacks a domain.
    pub fn from_parts(
        name: impl Into<String>,
        config: CouplerConfig,
        transport: T,
        chemistry: C,
    ) -> Result<Self, PairingError> {
        let keys = pairing::resolve_domains(&transport, &chemistry)?;
        Ok(Self {
            name: name.into(),
            transport,
            chemistry,
            subcycling: config.transport_subcycling,
            bridge: ConcentrationBridge::new(keys),
            chemistry_succeeded: true,
            states: None,
        })
    }

    /// Name of this coupler.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The transport composite.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The chemistry composite.
    #[must_use]
    pub fn chemistry(&self) -> &C {
        &self.chemistry
    }

    /// Whether transport subcycles within the chemistry step.
    #[must_use]
    pub fn subcycling(&self) -> bool {
        self.subcycling
    }

    /// Field keys used on `domain`.
    #[must_use]
    pub fn domain_keys(&self, domain: Domain) -> &DomainKeys {
        self.bridge.keys(domain)
    }

    /// Whether chemistry completed the most recent step.
    ///
    /// True before the first step.
    #[must_use]
    pub fn last_chemistry_succeeded(&self) -> bool {
        self.chemistry_succeeded
    }

    /// Snapshot roles last passed to [`set_states`](Self::set_states).
    #[must_use]
    pub fn states(&self) -> Option<StateRoles> {
        self.states
    }

    /// Sets up transport, then chemistry.
    ///
    /// With the `alquimia` feature, each transport sub-kernel is then linked
    /// to the reaction engine of the chemistry sub-kernel on its domain.
    ///
    /// # Errors
    ///
    /// Returns [`CouplerError::SetupFailed`] if either composite fails to set
    /// up, or [`CouplerError::Pairing`] if an engine cannot be linked.
    pub fn setup(&mut self, state: &mut State) -> Result<(), CouplerError> {
        self.transport
            .setup(state)
            .map_err(|source| CouplerError::SetupFailed { source })?;
        self.chemistry
            .setup(state)
            .map_err(|source| CouplerError::SetupFailed { source })?;

        #[cfg(feature = "alquimia")]
        self.link_engines()?;

        Ok(())
    }

    #[cfg(feature = "alquimia")]
    fn link_engines(&mut self) -> Result<(), PairingError> {
        for domain in Domain::ALL {
            let chemistry = pairing::chemistry_sub(&self.chemistry, domain)?;
            let engine = chemistry
                .engine()
                .ok_or(PairingError::MissingEngine { domain })?;
            let link = EngineLink {
                chemistry_domain: chemistry.domain_name().to_owned(),
                engine,
            };

            tracing::info!(%domain, engine = link.engine.name(), "linked reaction engine to transport");
            pairing::transport_sub_mut(&mut self.transport, domain)?.attach_engine(link);
        }
        Ok(())
    }

    /// Timestep for the next coupled step.
    ///
    /// Transport is never allowed past what chemistry accepts. When
    /// subcycling, the (possibly larger) chemistry step is returned.
    #[must_use]
    pub fn get_dt(&self) -> Time {
        let proposal =
            TimestepProposal::new_unchecked(self.transport.get_dt(), self.chemistry.get_dt());
        let dt = joint_dt(proposal, self.chemistry_succeeded, self.subcycling);

        debug!(
            coupler = %self.name,
            transport = proposal.transport().get::<second>(),
            chemistry = proposal.chemistry().get::<second>(),
            step = dt.step.get::<second>(),
            "selected joint timestep"
        );

        dt.step
    }

    /// Records the snapshot roles and forwards them to transport.
    ///
    /// Chemistry receives its snapshot roles through its own setup path.
    pub fn set_states(&mut self, roles: StateRoles) {
        self.states = Some(roles);
        self.transport.set_states(roles);
    }

    /// Advances transport and then chemistry from `t_old` to `t_new`.
    ///
    /// # Errors
    ///
    /// Returns a [`CouplerError`] if transport fails, or if fields or
    /// sub-kernels the coupler relies on are missing or malformed. A
    /// chemistry failure is not an error; it is returned as
    /// [`StepOutcome::ChemistryFailed`].
    pub fn advance_step(
        &mut self,
        t_old: Time,
        t_new: Time,
        reinit: bool,
        state: &mut State,
    ) -> Result<StepOutcome, CouplerError> {
        self.chemistry_succeeded = false;

        self.bridge.ensure_storage(state)?;

        if let Err(source) = self.transport.advance_step(t_old, t_new, reinit, state) {
            error!(coupler = %self.name, %source, "transport step failed");
            return Err(CouplerError::TransportFailed { source });
        }

        for domain in Domain::ALL {
            self.bridge.to_chemistry_units(domain, state)?;
        }
        for domain in Domain::ALL {
            let buffer = self.bridge.lend(domain)?;
            pairing::chemistry_sub_mut(&mut self.chemistry, domain)?.set_aqueous_components(buffer);
        }

        let advanced = self.chemistry.advance_step(t_old, t_new, reinit, state);

        for domain in Domain::ALL {
            let buffer = pairing::chemistry_sub_mut(&mut self.chemistry, domain)?
                .take_aqueous_components()
                .ok_or(BridgeError::BufferNotReturned { domain })?;
            self.bridge.restore(domain, buffer)?;
        }

        if let Err(error) = advanced {
            warn!(coupler = %self.name, %error, "chemistry step failed");
            return Ok(StepOutcome::ChemistryFailed { error });
        }

        for domain in Domain::ALL {
            self.bridge.check_from_chemistry_units(domain, state)?;
        }
        for domain in Domain::ALL {
            self.bridge.from_chemistry_units(domain, state)?;
        }
        self.chemistry_succeeded = true;

        Ok(StepOutcome::Succeeded)
    }

    /// Commits the step to transport, then chemistry.
    pub fn commit_step(&mut self, t_old: Time, t_new: Time, state: &mut State) {
        self.transport.commit_step(t_old, t_new, state);
        self.chemistry.commit_step(t_old, t_new, state);
    }
}
