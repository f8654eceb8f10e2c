//! Contracts the coordinator requires of its transport and chemistry kernels.

use uom::si::f64::Time;

use crate::support::state::{CellField, State, StateRoles};

use super::error::KernelError;

#[cfg(feature = "alquimia")]
use super::engine::{EngineHandle, EngineLink};

/// A process kernel: one independently advanceable piece of physics.
pub trait ProcessKernel {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Prepares the kernel before the first step.
    ///
    /// # Errors
    ///
    /// Returns a [`KernelError`] if the kernel cannot be set up.
    fn setup(&mut self, _state: &mut State) -> Result<(), KernelError> {
        Ok(())
    }

    /// Timestep the kernel would like to take next.
    fn get_dt(&self) -> Time;

    /// Advances the kernel from `t_old` to `t_new`.
    ///
    /// # Errors
    ///
    /// Returns a [`KernelError`] if the step cannot be completed.
    fn advance_step(
        &mut self,
        t_old: Time,
        t_new: Time,
        reinit: bool,
        state: &mut State,
    ) -> Result<(), KernelError>;

    /// Finalizes an accepted step.
    fn commit_step(&mut self, t_old: Time, t_new: Time, state: &mut State);

    /// Records which snapshots play the previous, intermediate and next roles.
    fn set_states(&mut self, roles: StateRoles);
}

/// Per-domain view of a transport kernel.
pub trait TransportSubKernel {
    /// Name of the domain this kernel transports solutes on.
    fn domain_name(&self) -> &str;

    /// Gives the kernel access to the paired chemistry's reaction engine.
    #[cfg(feature = "alquimia")]
    fn attach_engine(&mut self, link: EngineLink);
}

/// Per-domain view of a chemistry kernel.
///
/// The coordinator lends the kernel its working aqueous-component array for
/// the duration of a step and takes it back afterwards. The array's storage
/// must be returned as received (same shape, no reallocation).
pub trait ChemistrySubKernel {
    /// Name of the domain this kernel reacts solutes on.
    fn domain_name(&self) -> &str;

    /// Hands the kernel the aqueous component concentrations to react, in mol/L.
    fn set_aqueous_components(&mut self, components: CellField);

    /// Takes back the aqueous component array after the step.
    fn take_aqueous_components(&mut self) -> Option<CellField>;

    /// The reaction engine backing this kernel, if any.
    #[cfg(feature = "alquimia")]
    fn engine(&self) -> Option<EngineHandle>;
}

/// A transport composite advancing both domains in one call.
///
/// Sub-kernel 0 is the subsurface, sub-kernel 1 the overland domain.
pub trait DualDomainTransport: ProcessKernel {
    type Sub: TransportSubKernel;

    fn sub_kernel(&self, index: usize) -> Option<&Self::Sub>;

    fn sub_kernel_mut(&mut self, index: usize) -> Option<&mut Self::Sub>;
}

/// A chemistry composite advancing both domains in one call.
///
/// Sub-kernel 0 is the subsurface, sub-kernel 1 the overland domain.
pub trait DualDomainChemistry: ProcessKernel {
    type Sub: ChemistrySubKernel;

    fn sub_kernel(&self, index: usize) -> Option<&Self::Sub>;

    fn sub_kernel_mut(&mut self, index: usize) -> Option<&mut Self::Sub>;
}
