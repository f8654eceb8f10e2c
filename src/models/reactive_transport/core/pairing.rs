//! Resolving which kernels and sub-kernels the coordinator couples.

use tracing::debug;

use crate::support::state::{Key, key};

use super::{
    config::CouplerConfig,
    domain::{Domain, DomainPair},
    error::{ChildKind, PairingError},
    traits::{ChemistrySubKernel, DualDomainChemistry, DualDomainTransport, TransportSubKernel},
};

/// Field variable holding the transported solute, as a mole fraction.
pub const TOTAL_COMPONENT_CONCENTRATION: &str = "total_component_concentration";

/// Field variable holding the liquid molar density, in mol/m³.
pub const MOLAR_DENSITY_LIQUID: &str = "molar_density_liquid";

/// Tag of the working copy of the concentration field that transport
/// subcycles on and the coordinator reads and writes.
pub const SUBCYCLING_TAG: &str = "subcycling";

/// A child of the coupler, tagged with the physics it provides.
#[derive(Debug)]
pub enum Child<T, C> {
    Transport(T),
    Chemistry(C),
}

impl<T, C> Child<T, C> {
    /// Which physics this child provides.
    pub fn kind(&self) -> ChildKind {
        match self {
            Child::Transport(_) => ChildKind::Transport,
            Child::Chemistry(_) => ChildKind::Chemistry,
        }
    }
}

/// Field keys the coordinator uses on one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainKeys {
    /// Domain (mesh) name, as reported by the transport sub-kernel.
    pub domain: String,

    /// Key of the mole-fraction concentration field.
    pub concentration: Key,

    /// Key of the liquid molar density field.
    pub molar_density: Key,
}

impl DomainKeys {
    pub(super) fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_owned(),
            concentration: key(domain, TOTAL_COMPONENT_CONCENTRATION),
            molar_density: key(domain, MOLAR_DENSITY_LIQUID),
        }
    }
}

/// Picks the transport and chemistry composites out of the coupler's children.
pub(super) fn split_children<T, C>(
    config: &CouplerConfig,
    children: Vec<Child<T, C>>,
) -> Result<(T, C), PairingError> {
    let (transport_index, chemistry_index) = config.indices()?;

    let [first, second]: [Child<T, C>; 2] = children
        .try_into()
        .map_err(|children: Vec<_>| PairingError::ChildCount {
            found: children.len(),
        })?;

    let (transport, chemistry) = if transport_index == 0 {
        (first, second)
    } else {
        (second, first)
    };

    let transport = match transport {
        Child::Transport(transport) => transport,
        Child::Chemistry(_) => {
            return Err(PairingError::UnexpectedKind {
                index: transport_index,
                expected: ChildKind::Transport,
                found: ChildKind::Chemistry,
            });
        }
    };

    let chemistry = match chemistry {
        Child::Chemistry(chemistry) => chemistry,
        Child::Transport(_) => {
            return Err(PairingError::UnexpectedKind {
                index: chemistry_index,
                expected: ChildKind::Chemistry,
                found: ChildKind::Transport,
            });
        }
    };

    Ok((transport, chemistry))
}

/// Checks that both composites cover both domains and builds the field keys.
pub(super) fn resolve_domains<T, C>(
    transport: &T,
    chemistry: &C,
) -> Result<DomainPair<DomainKeys>, PairingError>
where
    T: DualDomainTransport,
    C: DualDomainChemistry,
{
    DomainPair::try_from_fn(|domain| {
        let transport_sub = transport_sub(transport, domain)?;
        let chemistry_sub = chemistry_sub(chemistry, domain)?;

        debug!(
            %domain,
            transport = transport_sub.domain_name(),
            chemistry = chemistry_sub.domain_name(),
            "paired sub-kernels"
        );

        Ok(DomainKeys::new(transport_sub.domain_name()))
    })
}

pub(super) fn transport_sub<T: DualDomainTransport>(
    transport: &T,
    domain: Domain,
) -> Result<&T::Sub, PairingError> {
    transport
        .sub_kernel(domain.index())
        .ok_or(PairingError::MissingSubKernel {
            kind: ChildKind::Transport,
            domain,
        })
}

#[cfg(feature = "alquimia")]
pub(super) fn transport_sub_mut<T: DualDomainTransport>(
    transport: &mut T,
    domain: Domain,
) -> Result<&mut T::Sub, PairingError> {
    transport
        .sub_kernel_mut(domain.index())
        .ok_or(PairingError::MissingSubKernel {
            kind: ChildKind::Transport,
            domain,
        })
}

pub(super) fn chemistry_sub<C: DualDomainChemistry>(
    chemistry: &C,
    domain: Domain,
) -> Result<&C::Sub, PairingError> {
    chemistry
        .sub_kernel(domain.index())
        .ok_or(PairingError::MissingSubKernel {
            kind: ChildKind::Chemistry,
            domain,
        })
}

pub(super) fn chemistry_sub_mut<C: DualDomainChemistry>(
    chemistry: &mut C,
    domain: Domain,
) -> Result<&mut C::Sub, PairingError> {
    chemistry
        .sub_kernel_mut(domain.index())
        .ok_or(PairingError::MissingSubKernel {
            kind: ChildKind::Chemistry,
            domain,
        })
}
