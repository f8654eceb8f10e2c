//! Concentration conversion between transport and chemistry.
//!
//! Transport owns the authoritative concentration field as a mole fraction.
//! Chemistry reacts molarities held in a per-domain buffer that the bridge
//! allocates on the first step and reuses for the life of the coupler.
//! Only component 0 over owned cells is converted.

use tracing::{debug, info};

use crate::support::{
    state::{CellField, State, StateError},
    units::{mole_fraction_to_molarity, molarity_to_mole_fraction},
};

use super::{
    domain::{Domain, DomainPair},
    error::BridgeError,
    pairing::{DomainKeys, SUBCYCLING_TAG},
};

pub(super) struct ConcentrationBridge {
    keys: DomainPair<DomainKeys>,
    buffers: DomainPair<Option<CellField>>,
    shapes: DomainPair<Option<(usize, usize)>>,
    storage_created: bool,
}

impl ConcentrationBridge {
    pub(super) fn new(keys: DomainPair<DomainKeys>) -> Self {
        Self {
            keys,
            buffers: DomainPair::default(),
            shapes: DomainPair::default(),
            storage_created: false,
        }
    }

    pub(super) fn keys(&self, domain: Domain) -> &DomainKeys {
        self.keys.get(domain)
    }

    /// Allocates both domains' buffers on the first call; later calls do nothing.
    ///
    /// Each buffer takes the shape of the domain's tagged concentration copy,
    /// which is created from the primary field if transport has not yet done so.
    pub(super) fn ensure_storage(&mut self, state: &mut State) -> Result<(), BridgeError> {
        if self.storage_created {
            return Ok(());
        }

        for domain in Domain::ALL {
            let keys = self.keys.get(domain);
            let copy = state.require_copy(&keys.concentration, SUBCYCLING_TAG)?;
            info!(
                %domain,
                key = %keys.concentration,
                shape = ?copy.shape(),
                "allocated chemistry conversion buffer"
            );
            *self.shapes.get_mut(domain) = Some(copy.shape());
            *self.buffers.get_mut(domain) = Some(copy.clone());
        }

        self.storage_created = true;
        Ok(())
    }

    /// Writes `mole_fraction * molar_density / 1000` into the domain's buffer.
    pub(super) fn to_chemistry_units(
        &mut self,
        domain: Domain,
        state: &State,
    ) -> Result<(), BridgeError> {
        let keys = self.keys.get(domain);
        let n = state.mesh(&keys.domain)?.num_owned_cells();
        let mole_fraction = owned(
            state.field_copy(&keys.concentration, SUBCYCLING_TAG)?,
            &keys.concentration,
            n,
        )?;
        let density = owned(state.field(&keys.molar_density)?, &keys.molar_density, n)?;

        let buffer = self
            .buffers
            .get_mut(domain)
            .as_mut()
            .ok_or(BridgeError::BufferUnavailable { domain })?;
        let molarity = owned_mut(buffer, &keys.concentration, n)?;

        for ((c, &x), &m) in molarity.iter_mut().zip(mole_fraction).zip(density) {
            *c = mole_fraction_to_molarity(x, m);
        }

        debug!(%domain, cells = n, "converted mole fraction to molarity");
        Ok(())
    }

    /// Checks that [`from_chemistry_units`](Self::from_chemistry_units) can
    /// run on `domain` without writing anything.
    pub(super) fn check_from_chemistry_units(
        &self,
        domain: Domain,
        state: &State,
    ) -> Result<(), BridgeError> {
        let keys = self.keys.get(domain);
        let n = state.mesh(&keys.domain)?.num_owned_cells();
        let buffer = self
            .buffers
            .get(domain)
            .as_ref()
            .ok_or(BridgeError::BufferUnavailable { domain })?;
        check_owned(buffer, &keys.concentration, n)?;
        check_owned(
            state.field_copy(&keys.concentration, SUBCYCLING_TAG)?,
            &keys.concentration,
            n,
        )?;
        check_owned(state.field(&keys.molar_density)?, &keys.molar_density, n)?;
        Ok(())
    }

    /// Writes `molarity / (molar_density / 1000)` back into the authoritative field.
    pub(super) fn from_chemistry_units(
        &self,
        domain: Domain,
        state: &mut State,
    ) -> Result<(), BridgeError> {
        let keys = self.keys.get(domain);
        let n = state.mesh(&keys.domain)?.num_owned_cells();
        let buffer = self
            .buffers
            .get(domain)
            .as_ref()
            .ok_or(BridgeError::BufferUnavailable { domain })?;
        let molarity = owned(buffer, &keys.concentration, n)?;

        let (field, density) =
            state.copy_and_field_mut(&keys.concentration, SUBCYCLING_TAG, &keys.molar_density)?;
        let density = owned(density, &keys.molar_density, n)?;
        let mole_fraction = owned_mut(field, &keys.concentration, n)?;

        for ((x, &c), &m) in mole_fraction.iter_mut().zip(molarity).zip(density) {
            *x = molarity_to_mole_fraction(c, m);
        }

        debug!(%domain, cells = n, "converted molarity to mole fraction");
        Ok(())
    }

    /// Moves the domain's buffer out so chemistry can work on it in place.
    pub(super) fn lend(&mut self, domain: Domain) -> Result<CellField, BridgeError> {
        self.buffers
            .get_mut(domain)
            .take()
            .ok_or(BridgeError::BufferUnavailable { domain })
    }

    /// Puts a lent buffer back; it must keep the shape it was allocated with.
    pub(super) fn restore(&mut self, domain: Domain, buffer: CellField) -> Result<(), BridgeError> {
        let Some(expected) = *self.shapes.get(domain) else {
            return Err(BridgeError::BufferUnavailable { domain });
        };
        if buffer.shape() != expected {
            return Err(BridgeError::BufferShape {
                domain,
                expected,
                found: buffer.shape(),
            });
        }
        *self.buffers.get_mut(domain) = Some(buffer);
        Ok(())
    }

    #[cfg(test)]
    pub(super) fn buffer(&self, domain: Domain) -> Option<&CellField> {
        self.buffers.get(domain).as_ref()
    }
}

/// Component 0 over the first `n` cells.
fn owned<'a>(field: &'a CellField, key: &str, n: usize) -> Result<&'a [f64], StateError> {
    check_owned(field, key, n)?;
    Ok(&field.component(0)[..n])
}

fn owned_mut<'a>(field: &'a mut CellField, key: &str, n: usize) -> Result<&'a mut [f64], StateError> {
    check_owned(field, key, n)?;
    Ok(&mut field.component_mut(0)[..n])
}

/// Component 0 must exist and cover at least `n` cells, even when `n` is zero.
fn check_owned(field: &CellField, key: &str, n: usize) -> Result<(), StateError> {
    let found = if field.num_components() == 0 {
        0
    } else {
        field.num_cells()
    };
    if field.num_components() == 0 || found < n {
        return Err(StateError::ShapeMismatch {
            key: key.to_owned(),
            expected: n,
            found,
        });
    }
    Ok(())
}
