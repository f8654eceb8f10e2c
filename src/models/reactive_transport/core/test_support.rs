use std::{cell::RefCell, rc::Rc};

use uom::si::{f64::Time, time::second};

use crate::support::state::{CellField, Mesh, SnapshotId, State, StateRoles, key};

use super::{
    Domain, KernelError, MOLAR_DENSITY_LIQUID, SUBCYCLING_TAG, TOTAL_COMPONENT_CONCENTRATION,
    traits::{
        ChemistrySubKernel, DualDomainChemistry, DualDomainTransport, ProcessKernel,
        TransportSubKernel,
    },
};

#[cfg(feature = "alquimia")]
use super::{EngineHandle, EngineLink, ReactionEngine};

pub(super) const SUBSURFACE_CELLS: usize = 4;
pub(super) const OVERLAND_CELLS: usize = 3;

/// Value of the second concentration component, which conversion must not touch.
pub(super) const TRACER: f64 = 0.7;

pub(super) fn seconds(value: f64) -> Time {
    Time::new::<second>(value)
}

pub(super) fn domain_name(domain: Domain) -> &'static str {
    match domain {
        Domain::Subsurface => "domain",
        Domain::Overland => "surface",
    }
}

pub(super) fn owned_cells(domain: Domain) -> usize {
    match domain {
        Domain::Subsurface => SUBSURFACE_CELLS,
        Domain::Overland => OVERLAND_CELLS,
    }
}

/// A state with uniform concentration and density on both domains.
///
/// Each mesh has one ghost cell after its owned cells.
pub(super) fn two_domain_state(mole_fraction: f64, molar_density: f64) -> State {
    let mut state = State::new(SnapshotId(0));
    for domain in Domain::ALL {
        let name = domain_name(domain);
        let owned = owned_cells(domain);
        let cells = owned + 1;
        state.insert_mesh(name, Mesh::new(owned, 1));
        state.insert_field(
            key(name, TOTAL_COMPONENT_CONCENTRATION),
            CellField::from_components(vec![vec![mole_fraction; cells], vec![TRACER; cells]]),
        );
        state.insert_field(
            key(name, MOLAR_DENSITY_LIQUID),
            CellField::from_components(vec![vec![molar_density; cells]]),
        );
    }
    state
}

/// Owned-cell mole fractions of the working concentration copy.
pub(super) fn mole_fractions(state: &State, domain: Domain) -> Vec<f64> {
    let key = key(domain_name(domain), TOTAL_COMPONENT_CONCENTRATION);
    state
        .field_copy(&key, SUBCYCLING_TAG)
        .expect("working copy should exist")
        .component(0)[..owned_cells(domain)]
        .to_vec()
}

/// Shared record of kernel calls, in order.
#[derive(Debug, Clone, Default)]
pub(super) struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
    fn push(&self, entry: &str) {
        self.0.borrow_mut().push(entry.to_owned());
    }

    pub(super) fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

fn record(log: Option<&CallLog>, entry: &str) {
    if let Some(log) = log {
        log.push(entry);
    }
}

#[derive(Debug)]
pub(super) struct MockTransportSub {
    domain: &'static str,
    #[cfg(feature = "alquimia")]
    link: Option<EngineLink>,
}

impl TransportSubKernel for MockTransportSub {
    fn domain_name(&self) -> &str {
        self.domain
    }

    #[cfg(feature = "alquimia")]
    fn attach_engine(&mut self, link: EngineLink) {
        self.link = Some(link);
    }
}

/// Transport that optionally overwrites owned mole fractions with a fixed value.
#[derive(Debug)]
pub(super) struct MockTransport {
    subs: Vec<MockTransportSub>,
    dt: Time,
    fail: bool,
    write: Option<f64>,
    log: Option<CallLog>,
    roles: Option<StateRoles>,
}

impl MockTransport {
    pub(super) fn new() -> Self {
        Self {
            subs: Domain::ALL
                .into_iter()
                .map(|domain| MockTransportSub {
                    domain: domain_name(domain),
                    #[cfg(feature = "alquimia")]
                    link: None,
                })
                .collect(),
            dt: seconds(1.0),
            fail: false,
            write: None,
            log: None,
            roles: None,
        }
    }

    pub(super) fn with_dt(mut self, dt: f64) -> Self {
        self.dt = seconds(dt);
        self
    }

    pub(super) fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub(super) fn writing(mut self, mole_fraction: f64) -> Self {
        self.write = Some(mole_fraction);
        self
    }

    pub(super) fn logging(mut self, log: &CallLog) -> Self {
        self.log = Some(log.clone());
        self
    }

    pub(super) fn roles(&self) -> Option<StateRoles> {
        self.roles
    }

    #[cfg(feature = "alquimia")]
    pub(super) fn linked_engines(&self) -> [Option<String>; 2] {
        Domain::ALL.map(|domain| {
            self.subs[domain.index()]
                .link
                .as_ref()
                .map(|link| link.chemistry_domain.clone())
        })
    }
}

impl ProcessKernel for MockTransport {
    fn name(&self) -> &str {
        "transport"
    }

    fn setup(&mut self, _state: &mut State) -> Result<(), KernelError> {
        record(self.log.as_ref(), "transport setup");
        Ok(())
    }

    fn get_dt(&self) -> Time {
        self.dt
    }

    fn advance_step(
        &mut self,
        _t_old: Time,
        _t_new: Time,
        _reinit: bool,
        state: &mut State,
    ) -> Result<(), KernelError> {
        record(self.log.as_ref(), "transport advance");
        if self.fail {
            return Err(KernelError::new(self.name(), "advection did not converge"));
        }

        if let Some(value) = self.write {
            for domain in Domain::ALL {
                let key = key(domain_name(domain), TOTAL_COMPONENT_CONCENTRATION);
                let field = state
                    .field_copy_mut(&key, SUBCYCLING_TAG)
                    .map_err(|err| KernelError::new("transport", err.to_string()))?;
                field.component_mut(0)[..owned_cells(domain)].fill(value);
            }
        }

        Ok(())
    }

    fn commit_step(&mut self, _t_old: Time, _t_new: Time, _state: &mut State) {
        record(self.log.as_ref(), "transport commit");
    }

    fn set_states(&mut self, roles: StateRoles) {
        self.roles = Some(roles);
    }
}

impl DualDomainTransport for MockTransport {
    type Sub = MockTransportSub;

    fn sub_kernel(&self, index: usize) -> Option<&MockTransportSub> {
        self.subs.get(index)
    }

    fn sub_kernel_mut(&mut self, index: usize) -> Option<&mut MockTransportSub> {
        self.subs.get_mut(index)
    }
}

#[cfg(feature = "alquimia")]
#[derive(Debug)]
pub(super) struct MockEngine(&'static str);

#[cfg(feature = "alquimia")]
impl ReactionEngine for MockEngine {
    fn name(&self) -> &str {
        self.0
    }
}

/// What the mock chemistry does to its buffers when advanced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Reaction {
    /// Multiply every molarity by the factor.
    Scale(f64),
    /// Fail without touching the buffers.
    Fail,
    /// Multiply every molarity, then fail.
    ScaleThenFail(f64),
    /// Succeed but never hand the buffers back.
    KeepBuffers,
    /// Multiply every molarity, then replace the overland density with an empty field.
    ScaleAndBreakOverlandDensity(f64),
}

#[derive(Debug)]
pub(super) struct MockChemistrySub {
    domain: Domain,
    buffer: Option<CellField>,
    withhold: bool,
    received: Vec<f64>,
    received_ptrs: Vec<*const f64>,
    #[cfg(feature = "alquimia")]
    engine: std::sync::Arc<MockEngine>,
}

impl MockChemistrySub {
    fn scale(&mut self, factor: f64) {
        if let Some(buffer) = self.buffer.as_mut() {
            for c in buffer.component_mut(0) {
                *c *= factor;
            }
        }
    }
}

impl ChemistrySubKernel for MockChemistrySub {
    fn domain_name(&self) -> &str {
        domain_name(self.domain)
    }

    fn set_aqueous_components(&mut self, components: CellField) {
        self.received = components.component(0)[..owned_cells(self.domain)].to_vec();
        self.received_ptrs.push(components.component(0).as_ptr());
        self.buffer = Some(components);
    }

    fn take_aqueous_components(&mut self) -> Option<CellField> {
        if self.withhold {
            return None;
        }
        self.buffer.take()
    }

    #[cfg(feature = "alquimia")]
    fn engine(&self) -> Option<EngineHandle> {
        let engine: EngineHandle = self.engine.clone();
        Some(engine)
    }
}

#[derive(Debug)]
pub(super) struct MockChemistry {
    subs: Vec<MockChemistrySub>,
    dt: Time,
    reaction: Reaction,
    advances: usize,
    log: Option<CallLog>,
    roles: Option<StateRoles>,
}

impl MockChemistry {
    pub(super) fn new() -> Self {
        Self {
            subs: Domain::ALL
                .into_iter()
                .map(|domain| MockChemistrySub {
                    domain,
                    buffer: None,
                    withhold: false,
                    received: Vec::new(),
                    received_ptrs: Vec::new(),
                    #[cfg(feature = "alquimia")]
                    engine: std::sync::Arc::new(MockEngine("mock engine")),
                })
                .collect(),
            dt: seconds(1.0),
            reaction: Reaction::Scale(1.0),
            advances: 0,
            log: None,
            roles: None,
        }
    }

    pub(super) fn with_dt(mut self, dt: f64) -> Self {
        self.dt = seconds(dt);
        self
    }

    pub(super) fn with_reaction(mut self, reaction: Reaction) -> Self {
        self.reaction = reaction;
        self
    }

    pub(super) fn set_reaction(&mut self, reaction: Reaction) {
        self.reaction = reaction;
    }

    pub(super) fn logging(mut self, log: &CallLog) -> Self {
        self.log = Some(log.clone());
        self
    }

    pub(super) fn without_overland(mut self) -> Self {
        self.subs.truncate(1);
        self
    }

    /// Owned-cell molarities handed over at the most recent step.
    pub(super) fn received(&self, domain: Domain) -> &[f64] {
        &self.subs[domain.index()].received
    }

    /// Storage addresses of every buffer handed over, in order.
    pub(super) fn received_ptrs(&self, domain: Domain) -> Vec<*const f64> {
        self.subs[domain.index()].received_ptrs.clone()
    }

    pub(super) fn advance_count(&self) -> usize {
        self.advances
    }

    pub(super) fn roles(&self) -> Option<StateRoles> {
        self.roles
    }
}

impl ProcessKernel for MockChemistry {
    fn name(&self) -> &str {
        "chemistry"
    }

    fn setup(&mut self, _state: &mut State) -> Result<(), KernelError> {
        record(self.log.as_ref(), "chemistry setup");
        Ok(())
    }

    fn get_dt(&self) -> Time {
        self.dt
    }

    fn advance_step(
        &mut self,
        _t_old: Time,
        _t_new: Time,
        _reinit: bool,
        state: &mut State,
    ) -> Result<(), KernelError> {
        record(self.log.as_ref(), "chemistry advance");
        self.advances += 1;

        if self.subs.iter().any(|sub| sub.buffer.is_none()) {
            return Err(KernelError::new(self.name(), "no aqueous components"));
        }

        match self.reaction {
            Reaction::Scale(factor) => {
                self.subs.iter_mut().for_each(|sub| sub.scale(factor));
                Ok(())
            }
            Reaction::Fail => Err(KernelError::new(self.name(), "speciation failed")),
            Reaction::ScaleThenFail(factor) => {
                self.subs.iter_mut().for_each(|sub| sub.scale(factor));
                Err(KernelError::new(self.name(), "speciation failed"))
            }
            Reaction::KeepBuffers => {
                self.subs.iter_mut().for_each(|sub| sub.withhold = true);
                Ok(())
            }
            Reaction::ScaleAndBreakOverlandDensity(factor) => {
                self.subs.iter_mut().for_each(|sub| sub.scale(factor));
                state.insert_field(
                    key(domain_name(Domain::Overland), MOLAR_DENSITY_LIQUID),
                    CellField::zeros(0, 0),
                );
                Ok(())
            }
        }
    }

    fn commit_step(&mut self, _t_old: Time, _t_new: Time, _state: &mut State) {
        record(self.log.as_ref(), "chemistry commit");
    }

    fn set_states(&mut self, roles: StateRoles) {
        self.roles = Some(roles);
    }
}

impl DualDomainChemistry for MockChemistry {
    type Sub = MockChemistrySub;

    fn sub_kernel(&self, index: usize) -> Option<&MockChemistrySub> {
        self.subs.get(index)
    }

    fn sub_kernel_mut(&mut self, index: usize) -> Option<&mut MockChemistrySub> {
        self.subs.get_mut(index)
    }
}
