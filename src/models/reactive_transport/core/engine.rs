//! Sharing a chemistry reaction engine with transport.
//!
//! With a geochemistry engine backend, transport can interpolate reaction
//! rates inside its own step. During setup the coordinator hands each
//! transport sub-kernel a link to the engine of the chemistry sub-kernel on
//! the same domain.

use std::{fmt, sync::Arc};

/// A geochemical reaction engine shared between kernels.
pub trait ReactionEngine: Send + Sync {
    /// Backend name, e.g. the engine's input deck or library.
    fn name(&self) -> &str;
}

/// Shared handle to a [`ReactionEngine`].
pub type EngineHandle = Arc<dyn ReactionEngine>;

/// What a transport sub-kernel receives about its paired chemistry.
#[derive(Clone)]
pub struct EngineLink {
    /// Domain name of the paired chemistry sub-kernel.
    pub chemistry_domain: String,

    /// The paired chemistry's reaction engine.
    pub engine: EngineHandle,
}

impl fmt::Debug for EngineLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineLink")
            .field("chemistry_domain", &self.chemistry_domain)
            .field("engine", &self.engine.name())
            .finish()
    }
}
