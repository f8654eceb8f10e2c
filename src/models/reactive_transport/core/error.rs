use std::fmt;

use thiserror::Error;

use crate::support::state::StateError;

use super::Domain;

/// A failure reported by a collaborating process kernel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("process kernel `{kernel}` failed: {message}")]
pub struct KernelError {
    /// Name of the kernel that failed.
    pub kernel: String,

    /// Description of the failure.
    pub message: String,
}

impl KernelError {
    /// Creates a kernel error.
    pub fn new(kernel: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kernel: kernel.into(),
            message: message.into(),
        }
    }
}

/// Which physics a coupled child kernel provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    Transport,
    Chemistry,
}

impl fmt::Display for ChildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildKind::Transport => f.write_str("transport"),
            ChildKind::Chemistry => f.write_str("chemistry"),
        }
    }
}

/// Configuration errors found while pairing the coupled kernels.
///
/// These are raised before any stepping begins; there is no degraded mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    /// The coupler was not given exactly two children.
    #[error("reactive transport couples exactly 2 kernels, found {found}")]
    ChildCount { found: usize },

    /// A configured child index does not address one of the two children.
    #[error("{kind} index {index} is out of range (must be 0 or 1)")]
    IndexOutOfRange { kind: ChildKind, index: usize },

    /// Transport and chemistry were configured at the same index.
    #[error("transport and chemistry share index {index}")]
    IndicesCoincide { index: usize },

    /// The child at a configured index provides the other physics.
    #[error("child {index} was configured as {expected} but is {found}")]
    UnexpectedKind {
        index: usize,
        expected: ChildKind,
        found: ChildKind,
    },

    /// A composite kernel has no sub-kernel for one of the domains.
    #[error("{kind} composite has no {domain} sub-kernel at index {}", .domain.index())]
    MissingSubKernel { kind: ChildKind, domain: Domain },

    /// A chemistry sub-kernel exposes no reaction engine to share with transport.
    #[cfg(feature = "alquimia")]
    #[error("{domain} chemistry sub-kernel has no reaction engine")]
    MissingEngine { domain: Domain },
}

/// Errors raised by the concentration bridge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The domain's buffer has not been allocated or is currently lent out.
    #[error("{domain} conversion buffer is unavailable")]
    BufferUnavailable { domain: Domain },

    /// The chemistry sub-kernel kept the buffer it was handed.
    #[error("{domain} chemistry sub-kernel did not return its aqueous components")]
    BufferNotReturned { domain: Domain },

    /// The chemistry sub-kernel returned a buffer of a different shape.
    #[error(
        "{domain} chemistry returned a {found:?} buffer, expected {expected:?} (components, cells)"
    )]
    BufferShape {
        domain: Domain,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// A field needed for conversion could not be read or written.
    #[error(transparent)]
    State(#[from] StateError),
}

/// Fatal errors from the reactive transport coordinator.
///
/// A recoverable chemistry failure is not represented here; it is reported
/// as [`StepOutcome::ChemistryFailed`](super::StepOutcome::ChemistryFailed).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouplerError {
    /// The transport composite failed to advance.
    #[error("coupled transport returned an unexpected error")]
    TransportFailed {
        #[source]
        source: KernelError,
    },

    /// A child kernel failed during setup.
    #[error("setup failed")]
    SetupFailed {
        #[source]
        source: KernelError,
    },

    /// The kernel pairing is no longer valid.
    #[error("kernel pairing failed")]
    Pairing(#[from] PairingError),

    /// Concentration conversion between transport and chemistry failed.
    #[error("concentration bridge failed")]
    Bridge(#[from] BridgeError),
}
