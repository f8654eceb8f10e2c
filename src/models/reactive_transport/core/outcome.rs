use super::error::KernelError;

/// Result of a coupled step that did not fail fatally.
///
/// A fatal transport failure is reported as an error instead; see
/// [`CouplerError::TransportFailed`](super::CouplerError::TransportFailed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Transport and chemistry both advanced; results are awaiting commit.
    Succeeded,

    /// Chemistry rejected the step.
    ///
    /// The authoritative concentration field holds the post-transport,
    /// pre-chemistry values. The caller is expected to retry with a smaller
    /// timestep.
    ChemistryFailed { error: KernelError },
}

impl StepOutcome {
    /// Whether the step failed and must be retried.
    #[must_use]
    pub fn failed(&self) -> bool {
        matches!(self, StepOutcome::ChemistryFailed { .. })
    }
}
