use uom::si::{f64::Time, time::second};

use crate::support::constraint::{Constrained, ConstraintResult, StrictlyPositive};

/// Chemistry-to-transport timestep ratio above which a rejected chemistry
/// step is offered again only after halving.
pub const BACKOFF_RATIO: f64 = 0.99;

/// The timesteps preferred by the transport and chemistry kernels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimestepProposal {
    transport: Time,
    chemistry: Time,
}

impl TimestepProposal {
    /// Constructs a validated proposal.
    ///
    /// # Errors
    ///
    /// Returns an error if either timestep is not strictly positive.
    pub fn new(transport: Time, chemistry: Time) -> ConstraintResult<Self> {
        let transport = Constrained::<Time, StrictlyPositive>::new(transport)?;
        let chemistry = Constrained::<Time, StrictlyPositive>::new(chemistry)?;
        Ok(Self::from_constrained(transport, chemistry))
    }

    /// Constructs a proposal from pre-validated timesteps.
    #[must_use]
    pub fn from_constrained(
        transport: Constrained<Time, StrictlyPositive>,
        chemistry: Constrained<Time, StrictlyPositive>,
    ) -> Self {
        Self {
            transport: transport.into_inner(),
            chemistry: chemistry.into_inner(),
        }
    }

    /// Constructs a proposal without validation.
    ///
    /// # Warning
    ///
    /// Non-positive timesteps are passed through the joint timestep rule
    /// unchanged, which can produce non-positive or `NaN` results.
    #[must_use]
    pub fn new_unchecked(transport: Time, chemistry: Time) -> Self {
        Self {
            transport,
            chemistry,
        }
    }

    /// Timestep preferred by transport.
    #[must_use]
    pub fn transport(&self) -> Time {
        self.transport
    }

    /// Timestep preferred by chemistry.
    #[must_use]
    pub fn chemistry(&self) -> Time {
        self.chemistry
    }
}

/// The timesteps selected for one coupled step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointDt {
    /// Transport timestep, never larger than `chemistry`.
    pub transport: Time,

    /// Chemistry timestep after any backoff.
    pub chemistry: Time,

    /// The step the coupler offers: `chemistry` when subcycling, else `transport`.
    pub step: Time,
}

/// Selects the joint timestep from the two kernels' proposals.
///
/// If the previous chemistry step failed and chemistry proposes nearly the
/// transport step again (ratio above [`BACKOFF_RATIO`]), the chemistry step
/// is halved. Transport is then clamped to chemistry.
pub(crate) fn joint_dt(
    proposal: TimestepProposal,
    last_chemistry_succeeded: bool,
    subcycling: bool,
) -> JointDt {
    let mut transport = proposal.transport;
    let mut chemistry = proposal.chemistry;

    if !last_chemistry_succeeded
        && chemistry.get::<second>() / transport.get::<second>() > BACKOFF_RATIO
    {
        chemistry = chemistry * 0.5;
    }

    if transport > chemistry {
        transport = chemistry;
    }

    let step = if subcycling { chemistry } else { transport };

    JointDt {
        transport,
        chemistry,
        step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seconds(value: f64) -> Time {
        Time::new::<second>(value)
    }

    fn proposal(transport: f64, chemistry: f64) -> TimestepProposal {
        TimestepProposal::new(seconds(transport), seconds(chemistry)).unwrap()
    }

    #[test]
    fn transport_limited_without_subcycling() {
        let dt = joint_dt(proposal(10.0, 20.0), true, false);
        assert_eq!(dt.step, seconds(10.0));
        assert_eq!(dt.transport, seconds(10.0));
        assert_eq!(dt.chemistry, seconds(20.0));
    }

    #[test]
    fn chemistry_step_offered_when_subcycling() {
        let dt = joint_dt(proposal(10.0, 20.0), true, true);
        assert_eq!(dt.step, seconds(20.0));
        assert_eq!(dt.transport, seconds(10.0));
    }

    #[test]
    fn transport_clamped_to_chemistry() {
        let dt = joint_dt(proposal(30.0, 20.0), true, false);
        assert_eq!(dt.step, seconds(20.0));
        assert_eq!(dt.transport, seconds(20.0));
    }

    #[test]
    fn never_exceeds_either_proposal_without_subcycling() {
        for &(t, c) in &[(1.0, 2.0), (2.0, 1.0), (5.0, 5.0), (1e-3, 1e3), (1e3, 1e-3)] {
            for succeeded in [true, false] {
                let dt = joint_dt(proposal(t, c), succeeded, false);
                assert!(dt.step <= seconds(t));
                assert!(dt.step <= seconds(c));
            }
        }
    }

    #[test]
    fn backoff_halves_near_equal_chemistry_after_failure() {
        let dt = joint_dt(proposal(10.0, 9.95), false, true);
        assert_eq!(dt.chemistry, seconds(9.95 * 0.5));
        assert_eq!(dt.step, seconds(9.95 * 0.5));
        assert_eq!(dt.transport, seconds(9.95 * 0.5));
    }

    #[test]
    fn no_backoff_at_exact_ratio() {
        let dt = joint_dt(proposal(100.0, 99.0), false, false);
        assert_eq!(dt.chemistry, seconds(99.0));
        assert_eq!(dt.step, seconds(99.0));
    }

    #[test]
    fn no_backoff_after_success() {
        let dt = joint_dt(proposal(10.0, 9.95), true, true);
        assert_eq!(dt.chemistry, seconds(9.95));
    }

    #[test]
    fn no_backoff_when_chemistry_already_smaller() {
        let dt = joint_dt(proposal(10.0, 5.0), false, false);
        assert_eq!(dt.chemistry, seconds(5.0));
        assert_eq!(dt.step, seconds(5.0));
    }

    #[test]
    fn validated_proposals_reject_non_positive_steps() {
        assert!(TimestepProposal::new(seconds(0.0), seconds(1.0)).is_err());
        assert!(TimestepProposal::new(seconds(1.0), seconds(-1.0)).is_err());
    }
}
