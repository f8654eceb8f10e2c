use std::fmt;

/// One of the two coupled physical domains.
///
/// The index of a domain is its position within every two-domain composite
/// kernel: subsurface first, overland second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Subsurface,
    Overland,
}

impl Domain {
    /// Both domains in composite order.
    pub const ALL: [Domain; 2] = [Domain::Subsurface, Domain::Overland];

    /// Position of this domain's sub-kernel within a composite.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Domain::Subsurface => 0,
            Domain::Overland => 1,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Subsurface => f.write_str("subsurface"),
            Domain::Overland => f.write_str("overland"),
        }
    }
}

/// A value for each [`Domain`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainPair<T> {
    pub subsurface: T,
    pub overland: T,
}

impl<T> DomainPair<T> {
    /// Builds a pair by evaluating `f` for each domain in composite order.
    pub fn try_from_fn<E>(mut f: impl FnMut(Domain) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            subsurface: f(Domain::Subsurface)?,
            overland: f(Domain::Overland)?,
        })
    }

    /// Returns the value for `domain`.
    #[must_use]
    pub fn get(&self, domain: Domain) -> &T {
        match domain {
            Domain::Subsurface => &self.subsurface,
            Domain::Overland => &self.overland,
        }
    }

    /// Returns the value for `domain` for writing.
    pub fn get_mut(&mut self, domain: Domain) -> &mut T {
        match domain {
            Domain::Subsurface => &mut self.subsurface,
            Domain::Overland => &mut self.overland,
        }
    }
}
