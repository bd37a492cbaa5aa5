use std::fmt::{self, Debug};
use std::time::Instant;

#[cfg(test)]
use crate::pal::MockTimeSource;
use crate::pal::{MonotonicTimeSource, TimeSource};

pub(crate) enum TimeSourceFacade {
    Real(MonotonicTimeSource),

    #[cfg(test)]
    Mock(MockTimeSource),
}

impl TimeSourceFacade {
    pub(crate) fn real() -> Self {
        Self::Real(MonotonicTimeSource)
    }
}

#[cfg(test)]
impl From<MockTimeSource> for TimeSourceFacade {
    fn from(ts: MockTimeSource) -> Self {
        Self::Mock(ts)
    }
}

impl TimeSource for TimeSourceFacade {
    fn now(&mut self) -> Instant {
        match self {
            Self::Real(ts) => ts.now(),
            #[cfg(test)]
            Self::Mock(ts) => ts.now(),
        }
    }
}

impl Debug for TimeSourceFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(ts) => ts.fmt(f),
            #[cfg(test)]
            Self::Mock(ts) => ts.fmt(f),
        }
    }
}
