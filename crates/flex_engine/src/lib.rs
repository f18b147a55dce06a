//! Row layout engine emulating flexbox-style horizontal distribution for
//! rendering hosts without native flexible-box support.
//!
//! A [`LayoutContainer`] owns the visible subsequence of its declared
//! children as [`LayoutItem`]s and runs a five-phase measure/mutate
//! protocol over them: unset stale overrides, measure inherited text-flow,
//! measure natural widths, apply computed widths, propagate the resolved
//! container height. All element access goes through the
//! [`style_host::StyleSink`] capability trait. The [`UpdateEngine`] keeps
//! the registry of mounted containers and coalesces update requests into a
//! single sweep.

#![forbid(unsafe_code)]

use sizing::SizeError;
use std::fmt;

pub mod container;
pub mod gutters;
pub mod item;
pub mod update_engine;

pub use container::{ContainerConfig, Justify, LayoutContainer};
pub use gutters::{GutterSpec, compute_gutters};
pub use item::{Align, FlexGrow, ItemConfig, ItemSpec, LayoutItem};
pub use update_engine::{ContainerId, UpdateEngine};

/// Faults raised by layout phases and the update sweep.
///
/// A fault aborts the failing container's pass mid-way; the partially
/// styled state is recovered by the next pass's unset phase.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutFault {
    /// A declared or accumulated size was rejected.
    InvalidSize(SizeError),
    /// A declared flex weight is negative or non-finite.
    InvalidFlexWeight { weight: f32 },
    /// A phase reached an element with no live backing node. `None` refers
    /// to the container's own element. Contract violation: fatal in debug
    /// builds, skipped past by the sweep otherwise.
    UnresolvedRef { slot: Option<usize> },
    /// Flexible items exist but their weights sum to zero. Impossible by
    /// construction (zero weights normalize to "not flexible"), defended
    /// against NaN-propagating styles.
    ZeroFlexWeight,
    /// A layout pass or sweep was re-entered while one was in progress.
    PassInProgress,
}

impl fmt::Display for LayoutFault {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize(error) => write!(formatter, "invalid size: {error}"),
            Self::InvalidFlexWeight { weight } => {
                write!(formatter, "invalid flex weight: {weight}")
            }
            Self::UnresolvedRef { slot: None } => {
                write!(formatter, "no mounted element for container")
            }
            Self::UnresolvedRef { slot: Some(slot) } => {
                write!(formatter, "no mounted element for item {slot}")
            }
            Self::ZeroFlexWeight => {
                write!(formatter, "flexible items present with zero total flex weight")
            }
            Self::PassInProgress => write!(formatter, "layout pass already in progress"),
        }
    }
}

impl std::error::Error for LayoutFault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidSize(error) => Some(error),
            _ => None,
        }
    }
}

impl From<SizeError> for LayoutFault {
    fn from(error: SizeError) -> Self {
        Self::InvalidSize(error)
    }
}
