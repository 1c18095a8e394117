//! Partitioning of [`Unit`]s: splitting one into several and merging several
//! into one.
//!
//! Everything here is a pure computation over the provided [`Unit`]s.
//! Persisting the outcome is up to the caller (see [`command::SplitUnit`]
//! and [`command::MergeUnits`]).
//!
//! [`command::MergeUnits`]: crate::command::MergeUnits
//! [`command::SplitUnit`]: crate::command::SplitUnit

pub mod merge;
pub mod split;

use derive_more::{Display, Error as StdError};
use smart_default::SmartDefault;

use crate::domain::unit;
#[cfg(doc)]
use crate::domain::Unit;

pub use self::{
    merge::{compute_merge, group_by_floor, Merge, MergeSelection, MergeTarget},
    split::{Override, Split, SplitPlan, Target},
};

/// Minimal number of [`Unit`]s a [`Unit`] can be split into.
pub const MIN_SPLIT_TARGETS: usize = 2;

/// Maximal number of [`Unit`]s a [`Unit`] can be split into.
pub const MAX_SPLIT_TARGETS: usize = 10;

/// Minimal number of [`Unit`]s to be merged.
pub const MIN_MERGE_SOURCES: usize = 2;

/// Default attributes of [`Unit`]s produced by a split.
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
pub struct Defaults {
    /// [`unit::Kind`] of the split targets.
    #[default(unit::Kind::Office)]
    pub kind: unit::Kind,

    /// [`unit::Status`] of the split targets.
    #[default(unit::Status::Available)]
    pub status: unit::Status,
}

/// Error of partitioning [`Unit`]s.
#[derive(Clone, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// Number of split targets or merge sources is out of bounds.
    #[display("Invalid cardinality: {_0}")]
    InvalidCardinality(#[error(not(source))] Cardinality),

    /// Split targets take more space than the source has.
    #[display("Split targets exceed the source by {excess} sq ft")]
    OverAllocated {
        /// Square feet allocated above the source [`unit::Area`].
        excess: u64,
    },

    /// Size of a split target is not positive.
    #[display("Split target #{index} must have a positive size")]
    NonPositiveSize {
        /// Index of the offending split target.
        index: usize,
    },

    /// Split target with the provided index doesn't exist.
    #[display("Split target #{_0} does not exist")]
    UnknownTarget(#[error(not(source))] usize),

    /// Resulting [`unit::Number`] is not valid.
    #[display("`{_0}` is not a valid `unit::Number`")]
    InvalidNumber(#[error(not(source))] String),

    /// The same [`Unit`] is selected for merging more than once.
    #[display("`Unit(id: {_0})` is selected more than once")]
    DuplicateUnit(#[error(not(source))] unit::Id),

    /// Merged [`Unit`]s belong to different buildings.
    #[display("Merged units belong to different buildings")]
    MixedBuildings,

    /// Rents of merged [`Unit`]s are in different currencies.
    #[display("Merged units have rents in different currencies")]
    MixedCurrencies,

    /// Merged [`unit::Area`] doesn't fit into its representation.
    #[display("Merged area overflows")]
    AreaOverflow,

    /// Prorated rent of a split target doesn't fit into its representation.
    #[display("Prorated rent overflows")]
    RentOverflow,
}

/// Cardinality violated by a partition request.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Cardinality {
    /// Number of split targets is out of
    /// [`MIN_SPLIT_TARGETS`]`..=`[`MAX_SPLIT_TARGETS`] bounds.
    #[display("cannot split into {_0} units, expected from 2 to 10")]
    SplitTargets(usize),

    /// Less than [`MIN_MERGE_SOURCES`] are selected for merging.
    #[display("cannot merge {_0} units, expected at least 2")]
    InsufficientSelection(usize),
}
