//! [`Command`] definition.

pub mod merge_units;
pub mod split_unit;
pub mod update_application_status;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    merge_units::MergeUnits, split_unit::SplitUnit,
    update_application_status::UpdateApplicationStatus,
};
