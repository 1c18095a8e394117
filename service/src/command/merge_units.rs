//! [`Command`] for merging several [`Unit`]s into one.

use common::{
    operations::{By, Commit, Delete, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{unit, Unit},
    infra::{database, Database},
    partition::{self, MergeTarget},
    Service,
};

use super::Command;

/// [`Command`] for merging several [`Unit`]s into one.
#[derive(Clone, Debug)]
pub struct MergeUnits {
    /// IDs of the [`Unit`]s to be merged.
    pub unit_ids: Vec<unit::Id>,

    /// [`MergeTarget`] describing the merged [`Unit`].
    pub target: MergeTarget,
}

impl<Db> Command<MergeUnits> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Unit>, unit::Id>>,
            Ok = Option<Unit>,
            Err = Traced<database::Error>,
        > + Database<Insert<Unit>, Err = Traced<database::Error>>
        + Database<Delete<By<Unit, unit::Id>>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Unit;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: MergeUnits) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let MergeUnits { unit_ids, target } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let sources = unit_ids
            .iter()
            .map(|&id| {
                tx.execute(Select(By::<Option<Unit>, _>::new(id)))
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .ok_or(E::UnitNotExists(id))
                    .map_err(tracerr::wrap!())
            })
            .collect::<Result<Vec<_>, _>>()?;

        let merge = partition::compute_merge(&sources, target)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let unit = merge
            .unit
            .into_unit(unit::Id::new(), DateTime::now().coerce());
        for id in &merge.consumed {
            tx.execute(Delete(By::<Unit, _>::new(*id)))
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }
        tx.execute(Insert(unit.clone()))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            "{} units merged into `Unit(id: {})` of {} sq ft",
            merge.consumed.len(),
            unit.id,
            unit.size,
        );

        Ok(unit)
    }
}

/// Error of [`MergeUnits`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`partition::Error`] of the merge.
    #[display("Cannot merge: {_0}")]
    Partition(partition::Error),

    /// [`Unit`] doesn't exist.
    #[display("`Unit(id: {_0})` does not exist")]
    #[from(ignore)]
    UnitNotExists(#[error(not(source))] unit::Id),
}
