//! [`Command`] for splitting a [`Unit`] into several ones.

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
    partition::{self, SplitPlan},
    Service,
};

use super::Command;

/// [`Command`] for splitting a [`Unit`] into several ones.
#[derive(Clone, Debug)]
pub struct SplitUnit {
    /// ID of the [`Unit`] to be split.
    pub unit_id: unit::Id,

    /// Number of [`Unit`]s to split into.
    pub count: usize,

    /// [`partition::Override`]s of the resulting [`Unit`]s, by index.
    pub overrides: Vec<partition::Override>,
}

impl<Db> Command<SplitUnit> for Service<Db>
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
    type Ok = Vec<Unit>;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: SplitUnit) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SplitUnit {
            unit_id,
            count,
            overrides,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let source = tx
            .execute(Select(By::<Option<Unit>, _>::new(unit_id)))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UnitNotExists(unit_id))
            .map_err(tracerr::wrap!())?;

        let split = SplitPlan::with_overrides(
            &source,
            count,
            self.config().partition,
            overrides,
        )
        .and_then(SplitPlan::commit)
        .map_err(tracerr::from_and_wrap!(=> E))?;

        let created_at = DateTime::now().coerce();
        let units = split
            .units
            .into_iter()
            .map(|d| d.into_unit(unit::Id::new(), created_at))
            .collect::<Vec<_>>();
        for u in &units {
            tx.execute(Insert(u.clone()))
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }
        tx.execute(Delete(By::<Unit, _>::new(source.id)))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            "`Unit(id: {unit_id})` split into {} units, {} sq ft left \
             unallocated",
            units.len(),
            split.remaining,
        );

        Ok(units)
    }
}

/// Error of [`SplitUnit`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`partition::Error`] of the split.
    #[display("Cannot split: {_0}")]
    Partition(partition::Error),

    /// [`Unit`] doesn't exist.
    #[display("`Unit(id: {_0})` does not exist")]
    #[from(ignore)]
    UnitNotExists(#[error(not(source))] unit::Id),
}
