//! [`Database`] operations of [`Memory`] and its [`Tx`].

use common::operations::{By, Commit, Delete, Insert, Select, Transact};
use tracerr::Traced;

use crate::{
    domain::{
        application, building, lease, unit, Application, Building, Lease, Unit,
    },
    infra::{database, Database},
};

use super::{Memory, Table, Tables, Tx};

impl Table for Unit {
    type Id = unit::Id;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn rows(tables: &Tables) -> &Vec<Self> {
        &tables.units
    }

    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.units
    }
}

impl Table for Building {
    type Id = building::Id;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn rows(tables: &Tables) -> &Vec<Self> {
        &tables.buildings
    }

    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.buildings
    }
}

impl Table for Lease {
    type Id = lease::Id;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn rows(tables: &Tables) -> &Vec<Self> {
        &tables.leases
    }

    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.leases
    }
}

impl Table for Application {
    type Id = application::Id;

    fn id(&self) -> Self::Id {
        Self::id(self)
    }

    fn rows(tables: &Tables) -> &Vec<Self> {
        &tables.applications
    }

    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.applications
    }
}

/// Finds the record with the provided `id`.
fn find<R: Table>(tables: &Tables, id: R::Id) -> Option<R> {
    R::rows(tables).iter().find(|r| r.id() == id).cloned()
}

/// Returns all the [`Unit`]s of the [`Building`] with the provided `id`.
fn units_of(tables: &Tables, id: building::Id) -> Vec<Unit> {
    tables
        .units
        .iter()
        .filter(|u| u.building_id == id)
        .cloned()
        .collect()
}

impl Database<Transact> for Memory {
    type Ok = Tx;
    type Err = Traced<database::Error>;

    fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        self.begin()
    }
}

impl<R: Table> Database<Select<By<Option<R>, R::Id>>> for Memory {
    type Ok = Option<R>;
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        Select(by): Select<By<Option<R>, R::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|t| find(t, id))
    }
}

impl<R: Table> Database<Select<By<Vec<R>, ()>>> for Memory {
    type Ok = Vec<R>;
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        _: Select<By<Vec<R>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(|t| R::rows(t).clone())
    }
}

impl Database<Select<By<Vec<Unit>, building::Id>>> for Memory {
    type Ok = Vec<Unit>;
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        Select(by): Select<By<Vec<Unit>, building::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|t| units_of(t, id))
    }
}

impl<R: Table> Database<Select<By<Option<R>, R::Id>>> for Tx {
    type Ok = Option<R>;
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        Select(by): Select<By<Option<R>, R::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|t| find(t, id))
    }
}

impl<R: Table> Database<Insert<R>> for Tx {
    type Ok = ();
    type Err = Traced<database::Error>;

    /// Inserts the provided record, replacing the one with the same ID, if
    /// any.
    fn execute(&self, Insert(record): Insert<R>) -> Result<(), Self::Err> {
        self.write(|t| {
            let rows = R::rows_mut(t);
            let pos = rows.iter().position(|r| r.id() == record.id());
            match pos {
                Some(pos) => rows[pos] = record,
                None => rows.push(record),
            }
        })
    }
}

impl<R: Table> Database<Delete<By<R, R::Id>>> for Tx {
    type Ok = Option<R>;
    type Err = Traced<database::Error>;

    /// Deletes the record with the provided ID, returning it, if any.
    fn execute(
        &self,
        Delete(by): Delete<By<R, R::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.write(|t| {
            let rows = R::rows_mut(t);
            let pos = rows.iter().position(|r| r.id() == id)?;
            Some(rows.remove(pos))
        })
    }
}

impl Database<Commit> for Tx {
    type Ok = ();
    type Err = Traced<database::Error>;

    fn execute(&self, _: Commit) -> Result<(), Self::Err> {
        self.commit()
    }
}
