//! In-memory [`Database`] implementation.

mod impls;

use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use derive_more::{Display, Error as StdError};
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use crate::{
    domain::{Application, Building, Lease, Unit},
    infra::database,
};
#[cfg(doc)]
use crate::infra::Database;

#[cfg(doc)]
use common::operations::{Commit, Transact};

/// Records kept by a [`Memory`] store.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tables {
    /// Stored [`Unit`]s.
    pub units: Vec<Unit>,

    /// Stored [`Building`]s.
    pub buildings: Vec<Building>,

    /// Stored [`Lease`]s.
    pub leases: Vec<Lease>,

    /// Stored [`Application`]s.
    pub applications: Vec<Application>,
}

/// In-memory [`Database`] shared between its clones.
///
/// Writes are only possible inside a [`Tx`], which is applied atomically on
/// [`Commit`], unless another [`Tx`] has been committed since it started.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// Shared state of this store.
    state: Arc<RwLock<State>>,
}

/// Versioned [`Tables`] of a [`Memory`] store.
#[derive(Debug, Default)]
struct State {
    /// Number of [`Tx`]s committed so far.
    version: u64,

    /// Current [`Tables`].
    tables: Tables,
}

impl Memory {
    /// Creates a new [`Memory`] store pre-filled with the provided
    /// [`Tables`].
    #[must_use]
    pub fn new(tables: Tables) -> Self {
        Self {
            state: Arc::new(RwLock::new(State { version: 0, tables })),
        }
    }

    /// Returns a copy of the current [`Tables`] of this store.
    ///
    /// # Errors
    ///
    /// If the store lock is poisoned.
    pub fn snapshot(&self) -> Result<Tables, Traced<database::Error>> {
        self.read(Clone::clone)
    }

    /// Runs the provided function over the current [`Tables`].
    fn read<T>(
        &self,
        f: impl FnOnce(&Tables) -> T,
    ) -> Result<T, Traced<database::Error>> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(f(&state.tables))
    }

    /// Starts a new [`Tx`] over a copy of the current [`Tables`].
    fn begin(&self) -> Result<Tx, Traced<database::Error>> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(Tx {
            store: self.clone(),
            base: state.version,
            tables: Arc::new(Mutex::new(state.tables.clone())),
        })
    }
}

/// Transaction over a [`Memory`] store, started via [`Transact`].
///
/// Changes are visible to this [`Tx`] only, until [`Commit`]ted.
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`Memory`] store to [`Commit`] into.
    store: Memory,

    /// Version of the store this [`Tx`] started at.
    base: u64,

    /// [`Tables`] modified by this [`Tx`].
    tables: Arc<Mutex<Tables>>,
}

impl Tx {
    /// Locks the [`Tables`] of this [`Tx`].
    fn tables(
        &self,
    ) -> Result<MutexGuard<'_, Tables>, Traced<database::Error>> {
        self.tables.lock().map_err(|_| poisoned())
    }

    /// Runs the provided function over the [`Tables`] of this [`Tx`].
    fn read<T>(
        &self,
        f: impl FnOnce(&Tables) -> T,
    ) -> Result<T, Traced<database::Error>> {
        Ok(f(&*self.tables()?))
    }

    /// Runs the provided function over the mutable [`Tables`] of this [`Tx`].
    fn write<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> T,
    ) -> Result<T, Traced<database::Error>> {
        Ok(f(&mut *self.tables()?))
    }

    /// Applies this [`Tx`] to its [`Memory`] store.
    fn commit(&self) -> Result<(), Traced<database::Error>> {
        let mut state = self.store.state.write().map_err(|_| poisoned())?;
        if state.version != self.base {
            return Err(tracerr::new!(database::Error::from(Error::Conflict)));
        }
        state.tables = self.tables()?.clone();
        state.version += 1;
        Ok(())
    }
}

/// [`Memory`] store error.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// Another [`Tx`] has been committed after this one started.
    #[display("Store was modified by a concurrent transaction")]
    Conflict,

    /// Store lock is poisoned by a panicked thread.
    #[display("Store lock is poisoned")]
    Poisoned,
}

/// Creates a new [`Error::Poisoned`].
fn poisoned() -> Traced<database::Error> {
    tracerr::new!(database::Error::from(Error::Poisoned))
}

/// Collection of records in [`Tables`].
pub trait Table: Clone + Sized {
    /// ID of a record.
    type Id: Copy + Eq;

    /// Returns ID of this record.
    fn id(&self) -> Self::Id;

    /// Returns all the records of this type.
    fn rows(tables: &Tables) -> &Vec<Self>;

    /// Returns all the records of this type for modification.
    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self>;
}
