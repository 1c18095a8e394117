//! [`Query`] definition.

pub mod units;

use common::operations::{By, Select};
use serde::Serialize;
use tracerr::Traced;

use crate::{
    collection::{self, Record, SpecOf, Stats},
    infra::{database, Database},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] listing [`Record`]s according to a [`collection::Spec`].
#[derive(Debug)]
pub struct List<R: Record> {
    /// [`collection::Spec`] to list [`Record`]s by.
    pub spec: SpecOf<R>,
}

impl<R: Record> List<R> {
    /// Creates a new [`List`] [`Query`] with the provided
    /// [`collection::Spec`].
    #[must_use]
    pub fn new(spec: SpecOf<R>) -> Self {
        Self { spec }
    }
}

/// Outcome of a [`List`] [`Query`].
#[derive(Clone, Debug, Serialize)]
#[serde(bound = "R: Serialize, R::Status: Serialize")]
pub struct Listing<R: Record> {
    /// Listed [`Record`]s, in the requested order.
    pub items: Vec<R>,

    /// [`Stats`] of all the [`Record`]s, regardless of filters.
    pub stats: Stats<R::Status>,
}

impl<Db, R> Query<List<R>> for Service<Db>
where
    Db: Database<
        Select<By<Vec<R>, ()>>,
        Ok = Vec<R>,
        Err = Traced<database::Error>,
    >,
    R: Record + Clone,
{
    type Ok = Listing<R>;
    type Err = Traced<database::Error>;

    fn execute(&self, List { spec }: List<R>) -> Result<Self::Ok, Self::Err> {
        let records = self
            .database()
            .execute(Select(By::<Vec<R>, _>::new(())))
            .map_err(tracerr::wrap!())?;

        let view = collection::query(&records, &spec);
        Ok(Listing {
            items: view.visible.into_iter().cloned().collect(),
            stats: view.stats,
        })
    }
}
