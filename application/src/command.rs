//! Handlers of the command line [`Command`]s.

use std::collections::BTreeMap;

use serde::Serialize;
use service::{
    collection::{Filter, Record, Spec},
    command::{self, Command as _},
    domain::{
        application, building, unit, Application, Building, Lease, Unit,
    },
    infra::database,
    partition::{self, MergeTarget},
    query::{self, Query},
};

use crate::{
    args::{Command, Listing, Target},
    define_error, AsError, Error, Service,
};

impl Command {
    /// Indicates whether this [`Command`] modifies the records.
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        match self {
            Self::Split { .. }
            | Self::Merge { .. }
            | Self::Transition { .. } => true,
            Self::Applications { .. }
            | Self::Buildings { .. }
            | Self::Leases { .. }
            | Self::Floors { .. } => false,
        }
    }

    /// Executes this [`Command`] against the provided [`Service`], returning
    /// its JSON outcome.
    ///
    /// # Errors
    ///
    /// If the underlying [`Service`] operation fails.
    pub fn execute(
        self,
        service: &Service,
    ) -> Result<serde_json::Value, Error> {
        match self {
            Self::Split {
                unit_id,
                count,
                targets,
            } => split(service, unit_id, count, targets).and_then(to_json),
            Self::Merge {
                unit_ids,
                number,
                kind,
                status,
                notes,
            } => merge(
                service,
                unit_ids,
                MergeTarget {
                    number,
                    kind,
                    status,
                    notes,
                },
            )
            .and_then(to_json),
            Self::Transition {
                application_id,
                status,
            } => {
                transition(service, application_id, status).and_then(to_json)
            }
            Self::Applications {
                kind,
                status,
                listing,
            } => list::<Application>(service, kind, status, listing)
                .and_then(to_json),
            Self::Buildings {
                kind,
                status,
                listing,
            } => list::<Building>(service, kind, status, listing)
                .and_then(to_json),
            Self::Leases {
                kind,
                status,
                listing,
            } => list::<Lease>(service, kind, status, listing)
                .and_then(to_json),
            Self::Floors { building_id } => {
                floors(service, building_id).and_then(to_json)
            }
        }
    }
}

/// Splits the [`Unit`] with the provided ID into `count` ones.
#[tracing::instrument(
    skip(service, targets),
    fields(targets = targets.len()),
)]
fn split(
    service: &Service,
    unit_id: unit::Id,
    count: usize,
    targets: Vec<Target>,
) -> Result<Vec<Unit>, Error> {
    service
        .execute(command::SplitUnit {
            unit_id,
            count,
            overrides: targets.into_iter().map(|Target(o)| o).collect(),
        })
        .map_err(AsError::into_error)
}

/// Merges the [`Unit`]s with the provided IDs into a single one.
#[tracing::instrument(
    skip(service, unit_ids, target),
    fields(units = unit_ids.len()),
)]
fn merge(
    service: &Service,
    unit_ids: Vec<unit::Id>,
    target: MergeTarget,
) -> Result<Unit, Error> {
    service
        .execute(command::MergeUnits { unit_ids, target })
        .map_err(AsError::into_error)
}

/// Moves the [`Application`] with the provided ID to another status.
#[tracing::instrument(skip(service))]
fn transition(
    service: &Service,
    application_id: application::Id,
    status: application::Status,
) -> Result<Application, Error> {
    service
        .execute(command::UpdateApplicationStatus {
            application_id,
            status,
        })
        .map_err(AsError::into_error)
}

/// Lists [`Record`]s of the provided type.
#[tracing::instrument(
    skip_all,
    fields(
        record = std::any::type_name::<R>(),
        search = %listing.search,
        sort = %listing.sort,
        direction = %listing.direction,
    ),
)]
fn list<R>(
    service: &Service,
    kind: Filter<R::Kind>,
    status: Filter<R::Status>,
    listing: Listing,
) -> Result<query::Listing<R>, Error>
where
    R: Record + Clone,
    Service: Query<
        query::List<R>,
        Ok = query::Listing<R>,
        Err = tracerr::Traced<database::Error>,
    >,
{
    let Listing {
        priority,
        search,
        sort,
        direction,
    } = listing;

    service
        .execute(query::List::new(Spec {
            kind,
            status,
            priority,
            search,
            sort,
            direction,
        }))
        .map_err(AsError::into_error)
}

/// Groups [`Unit`]s of the [`Building`] with the provided ID by floors.
#[tracing::instrument(skip(service))]
fn floors(
    service: &Service,
    building_id: building::Id,
) -> Result<BTreeMap<unit::Floor, Vec<Unit>>, Error> {
    service
        .execute(query::units::ByFloor { building_id })
        .map_err(AsError::into_error)
}

/// Converts the provided outcome into JSON.
fn to_json<T: Serialize>(outcome: T) -> Result<serde_json::Value, Error> {
    serde_json::to_value(outcome).map_err(|e| Error::internal(&e))
}

impl AsError for partition::Error {
    fn try_as_error(&self) -> Option<Error> {
        let code = match self {
            Self::InvalidCardinality(_) => "INVALID_CARDINALITY",
            Self::OverAllocated { .. } => "OVER_ALLOCATED",
            Self::NonPositiveSize { .. } => "NON_POSITIVE_SIZE",
            Self::UnknownTarget(_) => "UNKNOWN_TARGET",
            Self::InvalidNumber(_) => "INVALID_UNIT_NUMBER",
            Self::DuplicateUnit(_) => "DUPLICATE_UNIT",
            Self::MixedBuildings => "MIXED_BUILDINGS",
            Self::MixedCurrencies => "MIXED_CURRENCIES",
            Self::AreaOverflow => "AREA_OVERFLOW",
            Self::RentOverflow => "RENT_OVERFLOW",
        };
        Some(Error::new(code, self))
    }
}

impl AsError for command::split_unit::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "UNIT_NOT_EXISTS"]
                #[message = "`Unit` with the provided ID does not exist"]
                UnitNotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Partition(e) => e.try_as_error(),
            Self::UnitNotExists(_) => Some(Error::UnitNotExists.into()),
        }
    }
}

impl AsError for command::merge_units::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "UNIT_NOT_EXISTS"]
                #[message = "Some of the `Unit`s with the provided IDs do \
                             not exist"]
                UnitNotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Partition(e) => e.try_as_error(),
            Self::UnitNotExists(_) => Some(Error::UnitNotExists.into()),
        }
    }
}

impl AsError for command::update_application_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "APPLICATION_NOT_EXISTS"]
                #[message = "`Application` with the provided ID does not \
                             exist"]
                ApplicationNotExists,
            }
        }

        match self {
            Self::ApplicationNotExists(_) => {
                Some(Error::ApplicationNotExists.into())
            }
            Self::Db(e) => e.try_as_error(),
            Self::ForbiddenTransition { .. } => {
                Some(crate::Error::new("FORBIDDEN_TRANSITION", self))
            }
        }
    }
}
