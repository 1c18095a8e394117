//! [`Command`] for updating an [`application::Status`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime, Recognized,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{application, Application},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an [`application::Status`].
#[derive(Clone, Copy, Debug)]
pub struct UpdateApplicationStatus {
    /// ID of the [`Application`] which [`application::Status`] should be
    /// updated.
    pub application_id: application::Id,

    /// New [`application::Status`] of the [`Application`].
    pub status: application::Status,
}

impl<Db> Command<UpdateApplicationStatus> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Application>, application::Id>>,
            Ok = Option<Application>,
            Err = Traced<database::Error>,
        > + Database<Insert<Application>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Application;
    type Err = Traced<ExecutionError>;

    fn execute(
        &self,
        cmd: UpdateApplicationStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateApplicationStatus {
            application_id,
            status,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut application = tx
            .execute(Select(By::<Option<Application>, _>::new(
                application_id,
            )))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ApplicationNotExists(application_id))
            .map_err(tracerr::wrap!())?;

        let header = application.header_mut();
        match header.status.known() {
            Some(current) if current == status => return Ok(application),
            Some(current) if current.can_transition_to(status) => {}
            Some(_) | None => {
                let from = header.status.clone();
                log::warn!(
                    "`Application(id: {application_id})` cannot move from \
                     `{from}` to `{status}`",
                );
                return Err(tracerr::new!(E::ForbiddenTransition {
                    from,
                    to: status,
                }));
            }
        }
        header.status = Recognized::Known(status);
        header.updated_at = DateTime::now().coerce();

        tx.execute(Insert(application.clone()))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::debug!("`Application(id: {application_id})` is now `{status}`");

        Ok(application)
    }
}

/// Error of [`UpdateApplicationStatus`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Application`] doesn't exist.
    #[display("`Application(id: {_0})` does not exist")]
    #[from(ignore)]
    ApplicationNotExists(#[error(not(source))] application::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Application`] cannot move to the requested [`application::Status`].
    #[display("Cannot move `Application` from `{from}` to `{to}`")]
    #[from(ignore)]
    ForbiddenTransition {
        /// Current [`application::Status`].
        from: Recognized<application::Status>,

        /// Requested [`application::Status`].
        to: application::Status,
    },
}

#[cfg(test)]
mod spec {
    use common::{Enumeration as _, Recognized};

    use crate::{
        domain::{application, Application},
        infra::{database::memory::Tables, Memory},
        Command as _, Config, Service,
    };

    use super::{ExecutionError, UpdateApplicationStatus};

    fn application(status: &str) -> Application {
        serde_json::from_value(serde_json::json!({
            "type": "general",
            "id": "00000000-0000-4000-8000-000000000001",
            "applicant": {
                "firstName": "Ann",
                "lastName": "Lee",
                "email": "ann@lee.org"
            },
            "status": status,
            "priority": "low",
            "submittedAt": "2024-03-02T10:00:00Z",
            "updatedAt": "2024-03-02T10:00:00Z",
            "description": "Parking permit"
        }))
        .unwrap()
    }

    fn service(app: Application) -> Service<Memory> {
        Service::new(
            Config::default(),
            Memory::new(Tables {
                applications: vec![app],
                ..Tables::default()
            }),
        )
    }

    #[test]
    fn moves_along_workflow() {
        let app = application("pending");
        let svc = service(app.clone());

        for status in [
            application::Status::InReview,
            application::Status::OnHold,
            application::Status::InReview,
            application::Status::Approved,
        ] {
            let updated = svc
                .execute(UpdateApplicationStatus {
                    application_id: app.id(),
                    status,
                })
                .unwrap();
            assert_eq!(updated.header().status, Recognized::Known(status));
            assert!(updated.header().updated_at > app.header().updated_at);
        }

        let stored = svc.database().snapshot().unwrap().applications;
        assert_eq!(
            stored[0].header().status,
            Recognized::Known(application::Status::Approved),
        );
    }

    #[test]
    fn final_statuses_accept_no_transitions() {
        for current in ["approved", "rejected"] {
            let app = application(current);
            let svc = service(app.clone());

            for &status in application::Status::ALL {
                if status.to_string() == current {
                    continue;
                }
                let err = svc
                    .execute(UpdateApplicationStatus {
                        application_id: app.id(),
                        status,
                    })
                    .unwrap_err();
                assert!(matches!(
                    err.as_ref(),
                    ExecutionError::ForbiddenTransition { .. },
                ));
            }
            let stored = svc.database().snapshot().unwrap().applications;
            assert_eq!(stored, [app]);
        }
    }

    #[test]
    fn unknown_status_cannot_transition() {
        let app = application("escalated");
        let svc = service(app.clone());

        let err = svc
            .execute(UpdateApplicationStatus {
                application_id: app.id(),
                status: application::Status::Pending,
            })
            .unwrap_err();

        assert_eq!(
            err.as_ref().to_string(),
            "Cannot move `Application` from `escalated` to `pending`",
        );
    }
}
