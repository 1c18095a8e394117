//! Command line application operating the [`Service`] over a JSON snapshot
//! of records.

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod args;
pub mod command;
pub mod config;
pub mod error;
pub mod snapshot;

use service::infra::Memory;
use tracing as log;
// Used in binary.
use tracing_subscriber as _;

pub use self::{
    args::Args,
    config::Config,
    error::{AsError, Error},
};

/// [`Service`] with filled infrastructure dependencies.
///
/// [`Service`]: service::Service
pub type Service = service::Service<Memory>;

/// Runs the provided [`Args`] with the provided [`Config`], returning the
/// JSON outcome of the executed [`args::Command`].
///
/// The outcome of a mutating [`args::Command`] is persisted to
/// [`Args::output`], if any.
///
/// # Errors
///
/// If the snapshot cannot be loaded or saved, or the [`args::Command`]
/// fails.
pub fn run(args: Args, config: Config) -> Result<serde_json::Value, Error> {
    let Args {
        config: _,
        output,
        command,
    } = args;

    let tables =
        snapshot::load(&config.data.path).map_err(AsError::into_error)?;
    let service = Service::new(config.partition.into(), Memory::new(tables));

    let mutating = command.is_mutating();
    let outcome = command.execute(&service)?;

    if let Some(path) = output.filter(|_| mutating) {
        let tables = service
            .database()
            .snapshot()
            .map_err(AsError::into_error)?;
        snapshot::save(path, &tables).map_err(AsError::into_error)?;
    } else if mutating {
        log::debug!("no `--output` provided, changes are not persisted");
    }

    Ok(outcome)
}

#[cfg(test)]
mod spec {
    use crate::{args::Command, config, snapshot, Args, Config};

    #[test]
    fn persists_mutations_to_output() {
        let dir = std::env::temp_dir();
        let id = std::process::id();
        let (input, output) = (
            dir.join(format!("dashboard-run-in-{id}.json")),
            dir.join(format!("dashboard-run-out-{id}.json")),
        );
        std::fs::write(
            &input,
            serde_json::json!({
                "applications": [{
                    "type": "general",
                    "id": "00000000-0000-4000-8000-000000000001",
                    "applicant": {
                        "firstName": "Ann",
                        "lastName": "Lee",
                        "email": "ann@lee.org"
                    },
                    "status": "pending",
                    "priority": "low",
                    "submittedAt": "2024-03-02T10:00:00Z",
                    "updatedAt": "2024-03-02T10:00:00Z",
                    "description": "Parking permit"
                }]
            })
            .to_string(),
        )
        .unwrap();

        let outcome = crate::run(
            Args {
                config: "config.toml".to_owned(),
                output: Some(output.clone()),
                command: Command::Transition {
                    application_id: "00000000-0000-4000-8000-000000000001"
                        .parse()
                        .unwrap(),
                    status: "in_review".parse().unwrap(),
                },
            },
            Config {
                data: config::Data {
                    path: input.clone(),
                },
                ..Config::default()
            },
        )
        .unwrap();
        let saved = snapshot::load(&output).unwrap();
        std::fs::remove_file(&input).unwrap();
        std::fs::remove_file(&output).unwrap();

        assert_eq!(outcome["status"], "in_review");
        assert_eq!(
            saved.applications[0].header().status.to_string(),
            "in_review",
        );
    }
}
