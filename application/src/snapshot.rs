//! JSON snapshot of [`Tables`] the application operates on.

use std::{fs, io, path::Path};

use derive_more::{Display, Error as StdError, From};
use service::infra::database::memory::Tables;
use tracing as log;

use crate::{AsError, Error as AppError};

/// Loads [`Tables`] from the JSON snapshot at the provided `path`.
///
/// # Errors
///
/// If the file cannot be read or is not a valid snapshot.
pub fn load(path: impl AsRef<Path>) -> Result<Tables, Error> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let tables: Tables = serde_json::from_str(&raw)?;

    log::debug!(
        "loaded snapshot `{}`: {} units, {} buildings, {} leases, \
         {} applications",
        path.display(),
        tables.units.len(),
        tables.buildings.len(),
        tables.leases.len(),
        tables.applications.len(),
    );

    Ok(tables)
}

/// Saves the provided [`Tables`] as a JSON snapshot to the provided `path`.
///
/// # Errors
///
/// If the file cannot be written.
pub fn save(path: impl AsRef<Path>, tables: &Tables) -> Result<(), Error> {
    let path = path.as_ref();
    fs::write(path, serde_json::to_vec_pretty(tables)?)?;

    log::info!("snapshot saved to `{}`", path.display());

    Ok(())
}

/// Error of reading or writing a snapshot.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Snapshot file cannot be accessed.
    #[display("Snapshot file is not accessible: {_0}")]
    Io(io::Error),

    /// Snapshot is not valid JSON of records.
    #[display("Snapshot is malformed: {_0}")]
    Json(serde_json::Error),
}

impl AsError for Error {
    fn try_as_error(&self) -> Option<AppError> {
        match self {
            Self::Io(e) => e.try_as_error(),
            Self::Json(e) => e.try_as_error(),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::infra::database::memory::Tables;

    use super::{load, save, Error};

    #[test]
    fn saves_and_loads_back() {
        let path = std::env::temp_dir()
            .join(format!("dashboard-snapshot-{}.json", std::process::id()));
        let tables: Tables = serde_json::from_value(serde_json::json!({
            "buildings": [{
                "id": "00000000-0000-4000-8000-000000000011",
                "name": "Harbor Point",
                "address": "1 Harbor Way",
                "type": "residential",
                "status": "active",
                "createdAt": "2023-01-01T00:00:00Z",
                "updatedAt": "2023-01-01T00:00:00Z"
            }]
        }))
        .unwrap();

        save(&path, &tables).unwrap();
        let loaded = load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, tables);
    }

    #[test]
    fn reports_missing_and_malformed_files() {
        assert!(matches!(
            load("definitely/missing/snapshot.json"),
            Err(Error::Io(_)),
        ));

        let path = std::env::temp_dir()
            .join(format!("dashboard-malformed-{}.json", std::process::id()));
        std::fs::write(&path, "{\"units\": 42}").unwrap();
        let res = load(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(res, Err(Error::Json(_))));
    }
}
