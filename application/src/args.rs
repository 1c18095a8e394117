//! [`Args`] definitions.

use std::{path::PathBuf, str::FromStr};

use clap::{Parser, Subcommand};
use derive_more::{Display, Error};
use service::{
    collection::{Direction, Filter, SortKey},
    domain::{application, building, lease, unit},
    partition,
};

/// Property dashboard core operating over a JSON snapshot of records.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Path to write the resulting snapshot to, after a mutating command.
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// [`Command`] to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to execute.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Split a unit into several ones.
    Split {
        /// ID of the unit to split.
        unit_id: unit::Id,

        /// Number of units to split into.
        #[arg(
            short = 'n',
            long,
            default_value_t = partition::MIN_SPLIT_TARGETS,
        )]
        count: usize,

        /// Customization of the next split target, as comma-separated
        /// `number=..`, `size=..`, `type=..`, `status=..` pairs.
        #[arg(short, long = "target", value_name = "OVERRIDE")]
        targets: Vec<Target>,
    },

    /// Merge several units of the same building into one.
    Merge {
        /// IDs of the units to merge.
        #[arg(required = true, num_args = 1..)]
        unit_ids: Vec<unit::Id>,

        /// Number of the merged unit, suggested from the sources if omitted.
        #[arg(long)]
        number: Option<unit::Number>,

        /// Type of the merged unit.
        #[arg(long = "type", default_value_t = unit::Kind::Office)]
        kind: unit::Kind,

        /// Status of the merged unit.
        #[arg(long, default_value_t = unit::Status::Available)]
        status: unit::Status,

        /// Notes about the merged unit.
        #[arg(long)]
        notes: Option<unit::Notes>,
    },

    /// Move an application to another status.
    Transition {
        /// ID of the application.
        application_id: application::Id,

        /// Status to move the application to.
        status: application::Status,
    },

    /// List applications.
    Applications {
        /// Kind of applications to list.
        #[arg(long = "type", default_value = "all")]
        kind: Filter<application::Kind>,

        /// Status of applications to list.
        #[arg(long, default_value = "all")]
        status: Filter<application::Status>,

        #[command(flatten)]
        listing: Listing,
    },

    /// List buildings.
    Buildings {
        /// Type of buildings to list.
        #[arg(long = "type", default_value = "all")]
        kind: Filter<building::Kind>,

        /// Status of buildings to list.
        #[arg(long, default_value = "all")]
        status: Filter<building::Status>,

        #[command(flatten)]
        listing: Listing,
    },

    /// List leases.
    Leases {
        /// Type of leases to list.
        #[arg(long = "type", default_value = "all")]
        kind: Filter<lease::Kind>,

        /// Status of leases to list.
        #[arg(long, default_value = "all")]
        status: Filter<lease::Status>,

        #[command(flatten)]
        listing: Listing,
    },

    /// Show units of a building grouped by floor.
    Floors {
        /// ID of the building.
        building_id: building::Id,
    },
}

/// Options shared by every listing [`Command`].
#[derive(Clone, Debug, clap::Args)]
pub struct Listing {
    /// Priority of records to list.
    #[arg(long, default_value = "all")]
    pub priority: Filter<application::Priority>,

    /// Case-insensitive text to search for.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Key to sort records by.
    #[arg(long, default_value_t = SortKey::Date)]
    pub sort: SortKey,

    /// Direction to sort records in.
    #[arg(long, default_value_t = Direction::Descending)]
    pub direction: Direction,
}

/// Customization of a single split target.
#[derive(Clone, Debug, Default)]
pub struct Target(pub partition::Override);

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut o = partition::Override::default();
        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| TargetError::Malformed(pair.to_owned()))?;
            let (key, value) = (key.trim(), value.trim());
            match key {
                "number" => o.number = Some(parse(key, value)?),
                "size" => o.size = Some(parse(key, value)?),
                "type" => o.kind = Some(parse(key, value)?),
                "status" => o.status = Some(parse(key, value)?),
                other => {
                    return Err(TargetError::UnknownKey(other.to_owned()));
                }
            }
        }
        Ok(Self(o))
    }
}

/// Parses the `value` of the provided `key` of a [`Target`].
fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, TargetError> {
    value.parse().map_err(|_| TargetError::InvalidValue {
        key: key.to_owned(),
        value: value.to_owned(),
    })
}

/// Error of parsing a [`Target`].
#[derive(Clone, Debug, Display, Error)]
pub enum TargetError {
    /// Pair is not in `key=value` form.
    #[display("`{_0}` is not a `key=value` pair")]
    Malformed(#[error(not(source))] String),

    /// Key is not recognized.
    #[display("unknown key `{_0}`")]
    UnknownKey(#[error(not(source))] String),

    /// Value cannot be parsed for its key.
    #[display("invalid `{key}` value: `{value}`")]
    InvalidValue {
        /// Key of the pair.
        key: String,

        /// Raw value of the pair.
        value: String,
    },
}
