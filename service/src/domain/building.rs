//! [`Building`] definitions.

use common::{
    define_kind, define_text, unit, DateTimeOf, Percent, Recognized,
};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::person;
#[cfg(doc)]
use crate::domain::Unit;

/// Building containing [`Unit`]s.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    /// ID of this [`Building`].
    pub id: Id,

    /// [`Name`] of this [`Building`].
    pub name: Name,

    /// [`Address`] of this [`Building`].
    pub address: Address,

    /// [`Kind`] of this [`Building`].
    #[serde(rename = "type")]
    pub kind: Recognized<Kind>,

    /// [`Status`] of this [`Building`].
    pub status: Recognized<Status>,

    /// ID of the staff member managing this [`Building`], if any.
    #[serde(default)]
    pub manager_id: Option<person::StaffId>,

    /// Total number of [`Unit`]s in this [`Building`].
    #[serde(default)]
    pub total_units: u32,

    /// Number of occupied [`Unit`]s in this [`Building`].
    #[serde(default)]
    pub occupied_units: u32,

    /// Optional [`Notes`] about this [`Building`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Notes>,

    /// [`DateTime`] when this [`Building`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Building`] was last updated.
    ///
    /// [`DateTime`]: common::DateTime
    pub updated_at: UpdateDateTime,
}

impl Building {
    /// Returns the occupancy rate of this [`Building`].
    ///
    /// [`None`] is returned if the reported unit counts are inconsistent
    /// (more occupied [`Unit`]s than there are in total).
    #[must_use]
    pub fn occupancy(&self) -> Option<Percent> {
        Percent::of(self.occupied_units, self.total_units)
    }
}

/// ID of a [`Building`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_text! {
    #[doc = "Name of a [`Building`]."]
    struct Name(max = 512);
}

define_text! {
    #[doc = "Full address of a [`Building`]."]
    struct Address(max = 512);
}

define_text! {
    #[doc = "Free-form notes about a [`Building`]."]
    struct Notes(max = 2048);
}

define_kind! {
    #[doc = "Kind of a [`Building`]."]
    enum Kind {
        #[doc = "Offices and retail."]
        Commercial = 1,

        #[doc = "Apartments."]
        Residential = 2,

        #[doc = "Both commercial and residential spaces."]
        MixedUse = 3,
    }
}

define_kind! {
    #[doc = "Status of a [`Building`]."]
    enum Status {
        #[doc = "Operating building."]
        Active = 1,

        #[doc = "Building not finished yet."]
        UnderConstruction = 2,

        #[doc = "Building out of operation."]
        Inactive = 3,
    }
}

/// [`DateTime`] when a [`Building`] was created.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(Building, unit::Creation)>;

/// [`DateTime`] when a [`Building`] was last updated.
///
/// [`DateTime`]: common::DateTime
pub type UpdateDateTime = DateTimeOf<(Building, unit::Update)>;
