//! [`Unit`] definitions.

use std::{
    collections::BTreeSet,
    num::{NonZeroU16, NonZeroU32},
};

use common::{define_kind, define_text, unit, DateTimeOf, Money, Recognized};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::building;
#[cfg(doc)]
use crate::domain::Building;

/// Leasable physical space of a [`Building`].
///
/// Unlike listed records, a [`Unit`] carries no [`Recognized`] fields: an
/// unknown [`Kind`] or [`Status`] fails its deserialization, so a snapshot
/// with such a [`Unit`] is rejected as a whole.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// ID of this [`Unit`].
    pub id: Id,

    /// ID of the [`Building`] this [`Unit`] belongs to.
    pub building_id: building::Id,

    /// [`Number`] of this [`Unit`], unique within its [`Building`].
    #[serde(rename = "unitNumber")]
    pub number: Number,

    /// [`Floor`] this [`Unit`] is located on.
    #[serde(rename = "floorNumber")]
    pub floor: Floor,

    /// [`Area`] of this [`Unit`].
    #[serde(rename = "sizeSqFt")]
    pub size: Area,

    /// [`Kind`] of this [`Unit`].
    #[serde(rename = "type")]
    pub kind: Kind,

    /// [`Status`] of this [`Unit`].
    pub status: Status,

    /// Monthly rent of this [`Unit`].
    pub monthly_rent: Money,

    /// [`Amenity`]s of this [`Unit`].
    #[serde(default)]
    pub amenities: BTreeSet<Amenity>,

    /// Optional [`Notes`] about this [`Unit`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Notes>,

    /// [`DateTime`] when this [`Unit`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: CreationDateTime,
}

/// Specification of a new [`Unit`] not persisted yet.
///
/// Identity and creation time are assigned on persisting via
/// [`Draft::into_unit()`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// ID of the [`Building`] a new [`Unit`] belongs to.
    pub building_id: building::Id,

    /// [`Number`] of a new [`Unit`].
    #[serde(rename = "unitNumber")]
    pub number: Number,

    /// [`Floor`] of a new [`Unit`].
    #[serde(rename = "floorNumber")]
    pub floor: Floor,

    /// [`Area`] of a new [`Unit`].
    #[serde(rename = "sizeSqFt")]
    pub size: Area,

    /// [`Kind`] of a new [`Unit`].
    #[serde(rename = "type")]
    pub kind: Kind,

    /// [`Status`] of a new [`Unit`].
    pub status: Status,

    /// Monthly rent of a new [`Unit`].
    pub monthly_rent: Money,

    /// [`Amenity`]s of a new [`Unit`].
    pub amenities: BTreeSet<Amenity>,

    /// Optional [`Notes`] about a new [`Unit`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Notes>,
}

impl Draft {
    /// Turns this [`Draft`] into a [`Unit`] with the provided identity.
    #[must_use]
    pub fn into_unit(self, id: Id, created_at: CreationDateTime) -> Unit {
        let Self {
            building_id,
            number,
            floor,
            size,
            kind,
            status,
            monthly_rent,
            amenities,
            notes,
        } = self;
        Unit {
            id,
            building_id,
            number,
            floor,
            size,
            kind,
            status,
            monthly_rent,
            amenities,
            notes,
            created_at,
        }
    }
}

/// ID of a [`Unit`].
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
    #[doc = "Human-readable number of a [`Unit`]."]
    struct Number(max = 64);
}

define_text! {
    #[doc = "Amenity of a [`Unit`] (parking spot, kitchenette, etc)."]
    struct Amenity(max = 128);
}

define_text! {
    #[doc = "Free-form notes about a [`Unit`]."]
    struct Notes(max = 2048);
}

/// Floor of a [`Unit`], starting from `1`.
pub type Floor = NonZeroU16;

/// Area of a [`Unit`] in square feet, always positive.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Area(NonZeroU32);

impl Area {
    /// Creates a new [`Area`] if the given `sq_ft` is positive.
    #[must_use]
    pub fn new(sq_ft: u32) -> Option<Self> {
        NonZeroU32::new(sq_ft).map(Self)
    }

    /// Returns the number of square feet in this [`Area`].
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Adds the `other` [`Area`] to this one, returning [`None`] on overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.get()).map(Self)
    }
}

define_kind! {
    #[doc = "Kind of a [`Unit`]."]
    enum Kind {
        #[doc = "Office space."]
        Office = 1,

        #[doc = "Retail space."]
        Retail = 2,

        #[doc = "Warehouse space."]
        Warehouse = 3,

        #[doc = "Storage room."]
        Storage = 4,

        #[doc = "Residential space."]
        Residential = 5,

        #[doc = "Parking space."]
        Parking = 6,
    }
}

define_kind! {
    #[doc = "Status of a [`Unit`]."]
    enum Status {
        #[doc = "Free to be leased."]
        Available = 1,

        #[doc = "Leased by a tenant."]
        Occupied = 2,

        #[doc = "Temporarily unavailable due to maintenance."]
        UnderMaintenance = 3,

        #[doc = "Held for a pending lease."]
        Reserved = 4,
    }
}

/// Reference to a [`Unit`] nested into other records, as provided by the
/// external API.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Name of the [`Building`] the referenced [`Unit`] belongs to.
    pub building_name: building::Name,

    /// [`Number`] of the referenced [`Unit`].
    pub unit_number: Number,

    /// [`Kind`] of the referenced [`Unit`].
    #[serde(rename = "unitType")]
    pub unit_kind: Recognized<Kind>,
}

/// [`DateTime`] when a [`Unit`] was created.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(Unit, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Area, Kind, Status, Unit};

    const UNIT: &str = r#"{
        "id": "5b1ad6a4-5c7e-4b8e-9a4a-0f3c2a9e8d11",
        "buildingId": "0e0b4a4e-8d0c-4d0e-a8f5-3f4fba0b1c22",
        "unitNumber": "101",
        "floorNumber": 1,
        "sizeSqFt": 950,
        "type": "retail",
        "status": "under_maintenance",
        "monthlyRent": "2500.50USD",
        "amenities": ["kitchenette", "parking"],
        "createdAt": "2024-01-15T09:30:00Z"
    }"#;

    #[test]
    fn deserializes_api_shape() {
        let unit: Unit = serde_json::from_str(UNIT).unwrap();

        assert_eq!(unit.number.as_ref(), "101");
        assert_eq!(unit.floor.get(), 1);
        assert_eq!(unit.size.get(), 950);
        assert_eq!(unit.kind, Kind::Retail);
        assert_eq!(unit.status, Status::UnderMaintenance);
        assert_eq!(unit.monthly_rent.to_string(), "2500.5USD");
        assert_eq!(unit.amenities.len(), 2);
        assert!(unit.notes.is_none());
    }

    #[test]
    fn rejects_empty_area() {
        assert!(Area::new(0).is_none());
        assert!(serde_json::from_str::<Unit>(
            &UNIT.replace("\"sizeSqFt\": 950", "\"sizeSqFt\": 0"),
        )
        .is_err());
        assert!(serde_json::from_str::<Unit>(
            &UNIT.replace("\"floorNumber\": 1", "\"floorNumber\": 0"),
        )
        .is_err());
    }

    #[test]
    fn rejects_unknown_kind_and_status() {
        assert!(serde_json::from_str::<Unit>(
            &UNIT.replace("\"retail\"", "\"spaceship\""),
        )
        .is_err());
        assert!(serde_json::from_str::<Unit>(
            &UNIT.replace("\"under_maintenance\"", "\"demolished\""),
        )
        .is_err());
    }
}
