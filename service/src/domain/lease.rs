//! [`Lease`] definitions.

use common::{define_kind, define_text, unit, DateTimeOf, Money, Recognized};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{person, unit as space, Person};
#[cfg(doc)]
use crate::domain::Unit;

/// Lease of a [`Unit`] by a tenant.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    /// ID of this [`Lease`].
    pub id: Id,

    /// ID of the leased [`Unit`].
    pub unit_id: space::Id,

    /// Leased [`Unit`] as referenced by this [`Lease`].
    pub unit: space::Reference,

    /// Tenant of this [`Lease`].
    pub tenant: Person,

    /// [`Kind`] of this [`Lease`].
    #[serde(rename = "type")]
    pub kind: Recognized<Kind>,

    /// [`Status`] of this [`Lease`].
    pub status: Recognized<Status>,

    /// Monthly rent agreed in this [`Lease`].
    pub monthly_rent: Money,

    /// [`DateTime`] when the term of this [`Lease`] starts.
    ///
    /// [`DateTime`]: common::DateTime
    pub starts_at: StartDateTime,

    /// [`DateTime`] when the term of this [`Lease`] ends, if it's fixed.
    ///
    /// [`DateTime`]: common::DateTime
    #[serde(default)]
    pub ends_at: Option<EndDateTime>,

    /// ID of the staff member handling this [`Lease`], if any.
    #[serde(default)]
    pub agent_id: Option<person::StaffId>,

    /// Optional [`Notes`] about this [`Lease`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Notes>,

    /// [`DateTime`] when this [`Lease`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Lease`] was last updated.
    ///
    /// [`DateTime`]: common::DateTime
    pub updated_at: UpdateDateTime,
}

/// ID of a [`Lease`].
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
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

define_text! {
    #[doc = "Free-form notes about a [`Lease`]."]
    struct Notes(max = 2048);
}

define_kind! {
    #[doc = "Kind of a [`Lease`]."]
    enum Kind {
        #[doc = "Lease with a fixed end date."]
        FixedTerm = 1,

        #[doc = "Lease renewed every month."]
        MonthToMonth = 2,
    }
}

define_kind! {
    #[doc = "Status of a [`Lease`]."]
    enum Status {
        #[doc = "Being prepared."]
        Draft = 1,

        #[doc = "Waiting for signatures."]
        Pending = 2,

        #[doc = "In effect."]
        Active = 3,

        #[doc = "Term is over."]
        Expired = 4,

        #[doc = "Ended before its term."]
        Terminated = 5,
    }
}

/// [`DateTime`] when a [`Lease`] term starts.
///
/// [`DateTime`]: common::DateTime
pub type StartDateTime = DateTimeOf<(Lease, unit::Start)>;

/// [`DateTime`] when a [`Lease`] term ends.
///
/// [`DateTime`]: common::DateTime
pub type EndDateTime = DateTimeOf<(Lease, unit::End)>;

/// [`DateTime`] when a [`Lease`] was created.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(Lease, unit::Creation)>;

/// [`DateTime`] when a [`Lease`] was last updated.
///
/// [`DateTime`]: common::DateTime
pub type UpdateDateTime = DateTimeOf<(Lease, unit::Update)>;
