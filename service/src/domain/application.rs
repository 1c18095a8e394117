//! [`Application`] definitions.

use common::{define_kind, define_text, unit, DateTimeOf, Recognized};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{person, unit as space, Person};

/// Request submitted by a (prospective) tenant.
#[derive(Clone, Debug, Deserialize, Eq, From, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Application {
    #[doc(hidden)]
    Rental(Rental),
    #[doc(hidden)]
    Maintenance(Maintenance),
    #[doc(hidden)]
    General(General),
}

impl Application {
    /// Returns ID of this [`Application`].
    #[must_use]
    pub fn id(&self) -> Id {
        self.header().id
    }

    /// Returns [`Kind`] of this [`Application`].
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Rental(_) => Kind::Rental,
            Self::Maintenance(_) => Kind::Maintenance,
            Self::General(_) => Kind::General,
        }
    }

    /// Returns the [`Header`] common to all kinds of [`Application`]s.
    #[must_use]
    pub fn header(&self) -> &Header {
        match self {
            Self::Rental(a) => &a.header,
            Self::Maintenance(a) => &a.header,
            Self::General(a) => &a.header,
        }
    }

    /// Returns the mutable [`Header`] common to all kinds of
    /// [`Application`]s.
    #[must_use]
    pub fn header_mut(&mut self) -> &mut Header {
        match self {
            Self::Rental(a) => &mut a.header,
            Self::Maintenance(a) => &mut a.header,
            Self::General(a) => &mut a.header,
        }
    }

    /// Returns the [`space::Reference`] this [`Application`] is about, if any.
    #[must_use]
    pub fn unit(&self) -> Option<&space::Reference> {
        match self {
            Self::Rental(a) => a.unit.as_ref(),
            Self::Maintenance(a) => Some(&a.unit),
            Self::General(_) => None,
        }
    }
}

/// Fields shared by all kinds of [`Application`]s.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// ID of the [`Application`].
    pub id: Id,

    /// [`Person`] who submitted the [`Application`].
    pub applicant: Person,

    /// [`Status`] of the [`Application`].
    pub status: Recognized<Status>,

    /// [`Priority`] of the [`Application`].
    pub priority: Recognized<Priority>,

    /// ID of the staff member the [`Application`] is assigned to, if any.
    #[serde(default)]
    pub assignee_id: Option<person::StaffId>,

    /// Optional [`Notes`] about the [`Application`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Notes>,

    /// [`DateTime`] when the [`Application`] was submitted.
    ///
    /// [`DateTime`]: common::DateTime
    pub submitted_at: SubmissionDateTime,

    /// [`DateTime`] when the [`Application`] was last updated.
    ///
    /// [`DateTime`]: common::DateTime
    pub updated_at: UpdateDateTime,
}

/// [`Application`] for renting a unit.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    /// Common [`Header`] of this [`Application`].
    #[serde(flatten)]
    pub header: Header,

    /// Desired unit, if the applicant has chosen one.
    #[serde(default)]
    pub unit: Option<space::Reference>,

    /// [`DateTime`] when the applicant would like to move in, if specified.
    ///
    /// [`DateTime`]: common::DateTime
    #[serde(default)]
    pub move_in_at: Option<MoveInDateTime>,
}

/// [`Application`] requesting maintenance of a unit.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
    /// Common [`Header`] of this [`Application`].
    #[serde(flatten)]
    pub header: Header,

    /// Unit requiring maintenance.
    pub unit: space::Reference,

    /// [`Description`] of the issue.
    pub description: Description,
}

/// Any other [`Application`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct General {
    /// Common [`Header`] of this [`Application`].
    #[serde(flatten)]
    pub header: Header,

    /// [`Description`] of the request.
    pub description: Description,
}

/// ID of an [`Application`].
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
    #[doc = "Free-form notes about an [`Application`]."]
    struct Notes(max = 2048);
}

define_text! {
    #[doc = "Description of an [`Application`] request."]
    struct Description(max = 4096);
}

define_kind! {
    #[doc = "Kind of an [`Application`]."]
    enum Kind {
        #[doc = "[`Rental`] application."]
        Rental = 1,

        #[doc = "[`Maintenance`] request."]
        Maintenance = 2,

        #[doc = "[`General`] request."]
        General = 3,
    }
}

define_kind! {
    #[doc = "Status of an [`Application`], in workflow order."]
    enum Status {
        #[doc = "Submitted, not looked at yet."]
        Pending = 0,

        #[doc = "Being reviewed."]
        InReview = 1,

        #[doc = "Paused until more information arrives."]
        OnHold = 2,

        #[doc = "Accepted."]
        Approved = 3,

        #[doc = "Declined."]
        Rejected = 4,
    }
}

impl Status {
    /// Indicates whether no further transitions are possible from this
    /// [`Status`].
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Indicates whether an [`Application`] may move from this [`Status`] to
    /// the `next` one.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        use Status as S;

        matches!(
            (self, next),
            (S::Pending, S::InReview | S::OnHold | S::Rejected)
                | (S::InReview, S::Approved | S::Rejected | S::OnHold)
                | (S::OnHold, S::Pending | S::InReview),
        )
    }
}

define_kind! {
    #[doc = "Priority of an [`Application`], from the lowest."]
    enum Priority {
        #[doc = "Can wait."]
        Low = 0,

        #[doc = "Regular."]
        Medium = 1,

        #[doc = "Should be handled soon."]
        High = 2,

        #[doc = "Must be handled immediately."]
        Urgent = 3,
    }
}

/// [`DateTime`] when an [`Application`] was submitted.
///
/// [`DateTime`]: common::DateTime
pub type SubmissionDateTime = DateTimeOf<(Application, unit::Submission)>;

/// [`DateTime`] when an [`Application`] was last updated.
///
/// [`DateTime`]: common::DateTime
pub type UpdateDateTime = DateTimeOf<(Application, unit::Update)>;

/// [`DateTime`] when a [`Rental`] applicant would like to move in.
///
/// [`DateTime`]: common::DateTime
pub type MoveInDateTime = DateTimeOf<(Rental, unit::Start)>;
