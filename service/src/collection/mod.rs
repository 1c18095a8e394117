//! Filtering, searching, sorting and statistics over [`Record`] collections.
//!
//! [`query()`] is a pure function: it holds no state and recomputes the whole
//! [`View`] from its input on every call.

mod filter;
mod impls;
mod sort;
mod stats;

use std::borrow::Cow;

use common::{DateTime, Enumeration, Recognized};

use crate::domain::{application::Priority, person};

pub use self::{
    filter::Filter,
    sort::{Direction, SortKey},
    stats::{Counts, Stats},
};

/// Record which can be [`query()`]ed.
pub trait Record {
    /// Kind (category) of this [`Record`].
    type Kind: Enumeration;

    /// Status of this [`Record`].
    type Status: Enumeration;

    /// Returns the kind of this [`Record`], if it's a recognized one.
    fn kind(&self) -> Option<Self::Kind>;

    /// Returns the status of this [`Record`].
    fn status(&self) -> &Recognized<Self::Status>;

    /// Returns the [`Priority`] of this [`Record`], if it has one.
    fn priority(&self) -> Option<&Recognized<Priority>> {
        None
    }

    /// Returns the staff member this [`Record`] is assigned to, if any.
    fn assignee(&self) -> Option<person::StaffId>;

    /// Returns the [`DateTime`] this [`Record`] is sorted by
    /// [`SortKey::Date`].
    fn sorted_at(&self) -> DateTime;

    /// Returns the text fields a search is performed over.
    fn search_fields(&self) -> Vec<Cow<'_, str>>;
}

/// Specification of how a [`View`] is derived from a [`Record`]s collection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Spec<K, S> {
    /// [`Filter`] by kind.
    pub kind: Filter<K>,

    /// [`Filter`] by status.
    pub status: Filter<S>,

    /// [`Filter`] by [`Priority`].
    pub priority: Filter<Priority>,

    /// Text to search for.
    ///
    /// Surrounding whitespace is ignored, and an empty text matches
    /// everything.
    pub search: String,

    /// [`SortKey`] to order the [`View`] by.
    pub sort: SortKey,

    /// [`Direction`] to order the [`View`] in.
    pub direction: Direction,
}

impl<K, S> Default for Spec<K, S> {
    fn default() -> Self {
        Self {
            kind: Filter::All,
            status: Filter::All,
            priority: Filter::All,
            search: String::new(),
            sort: SortKey::Date,
            direction: Direction::Descending,
        }
    }
}

/// Shortcut for the [`Spec`] of the provided [`Record`].
pub type SpecOf<R> = Spec<<R as Record>::Kind, <R as Record>::Status>;

/// Outcome of a [`query()`].
#[derive(Debug)]
pub struct View<'r, R: Record> {
    /// [`Record`]s passing the [`Spec`] filters, in the [`Spec`] order.
    pub visible: Vec<&'r R>,

    /// [`Stats`] of the whole queried collection, regardless of filters.
    pub stats: Stats<R::Status>,
}

/// Derives a [`View`] of the provided `records` according to the `spec`.
///
/// Filters are applied in the following order: kind, status, priority,
/// search. Unrecognized values never pass a concrete filter. The remaining
/// [`Record`]s are stably sorted, so ties keep their input order.
pub fn query<'r, R, I>(records: I, spec: &SpecOf<R>) -> View<'r, R>
where
    R: Record + 'r,
    I: IntoIterator<Item = &'r R>,
{
    let records = records.into_iter().collect::<Vec<_>>();
    let stats = Stats::of(records.iter().copied());

    let needle = filter::needle(&spec.search);
    let mut visible = records
        .into_iter()
        .filter(|r| spec.kind.matches(r.kind()))
        .filter(|r| spec.status.matches(r.status().known()))
        .filter(|r| {
            spec.priority
                .matches(r.priority().and_then(Recognized::known))
        })
        .filter(|r| {
            needle.as_deref().is_none_or(|n| filter::search(*r, n))
        })
        .collect::<Vec<_>>();
    sort::sort(&mut visible, spec.sort, spec.direction);

    View { visible, stats }
}

#[cfg(test)]
mod spec {
    use std::borrow::Cow;

    use common::{DateTime, Recognized};

    use crate::domain::{application::Priority, person, unit};

    use super::{query, Direction, Filter, Record, SortKey, Spec};

    /// Minimal [`Record`] for exercising the pipeline in isolation.
    #[derive(Clone, Debug)]
    struct Item {
        name: &'static str,
        kind: Recognized<unit::Kind>,
        status: Recognized<unit::Status>,
        priority: Option<Recognized<Priority>>,
        assignee: Option<person::StaffId>,
        at: i64,
    }

    impl Record for Item {
        type Kind = unit::Kind;
        type Status = unit::Status;

        fn kind(&self) -> Option<Self::Kind> {
            self.kind.known()
        }

        fn status(&self) -> &Recognized<Self::Status> {
            &self.status
        }

        fn priority(&self) -> Option<&Recognized<Priority>> {
            self.priority.as_ref()
        }

        fn assignee(&self) -> Option<person::StaffId> {
            self.assignee
        }

        fn sorted_at(&self) -> DateTime {
            DateTime::from_unix_timestamp(self.at).unwrap()
        }

        fn search_fields(&self) -> Vec<Cow<'_, str>> {
            vec![self.name.into()]
        }
    }

    fn item(
        name: &'static str,
        status: &str,
        priority: Option<&str>,
        at: i64,
    ) -> Item {
        Item {
            name,
            kind: Recognized::Known(unit::Kind::Office),
            status: Recognized::parse(status),
            priority: priority.map(Recognized::parse),
            assignee: None,
            at,
        }
    }

    fn items() -> Vec<Item> {
        vec![
            item("Alpha", "available", Some("high"), 30),
            item("Bravo", "occupied", Some("low"), 10),
            item("Charlie", "condemned", Some("urgent"), 50),
            item("Delta", "reserved", None, 20),
            item("Echo", "available", Some("critical"), 40),
        ]
    }

    fn names<'a>(visible: &[&'a Item]) -> Vec<&'a str> {
        visible.iter().map(|i| i.name).collect()
    }

    #[test]
    fn default_spec_sorts_by_date_descending() {
        let items = items();

        let view = query(&items, &Spec::default());

        assert_eq!(
            names(&view.visible),
            ["Charlie", "Echo", "Alpha", "Delta", "Bravo"],
        );
    }

    #[test]
    fn filters_are_idempotent() {
        let items = items();
        let specs = [
            Spec {
                status: Filter::Only(unit::Status::Available.into()),
                ..Spec::default()
            },
            Spec {
                priority: "high".parse().unwrap(),
                ..Spec::default()
            },
            Spec {
                search: "  a ".into(),
                sort: SortKey::Status,
                direction: Direction::Ascending,
                ..Spec::default()
            },
        ];

        for spec in specs {
            let once = query(&items, &spec);
            let twice = query(once.visible.iter().copied(), &spec);

            assert_eq!(names(&twice.visible), names(&once.visible));
        }
    }

    #[test]
    fn unknown_values_never_pass_concrete_filters() {
        let items = items();

        let view = query(
            &items,
            &Spec {
                status: "condemned".parse().unwrap(),
                ..Spec::default()
            },
        );
        assert!(view.visible.is_empty());

        let view = query(
            &items,
            &Spec {
                priority: "critical".parse().unwrap(),
                ..Spec::default()
            },
        );
        assert!(view.visible.is_empty());
    }

    #[test]
    fn records_without_priority_fail_priority_filter() {
        let items = items();

        for &priority in <Priority as common::Enumeration>::ALL {
            let view = query(
                &items,
                &Spec {
                    priority: Filter::Only(priority.into()),
                    ..Spec::default()
                },
            );
            assert!(!names(&view.visible).contains(&"Delta"));
        }
    }

    #[test]
    fn search_is_trimmed_and_case_insensitive() {
        let items = items();

        let view = query(
            &items,
            &Spec {
                search: "  hARl \t".into(),
                ..Spec::default()
            },
        );

        assert_eq!(names(&view.visible), ["Charlie"]);
    }

    #[test]
    fn direction_reverses_order_without_ties() {
        let items = items()
            .into_iter()
            .filter(|i| i.status.known().is_some())
            .collect::<Vec<_>>();
        let distinct = [
            (SortKey::Date, &items[..]),
            (SortKey::Priority, &items[..2]),
            (SortKey::Status, &items[..3]),
        ];

        for (sort, items) in distinct {
            let asc = query(
                items,
                &Spec {
                    sort,
                    direction: Direction::Ascending,
                    ..Spec::default()
                },
            );
            let mut desc = query(
                items,
                &Spec {
                    sort,
                    direction: Direction::Descending,
                    ..Spec::default()
                },
            )
            .visible;
            desc.reverse();

            assert_eq!(names(&asc.visible), names(&desc), "{sort}");
        }
    }

    #[test]
    fn unknown_values_sort_last_in_both_directions() {
        let items = items();

        for direction in [Direction::Ascending, Direction::Descending] {
            let view = query(
                &items,
                &Spec {
                    sort: SortKey::Status,
                    direction,
                    ..Spec::default()
                },
            );
            assert_eq!(view.visible.last().unwrap().name, "Charlie");

            let view = query(
                &items,
                &Spec {
                    sort: SortKey::Priority,
                    direction,
                    ..Spec::default()
                },
            );
            assert_eq!(names(&view.visible)[3..], ["Delta", "Echo"]);
        }
    }

    #[test]
    fn ties_keep_input_order() {
        let items = items();

        let view = query(
            &items,
            &Spec {
                sort: SortKey::Status,
                direction: Direction::Descending,
                ..Spec::default()
            },
        );

        assert_eq!(
            names(&view.visible),
            ["Delta", "Bravo", "Alpha", "Echo", "Charlie"],
        );
    }

    #[test]
    fn stats_ignore_filters() {
        let items = items();
        let all = query(&items, &Spec::default());
        let some = query(
            &items,
            &Spec {
                status: Filter::Only(unit::Status::Occupied.into()),
                search: "bra".into(),
                ..Spec::default()
            },
        );

        assert_eq!(some.visible.len(), 1);
        assert_eq!(all.stats, some.stats);
        assert_eq!(all.stats.total, 5);
        assert_eq!(all.stats.unassigned, 5);
        assert_eq!(all.stats.by_status.get(unit::Status::Available), 2);
        assert_eq!(all.stats.by_status.get(unit::Status::UnderMaintenance), 0);
        assert_eq!(all.stats.by_status.unknown, 1);
        assert_eq!(all.stats.by_priority.get(Priority::Medium), 0);
        assert_eq!(all.stats.by_priority.unknown, 1);
    }

    #[test]
    fn empty_input_gives_empty_view() {
        let items = Vec::<Item>::new();

        let view = query(&items, &Spec::default());

        assert!(view.visible.is_empty());
        assert_eq!(view.stats.total, 0);
        assert_eq!(view.stats.by_status.get(unit::Status::Available), 0);
    }
}
