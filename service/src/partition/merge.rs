//! Merging of several [`Unit`]s into one.

use std::{
    borrow::Borrow,
    collections::{BTreeMap, BTreeSet},
};

use common::Money;
use itertools::{Itertools as _, MinMaxResult};

use crate::domain::{unit, Unit};

use super::{Cardinality, Error, MIN_MERGE_SOURCES};

/// Attributes of a [`Unit`] produced by a merge.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MergeTarget {
    /// Custom [`unit::Number`] of the merged [`Unit`].
    ///
    /// If [`None`], then [`suggest_number()`] is used.
    pub number: Option<unit::Number>,

    /// [`unit::Kind`] of the merged [`Unit`].
    pub kind: unit::Kind,

    /// [`unit::Status`] of the merged [`Unit`].
    pub status: unit::Status,

    /// Optional [`unit::Notes`] about the merged [`Unit`].
    pub notes: Option<unit::Notes>,
}

/// Result of merging [`Unit`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Merge {
    /// New [`Unit`] replacing the merged ones.
    pub unit: unit::Draft,

    /// IDs of the merged [`Unit`]s, in the order they were provided.
    pub consumed: Vec<unit::Id>,
}

/// Merges the provided `sources` into a single [`Unit`] described by the
/// `target`.
///
/// The merged [`Unit`] takes the exact sum of the `sources` areas and rents,
/// the union of their amenities, and is located on their lowest floor.
///
/// # Errors
///
/// - [`Error::InvalidCardinality`] if less than [`MIN_MERGE_SOURCES`] are
///   provided;
/// - [`Error::DuplicateUnit`] if the same [`Unit`] is provided twice;
/// - [`Error::MixedBuildings`] if the `sources` belong to different
///   buildings;
/// - [`Error::MixedCurrencies`] if the `sources` rents are in different
///   currencies;
/// - [`Error::AreaOverflow`] if the summed area doesn't fit into
///   [`unit::Area`];
/// - [`Error::InvalidNumber`] if the suggested [`unit::Number`] is invalid.
pub fn compute_merge<U: Borrow<Unit>>(
    sources: &[U],
    target: MergeTarget,
) -> Result<Merge, Error> {
    let sources = sources
        .iter()
        .map(Borrow::<Unit>::borrow)
        .collect::<Vec<_>>();

    let (first, rest) = match sources.as_slice() {
        [first, rest @ ..] if sources.len() >= MIN_MERGE_SOURCES => {
            (*first, rest)
        }
        _ => {
            return Err(Error::InvalidCardinality(
                Cardinality::InsufficientSelection(sources.len()),
            ))
        }
    };
    if let Some(dup) = sources.iter().map(|u| u.id).duplicates().next() {
        return Err(Error::DuplicateUnit(dup));
    }
    if !sources.iter().map(|u| u.building_id).all_equal() {
        return Err(Error::MixedBuildings);
    }
    if !sources.iter().map(|u| u.monthly_rent.currency).all_equal() {
        return Err(Error::MixedCurrencies);
    }

    let size = rest.iter().try_fold(first.size, |acc, u| {
        acc.checked_add(u.size).ok_or(Error::AreaOverflow)
    })?;
    let monthly_rent = rest
        .iter()
        .try_fold(first.monthly_rent, |acc: Money, u| {
            acc.checked_add(u.monthly_rent)
        })
        .ok_or(Error::MixedCurrencies)?;
    let floor = sources.iter().map(|u| u.floor).min().unwrap_or(first.floor);
    let amenities = sources
        .iter()
        .flat_map(|u| u.amenities.iter().cloned())
        .collect::<BTreeSet<_>>();

    let MergeTarget {
        number,
        kind,
        status,
        notes,
    } = target;
    let number = match number {
        Some(n) => n,
        None => suggest_number(&sources)?,
    };

    Ok(Merge {
        unit: unit::Draft {
            building_id: first.building_id,
            number,
            floor,
            size,
            kind,
            status,
            monthly_rent,
            amenities,
            notes,
        },
        consumed: sources.iter().map(|u| u.id).collect(),
    })
}

/// Suggests a [`unit::Number`] for the [`Unit`] merged from the provided
/// `sources`.
///
/// The suggestion is `{first}-{last}`, where `first` and `last` are the
/// lexicographically smallest and largest [`unit::Number`]s of the `sources`.
///
/// # Errors
///
/// - [`Error::InvalidCardinality`] if no `sources` are provided;
/// - [`Error::InvalidNumber`] if the suggestion doesn't fit into a
///   [`unit::Number`].
pub fn suggest_number<U: Borrow<Unit>>(
    sources: &[U],
) -> Result<unit::Number, Error> {
    let (first, last) = match sources
        .iter()
        .map(|u| &Borrow::<Unit>::borrow(u).number)
        .minmax()
    {
        MinMaxResult::NoElements => {
            return Err(Error::InvalidCardinality(
                Cardinality::InsufficientSelection(0),
            ))
        }
        MinMaxResult::OneElement(n) => (n, n),
        MinMaxResult::MinMax(first, last) => (first, last),
    };

    let number = format!("{first}-{last}");
    unit::Number::new(number.clone()).ok_or(Error::InvalidNumber(number))
}

/// Groups the provided `units` by their [`unit::Floor`]s, ordering floors
/// ascending and [`Unit`]s within a floor by their [`unit::Number`]s.
#[must_use]
pub fn group_by_floor<U: Borrow<Unit>>(
    units: &[U],
) -> BTreeMap<unit::Floor, Vec<&Unit>> {
    let mut floors = BTreeMap::<_, Vec<&Unit>>::new();
    for u in units.iter().map(Borrow::<Unit>::borrow) {
        floors.entry(u.floor).or_default().push(u);
    }
    for units in floors.values_mut() {
        units.sort_by(|a, b| a.number.cmp(&b.number));
    }
    floors
}

/// Selection of [`Unit`]s to be merged, toggled one by one.
#[derive(Clone, Debug)]
pub struct MergeSelection<'u> {
    /// [`Unit`]s available for selection.
    units: &'u [Unit],

    /// IDs of the selected [`Unit`]s, in selection order.
    selected: Vec<unit::Id>,
}

impl<'u> MergeSelection<'u> {
    /// Creates a new empty [`MergeSelection`] over the provided `units`.
    #[must_use]
    pub fn new(units: &'u [Unit]) -> Self {
        Self {
            units,
            selected: Vec::new(),
        }
    }

    /// Selects the [`Unit`] with the provided `id`, or deselects it if it's
    /// selected already.
    ///
    /// Returns whether the [`Unit`] is selected after the toggle. [`Unit`]s
    /// not available for selection are never selected.
    pub fn toggle(&mut self, id: unit::Id) -> bool {
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            _ = self.selected.remove(pos);
            return false;
        }
        if !self.units.iter().any(|u| u.id == id) {
            return false;
        }
        self.selected.push(id);
        true
    }

    /// Indicates whether the [`Unit`] with the provided `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: unit::Id) -> bool {
        self.selected.contains(&id)
    }

    /// Returns the selected [`Unit`]s, in selection order.
    #[must_use]
    pub fn selected(&self) -> Vec<&'u Unit> {
        self.selected
            .iter()
            .filter_map(|id| self.units.iter().find(|u| u.id == *id))
            .collect()
    }

    /// Indicates whether enough [`Unit`]s are selected to be merged.
    #[must_use]
    pub fn can_merge(&self) -> bool {
        self.selected.len() >= MIN_MERGE_SOURCES
    }

    /// Returns the total square feet of the selected [`Unit`]s.
    #[must_use]
    pub fn total_area(&self) -> u64 {
        self.selected().iter().map(|u| u64::from(u.size.get())).sum()
    }

    /// Groups all the [`Unit`]s available for selection by floor.
    ///
    /// See [`group_by_floor()`] for details.
    #[must_use]
    pub fn by_floor(&self) -> BTreeMap<unit::Floor, Vec<&'u Unit>> {
        group_by_floor(self.units)
    }

    /// Merges the selected [`Unit`]s.
    ///
    /// # Errors
    ///
    /// See [`compute_merge()`].
    pub fn merge(&self, target: MergeTarget) -> Result<Merge, Error> {
        compute_merge(&self.selected(), target)
    }
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeSet;

    use common::{DateTime, Money};

    use crate::{
        domain::{building, unit, Unit},
        partition::{Cardinality, Error},
    };

    use super::{
        compute_merge, group_by_floor, suggest_number, MergeSelection,
        MergeTarget,
    };

    fn unit(
        building_id: building::Id,
        number: &str,
        floor: u16,
        sq_ft: u32,
        rent: &str,
        amenities: &[&str],
    ) -> Unit {
        Unit {
            id: unit::Id::new(),
            building_id,
            number: unit::Number::new(number).unwrap(),
            floor: unit::Floor::new(floor).unwrap(),
            size: unit::Area::new(sq_ft).unwrap(),
            kind: unit::Kind::Office,
            status: unit::Status::Available,
            monthly_rent: rent.parse::<Money>().unwrap(),
            amenities: amenities
                .iter()
                .map(|a| unit::Amenity::new(*a).unwrap())
                .collect(),
            notes: None,
            created_at: DateTime::now().coerce(),
        }
    }

    fn target() -> MergeTarget {
        MergeTarget {
            number: None,
            kind: unit::Kind::Retail,
            status: unit::Status::Reserved,
            notes: None,
        }
    }

    fn building_units() -> Vec<Unit> {
        let b = building::Id::new();
        vec![
            unit(b, "001", 1, 100, "1000USD", &["hvac"]),
            unit(b, "002", 1, 100, "1200.50USD", &["parking"]),
            unit(b, "001", 2, 100, "900USD", &[]),
            unit(b, "002", 2, 100, "900USD", &[]),
        ]
    }

    #[test]
    fn merges_floor_neighbours() {
        let units = building_units();

        let merge = compute_merge(&units[..2], target()).unwrap();

        assert_eq!(merge.unit.size.get(), 200);
        assert_eq!(merge.unit.number.as_ref(), "001-002");
        assert_eq!(merge.unit.floor.get(), 1);
        assert_eq!(merge.unit.building_id, units[0].building_id);
        assert_eq!(merge.unit.kind, unit::Kind::Retail);
        assert_eq!(merge.unit.status, unit::Status::Reserved);
        assert_eq!(merge.unit.monthly_rent.to_string(), "2200.5USD");
        assert_eq!(
            merge.unit.amenities,
            BTreeSet::from([
                unit::Amenity::new("hvac").unwrap(),
                unit::Amenity::new("parking").unwrap(),
            ]),
        );
        assert_eq!(merge.consumed, [units[0].id, units[1].id]);
    }

    #[test]
    fn merged_size_is_exact_sum() {
        let units = building_units();

        let merge = compute_merge(&units, target()).unwrap();

        assert_eq!(merge.unit.size.get(), 400);
        assert_eq!(merge.unit.floor.get(), 1);
        assert_eq!(merge.consumed.len(), 4);
    }

    #[test]
    fn uses_provided_number() {
        let units = building_units();
        let number = unit::Number::new("Suite 2").unwrap();

        let merge = compute_merge(
            &units[2..],
            MergeTarget {
                number: Some(number.clone()),
                notes: unit::Notes::new("Open space"),
                ..target()
            },
        )
        .unwrap();

        assert_eq!(merge.unit.number, number);
        assert_eq!(merge.unit.floor.get(), 2);
        assert_eq!(merge.unit.notes, unit::Notes::new("Open space"));
    }

    #[test]
    fn rejects_insufficient_selection() {
        let units = building_units();

        for len in [0, 1] {
            assert_eq!(
                compute_merge(&units[..len], target()).unwrap_err(),
                Error::InvalidCardinality(Cardinality::InsufficientSelection(
                    len,
                )),
            );
        }
    }

    #[test]
    fn rejects_duplicates() {
        let units = building_units();

        assert_eq!(
            compute_merge(&[&units[0], &units[1], &units[0]], target())
                .unwrap_err(),
            Error::DuplicateUnit(units[0].id),
        );
    }

    #[test]
    fn rejects_mixed_buildings() {
        let a = unit(building::Id::new(), "1", 1, 50, "10USD", &[]);
        let b = unit(building::Id::new(), "2", 1, 50, "10USD", &[]);

        assert_eq!(
            compute_merge(&[a, b], target()).unwrap_err(),
            Error::MixedBuildings,
        );
    }

    #[test]
    fn rejects_mixed_currencies() {
        let building = building::Id::new();
        let a = unit(building, "1", 1, 50, "10USD", &[]);
        let b = unit(building, "2", 1, 50, "10EUR", &[]);

        assert_eq!(
            compute_merge(&[a, b], target()).unwrap_err(),
            Error::MixedCurrencies,
        );
    }

    #[test]
    fn rejects_area_overflow() {
        let building = building::Id::new();
        let a = unit(building, "1", 1, u32::MAX, "10USD", &[]);
        let b = unit(building, "2", 1, 1, "10USD", &[]);

        assert_eq!(
            compute_merge(&[a, b], target()).unwrap_err(),
            Error::AreaOverflow,
        );
    }

    #[test]
    fn suggests_lexicographic_bounds() {
        let b = building::Id::new();
        let units = [
            unit(b, "10", 1, 1, "0USD", &[]),
            unit(b, "9", 1, 1, "0USD", &[]),
            unit(b, "100", 1, 1, "0USD", &[]),
        ];

        assert_eq!(suggest_number(&units).unwrap().as_ref(), "10-9");
        assert_eq!(suggest_number(&units[1..2]).unwrap().as_ref(), "9-9");
        assert!(suggest_number::<Unit>(&[]).is_err());
    }

    #[test]
    fn groups_by_floor() {
        let mut units = building_units();
        units.reverse();

        let floors = group_by_floor(&units);

        assert_eq!(
            floors.keys().map(|f| f.get()).collect::<Vec<_>>(),
            [1, 2],
        );
        for units in floors.values() {
            let numbers =
                units.iter().map(|u| u.number.as_ref()).collect::<Vec<_>>();
            assert_eq!(numbers, ["001", "002"]);
        }
    }

    #[test]
    fn selection_guards_merge() {
        let units = building_units();
        let mut selection = MergeSelection::new(&units);

        assert!(!selection.can_merge());
        assert!(selection.toggle(units[0].id));
        assert!(!selection.can_merge());
        assert!(!selection.toggle(unit::Id::new()));
        assert!(selection.toggle(units[1].id));
        assert!(selection.can_merge());
        assert_eq!(selection.total_area(), 200);

        assert!(!selection.toggle(units[0].id));
        assert!(!selection.is_selected(units[0].id));
        assert!(!selection.can_merge());
        assert!(selection.merge(target()).is_err());

        assert!(selection.toggle(units[3].id));
        let merge = selection.merge(target()).unwrap();
        assert_eq!(merge.consumed, [units[1].id, units[3].id]);
        assert_eq!(merge.unit.size.get(), 200);
        assert_eq!(merge.unit.floor.get(), 1);
        assert_eq!(selection.by_floor().len(), 2);
    }
}
