//! Ordering of [`Record`]s.

use std::cmp::Ordering;

use common::Recognized;
use strum::{Display, EnumString};

use super::Record;

/// Key to sort [`Record`]s by.
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum SortKey {
    /// [`Record::sorted_at()`] date.
    Date,

    /// [`Record::priority()`], from the lowest.
    Priority,

    /// [`Record::status()`], in declaration order.
    Status,
}

/// Direction to sort [`Record`]s in.
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    /// From the smallest to the largest.
    Ascending,

    /// From the largest to the smallest.
    Descending,
}

/// Stably sorts the provided `records` by the `key` in the `direction`.
pub(super) fn sort<R: Record + ?Sized>(
    records: &mut [&R],
    key: SortKey,
    direction: Direction,
) {
    match key {
        SortKey::Date => records.sort_by(|a, b| {
            directed(Some(a.sorted_at()), Some(b.sorted_at()), direction)
        }),
        SortKey::Priority => records.sort_by(|a, b| {
            directed(
                a.priority().and_then(Recognized::known),
                b.priority().and_then(Recognized::known),
                direction,
            )
        }),
        SortKey::Status => records.sort_by(|a, b| {
            directed(a.status().known(), b.status().known(), direction)
        }),
    }
}

/// Compares the provided values in the `direction`.
///
/// Missing values go last regardless of the `direction`.
fn directed<T: Ord>(
    a: Option<T>,
    b: Option<T>,
    direction: Direction,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            Direction::Ascending => a.cmp(&b),
            Direction::Descending => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod spec {
    use std::cmp::Ordering;

    use super::{directed, Direction, SortKey};

    #[test]
    fn missing_values_go_last() {
        for dir in [Direction::Ascending, Direction::Descending] {
            assert_eq!(directed(Some(1), None, dir), Ordering::Less);
            assert_eq!(directed(None, Some(1), dir), Ordering::Greater);
            assert_eq!(directed::<u8>(None, None, dir), Ordering::Equal);
        }
        assert_eq!(
            directed(Some(1), Some(2), Direction::Ascending),
            Ordering::Less,
        );
        assert_eq!(
            directed(Some(1), Some(2), Direction::Descending),
            Ordering::Greater,
        );
    }

    #[test]
    fn parses_keys() {
        assert_eq!("priority".parse(), Ok(SortKey::Priority));
        assert_eq!("descending".parse(), Ok(Direction::Descending));
        assert!("1".parse::<SortKey>().is_err());
        assert_eq!(SortKey::Status.to_string(), "status");
    }
}
