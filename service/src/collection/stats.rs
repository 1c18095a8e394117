//! [`Stats`] definitions.

use std::collections::BTreeMap;

use common::{Enumeration, Recognized};
use serde::Serialize;

use crate::domain::application::Priority;

use super::Record;

/// Aggregated statistics of a [`Record`]s collection.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats<S: Enumeration> {
    /// Total number of [`Record`]s.
    pub total: usize,

    /// Number of [`Record`]s per status.
    pub by_status: Counts<S>,

    /// Number of [`Record`]s per [`Priority`].
    ///
    /// [`Record`]s without a [`Priority`] are not counted here.
    pub by_priority: Counts<Priority>,

    /// Number of [`Record`]s not assigned to anyone.
    pub unassigned: usize,
}

impl<S: Enumeration> Stats<S> {
    /// Computes [`Stats`] of the provided `records`.
    pub(super) fn of<'r, R>(records: impl IntoIterator<Item = &'r R>) -> Self
    where
        R: Record<Status = S> + ?Sized + 'r,
    {
        records.into_iter().fold(Self::default(), |mut stats, r| {
            stats.total += 1;
            stats.by_status.add(r.status());
            if let Some(p) = r.priority() {
                stats.by_priority.add(p);
            }
            if r.assignee().is_none() {
                stats.unassigned += 1;
            }
            stats
        })
    }
}

impl<S: Enumeration> Default for Stats<S> {
    fn default() -> Self {
        Self {
            total: 0,
            by_status: Counts::default(),
            by_priority: Counts::default(),
            unassigned: 0,
        }
    }
}

/// Numbers of occurrences of every [`Enumeration`] value.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Counts<K: Enumeration> {
    /// Occurrences of every known value, including the absent ones.
    #[serde(flatten)]
    pub known: BTreeMap<K, usize>,

    /// Occurrences of values not known to the [`Enumeration`].
    pub unknown: usize,
}

impl<K: Enumeration> Counts<K> {
    /// Returns the number of occurrences of the provided `value`.
    #[must_use]
    pub fn get(&self, value: K) -> usize {
        self.known.get(&value).copied().unwrap_or_default()
    }

    /// Counts one more occurrence of the provided `value`.
    fn add(&mut self, value: &Recognized<K>) {
        match value {
            Recognized::Known(k) => *self.known.entry(*k).or_default() += 1,
            Recognized::Unknown(_) => self.unknown += 1,
        }
    }
}

impl<K: Enumeration> Default for Counts<K> {
    fn default() -> Self {
        Self {
            known: K::ALL.iter().map(|k| (*k, 0)).collect(),
            unknown: 0,
        }
    }
}
